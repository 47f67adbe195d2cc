//! ABI decoding (32-byte slot walking with offset following)

use staking_primitives::{Address, U256};

use super::types::{ParamType, Token};
use crate::StakingError;

/// Decode tokens from ABI-encoded data
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, StakingError> {
    let mut offset = 0;
    let mut tokens = Vec::with_capacity(types.len());

    for param_type in types {
        let token = decode_token(param_type, data, offset)?;
        tokens.push(token);
        offset += 32;
    }

    Ok(tokens)
}

/// Decode a single token at a head slot
fn decode_token(
    param_type: &ParamType,
    data: &[u8],
    offset: usize,
) -> Result<Token, StakingError> {
    check_length(data, offset + 32)?;
    match param_type {
        ParamType::Address => {
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&data[offset + 12..offset + 32]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(_) => {
            let value = U256::from_big_endian(&data[offset..offset + 32]);
            Ok(Token::Uint(value))
        }
        ParamType::Bool => Ok(Token::Bool(data[offset + 31] != 0)),
        ParamType::FixedBytes(size) => {
            if *size > 32 {
                return Err(StakingError::Decode(format!("bytes{} exceeds one word", size)));
            }
            Ok(Token::FixedBytes(data[offset..offset + *size].to_vec()))
        }
        ParamType::Bytes => {
            let data_offset = read_offset(data, offset)?;
            let bytes = decode_bytes(data, data_offset)?;
            Ok(Token::Bytes(bytes))
        }
        ParamType::Array(inner) => {
            let data_offset = read_offset(data, offset)?;
            check_length(data, data_offset + 32)?;
            let len = read_usize(&data[data_offset..data_offset + 32])?;

            // Guard against length words pointing past the buffer
            check_length(data, data_offset + 32 + len.saturating_mul(32))?;

            let mut tokens = Vec::with_capacity(len);
            let mut inner_offset = data_offset + 32;

            for _ in 0..len {
                tokens.push(decode_token(inner, data, inner_offset)?);
                inner_offset += 32;
            }

            Ok(Token::Array(tokens))
        }
    }
}

/// Decode dynamic bytes at an absolute offset
fn decode_bytes(data: &[u8], offset: usize) -> Result<Vec<u8>, StakingError> {
    check_length(data, offset + 32)?;
    let len = read_usize(&data[offset..offset + 32])?;
    check_length(data, offset + 32 + len)?;
    Ok(data[offset + 32..offset + 32 + len].to_vec())
}

/// Read a dynamic-section offset word
fn read_offset(data: &[u8], offset: usize) -> Result<usize, StakingError> {
    check_length(data, offset + 32)?;
    read_usize(&data[offset..offset + 32])
}

/// Read a word that must fit in usize (offsets, lengths)
fn read_usize(word: &[u8]) -> Result<usize, StakingError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX) {
        return Err(StakingError::Decode(format!("length/offset overflows: {}", value)));
    }
    Ok(value.as_usize())
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<(), StakingError> {
    if data.len() < required {
        return Err(StakingError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}

//! ABI encoding (head/tail offset scheme)

use staking_primitives::U256;

use super::types::{ParamType, Token};
use crate::StakingError;

/// Encode tokens according to the Solidity ABI convention
pub fn encode(tokens: &[Token]) -> Result<Vec<u8>, StakingError> {
    let types: Vec<ParamType> = tokens.iter().map(|t| t.type_of()).collect();
    encode_params(&types, tokens)
}

/// Encode a function call: selector followed by arguments encoded against
/// their declared types
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, StakingError> {
    let mut result = selector.to_vec();
    result.extend(encode_params(types, tokens)?);
    Ok(result)
}

/// Encode parameters against their declared types
pub fn encode_params(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, StakingError> {
    // Head is one 32-byte slot per parameter; dynamic parameters hold an
    // offset into the tail.
    let head_size = types.len() * 32;

    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(tokens.iter()) {
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token)?);
        } else {
            head.extend(encode_token(param_type, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode a single token
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, StakingError> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            Ok(buf.to_vec())
        }
        (ParamType::Uint(_), Token::Uint(value)) => Ok(encode_u256(value)),
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            Ok(buf.to_vec())
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() != *size || *size > 32 {
                return Err(StakingError::Encode(format!(
                    "bytes{} value has {} bytes",
                    size,
                    data.len()
                )));
            }
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut result = encode_u256(&U256::from(tokens.len()));
            let inner_types: Vec<ParamType> =
                tokens.iter().map(|_| (**inner).clone()).collect();
            result.extend(encode_params(&inner_types, tokens)?);
            Ok(result)
        }
        (expected, actual) => Err(StakingError::Encode(format!(
            "type mismatch: schema expects {}, got {:?}",
            expected.name(),
            actual.type_of().name()
        ))),
    }
}

/// Encode a U256 as a 32-byte big-endian word
fn encode_u256(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

/// Encode dynamic bytes: length word followed by right-padded content
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}

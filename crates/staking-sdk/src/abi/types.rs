//! ABI type definitions
//!
//! Only the types the staking contract interface uses are modeled:
//! address, fixed-width unsigned integers, bool, dynamic bytes, fixed
//! bytes, and dynamic arrays.

use staking_primitives::{Address, U256};

/// A decoded or to-be-encoded ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits, widened to U256)
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// Dynamic array
    Array(Vec<Token>),
}

/// ABI parameter type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// Dynamic array
    Array(Box<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (encoded via offset into the tail)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::Array(_))
    }

    /// Canonical type name, e.g. "uint64" or "uint64[]"
    pub fn name(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Bool => "bool".to_string(),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::FixedBytes(size) => format!("bytes{}", size),
            ParamType::Array(inner) => format!("{}[]", inner.name()),
        }
    }
}

impl Token {
    /// Create a uint token from a u64
    pub fn uint64(value: u64) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Create a uint token from a u8
    pub fn uint8(value: u8) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Get the type of this token
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Bool(_) => ParamType::Bool,
            Token::Bytes(_) => ParamType::Bytes,
            Token::FixedBytes(b) => ParamType::FixedBytes(b.len()),
            Token::Array(tokens) => {
                let inner = tokens
                    .first()
                    .map(|t| t.type_of())
                    .unwrap_or(ParamType::Uint(256));
                ParamType::Array(Box::new(inner))
            }
        }
    }

    /// Extract as U256, if this is a uint token
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as u64, if this is a uint token that fits
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Token::Uint(v) if v.bits() <= 64 => Some(v.as_u64()),
            _ => None,
        }
    }

    /// Extract as address
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Token::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as byte vector (dynamic or fixed bytes)
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Token::Bytes(b) | Token::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    /// Extract as array elements
    pub fn as_array(&self) -> Option<&[Token]> {
        match self {
            Token::Array(items) => Some(items),
            _ => None,
        }
    }
}

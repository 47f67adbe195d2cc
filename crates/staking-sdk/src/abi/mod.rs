//! ABI encoding and decoding for the staking contract interface
//!
//! Implements the standard contract ABI convention: 32-byte big-endian
//! words, left-zero-padded addresses, and a length-prefix/offset scheme
//! for dynamic types. Selectors are not derived here; they are fixed
//! constants owned by the function registry.

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, encode_params};
pub use types::{ParamType, Token};

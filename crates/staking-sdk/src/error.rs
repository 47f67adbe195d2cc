//! SDK error types

use thiserror::Error;

/// Error type for all staking SDK operations
#[derive(Debug, Error)]
pub enum StakingError {
    /// Operation name not present in the function registry
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Argument count does not match the registered input schema
    #[error("{operation}: expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Operation being encoded
        operation: &'static str,
        /// Registered arity
        expected: usize,
        /// Supplied arity
        got: usize,
    },

    /// Operation has no registered output schema; caller must handle raw bytes
    #[error("no output schema registered for {0}")]
    SchemaMissing(&'static str),

    /// ABI encoding error
    #[error("ABI encoding error: {0}")]
    Encode(String),

    /// ABI decoding error (truncated or malformed return data)
    #[error("ABI decoding error: {0}")]
    Decode(String),

    /// Signer unavailable or refused to sign
    #[error("signing error: {0}")]
    Signing(String),

    /// Chain rejected the signed transaction
    #[error("submission rejected: {0}")]
    Submission(String),

    /// Pagination hit the round bound before the contract reported completion
    #[error("pagination truncated after {rounds} rounds ({items} items accumulated)")]
    PaginationTruncated {
        /// Rounds executed before giving up
        rounds: usize,
        /// Items accumulated before truncation
        items: usize,
    },

    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Invalid address format
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key material
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Missing required field when building a transaction
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl From<hex::FromHexError> for StakingError {
    fn from(e: hex::FromHexError) -> Self {
        StakingError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for StakingError {
    fn from(e: serde_json::Error) -> Self {
        StakingError::Serialization(e.to_string())
    }
}

impl From<staking_crypto::CryptoError> for StakingError {
    fn from(e: staking_crypto::CryptoError) -> Self {
        StakingError::Signing(e.to_string())
    }
}

impl From<staking_primitives::PrimitiveError> for StakingError {
    fn from(e: staking_primitives::PrimitiveError) -> Self {
        StakingError::InvalidAddress(e.to_string())
    }
}

impl From<staking_primitives::AddressError> for StakingError {
    fn from(e: staking_primitives::AddressError) -> Self {
        StakingError::InvalidAddress(e.to_string())
    }
}

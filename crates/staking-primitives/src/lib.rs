//! # staking-primitives
//!
//! Primitive chain types shared across the staking SDK.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Validator identifier assigned by the staking contract
pub type ValidatorId = u64;

/// Per-delegator withdrawal request slot
pub type WithdrawalId = u8;

/// On-chain epoch number
pub type Epoch = u64;

/// Transaction nonce type
pub type Nonce = u64;

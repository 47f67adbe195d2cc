//! # staking-crypto
//!
//! Hashing and signing primitives for the staking SDK.
//!
//! - Keccak-256 and BLAKE3 hashing
//! - ECDSA signing/verification (secp256k1), recoverable and non-recoverable
//! - BLS12-381 signing (min-pk, proof-of-possession ciphersuite)
//! - Validator key material loading and public-key derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
mod error;
mod hash;
mod keys;
mod secp;

pub use error::CryptoError;
pub use hash::{blake3_256, keccak256};
pub use keys::ValidatorKeys;
pub use secp::{
    compressed_public_key, public_key_to_address, recover_public_key, sign, sign_payload,
    verify, PrivateKey, PublicKey, Signature,
};

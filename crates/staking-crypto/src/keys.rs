//! Validator key material
//!
//! A validator registers with two key pairs: a secp256k1 key (shared with
//! the transaction-signing identity) and a BLS12-381 key used for consensus
//! duties. Both private keys are loaded from 32-byte hex strings; the
//! registration payload embeds both public keys.

use k256::ecdsa::SigningKey;
use staking_primitives::Address;
use zeroize::Zeroize;

use crate::bls::{BlsPublicKey, BlsSecretKey, BlsSignature};
use crate::secp::{compressed_public_key, public_key_to_address, sign_payload};
use crate::{blake3_256, CryptoError};

/// Key pair bundle for validator registration
///
/// Debug output never includes private key material.
pub struct ValidatorKeys {
    secp: SigningKey,
    bls: BlsSecretKey,
}

impl ValidatorKeys {
    /// Build from raw 32-byte private keys
    pub fn new(secp_key: &[u8; 32], bls_key: &[u8; 32]) -> Result<Self, CryptoError> {
        let secp = SigningKey::from_slice(secp_key).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let bls = BlsSecretKey::from_bytes(bls_key)?;
        Ok(Self { secp, bls })
    }

    /// Build from hex-encoded private keys (with or without 0x prefix)
    pub fn from_hex(secp_hex: &str, bls_hex: &str) -> Result<Self, CryptoError> {
        let mut secp_bytes = decode_key_hex(secp_hex)?;
        let mut bls_bytes = decode_key_hex(bls_hex)?;

        let result = Self::new(&secp_bytes, &bls_bytes);
        secp_bytes.zeroize();
        bls_bytes.zeroize();
        result
    }

    /// Compressed secp256k1 public key (33 bytes)
    pub fn secp_public_key(&self) -> [u8; 33] {
        compressed_public_key(self.secp.verifying_key())
    }

    /// Compressed BLS public key (48 bytes)
    pub fn bls_public_key(&self) -> BlsPublicKey {
        self.bls.public_key()
    }

    /// Address derived from the secp256k1 key
    pub fn address(&self) -> Address {
        public_key_to_address(self.secp.verifying_key())
    }

    /// Sign the registration payload with the secp key: a compact 64-byte
    /// signature over the BLAKE3 digest of the payload
    pub fn sign_payload_secp(&self, payload: &[u8]) -> Result<[u8; 64], CryptoError> {
        sign_payload(&blake3_256(payload), &self.secp)
    }

    /// Sign the registration payload with the BLS key (over the raw payload,
    /// not a digest)
    pub fn sign_payload_bls(&self, payload: &[u8]) -> BlsSignature {
        self.bls.sign(payload)
    }
}

impl std::fmt::Debug for ValidatorKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorKeys")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Decode a 32-byte key from hex, stripping an optional 0x prefix
fn decode_key_hex(s: &str) -> Result<[u8; 32], CryptoError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let mut bytes = hex::decode(s).map_err(|_| CryptoError::InvalidPrivateKey)?;
    if bytes.len() != 32 {
        bytes.zeroize();
        return Err(CryptoError::InvalidPrivateKey);
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(key)
}

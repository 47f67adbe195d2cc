//! BLS12-381 signatures (min-pk: 48-byte public keys, 96-byte signatures)
//!
//! The staking contract verifies validator BLS signatures under the
//! proof-of-possession ciphersuite, so signing here uses the standard
//! `POP_` domain separation tag. Signing is deterministic: the same key
//! and message always produce the same signature.

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

use crate::CryptoError;

/// Domain separation tag for the G2 proof-of-possession ciphersuite
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed BLS public key length in bytes
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed BLS signature length in bytes
pub const SIGNATURE_LEN: usize = 96;

/// BLS12-381 secret key (32-byte scalar)
pub struct BlsSecretKey(SecretKey);

/// BLS12-381 public key (48 bytes compressed, G1)
#[derive(Clone)]
pub struct BlsPublicKey(PublicKey);

/// BLS12-381 signature (96 bytes compressed, G2)
#[derive(Clone)]
pub struct BlsSignature(Signature);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsSignature {}

impl BlsSecretKey {
    /// Load a secret key from a 32-byte big-endian scalar
    ///
    /// The scalar must be nonzero and canonical (below the curve order).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        SecretKey::from_bytes(bytes)
            .map(BlsSecretKey)
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    /// Derive the public key
    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey(self.0.sk_to_pk())
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.0.sign(message, DST, &[]))
    }
}

impl std::fmt::Debug for BlsSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlsSecretKey").finish_non_exhaustive()
    }
}

impl BlsPublicKey {
    /// Parse a compressed 48-byte public key, checking group membership
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        PublicKey::key_validate(bytes)
            .map(BlsPublicKey)
            .map_err(|e| CryptoError::InvalidSignature(format!("bad BLS public key: {:?}", e)))
    }

    /// Compressed 48-byte representation
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.to_bytes()
    }
}

impl std::fmt::Debug for BlsPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlsPublicKey(0x{})", hex::encode(self.to_bytes()))
    }
}

impl BlsSignature {
    /// Parse a compressed 96-byte signature, checking group membership
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Signature::sig_validate(bytes, false)
            .map(BlsSignature)
            .map_err(|e| CryptoError::InvalidSignature(format!("bad BLS signature: {:?}", e)))
    }

    /// Compressed 96-byte representation
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0.to_bytes()
    }

    /// Verify this signature over `message` against `public_key`
    pub fn verify(&self, message: &[u8], public_key: &BlsPublicKey) -> bool {
        self.0.verify(true, message, DST, &[], &public_key.0, true) == BLST_ERROR::BLST_SUCCESS
    }
}

impl std::fmt::Debug for BlsSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlsSignature(0x{})", hex::encode(self.to_bytes()))
    }
}

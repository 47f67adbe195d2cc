//! Keccak-256 and BLAKE3 hashing

use sha3::{Digest, Keccak256};
use staking_primitives::H256;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Compute BLAKE3 hash of the input data
///
/// Used for the validator-registration payload digest, which the contract
/// verifies against the embedded secp256k1 public key.
pub fn blake3_256(data: &[u8]) -> H256 {
    H256::from_bytes(*blake3::hash(data).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // keccak256("") = 0xc5d2...a470
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_32_zero_bytes() {
        let hash = keccak256(&[0u8; 32]);
        assert_eq!(
            hash.to_hex(),
            "0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
    }

    #[test]
    fn test_keccak256_deterministic() {
        let data = b"test data for determinism";
        assert_eq!(keccak256(data), keccak256(data));
        assert_ne!(keccak256(b"input1"), keccak256(b"input2"));
    }

    #[test]
    fn test_blake3_empty() {
        // blake3("") = 0xaf13...9262 (official test vector)
        let hash = blake3_256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xaf1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_blake3_deterministic() {
        let payload = [0x42u8; 165];
        assert_eq!(blake3_256(&payload), blake3_256(&payload));
        assert_ne!(blake3_256(&payload), keccak256(&payload));
    }
}

//! Transaction signers
//!
//! [`Signer`] abstracts over where the secp256k1 key lives. [`LocalSigner`]
//! holds the key in memory; [`DeviceSigner`] forwards the signing hash to
//! an external device (hardware wallet, remote signer) that returns the
//! recoverable signature.

use async_trait::async_trait;
use staking_crypto::{public_key_to_address, sign, CryptoError, PrivateKey, Signature};
use staking_primitives::{Address, H256};
use zeroize::Zeroize;

use crate::tx::Eip1559Transaction;
use crate::StakingError;

/// Signs EIP-1559 transactions into their wire form
#[async_trait]
pub trait Signer: Send + Sync {
    /// Address the signatures recover to
    fn address(&self) -> Address;

    /// Sign a transaction and return the 0x02-prefixed signed encoding
    async fn sign_transaction(&self, tx: &Eip1559Transaction) -> Result<Vec<u8>, StakingError>;
}

/// In-memory secp256k1 signer
///
/// Debug output never includes the private key.
pub struct LocalSigner {
    key: PrivateKey,
    address: Address,
}

impl LocalSigner {
    /// Build from a raw 32-byte private key
    pub fn new(key_bytes: &[u8; 32]) -> Result<Self, StakingError> {
        let key = PrivateKey::from_slice(key_bytes)
            .map_err(|_| StakingError::InvalidKey("invalid secp256k1 scalar".to_string()))?;
        let address = public_key_to_address(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Build from a hex-encoded private key (with or without 0x prefix)
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, StakingError> {
        let stripped = hex_key.strip_prefix("0x").unwrap_or(hex_key);
        let mut bytes = hex::decode(stripped)
            .map_err(|e| StakingError::InvalidKey(e.to_string()))?;
        if bytes.len() != 32 {
            bytes.zeroize();
            return Err(StakingError::InvalidKey(
                "private key must be 32 bytes".to_string(),
            ));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let result = Self::new(&key);
        key.zeroize();
        result
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Signer for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(&self, tx: &Eip1559Transaction) -> Result<Vec<u8>, StakingError> {
        let digest = tx.signing_hash();
        let signature = sign(&digest, &self.key)?;
        Ok(tx.encode_signed(&signature))
    }
}

/// An external device that produces recoverable signatures over digests
///
/// Wire protocol and session handling live behind the implementation;
/// the SDK only hands over the 32-byte signing hash.
#[async_trait]
pub trait SigningDevice: Send + Sync {
    /// Address of the key held on the device
    fn address(&self) -> Address;

    /// Sign a 32-byte digest with the device key
    async fn sign_digest(&self, digest: &H256) -> Result<Signature, CryptoError>;
}

/// Adapter that turns any [`SigningDevice`] into a [`Signer`]
#[derive(Debug)]
pub struct DeviceSigner<D> {
    device: D,
}

impl<D: SigningDevice> DeviceSigner<D> {
    /// Wrap a device
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Access the underlying device
    pub fn device(&self) -> &D {
        &self.device
    }
}

#[async_trait]
impl<D: SigningDevice> Signer for DeviceSigner<D> {
    fn address(&self) -> Address {
        self.device.address()
    }

    async fn sign_transaction(&self, tx: &Eip1559Transaction) -> Result<Vec<u8>, StakingError> {
        let digest = tx.signing_hash();
        let signature = self.device.sign_digest(&digest).await?;
        Ok(tx.encode_signed(&signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::TxBuilder;
    use bytes::Bytes;
    use staking_crypto::recover_public_key;
    use staking_primitives::U256;

    const KEY_HEX: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    fn sample_tx() -> Eip1559Transaction {
        TxBuilder::new()
            .chain_id(1)
            .nonce(0)
            .to(Address::from_hex("0x0000000000000000000000000000000000001000").unwrap())
            .value(U256::from(100u64))
            .data(Bytes::from(vec![0x84, 0x99, 0x4f, 0xec]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_local_signer_address() {
        let signer = LocalSigner::from_private_key_hex(KEY_HEX).unwrap();
        assert_eq!(signer.address().to_hex(), KEY_ADDRESS);
    }

    #[test]
    fn test_local_signer_rejects_bad_keys() {
        assert!(LocalSigner::from_private_key_hex("0x1234").is_err());
        assert!(LocalSigner::from_private_key_hex("not hex").is_err());
        assert!(LocalSigner::from_private_key_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        )
        .is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = LocalSigner::from_private_key_hex(KEY_HEX).unwrap();
        let debug = format!("{:?}", signer);
        assert!(debug.contains("address"));
        assert!(!debug.contains(KEY_HEX.trim_start_matches("0x")));
    }

    #[tokio::test]
    async fn test_local_signer_signature_recovers() {
        let signer = LocalSigner::from_private_key_hex(KEY_HEX).unwrap();
        let tx = sample_tx();

        let encoded = signer.sign_transaction(&tx).await.unwrap();
        assert_eq!(encoded[0], 0x02);

        // Recover the signer address from the last two RLP items
        let rlp = rlp::Rlp::new(&encoded[1..]);
        let y_parity: u8 = rlp.val_at(9).unwrap();
        let r: U256 = rlp.val_at(10).unwrap();
        let s: U256 = rlp.val_at(11).unwrap();

        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r.to_big_endian(&mut r_bytes);
        s.to_big_endian(&mut s_bytes);

        let signature = Signature {
            r: r_bytes,
            s: s_bytes,
            v: y_parity,
        };
        let recovered = recover_public_key(&tx.signing_hash(), &signature).unwrap();
        assert_eq!(public_key_to_address(&recovered), signer.address());
    }

    struct MockDevice {
        key: PrivateKey,
    }

    #[async_trait]
    impl SigningDevice for MockDevice {
        fn address(&self) -> Address {
            public_key_to_address(self.key.verifying_key())
        }

        async fn sign_digest(&self, digest: &H256) -> Result<Signature, CryptoError> {
            sign(digest, &self.key)
        }
    }

    #[tokio::test]
    async fn test_device_signer_matches_local() {
        let mut key_bytes = [0u8; 32];
        hex::decode_to_slice(KEY_HEX.trim_start_matches("0x"), &mut key_bytes).unwrap();

        let local = LocalSigner::new(&key_bytes).unwrap();
        let device = DeviceSigner::new(MockDevice {
            key: PrivateKey::from_slice(&key_bytes).unwrap(),
        });
        assert_eq!(local.address(), device.address());

        let tx = sample_tx();
        let from_local = local.sign_transaction(&tx).await.unwrap();
        let from_device = device.sign_transaction(&tx).await.unwrap();
        assert_eq!(from_local, from_device);
    }
}

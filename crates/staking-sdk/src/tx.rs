//! EIP-1559 (type 2) transaction envelope
//!
//! Only the type-2 dynamic-fee envelope is produced. The signing hash is
//! the keccak of the type byte followed by the RLP of nine fields; the
//! signed wire form appends y_parity, r, and s for twelve. The access
//! list is always empty.

use bytes::Bytes;
use rlp::RlpStream;
use staking_crypto::{keccak256, Signature};
use staking_primitives::{Address, H256, U256};

use crate::StakingError;

/// Transaction type byte for EIP-1559
pub const TX_TYPE: u8 = 0x02;

/// Default gas limit for staking contract calls
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Default max fee per gas: 500 gwei
pub const DEFAULT_MAX_FEE_PER_GAS: u128 = 500_000_000_000;

/// Default max priority fee per gas: 1 gwei
pub const DEFAULT_MAX_PRIORITY_FEE_PER_GAS: u128 = 1_000_000_000;

/// An unsigned EIP-1559 transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip1559Transaction {
    /// Chain id committed into the signature
    pub chain_id: u64,
    /// Sender nonce
    pub nonce: u64,
    /// Priority fee cap
    pub max_priority_fee_per_gas: u128,
    /// Total fee cap
    pub max_fee_per_gas: u128,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient (None for contract creation)
    pub to: Option<Address>,
    /// Value to transfer
    pub value: U256,
    /// Calldata
    pub data: Bytes,
}

impl Eip1559Transaction {
    /// RLP of the nine unsigned fields (without the type byte)
    fn rlp_unsigned(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(9);
        self.append_base_fields(&mut s);
        s.out().to_vec()
    }

    fn append_base_fields(&self, s: &mut RlpStream) {
        s.append(&self.chain_id);
        s.append(&self.nonce);
        s.append(&self.max_priority_fee_per_gas);
        s.append(&self.max_fee_per_gas);
        s.append(&self.gas_limit);
        match &self.to {
            Some(addr) => s.append(&addr.as_bytes().as_slice()),
            None => s.append_empty_data(),
        };
        s.append(&self.value);
        s.append(&self.data.as_ref());
        s.begin_list(0); // access list
    }

    /// The digest the sender signs: keccak(0x02 ‖ rlp(9 fields))
    pub fn signing_hash(&self) -> H256 {
        let mut preimage = vec![TX_TYPE];
        preimage.extend(self.rlp_unsigned());
        keccak256(&preimage)
    }

    /// The signed wire form: 0x02 ‖ rlp(12 fields)
    pub fn encode_signed(&self, signature: &Signature) -> Vec<u8> {
        let mut s = RlpStream::new_list(12);
        self.append_base_fields(&mut s);
        s.append(&signature.y_parity());
        s.append(&U256::from_big_endian(&signature.r));
        s.append(&U256::from_big_endian(&signature.s));

        let mut out = vec![TX_TYPE];
        out.extend(s.out());
        out
    }
}

/// Optional overrides for building a staking transaction
///
/// Unset fields take the staking defaults: zero value, 1M gas, 500 gwei
/// max fee, 1 gwei priority fee.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Value to attach (delegate stakes via value)
    pub value: Option<U256>,
    /// Gas limit override
    pub gas_limit: Option<u64>,
    /// Max fee per gas override
    pub max_fee_per_gas: Option<u128>,
    /// Max priority fee per gas override
    pub max_priority_fee_per_gas: Option<u128>,
}

/// Fluent builder for [`Eip1559Transaction`]
///
/// chain_id, nonce, and to must be set; fee fields fall back to the
/// staking defaults.
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    chain_id: Option<u64>,
    nonce: Option<u64>,
    max_priority_fee_per_gas: Option<u128>,
    max_fee_per_gas: Option<u128>,
    gas_limit: Option<u64>,
    to: Option<Address>,
    value: Option<U256>,
    data: Option<Bytes>,
}

impl TxBuilder {
    /// Start an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain id
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Set the sender nonce
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the priority fee cap
    pub fn max_priority_fee_per_gas(mut self, fee: u128) -> Self {
        self.max_priority_fee_per_gas = Some(fee);
        self
    }

    /// Set the total fee cap
    pub fn max_fee_per_gas(mut self, fee: u128) -> Self {
        self.max_fee_per_gas = Some(fee);
        self
    }

    /// Set the gas limit
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the recipient
    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Set the value
    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the calldata
    pub fn data(mut self, data: Bytes) -> Self {
        self.data = Some(data);
        self
    }

    /// Apply unset-field overrides in one step
    pub fn options(mut self, options: &TxOptions) -> Self {
        if let Some(value) = options.value {
            self.value = Some(value);
        }
        if let Some(gas_limit) = options.gas_limit {
            self.gas_limit = Some(gas_limit);
        }
        if let Some(fee) = options.max_fee_per_gas {
            self.max_fee_per_gas = Some(fee);
        }
        if let Some(fee) = options.max_priority_fee_per_gas {
            self.max_priority_fee_per_gas = Some(fee);
        }
        self
    }

    /// Build the transaction, defaulting fee fields and value
    pub fn build(self) -> Result<Eip1559Transaction, StakingError> {
        Ok(Eip1559Transaction {
            chain_id: self.chain_id.ok_or(StakingError::MissingField("chain_id"))?,
            nonce: self.nonce.ok_or(StakingError::MissingField("nonce"))?,
            max_priority_fee_per_gas: self
                .max_priority_fee_per_gas
                .unwrap_or(DEFAULT_MAX_PRIORITY_FEE_PER_GAS),
            max_fee_per_gas: self.max_fee_per_gas.unwrap_or(DEFAULT_MAX_FEE_PER_GAS),
            gas_limit: self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT),
            to: self.to,
            value: self.value.unwrap_or_default(),
            data: self.data.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Eip1559Transaction {
        TxBuilder::new()
            .chain_id(1)
            .nonce(0)
            .to(Address::from_hex("0x0000000000000000000000000000000000001000").unwrap())
            .data(Bytes::from(vec![0x84, 0x99, 0x4f, 0xec]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let tx = sample_tx();
        assert_eq!(tx.gas_limit, DEFAULT_GAS_LIMIT);
        assert_eq!(tx.max_fee_per_gas, DEFAULT_MAX_FEE_PER_GAS);
        assert_eq!(tx.max_priority_fee_per_gas, DEFAULT_MAX_PRIORITY_FEE_PER_GAS);
        assert_eq!(tx.value, U256::zero());
    }

    #[test]
    fn test_builder_missing_chain_id() {
        let result = TxBuilder::new().nonce(0).build();
        assert!(matches!(
            result,
            Err(StakingError::MissingField("chain_id"))
        ));
    }

    #[test]
    fn test_builder_options_override() {
        let options = TxOptions {
            value: Some(U256::from(7u64)),
            gas_limit: Some(50_000),
            ..Default::default()
        };
        let tx = TxBuilder::new()
            .chain_id(1)
            .nonce(3)
            .options(&options)
            .build()
            .unwrap();
        assert_eq!(tx.value, U256::from(7u64));
        assert_eq!(tx.gas_limit, 50_000);
        assert_eq!(tx.max_fee_per_gas, DEFAULT_MAX_FEE_PER_GAS);
    }

    #[test]
    fn test_signing_hash_starts_with_type_byte() {
        let tx = sample_tx();
        let mut preimage = vec![TX_TYPE];
        preimage.extend(tx.rlp_unsigned());
        assert_eq!(tx.signing_hash(), keccak256(&preimage));
    }

    #[test]
    fn test_signing_hash_commits_all_fields() {
        let base = sample_tx();

        let mut changed = base.clone();
        changed.nonce = 1;
        assert_ne!(base.signing_hash(), changed.signing_hash());

        let mut changed = base.clone();
        changed.chain_id = 2;
        assert_ne!(base.signing_hash(), changed.signing_hash());

        let mut changed = base.clone();
        changed.value = U256::from(1u64);
        assert_ne!(base.signing_hash(), changed.signing_hash());

        let mut changed = base.clone();
        changed.data = Bytes::from(vec![0x00]);
        assert_ne!(base.signing_hash(), changed.signing_hash());
    }

    #[test]
    fn test_encode_signed_shape() {
        let tx = sample_tx();
        let signature = Signature {
            r: [0x11; 32],
            s: [0x22; 32],
            v: 1,
        };

        let encoded = tx.encode_signed(&signature);
        assert_eq!(encoded[0], TX_TYPE);

        // Signed payload is the unsigned one plus the signature fields
        let unsigned_len = tx.rlp_unsigned().len();
        assert!(encoded.len() > unsigned_len);

        let rlp = rlp::Rlp::new(&encoded[1..]);
        assert_eq!(rlp.item_count().unwrap(), 12);
        assert_eq!(rlp.val_at::<u64>(0).unwrap(), 1); // chain_id
        assert_eq!(rlp.val_at::<u8>(9).unwrap(), 1); // y_parity
        assert_eq!(rlp.val_at::<U256>(10).unwrap(), U256::from_big_endian(&[0x11; 32]));
    }

    #[test]
    fn test_encode_signed_minimal_r_s() {
        // Leading zeros in r/s must not be carried into the RLP
        let tx = sample_tx();
        let mut r = [0u8; 32];
        r[31] = 0x05;
        let signature = Signature {
            r,
            s: [0u8; 32],
            v: 0,
        };

        let encoded = tx.encode_signed(&signature);
        let rlp = rlp::Rlp::new(&encoded[1..]);
        assert_eq!(rlp.val_at::<U256>(10).unwrap(), U256::from(5u64));
        assert_eq!(rlp.val_at::<U256>(11).unwrap(), U256::zero());
    }

    #[test]
    fn test_contract_creation_empty_to() {
        let tx = TxBuilder::new()
            .chain_id(1)
            .nonce(0)
            .data(Bytes::from(vec![0x60, 0x00]))
            .build()
            .unwrap();
        assert!(tx.to.is_none());

        let rlp_bytes = tx.rlp_unsigned();
        let rlp = rlp::Rlp::new(&rlp_bytes);
        assert!(rlp.at(5).unwrap().is_empty());
    }
}

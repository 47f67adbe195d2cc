//! SDK types
//!
//! RPC request/response shapes plus typed views over decoded contract
//! return data. The views name the positional tuple fields the contract
//! returns, so callers never index into raw token vectors.

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use staking_primitives::{Address, H256, U256};

use crate::abi::Token;
use crate::StakingError;

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
    /// Finalized block
    Finalized,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
            BlockId::Finalized => serializer.serialize_str("finalized"),
        }
    }
}

/// Call request for eth_call
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    /// Sender address
    pub from: Option<Address>,
    /// Recipient contract
    pub to: Option<Address>,
    /// Value to transfer
    pub value: Option<U256>,
    /// Input data
    pub data: Option<Bytes>,
}

impl Serialize for CallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [
            self.from.is_some(),
            self.to.is_some(),
            self.value.is_some(),
            self.data.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", &from.to_hex())?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", &to.to_hex())?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", &u256_to_hex(value))?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", &format!("0x{}", hex::encode(data)))?;
        }

        map.end()
    }
}

/// Pending transaction handle
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    /// Transaction hash
    pub hash: H256,
}

impl PendingTransaction {
    /// Create a new pending transaction
    pub fn new(hash: H256) -> Self {
        Self { hash }
    }

    /// Get the transaction hash
    pub fn hash(&self) -> &H256 {
        &self.hash
    }
}

/// Transaction receipt
#[derive(Debug, Clone)]
pub struct TransactionReceipt {
    /// Transaction hash
    pub transaction_hash: H256,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Gas consumed
    pub gas_used: u64,
    /// Execution status (true = success)
    pub status: bool,
    /// Event logs emitted by the transaction, as raw JSON objects
    pub logs: Vec<Value>,
}

impl TransactionReceipt {
    /// Parse a receipt from an eth_getTransactionReceipt response object
    pub fn from_json(value: &Value) -> Result<Self, StakingError> {
        let obj = value
            .as_object()
            .ok_or_else(|| StakingError::Serialization("receipt is not an object".to_string()))?;

        let hash_str = obj
            .get("transactionHash")
            .and_then(Value::as_str)
            .ok_or(StakingError::MissingField("transactionHash"))?;
        let transaction_hash = H256::from_hex(hash_str)
            .map_err(|e| StakingError::Serialization(e.to_string()))?;

        let logs = obj
            .get("logs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            transaction_hash,
            block_number: parse_hex_field(obj, "blockNumber")?,
            gas_used: parse_hex_field(obj, "gasUsed")?,
            status: parse_hex_field(obj, "status")? == 1,
            logs,
        })
    }
}

fn parse_hex_field(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<u64, StakingError> {
    let s = obj
        .get(field)
        .and_then(Value::as_str)
        .ok_or(StakingError::MissingField(field))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16)
        .map_err(|e| StakingError::Serialization(format!("{}: {}", field, e)))
}

/// Format a U256 as minimal 0x-prefixed hex
pub fn u256_to_hex(value: &U256) -> String {
    format!("0x{:x}", value)
}

/// Current epoch and delay-period flag, from get_epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochInfo {
    /// Current epoch number
    pub epoch: u64,
    /// True while the epoch is in its change-delay period
    pub in_epoch_delay_period: bool,
}

impl EpochInfo {
    /// Build from decoded get_epoch output
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, StakingError> {
        let mut reader = TokenReader::new(tokens, "get_epoch");
        Ok(Self {
            epoch: reader.u64()?,
            in_epoch_delay_period: reader.bool()?,
        })
    }
}

/// Full validator record, from get_validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo {
    /// Address authorized to manage the validator
    pub auth_address: Address,
    /// Packed status flags
    pub flags: U256,
    /// Active stake in the execution view
    pub stake: U256,
    /// Reward accumulator per staked token
    pub accumulated_reward_per_token: U256,
    /// Commission rate in the execution view (1e18-scaled)
    pub commission: U256,
    /// Rewards accrued but not yet claimed
    pub unclaimed_rewards: U256,
    /// Stake in the consensus view
    pub consensus_stake: U256,
    /// Commission in the consensus view
    pub consensus_commission: U256,
    /// Stake in the snapshot view
    pub snapshot_stake: U256,
    /// Commission in the snapshot view
    pub snapshot_commission: U256,
    /// Compressed secp256k1 public key (33 bytes)
    pub secp_pubkey: Vec<u8>,
    /// Compressed BLS public key (48 bytes)
    pub bls_pubkey: Vec<u8>,
}

impl ValidatorInfo {
    /// Build from decoded get_validator output
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, StakingError> {
        let mut reader = TokenReader::new(tokens, "get_validator");
        Ok(Self {
            auth_address: reader.address()?,
            flags: reader.uint()?,
            stake: reader.uint()?,
            accumulated_reward_per_token: reader.uint()?,
            commission: reader.uint()?,
            unclaimed_rewards: reader.uint()?,
            consensus_stake: reader.uint()?,
            consensus_commission: reader.uint()?,
            snapshot_stake: reader.uint()?,
            snapshot_commission: reader.uint()?,
            secp_pubkey: reader.bytes()?,
            bls_pubkey: reader.bytes()?,
        })
    }

    /// Whether this validator id is registered
    ///
    /// The contract returns a zeroed record for unknown ids; an all-zero
    /// secp key marks an empty slot.
    pub fn exists(&self) -> bool {
        self.secp_pubkey.iter().any(|b| *b != 0)
    }
}

/// Delegator record under one validator, from get_delegator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatorInfo {
    /// Active stake
    pub stake: U256,
    /// Reward accumulator per staked token at last settlement
    pub accumulated_reward_per_token: U256,
    /// Lifetime rewards
    pub total_rewards: U256,
    /// Stake change taking effect next epoch boundary
    pub delta_stake: U256,
    /// Stake change queued behind delta_stake
    pub next_delta_stake: U256,
    /// Epoch at which delta_stake activates
    pub delta_epoch: u64,
    /// Epoch at which next_delta_stake activates
    pub next_delta_epoch: u64,
}

impl DelegatorInfo {
    /// Build from decoded get_delegator output
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, StakingError> {
        let mut reader = TokenReader::new(tokens, "get_delegator");
        Ok(Self {
            stake: reader.uint()?,
            accumulated_reward_per_token: reader.uint()?,
            total_rewards: reader.uint()?,
            delta_stake: reader.uint()?,
            next_delta_stake: reader.uint()?,
            delta_epoch: reader.u64()?,
            next_delta_epoch: reader.u64()?,
        })
    }
}

/// Withdrawal request slot, from get_withdrawal_request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// Amount being withdrawn
    pub amount: U256,
    /// Reward accumulator snapshot at request time
    pub accumulated_reward_per_token: U256,
    /// Epoch the request was made in
    pub epoch: u64,
}

impl WithdrawalRequest {
    /// Build from decoded get_withdrawal_request output
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, StakingError> {
        let mut reader = TokenReader::new(tokens, "get_withdrawal_request");
        Ok(Self {
            amount: reader.uint()?,
            accumulated_reward_per_token: reader.uint()?,
            epoch: reader.u64()?,
        })
    }
}

/// Positional reader over a decoded token vector
struct TokenReader {
    tokens: std::vec::IntoIter<Token>,
    operation: &'static str,
    index: usize,
}

impl TokenReader {
    fn new(tokens: Vec<Token>, operation: &'static str) -> Self {
        Self {
            tokens: tokens.into_iter(),
            operation,
            index: 0,
        }
    }

    fn next(&mut self) -> Result<Token, StakingError> {
        let token = self.tokens.next().ok_or_else(|| {
            StakingError::Decode(format!(
                "{}: missing field at position {}",
                self.operation, self.index
            ))
        })?;
        self.index += 1;
        Ok(token)
    }

    fn mismatch(&self, expected: &str, got: &Token) -> StakingError {
        StakingError::Decode(format!(
            "{}: expected {} at position {}, got {:?}",
            self.operation,
            expected,
            self.index - 1,
            got
        ))
    }

    fn uint(&mut self) -> Result<U256, StakingError> {
        let token = self.next()?;
        token.as_uint().ok_or_else(|| self.mismatch("uint", &token))
    }

    fn u64(&mut self) -> Result<u64, StakingError> {
        let token = self.next()?;
        token.as_u64().ok_or_else(|| self.mismatch("uint64", &token))
    }

    fn bool(&mut self) -> Result<bool, StakingError> {
        let token = self.next()?;
        token.as_bool().ok_or_else(|| self.mismatch("bool", &token))
    }

    fn address(&mut self) -> Result<Address, StakingError> {
        let token = self.next()?;
        token
            .as_address()
            .ok_or_else(|| self.mismatch("address", &token))
    }

    fn bytes(&mut self) -> Result<Vec<u8>, StakingError> {
        let token = self.next()?;
        match token {
            Token::Bytes(b) | Token::FixedBytes(b) => Ok(b),
            other => Err(self.mismatch("bytes", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(
            serde_json::to_string(&BlockId::Latest).unwrap(),
            "\"latest\""
        );
        assert_eq!(
            serde_json::to_string(&BlockId::Number(100)).unwrap(),
            "\"0x64\""
        );
        assert_eq!(
            serde_json::to_string(&BlockId::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_call_request_serialize() {
        let req = CallRequest {
            to: Some(Address::ZERO),
            data: Some(Bytes::from(vec![0x01, 0x02])),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json.get("data").unwrap(), "0x0102");
        assert!(json.get("to").is_some());
        assert!(json.get("from").is_none()); // None fields skipped
    }

    #[test]
    fn test_call_request_serialize_with_value() {
        let req = CallRequest {
            to: Some(Address::ZERO),
            value: Some(U256::from(1000u64)),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json.get("value").unwrap(), "0x3e8");
    }

    #[test]
    fn test_u256_to_hex_zero() {
        assert_eq!(u256_to_hex(&U256::zero()), "0x0");
    }

    #[test]
    fn test_receipt_from_json() {
        let value = serde_json::json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": "0x1",
        });

        let receipt = TransactionReceipt::from_json(&value).unwrap();
        assert_eq!(receipt.block_number, 16);
        assert_eq!(receipt.gas_used, 21_000);
        assert!(receipt.status);
        assert!(receipt.logs.is_empty());
    }

    #[test]
    fn test_receipt_carries_logs() {
        let value = serde_json::json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": "0x1",
            "logs": [{
                "address": "0x0000000000000000000000000000000000001000",
                "topics": ["0x0000000000000000000000000000000000000000000000000000000000000001"],
                "data": "0x",
            }],
        });

        let receipt = TransactionReceipt::from_json(&value).unwrap();
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(
            receipt.logs[0].get("address").and_then(Value::as_str),
            Some("0x0000000000000000000000000000000000001000")
        );
    }

    #[test]
    fn test_receipt_missing_field() {
        let value = serde_json::json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
        });
        let result = TransactionReceipt::from_json(&value);
        assert!(matches!(
            result,
            Err(StakingError::MissingField("blockNumber"))
        ));
    }

    #[test]
    fn test_epoch_info_from_tokens() {
        let info =
            EpochInfo::from_tokens(vec![Token::uint64(42), Token::Bool(true)]).unwrap();
        assert_eq!(info.epoch, 42);
        assert!(info.in_epoch_delay_period);
    }

    #[test]
    fn test_epoch_info_wrong_shape() {
        let result = EpochInfo::from_tokens(vec![Token::uint64(42)]);
        assert!(matches!(result, Err(StakingError::Decode(_))));
    }

    #[test]
    fn test_validator_info_from_tokens() {
        let mut tokens = vec![Token::Address(Address::ZERO)];
        tokens.extend((1..=9).map(|i| Token::Uint(U256::from(i as u64))));
        tokens.push(Token::Bytes(vec![0x02; 33]));
        tokens.push(Token::Bytes(vec![0xb0; 48]));

        let info = ValidatorInfo::from_tokens(tokens).unwrap();
        assert_eq!(info.flags, U256::from(1u64));
        assert_eq!(info.stake, U256::from(2u64));
        assert_eq!(info.snapshot_commission, U256::from(9u64));
        assert!(info.exists());
    }

    #[test]
    fn test_validator_info_zeroed_slot() {
        let mut tokens = vec![Token::Address(Address::ZERO)];
        tokens.extend((0..9).map(|_| Token::Uint(U256::zero())));
        tokens.push(Token::Bytes(vec![0u8; 33]));
        tokens.push(Token::Bytes(vec![0u8; 48]));

        let info = ValidatorInfo::from_tokens(tokens).unwrap();
        assert!(!info.exists());
    }

    #[test]
    fn test_withdrawal_request_from_tokens() {
        let req = WithdrawalRequest::from_tokens(vec![
            Token::Uint(U256::from(500u64)),
            Token::Uint(U256::from(12u64)),
            Token::uint64(9),
        ])
        .unwrap();
        assert_eq!(req.amount, U256::from(500u64));
        assert_eq!(req.epoch, 9);
    }
}

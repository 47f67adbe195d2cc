//! StakingClient - RPC client for the staking contract

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use staking_primitives::{Address, H256, U256};
use tracing::debug;

use crate::abi::Token;
use crate::registry::{Operation, STAKING_CONTRACT};
use crate::signer::Signer;
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::tx::{TxBuilder, TxOptions};
use crate::types::{
    BlockId, CallRequest, DelegatorInfo, EpochInfo, PendingTransaction, TransactionReceipt,
    ValidatorInfo, WithdrawalRequest,
};
use crate::StakingError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for querying and transacting with the staking contract
pub struct StakingClient {
    transport: Box<dyn Transport>,
    contract: Address,
    chain_id: Option<u64>,
}

impl StakingClient {
    /// Create a new client with HTTP transport, fetching and caching the
    /// chain id
    #[cfg(feature = "http")]
    pub async fn connect(url: &str) -> Result<Self, StakingError> {
        let transport = HttpTransport::new(url);
        let mut client = Self {
            transport: Box::new(transport),
            contract: STAKING_CONTRACT,
            chain_id: None,
        };

        let chain_id = client.fetch_chain_id().await?;
        client.chain_id = Some(chain_id);

        Ok(client)
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self {
            transport: Box::new(MockTransport::new()),
            contract: STAKING_CONTRACT,
            chain_id: Some(1),
        }
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            contract: STAKING_CONTRACT,
            chain_id: None,
        }
    }

    /// Override the contract address (non-default deployments)
    pub fn with_contract(mut self, contract: Address) -> Self {
        self.contract = contract;
        self
    }

    /// The contract address this client talks to
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Helper to make an RPC request and deserialize the result
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, StakingError> {
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get the chain id (cached after the first fetch on connect)
    pub async fn chain_id(&self) -> Result<u64, StakingError> {
        if let Some(id) = self.chain_id {
            return Ok(id);
        }
        self.fetch_chain_id().await
    }

    async fn fetch_chain_id(&self) -> Result<u64, StakingError> {
        let result: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the nonce (transaction count) of an address
    pub async fn get_nonce(&self, address: &Address, block: BlockId) -> Result<u64, StakingError> {
        let result: String = self
            .request(
                "eth_getTransactionCount",
                vec![
                    Value::String(address.to_hex()),
                    serde_json::to_value(block)?,
                ],
            )
            .await?;
        parse_hex_u64(&result)
    }

    // ==================== Contract Calls ====================

    /// Execute a read-only call against the contract with raw calldata
    pub async fn call_raw(&self, data: Bytes) -> Result<Bytes, StakingError> {
        let request = CallRequest {
            to: Some(self.contract),
            data: Some(data),
            ..Default::default()
        };
        let result: String = self
            .request(
                "eth_call",
                vec![
                    serde_json::to_value(&request)?,
                    serde_json::to_value(BlockId::Latest)?,
                ],
            )
            .await?;
        parse_hex_bytes(&result)
    }

    /// Call an operation and decode the return data against its schema
    pub async fn call(&self, op: Operation, args: &[Token]) -> Result<Vec<Token>, StakingError> {
        debug!(operation = op.name(), "contract call");
        let data = op.encode_call(args)?;
        let raw = self.call_raw(data).await?;
        op.decode_output(&raw)
    }

    // ==================== Typed Getters ====================

    /// Current epoch and delay-period flag
    pub async fn epoch(&self) -> Result<EpochInfo, StakingError> {
        let tokens = self.call(Operation::GetEpoch, &[]).await?;
        EpochInfo::from_tokens(tokens)
    }

    /// Full validator record for an id
    pub async fn validator(&self, validator_id: u64) -> Result<ValidatorInfo, StakingError> {
        let tokens = self
            .call(Operation::GetValidator, &[Token::uint64(validator_id)])
            .await?;
        ValidatorInfo::from_tokens(tokens)
    }

    /// Delegator record under one validator
    pub async fn delegator(
        &self,
        validator_id: u64,
        delegator: Address,
    ) -> Result<DelegatorInfo, StakingError> {
        let tokens = self
            .call(
                Operation::GetDelegator,
                &[Token::uint64(validator_id), Token::Address(delegator)],
            )
            .await?;
        DelegatorInfo::from_tokens(tokens)
    }

    /// A delegator's withdrawal request slot
    pub async fn withdrawal_request(
        &self,
        validator_id: u64,
        delegator: Address,
        withdrawal_id: u8,
    ) -> Result<WithdrawalRequest, StakingError> {
        let tokens = self
            .call(
                Operation::GetWithdrawalRequest,
                &[
                    Token::uint64(validator_id),
                    Token::Address(delegator),
                    Token::uint8(withdrawal_id),
                ],
            )
            .await?;
        WithdrawalRequest::from_tokens(tokens)
    }

    /// Validator id of the current proposer
    pub async fn proposer_val_id(&self) -> Result<u64, StakingError> {
        let tokens = self.call(Operation::GetProposerValId, &[]).await?;
        tokens
            .first()
            .and_then(Token::as_u64)
            .ok_or_else(|| StakingError::Decode("get_proposer_val_id: bad shape".to_string()))
    }

    // ==================== Transaction Submission ====================

    /// Send a raw signed transaction
    pub async fn send_raw_transaction(
        &self,
        tx: &[u8],
    ) -> Result<PendingTransaction, StakingError> {
        let hex = format!("0x{}", hex::encode(tx));
        let result: String = self
            .request("eth_sendRawTransaction", vec![Value::String(hex)])
            .await?;

        let hash =
            H256::from_hex(&result).map_err(|e| StakingError::InvalidHex(e.to_string()))?;
        Ok(PendingTransaction::new(hash))
    }

    /// Build, sign, and submit a staking transaction
    ///
    /// Fetches the pending nonce for the signer, applies the fee defaults
    /// (overridable via `options`), signs, and broadcasts. The nonce is
    /// fetched fresh on every call; concurrent submissions from one sender
    /// must be serialized by the caller.
    pub async fn submit(
        &self,
        signer: &dyn Signer,
        data: Bytes,
        options: &TxOptions,
    ) -> Result<PendingTransaction, StakingError> {
        let chain_id = self.chain_id().await?;
        let nonce = self.get_nonce(&signer.address(), BlockId::Pending).await?;

        let tx = TxBuilder::new()
            .chain_id(chain_id)
            .nonce(nonce)
            .to(self.contract)
            .data(data)
            .options(options)
            .build()?;

        debug!(chain_id, nonce, "submitting staking transaction");

        let signed = signer.sign_transaction(&tx).await?;
        self.send_raw_transaction(&signed).await
    }

    /// Delegate `amount` to a validator (stake travels as tx value)
    pub async fn delegate(
        &self,
        signer: &dyn Signer,
        validator_id: u64,
        amount: U256,
    ) -> Result<PendingTransaction, StakingError> {
        let data = crate::calldata::delegate(validator_id)?;
        let options = TxOptions {
            value: Some(amount),
            ..Default::default()
        };
        self.submit(signer, data, &options).await
    }

    // ==================== Receipts ====================

    /// Get a transaction receipt, if the transaction is mined
    pub async fn get_receipt(
        &self,
        hash: &H256,
    ) -> Result<Option<TransactionReceipt>, StakingError> {
        let result: Option<Value> = self
            .request(
                "eth_getTransactionReceipt",
                vec![Value::String(hash.to_hex())],
            )
            .await?;

        match result {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(TransactionReceipt::from_json(&value)?)),
        }
    }

    /// Poll for a receipt until the transaction is mined or `timeout`
    /// elapses
    pub async fn wait_for_receipt(
        &self,
        hash: &H256,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<TransactionReceipt, StakingError> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if let Some(receipt) = self.get_receipt(hash).await? {
                return Ok(receipt);
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(StakingError::Submission(format!(
                    "timed out waiting for receipt of {}",
                    hash.to_hex()
                )));
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }
}

// ==================== Helper Functions ====================

fn parse_hex_u64(s: &str) -> Result<u64, StakingError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| StakingError::InvalidHex(e.to_string()))
}

fn parse_hex_bytes(s: &str) -> Result<Bytes, StakingError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(Bytes::new());
    }
    let bytes = hex::decode(s)?;
    Ok(Bytes::from(bytes))
}

/// Shared transports delegate through the Arc
#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, StakingError> {
        (**self).request_json(method, params).await
    }
}

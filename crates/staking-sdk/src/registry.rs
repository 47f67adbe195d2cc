//! Function registry for the staking contract
//!
//! Every contract operation is an enum variant resolved at compile time to
//! its fixed 4-byte selector and argument/return type schemas. The
//! selectors and schemas are the wire contract with the chain: any
//! mismatch silently corrupts values or fails decoding, so they must track
//! the deployed interface exactly.

use bytes::Bytes;
use staking_primitives::Address;

use crate::abi::{self, ParamType, Token};
use crate::StakingError;

/// The staking contract's fixed deployment address
pub const STAKING_CONTRACT: Address = Address::from_bytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00,
]);

/// A staking contract operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Register a new validator (composite payload + dual signatures)
    AddValidator,
    /// Delegate the attached value to a validator
    Delegate,
    /// Start undelegating stake into a withdrawal request slot
    Undelegate,
    /// Re-delegate accumulated rewards
    Compound,
    /// Withdraw a matured withdrawal request
    Withdraw,
    /// Claim accumulated rewards
    ClaimRewards,
    /// Change a validator's commission rate
    ChangeCommission,
    /// Current epoch and delay-period flag
    GetEpoch,
    /// Full validator record
    GetValidator,
    /// Delegator record under one validator
    GetDelegator,
    /// A delegator's withdrawal request slot
    GetWithdrawalRequest,
    /// Validator id of the current proposer
    GetProposerValId,
    /// Consensus validator set (paginated)
    GetConsensusValset,
    /// Snapshot validator set (paginated)
    GetSnapshotValset,
    /// Execution validator set (paginated)
    GetExecutionValset,
    /// Validator ids a delegator has delegations with (paginated)
    GetDelegations,
    /// Delegator addresses of a validator (paginated)
    GetDelegators,
}

impl Operation {
    /// All registered operations
    pub const ALL: [Operation; 17] = [
        Operation::AddValidator,
        Operation::Delegate,
        Operation::Undelegate,
        Operation::Compound,
        Operation::Withdraw,
        Operation::ClaimRewards,
        Operation::ChangeCommission,
        Operation::GetEpoch,
        Operation::GetValidator,
        Operation::GetDelegator,
        Operation::GetWithdrawalRequest,
        Operation::GetProposerValId,
        Operation::GetConsensusValset,
        Operation::GetSnapshotValset,
        Operation::GetExecutionValset,
        Operation::GetDelegations,
        Operation::GetDelegators,
    ];

    /// The operation's fixed 4-byte selector
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Operation::AddValidator => [0xf1, 0x45, 0x20, 0x4c],
            Operation::Delegate => [0x84, 0x99, 0x4f, 0xec],
            Operation::Undelegate => [0x5c, 0xf4, 0x15, 0x14],
            Operation::Compound => [0xb3, 0x4f, 0xea, 0x67],
            Operation::Withdraw => [0xae, 0xd2, 0xee, 0x73],
            Operation::ClaimRewards => [0xa7, 0x6e, 0x2c, 0xa5],
            Operation::ChangeCommission => [0x9b, 0xdc, 0xc3, 0xc8],
            Operation::GetEpoch => [0x75, 0x79, 0x91, 0xa8],
            Operation::GetValidator => [0x2b, 0x6d, 0x63, 0x9a],
            Operation::GetDelegator => [0x57, 0x3c, 0x1c, 0xe0],
            Operation::GetWithdrawalRequest => [0x56, 0xfa, 0x20, 0x45],
            Operation::GetProposerValId => [0xfb, 0xac, 0xb0, 0xbe],
            Operation::GetConsensusValset => [0xfb, 0x29, 0xb7, 0x29],
            Operation::GetSnapshotValset => [0xde, 0x66, 0xa3, 0x68],
            Operation::GetExecutionValset => [0x7c, 0xb0, 0x74, 0xdf],
            Operation::GetDelegations => [0x4f, 0xd6, 0x60, 0x50],
            Operation::GetDelegators => [0xa0, 0x84, 0x3a, 0x26],
        }
    }

    /// Human-readable operation name
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::AddValidator => "add_validator",
            Operation::Delegate => "delegate",
            Operation::Undelegate => "undelegate",
            Operation::Compound => "compound",
            Operation::Withdraw => "withdraw",
            Operation::ClaimRewards => "claim_rewards",
            Operation::ChangeCommission => "change_commission",
            Operation::GetEpoch => "get_epoch",
            Operation::GetValidator => "get_validator",
            Operation::GetDelegator => "get_delegator",
            Operation::GetWithdrawalRequest => "get_withdrawal_request",
            Operation::GetProposerValId => "get_proposer_val_id",
            Operation::GetConsensusValset => "get_consensus_valset",
            Operation::GetSnapshotValset => "get_snapshot_valset",
            Operation::GetExecutionValset => "get_execution_valset",
            Operation::GetDelegations => "get_delegations",
            Operation::GetDelegators => "get_delegators",
        }
    }

    /// Look up an operation by name
    pub fn from_name(name: &str) -> Result<Self, StakingError> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| StakingError::UnknownOperation(name.to_string()))
    }

    /// Look up an operation by selector
    pub fn from_selector(selector: [u8; 4]) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.selector() == selector)
    }

    /// Registered input schema
    pub fn inputs(&self) -> Vec<ParamType> {
        use ParamType::*;
        match self {
            Operation::AddValidator => vec![Bytes, Bytes, Bytes],
            Operation::Delegate => vec![Uint(64)],
            Operation::Undelegate => vec![Uint(64), Uint(256), Uint(8)],
            Operation::Compound => vec![Uint(64)],
            Operation::Withdraw => vec![Uint(64), Uint(8)],
            Operation::ClaimRewards => vec![Uint(64)],
            Operation::ChangeCommission => vec![Uint(64), Uint(256)],
            Operation::GetEpoch => vec![],
            Operation::GetValidator => vec![Uint(64)],
            Operation::GetDelegator => vec![Uint(64), Address],
            Operation::GetWithdrawalRequest => vec![Uint(64), Address, Uint(8)],
            Operation::GetProposerValId => vec![],
            Operation::GetConsensusValset => vec![Uint(64)],
            Operation::GetSnapshotValset => vec![Uint(64)],
            Operation::GetExecutionValset => vec![Uint(64)],
            Operation::GetDelegations => vec![Address, Uint(64)],
            Operation::GetDelegators => vec![Uint(64), Address],
        }
    }

    /// Registered output schema, if the return shape is modeled
    ///
    /// State-mutating operations return nothing decodable; their callers
    /// get a transaction hash instead.
    pub fn outputs(&self) -> Option<Vec<ParamType>> {
        use ParamType::*;
        match self {
            Operation::AddValidator
            | Operation::Delegate
            | Operation::Undelegate
            | Operation::Compound
            | Operation::Withdraw
            | Operation::ClaimRewards
            | Operation::ChangeCommission => None,
            Operation::GetEpoch => Some(vec![Uint(64), Bool]),
            Operation::GetValidator => Some(vec![
                Address,
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Bytes,
                Bytes,
            ]),
            Operation::GetDelegator => Some(vec![
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(256),
                Uint(64),
                Uint(64),
            ]),
            Operation::GetWithdrawalRequest => Some(vec![Uint(256), Uint(256), Uint(64)]),
            Operation::GetProposerValId => Some(vec![Uint(64)]),
            Operation::GetConsensusValset
            | Operation::GetSnapshotValset
            | Operation::GetExecutionValset => {
                Some(vec![Bool, Uint(64), Array(Box::new(Uint(64)))])
            }
            Operation::GetDelegations => Some(vec![Bool, Uint(64), Array(Box::new(Uint(64)))]),
            Operation::GetDelegators => Some(vec![Bool, Address, Array(Box::new(Address))]),
        }
    }

    /// Encode a call to this operation: selector followed by ABI-encoded
    /// arguments, validated against the registered schema
    pub fn encode_call(&self, args: &[Token]) -> Result<Bytes, StakingError> {
        let inputs = self.inputs();
        if args.len() != inputs.len() {
            return Err(StakingError::ArityMismatch {
                operation: self.name(),
                expected: inputs.len(),
                got: args.len(),
            });
        }

        let data = abi::encode_function_call(self.selector(), &inputs, args)?;
        Ok(Bytes::from(data))
    }

    /// Decode return data against the registered output schema
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, StakingError> {
        let outputs = self
            .outputs()
            .ok_or(StakingError::SchemaMissing(self.name()))?;
        abi::decode(&outputs, data)
    }
}

/// Render calldata as a 0x-prefixed lowercase hex string (the wire format)
pub fn calldata_to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

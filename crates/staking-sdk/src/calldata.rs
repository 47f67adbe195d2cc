//! Typed calldata builders
//!
//! One function per contract operation, taking native Rust arguments and
//! returning ready-to-send calldata. The registry owns selectors and
//! schemas; these builders only translate arguments into tokens, so a
//! type error here is a compile error rather than a runtime encode
//! failure.
//!
//! `add_validator` is the exception: its three `bytes` arguments are a
//! composite registration payload plus two signatures over it, built in
//! [`add_validator`].

use bytes::Bytes;
use staking_crypto::ValidatorKeys;
use staking_primitives::{Address, U256};

use crate::abi::Token;
use crate::registry::Operation;
use crate::StakingError;

/// Length of the registration payload in bytes:
/// secp pubkey (33) + BLS pubkey (48) + auth address (20) + amount (32)
/// + commission (32)
pub const REGISTRATION_PAYLOAD_LEN: usize = 165;

/// Build the `add_validator` registration calldata
///
/// The payload concatenates the compressed secp256k1 public key, the
/// compressed BLS public key, the auth address, and the big-endian stake
/// amount and commission. The secp key signs the BLAKE3 digest of the
/// payload (compact 64-byte form); the BLS key signs the raw payload.
/// The contract verifies both before admitting the validator.
pub fn add_validator(
    keys: &ValidatorKeys,
    auth_address: Address,
    amount: U256,
    commission: U256,
) -> Result<Bytes, StakingError> {
    let payload = registration_payload(keys, auth_address, amount, commission);

    let secp_sig = keys
        .sign_payload_secp(&payload)
        .map_err(|e| StakingError::Signing(e.to_string()))?;
    let bls_sig = keys.sign_payload_bls(&payload);

    Operation::AddValidator.encode_call(&[
        Token::Bytes(payload),
        Token::Bytes(secp_sig.to_vec()),
        Token::Bytes(bls_sig.to_bytes().to_vec()),
    ])
}

/// Build the raw 165-byte registration payload
pub fn registration_payload(
    keys: &ValidatorKeys,
    auth_address: Address,
    amount: U256,
    commission: U256,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(REGISTRATION_PAYLOAD_LEN);
    payload.extend_from_slice(&keys.secp_public_key());
    payload.extend_from_slice(&keys.bls_public_key().to_bytes());
    payload.extend_from_slice(auth_address.as_bytes());
    payload.extend_from_slice(&u256_word(amount));
    payload.extend_from_slice(&u256_word(commission));
    payload
}

/// Delegate the attached transaction value to a validator
pub fn delegate(validator_id: u64) -> Result<Bytes, StakingError> {
    Operation::Delegate.encode_call(&[Token::uint64(validator_id)])
}

/// Start undelegating `amount` into withdrawal slot `withdrawal_id`
pub fn undelegate(
    validator_id: u64,
    amount: U256,
    withdrawal_id: u8,
) -> Result<Bytes, StakingError> {
    Operation::Undelegate.encode_call(&[
        Token::uint64(validator_id),
        Token::Uint(amount),
        Token::uint8(withdrawal_id),
    ])
}

/// Re-delegate accumulated rewards with a validator
pub fn compound(validator_id: u64) -> Result<Bytes, StakingError> {
    Operation::Compound.encode_call(&[Token::uint64(validator_id)])
}

/// Withdraw a matured withdrawal request
pub fn withdraw(validator_id: u64, withdrawal_id: u8) -> Result<Bytes, StakingError> {
    Operation::Withdraw.encode_call(&[Token::uint64(validator_id), Token::uint8(withdrawal_id)])
}

/// Claim accumulated rewards from a validator
pub fn claim_rewards(validator_id: u64) -> Result<Bytes, StakingError> {
    Operation::ClaimRewards.encode_call(&[Token::uint64(validator_id)])
}

/// Change a validator's commission rate (1e18-scaled fraction)
pub fn change_commission(validator_id: u64, commission: U256) -> Result<Bytes, StakingError> {
    Operation::ChangeCommission
        .encode_call(&[Token::uint64(validator_id), Token::Uint(commission)])
}

/// Query the current epoch and delay-period flag
pub fn get_epoch() -> Result<Bytes, StakingError> {
    Operation::GetEpoch.encode_call(&[])
}

/// Query a validator record
pub fn get_validator(validator_id: u64) -> Result<Bytes, StakingError> {
    Operation::GetValidator.encode_call(&[Token::uint64(validator_id)])
}

/// Query a delegator's record under one validator
pub fn get_delegator(validator_id: u64, delegator: Address) -> Result<Bytes, StakingError> {
    Operation::GetDelegator
        .encode_call(&[Token::uint64(validator_id), Token::Address(delegator)])
}

/// Query a delegator's withdrawal request slot
pub fn get_withdrawal_request(
    validator_id: u64,
    delegator: Address,
    withdrawal_id: u8,
) -> Result<Bytes, StakingError> {
    Operation::GetWithdrawalRequest.encode_call(&[
        Token::uint64(validator_id),
        Token::Address(delegator),
        Token::uint8(withdrawal_id),
    ])
}

/// Query the validator id of the current proposer
pub fn get_proposer_val_id() -> Result<Bytes, StakingError> {
    Operation::GetProposerValId.encode_call(&[])
}

/// Query one page of the consensus validator set
pub fn get_consensus_valset(cursor: u64) -> Result<Bytes, StakingError> {
    Operation::GetConsensusValset.encode_call(&[Token::uint64(cursor)])
}

/// Query one page of the snapshot validator set
pub fn get_snapshot_valset(cursor: u64) -> Result<Bytes, StakingError> {
    Operation::GetSnapshotValset.encode_call(&[Token::uint64(cursor)])
}

/// Query one page of the execution validator set
pub fn get_execution_valset(cursor: u64) -> Result<Bytes, StakingError> {
    Operation::GetExecutionValset.encode_call(&[Token::uint64(cursor)])
}

/// Query one page of the validator ids a delegator has delegated to
pub fn get_delegations(delegator: Address, cursor: u64) -> Result<Bytes, StakingError> {
    Operation::GetDelegations
        .encode_call(&[Token::Address(delegator), Token::uint64(cursor)])
}

/// Query one page of a validator's delegator addresses
pub fn get_delegators(validator_id: u64, cursor: Address) -> Result<Bytes, StakingError> {
    Operation::GetDelegators
        .encode_call(&[Token::uint64(validator_id), Token::Address(cursor)])
}

fn u256_word(value: U256) -> [u8; 32] {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    buf
}

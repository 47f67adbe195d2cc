//! Calldata integration tests
//!
//! Known-vector checks for the typed builders and the composite
//! add_validator registration.

use staking_sdk::abi::ParamType;
use staking_sdk::calldata;
use staking_sdk::registry::{calldata_to_hex, Operation};
use staking_sdk::{Address, ValidatorKeys, U256};

const SECP_HEX: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const BLS_HEX: &str = "0x0000000000000000000000000000000000000000000000000000000000000037";

// ==================== Known Vectors ====================

#[test]
fn test_delegate_vector() {
    let data = calldata::delegate(7).unwrap();
    assert_eq!(
        calldata_to_hex(&data),
        "0x84994fec0000000000000000000000000000000000000000000000000000000000000007"
    );
}

#[test]
fn test_claim_rewards_vector() {
    let data = calldata::claim_rewards(1).unwrap();
    assert_eq!(
        calldata_to_hex(&data),
        "0xa76e2ca50000000000000000000000000000000000000000000000000000000000000001"
    );
}

#[test]
fn test_get_epoch_vector() {
    assert_eq!(calldata_to_hex(&calldata::get_epoch().unwrap()), "0x757991a8");
}

#[test]
fn test_change_commission_vector() {
    // 5% commission, 1e18-scaled: 0.05 * 1e18
    let commission = U256::from(50_000_000_000_000_000u64);
    let data = calldata::change_commission(2, commission).unwrap();

    assert_eq!(&data[..4], &[0x9b, 0xdc, 0xc3, 0xc8]);
    assert_eq!(U256::from_big_endian(&data[4..36]), U256::from(2u64));
    assert_eq!(U256::from_big_endian(&data[36..68]), commission);
}

#[test]
fn test_valset_getter_selectors() {
    assert_eq!(
        &calldata::get_consensus_valset(0).unwrap()[..4],
        &[0xfb, 0x29, 0xb7, 0x29]
    );
    assert_eq!(
        &calldata::get_snapshot_valset(0).unwrap()[..4],
        &[0xde, 0x66, 0xa3, 0x68]
    );
    assert_eq!(
        &calldata::get_execution_valset(0).unwrap()[..4],
        &[0x7c, 0xb0, 0x74, 0xdf]
    );
}

// ==================== add_validator ====================

#[test]
fn test_add_validator_roundtrip() {
    let keys = ValidatorKeys::from_hex(SECP_HEX, BLS_HEX).unwrap();
    let auth = keys.address();
    let amount = U256::from(1_000_000_000_000_000_000u128);
    let commission = U256::from(100_000_000_000_000_000u64);

    let data = calldata::add_validator(&keys, auth, amount, commission).unwrap();
    assert_eq!(&data[..4], &Operation::AddValidator.selector());

    // Decode the three bytes fields back out
    let tokens = staking_sdk::abi::decode(
        &[ParamType::Bytes, ParamType::Bytes, ParamType::Bytes],
        &data[4..],
    )
    .unwrap();

    let payload = tokens[0].as_bytes().unwrap();
    let secp_sig = tokens[1].as_bytes().unwrap();
    let bls_sig = tokens[2].as_bytes().unwrap();

    assert_eq!(payload.len(), calldata::REGISTRATION_PAYLOAD_LEN);
    assert_eq!(secp_sig.len(), 64);
    assert_eq!(bls_sig.len(), 96);

    // Payload fields in order
    assert_eq!(&payload[..33], &keys.secp_public_key());
    assert_eq!(&payload[33..81], &keys.bls_public_key().to_bytes());
    assert_eq!(&payload[81..101], auth.as_bytes());
    assert_eq!(U256::from_big_endian(&payload[101..133]), amount);
    assert_eq!(U256::from_big_endian(&payload[133..165]), commission);

    // Both signatures are over the payload and verify against the
    // embedded public keys
    let expected_secp = keys.sign_payload_secp(payload).unwrap();
    assert_eq!(secp_sig, expected_secp);

    let bls_sig = staking_crypto::bls::BlsSignature::from_bytes(bls_sig).unwrap();
    assert!(bls_sig.verify(payload, &keys.bls_public_key()));
}

#[test]
fn test_add_validator_auth_differs_from_signer() {
    let keys = ValidatorKeys::from_hex(SECP_HEX, BLS_HEX).unwrap();
    let auth = Address::from_hex("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d").unwrap();

    let data = calldata::add_validator(&keys, auth, U256::from(1u64), U256::zero()).unwrap();
    let tokens = staking_sdk::abi::decode(
        &[ParamType::Bytes, ParamType::Bytes, ParamType::Bytes],
        &data[4..],
    )
    .unwrap();
    let payload = tokens[0].as_bytes().unwrap();
    assert_eq!(&payload[81..101], auth.as_bytes());
}

// ==================== Schema Decode ====================

#[test]
fn test_decode_validator_record() {
    // Simulated get_validator return: head of 12 slots, two bytes tails
    let mut data = Vec::new();
    let word = |v: u64| {
        let mut w = [0u8; 32];
        U256::from(v).to_big_endian(&mut w);
        w
    };

    data.extend_from_slice(&word(0)); // auth address
    for i in 1..=9 {
        data.extend_from_slice(&word(i));
    }
    data.extend_from_slice(&word(12 * 32)); // secp pubkey offset
    data.extend_from_slice(&word(12 * 32 + 96)); // bls pubkey offset (secp tail: 32 length + 64 padded)

    data.extend_from_slice(&word(33)); // secp pubkey length
    data.extend_from_slice(&[0x02; 33]);
    data.extend_from_slice(&[0u8; 31]); // padding to 64

    data.extend_from_slice(&word(48)); // bls pubkey length
    data.extend_from_slice(&[0xb0; 48]);
    data.extend_from_slice(&[0u8; 16]); // padding

    let tokens = Operation::GetValidator.decode_output(&data).unwrap();
    let info = staking_sdk::types::ValidatorInfo::from_tokens(tokens).unwrap();

    assert_eq!(info.flags, U256::from(1u64));
    assert_eq!(info.unclaimed_rewards, U256::from(5u64));
    assert_eq!(info.secp_pubkey, vec![0x02; 33]);
    assert_eq!(info.bls_pubkey, vec![0xb0; 48]);
    assert!(info.exists());
}

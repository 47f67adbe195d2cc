//! # staking-sdk
//!
//! Client toolkit for the on-chain validator-staking contract.
//!
//! ## Features
//!
//! - **Registry**: fixed selectors and type schemas for every contract
//!   operation
//! - **Calldata**: typed builders, including the composite dual-signed
//!   `add_validator` registration
//! - **Query**: cursor-paginated enumeration of validator and delegator
//!   sets with an explicit completeness flag
//! - **StakingClient**: JSON-RPC client with typed getters and
//!   transaction submission
//! - **Signers**: in-memory keys or external signing devices behind one
//!   trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use staking_sdk::{LocalSigner, StakingClient, QueryOptions};
//! use staking_sdk::tx::TxOptions;
//! use staking_primitives::U256;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StakingClient::connect("http://localhost:8545").await?;
//!
//!     // Read the current epoch
//!     let epoch = client.epoch().await?;
//!     println!("epoch {} (delay: {})", epoch.epoch, epoch.in_epoch_delay_period);
//!
//!     // Enumerate the consensus validator set
//!     let valset = client.consensus_valset(&QueryOptions::default()).await?;
//!     println!("{} validators", valset.require_complete()?.len());
//!
//!     // Delegate 1 token to validator 7
//!     let signer = LocalSigner::from_private_key_hex(
//!         "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//!     )?;
//!     let pending = client
//!         .delegate(&signer, 7, U256::from(1_000_000_000_000_000_000u128))
//!         .await?;
//!     println!("sent {}", pending.hash().to_hex());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod calldata;
mod client;
mod config;
mod error;
pub mod query;
pub mod registry;
mod signer;
mod transport;
pub mod tx;
pub mod types;

// Re-export main types
pub use client::StakingClient;
pub use config::ClientConfig;
pub use error::StakingError;
pub use query::{PagedSet, QueryOptions, QueryOutcome};
pub use registry::{Operation, STAKING_CONTRACT};
pub use signer::{DeviceSigner, LocalSigner, Signer, SigningDevice};
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use tx::{Eip1559Transaction, TxBuilder, TxOptions};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use staking_crypto::ValidatorKeys;
pub use staking_primitives::{Address, Epoch, Nonce, ValidatorId, WithdrawalId, H256, U256};

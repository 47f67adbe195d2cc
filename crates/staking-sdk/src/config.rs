//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use staking_primitives::Address;

use crate::registry::STAKING_CONTRACT;
use crate::tx::DEFAULT_GAS_LIMIT;
use crate::StakingError;

/// Client configuration, loadable from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Staking contract address (hex)
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Chain ID; fetched from the node when unset
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Default gas limit for staking transactions
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

fn default_contract_address() -> String {
    STAKING_CONTRACT.to_hex()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            chain_id: None,
            gas_limit: default_gas_limit(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, StakingError> {
        toml::from_str(content).map_err(|e| StakingError::Serialization(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, StakingError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StakingError::Serialization(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parsed contract address
    pub fn contract(&self) -> Result<Address, StakingError> {
        Ok(Address::from_hex(&self.contract_address)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.contract().unwrap(), STAKING_CONTRACT);
        assert_eq!(config.chain_id, None);
        assert_eq!(config.gas_limit, DEFAULT_GAS_LIMIT);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            rpc_url = "http://example.com:8545"
            contract_address = "0x0000000000000000000000000000000000001000"
            chain_id = 5
        "#;
        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.rpc_url, "http://example.com:8545");
        assert_eq!(config.chain_id, Some(5));
        assert_eq!(config.gas_limit, DEFAULT_GAS_LIMIT); // defaulted
    }

    #[test]
    fn test_config_bad_contract_address() {
        let config = ClientConfig {
            contract_address: "0x1234".to_string(),
            ..Default::default()
        };
        assert!(config.contract().is_err());
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        assert!(ClientConfig::from_toml("rpc_url = ").is_err());
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a mint session.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mint front-end.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintConfig {
    /// Contract binding (address, ABI artifact, method and event names).
    pub contract: ContractConfig,

    /// Network the wallet is expected to be on.
    pub network: NetworkConfig,

    /// Link templates for the success panel.
    pub links: LinkConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Contract binding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed contract address (0x-prefixed, 20 bytes).
    pub address: String,

    /// Path or http(s) URL of the compiled ABI artifact.
    pub abi_path: String,

    /// Name of the mint function declared in the ABI.
    pub mint_function: String,

    /// Name of the event emitted on mint.
    pub minted_event: String,

    /// Log polling interval for the minted event, in milliseconds.
    pub event_poll_interval_ms: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            abi_path: "abi/MyEpicNFT.json".to_string(),
            mint_function: "makeAnEpicNFT".to_string(),
            minted_event: "NewEpicNFTMinted".to_string(),
            event_poll_interval_ms: 4000,
        }
    }
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human readable network name, used in the wrong-network alert.
    pub name: String,

    /// Chain identifier the wallet must report (hex, e.g. "0x4").
    pub required_chain_id: String,

    /// JSON-RPC endpoint backing the wallet provider.
    pub rpc_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "Rinkeby".to_string(),
            required_chain_id: "0x4".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
        }
    }
}

/// Link templates shown once a mint succeeds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Explorer prefix; the transaction hash is appended.
    pub explorer_tx_base: String,

    /// Marketplace prefix; `{contract}` is replaced by the contract address
    /// and the token id is appended.
    pub marketplace_asset_base: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            explorer_tx_base: "https://rinkeby.etherscan.io/tx/".to_string(),
            marketplace_asset_base: "https://testnets.opensea.io/assets/{contract}/".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MintConfig::default();
        assert_eq!(config.contract.mint_function, "makeAnEpicNFT");
        assert_eq!(config.contract.minted_event, "NewEpicNFTMinted");
        assert_eq!(config.network.required_chain_id, "0x4");
        assert!(config.contract.address.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MintConfig = toml::from_str(
            r#"
            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"

            [network]
            required_chain_id = "0x7a69"
            "#,
        )
        .unwrap();

        assert_eq!(config.contract.address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(config.contract.event_poll_interval_ms, 4000);
        assert_eq!(config.network.required_chain_id, "0x7a69");
        assert_eq!(config.network.name, "Rinkeby");
        assert_eq!(config.observability.log_level, "info");
    }
}

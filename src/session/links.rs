//! Explorer and marketplace link derivation.

use alloy::primitives::U256;

use crate::config::LinkConfig;

/// Link templates resolved for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    explorer_tx_base: String,
    marketplace_asset_base: String,
}

impl LinkTemplates {
    /// Resolve `{contract}` in the marketplace template.
    pub fn new(config: &LinkConfig, contract_address: &str) -> Self {
        Self {
            explorer_tx_base: config.explorer_tx_base.clone(),
            marketplace_asset_base: config
                .marketplace_asset_base
                .replace("{contract}", contract_address),
        }
    }

    pub fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_base, tx_hash)
    }

    pub fn asset_url(&self, token_id: U256) -> String {
        format!("{}{}", self.marketplace_asset_base, token_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let links = LinkTemplates::new(&LinkConfig::default(), "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(
            links.transaction_url("0xdeadbeef"),
            "https://rinkeby.etherscan.io/tx/0xdeadbeef"
        );
        assert_eq!(
            links.asset_url(U256::from(42)),
            "https://testnets.opensea.io/assets/0x5FbDB2315678afecb367f032d93F642f64180aa3/42"
        );
    }

    #[test]
    fn test_template_without_placeholder() {
        let config = LinkConfig {
            explorer_tx_base: "https://sepolia.etherscan.io/tx/".to_string(),
            marketplace_asset_base: "https://example.org/token/".to_string(),
        };
        let links = LinkTemplates::new(&config, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(links.asset_url(U256::from(7)), "https://example.org/token/7");
    }
}

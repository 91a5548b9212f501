//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the contract address and chain id are well formed
//! - Check link templates and the RPC endpoint are usable URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MintConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;

use crate::config::schema::MintConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Parse a hex chain identifier such as `0x4`.
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &MintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError::new(
            "contract.address",
            format!("'{}' is not a 20-byte hex address", config.contract.address),
        ));
    }
    if config.contract.abi_path.trim().is_empty() {
        errors.push(ValidationError::new("contract.abi_path", "must not be empty"));
    }
    if config.contract.mint_function.trim().is_empty() {
        errors.push(ValidationError::new("contract.mint_function", "must not be empty"));
    }
    if config.contract.minted_event.trim().is_empty() {
        errors.push(ValidationError::new("contract.minted_event", "must not be empty"));
    }
    if config.contract.event_poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "contract.event_poll_interval_ms",
            "must be greater than zero",
        ));
    }

    if parse_chain_id(&config.network.required_chain_id).is_none() {
        errors.push(ValidationError::new(
            "network.required_chain_id",
            format!("'{}' is not a 0x-prefixed hex number", config.network.required_chain_id),
        ));
    }
    if url::Url::parse(&config.network.rpc_url).is_err() {
        errors.push(ValidationError::new(
            "network.rpc_url",
            format!("'{}' is not a valid URL", config.network.rpc_url),
        ));
    }

    if url::Url::parse(&config.links.explorer_tx_base).is_err() {
        errors.push(ValidationError::new("links.explorer_tx_base", "not a valid URL"));
    }
    let marketplace = config
        .links
        .marketplace_asset_base
        .replace("{contract}", &config.contract.address);
    if url::Url::parse(&marketplace).is_err() {
        errors.push(ValidationError::new("links.marketplace_asset_base", "not a valid URL"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MintConfig {
        let mut config = MintConfig::default();
        config.contract.address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_default_config_needs_address() {
        let errors = validate_config(&MintConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "contract.address");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.network.required_chain_id = "4".to_string();
        config.contract.event_poll_interval_ms = 0;
        config.network.rpc_url = "not a url".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "contract.event_poll_interval_ms",
                "network.required_chain_id",
                "network.rpc_url"
            ]
        );
    }

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x4"), Some(4));
        assert_eq!(parse_chain_id("0x7A69"), Some(31337));
        assert_eq!(parse_chain_id("4"), None);
        assert_eq!(parse_chain_id("0xzz"), None);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("network.rpc_url", "not a valid URL");
        assert_eq!(err.to_string(), "network.rpc_url: not a valid URL");
    }
}

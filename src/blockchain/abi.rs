//! Contract interface descriptor.
//!
//! The descriptor pairs the deployed address with the compiled ABI artifact
//! and pins down the two members the session needs: a zero-argument mint
//! function and an `(address, uint256)` minted event.

use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, Selector, B256, U256};
use thiserror::Error;

use crate::blockchain::types::MintedEvent;
use crate::config::ContractConfig;

/// Errors raised while loading or checking an ABI artifact.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("Failed to read ABI artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch ABI artifact: {0}")]
    Fetch(String),

    #[error("Invalid ABI artifact: {0}")]
    Parse(String),

    #[error("Invalid contract address '{0}'")]
    Address(String),

    #[error("ABI does not declare function '{0}'")]
    MissingFunction(String),

    #[error("ABI does not declare event '{0}'")]
    MissingEvent(String),

    #[error("Unsupported signature for '{name}': {reason}")]
    UnsupportedShape { name: String, reason: String },
}

pub type AbiResult<T> = Result<T, AbiError>;

/// Fixed address plus the resolved mint/event members of its ABI.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    address: Address,
    mint_function: String,
    mint_selector: Selector,
    minted_event: String,
    minted_topic: B256,
    sender_indexed: bool,
}

impl ContractDescriptor {
    /// Load the artifact named by the config (file path or http(s) URL).
    pub async fn load(config: &ContractConfig) -> AbiResult<Self> {
        let raw = if config.abi_path.starts_with("http://") || config.abi_path.starts_with("https://") {
            reqwest::get(&config.abi_path)
                .await
                .and_then(|res| res.error_for_status())
                .map_err(|e| AbiError::Fetch(e.to_string()))?
                .text()
                .await
                .map_err(|e| AbiError::Fetch(e.to_string()))?
        } else {
            tokio::fs::read_to_string(&config.abi_path)
                .await
                .map_err(|source| AbiError::Io {
                    path: config.abi_path.clone(),
                    source,
                })?
        };

        let descriptor = Self::from_artifact(
            &config.address,
            &raw,
            &config.mint_function,
            &config.minted_event,
        )?;
        tracing::debug!(
            address = %descriptor.address,
            mint = %descriptor.mint_function,
            event = %descriptor.minted_event,
            "Contract descriptor loaded"
        );
        Ok(descriptor)
    }

    /// Build a descriptor from an artifact body.
    ///
    /// Accepts either a compiler artifact (`{"abi": [...], ...}`) or a bare
    /// ABI array.
    pub fn from_artifact(
        address: &str,
        artifact: &str,
        mint_function: &str,
        minted_event: &str,
    ) -> AbiResult<Self> {
        let address: Address = address
            .parse()
            .map_err(|_| AbiError::Address(address.to_string()))?;

        let value: serde_json::Value =
            serde_json::from_str(artifact).map_err(|e| AbiError::Parse(e.to_string()))?;
        let abi_value = match value {
            serde_json::Value::Object(mut map) => map
                .remove("abi")
                .ok_or_else(|| AbiError::Parse("artifact has no 'abi' field".to_string()))?,
            other => other,
        };
        let abi: JsonAbi =
            serde_json::from_value(abi_value).map_err(|e| AbiError::Parse(e.to_string()))?;

        let function = abi
            .function(mint_function)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.is_empty()))
            .ok_or_else(|| AbiError::MissingFunction(mint_function.to_string()))?;

        let event = abi
            .event(minted_event)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| AbiError::MissingEvent(minted_event.to_string()))?;

        let shape: Vec<&str> = event.inputs.iter().map(|p| p.ty.as_str()).collect();
        if shape != ["address", "uint256"] {
            return Err(AbiError::UnsupportedShape {
                name: minted_event.to_string(),
                reason: format!("expected (address, uint256), found ({})", shape.join(", ")),
            });
        }
        if event.inputs[1].indexed {
            return Err(AbiError::UnsupportedShape {
                name: minted_event.to_string(),
                reason: "token id must not be indexed".to_string(),
            });
        }

        Ok(Self {
            address,
            mint_function: mint_function.to_string(),
            mint_selector: function.selector(),
            minted_event: minted_event.to_string(),
            minted_topic: event.selector(),
            sender_indexed: event.inputs[0].indexed,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mint_function(&self) -> &str {
        &self.mint_function
    }

    pub fn minted_event(&self) -> &str {
        &self.minted_event
    }

    /// Call data for the zero-argument mint function.
    pub fn mint_calldata(&self) -> Bytes {
        Bytes::copy_from_slice(self.mint_selector.as_slice())
    }

    /// Topic0 of the minted event.
    pub fn minted_topic(&self) -> B256 {
        self.minted_topic
    }

    /// Decode one log of the minted event from its topics and data.
    pub fn decode_minted(&self, topics: &[B256], data: &[u8]) -> Option<MintedEvent> {
        if topics.first() != Some(&self.minted_topic) {
            return None;
        }

        let (sender, token_word) = if self.sender_indexed {
            let topic = topics.get(1)?;
            (Address::from_slice(&topic[12..]), data.get(0..32)?)
        } else {
            let sender_word = data.get(0..32)?;
            (Address::from_slice(&sender_word[12..]), data.get(32..64)?)
        };

        Some(MintedEvent {
            sender: sender.to_string(),
            token_id: U256::from_be_slice(token_word),
        })
    }
}

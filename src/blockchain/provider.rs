//! Wallet provider capability.
//!
//! # Responsibilities
//! - Expose the EIP-1193 style `request` surface the session relies on
//! - Decode account lists and chain identifiers
//! - Bind a signing contract client for the authorized account
//!
//! `RpcWalletProvider` backs the capability with a JSON-RPC endpoint so the
//! session can run outside a browser.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use serde_json::Value;

use crate::blockchain::abi::ContractDescriptor;
use crate::blockchain::contract::{MintContract, OnchainMintContract};
use crate::blockchain::types::{ChainId, ContractError, ContractResult, ProviderError, ProviderResult};
use crate::blockchain::wallet::LocalSigner;

/// Provider methods used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    /// Non-interactive list of already authorized accounts.
    Accounts,
    /// Interactive authorization prompt.
    RequestAccounts,
    /// Active chain identifier.
    ChainId,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Accounts => "eth_accounts",
            RpcMethod::RequestAccounts => "eth_requestAccounts",
            RpcMethod::ChainId => "eth_chainId",
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wallet provider injected into the session.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Issue a raw provider request.
    async fn request(&self, method: RpcMethod) -> ProviderResult<Value>;

    /// Bind the mint contract with `account` as the transaction sender.
    fn bind_contract(
        &self,
        descriptor: &ContractDescriptor,
        account: &str,
    ) -> ContractResult<Arc<dyn MintContract>>;

    /// Accounts already authorized for this page, without prompting.
    async fn accounts(&self) -> ProviderResult<Vec<String>> {
        let value = self.request(RpcMethod::Accounts).await?;
        decode_accounts(RpcMethod::Accounts, value)
    }

    /// Prompt the user to authorize accounts.
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        let value = self.request(RpcMethod::RequestAccounts).await?;
        decode_accounts(RpcMethod::RequestAccounts, value)
    }

    /// Active chain identifier as reported by the wallet (hex string).
    async fn chain_id(&self) -> ProviderResult<String> {
        match self.request(RpcMethod::ChainId).await? {
            Value::String(id) => Ok(id),
            other => Err(ProviderError::Malformed {
                method: RpcMethod::ChainId.as_str(),
                reason: format!("expected string, got {}", other),
            }),
        }
    }
}

fn decode_accounts(method: RpcMethod, value: Value) -> ProviderResult<Vec<String>> {
    let malformed = |reason: String| ProviderError::Malformed {
        method: method.as_str(),
        reason,
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(account) => Ok(account),
                other => Err(malformed(format!("expected account string, got {}", other))),
            })
            .collect(),
        other => Err(malformed(format!("expected array, got {}", other))),
    }
}

/// Wallet provider backed by a JSON-RPC node.
///
/// With a [`LocalSigner`] the signer's account is the only account and it
/// stays unauthorized until `eth_requestAccounts`. Without one, the node's
/// own (unlocked) accounts are reported for both account methods.
pub struct RpcWalletProvider {
    provider: Arc<dyn Provider + Send + Sync>,
    signer: Option<LocalSigner>,
    authorized: AtomicBool,
    event_poll_interval: Duration,
}

impl RpcWalletProvider {
    /// Connect to `rpc_url`, optionally signing with a local key.
    pub fn new(
        rpc_url: &str,
        signer: Option<LocalSigner>,
        event_poll_interval: Duration,
    ) -> ProviderResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ProviderError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider: Arc<dyn Provider + Send + Sync> = match &signer {
            Some(signer) => Arc::new(
                ProviderBuilder::new()
                    .wallet(signer.ethereum_wallet())
                    .connect_http(url),
            ),
            None => Arc::new(ProviderBuilder::new().connect_http(url)),
        };

        tracing::info!(
            rpc_url = %rpc_url,
            local_signer = signer.is_some(),
            "Wallet provider initialized"
        );

        Ok(Self::from_provider(provider, signer, event_poll_interval))
    }

    /// Wrap an already connected provider.
    pub fn from_provider(
        provider: Arc<dyn Provider + Send + Sync>,
        signer: Option<LocalSigner>,
        event_poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            signer,
            authorized: AtomicBool::new(false),
            event_poll_interval,
        }
    }

    async fn node_accounts(&self) -> ProviderResult<Vec<String>> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| ProviderError::Rpc(e.to_string()))?;
        Ok(accounts.iter().map(Address::to_string).collect())
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn request(&self, method: RpcMethod) -> ProviderResult<Value> {
        tracing::debug!(method = %method, "Provider request");

        let result = match method {
            RpcMethod::Accounts => match &self.signer {
                Some(signer) if self.authorized.load(Ordering::SeqCst) => {
                    vec![signer.address().to_string()]
                }
                Some(_) => Vec::new(),
                None => self.node_accounts().await?,
            },
            RpcMethod::RequestAccounts => match &self.signer {
                Some(signer) => {
                    self.authorized.store(true, Ordering::SeqCst);
                    vec![signer.address().to_string()]
                }
                None => self.node_accounts().await?,
            },
            RpcMethod::ChainId => {
                let id = self
                    .provider
                    .get_chain_id()
                    .await
                    .map_err(|e| ProviderError::Rpc(e.to_string()))?;
                return Ok(Value::String(ChainId(id).to_string()));
            }
        };

        Ok(Value::from(result))
    }

    fn bind_contract(
        &self,
        descriptor: &ContractDescriptor,
        account: &str,
    ) -> ContractResult<Arc<dyn MintContract>> {
        let from: Address = account
            .parse()
            .map_err(|_| ContractError::Binding(format!("Invalid account address '{}'", account)))?;

        Ok(Arc::new(OnchainMintContract::new(
            self.provider.clone(),
            descriptor.clone(),
            from,
            self.event_poll_interval,
        )))
    }
}

impl std::fmt::Debug for RpcWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletProvider")
            .field("local_signer", &self.signer.as_ref().map(LocalSigner::address))
            .field("authorized", &self.authorized.load(Ordering::SeqCst))
            .finish()
    }
}

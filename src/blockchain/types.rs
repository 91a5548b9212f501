//! Wallet/contract types and error definitions.

use alloy::primitives::U256;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Errors surfaced by a wallet provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The user declined the request in the wallet.
    #[error("User rejected the request")]
    UserRejected,

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The provider answered with a payload of the wrong shape.
    #[error("Malformed response to {method}: {reason}")]
    Malformed { method: &'static str, reason: String },

    /// Local signing key could not be loaded.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for provider requests.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while talking to the mint contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Contract could not be bound (bad address, no signer).
    #[error("Contract binding failed: {0}")]
    Binding(String),

    /// Sending the transaction failed before a hash was returned.
    #[error("Transaction submission failed: {0}")]
    Submission(String),

    /// Waiting for the receipt failed.
    #[error("Confirmation failed: {0}")]
    Confirmation(String),

    /// Transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Event subscription could not be established.
    #[error("Event subscription failed: {0}")]
    Subscription(String),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Decoded occurrence of the minted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedEvent {
    /// Address that triggered the mint.
    pub sender: String,
    /// Identifier of the freshly minted token.
    pub token_id: U256,
}

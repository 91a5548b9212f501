//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ABI artifact + contract address
//!     → abi.rs (descriptor: mint selector, minted event topic)
//!     → provider.rs (wallet capability: accounts, chain id, contract binding)
//!     → contract.rs (submit mint, wait for receipt, stream minted events)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables (wallet.rs)
//! - Never log private keys or sensitive data

pub mod abi;
pub mod contract;
pub mod provider;
pub mod types;
pub mod wallet;

pub use abi::{AbiError, ContractDescriptor};
pub use contract::{MintContract, MintedEvents, OnchainMintContract, PendingMint};
pub use provider::{RpcMethod, RpcWalletProvider, WalletProvider};
pub use types::{ChainId, ContractError, MintedEvent, ProviderError};
pub use wallet::LocalSigner;

//! Wallet session and NFT mint flow.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod session;

pub use config::MintConfig;
pub use session::{Environment, WalletSession};

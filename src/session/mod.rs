//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! Environment (injected wallet provider)
//!     → controller.rs (detect, authorize, connect, mint, listen)
//!     → store.rs (publish state changes)
//!     → view.rs (render the visible panel)
//! ```
//!
//! # Design Decisions
//! - The wallet is injected, never looked up globally
//! - All state lives in one `watch`-backed store; observers re-render on change
//! - Event listeners live as long as the session

pub mod controller;
pub mod environment;
pub mod links;
pub mod notify;
pub mod state;
pub mod store;
pub mod view;

pub use controller::{MintOutcome, SessionError, SessionSettings, WalletSession, MISSING_WALLET_ALERT};
pub use environment::Environment;
pub use links::LinkTemplates;
pub use notify::{ConsoleNotifier, Notifier};
pub use state::{SessionPhase, SessionState};
pub use store::StateStore;
pub use view::View;

//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable via `RUST_LOG`
//! - Start at a bootstrap level so config loading is logged, then reload
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr so stdout stays free for the rendered view

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until the configuration has been read.
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Build the filter: `RUST_LOG` wins, otherwise `epic_nft_mint=<level>`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("epic_nft_mint={},warn", level)))
}

/// Handle to the installed filter.
#[derive(Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Swap in the filter for `level`. `RUST_LOG` still takes precedence.
    pub fn set_level(&self, level: &str) {
        match self.filter.reload(build_filter(level)) {
            Ok(()) => tracing::debug!(level = %level, "Log level applied"),
            Err(e) => tracing::warn!(level = %level, error = %e, "Failed to apply log level"),
        }
    }
}

/// Install the global subscriber. Safe to call more than once; only the first
/// call's handle controls the active filter.
pub fn init_logging(level: &str) -> LogHandle {
    let (filter, handle) = reload::Layer::new(build_filter(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    LogHandle { filter: handle }
}

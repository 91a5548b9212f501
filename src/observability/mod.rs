//! Observability subsystem.
//!
//! Every subsystem logs through `tracing` with structured fields; the binary
//! installs the subscriber via `logging::init_logging`.

pub mod logging;

pub use logging::{init_logging, LogHandle, BOOTSTRAP_LEVEL};

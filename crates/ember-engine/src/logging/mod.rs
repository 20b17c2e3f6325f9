//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade so the binary and
//! both library crates share one `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};

//! Logging utilities.
//!
//! Library crates only use the `log` facade; hosts call [`init_logging`] once
//! to install the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};

//! Logging utilities.
//!
//! Centralizes logger initialization on top of the standard `log` facade so
//! the editor shell and tests configure diagnostics the same way.

mod init;

pub use init::{LoggingConfig, init_logging};

//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the crate logs
//! through the `log` facade only; the backend choice lives here.

mod init;

pub use init::{LoggingConfig, init_logging};

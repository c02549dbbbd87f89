//! Logging setup.
//!
//! Everything in the engine logs through the `log` facade; this module only
//! decides which `env_logger` filter is installed.

mod init;

pub use init::{init_logging, LoggingConfig};

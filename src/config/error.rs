//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a [`MachineConfig`](super::MachineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not valid configuration JSON
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

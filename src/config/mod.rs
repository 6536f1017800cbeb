//! Machine configuration.
//!
//! Configuration is plain data: hosts can build it in code or deserialize it
//! from whatever settings file they already load. Every field has a default.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Number of transitions a machine remembers by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Settings applied when a [`StateMachine`](crate::StateMachine) is created.
///
/// # Example
///
/// ```rust
/// use tickfsm::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "name": "enemy-ai" }"#).unwrap();
/// assert_eq!(config.name.as_deref(), Some("enemy-ai"));
/// assert_eq!(config.history_capacity, tickfsm::config::DEFAULT_HISTORY_CAPACITY);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Human-readable label used in logs and snapshots
    pub name: Option<String>,

    /// Maximum transitions kept in history; zero disables recording
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Parse configuration from JSON, filling missing fields with defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

//! Read-only snapshots of a running machine.
//!
//! A snapshot captures which states are registered, which one is active
//! and what the machine has done recently. It is meant for logs, debug
//! overlays and test assertions. There is no way to rebuild a machine from
//! one: state objects carry behavior that cannot be serialized.

use crate::core::TransitionHistory;
use crate::runtime::{Phase, StateMachine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Point-in-time view of a [`StateMachine`].
#[derive(Clone, Debug, Serialize)]
pub struct MachineSnapshot<K> {
    /// Id of the captured machine
    pub machine_id: Uuid,

    /// Configured machine name
    pub name: Option<String>,

    pub phase: Phase,

    /// Active state key
    pub current: Option<K>,

    /// Key waiting for the next tick
    pub pending: Option<K>,

    /// Registered keys in registration order
    pub registered: Vec<K>,

    /// Ticks completed at capture time
    pub ticks: u64,

    /// Retained transition history
    pub history: TransitionHistory<K>,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl<K: Clone> MachineSnapshot<K> {
    /// Capture the current state of `machine`.
    pub fn capture(machine: &StateMachine<K>) -> Self {
        Self {
            machine_id: machine.id(),
            name: machine.name().map(str::to_owned),
            phase: machine.phase(),
            current: machine.current_key().cloned(),
            pending: machine.pending_key().cloned(),
            registered: machine.keys().cloned().collect(),
            ticks: machine.ticks(),
            history: machine.history().clone(),
            taken_at: Utc::now(),
        }
    }
}

impl<K: Serialize> MachineSnapshot<K> {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }
}

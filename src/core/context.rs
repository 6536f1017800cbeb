//! Handle passed to state lifecycle hooks.

use super::registry::{schedule, KeyIndex};
use std::fmt::Debug;
use std::hash::Hash;
use uuid::Uuid;

/// View of the owning machine available inside `on_enter`, `on_update` and
/// `on_exit`.
///
/// A hook cannot reach the machine directly because the machine is busy
/// driving it. `Context` exposes the part that is safe to touch: the pending
/// transition slot and the set of registered keys.
pub struct Context<'a, K> {
    machine: Uuid,
    index: &'a KeyIndex<K>,
    pending: &'a mut Option<usize>,
    ticks: u64,
}

impl<'a, K> Context<'a, K> {
    pub(crate) fn new(
        machine: Uuid,
        index: &'a KeyIndex<K>,
        pending: &'a mut Option<usize>,
        ticks: u64,
    ) -> Self {
        Self {
            machine,
            index,
            pending,
            ticks,
        }
    }

    /// Id of the machine driving this hook.
    pub fn machine_id(&self) -> Uuid {
        self.machine
    }

    /// Number of ticks the machine completed before the current one.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Key of the transition waiting for the next tick, if any.
    pub fn pending_key(&self) -> Option<&K> {
        (*self.pending).and_then(|slot| self.index.key(slot))
    }
}

impl<K: Eq + Hash + Clone + Debug> Context<'_, K> {
    /// Request a transition to `key` on the next tick.
    ///
    /// Behaves exactly like
    /// [`StateMachine::request_transition`](crate::StateMachine::request_transition):
    /// unknown keys are ignored and the last request before the next tick
    /// wins. The transition is never applied within the current tick.
    pub fn request_transition(&mut self, key: K) {
        schedule(self.machine, self.index, self.pending, &key);
    }

    /// Whether a state is registered under `key`.
    pub fn is_registered(&self, key: &K) -> bool {
        self.index.contains(key)
    }
}

impl<K: Debug> Debug for Context<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("machine", &self.machine)
            .field("pending", &self.pending_key())
            .field("ticks", &self.ticks)
            .finish()
    }
}

//! Key to slot index for registered states.
//!
//! States themselves live in a `Vec` owned by the machine. This index maps
//! each key to its slot and keeps the keys in registration order, so lookups
//! can run while a state in the `Vec` is mutably borrowed by a hook.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub(crate) struct KeyIndex<K> {
    slots: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K> Default for KeyIndex<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

impl<K> KeyIndex<K> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Key stored at `slot`.
    pub(crate) fn key(&self, slot: usize) -> Option<&K> {
        self.keys.get(slot)
    }

    pub(crate) fn keys(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.keys.clear();
    }
}

impl<K: Eq + Hash + Clone> KeyIndex<K> {
    pub(crate) fn slot(&self, key: &K) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Assign the next slot to `key`. Returns `None` if the key is taken.
    pub(crate) fn insert(&mut self, key: K) -> Option<usize> {
        if self.slots.contains_key(&key) {
            return None;
        }
        let slot = self.keys.len();
        self.slots.insert(key.clone(), slot);
        self.keys.push(key);
        Some(slot)
    }
}

/// Point `pending` at the slot for `key`, overwriting any earlier request.
///
/// Unknown keys leave `pending` untouched.
pub(crate) fn schedule<K>(machine: Uuid, index: &KeyIndex<K>, pending: &mut Option<usize>, key: &K)
where
    K: Eq + Hash + Clone + Debug,
{
    match index.slot(key) {
        Some(slot) => {
            if let Some(replaced) = (*pending).filter(|&p| p != slot).and_then(|p| index.key(p)) {
                debug!(%machine, ?key, ?replaced, "superseding pending transition");
            }
            *pending = Some(slot);
        }
        None => {
            debug!(%machine, ?key, "ignoring transition to unregistered state");
        }
    }
}

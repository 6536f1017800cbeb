//! State transition history tracking.
//!
//! Keeps a bounded, ordered log of the transitions a machine applied.
//! Entries are only ever appended by [`StateMachine::tick`](crate::StateMachine::tick);
//! the oldest entry is evicted once the capacity is reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single applied transition.
///
/// `from` is `None` for the first transition a machine applies, when no
/// state was active yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<K> {
    /// Key of the state that was exited
    pub from: Option<K>,
    /// Key of the state that was entered
    pub to: K,
    /// Tick on which the transition was applied (zero-based)
    pub tick: u64,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of applied transitions.
///
/// A capacity of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use tickfsm::{TransitionHistory, TransitionRecord};
///
/// let mut history = TransitionHistory::new(2);
/// for (tick, (from, to)) in [(None, 'a'), (Some('a'), 'b'), (Some('b'), 'c')]
///     .into_iter()
///     .enumerate()
/// {
///     history.record(TransitionRecord {
///         from,
///         to,
///         tick: tick as u64,
///         timestamp: Utc::now(),
///     });
/// }
///
/// // Oldest entry was evicted
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&'a', &'b', &'c']);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<K> {
    capacity: usize,
    records: VecDeque<TransitionRecord<K>>,
}

impl<K> TransitionHistory<K> {
    /// Create an empty history holding at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<K>) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.back()
    }

    /// Records in the order they were applied, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<K>> {
        self.records.iter()
    }

    /// Keys visited, in order.
    ///
    /// Starts with the `from` key of the oldest retained record (when it has
    /// one), followed by the `to` key of every record.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(from) = self.records.front().and_then(|r| r.from.as_ref()) {
            path.push(from);
        }
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time between the oldest and newest retained records.
    ///
    /// Returns `None` when the history is empty. A negative span (the wall
    /// clock stepped backwards between records) is reported as zero.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        let span = last.timestamp.signed_duration_since(first.timestamp);
        Some(span.to_std().unwrap_or(Duration::ZERO))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

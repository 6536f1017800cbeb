//! Tick-driven state machine.

use crate::config::MachineConfig;
use crate::core::registry::{schedule, KeyIndex};
use crate::core::{Context, State, TransitionHistory, TransitionRecord};
use crate::snapshot::MachineSnapshot;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};
use uuid::Uuid;

/// Lifecycle phase of the machine itself, as opposed to the states it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No transition has been applied yet
    Uninitialized,
    /// A state is active
    Active,
}

#[derive(Clone, Copy, Debug)]
enum Hook {
    Enter,
    Update,
    Exit,
}

/// Single-active-state machine with deferred transitions.
///
/// States are registered once, transitions are requested by key, and the
/// host drives everything by calling [`tick`](Self::tick) once per cycle.
/// A tick applies at most one pending transition (exit, then enter) and
/// then updates whichever state is active.
///
/// Invalid input never fails: duplicate registrations and requests for
/// unknown keys are dropped and logged at `debug` level.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Context, Phase, State, StateMachine};
///
/// struct Blink {
///     key: u8,
///     next: u8,
/// }
///
/// impl State<u8> for Blink {
///     fn id(&self) -> u8 {
///         self.key
///     }
///
///     fn on_update(&mut self, ctx: &mut Context<'_, u8>) {
///         ctx.request_transition(self.next);
///     }
/// }
///
/// let mut machine: StateMachine<u8> = StateMachine::new();
/// machine.register(Blink { key: 0, next: 1 });
/// machine.register(Blink { key: 1, next: 0 });
/// assert_eq!(machine.phase(), Phase::Uninitialized);
///
/// machine.request_transition(0);
/// machine.tick();
/// assert_eq!(machine.current_key(), Some(&0));
/// assert_eq!(machine.pending_key(), Some(&1));
///
/// machine.tick();
/// assert_eq!(machine.current_key(), Some(&1));
/// ```
pub struct StateMachine<K> {
    id: Uuid,
    name: Option<String>,
    index: KeyIndex<K>,
    states: Vec<Box<dyn State<K>>>,
    current: Option<usize>,
    pending: Option<usize>,
    history: TransitionHistory<K>,
    ticks: u64,
}

impl<K> StateMachine<K> {
    /// Instance id used in logs and snapshots.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a state is active.
    pub fn phase(&self) -> Phase {
        if self.current.is_some() {
            Phase::Active
        } else {
            Phase::Uninitialized
        }
    }

    /// Key of the active state.
    pub fn current_key(&self) -> Option<&K> {
        self.current.and_then(|slot| self.index.key(slot))
    }

    /// Key of the transition waiting for the next tick.
    pub fn pending_key(&self) -> Option<&K> {
        self.pending.and_then(|slot| self.index.key(slot))
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// Ticks completed since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &TransitionHistory<K> {
        &self.history
    }

    /// Drop every state and clear the active and pending slots.
    ///
    /// This is a hard reset: the active state's `on_exit` is not called.
    /// History and the tick counter are cleared too; id and configuration
    /// are kept.
    pub fn reset(&mut self) {
        debug!(machine = %self.id, states = self.states.len(), "resetting state machine");
        self.states.clear();
        self.index.clear();
        self.current = None;
        self.pending = None;
        self.history.clear();
        self.ticks = 0;
    }
}

impl<K: Eq + Hash + Clone + Debug> StateMachine<K> {
    /// Create an empty machine with default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create an empty machine.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: config.name,
            index: KeyIndex::new(),
            states: Vec::new(),
            current: None,
            pending: None,
            history: TransitionHistory::new(config.history_capacity),
            ticks: 0,
        }
    }

    /// Register a state under its [`id`](State::id).
    ///
    /// If the key is already registered the call does nothing; the first
    /// registration wins.
    pub fn register<S>(&mut self, state: S)
    where
        S: State<K> + 'static,
    {
        self.register_boxed(Box::new(state));
    }

    /// Register an already boxed state. Same rules as [`register`](Self::register).
    pub fn register_boxed(&mut self, state: Box<dyn State<K>>) {
        let key = state.id();
        match self.index.insert(key.clone()) {
            Some(slot) => {
                debug_assert_eq!(slot, self.states.len());
                self.states.push(state);
                debug!(machine = %self.id, ?key, "registered state");
            }
            None => {
                debug!(machine = %self.id, ?key, "ignoring duplicate state registration");
            }
        }
    }

    /// Whether a state is registered under `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Schedule a transition to `key` for the next tick.
    ///
    /// Unknown keys are ignored and leave any earlier request in place.
    /// Otherwise the request replaces whatever was pending, so only the
    /// last request before a tick takes effect. No hooks run here.
    pub fn request_transition(&mut self, key: K) {
        schedule(self.id, &self.index, &mut self.pending, &key);
    }

    /// Advance the machine by one cycle.
    ///
    /// 1. If a transition is pending: the active state (if any) exits, then
    ///    the pending state becomes active and enters.
    /// 2. The active state (if any) updates.
    ///
    /// The pending slot is read after `on_exit`, so a request made there
    /// retargets the transition being applied. Requests from `on_enter` or
    /// `on_update` are held until the next tick.
    pub fn tick(&mut self) {
        if self.pending.is_some() {
            let previous = self.current;
            if let Some(slot) = previous {
                self.dispatch(slot, Hook::Exit);
            }
            // on_exit can replace the pending slot but never clear it
            if let Some(next) = self.pending.take() {
                self.current = Some(next);
                self.dispatch(next, Hook::Enter);
                self.record_transition(previous, next);
            }
        }

        if let Some(slot) = self.current {
            self.dispatch(slot, Hook::Update);
        }

        self.ticks += 1;
    }

    /// Capture a read-only view of the machine.
    pub fn snapshot(&self) -> MachineSnapshot<K> {
        MachineSnapshot::capture(self)
    }

    fn dispatch(&mut self, slot: usize, hook: Hook) {
        let Some(state) = self.states.get_mut(slot) else {
            return;
        };
        trace!(machine = %self.id, key = ?self.index.key(slot), ?hook, tick = self.ticks, "dispatching hook");
        let mut ctx = Context::new(self.id, &self.index, &mut self.pending, self.ticks);
        match hook {
            Hook::Enter => state.on_enter(&mut ctx),
            Hook::Update => state.on_update(&mut ctx),
            Hook::Exit => state.on_exit(&mut ctx),
        }
    }

    fn record_transition(&mut self, from: Option<usize>, to: usize) {
        let Some(to) = self.index.key(to).cloned() else {
            return;
        };
        let from = from.and_then(|slot| self.index.key(slot)).cloned();
        debug!(machine = %self.id, ?from, ?to, tick = self.ticks, "applied transition");
        self.history.record(TransitionRecord {
            from,
            to,
            tick: self.ticks,
            timestamp: Utc::now(),
        });
    }
}

impl<K: Eq + Hash + Clone + Debug> Default for StateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug> Debug for StateMachine<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("keys", &self.index.keys().collect::<Vec<_>>())
            .field("current", &self.current_key())
            .field("pending", &self.pending_key())
            .field("ticks", &self.ticks)
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every hook call as `"<key>.<hook>"`.
    struct Scripted {
        key: u32,
        log: Log,
        request_on_enter: Option<u32>,
        request_on_update: Option<u32>,
        request_on_exit: Option<u32>,
    }

    impl Scripted {
        fn new(key: u32, log: &Log) -> Self {
            Self {
                key,
                log: Rc::clone(log),
                request_on_enter: None,
                request_on_update: None,
                request_on_exit: None,
            }
        }

        fn push(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{hook}", self.key));
        }
    }

    impl State<u32> for Scripted {
        fn id(&self) -> u32 {
            self.key
        }

        fn on_enter(&mut self, ctx: &mut Context<'_, u32>) {
            self.push("enter");
            if let Some(next) = self.request_on_enter {
                ctx.request_transition(next);
            }
        }

        fn on_update(&mut self, ctx: &mut Context<'_, u32>) {
            self.push("update");
            if let Some(next) = self.request_on_update {
                ctx.request_transition(next);
            }
        }

        fn on_exit(&mut self, ctx: &mut Context<'_, u32>) {
            self.push("exit");
            if let Some(next) = self.request_on_exit {
                ctx.request_transition(next);
            }
        }
    }

    fn drain(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn machine_with(keys: &[u32], log: &Log) -> StateMachine<u32> {
        let mut machine: StateMachine<u32> = StateMachine::new();
        for &key in keys {
            machine.register(Scripted::new(key, log));
        }
        machine
    }

    #[test]
    fn new_machine_is_uninitialized() {
        let machine: StateMachine<u32> = StateMachine::new();
        assert_eq!(machine.phase(), Phase::Uninitialized);
        assert!(machine.is_empty());
        assert!(machine.current_key().is_none());
        assert!(machine.pending_key().is_none());
        assert_eq!(machine.ticks(), 0);
    }

    #[test]
    fn duplicate_registration_keeps_first_state() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();

        machine.register(Scripted::new(1, &first));
        machine.register(Scripted::new(1, &second));
        assert_eq!(machine.len(), 1);

        machine.request_transition(1);
        machine.tick();

        assert_eq!(drain(&first), vec!["1.enter", "1.update"]);
        assert!(drain(&second).is_empty());
    }

    #[test]
    fn unknown_transition_is_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.request_transition(9);
        assert!(machine.pending_key().is_none());

        machine.request_transition(1);
        machine.request_transition(9);
        assert_eq!(machine.pending_key(), Some(&1));
        assert!(machine.current_key().is_none());
    }

    #[test]
    fn request_runs_no_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.request_transition(1);
        machine.request_transition(2);

        assert!(drain(&log).is_empty());
    }

    #[test]
    fn tick_before_any_request_runs_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.tick();
        machine.tick();

        assert!(drain(&log).is_empty());
        assert_eq!(machine.phase(), Phase::Uninitialized);
        assert_eq!(machine.ticks(), 2);
    }

    #[test]
    fn enter_and_update_run_in_same_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.request_transition(1);
        machine.tick();

        assert_eq!(drain(&log), vec!["1.enter", "1.update"]);
        assert_eq!(machine.phase(), Phase::Active);
        assert_eq!(machine.current_key(), Some(&1));
        assert!(machine.pending_key().is_none());
    }

    #[test]
    fn exit_runs_before_enter() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);
        machine.request_transition(1);
        machine.tick();
        drain(&log);

        machine.request_transition(2);
        machine.tick();

        assert_eq!(drain(&log), vec!["1.exit", "2.enter", "2.update"]);
    }

    #[test]
    fn active_state_updates_every_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1], &log);
        machine.request_transition(1);

        machine.tick();
        machine.tick();
        machine.tick();

        assert_eq!(
            drain(&log),
            vec!["1.enter", "1.update", "1.update", "1.update"]
        );
    }

    #[test]
    fn self_transition_exits_and_reenters() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1], &log);
        machine.request_transition(1);
        machine.tick();
        drain(&log);

        machine.request_transition(1);
        machine.tick();

        assert_eq!(drain(&log), vec!["1.exit", "1.enter", "1.update"]);
    }

    #[test]
    fn coalesced_requests_apply_only_last() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.request_transition(1);
        machine.request_transition(2);
        machine.tick();

        assert_eq!(drain(&log), vec!["2.enter", "2.update"]);
        assert_eq!(machine.current_key(), Some(&2));
    }

    #[test]
    fn request_from_enter_waits_for_next_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();
        let mut first = Scripted::new(1, &log);
        first.request_on_enter = Some(3);
        machine.register(first);
        machine.register(Scripted::new(2, &log));
        machine.register(Scripted::new(3, &log));

        machine.request_transition(1);
        machine.tick();

        assert_eq!(drain(&log), vec!["1.enter", "1.update"]);
        assert_eq!(machine.current_key(), Some(&1));
        assert_eq!(machine.pending_key(), Some(&3));

        machine.tick();

        assert_eq!(drain(&log), vec!["1.exit", "3.enter", "3.update"]);
    }

    #[test]
    fn request_from_update_waits_for_next_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();
        let mut first = Scripted::new(1, &log);
        first.request_on_update = Some(2);
        machine.register(first);
        machine.register(Scripted::new(2, &log));

        machine.request_transition(1);
        machine.tick();
        assert_eq!(machine.current_key(), Some(&1));

        machine.tick();
        assert_eq!(machine.current_key(), Some(&2));
        assert_eq!(
            drain(&log),
            vec!["1.enter", "1.update", "1.exit", "2.enter", "2.update"]
        );
    }

    #[test]
    fn request_from_exit_redirects_current_transition() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();
        let mut first = Scripted::new(1, &log);
        first.request_on_exit = Some(3);
        machine.register(first);
        machine.register(Scripted::new(2, &log));
        machine.register(Scripted::new(3, &log));

        machine.request_transition(1);
        machine.tick();
        drain(&log);
        machine.request_transition(2);
        machine.tick();

        assert_eq!(drain(&log), vec!["1.exit", "3.enter", "3.update"]);
        assert_eq!(machine.current_key(), Some(&3));
        assert_eq!(machine.pending_key(), None);
        assert_eq!(machine.history().get_path(), vec![&1, &3]);
    }

    #[test]
    fn len_and_is_empty_agree_across_register_and_reset() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();
        assert!(machine.is_empty());
        assert_eq!(machine.len(), 0);

        machine.register(Scripted::new(1, &log));
        machine.register(Scripted::new(1, &log));
        assert!(!machine.is_empty());
        assert_eq!(machine.len(), 1);

        machine.reset();
        assert!(machine.is_empty());
        assert_eq!(machine.len(), 0);
    }

    #[test]
    fn reset_clears_everything_without_exit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);
        machine.request_transition(1);
        machine.tick();
        machine.request_transition(2);
        drain(&log);

        machine.reset();

        assert!(drain(&log).is_empty());
        assert!(machine.is_empty());
        assert_eq!(machine.phase(), Phase::Uninitialized);
        assert!(machine.current_key().is_none());
        assert!(machine.pending_key().is_none());
        assert!(machine.history().is_empty());
        assert_eq!(machine.ticks(), 0);
    }

    #[test]
    fn reset_machine_behaves_like_new() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);
        machine.request_transition(1);
        machine.tick();
        machine.reset();
        drain(&log);

        machine.register(Scripted::new(2, &log));
        machine.request_transition(1);
        assert!(machine.pending_key().is_none());

        machine.request_transition(2);
        machine.tick();

        assert_eq!(drain(&log), vec!["2.enter", "2.update"]);
        assert_eq!(machine.history().get_path(), vec![&2]);
    }

    #[test]
    fn history_records_applied_transitions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[1, 2], &log);

        machine.request_transition(1);
        machine.tick();
        machine.tick();
        machine.request_transition(2);
        machine.tick();

        let records: Vec<_> = machine.history().transitions().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].from, None);
        assert_eq!(records[0].to, 1);
        assert_eq!(records[0].tick, 0);
        assert_eq!(records[1].from, Some(1));
        assert_eq!(records[1].to, 2);
        assert_eq!(records[1].tick, 2);
    }

    #[test]
    fn config_sets_name_and_history_capacity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let config = MachineConfig::default()
            .with_name("guard")
            .with_history_capacity(0);
        let mut machine = StateMachine::with_config(config);
        machine.register(Scripted::new(1, &log));

        machine.request_transition(1);
        machine.tick();

        assert_eq!(machine.name(), Some("guard"));
        assert_eq!(machine.history().capacity(), 0);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn keys_follow_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let machine = machine_with(&[5, 1, 3], &log);

        assert_eq!(machine.keys().copied().collect::<Vec<_>>(), vec![5, 1, 3]);
        assert!(machine.contains(&3));
        assert!(!machine.contains(&4));
    }

    #[test]
    fn register_boxed_accepts_trait_objects() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut machine: StateMachine<u32> = StateMachine::new();
        let states: Vec<Box<dyn State<u32>>> =
            vec![Box::new(Scripted::new(1, &log)), Box::new(Scripted::new(2, &log))];

        for state in states {
            machine.register_boxed(state);
        }

        assert_eq!(machine.len(), 2);
    }

    #[test]
    fn debug_output_lists_keys() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let machine = machine_with(&[1, 2], &log);
        let rendered = format!("{machine:?}");
        assert!(rendered.contains("StateMachine"));
        assert!(rendered.contains("keys: [1, 2]"));
    }
}

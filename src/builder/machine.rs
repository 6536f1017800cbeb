//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::State;
use crate::runtime::StateMachine;
use std::fmt::Debug;
use std::hash::Hash;

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::register`], the builder reports duplicate keys
/// and an unknown initial state as errors.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Context, State, StateMachineBuilder};
///
/// struct Menu(&'static str);
///
/// impl State<&'static str> for Menu {
///     fn id(&self) -> &'static str {
///         self.0
///     }
///
///     fn on_update(&mut self, _ctx: &mut Context<'_, &'static str>) {}
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .name("main-menu")
///     .state(Menu("title"))
///     .state(Menu("options"))
///     .initial("title")
///     .build()
///     .unwrap();
///
/// machine.tick();
/// assert_eq!(machine.current_key(), Some(&"title"));
/// ```
pub struct StateMachineBuilder<K> {
    config: MachineConfig,
    states: Vec<Box<dyn State<K>>>,
    initial: Option<K>,
}

impl<K: Eq + Hash + Clone + Debug> StateMachineBuilder<K> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            states: Vec::new(),
            initial: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Add a state.
    pub fn state<S>(self, state: S) -> Self
    where
        S: State<K> + 'static,
    {
        self.boxed_state(Box::new(state))
    }

    /// Add an already boxed state.
    pub fn boxed_state(mut self, state: Box<dyn State<K>>) -> Self {
        self.states.push(state);
        self
    }

    /// Set the state entered on the first tick (optional).
    pub fn initial(mut self, key: K) -> Self {
        self.initial = Some(key);
        self
    }

    /// Build the state machine.
    ///
    /// When an initial state was given it is left pending, so its `on_enter`
    /// runs on the machine's first tick.
    pub fn build(self) -> Result<StateMachine<K>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::with_config(self.config);
        for state in self.states {
            let key = state.id();
            if machine.contains(&key) {
                return Err(BuildError::DuplicateState(format!("{key:?}")));
            }
            machine.register_boxed(state);
        }

        if let Some(initial) = self.initial {
            if !machine.contains(&initial) {
                return Err(BuildError::UnknownInitialState(format!("{initial:?}")));
            }
            machine.request_transition(initial);
        }

        Ok(machine)
    }
}

impl<K: Eq + Hash + Clone + Debug> Default for StateMachineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

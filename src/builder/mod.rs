//! Convenience layer for constructing state machines.
//!
//! The free functions here mirror a factory API for hosts that pass machines
//! and states around as optional references. They validate their arguments
//! and fail loudly on absent ones, then delegate to the machine, which keeps
//! its own silent-no-op policy for everything else.

pub mod error;
pub mod machine;

pub use error::{BuildError, FactoryError};
pub use machine::StateMachineBuilder;

use crate::core::State;
use crate::runtime::StateMachine;
use std::fmt::Debug;
use std::hash::Hash;

/// Create an empty machine.
///
/// # Example
///
/// ```
/// use tickfsm::builder::create_machine;
///
/// let machine = create_machine::<u32>();
/// assert!(machine.is_empty());
/// ```
pub fn create_machine<K>() -> StateMachine<K>
where
    K: Eq + Hash + Clone + Debug,
{
    StateMachine::new()
}

/// Register `state` on `machine`.
///
/// Returns [`FactoryError::InvalidArgument`] when either argument is absent.
/// A duplicate key is not an error: the machine ignores it.
///
/// # Example
///
/// ```
/// use tickfsm::builder::{add_state, create_machine, FactoryError};
/// use tickfsm::{Context, State};
///
/// struct Idle;
///
/// impl State<u32> for Idle {
///     fn id(&self) -> u32 {
///         0
///     }
///
///     fn on_update(&mut self, _ctx: &mut Context<'_, u32>) {}
/// }
///
/// let mut machine = create_machine::<u32>();
/// assert!(add_state(Some(&mut machine), Some(Idle)).is_ok());
/// assert_eq!(
///     add_state(Some(&mut machine), None::<Idle>),
///     Err(FactoryError::InvalidArgument("machine or state cannot be absent")),
/// );
/// ```
pub fn add_state<K, S>(
    machine: Option<&mut StateMachine<K>>,
    state: Option<S>,
) -> Result<(), FactoryError>
where
    K: Eq + Hash + Clone + Debug,
    S: State<K> + 'static,
{
    match (machine, state) {
        (Some(machine), Some(state)) => {
            machine.register(state);
            Ok(())
        }
        _ => Err(FactoryError::InvalidArgument(
            "machine or state cannot be absent",
        )),
    }
}

/// Request the first transition of `machine`.
///
/// Returns [`FactoryError::InvalidArgument`] when `machine` is absent. An
/// unregistered key is not an error: the machine ignores it.
pub fn set_initial_state<K>(
    machine: Option<&mut StateMachine<K>>,
    initial: K,
) -> Result<(), FactoryError>
where
    K: Eq + Hash + Clone + Debug,
{
    let machine = machine.ok_or(FactoryError::InvalidArgument("machine cannot be absent"))?;
    machine.request_transition(initial);
    Ok(())
}

//! Core State trait for state machine states.
//!
//! A state is a unit of behavior registered under a unique key. The machine
//! drives it through three lifecycle hooks: enter, update and exit.

use super::context::Context;

/// Trait for state machine states.
///
/// `K` is the key type the state is registered under. The key returned by
/// [`State::id`] must be stable for the lifetime of the state; the machine
/// reads it once at registration and never re-validates it.
///
/// Hooks receive a [`Context`] so a state can schedule the next transition
/// from inside its own lifecycle. Requests made this way are deferred to the
/// following tick.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Context, State};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// struct Opening {
///     frames: u32,
/// }
///
/// impl State<Door> for Opening {
///     fn id(&self) -> Door {
///         Door::Open
///     }
///
///     fn on_enter(&mut self, _ctx: &mut Context<'_, Door>) {
///         self.frames = 0;
///     }
///
///     fn on_update(&mut self, ctx: &mut Context<'_, Door>) {
///         self.frames += 1;
///         if self.frames > 30 {
///             ctx.request_transition(Door::Closed);
///         }
///     }
/// }
/// ```
pub trait State<K> {
    /// Key this state is registered under.
    fn id(&self) -> K;

    /// Called once each time the state becomes active.
    ///
    /// Default implementation does nothing.
    fn on_enter(&mut self, ctx: &mut Context<'_, K>) {
        let _ = ctx;
    }

    /// Called once per tick while the state is active, including the tick
    /// on which it was entered.
    fn on_update(&mut self, ctx: &mut Context<'_, K>);

    /// Called once each time the state is superseded by a transition.
    ///
    /// Not called by [`StateMachine::reset`](crate::StateMachine::reset).
    /// Default implementation does nothing.
    fn on_exit(&mut self, ctx: &mut Context<'_, K>) {
        let _ = ctx;
    }
}

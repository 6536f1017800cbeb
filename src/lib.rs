//! Tickfsm: a minimal tick-driven finite state machine
//!
//! Tickfsm holds a set of keyed states, keeps exactly one of them active, and
//! moves between them when asked. Transitions are deferred: a request only
//! records which state should come next, and the host's per-cycle call to
//! [`StateMachine::tick`] applies it.
//!
//! # Core Concepts
//!
//! - **State**: host-defined behavior behind the `State` trait, with
//!   `on_enter`, `on_update` and `on_exit` hooks
//! - **Tick**: one cycle; applies at most one pending transition, then
//!   updates the active state
//! - **Context**: lets a hook request the next transition without touching
//!   the machine directly
//! - **History**: bounded log of applied transitions
//!
//! Invalid input is absorbed rather than reported: registering a key twice
//! keeps the first state, and requesting an unregistered key does nothing.
//! The [`builder`] module offers stricter entry points for callers who want
//! errors instead.
//!
//! # Example
//!
//! ```rust
//! use tickfsm::{Context, State, StateMachine};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Enemy {
//!     Patrol,
//!     Chase,
//! }
//!
//! struct Patrol {
//!     steps: u32,
//! }
//!
//! impl State<Enemy> for Patrol {
//!     fn id(&self) -> Enemy {
//!         Enemy::Patrol
//!     }
//!
//!     fn on_update(&mut self, ctx: &mut Context<'_, Enemy>) {
//!         self.steps += 1;
//!         if self.steps == 2 {
//!             ctx.request_transition(Enemy::Chase);
//!         }
//!     }
//! }
//!
//! struct Chase;
//!
//! impl State<Enemy> for Chase {
//!     fn id(&self) -> Enemy {
//!         Enemy::Chase
//!     }
//!
//!     fn on_update(&mut self, _ctx: &mut Context<'_, Enemy>) {}
//! }
//!
//! let mut machine: StateMachine<Enemy> = StateMachine::new();
//! machine.register(Patrol { steps: 0 });
//! machine.register(Chase);
//! machine.request_transition(Enemy::Patrol);
//!
//! machine.tick();
//! machine.tick();
//! assert_eq!(machine.current_key(), Some(&Enemy::Patrol));
//!
//! machine.tick();
//! assert_eq!(machine.current_key(), Some(&Enemy::Chase));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod runtime;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, FactoryError, StateMachineBuilder};
pub use config::{ConfigError, MachineConfig};
pub use self::core::{Context, State, TransitionHistory, TransitionRecord};
pub use runtime::{Phase, StateMachine};
pub use snapshot::{MachineSnapshot, SnapshotError};

//! The state machine engine.
//!
//! [`StateMachine`] owns registered states and drives their lifecycle one
//! tick at a time. Everything here is synchronous and single-threaded: the
//! host calls `tick` from its own loop.

mod machine;

pub use machine::{Phase, StateMachine};

//! Core state machine types.
//!
//! This module contains the building blocks the machine is assembled from:
//! - The `State` trait implemented by host-supplied states
//! - The `Context` handed to lifecycle hooks
//! - Bounded transition history

mod context;
mod history;
pub(crate) mod registry;
mod state;

pub use context::Context;
pub use history::{TransitionHistory, TransitionRecord};
pub use state::State;

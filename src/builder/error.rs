//! Errors raised by the convenience layer.
//!
//! The machine itself never fails; these errors exist only for callers who
//! want misuse reported instead of silently absorbed.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states registered. Call .state(..) before .build()")]
    NoStates,

    #[error("State {0} registered more than once")]
    DuplicateState(String),

    #[error("Initial state {0} is not registered")]
    UnknownInitialState(String),
}

/// Errors returned by the factory helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

//! Build errors for machines and transitions.

use crate::core::symbol::Symbol;
use crate::core::transition::TransitionKey;
use thiserror::Error;

/// Errors that can occur when defining transitions or constructing a machine.
///
/// All of them are fatal: no partially built machine is ever returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("{field} must be a non-empty name or an enumeration variant")]
    InvalidSymbol { field: &'static str },

    #[error("probability must be within (0, 1], got {probability}")]
    InvalidProbability { probability: f64 },

    #[error("total probability for '{event}' from '{state}' is {total}, must be <= 1.0")]
    ProbabilityOverflow {
        state: Symbol,
        event: Symbol,
        total: f64,
    },

    #[error("transition {0} is declared more than once")]
    DuplicateTransition(TransitionKey),
}

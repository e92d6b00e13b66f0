//! Core value types of the state machine.
//!
//! This module contains the data the engine works with:
//! - Symbolic identifiers for states and events via [`Symbol`]
//! - Weighted transition rules via [`Transition`]
//! - The per-(state, event) rule index and weighted selection

mod error;
pub mod index;
mod symbol;
mod transition;

pub use error::BuildError;
pub use index::RuleIndex;
pub use symbol::{Enumeration, RawValue, Symbol};
pub use transition::{HookError, Transition, TransitionHook, TransitionKey};

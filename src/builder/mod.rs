//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for defining rules and
//! machines with minimal boilerplate while keeping all validation in one
//! place.

pub mod machine;
pub mod macros;
pub mod transition;

pub use crate::core::BuildError;
pub use machine::FsmBuilder;
pub use transition::TransitionBuilder;

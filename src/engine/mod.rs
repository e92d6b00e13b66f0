//! The running machine and its hooks.
//!
//! # Key Concepts
//!
//! - **Fsm**: Owns the rules and the current/previous/next state, resolves
//!   events and commits transitions
//! - **Event hooks**: Run before a commit and may cancel the event
//! - **Transition hooks**: Run after a specific rule has committed
//!
//! # Event resolution
//!
//! 1. Look up the candidates for `(current, event)`.
//! 2. One candidate is selected outright; several are drawn by cumulative
//!    probability, and a draw past the declared total selects nothing.
//! 3. Every event hook for the event runs; any [`Verdict::Cancel`] aborts.
//! 4. The selected transition commits, then its hooks run.
//!
//! There is no rollback: a failing transition hook leaves the machine in the
//! new state.

mod error;
mod hooks;
mod machine;

pub use error::FsmError;
pub use crate::core::{HookError, TransitionHook};
pub use hooks::{event_hook, transition_hook, EventHook, EventHooks, Verdict};
pub use machine::{Fsm, Machine};

//! Runtime errors raised by a constructed machine.

use crate::core::{HookError, Symbol, TransitionKey};
use thiserror::Error;

/// Errors that can occur while driving a machine or managing its hooks.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("transition {0} is not part of this machine's rules")]
    UnknownTransition(TransitionKey),

    #[error("event hook for '{event}' failed: {source}")]
    EventHook {
        event: Symbol,
        #[source]
        source: HookError,
    },

    /// The machine had already committed the transition when this was raised.
    #[error("hook on transition {transition} failed: {source}")]
    TransitionHook {
        transition: TransitionKey,
        #[source]
        source: HookError,
    },
}

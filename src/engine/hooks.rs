//! Hook types and the event-keyed hook registry.
//!
//! Two kinds of callbacks exist:
//!
//! - **Event hooks** run before a resolved transition commits and may veto it
//!   by returning [`Verdict::Cancel`].
//! - **Transition hooks** run after a specific rule has committed and only
//!   observe the machine.
//!
//! Hooks are shared `Arc` closures. Removal matches by pointer identity, so
//! keep a clone of the `Arc` you registered if you intend to remove it later.

use crate::core::{HookError, Symbol, Transition, TransitionHook};
use crate::engine::machine::Fsm;
use std::collections::HashMap;
use std::sync::Arc;

/// Pre-commit callback with veto power over an event.
pub type EventHook<D> =
    Arc<dyn Fn(&Symbol, &Fsm<D>, &D) -> Result<Verdict, HookError> + Send + Sync>;

/// Outcome of an event hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Proceed,
    Cancel,
}

impl Verdict {
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// Only an explicit `false` cancels.
impl From<bool> for Verdict {
    fn from(allow: bool) -> Self {
        if allow {
            Self::Proceed
        } else {
            Self::Cancel
        }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(answer: Option<bool>) -> Self {
        answer.map_or(Self::Proceed, Self::from)
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Self::Proceed
    }
}

/// Wrap a closure as a [`TransitionHook`].
///
/// # Example
///
/// ```rust
/// use flying_fsm::core::Transition;
/// use flying_fsm::engine::transition_hook;
///
/// let mut rule: Transition = Transition::new("idle", "go", "busy").unwrap();
/// rule.add_hook(transition_hook(|tn, _| {
///     println!("entered {}", tn.to_state());
///     Ok(())
/// }));
/// rule.trigger(&()).unwrap();
/// ```
pub fn transition_hook<D, F>(hook: F) -> TransitionHook<D>
where
    F: Fn(&Transition<D>, &D) -> Result<(), HookError> + Send + Sync + 'static,
{
    Arc::new(hook)
}

/// Wrap a closure as an [`EventHook`].
pub fn event_hook<D, F>(hook: F) -> EventHook<D>
where
    F: Fn(&Symbol, &Fsm<D>, &D) -> Result<Verdict, HookError> + Send + Sync + 'static,
{
    Arc::new(hook)
}

/// Event hooks keyed by event, in registration order.
pub struct EventHooks<D> {
    hooks: HashMap<Symbol, Vec<EventHook<D>>>,
}

impl<D> EventHooks<D> {
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    pub fn add(&mut self, event: Symbol, hook: EventHook<D>) {
        self.hooks.entry(event).or_default().push(hook);
    }

    /// Remove one registration of `hook` for `event`. Absent hooks are ignored.
    pub fn remove(&mut self, event: &Symbol, hook: &EventHook<D>) {
        let Some(hooks) = self.hooks.get_mut(event) else {
            return;
        };
        if let Some(position) = hooks.iter().position(|h| Arc::ptr_eq(h, hook)) {
            hooks.remove(position);
        }
        if hooks.is_empty() {
            self.hooks.remove(event);
        }
    }

    pub fn for_event(&self, event: &Symbol) -> &[EventHook<D>] {
        self.hooks.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<D> Default for EventHooks<D> {
    fn default() -> Self {
        Self::new()
    }
}

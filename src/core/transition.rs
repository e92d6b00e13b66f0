//! Weighted transition rules.

use crate::core::error::BuildError;
use crate::core::symbol::Symbol;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Error raised by a hook. The engine never intercepts it.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Observation callback fired after its transition commits.
pub type TransitionHook<D> =
    Arc<dyn Fn(&Transition<D>, &D) -> Result<(), HookError> + Send + Sync>;

/// Identity of a transition: origin, event and destination.
///
/// Probability and hooks are not part of it, so a rule declared once
/// can be found again by rebuilding its key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    pub from_state: Symbol,
    pub on_event: Symbol,
    pub to_state: Symbol,
}

impl TransitionKey {
    pub fn new(
        from_state: impl Into<Symbol>,
        on_event: impl Into<Symbol>,
        to_state: impl Into<Symbol>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            on_event: on_event.into(),
            to_state: to_state.into(),
        }
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.from_state, self.on_event, self.to_state)
    }
}

/// A rule moving the machine from one state to another on an event.
///
/// Equality and hashing only look at the [`TransitionKey`]. Two transitions
/// with the same triple are the same rule even if their probability or hooks
/// differ.
///
/// # Example
///
/// ```rust
/// use flying_fsm::core::Transition;
///
/// let rule: Transition = Transition::new("waiting", "start", "going").unwrap();
/// let weighted: Transition = Transition::weighted("waiting", "start", "going", 0.5).unwrap();
/// assert_eq!(rule, weighted);
/// ```
pub struct Transition<D = ()> {
    key: TransitionKey,
    probability: f64,
    hooks: Vec<TransitionHook<D>>,
}

impl<D> Transition<D> {
    /// Create a transition that always fires (probability 1.0).
    pub fn new(
        from_state: impl Into<Symbol>,
        on_event: impl Into<Symbol>,
        to_state: impl Into<Symbol>,
    ) -> Result<Self, BuildError> {
        Self::weighted(from_state, on_event, to_state, 1.0)
    }

    /// Create a transition selected with the given probability.
    pub fn weighted(
        from_state: impl Into<Symbol>,
        on_event: impl Into<Symbol>,
        to_state: impl Into<Symbol>,
        probability: f64,
    ) -> Result<Self, BuildError> {
        let key = TransitionKey::new(from_state, on_event, to_state);
        if !key.from_state.is_valid() {
            return Err(BuildError::InvalidSymbol { field: "from_state" });
        }
        if !key.to_state.is_valid() {
            return Err(BuildError::InvalidSymbol { field: "to_state" });
        }
        if !key.on_event.is_valid() {
            return Err(BuildError::InvalidSymbol { field: "on_event" });
        }
        if !(probability.is_finite() && probability > 0.0 && probability <= 1.0) {
            return Err(BuildError::InvalidProbability { probability });
        }

        Ok(Self {
            key,
            probability,
            hooks: Vec::new(),
        })
    }

    /// Attach an initial hook while defining the rule.
    pub fn with_hook(mut self, hook: TransitionHook<D>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// One transition per origin state, all driven by `event` to `to_state`.
    pub fn from_any<I>(
        states: I,
        on_event: impl Into<Symbol>,
        to_state: impl Into<Symbol>,
        probability: f64,
    ) -> Result<Vec<Self>, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let on_event = on_event.into();
        let to_state = to_state.into();
        states
            .into_iter()
            .map(|state| Self::weighted(state, on_event.clone(), to_state.clone(), probability))
            .collect()
    }

    /// One transition per destination, splitting `total_probability` evenly.
    pub fn to_any<I>(
        from_state: impl Into<Symbol>,
        on_event: impl Into<Symbol>,
        states: I,
        total_probability: f64,
    ) -> Result<Vec<Self>, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let states: Vec<Symbol> = states.into_iter().map(Into::into).collect();
        if states.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let probability = total_probability / states.len() as f64;
        let from_state = from_state.into();
        let on_event = on_event.into();
        states
            .into_iter()
            .map(|state| Self::weighted(from_state.clone(), on_event.clone(), state, probability))
            .collect()
    }

    pub fn key(&self) -> &TransitionKey {
        &self.key
    }

    pub fn from_state(&self) -> &Symbol {
        &self.key.from_state
    }

    pub fn to_state(&self) -> &Symbol {
        &self.key.to_state
    }

    pub fn on_event(&self) -> &Symbol {
        &self.key.on_event
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Append a hook fired after this transition commits.
    pub fn add_hook(&mut self, hook: TransitionHook<D>) {
        self.hooks.push(hook);
    }

    /// Remove a previously added hook. Absent hooks are ignored.
    pub fn remove_hook(&mut self, hook: &TransitionHook<D>) {
        if let Some(position) = self.hooks.iter().position(|h| Arc::ptr_eq(h, hook)) {
            self.hooks.remove(position);
        }
    }

    /// Run every hook in insertion order.
    ///
    /// The first failing hook stops the run and its error is returned as is.
    pub fn trigger(&self, data: &D) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook(self, data)?;
        }
        Ok(())
    }
}

impl<D> Clone for Transition<D> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            probability: self.probability,
            hooks: self.hooks.clone(),
        }
    }
}

impl<D> PartialEq for Transition<D> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<D> Eq for Transition<D> {}

impl<D> Hash for Transition<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<D> fmt::Debug for Transition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from_state", &self.key.from_state)
            .field("on_event", &self.key.on_event)
            .field("to_state", &self.key.to_state)
            .field("probability", &self.probability)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

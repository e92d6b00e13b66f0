//! Builder for constructing transitions.

use crate::core::{BuildError, Symbol, Transition, TransitionHook};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<D = ()> {
    from: Option<Symbol>,
    on: Option<Symbol>,
    to: Option<Symbol>,
    probability: f64,
    hooks: Vec<TransitionHook<D>>,
}

impl<D> TransitionBuilder<D> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            on: None,
            to: None,
            probability: 1.0,
            hooks: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<Symbol>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: impl Into<Symbol>) -> Self {
        self.on = Some(event.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<Symbol>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the selection probability (defaults to 1.0).
    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Attach a hook fired after the transition commits.
    pub fn hook(mut self, hook: TransitionHook<D>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<D>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let on = self.on.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        let transition = Transition::weighted(from, on, to, self.probability)?;
        Ok(self
            .hooks
            .into_iter()
            .fold(transition, |transition, hook| transition.with_hook(hook)))
    }
}

impl<D> Default for TransitionBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

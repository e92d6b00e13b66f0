//! Builder for constructing state machines.

use crate::builder::transition::TransitionBuilder;
use crate::core::{BuildError, Symbol, Transition};
use crate::engine::{EventHook, Fsm};

/// Builder for constructing state machines with a fluent API.
pub struct FsmBuilder<D = ()> {
    initial: Option<Symbol>,
    transitions: Vec<Transition<D>>,
    event_hooks: Vec<(Symbol, EventHook<D>)>,
    seed: Option<u64>,
}

impl<D> FsmBuilder<D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            event_hooks: Vec::new(),
            seed: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<Symbol>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<D>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<D>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, e.g. the output of
    /// [`Transition::from_any`] or [`Transition::to_any`].
    pub fn transitions(mut self, transitions: Vec<Transition<D>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Register an event hook on the built machine.
    pub fn event_hook(mut self, event: impl Into<Symbol>, hook: EventHook<D>) -> Self {
        self.event_hooks.push((event.into(), hook));
        self
    }

    /// Seed the random source used for weighted transitions.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the rules are invalid.
    pub fn build(self) -> Result<Fsm<D>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = Fsm::new(self.transitions, initial)?;
        for (event, hook) in self.event_hooks {
            machine.add_event_hook(event, hook);
        }
        if let Some(seed) = self.seed {
            machine.reseed(seed);
        }

        Ok(machine)
    }
}

impl<D> Default for FsmBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

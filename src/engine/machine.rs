//! The state machine engine.

use crate::core::index::{self, RuleIndex};
use crate::core::{BuildError, Symbol, Transition, TransitionHook, TransitionKey};
use crate::engine::error::FsmError;
use crate::engine::hooks::{EventHook, EventHooks};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A concrete machine definition.
///
/// Implementors describe their rule set and starting state once; [`build`]
/// runs the shared construction path (validation and indexing).
///
/// [`build`]: Machine::build
pub trait Machine {
    /// Payload passed to hooks on every event.
    type Data;

    fn rules() -> Result<Vec<Transition<Self::Data>>, BuildError>;

    fn initial_state() -> Symbol;

    fn build() -> Result<Fsm<Self::Data>, BuildError> {
        Fsm::new(Self::rules()?, Self::initial_state())
    }
}

/// Finite state machine with weighted transitions and hooks.
///
/// `D` is the payload handed to hooks along with each event.
///
/// # Example
///
/// ```rust
/// use flying_fsm::core::Transition;
/// use flying_fsm::engine::Fsm;
///
/// let rules = vec![
///     Transition::new("waiting", "start", "going").unwrap(),
///     Transition::new("going", "stop", "waiting").unwrap(),
/// ];
/// let mut fsm: Fsm = Fsm::new(rules, "waiting").unwrap();
///
/// assert!(fsm.can("start"));
/// assert_eq!(fsm.input("start").unwrap().to_string(), "going");
/// assert_eq!(fsm.previous().map(ToString::to_string).as_deref(), Some("waiting"));
/// ```
pub struct Fsm<D = ()> {
    rules: Vec<Transition<D>>,
    positions: HashMap<TransitionKey, usize>,
    index: RuleIndex,
    initial_state: Symbol,
    current: Symbol,
    previous: Option<Symbol>,
    next: Option<Symbol>,
    event_hooks: EventHooks<D>,
    rng: StdRng,
}

impl<D> Fsm<D> {
    /// Validate and index `rules`, starting in `initial_state`.
    ///
    /// Fails if the rules are empty, declare the same (origin, event,
    /// destination) twice, or give some (origin, event) pair a total
    /// probability above 1.0, or if the initial state is not a valid symbol.
    pub fn new<I>(rules: I, initial_state: impl Into<Symbol>) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Transition<D>>,
    {
        let rules: Vec<Transition<D>> = rules.into_iter().collect();
        if rules.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut positions = HashMap::with_capacity(rules.len());
        for (position, rule) in rules.iter().enumerate() {
            if positions.insert(rule.key().clone(), position).is_some() {
                return Err(BuildError::DuplicateTransition(rule.key().clone()));
            }
        }

        let index = RuleIndex::build(&rules)?;

        let initial_state = initial_state.into();
        if !initial_state.is_valid() {
            return Err(BuildError::InvalidSymbol {
                field: "initial_state",
            });
        }

        debug!(
            rules = rules.len(),
            states = index.state_count(),
            initial = %initial_state,
            "state machine constructed"
        );

        Ok(Self {
            rules,
            positions,
            index,
            current: initial_state.clone(),
            initial_state,
            previous: None,
            next: None,
            event_hooks: EventHooks::new(),
            rng: StdRng::from_entropy(),
        })
    }

    pub fn initial_state(&self) -> &Symbol {
        &self.initial_state
    }

    pub fn current(&self) -> &Symbol {
        &self.current
    }

    /// State before the most recent committed transition.
    pub fn previous(&self) -> Option<&Symbol> {
        self.previous.as_ref()
    }

    /// Tentative destination while an event is being resolved.
    ///
    /// Only set while event hooks run; cleared once the event commits or
    /// is cancelled.
    pub fn next(&self) -> Option<&Symbol> {
        self.next.as_ref()
    }

    pub fn rules(&self) -> &[Transition<D>] {
        &self.rules
    }

    /// Look up a rule by its identity triple.
    pub fn transition(&self, key: &TransitionKey) -> Option<&Transition<D>> {
        self.positions.get(key).map(|&position| &self.rules[position])
    }

    /// Events with at least one rule leaving the current state.
    pub fn available_events(&self) -> impl Iterator<Item = &Symbol> {
        self.index.events_from(&self.current)
    }

    /// Replace the random source with a seeded one for reproducible draws.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Candidate transitions for `event` from the current state.
    pub fn would(&self, event: impl Into<Symbol>) -> Vec<&Transition<D>> {
        let event = event.into();
        self.index
            .candidates(&self.current, &event)
            .iter()
            .map(|&position| &self.rules[position])
            .collect()
    }

    /// Whether any transition is declared for `event` from the current state.
    pub fn can(&self, event: impl Into<Symbol>) -> bool {
        let event = event.into();
        !self.index.candidates(&self.current, &event).is_empty()
    }

    /// Process `event`, handing `data` to every hook. Returns the resulting
    /// current state.
    ///
    /// An event with no matching rule leaves the machine untouched. Event
    /// hooks run before the commit and any of them can cancel it; the
    /// selected transition's hooks run after `current` has moved.
    pub fn input_with(&mut self, event: impl Into<Symbol>, data: &D) -> Result<Symbol, FsmError> {
        let event = event.into();
        let selected = self.resolve(&event);
        self.next = selected.map(|position| self.rules[position].to_state().clone());

        let mut cancelled = false;
        let mut failure = None;
        for hook in self.event_hooks.for_event(&event) {
            match hook(&event, &*self, data) {
                Ok(verdict) => cancelled |= verdict.is_cancel(),
                Err(source) => {
                    failure = Some(source);
                    break;
                }
            }
        }
        if let Some(source) = failure {
            self.next = None;
            return Err(FsmError::EventHook { event, source });
        }

        if cancelled {
            debug!(state = %self.current, event = %event, "event cancelled by hook");
            self.next = None;
            return Ok(self.current.clone());
        }

        let Some(position) = selected else {
            return Ok(self.current.clone());
        };

        self.next = None;
        let destination = self.rules[position].to_state().clone();
        let origin = std::mem::replace(&mut self.current, destination);
        debug!(from = %origin, event = %event, to = %self.current, "transition committed");
        self.previous = Some(origin);

        let rule = &self.rules[position];
        rule.trigger(data)
            .map_err(|source| FsmError::TransitionHook {
                transition: rule.key().clone(),
                source,
            })?;

        Ok(self.current.clone())
    }

    /// Pick the rule that fires for `event`, drawing at random when several
    /// candidates compete.
    fn resolve(&mut self, event: &Symbol) -> Option<usize> {
        let candidates = self.index.candidates(&self.current, event);
        match candidates {
            [] => {
                trace!(state = %self.current, event = %event, "no transition declared");
                None
            }
            [only] => Some(*only),
            many => {
                let draw: f64 = self.rng.gen();
                let rules = &self.rules;
                let picked = index::select(many.iter().map(|&p| rules[p].probability()), draw)
                    .map(|i| many[i]);
                match picked {
                    Some(position) => trace!(
                        draw,
                        candidates = many.len(),
                        to = %rules[position].to_state(),
                        "weighted transition drawn"
                    ),
                    None => debug!(
                        draw,
                        state = %self.current,
                        event = %event,
                        "draw fell outside declared probabilities; no transition selected"
                    ),
                }
                picked
            }
        }
    }

    pub fn add_event_hook(&mut self, event: impl Into<Symbol>, hook: EventHook<D>) {
        self.event_hooks.add(event.into(), hook);
    }

    pub fn remove_event_hook(&mut self, event: impl Into<Symbol>, hook: &EventHook<D>) {
        self.event_hooks.remove(&event.into(), hook);
    }

    /// Attach a hook to the rule identified by `key`.
    pub fn add_transition_hook(
        &mut self,
        key: &TransitionKey,
        hook: TransitionHook<D>,
    ) -> Result<(), FsmError> {
        self.rule_mut(key)?.add_hook(hook);
        Ok(())
    }

    pub fn remove_transition_hook(
        &mut self,
        key: &TransitionKey,
        hook: &TransitionHook<D>,
    ) -> Result<(), FsmError> {
        self.rule_mut(key)?.remove_hook(hook);
        Ok(())
    }

    fn rule_mut(&mut self, key: &TransitionKey) -> Result<&mut Transition<D>, FsmError> {
        let position = *self
            .positions
            .get(key)
            .ok_or_else(|| FsmError::UnknownTransition(key.clone()))?;
        Ok(&mut self.rules[position])
    }

    /// Overwrite the runtime state, used when restoring from a checkpoint.
    pub(crate) fn set_runtime(
        &mut self,
        initial_state: Symbol,
        current: Symbol,
        previous: Option<Symbol>,
        next: Option<Symbol>,
    ) {
        self.initial_state = initial_state;
        self.current = current;
        self.previous = previous;
        self.next = next;
    }
}

impl<D: Default> Fsm<D> {
    /// Process `event` with a default payload.
    pub fn input(&mut self, event: impl Into<Symbol>) -> Result<Symbol, FsmError> {
        self.input_with(event, &D::default())
    }
}

impl<D> fmt::Debug for Fsm<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("initial_state", &self.initial_state)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

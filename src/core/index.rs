//! Rule index: origin state → event → candidate transitions.

use crate::core::error::BuildError;
use crate::core::symbol::Symbol;
use crate::core::transition::Transition;
use std::collections::HashMap;

/// Largest total accepted for `count` candidates of one (origin, event) pair.
///
/// Allows one ULP of rounding per summed term, so even `to_any` splits such as
/// nine branches of `1/9` (which add up to a hair above `1.0`) are accepted.
pub fn probability_ceiling(count: usize) -> f64 {
    1.0 + count as f64 * f64::EPSILON
}

/// Candidate lookup built once from a rule set.
///
/// Candidates are stored as positions into the rule slice the index was built
/// from, in declaration order. The index never changes after construction.
#[derive(Clone, Debug, Default)]
pub struct RuleIndex {
    by_state: HashMap<Symbol, HashMap<Symbol, Vec<usize>>>,
}

impl RuleIndex {
    /// Index `rules` and check that no (origin, event) pair declares more
    /// than a total probability of 1.0.
    pub fn build<D>(rules: &[Transition<D>]) -> Result<Self, BuildError> {
        let mut by_state: HashMap<Symbol, HashMap<Symbol, Vec<usize>>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            by_state
                .entry(rule.from_state().clone())
                .or_default()
                .entry(rule.on_event().clone())
                .or_default()
                .push(position);
        }

        for (state, events) in &by_state {
            for (event, positions) in events {
                let total: f64 = positions.iter().map(|&p| rules[p].probability()).sum();
                if total > probability_ceiling(positions.len()) {
                    return Err(BuildError::ProbabilityOverflow {
                        state: state.clone(),
                        event: event.clone(),
                        total,
                    });
                }
            }
        }

        Ok(Self { by_state })
    }

    /// Positions of the rules registered for `(state, event)`, empty if none.
    pub fn candidates(&self, state: &Symbol, event: &Symbol) -> &[usize] {
        self.by_state
            .get(state)
            .and_then(|events| events.get(event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Events that have at least one rule leaving `state`.
    pub fn events_from(&self, state: &Symbol) -> impl Iterator<Item = &Symbol> {
        self.by_state.get(state).into_iter().flat_map(|events| events.keys())
    }

    /// Number of distinct origin states.
    pub fn state_count(&self) -> usize {
        self.by_state.len()
    }
}

/// Pick a candidate by cumulative probability.
///
/// Returns the index of the first candidate whose running total strictly
/// exceeds `draw`. When the probabilities sum below 1.0 and `draw` lands in
/// the uncovered tail, nothing is selected.
pub fn select<I>(probabilities: I, draw: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative = 0.0;
    for (index, probability) in probabilities.into_iter().enumerate() {
        cumulative += probability;
        if draw < cumulative {
            return Some(index);
        }
    }
    None
}

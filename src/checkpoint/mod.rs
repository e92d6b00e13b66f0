//! Checkpoint and restore support for transitions and machines.
//!
//! A machine is packed as a [`Snapshot`]: every rule plus the tagged
//! `initial_state`, `current`, `previous` and `next`. Hooks are closures and
//! are never written; pass them back through [`RestoreHooks`] when decoding.
//!
//! Enumeration-valued symbols are stored as `(type_id, raw)` pairs and rebuilt
//! through an [`EnumRegistry`]. A type identifier missing from the registry
//! fails the whole decode.
//!
//! # Example
//!
//! ```rust
//! use flying_fsm::checkpoint::{EnumRegistry, Format, RestoreHooks};
//! use flying_fsm::core::Transition;
//! use flying_fsm::engine::Fsm;
//! use flying_fsm::symbol_enum;
//!
//! symbol_enum! {
//!     enum State { Waiting, Going }
//! }
//!
//! let mut fsm: Fsm = Fsm::new(
//!     vec![
//!         Transition::new(State::Waiting, "start", State::Going).unwrap(),
//!         Transition::new(State::Going, "stop", State::Waiting).unwrap(),
//!     ],
//!     State::Waiting,
//! )
//! .unwrap();
//! fsm.input("start").unwrap();
//!
//! let bytes = fsm.pack(Format::Json).unwrap();
//! let registry = EnumRegistry::new().register::<State>();
//! let restored: Fsm = Fsm::unpack(&bytes, Format::Json, &registry, RestoreHooks::new()).unwrap();
//! assert_eq!(restored.current().to_enum::<State>(), Some(State::Going));
//! ```

use crate::core::{Symbol, Transition, TransitionKey};
use crate::engine::{EventHook, Fsm, Machine, TransitionHook};
use chrono::Utc;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub mod codec;
pub mod error;
pub mod registry;
pub mod wire;

pub use codec::Format;
pub use error::CheckpointError;
pub use registry::EnumRegistry;
pub use wire::{PackedTransition, Snapshot, WireSymbol, SNAPSHOT_VERSION};

/// Hooks to re-attach to a decoded machine.
///
/// Transition hooks are keyed by identity triple and event hooks by event;
/// both keep registration order.
pub struct RestoreHooks<D> {
    transition: Vec<(TransitionKey, TransitionHook<D>)>,
    event: Vec<(Symbol, EventHook<D>)>,
}

impl<D> RestoreHooks<D> {
    pub fn new() -> Self {
        Self {
            transition: Vec::new(),
            event: Vec::new(),
        }
    }

    pub fn on_transition(mut self, key: TransitionKey, hook: TransitionHook<D>) -> Self {
        self.transition.push((key, hook));
        self
    }

    pub fn on_event(mut self, event: impl Into<Symbol>, hook: EventHook<D>) -> Self {
        self.event.push((event.into(), hook));
        self
    }

    /// Group transition hooks by rule, the shape callers often already have.
    pub fn with_transition_map(
        mut self,
        hooks: HashMap<TransitionKey, Vec<TransitionHook<D>>>,
    ) -> Self {
        for (key, list) in hooks {
            self.transition
                .extend(list.into_iter().map(|hook| (key.clone(), hook)));
        }
        self
    }
}

impl<D> Default for RestoreHooks<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Transition<D> {
    /// Serialize this rule. Hooks are not included.
    pub fn pack(&self, format: Format) -> Result<Vec<u8>, CheckpointError> {
        format.encode(&PackedTransition::from(self))
    }

    /// Rebuild a rule from [`pack`](Self::pack) output, attaching `hooks`.
    pub fn unpack(
        bytes: &[u8],
        format: Format,
        registry: &EnumRegistry,
        hooks: Vec<TransitionHook<D>>,
    ) -> Result<Self, CheckpointError> {
        let packed: PackedTransition = format.decode(bytes)?;
        let transition = packed.into_transition(registry)?;
        Ok(hooks
            .into_iter()
            .fold(transition, |transition, hook| transition.with_hook(hook)))
    }
}

impl<D> Fsm<D> {
    /// Capture the rules and runtime state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            rules: self.rules().iter().map(PackedTransition::from).collect(),
            initial_state: self.initial_state().into(),
            current: self.current().into(),
            previous: self.previous().map(WireSymbol::from),
            next: self.next().map(WireSymbol::from),
        }
    }

    /// Serialize the machine. Hooks are not included.
    pub fn pack(&self, format: Format) -> Result<Vec<u8>, CheckpointError> {
        let snapshot = self.snapshot();
        let bytes = format.encode(&snapshot)?;
        debug!(
            id = %snapshot.id,
            rules = snapshot.rules.len(),
            bytes = bytes.len(),
            "machine packed"
        );
        Ok(bytes)
    }

    /// Rebuild a machine from [`pack`](Self::pack) output, using the rules
    /// stored in the snapshot.
    pub fn unpack(
        bytes: &[u8],
        format: Format,
        registry: &EnumRegistry,
        hooks: RestoreHooks<D>,
    ) -> Result<Self, CheckpointError> {
        let snapshot: Snapshot = format.decode(bytes)?;
        snapshot.check_version()?;

        let rules = snapshot
            .rules
            .iter()
            .cloned()
            .map(|rule| rule.into_transition(registry))
            .collect::<Result<Vec<Transition<D>>, _>>()?;
        let initial_state = snapshot.initial_state.clone().resolve(registry)?;
        let mut fsm = Fsm::new(rules, initial_state)?;

        restore_into(&mut fsm, snapshot, registry, hooks)?;
        Ok(fsm)
    }

    /// Rebuild a machine of type `M` from [`pack`](Self::pack) output.
    ///
    /// The rules come from `M`'s definition; only the runtime state is read
    /// from the snapshot.
    pub fn restore<M>(
        bytes: &[u8],
        format: Format,
        registry: &EnumRegistry,
        hooks: RestoreHooks<D>,
    ) -> Result<Self, CheckpointError>
    where
        M: Machine<Data = D>,
    {
        let snapshot: Snapshot = format.decode(bytes)?;
        snapshot.check_version()?;

        let mut fsm = M::build()?;
        restore_into(&mut fsm, snapshot, registry, hooks)?;
        Ok(fsm)
    }
}

fn restore_into<D>(
    fsm: &mut Fsm<D>,
    snapshot: Snapshot,
    registry: &EnumRegistry,
    hooks: RestoreHooks<D>,
) -> Result<(), CheckpointError> {
    let id = snapshot.id;
    let initial_state = snapshot.initial_state.resolve(registry)?;
    let current = snapshot.current.resolve(registry)?;
    let previous = snapshot
        .previous
        .map(|symbol| symbol.resolve(registry))
        .transpose()?;
    let next = snapshot
        .next
        .map(|symbol| symbol.resolve(registry))
        .transpose()?;

    for (key, hook) in hooks.transition {
        fsm.add_transition_hook(&key, hook)?;
    }
    fsm.set_runtime(initial_state, current, previous, next);
    for (event, hook) in hooks.event {
        fsm.add_event_hook(event, hook);
    }

    debug!(%id, current = %fsm.current(), "machine restored");
    Ok(())
}

//! Wire model for packed transitions and machine snapshots.
//!
//! Hooks never appear here: closures cannot be serialized and must be
//! re-attached by the caller after decoding.

use crate::checkpoint::error::CheckpointError;
use crate::checkpoint::registry::EnumRegistry;
use crate::core::{RawValue, Symbol, Transition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// A symbol as written to the wire.
///
/// Plain names are stored verbatim; enumeration variants are tagged with
/// their type identifier so the registry can rebuild them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WireSymbol {
    Name(String),
    Tagged(String, RawValue),
}

impl WireSymbol {
    pub fn resolve(self, registry: &EnumRegistry) -> Result<Symbol, CheckpointError> {
        match self {
            Self::Name(name) => Ok(Symbol::Name(name)),
            Self::Tagged(type_id, raw) => registry.reconstruct(&type_id, &raw),
        }
    }
}

impl From<&Symbol> for WireSymbol {
    fn from(symbol: &Symbol) -> Self {
        match symbol {
            Symbol::Name(name) => Self::Name(name.clone()),
            Symbol::Variant { type_id, raw } => Self::Tagged(type_id.clone(), raw.clone()),
        }
    }
}

/// The serializable part of a [`Transition`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackedTransition {
    pub from_state: WireSymbol,
    pub to_state: WireSymbol,
    pub on_event: WireSymbol,
    pub probability: f64,
}

impl PackedTransition {
    /// Rebuild a hook-less transition, re-running field validation.
    pub fn into_transition<D>(
        self,
        registry: &EnumRegistry,
    ) -> Result<Transition<D>, CheckpointError> {
        let from_state = self.from_state.resolve(registry)?;
        let on_event = self.on_event.resolve(registry)?;
        let to_state = self.to_state.resolve(registry)?;
        Ok(Transition::weighted(
            from_state,
            on_event,
            to_state,
            self.probability,
        )?)
    }
}

impl<D> From<&Transition<D>> for PackedTransition {
    fn from(transition: &Transition<D>) -> Self {
        Self {
            from_state: transition.from_state().into(),
            to_state: transition.to_state().into(),
            on_event: transition.on_event().into(),
            probability: transition.probability(),
        }
    }
}

/// Serializable snapshot of a machine: its rules and runtime state.
/// Does NOT include hooks (not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// Every rule, in declaration order
    pub rules: Vec<PackedTransition>,

    pub initial_state: WireSymbol,

    pub current: WireSymbol,

    pub previous: Option<WireSymbol>,

    pub next: Option<WireSymbol>,
}

impl Snapshot {
    pub fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

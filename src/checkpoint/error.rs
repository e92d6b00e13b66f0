//! Checkpoint error types.

use crate::core::{BuildError, RawValue};
use crate::engine::FsmError;
use thiserror::Error;

/// Errors that can occur while packing or unpacking transitions and machines.
///
/// Every decode failure is fatal: no partially restored machine is returned.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A tagged value names an enumeration missing from the registry
    #[error("enumeration '{type_id}' is not registered")]
    UnregisteredType { type_id: String },

    /// The registered enumeration has no variant for the raw value
    #[error("enumeration '{type_id}' has no variant for raw value {raw}")]
    InvalidVariant { type_id: String, raw: RawValue },

    /// Decoded rules failed machine validation
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Re-attaching a hook failed
    #[error(transparent)]
    Fsm(#[from] FsmError),
}

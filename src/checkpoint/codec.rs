//! Structured byte encodings for checkpoints.

use crate::checkpoint::error::CheckpointError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Byte encoding used for packed transitions and machine snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Human-readable JSON via `serde_json`.
    #[default]
    Json,
    /// Compact binary via `bincode`.
    Bincode,
}

impl Format {
    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, CheckpointError> {
        match self {
            Self::Json => serde_json::to_vec(value)
                .map_err(|e| CheckpointError::SerializationFailed(e.to_string())),
            Self::Bincode => bincode::serialize(value)
                .map_err(|e| CheckpointError::SerializationFailed(e.to_string())),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, CheckpointError> {
        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| CheckpointError::DeserializationFailed(e.to_string())),
            Self::Bincode => bincode::deserialize(bytes)
                .map_err(|e| CheckpointError::DeserializationFailed(e.to_string())),
        }
    }
}

//! Registry of enumerations that may appear in a checkpoint.

use crate::checkpoint::error::CheckpointError;
use crate::core::{Enumeration, RawValue, Symbol};
use std::collections::HashMap;
use std::fmt;

type Reconstructor = fn(&RawValue) -> Option<Symbol>;

fn reconstruct<E: Enumeration>(raw: &RawValue) -> Option<Symbol> {
    E::from_raw(raw).map(|value| Symbol::of(&value))
}

/// Maps enumeration type identifiers to their reconstructors.
///
/// Decoding a tagged value whose type identifier is not registered is a hard
/// failure; nothing is guessed.
///
/// # Example
///
/// ```rust
/// use flying_fsm::checkpoint::EnumRegistry;
/// use flying_fsm::symbol_enum;
///
/// symbol_enum! {
///     enum Light { Red, Green }
/// }
///
/// let registry = EnumRegistry::new().register::<Light>();
/// assert!(registry.contains("Light"));
/// ```
#[derive(Clone, Default)]
pub struct EnumRegistry {
    reconstructors: HashMap<String, Reconstructor>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `E`, returning the registry for chaining.
    pub fn register<E: Enumeration>(mut self) -> Self {
        self.insert::<E>();
        self
    }

    pub fn insert<E: Enumeration>(&mut self) {
        self.reconstructors
            .insert(E::TYPE_ID.to_string(), reconstruct::<E> as Reconstructor);
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.reconstructors.contains_key(type_id)
    }

    /// Rebuild the symbol for a tagged `(type_id, raw)` pair.
    pub fn reconstruct(&self, type_id: &str, raw: &RawValue) -> Result<Symbol, CheckpointError> {
        let reconstructor =
            self.reconstructors
                .get(type_id)
                .ok_or_else(|| CheckpointError::UnregisteredType {
                    type_id: type_id.to_string(),
                })?;
        reconstructor(raw).ok_or_else(|| CheckpointError::InvalidVariant {
            type_id: type_id.to_string(),
            raw: raw.clone(),
        })
    }
}

impl fmt::Debug for EnumRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.reconstructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("EnumRegistry").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_enum;

    symbol_enum! {
        enum Gear {
            Low,
            High,
        }
    }

    #[test]
    fn registered_types_reconstruct_variants() {
        let registry = EnumRegistry::new().register::<Gear>();
        let symbol = registry.reconstruct("Gear", &RawValue::Int(1)).unwrap();
        assert_eq!(symbol.to_enum::<Gear>(), Some(Gear::High));
    }

    #[test]
    fn unregistered_types_are_rejected() {
        let registry = EnumRegistry::new();
        let err = registry.reconstruct("Gear", &RawValue::Int(0)).unwrap_err();
        assert!(matches!(err, CheckpointError::UnregisteredType { type_id } if type_id == "Gear"));
    }

    #[test]
    fn unknown_raw_values_are_rejected() {
        let registry = EnumRegistry::new().register::<Gear>();
        let err = registry.reconstruct("Gear", &RawValue::Int(7)).unwrap_err();
        assert!(matches!(err, CheckpointError::InvalidVariant { .. }));
    }

    #[test]
    fn debug_lists_registered_types() {
        let registry = EnumRegistry::new().register::<Gear>();
        assert_eq!(format!("{registry:?}"), r#"EnumRegistry { types: ["Gear"] }"#);
    }
}

//! Symbolic identifiers for states and events.
//!
//! A machine names its states and events either with plain strings or with
//! variants of a closed enumeration. Both collapse into [`Symbol`], which keeps
//! the enumeration's type identity so a checkpoint can rebuild the exact
//! variant later.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Underlying value of an enumeration variant.
///
/// Enumerations generated by [`symbol_enum!`](crate::symbol_enum) use the
/// variant's discriminant; hand-written impls may use text instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A closed enumeration usable as a state or event identifier.
///
/// # Example
///
/// ```rust
/// use flying_fsm::core::{Enumeration, RawValue, Symbol};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl Enumeration for Light {
///     const TYPE_ID: &'static str = "Light";
///
///     fn to_raw(&self) -> RawValue {
///         RawValue::Int(*self as i64)
///     }
///
///     fn from_raw(raw: &RawValue) -> Option<Self> {
///         match raw {
///             RawValue::Int(0) => Some(Self::Red),
///             RawValue::Int(1) => Some(Self::Green),
///             _ => None,
///         }
///     }
/// }
///
/// let symbol = Symbol::of(&Light::Green);
/// assert_eq!(symbol.to_enum::<Light>(), Some(Light::Green));
/// ```
pub trait Enumeration: Sized {
    /// Type identifier written next to the raw value in checkpoints.
    const TYPE_ID: &'static str;

    fn to_raw(&self) -> RawValue;

    /// Rebuild a variant from its raw value, or `None` if no variant matches.
    fn from_raw(raw: &RawValue) -> Option<Self>;
}

/// Identifier of a state or event.
///
/// Equality and hashing are structural: two variants are equal when both the
/// type identifier and the raw value match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A plain string identifier.
    Name(String),
    /// A variant of a closed enumeration.
    Variant { type_id: String, raw: RawValue },
}

impl Symbol {
    /// Symbol for an enumeration variant.
    pub fn of<E: Enumeration>(value: &E) -> Self {
        Self::Variant {
            type_id: E::TYPE_ID.to_string(),
            raw: value.to_raw(),
        }
    }

    /// Recover the concrete enumeration value, if this symbol belongs to `E`.
    pub fn to_enum<E: Enumeration>(&self) -> Option<E> {
        match self {
            Self::Variant { type_id, raw } if type_id == E::TYPE_ID => E::from_raw(raw),
            _ => None,
        }
    }

    /// Enumeration type identifier, `None` for plain names.
    pub fn type_id(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Variant { type_id, .. } => Some(type_id),
        }
    }

    /// Whether the symbol can act as a lookup key.
    ///
    /// Empty names and variants without a type identifier are rejected at
    /// construction time.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Name(name) => !name.is_empty(),
            Self::Variant { type_id, .. } => !type_id.is_empty(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Variant { type_id, raw } => write!(f, "{type_id}({raw})"),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

//! Macros for ergonomic machine definitions.

/// Declare a closed enumeration usable as state or event identifiers.
///
/// Generates the enum with `Clone, Copy, Debug, PartialEq, Eq, Hash`, an
/// [`Enumeration`](crate::core::Enumeration) impl whose type identifier is the
/// enum's name and whose raw value is the discriminant, and `From` impls into
/// [`Symbol`](crate::core::Symbol).
///
/// # Example
///
/// ```
/// use flying_fsm::core::{Enumeration, Symbol};
/// use flying_fsm::symbol_enum;
///
/// symbol_enum! {
///     pub enum State {
///         Waiting = 1,
///         Going = 2,
///     }
/// }
///
/// let symbol = Symbol::from(State::Going);
/// assert_eq!(symbol.type_id(), Some("State"));
/// assert_eq!(symbol.to_enum::<State>(), Some(State::Going));
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $discriminant:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $discriminant)?
            ),*
        }

        impl $name {
            /// Every variant in declaration order.
            #[allow(dead_code)]
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::Enumeration for $name {
            const TYPE_ID: &'static str = stringify!($name);

            fn to_raw(&self) -> $crate::core::RawValue {
                $crate::core::RawValue::Int(*self as i64)
            }

            fn from_raw(raw: &$crate::core::RawValue) -> Option<Self> {
                match raw {
                    $crate::core::RawValue::Int(value) => Self::VARIANTS
                        .iter()
                        .copied()
                        .find(|variant| *variant as i64 == *value),
                    $crate::core::RawValue::Text(_) => None,
                }
            }
        }

        impl From<$name> for $crate::core::Symbol {
            fn from(value: $name) -> Self {
                $crate::core::Symbol::of(&value)
            }
        }

        impl From<&$name> for $crate::core::Symbol {
            fn from(value: &$name) -> Self {
                $crate::core::Symbol::of(value)
            }
        }
    };
}

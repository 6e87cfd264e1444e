//! Macro for implementing Display and FromStr for status enums
//!
//! Status columns (`planned`, `todo`, `medium`, ...) are stored as lowercase
//! text. This macro keeps the string form of each enum in one place.
//!
//! # Example
//!
//! ```rust
//! use skoo_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeckVisibility {
//!     Private,
//!     Shared,
//! }
//!
//! impl_domain_status_conversions!(DeckVisibility {
//!     Private => "private",
//!     Shared => "shared",
//! });
//!
//! assert_eq!(DeckVisibility::Shared.to_string(), "shared");
//! assert_eq!("PRIVATE".parse::<DeckVisibility>(), Ok(DeckVisibility::Private));
//! ```

/// Implements Display, FromStr and `as_str` for status enums
///
/// Parsing is case-insensitive; output is always the canonical lowercase
/// string given in the mapping.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string stored in the database.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

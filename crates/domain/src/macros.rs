//! Macro for implementing Display and FromStr for label enums
//!
//! Event kinds, quality tiers and time-of-day buckets all travel as lowercase
//! strings (storage columns, serialized outcomes, request decoding). This
//! macro keeps the two directions in one place.
//!
//! # Example
//!
//! ```rust
//! use slotwise_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Bucket {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_domain_status_conversions!(Bucket {
//!     Morning => "morning",
//!     Evening => "evening",
//! });
//!
//! assert_eq!("MORNING".parse::<Bucket>(), Ok(Bucket::Morning));
//! ```

/// Implements Display and FromStr traits for label enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "PENDING", "pending", "Pending" all work)
/// - Consistent lowercase string output
/// - Descriptive error messages with enum name
/// - Surrounding whitespace is ignored when parsing
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

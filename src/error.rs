//! Error types for the lookupkit library.
//!
//! ## Key Components
//!
//! - [`KeyError`]: Returned by every keyed table operation when the key is
//!   neither a canonical [`Symbol`](crate::interner::Symbol) nor text the
//!   interner can canonicalize. Distinct from "not found", which is a plain
//!   `None`.
//! - [`InvariantError`]: Returned when internal table invariants are
//!   violated (`check_invariants` methods).
//! - [`ConfigError`]: Returned when table configuration parameters are
//!   invalid (e.g. densities out of range).
//!
//! ## Example Usage
//!
//! ```
//! use lookupkit::error::KeyError;
//! use lookupkit::prelude::*;
//!
//! let mut state = State::new();
//! let mut table = LookupTable::new(&mut state, 0);
//!
//! // Absent key: a normal miss
//! assert_eq!(table.fetch(&mut state, "missing"), Ok(None));
//!
//! // Unstorable key kind: an error, not a miss
//! let err = table.fetch(&mut state, 42).unwrap_err();
//! assert_eq!(err, KeyError::InvalidKind { kind: "int" });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// KeyError
// ---------------------------------------------------------------------------

/// Error returned when a key cannot be normalized into a canonical identity.
///
/// Only symbols and text are storable keys. Any other kind is rejected
/// before the table is touched, so a `KeyError` never comes with a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The key's kind can never be stored in a lookup table.
    InvalidKind {
        /// Kind name of the rejected key (see [`Value::kind`](crate::value::Value::kind)).
        kind: &'static str,
    },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidKind { kind } => {
                write!(f, "invalid key kind: expected symbol or string, got {kind}")
            },
        }
    }
}

impl std::error::Error for KeyError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal table invariants are violated.
///
/// Produced by [`LookupTable::check_invariants`](crate::table::LookupTable::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when table configuration parameters are invalid.
///
/// Produced by [`LookupTableBuilder::try_build`](crate::builder::LookupTableBuilder::try_build).
///
/// # Example
///
/// ```
/// use lookupkit::builder::LookupTableBuilder;
/// use lookupkit::prelude::State;
///
/// let mut state = State::new();
/// let err = LookupTableBuilder::new()
///     .min_density(0.9)
///     .max_density(0.5)
///     .try_build(&mut state)
///     .unwrap_err();
/// assert!(err.to_string().contains("min_density"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- KeyError ---------------------------------------------------------

    #[test]
    fn key_error_display_names_kind() {
        let err = KeyError::InvalidKind { kind: "record" };
        assert_eq!(
            err.to_string(),
            "invalid key kind: expected symbol or string, got record"
        );
    }

    #[test]
    fn key_error_is_copy_and_eq() {
        let a = KeyError::InvalidKind { kind: "int" };
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, KeyError::InvalidKind { kind: "nil" });
    }

    #[test]
    fn key_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<KeyError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("entry count mismatch");
        assert_eq!(err.to_string(), "entry count mismatch");
        assert_eq!(err.message(), "entry count mismatch");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("bin 3 chain cycle");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bin 3 chain cycle"));
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_density must be in (0, 1]");
        assert_eq!(err.to_string(), "max_density must be in (0, 1]");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "x");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}

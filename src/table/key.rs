//! Key normalization.

use crate::error::KeyError;
use crate::interner::Symbol;
use crate::traits::Interner;
use crate::value::Value;

/// Converts a candidate key into its canonical identity.
///
/// Symbols pass through unchanged and text is canonicalized through
/// `interner`. Every other kind is rejected with [`KeyError::InvalidKind`],
/// which callers must keep distinct from a missing key.
pub fn normalize_key<I: Interner + ?Sized>(
    interner: &mut I,
    key: &Value,
) -> Result<Symbol, KeyError> {
    match key {
        Value::Symbol(sym) => Ok(*sym),
        Value::Str(text) => Ok(interner.canonicalize(text)),
        other => Err(KeyError::InvalidKind { kind: other.kind() }),
    }
}

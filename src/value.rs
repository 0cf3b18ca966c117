//! Object references stored in slot records.
//!
//! A [`Value`] is what a single slot holds: an immediate (nil, boolean,
//! integer, symbol), shared raw text, or a handle to another heap-resident
//! record. Records reference each other only through [`RecordRef`] handles,
//! so chains of entries carry no ownership and no raw addresses.

use std::fmt;
use std::sync::Arc;

use crate::heap::RecordRef;
use crate::interner::Symbol;

/// A single slot's contents.
///
/// `Nil` is the empty sentinel: freshly allocated records hold `Nil` in every
/// slot, and an entry's `next` slot holds `Nil` when it ends its chain.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    /// Canonical identity produced by an [`Interner`](crate::traits::Interner).
    Symbol(Symbol),
    /// Raw, un-interned text.
    Str(Arc<str>),
    /// Handle to another slot record.
    Record(RecordRef),
}

impl Value {
    /// Short name of this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Symbol(_) => "symbol",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(sym) => Some(*sym),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record(&self) -> Option<RecordRef> {
        match self {
            Value::Record(rec) => Some(*rec),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Symbol(sym) => write!(f, "Sym({})", sym.index()),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Record(rec) => write!(f, "Record({})", rec.index()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<RecordRef> for Value {
    fn from(rec: RecordRef) -> Self {
        Value::Record(rec)
    }
}

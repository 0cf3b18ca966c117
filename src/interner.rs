//! Symbol interner mapping text to canonical identities.
//!
//! Every distinct string gets exactly one [`Symbol`]. Lookup tables compare
//! and hash keys by that identity, so text must pass through an
//! [`Interner`] before it reaches a table.

use std::num::NonZeroU32;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::traits::Interner;

/// A canonical identity for a piece of text.
///
/// Internally a [`NonZeroU32`], so `Option<Symbol>` is the same size as
/// `Symbol`. Two symbols are equal iff they came from the same text in the
/// same interner.
///
/// ```
/// # use std::mem::size_of; use lookupkit::interner::Symbol;
/// assert_eq!(size_of::<Option<Symbol>>(), size_of::<u32>());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    /// Dense 0-based id, in order of first interning.
    #[inline]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| panic!("symbol table overflow at index {index}"));
        Symbol(raw)
    }
}

/// Monotonic text interner, the default [`Interner`].
#[derive(Debug, Default)]
pub struct SymbolTable {
    index: FxHashMap<Arc<str>, Symbol>,
    names: Vec<Arc<str>>,
}

impl SymbolTable {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol for `text` if it has already been interned.
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.index.get(text).copied()
    }

    /// Resolves a symbol back to its text.
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.index()).map(|name| name.as_ref())
    }

    /// Returns the number of interned symbols.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Interner for SymbolTable {
    fn canonicalize(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.index.get(text) {
            return sym;
        }
        let sym = Symbol::from_index(self.names.len());
        let name: Arc<str> = Arc::from(text);
        self.names.push(Arc::clone(&name));
        self.index.insert(name, sym);
        sym
    }
}

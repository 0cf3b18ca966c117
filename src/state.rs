//! Explicit runtime context handed to every table operation.

use crate::heap::RecordHeap;
use crate::interner::SymbolTable;
use crate::traits::{Interner, SlotStore};

/// The interner and heap a lookup table works against.
///
/// Tables hold only record handles; the records themselves and the symbols
/// used as keys belong to the `State`. A table must always be used with the
/// state it was created in.
///
/// ```
/// use lookupkit::prelude::*;
///
/// let mut state = State::new();
/// let mut table = LookupTable::new(&mut state, 0);
/// table.store(&mut state, "answer", 42).unwrap();
/// assert_eq!(table.fetch(&mut state, "answer"), Ok(Some(Value::Int(42))));
/// ```
#[derive(Debug, Default)]
pub struct State<I = SymbolTable, H = RecordHeap> {
    pub symbols: I,
    pub heap: H,
}

impl State {
    /// Creates a state with an empty [`SymbolTable`] and [`RecordHeap`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Interner, H: SlotStore> State<I, H> {
    /// Creates a state from caller-supplied collaborators.
    pub fn with_parts(symbols: I, heap: H) -> Self {
        Self { symbols, heap }
    }

    /// Shorthand for `self.symbols.canonicalize(text)`.
    pub fn intern(&mut self, text: &str) -> crate::interner::Symbol {
        self.symbols.canonicalize(text)
    }
}

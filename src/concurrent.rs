//! Globally serialized lookup table for multi-threaded hosts.
//!
//! [`LookupTable`] does no locking of its own. `ConcurrentLookupTable`
//! puts a table and the [`State`] it lives in behind a single
//! `parking_lot::Mutex`, so every operation runs to completion before the
//! next one starts, the same guarantee an interpreter lock gives.

use parking_lot::Mutex;

use crate::error::KeyError;
use crate::heap::RecordHeap;
use crate::interner::{Symbol, SymbolTable};
use crate::state::State;
use crate::table::LookupTable;
use crate::traits::{Interner, SlotStore};
use crate::value::Value;

#[derive(Debug)]
struct Inner<I, H> {
    state: State<I, H>,
    table: LookupTable,
}

/// Thread-safe wrapper owning a table and its state.
///
/// ```
/// use std::sync::Arc;
/// use lookupkit::concurrent::ConcurrentLookupTable;
/// use lookupkit::value::Value;
///
/// let table = Arc::new(ConcurrentLookupTable::new(0));
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let table = Arc::clone(&table);
///         std::thread::spawn(move || {
///             table.store(format!("t{t}"), t).unwrap();
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.fetch("t2"), Ok(Some(Value::Int(2))));
/// ```
#[derive(Debug)]
pub struct ConcurrentLookupTable<I = SymbolTable, H = RecordHeap> {
    inner: Mutex<Inner<I, H>>,
}

impl ConcurrentLookupTable {
    /// Creates a table with its own [`SymbolTable`] and [`RecordHeap`].
    pub fn new(initial_size: usize) -> Self {
        Self::with_state(State::new(), initial_size)
    }
}

impl<I: Interner, H: SlotStore> ConcurrentLookupTable<I, H> {
    /// Takes ownership of `state` and creates a table inside it.
    pub fn with_state(mut state: State<I, H>, initial_size: usize) -> Self {
        let table = LookupTable::new(&mut state, initial_size);
        Self {
            inner: Mutex::new(Inner { state, table }),
        }
    }

    /// Canonicalizes `text` with this table's interner.
    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.lock().state.intern(text)
    }

    pub fn store(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Value, KeyError> {
        let mut guard = self.inner.lock();
        let Inner { state, table } = &mut *guard;
        table.store(state, key, value)
    }

    pub fn fetch(&self, key: impl Into<Value>) -> Result<Option<Value>, KeyError> {
        let mut guard = self.inner.lock();
        let Inner { state, table } = &mut *guard;
        table.fetch(state, key)
    }

    pub fn delete(&self, key: impl Into<Value>) -> Result<Option<Value>, KeyError> {
        let mut guard = self.inner.lock();
        let Inner { state, table } = &mut *guard;
        table.delete(state, key)
    }

    pub fn has_key(&self, key: impl Into<Value>) -> Result<bool, KeyError> {
        let mut guard = self.inner.lock();
        let Inner { state, table } = &mut *guard;
        table.has_key(state, key)
    }

    pub fn keys(&self) -> Vec<Symbol> {
        let guard = self.inner.lock();
        guard.table.keys(&guard.state)
    }

    pub fn values(&self) -> Vec<Value> {
        let guard = self.inner.lock();
        guard.table.values(&guard.state)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().table.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.inner.lock().table.bin_count()
    }

    /// Runs `f` with exclusive access to the state and table.
    pub fn with_state_mut<R>(&self, f: impl FnOnce(&mut State<I, H>, &mut LookupTable) -> R) -> R {
        let mut guard = self.inner.lock();
        let Inner { state, table } = &mut *guard;
        f(state, table)
    }
}

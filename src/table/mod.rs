//! Chained lookup table keyed by canonical symbols.
//!
//! The table lives on the runtime heap: its bin array and every entry are
//! slot records in the [`State`]'s [`SlotStore`], linked by
//! [`RecordRef`] handles. Keys are normalized to [`Symbol`]s before they are
//! hashed or compared, and comparison is by identity only.
//!
//! ## Operations
//!
//! | Operation   | Normalizes key | May redistribute            | Result                          |
//! |-------------|----------------|-----------------------------|---------------------------------|
//! | `store`     | yes            | grow, before inserting      | `Result<Value, KeyError>`       |
//! | `fetch`     | yes            | no                          | `Result<Option<Value>, _>`      |
//! | `delete`    | yes            | shrink, before searching    | `Result<Option<Value>, _>`      |
//! | `has_key`   | yes            | no                          | `Result<bool, _>`               |
//! | `keys`      | -              | no                          | `Vec<Symbol>` in bin order      |
//! | `values`    | -              | no                          | `Vec<Value>` in bin order       |
//!
//! ## Redistribution
//!
//! A redistribution builds a complete new bin array and only then replaces
//! `bins` and `bin_count` together. The replaced array is left for the
//! heap's collector; see [`LookupTable::root`].
//!
//! ## Example
//!
//! ```
//! use lookupkit::prelude::*;
//!
//! let mut state = State::new();
//! let mut table = LookupTable::new(&mut state, 0);
//!
//! table.store(&mut state, "a", 1).unwrap();
//! table.store(&mut state, "b", 2).unwrap();
//! let a = state.intern("a");
//! assert_eq!(table.fetch(&mut state, a), Ok(Some(Value::Int(1))));
//!
//! assert_eq!(table.delete(&mut state, "b"), Ok(Some(Value::Int(2))));
//! assert_eq!(table.delete(&mut state, "b"), Ok(None));
//! assert_eq!(table.len(), 1);
//! ```

pub(crate) mod chain;
pub mod key;
pub mod policy;

use rustc_hash::FxHashSet;

use crate::error::{InvariantError, KeyError};
use crate::heap::RecordRef;
use crate::interner::Symbol;
use crate::metrics::{TableCounters, TableMetrics};
use crate::state::State;
use crate::traits::{Interner, SlotStore};
use crate::value::Value;

use chain::{ChainIter, VALUE};
pub use key::normalize_key;
pub use policy::{DensityPolicy, MAX_DENSITY, MIN_BINS, MIN_DENSITY};

/// Dynamically resizing, chained hash table over heap-resident records.
#[derive(Debug)]
pub struct LookupTable {
    bins: RecordRef,
    bin_count: usize,
    entry_count: usize,
    policy: DensityPolicy,
    counters: TableCounters,
}

impl LookupTable {
    /// Creates an empty table with at least `initial_size` bins.
    ///
    /// Zero means [`MIN_BINS`]; other sizes are rounded up to a power of two
    /// no smaller than [`MIN_BINS`].
    ///
    /// # Panics
    ///
    /// Panics if `initial_size` is above the largest power of two a `usize`
    /// holds. [`LookupTableBuilder::try_build`](crate::builder::LookupTableBuilder::try_build)
    /// reports that as a [`ConfigError`](crate::error::ConfigError) instead.
    pub fn new<I, H: SlotStore>(state: &mut State<I, H>, initial_size: usize) -> Self {
        Self::with_policy(state, initial_size, DensityPolicy::default())
    }

    pub(crate) fn with_policy<I, H: SlotStore>(
        state: &mut State<I, H>,
        initial_size: usize,
        policy: DensityPolicy,
    ) -> Self {
        let Some(bin_count) = policy::initial_bin_count(initial_size) else {
            panic!("lookup table initial size {initial_size} has no power-of-two bin count");
        };
        Self {
            bins: state.heap.allocate(bin_count),
            bin_count,
            entry_count: 0,
            policy,
            counters: TableCounters::default(),
        }
    }

    /// Number of entries (distinct keys) stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.entry_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Current number of bins; always a power of two ≥ [`MIN_BINS`].
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn policy(&self) -> DensityPolicy {
        self.policy
    }

    /// The bin array, for inclusion in the collector's root set.
    pub fn root(&self) -> Value {
        Value::Record(self.bins)
    }

    pub fn metrics(&self) -> TableMetrics {
        self.counters.snapshot()
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// Grows the table first if it is already at maximum density. Returns
    /// the stored value.
    pub fn store<I: Interner, H: SlotStore>(
        &mut self,
        state: &mut State<I, H>,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Value, KeyError> {
        let key = self.normalize(state, key.into())?;
        let value = value.into();

        if self.policy.should_grow(self.entry_count, self.bin_count) {
            let doubled = self.bin_count << 1;
            tracing::debug!(
                from = self.bin_count,
                to = doubled,
                entries = self.entry_count,
                "growing lookup table"
            );
            self.redistribute(&mut state.heap, doubled);
            self.counters.inc_grow();
        }

        let heap = &mut state.heap;
        let bin = chain::bin_for(key, self.bin_count);
        match chain::find(heap, chain::bin_head(heap, self.bins, bin), key) {
            Ok((_, entry)) => {
                let written = heap.set_slot(entry, VALUE, value.clone());
                debug_assert!(written, "write to dangling entry {}", entry.index());
                self.counters.inc_update();
            },
            Err(tail) => {
                let entry = chain::new_entry(heap, key, value.clone());
                match tail {
                    Some(tail) => chain::set_next(heap, tail, Some(entry)),
                    None => chain::set_bin_head(heap, self.bins, bin, Some(entry)),
                }
                self.entry_count += 1;
                self.counters.inc_insert();
            },
        }
        Ok(value)
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    pub fn fetch<I: Interner, H: SlotStore>(
        &self,
        state: &mut State<I, H>,
        key: impl Into<Value>,
    ) -> Result<Option<Value>, KeyError> {
        let key = self.normalize(state, key.into())?;
        let found = self
            .find_entry(&state.heap, key)
            .map(|entry| chain::entry_value(&state.heap, entry));
        self.counters.record_lookup(found.is_some());
        Ok(found)
    }

    /// Returns `true` if `key` is stored.
    pub fn has_key<I: Interner, H: SlotStore>(
        &self,
        state: &mut State<I, H>,
        key: impl Into<Value>,
    ) -> Result<bool, KeyError> {
        let key = self.normalize(state, key.into())?;
        let found = self.find_entry(&state.heap, key).is_some();
        self.counters.record_lookup(found);
        Ok(found)
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    ///
    /// The shrink check runs on the pre-delete count before the key is
    /// searched for, so a delete that misses can still shrink the table.
    pub fn delete<I: Interner, H: SlotStore>(
        &mut self,
        state: &mut State<I, H>,
        key: impl Into<Value>,
    ) -> Result<Option<Value>, KeyError> {
        let key = self.normalize(state, key.into())?;

        if let Some(target) = self.policy.shrink_to(self.entry_count, self.bin_count) {
            tracing::debug!(
                from = self.bin_count,
                to = target,
                entries = self.entry_count,
                "shrinking lookup table"
            );
            self.redistribute(&mut state.heap, target);
            self.counters.inc_shrink();
        }

        let heap = &mut state.heap;
        let bin = chain::bin_for(key, self.bin_count);
        let Ok((prev, entry)) = chain::find(heap, chain::bin_head(heap, self.bins, bin), key)
        else {
            self.counters.record_remove(false);
            return Ok(None);
        };

        let value = chain::entry_value(heap, entry);
        let next = chain::entry_next(heap, entry);
        match prev {
            Some(prev) => chain::set_next(heap, prev, next),
            None => chain::set_bin_head(heap, self.bins, bin, next),
        }
        chain::set_next(heap, entry, None);
        self.entry_count -= 1;
        self.counters.record_remove(true);
        Ok(Some(value))
    }

    /// All keys, bins in ascending order and each chain head to tail.
    pub fn keys<I, H: SlotStore>(&self, state: &State<I, H>) -> Vec<Symbol> {
        let mut keys = Vec::with_capacity(self.entry_count);
        keys.extend(
            self.entry_refs(&state.heap)
                .filter_map(|entry| chain::entry_key(&state.heap, entry)),
        );
        keys
    }

    /// All values, in the same order as [`keys`](Self::keys).
    pub fn values<I, H: SlotStore>(&self, state: &State<I, H>) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.entry_count);
        values.extend(
            self.entry_refs(&state.heap)
                .map(|entry| chain::entry_value(&state.heap, entry)),
        );
        values
    }

    /// All `(key, value)` pairs, in the same order as [`keys`](Self::keys).
    pub fn entries<I, H: SlotStore>(&self, state: &State<I, H>) -> Vec<(Symbol, Value)> {
        let mut entries = Vec::with_capacity(self.entry_count);
        entries.extend(self.entry_refs(&state.heap).filter_map(|entry| {
            let key = chain::entry_key(&state.heap, entry)?;
            Some((key, chain::entry_value(&state.heap, entry)))
        }));
        entries
    }

    /// Validates the table's structure against the heap.
    pub fn check_invariants<I, H: SlotStore>(
        &self,
        state: &State<I, H>,
    ) -> Result<(), InvariantError> {
        let heap = &state.heap;

        if !self.bin_count.is_power_of_two() || self.bin_count < MIN_BINS {
            return Err(InvariantError::new(format!(
                "bin_count {} is not a power of two >= {}",
                self.bin_count, MIN_BINS
            )));
        }
        if heap.record_len(self.bins) != Some(self.bin_count) {
            return Err(InvariantError::new(format!(
                "bin array length {:?} != bin_count {}",
                heap.record_len(self.bins),
                self.bin_count
            )));
        }

        let mut seen_entries = FxHashSet::default();
        let mut seen_keys = FxHashSet::default();
        for bin in 0..self.bin_count {
            for entry in ChainIter::new(heap, chain::bin_head(heap, self.bins, bin)) {
                if !seen_entries.insert(entry) {
                    return Err(InvariantError::new(format!(
                        "bin {bin}: entry {} reached twice",
                        entry.index()
                    )));
                }
                if heap.record_len(entry) != Some(chain::ENTRY_LEN) {
                    return Err(InvariantError::new(format!(
                        "bin {bin}: entry {} is not a {}-slot record",
                        entry.index(),
                        chain::ENTRY_LEN
                    )));
                }
                let key = chain::entry_key(heap, entry).ok_or_else(|| {
                    InvariantError::new(format!(
                        "bin {bin}: entry {} has no symbol key",
                        entry.index()
                    ))
                })?;
                if chain::bin_for(key, self.bin_count) != bin {
                    return Err(InvariantError::new(format!(
                        "key {} found in bin {bin}, hashes to bin {}",
                        key.index(),
                        chain::bin_for(key, self.bin_count)
                    )));
                }
                if !seen_keys.insert(key) {
                    return Err(InvariantError::new(format!("key {} stored twice", key.index())));
                }
            }
        }

        if seen_entries.len() != self.entry_count {
            return Err(InvariantError::new(format!(
                "reachable entries {} != entry_count {}",
                seen_entries.len(),
                self.entry_count
            )));
        }
        Ok(())
    }

    fn normalize<I: Interner, H>(
        &self,
        state: &mut State<I, H>,
        key: Value,
    ) -> Result<Symbol, KeyError> {
        normalize_key(&mut state.symbols, &key).inspect_err(|err| {
            tracing::trace!(%err, "rejected lookup table key");
            self.counters.inc_invalid_key();
        })
    }

    fn find_entry<H: SlotStore>(&self, heap: &H, key: Symbol) -> Option<RecordRef> {
        let bin = chain::bin_for(key, self.bin_count);
        chain::find(heap, chain::bin_head(heap, self.bins, bin), key)
            .ok()
            .map(|(_, entry)| entry)
    }

    fn entry_refs<'a, H: SlotStore>(&self, heap: &'a H) -> impl Iterator<Item = RecordRef> + 'a {
        let bins = self.bins;
        (0..self.bin_count)
            .flat_map(move |bin| ChainIter::new(heap, chain::bin_head(heap, bins, bin)))
    }

    fn redistribute<H: SlotStore>(&mut self, heap: &mut H, new_count: usize) {
        let new_bins = chain::redistribute(heap, self.bins, self.bin_count, new_count);
        self.bins = new_bins;
        self.bin_count = new_count;
    }
}

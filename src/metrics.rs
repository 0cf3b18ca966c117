//! Operation counters for lookup tables.
//!
//! Counters use `Cell<u64>` so read paths (`fetch`, `has_key`) can record
//! hits and misses through `&self`. This makes a table `!Sync`; share one
//! across threads through
//! [`ConcurrentLookupTable`](crate::concurrent::ConcurrentLookupTable).

use std::cell::Cell;

/// Snapshot of table-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableMetrics {
    /// `fetch`/`has_key` calls that found their key.
    pub hits: u64,
    /// `fetch`/`has_key` calls that did not.
    pub misses: u64,
    /// Stores that added a new entry.
    pub inserts: u64,
    /// Stores that overwrote an existing entry's value.
    pub updates: u64,
    /// Deletes that unlinked an entry.
    pub removes: u64,
    /// Deletes whose key was absent.
    pub remove_misses: u64,
    /// Redistributions to a larger bin count.
    pub grows: u64,
    /// Redistributions triggered by the shrink policy.
    pub shrinks: u64,
    /// Operations rejected with an invalid key kind.
    pub invalid_keys: u64,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct TableCounters {
    hits: Cell<u64>,
    misses: Cell<u64>,
    inserts: Cell<u64>,
    updates: Cell<u64>,
    removes: Cell<u64>,
    remove_misses: Cell<u64>,
    grows: Cell<u64>,
    shrinks: Cell<u64>,
    invalid_keys: Cell<u64>,
}

#[inline]
fn bump(cell: &Cell<u64>) {
    cell.set(cell.get() + 1);
}

impl TableCounters {
    pub(crate) fn snapshot(&self) -> TableMetrics {
        TableMetrics {
            hits: self.hits.get(),
            misses: self.misses.get(),
            inserts: self.inserts.get(),
            updates: self.updates.get(),
            removes: self.removes.get(),
            remove_misses: self.remove_misses.get(),
            grows: self.grows.get(),
            shrinks: self.shrinks.get(),
            invalid_keys: self.invalid_keys.get(),
        }
    }

    pub(crate) fn record_lookup(&self, found: bool) {
        bump(if found { &self.hits } else { &self.misses });
    }

    pub(crate) fn inc_insert(&self) {
        bump(&self.inserts);
    }

    pub(crate) fn inc_update(&self) {
        bump(&self.updates);
    }

    pub(crate) fn record_remove(&self, found: bool) {
        bump(if found {
            &self.removes
        } else {
            &self.remove_misses
        });
    }

    pub(crate) fn inc_grow(&self) {
        bump(&self.grows);
    }

    pub(crate) fn inc_shrink(&self) {
        bump(&self.shrinks);
    }

    pub(crate) fn inc_invalid_key(&self) {
        bump(&self.invalid_keys);
    }
}

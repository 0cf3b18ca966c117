//! Entry records and the chains they form.
//!
//! ## Layout
//!
//! ```text
//!   bins (record, len = bin_count)
//!   ┌──────┬──────┬──────┬─────┬──────┐
//!   │ Nil  │  e1  │ Nil  │ ... │  e4  │
//!   └──────┴──┬───┴──────┴─────┴──┬───┘
//!             ▼                   ▼
//!       [k1, v1, e2] ──► [k2, v2, e3] ──► [k3, v3, Nil]
//!                                  [k4, v4, Nil]
//! ```
//!
//! Every entry is a 3-slot record `[key, value, next]`; `next` is `Nil` at
//! the end of a chain. Links are [`RecordRef`] handles only.

use crate::heap::RecordRef;
use crate::interner::Symbol;
use crate::traits::SlotStore;
use crate::value::Value;

pub(crate) const KEY: usize = 0;
pub(crate) const VALUE: usize = 1;
pub(crate) const NEXT: usize = 2;
pub(crate) const ENTRY_LEN: usize = 3;

/// Identity hash of a canonical key.
#[inline]
pub(crate) fn key_hash(key: Symbol) -> usize {
    key.index()
}

/// Bin index for `key` in a table of `bin_count` bins (a power of two).
#[inline]
pub(crate) fn bin_for(key: Symbol, bin_count: usize) -> usize {
    key_hash(key) & (bin_count - 1)
}

pub(crate) fn new_entry<H: SlotStore + ?Sized>(
    heap: &mut H,
    key: Symbol,
    value: Value,
) -> RecordRef {
    let entry = heap.allocate(ENTRY_LEN);
    let written = heap.set_slot(entry, KEY, Value::Symbol(key))
        && heap.set_slot(entry, VALUE, value);
    debug_assert!(written, "fresh entry {} is not writable", entry.index());
    entry
}

pub(crate) fn entry_key<H: SlotStore + ?Sized>(heap: &H, entry: RecordRef) -> Option<Symbol> {
    heap.slot(entry, KEY).and_then(Value::as_symbol)
}

pub(crate) fn entry_value<H: SlotStore + ?Sized>(heap: &H, entry: RecordRef) -> Value {
    heap.slot(entry, VALUE).cloned().unwrap_or_default()
}

pub(crate) fn entry_next<H: SlotStore + ?Sized>(heap: &H, entry: RecordRef) -> Option<RecordRef> {
    heap.slot(entry, NEXT).and_then(Value::as_record)
}

pub(crate) fn set_next<H: SlotStore + ?Sized>(
    heap: &mut H,
    entry: RecordRef,
    next: Option<RecordRef>,
) {
    let written = heap.set_slot(entry, NEXT, next.map_or(Value::Nil, Value::Record));
    debug_assert!(written, "write to dangling entry {}", entry.index());
}

pub(crate) fn bin_head<H: SlotStore + ?Sized>(
    heap: &H,
    bins: RecordRef,
    bin: usize,
) -> Option<RecordRef> {
    heap.slot(bins, bin).and_then(Value::as_record)
}

pub(crate) fn set_bin_head<H: SlotStore + ?Sized>(
    heap: &mut H,
    bins: RecordRef,
    bin: usize,
    head: Option<RecordRef>,
) {
    let written = heap.set_slot(bins, bin, head.map_or(Value::Nil, Value::Record));
    debug_assert!(
        written,
        "write to dangling bin array {} at bin {bin}; was the table rooted for collection?",
        bins.index()
    );
}

/// Walks a chain for `key`. Returns the matching entry and its predecessor
/// (`None` when the match is the chain head), or `Err(last)` with the tail
/// entry of the chain (`None` for an empty bin).
pub(crate) fn find<H: SlotStore + ?Sized>(
    heap: &H,
    head: Option<RecordRef>,
    key: Symbol,
) -> Result<(Option<RecordRef>, RecordRef), Option<RecordRef>> {
    let mut prev = None;
    let mut current = head;
    while let Some(entry) = current {
        if entry_key(heap, entry) == Some(key) {
            return Ok((prev, entry));
        }
        prev = Some(entry);
        current = entry_next(heap, entry);
    }
    Err(prev)
}

/// Iterator over the entries of one chain, head to tail.
pub(crate) struct ChainIter<'a, H: ?Sized> {
    heap: &'a H,
    current: Option<RecordRef>,
}

impl<'a, H: SlotStore + ?Sized> ChainIter<'a, H> {
    pub(crate) fn new(heap: &'a H, head: Option<RecordRef>) -> Self {
        Self {
            heap,
            current: head,
        }
    }
}

impl<H: SlotStore + ?Sized> Iterator for ChainIter<'_, H> {
    type Item = RecordRef;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.current?;
        self.current = entry_next(self.heap, entry);
        Some(entry)
    }
}

/// Builds a new bin array of `new_count` bins holding every entry reachable
/// from `old_bins`, and returns it. The caller publishes it.
///
/// Old bins are visited in ascending order and each chain head to tail;
/// every entry is detached and appended to the tail of its new chain, so
/// entries that land in the same new bin keep their relative order.
pub(crate) fn redistribute<H: SlotStore + ?Sized>(
    heap: &mut H,
    old_bins: RecordRef,
    old_count: usize,
    new_count: usize,
) -> RecordRef {
    let new_bins = heap.allocate(new_count);
    let mut tails: Vec<Option<RecordRef>> = vec![None; new_count];

    for bin in 0..old_count {
        let mut current = bin_head(heap, old_bins, bin);
        while let Some(entry) = current {
            current = entry_next(heap, entry);
            set_next(heap, entry, None);

            let Some(key) = entry_key(heap, entry) else {
                continue;
            };
            let target = bin_for(key, new_count);
            match tails[target] {
                Some(tail) => set_next(heap, tail, Some(entry)),
                None => set_bin_head(heap, new_bins, target, Some(entry)),
            }
            tails[target] = Some(entry);
        }
    }

    new_bins
}

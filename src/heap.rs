//! Heap of fixed-length slot records.
//!
//! Records live in a free-list arena and are addressed by [`RecordRef`]
//! handles. A record's length is fixed at allocation; only its slots change.
//!
//! ## Architecture
//!
//! ```text
//!   records (Vec<Option<Record>>)            free_list
//!   ┌────────┬──────────────────────────┐    ┌───────┐
//!   │ #0     │ [bin0, bin1, ..., bin15] │    │  #2   │
//!   │ #1     │ [key, value, Record(#3)] │    └───────┘
//!   │ #2     │ (free)                   │
//!   │ #3     │ [key, value, Nil]        │
//!   └────────┴──────────────────────────┘
//! ```
//!
//! ## Collection
//!
//! [`RecordHeap::collect`] marks every record reachable from the given roots
//! (following `Value::Record` slots) and frees the rest. Entries unlinked by
//! a table delete and bin arrays replaced by a redistribution are reclaimed
//! here, never by the table itself.

use crate::traits::SlotStore;
use crate::value::Value;

/// Handle to a record in a [`RecordHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordRef(usize);

impl RecordRef {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Record {
    slots: Box<[Value]>,
    marked: bool,
}

/// Free-list arena of slot records; the default [`SlotStore`].
#[derive(Debug, Default)]
pub struct RecordHeap {
    records: Vec<Option<Record>>,
    free_list: Vec<usize>,
    live: usize,
}

impl RecordHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Returns `true` if `record` refers to a live record.
    pub fn contains(&self, record: RecordRef) -> bool {
        self.records
            .get(record.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of live records.
    pub fn live_records(&self) -> usize {
        self.live
    }

    /// Frees every record not reachable from `roots`; returns how many were freed.
    pub fn collect(&mut self, roots: &[Value]) -> usize {
        for record in self.records.iter_mut().flatten() {
            record.marked = false;
        }

        let mut worklist: Vec<RecordRef> = roots.iter().filter_map(Value::as_record).collect();
        while let Some(rec) = worklist.pop() {
            let Some(record) = self.records.get_mut(rec.0).and_then(|slot| slot.as_mut()) else {
                continue;
            };
            if record.marked {
                continue;
            }
            record.marked = true;
            worklist.extend(record.slots.iter().filter_map(Value::as_record));
        }

        let mut freed = 0;
        for (idx, slot) in self.records.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|record| !record.marked) {
                *slot = None;
                self.free_list.push(idx);
                freed += 1;
            }
        }
        self.live -= freed;
        tracing::trace!(freed, live = self.live, "record heap collected");
        freed
    }

    fn record(&self, rec: RecordRef) -> Option<&Record> {
        self.records.get(rec.0).and_then(|slot| slot.as_ref())
    }
}

impl SlotStore for RecordHeap {
    fn allocate(&mut self, len: usize) -> RecordRef {
        let record = Record {
            slots: vec![Value::Nil; len].into_boxed_slice(),
            marked: false,
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            self.records[idx] = Some(record);
            idx
        } else {
            self.records.push(Some(record));
            self.records.len() - 1
        };
        self.live += 1;
        RecordRef(idx)
    }

    fn slot(&self, record: RecordRef, index: usize) -> Option<&Value> {
        self.record(record)?.slots.get(index)
    }

    fn set_slot(&mut self, record: RecordRef, index: usize, value: Value) -> bool {
        let target = self
            .records
            .get_mut(record.0)
            .and_then(|slot| slot.as_mut())
            .and_then(|record| record.slots.get_mut(index));
        match target {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    fn record_len(&self, record: RecordRef) -> Option<usize> {
        self.record(record).map(|record| record.slots.len())
    }
}

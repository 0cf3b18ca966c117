//! # Runtime Collaborator Traits
//!
//! The lookup table depends on two capabilities supplied by the surrounding
//! runtime. Both are passed in explicitly through
//! [`State`](crate::state::State); nothing here is global.
//!
//! ## Architecture
//!
//! ```text
//!   caller key (Value)
//!        │
//!        ▼
//!   ┌───────────────────────────┐  text   ┌─────────────────────────────┐
//!   │     normalize_key         │────────►│       Interner              │
//!   │  Symbol → pass through    │◄────────│  canonicalize(&str) → Symbol│
//!   │  Str    → canonicalize    │ Symbol  └─────────────────────────────┘
//!   │  other  → KeyError        │
//!   └────────────┬──────────────┘
//!                │ Symbol
//!                ▼
//!   ┌───────────────────────────┐  allocate / slot / set_slot
//!   │       LookupTable         │───────────────────────────────►┌───────────────┐
//!   │  bins: RecordRef          │                                │   SlotStore   │
//!   │  bin_count, entry_count   │◄───────────────────────────────│ (host heap)   │
//!   └───────────────────────────┘                                └───────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait       | Implemented by                                  | Purpose                         |
//! |-------------|-------------------------------------------------|---------------------------------|
//! | `Interner`  | [`SymbolTable`](crate::interner::SymbolTable)   | Text → canonical identity       |
//! | `SlotStore` | [`RecordHeap`](crate::heap::RecordHeap)         | Fixed-length record allocation  |

use crate::heap::RecordRef;
use crate::interner::Symbol;
use crate::value::Value;

/// Canonicalizes text into a single identity per distinct string.
///
/// Implementations must be deterministic and idempotent: the same text
/// always yields the same [`Symbol`], for as long as the interner lives.
///
/// ```
/// use lookupkit::interner::SymbolTable;
/// use lookupkit::traits::Interner;
///
/// let mut symbols = SymbolTable::new();
/// assert_eq!(symbols.canonicalize("each"), symbols.canonicalize("each"));
/// ```
pub trait Interner {
    /// Returns the canonical identity for `text`, creating it if needed.
    fn canonicalize(&mut self, text: &str) -> Symbol;
}

/// Host allocator for fixed-length slot records.
///
/// Records are never resized after allocation. Reads of a dangling handle or
/// an out-of-range index return `None`; writes to them return `false` and
/// leave the heap unchanged.
pub trait SlotStore {
    /// Allocates a record of `len` slots, every slot initialized to
    /// [`Value::Nil`].
    fn allocate(&mut self, len: usize) -> RecordRef;

    /// Returns the value at `index` in `record`.
    fn slot(&self, record: RecordRef, index: usize) -> Option<&Value>;

    /// Overwrites the value at `index` in `record`.
    fn set_slot(&mut self, record: RecordRef, index: usize, value: Value) -> bool;

    /// Returns the fixed length of `record`.
    fn record_len(&self, record: RecordRef) -> Option<usize>;
}

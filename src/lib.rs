//! lookupkit: identity-hashed chained lookup tables over heap-resident slot
//! records, for the symbol and method tables of a language runtime.
//!
//! A [`LookupTable`](table::LookupTable) keeps its bin array and entries as
//! fixed-length records in a host [`SlotStore`](traits::SlotStore) and keys
//! them by canonical [`Symbol`](interner::Symbol)s from an
//! [`Interner`](traits::Interner). Both collaborators travel in an explicit
//! [`State`](state::State).

pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod error;
pub mod heap;
pub mod interner;
pub mod metrics;
pub mod prelude;
pub mod state;
pub mod table;
pub mod traits;
pub mod value;

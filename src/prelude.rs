pub use crate::builder::{LookupTableBuilder, TableConfig};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentLookupTable;
pub use crate::error::{ConfigError, InvariantError, KeyError};
pub use crate::heap::{RecordHeap, RecordRef};
pub use crate::interner::{Symbol, SymbolTable};
pub use crate::metrics::TableMetrics;
pub use crate::state::State;
pub use crate::table::{DensityPolicy, LookupTable};
pub use crate::traits::{Interner, SlotStore};
pub use crate::value::Value;

//! Lookup table configuration.
//!
//! The defaults reproduce the standard policy ([`MIN_BINS`] bins,
//! [`MAX_DENSITY`], [`MIN_DENSITY`]); the builder exists for hosts that want
//! a larger initial table or different load factors.
//!
//! ## Example
//!
//! ```rust
//! use lookupkit::builder::LookupTableBuilder;
//! use lookupkit::prelude::*;
//!
//! let mut state = State::new();
//! let table = LookupTableBuilder::new()
//!     .initial_bins(100)
//!     .max_density(0.5)
//!     .build(&mut state);
//! assert_eq!(table.bin_count(), 128);
//! ```

use crate::error::ConfigError;
use crate::state::State;
use crate::table::policy;
use crate::table::{DensityPolicy, LookupTable, MAX_DENSITY, MIN_BINS, MIN_DENSITY};
use crate::traits::SlotStore;

/// Validated table parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested bin count; rounded up to a power of two ≥ [`MIN_BINS`].
    pub initial_bins: usize,
    pub max_density: f64,
    pub min_density: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_bins: MIN_BINS,
            max_density: MAX_DENSITY,
            min_density: MIN_DENSITY,
        }
    }
}

impl TableConfig {
    /// Checks that `initial_bins` rounds up to a representable bin count and
    /// that densities are finite with `0 < min_density < max_density <= 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if policy::initial_bin_count(self.initial_bins).is_none() {
            return Err(ConfigError::new(format!(
                "initial_bins ({}) exceeds the largest power-of-two bin count",
                self.initial_bins
            )));
        }
        if !self.max_density.is_finite() || self.max_density <= 0.0 || self.max_density > 1.0 {
            return Err(ConfigError::new(format!(
                "max_density must be in (0, 1], got {}",
                self.max_density
            )));
        }
        if !self.min_density.is_finite() || self.min_density <= 0.0 {
            return Err(ConfigError::new(format!(
                "min_density must be > 0, got {}",
                self.min_density
            )));
        }
        if self.min_density >= self.max_density {
            return Err(ConfigError::new(format!(
                "min_density ({}) must be below max_density ({})",
                self.min_density, self.max_density
            )));
        }
        Ok(())
    }

    fn policy(&self) -> DensityPolicy {
        DensityPolicy::new(self.max_density, self.min_density)
    }
}

/// Builder for [`LookupTable`].
#[derive(Debug, Clone, Default)]
pub struct LookupTableBuilder {
    config: TableConfig,
}

impl LookupTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_bins(mut self, bins: usize) -> Self {
        self.config.initial_bins = bins;
        self
    }

    pub fn max_density(mut self, density: f64) -> Self {
        self.config.max_density = density;
        self
    }

    pub fn min_density(mut self, density: f64) -> Self {
        self.config.min_density = density;
        self
    }

    /// Builds the table, allocating its bin array in `state`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; use
    /// [`try_build`](Self::try_build) for user-supplied parameters.
    pub fn build<I, H: SlotStore>(self, state: &mut State<I, H>) -> LookupTable {
        match self.try_build(state) {
            Ok(table) => table,
            Err(err) => panic!("invalid lookup table config: {err}"),
        }
    }

    /// Fallible variant of [`build`](Self::build).
    pub fn try_build<I, H: SlotStore>(
        self,
        state: &mut State<I, H>,
    ) -> Result<LookupTable, ConfigError> {
        self.config.validate()?;
        Ok(LookupTable::with_policy(
            state,
            self.config.initial_bins,
            self.config.policy(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn default_config_matches_standard_policy() {
        let mut state = State::new();
        let table = LookupTableBuilder::new().build(&mut state);
        assert_eq!(table.bin_count(), MIN_BINS);
        assert_eq!(table.policy(), DensityPolicy::default());
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn initial_bins_rounds_up() {
        let mut state = State::new();
        let table = LookupTableBuilder::new().initial_bins(200).build(&mut state);
        assert_eq!(table.bin_count(), 256);
    }

    #[test]
    fn custom_max_density_moves_grow_point() {
        let mut state = State::new();
        let mut table = LookupTableBuilder::new().max_density(0.5).build(&mut state);
        for i in 0..8 {
            table.store(&mut state, format!("k{i}"), i).unwrap();
        }
        assert_eq!(table.bin_count(), 16);
        table.store(&mut state, "k8", 8).unwrap();
        assert_eq!(table.bin_count(), 32);
    }

    #[test]
    fn try_build_rejects_bad_densities() {
        let mut state = State::new();
        let cases = [
            LookupTableBuilder::new().max_density(0.0),
            LookupTableBuilder::new().max_density(1.5),
            LookupTableBuilder::new().max_density(f64::NAN),
            LookupTableBuilder::new().min_density(-0.1),
            LookupTableBuilder::new().min_density(0.8),
        ];
        for builder in cases {
            assert!(builder.try_build(&mut state).is_err());
        }
        let err = LookupTableBuilder::new()
            .min_density(0.75)
            .try_build(&mut state)
            .unwrap_err();
        assert!(err.message().contains("min_density"));
    }

    #[test]
    fn try_build_rejects_oversized_initial_bins() {
        let mut state = State::new();
        let err = LookupTableBuilder::new()
            .initial_bins(usize::MAX)
            .try_build(&mut state)
            .unwrap_err();
        assert!(err.message().contains("initial_bins"));
        assert_eq!(state.heap.live_records(), 0);
    }

    #[test]
    fn custom_min_density_shrinks_to_smaller_table() {
        let mut state = State::new();
        let mut table = LookupTableBuilder::new()
            .initial_bins(64)
            .max_density(1.0)
            .min_density(0.5)
            .build(&mut state);
        for i in 0..20 {
            table.store(&mut state, format!("k{i}"), i).unwrap();
        }
        assert_eq!(table.bin_count(), 64);

        // 20 < 0.5 * 64, and 20 entries fit in 32 bins at density 1.0.
        assert_eq!(table.delete(&mut state, "k0"), Ok(Some(Value::Int(0))));
        assert_eq!(table.bin_count(), 32);
        assert_eq!(table.metrics().shrinks, 1);
        table.check_invariants(&state).unwrap();
    }

    #[test]
    fn high_min_density_never_redistributes_into_same_size() {
        let mut state = State::new();
        let mut table = LookupTableBuilder::new()
            .initial_bins(32)
            .max_density(1.0)
            .min_density(0.9)
            .build(&mut state);
        for i in 0..20 {
            table.store(&mut state, format!("k{i}"), i).unwrap();
        }
        let bins = table.root();

        // Below 0.9 * 32, but 32 is already the smallest non-growing size.
        for i in 0..4 {
            table.delete(&mut state, format!("k{i}")).unwrap();
        }
        assert_eq!(table.bin_count(), 32);
        assert_eq!(table.root(), bins);
        assert_eq!(table.metrics().shrinks, 0);
        assert_eq!(table.len(), 16);
        table.check_invariants(&state).unwrap();
    }

    #[test]
    #[should_panic(expected = "invalid lookup table config")]
    fn build_panics_on_invalid_config() {
        let mut state = State::new();
        let _ = LookupTableBuilder::new().max_density(2.0).build(&mut state);
    }
}

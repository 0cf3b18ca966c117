//! Load-factor driven grow and shrink decisions.
//!
//! Both checks run on counts taken *before* the mutation they guard:
//! a store checks growth before its key is inserted, a delete checks
//! shrinking before its key is searched for. The resulting boundaries are:
//!
//! | bins | grows when a store starts with | shrinks when a delete starts with |
//! |------|--------------------------------|-----------------------------------|
//! | 16   | ≥ 12 entries                   | never (needs > 16 entries)        |
//! | 32   | ≥ 24 entries                   | never (< 9.6 and > 16 impossible) |
//! | 64   | ≥ 48 entries                   | 17..=19 entries                   |
//! | 128  | ≥ 96 entries                   | 17..=38 entries                   |

/// Smallest bin count a table ever has. Must be a power of two.
pub const MIN_BINS: usize = 16;

/// Density at or above which a store grows the table first.
pub const MAX_DENSITY: f64 = 0.75;

/// Density below which a delete shrinks the table first.
pub const MIN_DENSITY: f64 = 0.30;

/// Grow/shrink thresholds for one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPolicy {
    max_density: f64,
    min_density: f64,
}

impl DensityPolicy {
    /// Builds a policy without validation; see
    /// [`LookupTableBuilder::try_build`](crate::builder::LookupTableBuilder::try_build)
    /// for the checked path.
    pub(crate) const fn new(max_density: f64, min_density: f64) -> Self {
        Self {
            max_density,
            min_density,
        }
    }

    pub fn max_density(&self) -> f64 {
        self.max_density
    }

    pub fn min_density(&self) -> f64 {
        self.min_density
    }

    /// `true` if a store starting with `entries` in `bins` must double first.
    #[inline]
    pub fn should_grow(&self, entries: usize, bins: usize) -> bool {
        entries as f64 >= self.max_density * bins as f64
    }

    /// `true` if a delete starting with `entries` in `bins` must shrink first.
    #[inline]
    pub fn should_shrink(&self, entries: usize, bins: usize) -> bool {
        entries > MIN_BINS && (entries as f64) < self.min_density * bins as f64
    }

    /// Smallest power-of-two bin count ≥ [`MIN_BINS`] at which `entries`
    /// would not trigger growth.
    pub fn shrink_target(&self, entries: usize) -> usize {
        let mut bins = MIN_BINS;
        while self.should_grow(entries, bins) {
            bins <<= 1;
        }
        bins
    }

    /// Bin count a delete starting with `entries` in `bins` must shrink to,
    /// or `None` if it keeps its bins.
    ///
    /// A low-density table whose shrink target is not smaller than `bins`
    /// stays as it is. That only happens when `min_density` exceeds half of
    /// `max_density`.
    pub fn shrink_to(&self, entries: usize, bins: usize) -> Option<usize> {
        if !self.should_shrink(entries, bins) {
            return None;
        }
        let target = self.shrink_target(entries);
        (target < bins).then_some(target)
    }
}

impl Default for DensityPolicy {
    fn default() -> Self {
        Self::new(MAX_DENSITY, MIN_DENSITY)
    }
}

/// Rounds a requested initial size up to a valid bin count, or `None` if no
/// power of two that large fits in a `usize`.
pub(crate) fn initial_bin_count(requested: usize) -> Option<usize> {
    requested.max(MIN_BINS).checked_next_power_of_two()
}

//! Construction parameters for [`ChainedHashMap`](crate::ChainedHashMap)

use crate::TableError;

/// Growth threshold used when none is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Bucket count used when none is given
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor and initial bucket count for a new table.
///
/// ```rust
/// use chainmap::{ChainedHashMap, TableConfig};
///
/// let config = TableConfig::default().with_load_factor(0.5).with_initial_capacity(8);
/// let map: ChainedHashMap<u32> = ChainedHashMap::with_config(config).unwrap();
/// assert_eq!(map.capacity(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Ratio of entries to buckets above which the table doubles
    pub load_factor: f64,
    /// Number of buckets allocated up front
    pub initial_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { load_factor: DEFAULT_LOAD_FACTOR, initial_capacity: DEFAULT_INITIAL_CAPACITY }
    }
}

impl TableConfig {
    /// Creates a config from both parameters
    #[must_use]
    pub fn new(load_factor: f64, initial_capacity: usize) -> Self {
        Self { load_factor, initial_capacity }
    }

    /// Replaces the growth threshold
    #[must_use]
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Replaces the initial bucket count
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Checks that both parameters are positive.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidLoadFactor`] for a load factor that is not a positive finite number,
    /// [`TableError::ZeroCapacity`] for an initial capacity of zero.
    pub fn validate(&self) -> Result<(), TableError> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(TableError::InvalidLoadFactor(self.load_factor));
        }
        if self.initial_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert!((config.load_factor - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder_methods() {
        let config = TableConfig::default().with_load_factor(2.0).with_initial_capacity(3);
        assert_eq!(config, TableConfig::new(2.0, 3));
    }

    #[test]
    fn test_rejects_bad_load_factor() {
        for bad in [0.0, -0.5, f64::INFINITY] {
            let config = TableConfig::default().with_load_factor(bad);
            assert_eq!(config.validate(), Err(TableError::InvalidLoadFactor(bad)));
        }

        let nan = TableConfig::default().with_load_factor(f64::NAN);
        assert!(matches!(nan.validate(), Err(TableError::InvalidLoadFactor(_))));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = TableConfig::default().with_initial_capacity(0);
        assert_eq!(config.validate(), Err(TableError::ZeroCapacity));
    }
}

//! Error type shared by every fallible table operation

use thiserror::Error;

/// Failures reported by [`ChainedHashMap`](crate::ChainedHashMap) and [`TableConfig`](crate::TableConfig).
///
/// A missing key is never an error: lookups report absence through `Ok(None)` or `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A computed bucket index fell outside `[0, capacity)`.
    ///
    /// This means the hash function or the capacity bookkeeping is broken. The operation that
    /// hit it made no change to the table.
    #[error("bucket index {index} out of range for capacity {capacity}")]
    IndexOutOfRange {
        /// The offending index as produced by the hash function
        index: u128,
        /// Number of buckets at the time of the check
        capacity: usize,
    },

    /// The growth threshold was zero, negative, or not a finite number.
    #[error("load factor must be a positive finite number, got {0}")]
    InvalidLoadFactor(f64),

    /// The table was asked to start with no buckets.
    #[error("initial capacity must be at least one bucket")]
    ZeroCapacity,

    /// The bucket array could not be allocated, or no bucket count keeps the load under the
    /// threshold.
    #[error("cannot allocate a bucket array of {requested} buckets")]
    CapacityOverflow {
        /// Bucket count that was asked for
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TableError::IndexOutOfRange { index: 40, capacity: 32 };
        assert_eq!(err.to_string(), "bucket index 40 out of range for capacity 32");

        assert_eq!(
            TableError::InvalidLoadFactor(-1.0).to_string(),
            "load factor must be a positive finite number, got -1"
        );
        assert_eq!(TableError::ZeroCapacity.to_string(), "initial capacity must be at least one bucket");
        assert_eq!(
            TableError::CapacityOverflow { requested: 64 }.to_string(),
            "cannot allocate a bucket array of 64 buckets"
        );
    }
}

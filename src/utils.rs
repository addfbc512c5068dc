//! Utility functions for building and inspecting `ChainedHashMap` instances

use crate::{ChainedHashMap, TableError};

/// Summary of how entries are spread over the bucket array
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    /// Number of buckets in the table
    pub buckets: usize,
    /// Buckets holding no entry
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean chain length over the non-empty buckets, 0.0 when the table is empty
    pub mean_chain: f64,
}

/// Creates a default-config `ChainedHashMap` from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// # Errors
///
/// The first error returned by [`ChainedHashMap::set`].
pub fn try_from_pairs<K, V, I>(pairs: I) -> Result<ChainedHashMap<V>, TableError>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::new();
    map.extend_pairs(pairs)?;
    Ok(map)
}

/// Measures the chain lengths of a table
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub fn chain_stats<V>(map: &ChainedHashMap<V>) -> ChainStats {
    let lengths = map.bucket_lengths();
    let occupied = lengths.iter().filter(|&&len| len > 0).count();
    let longest_chain = lengths.iter().copied().max().unwrap_or(0);
    let mean_chain = if occupied == 0 { 0.0 } else { map.len() as f64 / occupied as f64 };

    ChainStats { buckets: lengths.len(), empty_buckets: lengths.len() - occupied, longest_chain, mean_chain }
}

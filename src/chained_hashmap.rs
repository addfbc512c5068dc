use std::{fmt, iter, mem};

use log::{debug, trace, warn};

use crate::{TableConfig, TableError, hash::polynomial_hash};

/// A key-value pair stored in a bucket chain
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// A chain of entries whose keys hash to the same index, in insertion order
type Bucket<V> = Vec<Entry<V>>;

/// A string-keyed hash table with separate chaining.
///
/// Keys are placed with [`polynomial_hash`] into a bucket array; collisions extend the bucket's
/// chain. When the ratio of entries to buckets rises strictly above the load factor, the bucket
/// array doubles and every entry is rehashed. The table never shrinks.
///
/// Every operation that computes a bucket index returns a `Result`: an index outside the
/// bucket array is reported as [`TableError::IndexOutOfRange`] before anything is modified.
///
/// Note: This implementation is not thread-safe. Wrap it in a `Mutex` to share it.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// The bucket array; its length is the capacity
    buckets: Vec<Bucket<V>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Ratio of entries to buckets above which the table grows
    load_factor: f64,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates an empty table with load factor 0.75 and 16 buckets
    #[must_use]
    pub fn new() -> Self {
        let config = TableConfig::default();
        Self {
            buckets: iter::repeat_with(Vec::new).take(config.initial_capacity).collect(),
            size: 0,
            load_factor: config.load_factor,
        }
    }

    /// Creates an empty table from a validated config.
    ///
    /// # Errors
    ///
    /// Returns the error from [`TableConfig::validate`], or
    /// [`TableError::CapacityOverflow`] when the bucket array cannot be allocated.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self { buckets: try_empty_buckets(config.initial_capacity)?, size: 0, load_factor: config.load_factor })
    }

    /// Creates an empty table with the default load factor and `capacity` buckets.
    ///
    /// # Errors
    ///
    /// [`TableError::ZeroCapacity`] when `capacity` is zero, [`TableError::CapacityOverflow`]
    /// when that many buckets cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }

    /// Computes the bucket index for a key against the current bucket array
    fn bucket_index(&self, key: &str) -> Result<usize, TableError> {
        checked_index(key, self.buckets.len())
    }

    /// Inserts a key-value pair, or overwrites the value if the key is already present.
    ///
    /// Returns the previous value on overwrite and `None` on a fresh insert. A fresh insert that
    /// pushes the load above the threshold doubles the bucket array.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array,
    /// [`TableError::CapacityOverflow`] if the grown bucket array cannot be allocated. On error
    /// the table is left as it was.
    pub fn set(&mut self, key: &str, value: V) -> Result<Option<V>, TableError> {
        let index = self.bucket_index(key)?;
        let bucket = self.bucket_at_mut(index)?;

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        let entry = Entry { key: key.to_owned(), value };
        if self.exceeds_threshold(self.size.saturating_add(1), self.buckets.len()) {
            self.resize(index, entry)?;
        } else {
            self.append(index, entry)?;
        }

        Ok(None)
    }

    /// Retrieves the value for a key, `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array.
    pub fn get(&self, key: &str) -> Result<Option<&V>, TableError> {
        let bucket = self.bucket(key)?;
        Ok(bucket.iter().find(|entry| entry.key == key).map(|entry| &entry.value))
    }

    /// Retrieves a mutable reference to the value for a key.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array.
    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>, TableError> {
        let bucket = self.bucket_mut(key)?;
        Ok(bucket.iter_mut().find(|entry| entry.key == key).map(|entry| &mut entry.value))
    }

    /// Returns true if the key is stored, whatever its value.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array.
    pub fn has(&self, key: &str) -> Result<bool, TableError> {
        Ok(self.bucket(key)?.iter().any(|entry| entry.key == key))
    }

    /// Removes a key, returning true iff it was present.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array.
    pub fn remove(&mut self, key: &str) -> Result<bool, TableError> {
        Ok(self.take(key)?.is_some())
    }

    /// Removes a key and returns its value.
    ///
    /// The remaining entries of the bucket keep their relative order. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if the computed index is outside the bucket array.
    pub fn take(&mut self, key: &str) -> Result<Option<V>, TableError> {
        let bucket = self.bucket_mut(key)?;

        let Some(position) = bucket.iter().position(|entry| entry.key == key) else {
            return Ok(None);
        };

        let entry = bucket.remove(position);
        self.size = self.size.saturating_sub(1);
        Ok(Some(entry.value))
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the ratio above which the table grows
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor
    }

    /// Removes every entry, keeping the current capacity
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Vec::new();
        }
        self.size = 0;
    }

    /// Returns the keys in bucket order, then insertion order within a bucket
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns the values in the same order as [`keys`](Self::keys)
    #[must_use]
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns the key-value pairs in the same order as [`keys`](Self::keys)
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }

    /// Returns an iterator over the key-value pairs in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, slot: 0 }
    }

    /// Returns the chain length of every bucket in array order
    #[must_use]
    pub fn bucket_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Inserts every pair in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error returned by [`set`](Self::set).
    pub fn extend_pairs<K, I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Returns the bucket a key hashes to
    fn bucket(&self, key: &str) -> Result<&Bucket<V>, TableError> {
        let index = self.bucket_index(key)?;
        self.buckets
            .get(index)
            .ok_or(TableError::IndexOutOfRange { index: index as u128, capacity: self.buckets.len() })
    }

    /// Returns the bucket a key hashes to, mutably
    fn bucket_mut(&mut self, key: &str) -> Result<&mut Bucket<V>, TableError> {
        let index = self.bucket_index(key)?;
        self.bucket_at_mut(index)
    }

    /// Returns the bucket at an already computed index, mutably
    fn bucket_at_mut(&mut self, index: usize) -> Result<&mut Bucket<V>, TableError> {
        let capacity = self.buckets.len();
        self.buckets.get_mut(index).ok_or(TableError::IndexOutOfRange { index: index as u128, capacity })
    }

    /// True when `size` entries over `capacity` buckets is above the threshold
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn exceeds_threshold(&self, size: usize, capacity: usize) -> bool {
        size as f64 / capacity as f64 > self.load_factor
    }

    /// Doubles the bucket array and rehashes every entry together with `incoming`.
    ///
    /// `incoming` joins the traversal at the end of bucket `index`, where a plain append would
    /// have put it. Doubling repeats until the full entry count fits under the threshold, so
    /// re-inserting can never trigger another resize. The target capacity, the new bucket
    /// array and every new index are settled before anything moves; any failure leaves the
    /// table untouched.
    fn resize(&mut self, index: usize, incoming: Entry<V>) -> Result<(), TableError> {
        let size = self.size.saturating_add(1);
        let old_capacity = self.buckets.len();
        let mut new_capacity = old_capacity.saturating_mul(2);
        while self.exceeds_threshold(size, new_capacity) {
            if new_capacity == usize::MAX {
                warn!("no bucket count keeps {size} entries under load factor {}", self.load_factor);
                return Err(TableError::CapacityOverflow { requested: new_capacity });
            }
            new_capacity = new_capacity.saturating_mul(2);
        }

        let new_buckets = try_empty_buckets(new_capacity)?;

        let placements = self
            .buckets
            .iter()
            .enumerate()
            .flat_map(|(i, bucket)| {
                let tail = (i == index).then_some(&incoming);
                bucket.iter().chain(tail).map(|entry| entry.key.as_str())
            })
            .map(|key| checked_index(key, new_capacity))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("growing table from {old_capacity} to {new_capacity} buckets ({size} entries)");

        let old_buckets = mem::replace(&mut self.buckets, new_buckets);
        self.size = 0;

        let mut pending = Some(incoming);
        let entries = old_buckets.into_iter().enumerate().flat_map(|(i, bucket)| {
            let tail = if i == index { pending.take() } else { None };
            bucket.into_iter().chain(tail)
        });

        for (entry, slot) in entries.zip(placements) {
            self.append(slot, entry)?;
        }

        Ok(())
    }

    /// Appends an entry whose key is known to be absent, without a growth check
    fn append(&mut self, index: usize, entry: Entry<V>) -> Result<(), TableError> {
        self.bucket_at_mut(index)?.push(entry);
        self.size = self.size.saturating_add(1);
        Ok(())
    }
}

/// Hashes a key and checks the result against `capacity`
fn checked_index(key: &str, capacity: usize) -> Result<usize, TableError> {
    let hash = polynomial_hash(key, capacity);

    match usize::try_from(hash) {
        Ok(index) if index < capacity => {
            trace!("key {key:?} -> bucket {index} of {capacity}");
            Ok(index)
        }
        _ => {
            warn!("bucket index {hash} out of range for capacity {capacity}");
            Err(TableError::IndexOutOfRange { index: hash, capacity })
        }
    }
}

/// Allocates `capacity` empty chains, reporting an allocation failure instead of aborting
fn try_empty_buckets<V>(capacity: usize) -> Result<Vec<Bucket<V>>, TableError> {
    let mut buckets = Vec::new();
    if let Err(err) = buckets.try_reserve_exact(capacity) {
        warn!("cannot allocate {capacity} buckets: {err}");
        return Err(TableError::CapacityOverflow { requested: capacity });
    }
    buckets.resize_with(capacity, Vec::new);
    Ok(buckets)
}

impl<V: fmt::Debug> fmt::Display for ChainedHashMap<V> {
    /// Lists every non-empty bucket with its chain, one bucket per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChainedHashMap contents:")?;
        for (index, bucket) in self.buckets.iter().enumerate().filter(|(_, b)| !b.is_empty()) {
            let pairs: Vec<(&str, &V)> = bucket.iter().map(|e| (e.key.as_str(), &e.value)).collect();
            writeln!(f, "Bucket {index}: {pairs:?}")?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Reference to the bucket array of the table
    buckets: &'a [Bucket<V>],
    /// Bucket currently being walked
    bucket: usize,
    /// Position inside the current bucket
    slot: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bucket) = self.buckets.get(self.bucket) {
            if let Some(entry) = bucket.get(self.slot) {
                self.slot = self.slot.saturating_add(1);
                return Some((entry.key.as_str(), &entry.value));
            }
            self.bucket = self.bucket.saturating_add(1);
            self.slot = 0;
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

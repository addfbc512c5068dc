//! # Chained Hash Map
//!
//! A string-keyed hash table built from scratch: a bucket array with separate chaining for
//! collisions, a polynomial rolling hash, and doubling growth once the load factor is exceeded.
//!
//! - Keys are `String`s, values are any `V`.
//! - Lookups report absence with `None`, never with a sentinel value.
//! - The table grows when `len / capacity` rises strictly above the load factor and never
//!   shrinks.
//! - Enumeration follows bucket order, then insertion order within a bucket. There is no
//!   global insertion order.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::{ChainedHashMap, TableError};
//!
//! fn main() -> Result<(), TableError> {
//!     // Create a new table: load factor 0.75, 16 buckets
//!     let mut map = ChainedHashMap::new();
//!
//!     // Insert values
//!     map.set("apple", "red")?;
//!     map.set("banana", "yellow")?;
//!
//!     // Retrieve values
//!     assert_eq!(map.get("apple")?, Some(&"red"));
//!
//!     // Update values
//!     map.set("apple", "green")?;
//!     assert_eq!(map.get("apple")?, Some(&"green"));
//!
//!     // Remove values
//!     assert!(map.remove("apple")?);
//!     assert_eq!(map.get("apple")?, None);
//!     assert!(!map.has("apple")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chainmap::{ChainedHashMap, TableConfig};
//!
//! let config = TableConfig::default().with_load_factor(0.5).with_initial_capacity(4);
//! let mut map = ChainedHashMap::with_config(config).unwrap();
//!
//! map.set("a", 1).unwrap();
//! map.set("b", 2).unwrap();
//! map.set("c", 3).unwrap(); // 3 / 4 > 0.5, grows to 8 buckets
//!
//! assert_eq!(map.capacity(), 8);
//! ```

/// Module implementing the separate-chaining table
mod chained_hashmap;
/// Construction parameters and their defaults
mod config;
/// The crate's error type
mod error;
/// The polynomial string hash
pub mod hash;
/// Logger setup for binaries
pub mod logger;
/// Utility functions for building and inspecting tables
mod utils;

pub use chained_hashmap::{ChainedHashMap, Iter};
pub use config::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, TableConfig};
pub use error::TableError;
pub use utils::{ChainStats, chain_stats, try_from_pairs};

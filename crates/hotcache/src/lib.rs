//! # hotcache
//!
//! Fixed-capacity, thread-safe LRU cache with O(1) operations.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **Recency list**: intrusive doubly-linked list over arena slots,
//!   head = least recently used, tail = most recently used (O(1) relink)
//! - **Locking**: one mutex per cache, held across each whole `get`/`put`
//!
//! ## Example
//! ```
//! use hotcache::Cache;
//!
//! let cache = Cache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3); // evicts "a"
//!
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"c"), Some(3));
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;
mod stats;

pub use cache::Cache;
pub use error::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};

//! ringlru: a fixed-capacity, thread-safe, in-memory LRU cache.
//!
//! [`LruCache`] pairs a hash index with a circular recency list and guards
//! both with a single lock. `get` promotes what it returns; `set` inserts or
//! updates and evicts the least recently used entry once the cache is full.
//! Both run in O(1).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::LruCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{CacheError, Result};

//! Fixed-capacity LRU cache: a hash index over an arena-backed recency ring.

pub mod lru;
mod ring;

pub use lru::LruCache;

//! Error types for ringlru.

use thiserror::Error;

/// Errors surfaced by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested key is not present. An ordinary miss, not a fault.
    #[error("key not found in cache")]
    NotFound,

    /// A cache cannot be built with room for zero entries.
    #[error("invalid cache capacity {0}: must be at least 1")]
    InvalidCapacity(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CacheError::NotFound.to_string(), "key not found in cache");
        assert_eq!(
            CacheError::InvalidCapacity(0).to_string(),
            "invalid cache capacity 0: must be at least 1"
        );
    }
}

//! Cache configuration.
//!
//! Capacity is the only tunable. `CacheConfig` derives serde so it can be
//! embedded in a host application's config file.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Capacity used when a config omits it.
pub const DEFAULT_CAPACITY: usize = 128;

/// Construction parameters for [`crate::LruCache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries held at once. Must be non-zero.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Config for a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject configurations that cannot hold a single entry.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_defaults() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_cache_config_from_json() {
        let cfg: CacheConfig = serde_json::from_str(r#"{"capacity": 3}"#).unwrap();
        assert_eq!(cfg, CacheConfig::with_capacity(3));
    }

    #[test]
    fn test_cache_config_missing_capacity_uses_default() {
        let cfg: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = CacheConfig::with_capacity(0).validate().unwrap_err();
        assert_eq!(err, CacheError::InvalidCapacity(0));
    }
}

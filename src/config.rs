//! Configuration for the Least Recently Used (LRU) cache.
//!
//! The only tunable is the entry capacity. It is fixed when the cache is
//! built and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Fields are public, so a config can be written out directly...
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // ...or validated from a plain integer.
//! assert!(LruCacheConfig::new(0).is_err());
//! let config = LruCacheConfig::new(16).unwrap();
//! assert_eq!(config.capacity().get(), 16);
//! ```

use crate::error::{Error, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Inserting a new
///   key into a full cache evicts exactly one entry, the least recently used.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from a raw capacity, rejecting zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::ZeroCapacity)?;
        Ok(LruCacheConfig { capacity })
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        LruCacheConfig { capacity }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

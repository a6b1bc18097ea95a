#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Operation | Effect on recency | Complexity |
//! |-----------|-------------------|------------|
//! | [`LruCache::get`] / [`LruCache::get_mut`] | hit becomes most recent | O(1) |
//! | [`LruCache::put`] | key becomes most recent, may evict one entry | O(1) |
//! | [`LruCache::peek`] / [`LruCache::contains`] | none | O(1) |
//! | [`LruCache::peek_lru`] / [`LruCache::pop_lru`] | none / removes the back | O(1) |
//! | [`LruCache::remove`] | removes the entry | O(1) |
//! | [`LruCache::iter`] | none, most recent first | O(n) |
//!
//! ## Example
//!
//! ```rust
//! use recency_cache::LruCache;
//! use recency_cache::config::LruCacheConfig;
//!
//! let config = LruCacheConfig::new(2).unwrap();
//! let mut cache = LruCache::init(config, None);
//! cache.put(1, 1);
//! cache.put(2, 2);
//! assert_eq!(cache.get(&1), Some(&1)); // 1 becomes most recently used
//! cache.put(3, 3);                     // 2 evicted (least recently used)
//! assert!(cache.get(&2).is_none());
//! cache.put(4, 4);                     // 1 evicted
//! assert!(cache.get(&1).is_none());
//! assert_eq!(cache.get(&3), Some(&3));
//! assert_eq!(cache.get(&4), Some(&4));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`config`]: Cache configuration
//! - [`error`]: Construction errors

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Index-linked doubly linked list with sentinel slots.
///
/// Internal infrastructure that tracks recency order for [`LruCache`]. Nodes
/// are arena slots addressed by `usize`, so no pointers are shared between
/// the list and the cache's index.
pub(crate) mod list;

/// Cache configuration.
///
/// Provides the configuration structure for the LRU cache.
pub mod config;

/// Construction errors.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

pub use config::LruCacheConfig;
pub use error::{Error, Result};
pub use lru::LruCache;

//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache with O(1) operations for
//! lookup, insertion, update and eviction.
//!
//! # Algorithm
//!
//! Entries are kept in order of recency of use. Every hit and every write
//! moves the touched entry to the front; when a new key arrives while the
//! cache is full, the entry at the back (the least recently used) is evicted.
//!
//! # Layout
//!
//! The cache pairs a hash index with a recency list:
//!
//! - the recency list owns every `(key, value)` pair in an arena of slots,
//!   threaded from most to least recently used between two sentinel slots;
//! - the index is a `hashbrown::HashTable` of slot numbers. It hashes and
//!   compares through the arena, so each key is stored exactly once.
//!
//! Slots are addressed by index, not by pointer, so the cache contains no
//! `unsafe` code and is `Send`/`Sync` whenever its keys, values and hasher
//! are. Up to [`PREALLOCATED_ENTRIES`] entries are reserved up front; larger
//! caches grow their storage as they fill, never past `capacity`. Slots are
//! recycled on eviction, so a full cache does not grow.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the number of entries held
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache with a synchronization primitive such as `Mutex`.

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::list::{self, RecencyList};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

use hashbrown::{DefaultHashBuilder, HashTable};

/// Upper bound on the number of entries reserved when a cache is built.
///
/// A cache whose capacity is at most this never reallocates its storage.
pub const PREALLOCATED_ENTRIES: usize = 4096;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When a new key is inserted
/// into a full cache, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // Add items to the cache
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<(K, V)>,
    index: HashTable<usize>,
    hash_builder: S,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache that holds at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a raw capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`](crate::Error::ZeroCapacity) if `cap` is zero.
    ///
    /// ```
    /// use recency_cache::{Error, LruCache};
    ///
    /// assert_eq!(LruCache::<u32, u32>::try_new(0).unwrap_err(), Error::ZeroCapacity);
    /// assert_eq!(LruCache::<u32, u32>::try_new(4).unwrap().cap().get(), 4);
    ///
    /// // Huge capacities are fine: storage grows with the entries.
    /// let mut unbounded = LruCache::<u32, u32>::try_new(usize::MAX).unwrap();
    /// unbounded.put(1, 1);
    /// assert_eq!(unbounded.get(&1), Some(&1));
    /// ```
    pub fn try_new(cap: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        let config = LruCacheConfig::new(cap)?;
        Ok(LruCache::init(config, None))
    }

    /// Creates a new LRU cache from a config, using `hash_builder` or a
    /// default one when `None`.
    pub fn init(
        config: LruCacheConfig,
        hash_builder: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_config(config, hash_builder.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::with_config(LruCacheConfig::from(cap), hash_builder)
    }

    fn with_config(config: LruCacheConfig, hash_builder: S) -> Self {
        let reserve = config.capacity().get().min(PREALLOCATED_ENTRIES);
        LruCache {
            config,
            list: RecencyList::with_capacity(reserve),
            index: HashTable::with_capacity(reserve),
            hash_builder,
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    /// Returns the number of entries currently in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Looks up the arena slot holding `key`.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let list = &self.list;
        self.index.find(hash, |&idx| holds_key(list, idx, key)).copied()
    }

    /// Returns a reference to the value for `key` and marks it most recently
    /// used. Returns `None` on a miss, leaving recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        self.list.move_to_front(idx);
        self.list.get(idx).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        self.list.move_to_front(idx);
        self.list.get_mut(idx).map(|(_, v)| v)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        self.list.get(idx).map(|(_, v)| v)
    }

    /// Returns true if `key` is cached. Does not change recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// - If `key` was already cached its value is replaced in place and the
    ///   previous pair is returned. Nothing is evicted.
    /// - If `key` is new and the cache is full, the least recently used entry
    ///   is evicted and returned.
    /// - Otherwise `None` is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(idx) = self.find(&key) {
            self.list.move_to_front(idx);
            return self.list.replace(idx, (key, value));
        }

        // The incoming key is never the victim, so evicting first leaves the
        // same survivors as inserting first and keeps the index within `cap`.
        let evicted = if self.list.len() >= self.cap().get() {
            self.pop_lru()
        } else {
            None
        };

        let hash = self.hash_builder.hash_one(&key);
        let idx = self.list.insert_front((key, value));
        let LruCache {
            list,
            index,
            hash_builder,
            ..
        } = self;
        index.insert_unique(hash, idx, |&slot| slot_hash(hash_builder, list, slot));
        evicted
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (idx, (key, value)) = self.list.pop_back()?;
        let hash = self.hash_builder.hash_one(&key);
        if let Ok(entry) = self.index.find_entry(hash, |&slot| slot == idx) {
            entry.remove();
        }
        Some((key, value))
    }

    /// Removes `key` from the cache, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let list = &self.list;
        let entry = self
            .index
            .find_entry(hash, |&idx| holds_key(list, idx, key))
            .ok()?;
        let (idx, _) = entry.remove();
        self.list.remove(idx).map(|(_, v)| v)
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    /// Iterates over the entries from most to least recently used without
    /// changing recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

fn holds_key<K, V, Q>(list: &RecencyList<(K, V)>, idx: usize, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    list.get(idx).is_some_and(|(k, _)| k.borrow() == key)
}

// Rehashing only ever visits slots that the index points at, all of which are live.
fn slot_hash<K: Hash, V, S: BuildHasher>(
    hash_builder: &S,
    list: &RecencyList<(K, V)>,
    idx: usize,
) -> u64 {
    list.get(idx).map_or(0, |(k, _)| hash_builder.hash_one(k))
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// An iterator over the entries of an [`LruCache`], from most to least
/// recently used.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.len()).finish()
    }
}

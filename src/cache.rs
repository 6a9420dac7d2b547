//! Memoization of replayed positions.
//!
//! Replaying a long game from scratch is the expensive part of showing it,
//! and the same prefix gets replayed over and over while a game is browsed.
//! [`PositionCache`] maps a [`CacheKey`] (every input that can influence the
//! result, the full move list included) to the finished position. Since a key
//! captures the whole input, entries never go stale and are only ever dropped
//! by least-recently-used eviction.
//!
//! The cache is an explicit object handed to [`replay`](crate::engine::replay)
//! and is safe to share between threads.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::coord::Cell;
use crate::game::InitialState;
use crate::position::Position;

/// Everything that determines the outcome of a replay.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub width: i32,
    pub height: i32,
    pub initial_state: Option<InitialState>,
    pub white_goes_first: bool,
    /// The effective move list, after limit and variation were applied
    pub moves: Vec<Cell>,
    pub free_handicap_placement: bool,
    pub handicap: u32,
    pub removed_stones: Option<String>,
    pub white_scoring_positions: Option<String>,
    pub black_scoring_positions: Option<String>,
    pub compute_territory: bool,
    pub score_stones: bool,
    /// Bit pattern of the komi override, if any
    pub komi_bits: Option<u32>,
}

struct Entry {
    position: Arc<Position>,
    stamp: u64,
}

#[derive(Default)]
struct Lru {
    entries: FxHashMap<Arc<CacheKey>, Entry>,
    /// Recency index: stamp -> key, oldest first
    order: BTreeMap<u64, Arc<CacheKey>>,
    clock: u64,
}

impl Lru {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// A fixed-capacity, least-recently-used map from [`CacheKey`] to position.
///
/// A capacity of zero gives a pass-through cache that never stores anything.
pub struct PositionCache {
    capacity: usize,
    inner: Mutex<Lru>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PositionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Lru::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Lru> {
        // Every critical section leaves the table consistent, so a poisoned
        // lock is still safe to use.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up `key`, marking it as recently used on a hit.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Position>> {
        let mut guard = self.lock();
        let lru = &mut *guard;
        let stamp = lru.tick();
        let Some(entry) = lru.entries.get_mut(key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        let old = std::mem::replace(&mut entry.stamp, stamp);
        if let Some(k) = lru.order.remove(&old) {
            lru.order.insert(stamp, k);
        }
        self.hits.fetch_add(1, Ordering::Relaxed);
        trace!(moves = key.moves.len(), "position cache hit");
        Some(Arc::clone(&entry.position))
    }

    /// Store `position` under `key`, evicting the least recently used entry
    /// when full.
    pub fn put(&self, key: CacheKey, position: Arc<Position>) {
        if self.capacity == 0 {
            return;
        }
        let mut guard = self.lock();
        let lru = &mut *guard;
        let stamp = lru.tick();
        if let Some(entry) = lru.entries.get_mut(&key) {
            let old = std::mem::replace(&mut entry.stamp, stamp);
            entry.position = position;
            if let Some(k) = lru.order.remove(&old) {
                lru.order.insert(stamp, k);
            }
            return;
        }
        while lru.entries.len() >= self.capacity {
            let Some((_, oldest)) = lru.order.pop_first() else {
                break;
            };
            lru.entries.remove(&oldest);
            debug!(moves = oldest.moves.len(), "evicted cached position");
        }
        let key = Arc::new(key);
        lru.order.insert(stamp, Arc::clone(&key));
        lru.entries.insert(key, Entry { position, stamp });
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut lru = self.lock();
        lru.entries.clear();
        lru.order.clear();
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to be computed.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(moves: &[(i32, i32)]) -> CacheKey {
        CacheKey {
            width: 9,
            height: 9,
            initial_state: None,
            white_goes_first: false,
            moves: moves.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            free_handicap_placement: false,
            handicap: 0,
            removed_stones: None,
            white_scoring_positions: None,
            black_scoring_positions: None,
            compute_territory: false,
            score_stones: false,
            komi_bits: None,
        }
    }

    fn pos() -> Arc<Position> {
        Arc::new(Position::new(9, 9))
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = PositionCache::new(4);
        assert!(cache.get(&key(&[(1, 1)])).is_none());
        let p = pos();
        cache.put(key(&[(1, 1)]), Arc::clone(&p));
        let found = cache.get(&key(&[(1, 1)])).unwrap();
        assert!(Arc::ptr_eq(&found, &p));
        assert!(cache.get(&key(&[(1, 2)])).is_none());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = PositionCache::new(2);
        cache.put(key(&[(0, 0)]), pos());
        cache.put(key(&[(1, 1)]), pos());
        // Touch the first so the second becomes the oldest.
        assert!(cache.get(&key(&[(0, 0)])).is_some());
        cache.put(key(&[(2, 2)]), pos());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(&[(0, 0)])).is_some());
        assert!(cache.get(&key(&[(1, 1)])).is_none());
        assert!(cache.get(&key(&[(2, 2)])).is_some());
    }

    #[test]
    fn test_put_existing_key_replaces() {
        let cache = PositionCache::new(2);
        cache.put(key(&[]), pos());
        let newer = pos();
        cache.put(key(&[]), Arc::clone(&newer));
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&cache.get(&key(&[])).unwrap(), &newer));
    }

    #[test]
    fn test_zero_capacity_is_pass_through() {
        let cache = PositionCache::new(0);
        cache.put(key(&[]), pos());
        assert!(cache.is_empty());
        assert!(cache.get(&key(&[])).is_none());
    }

    #[test]
    fn test_clear() {
        let cache = PositionCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);
        cache.put(key(&[]), pos());
        cache.clear();
        assert!(cache.is_empty());
    }
}

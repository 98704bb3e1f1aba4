//! Bounded TTL caches.
//!
//! Entries expire after a fixed TTL; when full, the oldest insertion is
//! evicted. All access goes through one mutex, which is never held while a
//! value is being computed.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::classification::Classification;
use crate::observation::Observation;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> Inner<K, V> {
    fn prune_expired(&mut self, now: Instant) {
        let entries = &mut self.entries;
        entries.retain(|_, e| e.expires_at > now);
        self.order.retain(|k| entries.contains_key(k));
    }

    fn remove(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

/// Thread-safe map with bounded size and per-entry expiry.
pub struct TtlCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    /// A capacity of zero disables storage.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity.min(1024)),
                order: VecDeque::new(),
            }),
            capacity,
            ttl,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Cached value, or compute and store one.
    ///
    /// Concurrent misses on the same key may each compute; the last insert
    /// wins.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(v) = self.get(&key) {
            return v;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    /// Live entries, after dropping expired ones.
    pub fn len(&self) -> usize {
        let mut inner = self.inner.lock();
        inner.prune_expired(Instant::now());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut inner = self.inner.lock();
        let expired = match inner.entries.get(key) {
            Some(e) if e.expires_at > now => return Some(e.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.remove(key);
        }
        None
    }

    fn insert_at(&self, key: K, value: V, now: Instant) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.lock();
        inner.remove(&key);
        if inner.entries.len() >= self.capacity {
            inner.prune_expired(now);
        }
        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Full-precision cache key for an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationKey {
    lat_bits: u64,
    lon_bits: u64,
    unix_secs: i64,
    nanos: u32,
}

impl From<&Observation> for ObservationKey {
    fn from(obs: &Observation) -> Self {
        Self {
            lat_bits: obs.latitude().to_bits(),
            lon_bits: obs.longitude().to_bits(),
            unix_secs: obs.instant().timestamp(),
            nanos: obs.instant().timestamp_subsec_nanos(),
        }
    }
}

/// Memoized classifications keyed on position and exact instant.
#[derive(Debug)]
pub struct ClassificationCache {
    inner: TtlCache<ObservationKey, Classification>,
}

impl ClassificationCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: TtlCache::new(capacity, ttl),
        }
    }

    pub fn get(&self, obs: &Observation) -> Option<Classification> {
        self.inner.get(&ObservationKey::from(obs))
    }

    pub fn insert(&self, obs: &Observation, classification: Classification) {
        self.inner.insert(ObservationKey::from(obs), classification);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn get_after_insert() {
        let c = TtlCache::new(4, HOUR);
        c.insert("a", 1);
        assert_eq!(c.get(&"a"), Some(1));
        assert_eq!(c.get(&"b"), None);
    }

    #[test]
    fn expired_entries_vanish() {
        let c = TtlCache::new(4, HOUR);
        let t0 = Instant::now();
        c.insert_at("a", 1, t0);
        assert_eq!(c.get_at(&"a", t0 + HOUR / 2), Some(1));
        assert_eq!(c.get_at(&"a", t0 + HOUR), None);
        assert!(c.is_empty());
    }

    #[test]
    fn oldest_evicted_at_capacity() {
        let c = TtlCache::new(2, HOUR);
        c.insert("a", 1);
        c.insert("b", 2);
        c.insert("c", 3);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(&"a"), None);
        assert_eq!(c.get(&"c"), Some(3));
    }

    #[test]
    fn reinsert_refreshes_position() {
        let c = TtlCache::new(2, HOUR);
        c.insert("a", 1);
        c.insert("b", 2);
        c.insert("a", 10);
        c.insert("c", 3);
        assert_eq!(c.get(&"a"), Some(10));
        assert_eq!(c.get(&"b"), None);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let c = TtlCache::new(0, HOUR);
        c.insert("a", 1);
        assert_eq!(c.get(&"a"), None);
    }

    #[test]
    fn get_or_insert_computes_once() {
        let c = TtlCache::new(4, HOUR);
        let mut calls = 0;
        assert_eq!(c.get_or_insert_with(1, || { calls += 1; 2.0 }), 2.0);
        assert_eq!(c.get_or_insert_with(1, || { calls += 1; 3.0 }), 2.0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn key_distinguishes_time_of_day() {
        let a = Observation::new(40.0, 10.0, Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap()).unwrap();
        let b = Observation::new(40.0, 10.0, Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()).unwrap();
        let c = Observation::new(
            40.0,
            10.0,
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap() + chrono::Duration::nanoseconds(1),
        )
        .unwrap();
        assert_ne!(ObservationKey::from(&a), ObservationKey::from(&b));
        assert_ne!(ObservationKey::from(&a), ObservationKey::from(&c));
        assert_eq!(ObservationKey::from(&a), ObservationKey::from(&a));
    }
}

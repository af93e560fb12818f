use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

/// Upper bound on slots reserved up front for very large capacities.
const PREALLOCATE_LIMIT: usize = 4096;

struct Entry<V> {
    value: V,
    written_at: Instant,
    seq: u64,
}

/// Result of looking a key up in the table.
pub(super) enum Lookup<V> {
    Hit(V),
    Expired,
    Absent,
}

/// Outcome of admitting a value.
pub(super) struct Admission<V> {
    /// The value now resident for the key.
    pub(super) value: V,
    /// Whether an entry was dropped to make room.
    pub(super) evicted: bool,
    /// Whether a stale entry for the same key was dropped first.
    pub(super) expired: bool,
}

/// Key/value storage with recency ordering and write timestamps.
///
/// `order` maps a monotonically increasing sequence number to its key, so
/// the first entry is always the least recently written or read one.
pub(super) struct EntryTable<K, V> {
    entries: HashMap<K, Entry<V>>,
    order: BTreeMap<u64, K>,
    next_seq: u64,
    capacity: usize,
    ttl: Option<Duration>,
}

impl<K, V> EntryTable<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(super) fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
            order: BTreeMap::new(),
            next_seq: 0,
            capacity,
            ttl,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_expired(&self, entry: &Entry<V>, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(entry.written_at) >= ttl,
            None => false,
        }
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Returns the resident value, refreshing its recency but not its age.
    /// An expired entry is removed on the way.
    pub(super) fn lookup(&mut self, key: &K, now: Instant) -> Lookup<V> {
        let Some(entry) = self.entries.get(key) else {
            return Lookup::Absent;
        };
        if self.is_expired(entry, now) {
            self.remove(key);
            return Lookup::Expired;
        }

        let seq = self.bump();
        let Some(entry) = self.entries.get_mut(key) else {
            return Lookup::Absent;
        };
        if let Some(k) = self.order.remove(&entry.seq) {
            self.order.insert(seq, k);
        }
        entry.seq = seq;
        Lookup::Hit(entry.value.clone())
    }

    pub(super) fn contains(&self, key: &K, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    /// Stores `value` under `key` with a fresh timestamp, evicting the least
    /// recent entry first if the key is new and the table is full.
    pub(super) fn admit(&mut self, key: K, value: V, now: Instant) -> Admission<V> {
        let seq = self.bump();

        if let Some(entry) = self.entries.get_mut(&key) {
            if let Some(k) = self.order.remove(&entry.seq) {
                self.order.insert(seq, k);
            }
            entry.seq = seq;
            entry.value = value.clone();
            entry.written_at = now;
            return Admission {
                value,
                evicted: false,
                expired: false,
            };
        }

        let evicted = self.entries.len() >= self.capacity && self.evict_oldest();
        self.order.insert(seq, key.clone());
        self.entries.insert(
            key,
            Entry {
                value: value.clone(),
                written_at: now,
                seq,
            },
        );
        Admission {
            value,
            evicted,
            expired: false,
        }
    }

    /// Like [`admit`](Self::admit), but keeps a live resident value instead
    /// of overwriting it. Used for reader fills that raced with a `put`.
    pub(super) fn admit_if_absent(&mut self, key: K, value: V, now: Instant) -> Admission<V> {
        let mut expired = false;
        if let Some(entry) = self.entries.get(&key) {
            if !self.is_expired(entry, now) {
                return Admission {
                    value: entry.value.clone(),
                    evicted: false,
                    expired: false,
                };
            }
            self.remove(&key);
            expired = true;
        }

        let mut admission = self.admit(key, value, now);
        admission.expired = expired;
        admission
    }

    pub(super) fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry.value)
    }

    fn evict_oldest(&mut self) -> bool {
        while let Some((_, key)) = self.order.pop_first() {
            if self.entries.remove(&key).is_some() {
                return true;
            }
        }
        false
    }

    /// Removes every entry whose TTL has elapsed, returning how many.
    pub(super) fn purge_expired(&mut self, now: Instant) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let before = self.entries.len();
        let order = &mut self.order;
        self.entries.retain(|_, entry| {
            let keep = now.saturating_duration_since(entry.written_at) < ttl;
            if !keep {
                order.remove(&entry.seq);
            }
            keep
        });
        before - self.entries.len()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub(super) fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|entry| &entry.value)
    }
}

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use super::config::{CacheBuilder, CacheConfig};
use super::delegate::{Reader, Writer};
use super::entries::{Admission, EntryTable, Lookup};
use super::error::CacheError;
use super::purge::{Purge, PurgeTask};
use super::stats::{CacheStats, Counters};

/// State shared between the cache handle and its purge task.
struct Shared<K, V> {
    table: Mutex<EntryTable<K, V>>,
    counters: Counters,
}

impl<K, V> Shared<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn record(&self, admission: &Admission<V>) {
        if admission.evicted {
            self.counters.evicted(1);
            debug!("evicted least recent cache entry");
        }
        if admission.expired {
            self.counters.expired(1);
        }
    }
}

impl<K, V> Purge for Shared<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn purge_expired(&self) -> usize {
        let removed = self.table.lock().purge_expired(Instant::now());
        self.counters.expired(removed);
        removed
    }
}

/// A size-bounded, expiring key/value cache safe for concurrent use.
///
/// Entries are evicted least-recently-used first when the cache is full.
/// With a time-to-live set, an entry stops being returned once that much
/// time has passed since it was last written; reads do not extend it.
/// Expired entries are dropped lazily by [`get`](Self::get), by
/// [`purge_expired`](Self::purge_expired), or by a background task when a
/// purge interval is configured.
///
/// Reader and writer delegates run outside the internal lock.
pub struct BoundedCache<K, V> {
    shared: Arc<Shared<K, V>>,
    reader: Option<Box<dyn Reader<K, V>>>,
    writer: Option<Box<dyn Writer<K, V>>>,
    config: CacheConfig,
    purger: Mutex<Option<PurgeTask>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Returns a builder for a cache holding at most `capacity` entries.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }

    /// Creates a cache without reader or writer from a plain config.
    pub fn new(config: CacheConfig) -> Result<Arc<Self>, CacheError> {
        CacheBuilder::from_config(config).build()
    }

    pub(super) fn from_builder(builder: CacheBuilder<K, V>) -> Result<Self, CacheError> {
        let CacheBuilder {
            config,
            reader,
            writer,
        } = builder;

        let shared = Arc::new(Shared {
            table: Mutex::new(EntryTable::new(config.capacity, config.ttl())),
            counters: Counters::default(),
        });

        let purger = match config.purge_interval() {
            Some(period) => Some(PurgeTask::spawn(Arc::downgrade(&shared), period)?),
            None => None,
        };

        Ok(Self {
            shared,
            reader,
            writer,
            config,
            purger: Mutex::new(purger),
        })
    }

    /// Returns the value for `key`, loading it through the reader on a miss.
    ///
    /// A loaded value is cached without calling the writer. A reader error
    /// is returned and leaves the cache untouched.
    pub fn get(&self, key: &K) -> Result<Option<V>, CacheError> {
        let lookup = self.shared.table.lock().lookup(key, Instant::now());
        match lookup {
            Lookup::Hit(value) => {
                self.shared.counters.hit();
                return Ok(Some(value));
            }
            Lookup::Expired => {
                self.shared.counters.expired(1);
                self.shared.counters.miss();
                trace!("cache entry expired on read");
            }
            Lookup::Absent => {
                self.shared.counters.miss();
                trace!("cache miss");
            }
        }

        let Some(reader) = &self.reader else {
            return Ok(None);
        };

        let loaded = reader.read(key).map_err(|e| {
            warn!(error = %e, "cache reader failed");
            CacheError::Reader(e)
        })?;
        let Some(value) = loaded else {
            trace!("cache reader found no value");
            return Ok(None);
        };

        self.shared.counters.load();
        trace!("cache reader loaded value");
        let admission = self
            .shared
            .table
            .lock()
            .admit_if_absent(key.clone(), value, Instant::now());
        self.shared.record(&admission);
        Ok(Some(admission.value))
    }

    /// Stores `value` under `key` after the writer, if any, accepts it.
    ///
    /// On writer failure the error is returned and the cache, including any
    /// previous value for `key`, is left exactly as it was.
    pub fn put(&self, key: K, value: V) -> Result<(), CacheError> {
        if let Some(writer) = &self.writer {
            writer.write(&key, &value).map_err(|e| {
                warn!(error = %e, "cache writer failed");
                CacheError::Writer(e)
            })?;
        }

        let admission = self.shared.table.lock().admit(key, value, Instant::now());
        self.shared.record(&admission);
        Ok(())
    }

    /// Returns true if `key` is resident and not expired.
    ///
    /// Does not call the reader or affect eviction order.
    pub fn contains(&self, key: &K) -> bool {
        self.shared.table.lock().contains(key, Instant::now())
    }

    /// Removes `key` without calling the writer, returning the old value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shared.table.lock().remove(key)
    }

    /// Returns the number of resident entries, counting ones that have
    /// expired but not yet been removed.
    pub fn len(&self) -> usize {
        self.shared.table.lock().len()
    }

    /// Returns the resident entry count; same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry whose time-to-live has elapsed and returns how
    /// many were removed. Does nothing without a time-to-live.
    pub fn purge_expired(&self) -> usize {
        let removed = self.shared.purge_expired();
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
        removed
    }

    pub fn clear(&self) {
        self.shared.table.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn time_to_live(&self) -> Option<Duration> {
        self.config.ttl()
    }

    pub fn time_to_purge(&self) -> Option<Duration> {
        self.config.purge_interval()
    }

    pub fn stats(&self) -> CacheStats {
        self.shared.counters.snapshot()
    }

    /// Returns true while a background purge task is attached.
    pub fn is_purging(&self) -> bool {
        self.purger.lock().is_some()
    }

    /// Stops the background purge task. Foreground operations keep working
    /// and [`purge_expired`](Self::purge_expired) can still be called.
    pub fn close(&self) {
        if self.purger.lock().take().is_some() {
            debug!("closed cache background purge");
        }
    }

    #[cfg(test)]
    pub(super) fn downgrade_shared(&self) -> std::sync::Weak<impl Purge> {
        Arc::downgrade(&self.shared)
    }

    /// Sums `measure` over every resident value, expired or not.
    pub(super) fn sum_values(&self, measure: impl Fn(&V) -> usize) -> usize {
        self.shared.table.lock().values().map(measure).sum()
    }
}

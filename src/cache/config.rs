use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use super::bounded::BoundedCache;
use super::delegate::{Reader, Writer};
use super::error::{CacheError, DelegateError};
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_TIME_TO_LIVE, DEFAULT_TIME_TO_PURGE};

/// Sizing and expiration settings for a [`BoundedCache`].
///
/// A zero `time_to_live` or `time_to_purge` is treated the same as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries. Must be greater than zero.
    pub capacity: usize,
    /// Age after which an entry is no longer returned.
    pub time_to_live: Option<Duration>,
    /// Interval between background sweeps of expired entries.
    pub time_to_purge: Option<Duration>,
}

impl CacheConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(())
    }

    pub(super) fn ttl(&self) -> Option<Duration> {
        self.time_to_live.filter(|d| !d.is_zero())
    }

    pub(super) fn purge_interval(&self) -> Option<Duration> {
        self.time_to_purge.filter(|d| !d.is_zero())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            time_to_live: DEFAULT_TIME_TO_LIVE,
            time_to_purge: DEFAULT_TIME_TO_PURGE,
        }
    }
}

/// Builder for [`BoundedCache`].
///
/// Everything configured here is fixed once [`build`](Self::build) returns.
pub struct CacheBuilder<K, V> {
    pub(super) config: CacheConfig,
    pub(super) reader: Option<Box<dyn Reader<K, V>>>,
    pub(super) writer: Option<Box<dyn Writer<K, V>>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(CacheConfig::new(capacity))
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self {
            config,
            reader: None,
            writer: None,
        }
    }

    pub fn time_to_live(mut self, ttl: Duration) -> Self {
        self.config.time_to_live = Some(ttl);
        self
    }

    pub fn time_to_purge(mut self, interval: Duration) -> Self {
        self.config.time_to_purge = Some(interval);
        self
    }

    /// Sets a closure that loads missing keys.
    pub fn reader<F>(self, reader: F) -> Self
    where
        F: Fn(&K) -> Result<Option<V>, DelegateError> + Send + Sync + 'static,
    {
        self.read_through(reader)
    }

    /// Sets a [`Reader`] strategy object that loads missing keys.
    pub fn read_through(mut self, reader: impl Reader<K, V> + 'static) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Sets a closure that must accept every `put` before it is cached.
    pub fn writer<F>(self, writer: F) -> Self
    where
        F: Fn(&K, &V) -> Result<(), DelegateError> + Send + Sync + 'static,
    {
        self.write_through(writer)
    }

    /// Sets a [`Writer`] strategy object that must accept every `put`.
    pub fn write_through(mut self, writer: impl Writer<K, V> + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Validates the configuration and creates the cache.
    ///
    /// With a purge interval set, this spawns the sweep task on the current
    /// tokio runtime and fails with [`CacheError::NoRuntime`] outside one.
    pub fn build(self) -> Result<Arc<BoundedCache<K, V>>, CacheError> {
        self.config.validate()?;
        BoundedCache::from_builder(self).map(Arc::new)
    }
}

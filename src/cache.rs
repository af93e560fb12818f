//! Bounded in-memory caching with expiration.
//!
//! [`BoundedCache`] memoizes data the sync engine would otherwise refetch
//! from disk or from peers, such as chunk payloads or file metadata, while
//! keeping memory bounded over a long-lived process.
//!
//! # Overview
//!
//! - **Capacity**: at most `capacity` entries are resident; admitting a new
//!   key into a full cache evicts the least recently used entry.
//! - **Time to live**: entries older than the TTL (measured from their last
//!   write) are never returned, and are removed on the next read of that key.
//! - **Purging**: [`BoundedCache::purge_expired`] sweeps expired entries on
//!   demand; a purge interval runs the same sweep from a background task.
//! - **Read-through**: a [`Reader`] fills misses; filled values are cached.
//! - **Write-through**: a [`Writer`] must accept every `put` before the value
//!   is cached. A failed write leaves the cache untouched.
//!
//! # Examples
//!
//! ## Capacity and write-through
//!
//! ```
//! use syncdata::cache::BoundedCache;
//!
//! let cache = BoundedCache::<String, u64>::builder(2)
//!     .writer(|_key, value| {
//!         if *value == 0 {
//!             return Err("zero is not a valid size".into());
//!         }
//!         Ok(())
//!     })
//!     .build()?;
//!
//! cache.put("a".to_string(), 1)?;
//! cache.put("b".to_string(), 2)?;
//! assert!(cache.put("c".to_string(), 0).is_err());
//! cache.put("c".to_string(), 3)?;
//!
//! assert_eq!(cache.len(), 2);
//! assert_eq!(cache.get(&"a".to_string())?, None);
//! assert_eq!(cache.get(&"c".to_string())?, Some(3));
//! # Ok::<(), syncdata::cache::CacheError>(())
//! ```
//!
//! ## Read-through chunk payloads
//!
//! ```
//! use bytes::Bytes;
//! use syncdata::cache::{BoundedCache, ChunkKey};
//!
//! let cache = BoundedCache::<ChunkKey, Bytes>::builder(64)
//!     .reader(|key| Ok(Some(Bytes::from(vec![key.index as u8; 4]))))
//!     .build()?;
//!
//! let payload = cache.get(&ChunkKey::new("file-a", 7))?;
//! assert_eq!(payload, Some(Bytes::from_static(&[7, 7, 7, 7])));
//! assert_eq!(cache.payload_bytes(), 4);
//! # Ok::<(), syncdata::cache::CacheError>(())
//! ```

mod bounded;
mod chunk_store;
mod config;
mod delegate;
mod entries;
mod error;
mod purge;
mod stats;

pub use bounded::BoundedCache;
pub use chunk_store::{ChunkKey, ChunkPayloadCache};
pub use config::{CacheBuilder, CacheConfig};
pub use delegate::{Reader, Writer};
pub use error::{CacheError, DelegateError};
pub use stats::CacheStats;

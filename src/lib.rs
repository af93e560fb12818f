//! syncdata - Shared data structures for a multi-node file sync service
//!
//! Nodes exchange files in fixed-size chunks. This library provides the
//! state those transfers depend on: which chunks of a file are done, and a
//! bounded, expiring cache for chunk payloads and metadata.
//!
//! # Modules
//!
//! - [`chunk`] - Per-file chunk completion flags
//! - [`cache`] - Bounded cache with TTL, purging, read-through and write-through
//! - [`constants`] - Capacity limits and cache defaults
//!
//! Disk and network access stay outside this crate; callers plug them into
//! the cache through [`cache::Reader`] and [`cache::Writer`].

pub mod cache;
pub mod chunk;
pub mod constants;

pub use cache::{
    BoundedCache, CacheBuilder, CacheConfig, CacheError, CacheStats, ChunkKey, ChunkPayloadCache,
    DelegateError, Reader, Writer,
};
pub use chunk::{ChunkFlags, MissingChunks, OutOfRangeError};
pub use constants::MAX_CHUNKS;

//! Capacity limits and tuning defaults.
//!
//! This module collects the fixed sizes used by the chunk completion tracker
//! and the defaults applied by [`CacheConfig`](crate::cache::CacheConfig)
//! when a caller does not override them.

use std::time::Duration;

// ============================================================================
// Chunk tracking
// ============================================================================

/// Width in bits of one storage word in [`ChunkFlags`](crate::chunk::ChunkFlags)
pub const FLAG_WORD_BITS: usize = u64::BITS as usize;

/// Maximum number of chunks a single file transfer can track.
/// Must stay a multiple of [`FLAG_WORD_BITS`].
pub const MAX_CHUNKS: usize = 2048;

/// Number of storage words backing one flag set
pub const FLAG_WORDS: usize = MAX_CHUNKS / FLAG_WORD_BITS;

const _: () = assert!(MAX_CHUNKS % FLAG_WORD_BITS == 0);

// ============================================================================
// Cache defaults
// ============================================================================

/// Default number of resident cache entries
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Default entry lifetime (None: entries never expire by age)
pub const DEFAULT_TIME_TO_LIVE: Option<Duration> = None;

/// Default background sweep interval (None: no background sweep)
pub const DEFAULT_TIME_TO_PURGE: Option<Duration> = None;

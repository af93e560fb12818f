//! Per-file chunk completion tracking.
//!
//! Files are synchronized in fixed-size chunks so that a failed transfer can
//! resume without starting over. A [`ChunkFlags`] records which chunks of one
//! file have been fully transferred.
//!
//! # Examples
//!
//! ```
//! use syncdata::chunk::ChunkFlags;
//!
//! let mut flags = ChunkFlags::with_chunks(3)?;
//! flags.set_flag(0)?;
//! flags.set_flag(2)?;
//!
//! assert_eq!(flags.first_missing(), Some(1));
//! assert!(!flags.is_complete());
//!
//! flags.set_flag(1)?;
//! assert!(flags.is_complete());
//! # Ok::<(), syncdata::chunk::OutOfRangeError>(())
//! ```

mod error;
mod flags;

pub use error::OutOfRangeError;
pub use flags::{ChunkFlags, MissingChunks};

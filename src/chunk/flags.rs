use std::fmt;

use super::error::OutOfRangeError;
use crate::constants::{FLAG_WORDS, FLAG_WORD_BITS, MAX_CHUNKS};

/// Completion flags for the chunks of one file.
///
/// Holds up to [`MAX_CHUNKS`] flags packed into fixed-width words, so every
/// operation is O(1) and nothing is allocated after construction. Bit `i`
/// lives in word `i / 64` at position `i % 64`.
///
/// Indices in `[num_chunks, MAX_CHUNKS)` can be read and written without
/// touching the active range; indices at or past `MAX_CHUNKS` are rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkFlags {
    words: [u64; FLAG_WORDS],
    num_chunks: usize,
}

impl ChunkFlags {
    /// Creates an empty flag set tracking zero chunks.
    pub fn new() -> Self {
        Self {
            words: [0; FLAG_WORDS],
            num_chunks: 0,
        }
    }

    /// Creates a flag set tracking `num_chunks` chunks, all unset.
    pub fn with_chunks(num_chunks: usize) -> Result<Self, OutOfRangeError> {
        let mut flags = Self::new();
        flags.set_num_chunks(num_chunks)?;
        Ok(flags)
    }

    /// Returns the maximum number of chunks any instance can track.
    pub const fn capacity() -> usize {
        MAX_CHUNKS
    }

    /// Sets the active chunk count and clears every flag.
    ///
    /// Used both for the first file and to reuse the instance for another.
    pub fn set_num_chunks(&mut self, num_chunks: usize) -> Result<(), OutOfRangeError> {
        if num_chunks > MAX_CHUNKS {
            return Err(OutOfRangeError {
                value: num_chunks,
                max: MAX_CHUNKS,
            });
        }
        self.words = [0; FLAG_WORDS];
        self.num_chunks = num_chunks;
        Ok(())
    }

    /// Returns the active chunk count.
    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    /// Marks chunk `index` as transferred. Setting a set flag is a no-op.
    pub fn set_flag(&mut self, index: usize) -> Result<(), OutOfRangeError> {
        let (word, mask) = locate(index)?;
        self.words[word] |= mask;
        Ok(())
    }

    /// Marks chunk `index` as not transferred. Clearing a clear flag is a no-op.
    pub fn clear_flag(&mut self, index: usize) -> Result<(), OutOfRangeError> {
        let (word, mask) = locate(index)?;
        self.words[word] &= !mask;
        Ok(())
    }

    /// Returns whether chunk `index` is marked as transferred.
    pub fn is_flag(&self, index: usize) -> Result<bool, OutOfRangeError> {
        let (word, mask) = locate(index)?;
        Ok(self.words[word] & mask != 0)
    }

    /// Returns the number of set flags within the active range.
    pub fn count(&self) -> usize {
        let full = self.num_chunks / FLAG_WORD_BITS;
        let rest = self.num_chunks % FLAG_WORD_BITS;

        let mut total: usize = self.words[..full]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        if rest > 0 {
            total += (self.words[full] & low_mask(rest)).count_ones() as usize;
        }
        total
    }

    /// Returns true once every active chunk is flagged.
    ///
    /// A file with zero chunks is trivially complete.
    pub fn is_complete(&self) -> bool {
        self.count() == self.num_chunks
    }

    /// Sets every flag in the active range.
    pub fn fill(&mut self) {
        let full = self.num_chunks / FLAG_WORD_BITS;
        let rest = self.num_chunks % FLAG_WORD_BITS;

        for word in &mut self.words[..full] {
            *word = u64::MAX;
        }
        if rest > 0 {
            self.words[full] |= low_mask(rest);
        }
    }

    /// Clears every flag, keeping the active chunk count.
    pub fn reset(&mut self) {
        self.words = [0; FLAG_WORDS];
    }

    /// Returns the lowest active index whose flag is not set.
    pub fn first_missing(&self) -> Option<usize> {
        self.missing().next()
    }

    /// Iterates over active indices whose flag is not set, in ascending order.
    pub fn missing(&self) -> MissingChunks<'_> {
        MissingChunks {
            flags: self,
            word: 0,
            pending: self.unset_bits_in(0),
        }
    }

    /// Unset bits of word `word` restricted to the active range.
    fn unset_bits_in(&self, word: usize) -> u64 {
        let start = word * FLAG_WORD_BITS;
        if start >= self.num_chunks {
            return 0;
        }
        let inverted = !self.words[word];
        let remaining = self.num_chunks - start;
        if remaining >= FLAG_WORD_BITS {
            inverted
        } else {
            inverted & low_mask(remaining)
        }
    }
}

impl Default for ChunkFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChunkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkFlags")
            .field("num_chunks", &self.num_chunks)
            .field("set", &self.count())
            .finish()
    }
}

/// Iterator over the indices of chunks that are still missing.
///
/// Created by [`ChunkFlags::missing`]. Skips whole words at a time.
pub struct MissingChunks<'a> {
    flags: &'a ChunkFlags,
    word: usize,
    pending: u64,
}

impl Iterator for MissingChunks<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.pending != 0 {
                let bit = self.pending.trailing_zeros() as usize;
                self.pending &= self.pending - 1;
                return Some(self.word * FLAG_WORD_BITS + bit);
            }
            self.word += 1;
            if self.word * FLAG_WORD_BITS >= self.flags.num_chunks {
                return None;
            }
            self.pending = self.flags.unset_bits_in(self.word);
        }
    }
}

fn locate(index: usize) -> Result<(usize, u64), OutOfRangeError> {
    if index >= MAX_CHUNKS {
        return Err(OutOfRangeError {
            value: index,
            max: MAX_CHUNKS - 1,
        });
    }
    Ok((index / FLAG_WORD_BITS, 1u64 << (index % FLAG_WORD_BITS)))
}

/// Mask with the lowest `bits` bits set, for `bits` in `1..64`.
fn low_mask(bits: usize) -> u64 {
    (1u64 << bits) - 1
}

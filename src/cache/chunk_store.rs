use std::fmt;

use bytes::Bytes;

use super::bounded::BoundedCache;

/// Identifies one chunk of one synchronized file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub file_id: String,
    pub index: u32,
}

impl ChunkKey {
    pub fn new(file_id: impl Into<String>, index: u32) -> Self {
        Self {
            file_id: file_id.into(),
            index,
        }
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file_id, self.index)
    }
}

/// Cache of chunk payloads keyed by file and chunk index.
pub type ChunkPayloadCache = BoundedCache<ChunkKey, Bytes>;

impl BoundedCache<ChunkKey, Bytes> {
    /// Total size in bytes of all resident payloads.
    pub fn payload_bytes(&self) -> usize {
        self.sum_values(Bytes::len)
    }
}

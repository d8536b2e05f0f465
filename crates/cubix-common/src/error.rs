//! Error types for Cubix.

use std::path::PathBuf;

use thiserror::Error;

use crate::coords::ChunkPos;

/// Chunk codec errors.
///
/// Everything except [`CodecError::Io`] means the bytes were readable but are
/// not a valid chunk for the requested coordinate.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying read or write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Magic word did not match
    #[error("bad chunk magic {found:#010x}")]
    BadMagic {
        /// Magic word found in the file
        found: u32,
    },

    /// Format version is not readable by this build
    #[error("unsupported chunk version {found}")]
    UnsupportedVersion {
        /// Version found in the file
        found: i32,
    },

    /// Header coordinate differs from the requested chunk
    #[error("chunk coord mismatch: expected {expected}, found {found}")]
    CoordMismatch {
        /// Requested chunk
        expected: ChunkPos,
        /// Chunk named by the header
        found: ChunkPos,
    },

    /// Payload ended before the grid was filled
    #[error("truncated chunk payload after {filled} cells")]
    Truncated {
        /// Number of cells decoded before the data ran out
        filled: usize,
    },

    /// A run extends past the end of the grid
    #[error("run of {run} at cell {index} overflows the chunk")]
    RunOverflow {
        /// Cell index where the run starts
        index: usize,
        /// Run length
        run: u16,
    },

    /// A run of length zero
    #[error("zero-length run at cell {index}")]
    ZeroLengthRun {
        /// Cell index where the run was read
        index: usize,
    },

    /// Bytes remain after the grid was filled
    #[error("{extra} trailing bytes after chunk payload")]
    TrailingData {
        /// Number of unread bytes
        extra: usize,
    },
}

impl CodecError {
    /// Returns true if the data was read but is not a valid chunk file.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// World and world-directory errors.
#[derive(Debug, Error)]
pub enum WorldError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// World metadata could not be read or written
    #[error("world metadata error: {0}")]
    Meta(String),

    /// World id is empty or contains path separators
    #[error("invalid world id: {0:?}")]
    InvalidWorldId(String),

    /// Path resolves outside the saves directory
    #[error("refusing to touch path outside saves directory: {}", .0.display())]
    PathEscape(PathBuf),

    /// Stored chunk exists but could not be decoded
    #[error("failed to load chunk {pos}: {source}")]
    ChunkLoad {
        /// Chunk that failed to load
        pos: ChunkPos,
        /// Decode failure
        #[source]
        source: CodecError,
    },

    /// Chunk failed a strict load earlier this session
    #[error("chunk {0} is unavailable after a failed load")]
    ChunkUnavailable(ChunkPos),
}

/// Result type alias for world operations.
pub type WorldResult<T> = Result<T, WorldError>;

//! Coordinate types for block, chunk, and local positions.
//!
//! A global block coordinate `g` splits into a chunk coordinate
//! `floor(g / CHUNK_SIZE)` and a local offset `g mod CHUNK_SIZE` using floor
//! semantics, so negative coordinates land in the chunk below zero
//! (`-1` is chunk `-1`, local `15`).

use serde::{Deserialize, Serialize};

/// Side length of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Number of blocks in one chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Floor division by the chunk size.
#[must_use]
pub const fn chunk_of(g: i32) -> i32 {
    g.div_euclid(CHUNK_SIZE)
}

/// Floor modulo by the chunk size, always in `[0, CHUNK_SIZE)`.
#[must_use]
pub const fn local_of(g: i32) -> i32 {
    g.rem_euclid(CHUNK_SIZE)
}

/// Global block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate in block space
    pub x: i32,
    /// Y coordinate in block space
    pub y: i32,
    /// Z coordinate in block space
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the chunk containing this block.
    #[must_use]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos {
            x: chunk_of(self.x),
            y: chunk_of(self.y),
            z: chunk_of(self.z),
        }
    }

    /// Returns the offset of this block inside its chunk.
    #[must_use]
    pub const fn local_pos(self) -> LocalPos {
        LocalPos {
            x: local_of(self.x) as u8,
            y: local_of(self.y) as u8,
            z: local_of(self.z) as u8,
        }
    }
}

/// Chunk coordinate, the key of the world's chunk index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ChunkPos {
    /// X coordinate in chunk space
    pub x: i32,
    /// Y coordinate in chunk space
    pub y: i32,
    /// Z coordinate in chunk space
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the global coordinate of the chunk's minimum corner.
    #[must_use]
    pub const fn origin(self) -> BlockPos {
        BlockPos {
            x: self.x * CHUNK_SIZE,
            y: self.y * CHUNK_SIZE,
            z: self.z * CHUNK_SIZE,
        }
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Offset of a block inside its chunk, each axis in `[0, CHUNK_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct LocalPos {
    /// X offset within chunk
    pub x: u8,
    /// Y offset within chunk
    pub y: u8,
    /// Z offset within chunk
    pub z: u8,
}

impl LocalPos {
    /// Creates a new local coordinate.
    ///
    /// # Panics
    ///
    /// Panics if any axis is outside `[0, CHUNK_SIZE)`.
    #[must_use]
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        assert!(
            x < size && y < size && z < size,
            "local coordinate ({x}, {y}, {z}) outside chunk of size {size}"
        );
        Self {
            x: x as u8,
            y: y as u8,
            z: z as u8,
        }
    }

    /// Converts to a linear index, y-major then z then x.
    ///
    /// The chunk codec relies on this order staying fixed.
    #[must_use]
    pub const fn to_index(self) -> usize {
        let size = CHUNK_SIZE as usize;
        (self.y as usize * size + self.z as usize) * size + self.x as usize
    }

    /// Creates from a linear index produced by [`LocalPos::to_index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        Self {
            x: (index % size) as u8,
            z: ((index / size) % size) as u8,
            y: (index / (size * size)) as u8,
        }
    }
}

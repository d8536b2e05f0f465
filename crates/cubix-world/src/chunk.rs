//! Dense block grid for one chunk.

use cubix_common::{LocalPos, CHUNK_VOLUME};

use crate::block::BlockId;

/// A cube of `CHUNK_SIZE`³ block codes.
///
/// Cells are stored y-major, then z, then x (see [`LocalPos::to_index`]).
/// A chunk is dirty from construction until a successful save, and again
/// after any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Block data, `CHUNK_VOLUME` cells
    blocks: Box<[BlockId]>,
    /// Whether the chunk differs from what is on disk
    dirty: bool,
}

impl Chunk {
    /// Creates a chunk filled with air. New chunks are dirty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockId::AIR; CHUNK_VOLUME].into_boxed_slice(),
            dirty: true,
        }
    }

    /// Builds a clean chunk from decoded cells.
    pub(crate) fn from_decoded(blocks: Vec<BlockId>) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Self {
            blocks: blocks.into_boxed_slice(),
            dirty: false,
        }
    }

    /// Gets the block at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside `[0, CHUNK_SIZE)`.
    #[must_use]
    pub fn get(&self, lx: usize, ly: usize, lz: usize) -> BlockId {
        self.blocks[LocalPos::new(lx, ly, lz).to_index()]
    }

    /// Sets the block at local coordinates and marks the chunk dirty.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside `[0, CHUNK_SIZE)`.
    pub fn set(&mut self, lx: usize, ly: usize, lz: usize, id: BlockId) {
        self.blocks[LocalPos::new(lx, ly, lz).to_index()] = id;
        self.dirty = true;
    }

    /// Gets the block at a local position.
    #[must_use]
    pub fn get_local(&self, local: LocalPos) -> BlockId {
        self.blocks[local.to_index()]
    }

    /// Sets the block at a local position and marks the chunk dirty.
    pub fn set_local(&mut self, local: LocalPos, id: BlockId) {
        self.blocks[local.to_index()] = id;
        self.dirty = true;
    }

    /// Returns all cells in storage order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Returns whether the chunk has unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the chunk as matching disk.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

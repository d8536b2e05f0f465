//! Sparse chunk index with lazy load-or-generate.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use cubix_common::{BlockPos, ChunkPos, CodecError, WorldError, WorldResult};
use tracing::{debug, warn};

use crate::block::BlockId;
use crate::chunk::Chunk;
use crate::generation::WorldGenerator;
use crate::persistence;
use crate::world_info::WorldInfo;

/// What to do when a stored chunk exists but cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log the failure and generate the chunk from the seed.
    ///
    /// The regenerated chunk is dirty, so the next save replaces the file.
    #[default]
    Regenerate,
    /// Fail fallible lookups and never write over the stored file.
    ///
    /// A chunk that failed this way is quarantined: fallible lookups keep
    /// failing with [`WorldError::ChunkUnavailable`], infallible lookups see a
    /// generated stand-in, and saves skip it.
    Strict,
}

/// A stored chunk that failed to load during this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Chunk coordinate
    pub pos: ChunkPos,
    /// Error description
    pub reason: String,
    /// True for format errors, false for plain IO errors
    pub format_error: bool,
}

/// The authoritative block world.
///
/// Chunks enter memory only through [`World::get_or_create_chunk`] (directly
/// or through block access) and stay for the rest of the session.
#[derive(Debug)]
pub struct World {
    info: WorldInfo,
    generator: WorldGenerator,
    chunks: HashMap<ChunkPos, Chunk>,
    load_policy: LoadPolicy,
    load_failures: Vec<LoadFailure>,
    quarantined: HashSet<ChunkPos>,
}

impl World {
    /// Creates an empty world bound to `seed` and `info`.
    #[must_use]
    pub fn new(seed: u64, info: WorldInfo) -> Self {
        Self::with_generator(WorldGenerator::with_seed(seed), info)
    }

    /// Creates an empty world using a custom generator.
    #[must_use]
    pub fn with_generator(generator: WorldGenerator, info: WorldInfo) -> Self {
        Self {
            info,
            generator,
            chunks: HashMap::new(),
            load_policy: LoadPolicy::default(),
            load_failures: Vec::new(),
            quarantined: HashSet::new(),
        }
    }

    /// Sets the load failure policy.
    pub fn set_load_policy(&mut self, policy: LoadPolicy) {
        self.load_policy = policy;
    }

    /// Returns the load failure policy.
    #[must_use]
    pub const fn load_policy(&self) -> LoadPolicy {
        self.load_policy
    }

    /// Returns the world identity.
    #[must_use]
    pub const fn info(&self) -> &WorldInfo {
        &self.info
    }

    /// Returns the terrain generator.
    #[must_use]
    pub const fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    /// Gets the block at a global coordinate, loading its chunk if needed.
    pub fn get_block(&mut self, x: i32, y: i32, z: i32) -> BlockId {
        let pos = BlockPos::new(x, y, z);
        self.get_or_create_chunk_mut(pos.chunk_pos())
            .get_local(pos.local_pos())
    }

    /// Sets the block at a global coordinate and marks its chunk dirty.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        let pos = BlockPos::new(x, y, z);
        self.get_or_create_chunk_mut(pos.chunk_pos())
            .set_local(pos.local_pos(), id);
    }

    /// Fallible [`World::get_block`], honouring [`LoadPolicy::Strict`].
    pub fn try_get_block(&mut self, x: i32, y: i32, z: i32) -> WorldResult<BlockId> {
        let pos = BlockPos::new(x, y, z);
        Ok(self
            .try_get_or_create_chunk(pos.chunk_pos())?
            .get_local(pos.local_pos()))
    }

    /// Returns the chunk at `pos`, loading or generating it on first access.
    ///
    /// Storage failures always fall back to generation here; they are logged
    /// and recorded in [`World::load_failures`]. Under [`LoadPolicy::Strict`]
    /// the generated chunk is a quarantined stand-in that is never saved.
    pub fn get_or_create_chunk(&mut self, pos: ChunkPos) -> &Chunk {
        self.get_or_create_chunk_mut(pos)
    }

    /// Like [`World::get_or_create_chunk`], but under [`LoadPolicy::Strict`] a
    /// stored chunk that fails to decode is an error and is not cached.
    /// Later lookups of that chunk fail with [`WorldError::ChunkUnavailable`].
    pub fn try_get_or_create_chunk(&mut self, pos: ChunkPos) -> WorldResult<&Chunk> {
        let policy = self.load_policy;
        self.ensure_chunk(pos, policy).map(|chunk| &*chunk)
    }

    /// Returns a loaded chunk without touching storage.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Checks if a chunk is loaded.
    #[must_use]
    pub fn is_loaded(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Returns the number of loaded chunks.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over loaded chunks.
    pub fn chunks(&self) -> impl Iterator<Item = (ChunkPos, &Chunk)> {
        self.chunks.iter().map(|(pos, chunk)| (*pos, chunk))
    }

    /// Returns the coordinates of loaded chunks with unsaved changes, sorted.
    #[must_use]
    pub fn dirty_chunks(&self) -> Vec<ChunkPos> {
        let mut dirty: Vec<_> = self
            .chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_dirty())
            .map(|(pos, _)| *pos)
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Stored chunks that failed to load this session.
    #[must_use]
    pub fn load_failures(&self) -> &[LoadFailure] {
        &self.load_failures
    }

    /// Returns true if a strict load of `pos` failed and its file must not be
    /// overwritten.
    #[must_use]
    pub fn is_quarantined(&self, pos: ChunkPos) -> bool {
        self.quarantined.contains(&pos)
    }

    /// Scans down from `from_y` while the block is air and returns the first
    /// non-air height, or 0 if the scan reaches the bottom.
    pub fn surface_height(&mut self, x: i32, z: i32, from_y: i32) -> i32 {
        let mut y = from_y;
        while y > 0 && self.get_block(x, y, z).is_air() {
            y -= 1;
        }
        y
    }

    /// Fallible [`World::surface_height`], failing on the first unavailable
    /// chunk in the column.
    pub fn try_surface_height(&mut self, x: i32, z: i32, from_y: i32) -> WorldResult<i32> {
        let mut y = from_y;
        while y > 0 && self.try_get_block(x, y, z)?.is_air() {
            y -= 1;
        }
        Ok(y)
    }

    pub(crate) fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    fn get_or_create_chunk_mut(&mut self, pos: ChunkPos) -> &mut Chunk {
        match self.chunks.entry(pos) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) if self.quarantined.contains(&pos) => {
                entry.insert(generate(&self.generator, pos))
            },
            Entry::Vacant(entry) => {
                let chunk = match persistence::load_chunk(&self.info, pos) {
                    Ok(Some(chunk)) => {
                        debug!("Loaded chunk {pos} from disk");
                        chunk
                    },
                    Ok(None) => generate(&self.generator, pos),
                    Err(e) => {
                        record_failure(&mut self.load_failures, pos, &e);
                        if self.load_policy == LoadPolicy::Strict {
                            warn!("Failed to load chunk {pos}, using an unsaved stand-in: {e}");
                            self.quarantined.insert(pos);
                        } else {
                            warn!("Failed to load chunk {pos}, regenerating: {e}");
                        }
                        generate(&self.generator, pos)
                    },
                };
                entry.insert(chunk)
            },
        }
    }

    fn ensure_chunk(&mut self, pos: ChunkPos, policy: LoadPolicy) -> WorldResult<&mut Chunk> {
        if policy == LoadPolicy::Strict && self.quarantined.contains(&pos) {
            return Err(WorldError::ChunkUnavailable(pos));
        }
        if policy == LoadPolicy::Regenerate || self.chunks.contains_key(&pos) {
            return Ok(self.get_or_create_chunk_mut(pos));
        }

        let chunk = match persistence::load_chunk(&self.info, pos) {
            Ok(Some(chunk)) => {
                debug!("Loaded chunk {pos} from disk");
                chunk
            },
            Ok(None) => generate(&self.generator, pos),
            Err(source) => {
                record_failure(&mut self.load_failures, pos, &source);
                warn!("Failed to load chunk {pos}: {source}");
                self.quarantined.insert(pos);
                return Err(WorldError::ChunkLoad { pos, source });
            },
        };
        Ok(self.chunks.entry(pos).or_insert(chunk))
    }
}

fn generate(generator: &WorldGenerator, pos: ChunkPos) -> Chunk {
    debug!("Generating chunk {pos}");
    generator.generate_chunk(pos)
}

fn record_failure(failures: &mut Vec<LoadFailure>, pos: ChunkPos, error: &CodecError) {
    failures.push(LoadFailure {
        pos,
        reason: error.to_string(),
        format_error: error.is_format_error(),
    });
}

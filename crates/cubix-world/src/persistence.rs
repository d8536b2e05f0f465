//! Chunk persistence: per-chunk load and dirty-only save.

use cubix_common::{ChunkPos, CodecError};
use tracing::{debug, info, warn};

use crate::chunk::Chunk;
use crate::codec;
use crate::world::World;
use crate::world_info::WorldInfo;

/// Outcome of [`save_dirty_chunks`].
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Chunks written successfully
    pub saved: Vec<ChunkPos>,
    /// Chunks that failed to write; they stay dirty
    pub failed: Vec<(ChunkPos, CodecError)>,
    /// Quarantined chunks left unwritten to protect their stored file
    pub skipped: Vec<ChunkPos>,
}

impl SaveReport {
    /// Returns true if every dirty chunk was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.saved.len()
    }
}

/// Loads the stored chunk at `pos`, or `Ok(None)` if it was never saved.
pub fn load_chunk(info: &WorldInfo, pos: ChunkPos) -> Result<Option<Chunk>, CodecError> {
    codec::read_file(&info.chunk_file(pos), pos)
}

/// Writes one chunk to its file.
pub fn save_chunk(info: &WorldInfo, pos: ChunkPos, chunk: &Chunk) -> Result<(), CodecError> {
    codec::write_file(&info.chunk_file(pos), chunk, pos)
}

/// Writes every loaded dirty chunk and clears its dirty flag.
///
/// A failed write is reported and skipped; the remaining chunks are still
/// saved. Quarantined chunks are never written. Calling this again without
/// intervening edits writes nothing.
pub fn save_dirty_chunks(world: &mut World) -> SaveReport {
    let total = world.loaded_count();
    let dirty = world.dirty_chunks();
    info!("Saving world {:?}: {total} chunks loaded, {} dirty", world.info().name(), dirty.len());

    let info = world.info().clone();
    let mut report = SaveReport::default();
    for pos in dirty {
        if world.is_quarantined(pos) {
            debug!("Skipping quarantined chunk {pos}");
            report.skipped.push(pos);
            continue;
        }
        let Some(chunk) = world.chunk_mut(pos) else {
            continue;
        };
        match save_chunk(&info, pos, chunk) {
            Ok(()) => {
                chunk.mark_clean();
                report.saved.push(pos);
            },
            Err(e) => {
                warn!("Failed to save chunk {pos}: {e}");
                report.failed.push((pos, e));
            },
        }
    }

    info!(
        "Saved {} chunks ({} failed, {} skipped)",
        report.saved.len(),
        report.failed.len(),
        report.skipped.len()
    );
    report
}

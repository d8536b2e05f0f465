//! Run-length chunk codec.
//!
//! Layout, all big-endian:
//!
//! | Field   | Type  |
//! |---------|-------|
//! | magic   | `u32` (`"CUBX"`) |
//! | version | `i32` |
//! | cx, cy, cz | `i32` each |
//! | runs    | (`u16` block code, `u16` length) pairs |
//!
//! Runs cover exactly `CHUNK_VOLUME` cells in the chunk's storage order. A run
//! is at most 65535 cells; longer stretches are split into several pairs.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use cubix_common::{ChunkPos, CodecError, FormatVersion, MagicBytes, CHUNK_VOLUME};

use crate::block::BlockId;
use crate::chunk::Chunk;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 20;

/// Size of one (code, length) pair in bytes.
pub const RUN_SIZE: usize = 4;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Encodes a chunk for the given coordinate.
#[must_use]
pub fn encode(chunk: &Chunk, pos: ChunkPos) -> Vec<u8> {
    let runs = runs(chunk.blocks());
    let mut out = Vec::with_capacity(HEADER_SIZE + runs.len() * RUN_SIZE);

    out.extend_from_slice(&MagicBytes::CHUNK.as_u32().to_be_bytes());
    out.extend_from_slice(&FormatVersion::CHUNK_RLE.0.to_be_bytes());
    out.extend_from_slice(&pos.x.to_be_bytes());
    out.extend_from_slice(&pos.y.to_be_bytes());
    out.extend_from_slice(&pos.z.to_be_bytes());

    for (id, len) in runs {
        out.extend_from_slice(&id.raw().to_be_bytes());
        out.extend_from_slice(&len.to_be_bytes());
    }
    out
}

/// Decodes a chunk, checking it belongs at `expected`.
///
/// The returned chunk is clean: it mirrors the stored bytes.
pub fn decode(bytes: &[u8], expected: ChunkPos) -> CodecResult<Chunk> {
    let mut reader = Reader::new(bytes);

    let magic = reader.u32().ok_or(CodecError::Truncated { filled: 0 })?;
    if magic != MagicBytes::CHUNK.as_u32() {
        return Err(CodecError::BadMagic { found: magic });
    }

    let version = reader.i32().ok_or(CodecError::Truncated { filled: 0 })?;
    if !FormatVersion::CHUNK_RLE.can_read(&FormatVersion(version)) {
        return Err(CodecError::UnsupportedVersion { found: version });
    }

    let header = (reader.i32(), reader.i32(), reader.i32());
    let found = match header {
        (Some(x), Some(y), Some(z)) => ChunkPos::new(x, y, z),
        _ => return Err(CodecError::Truncated { filled: 0 }),
    };
    if found != expected {
        return Err(CodecError::CoordMismatch { expected, found });
    }

    let mut blocks = Vec::with_capacity(CHUNK_VOLUME);
    while blocks.len() < CHUNK_VOLUME {
        let index = blocks.len();
        let (Some(code), Some(run)) = (reader.u16(), reader.u16()) else {
            return Err(CodecError::Truncated { filled: index });
        };
        if run == 0 {
            return Err(CodecError::ZeroLengthRun { index });
        }
        if index + run as usize > CHUNK_VOLUME {
            return Err(CodecError::RunOverflow { index, run });
        }
        blocks.resize(index + run as usize, BlockId::from_raw(code));
    }

    let extra = reader.remaining();
    if extra > 0 {
        return Err(CodecError::TrailingData { extra });
    }

    Ok(Chunk::from_decoded(blocks))
}

/// Writes a chunk file, replacing any previous file atomically.
pub fn write_file(path: &Path, chunk: &Chunk, pos: ChunkPos) -> CodecResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let bytes = encode(chunk, pos);
    let tmp = path.with_extension("bin.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Reads a chunk file. A missing file is `Ok(None)`.
pub fn read_file(path: &Path, expected: ChunkPos) -> CodecResult<Option<Chunk>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    decode(&bytes, expected).map(Some)
}

/// Splits cells into runs of at most `u16::MAX`.
fn runs(blocks: &[BlockId]) -> Vec<(BlockId, u16)> {
    let mut out = Vec::new();
    let Some((&first, rest)) = blocks.split_first() else {
        return out;
    };

    let mut current = first;
    let mut len: u16 = 1;
    for &id in rest {
        if id == current && len < u16::MAX {
            len += 1;
        } else {
            out.push((current, len));
            current = id;
            len = 1;
        }
    }
    out.push((current, len));
    out
}

/// Big-endian cursor over a byte slice.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        slice.try_into().ok()
    }

    fn u16(&mut self) -> Option<u16> {
        self.take().map(u16::from_be_bytes)
    }

    fn u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_be_bytes)
    }

    fn i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_be_bytes)
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }
}

//! Version and magic constants for on-disk formats.

/// On-disk format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatVersion(pub i32);

impl FormatVersion {
    /// Current run-length chunk file version.
    pub const CHUNK_RLE: Self = Self(1);

    /// Checks if this version can read data written with another version.
    #[must_use]
    pub const fn can_read(&self, data_version: &Self) -> bool {
        self.0 == data_version.0
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Magic bytes for file format identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicBytes(pub [u8; 4]);

impl MagicBytes {
    /// Cubix chunk file magic bytes.
    pub const CHUNK: Self = Self(*b"CUBX");

    /// Returns the magic as a big-endian 32-bit word.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

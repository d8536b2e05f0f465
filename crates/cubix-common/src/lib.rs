//! # Cubix Common
//!
//! Common types shared by all Cubix crates:
//! - Coordinate types (block, chunk, local) with floor decomposition
//! - Format constants for on-disk data
//! - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_spells_cubx() {
        assert_eq!(MagicBytes::CHUNK.as_u32(), 0x4355_4258);
    }

    #[test]
    fn test_version_compatibility() {
        let current = FormatVersion::CHUNK_RLE;
        assert!(current.can_read(&FormatVersion(1)));
        assert!(!current.can_read(&FormatVersion(2)));
    }

    #[test]
    fn test_format_error_classification() {
        let io = CodecError::Io(std::io::Error::other("disk gone"));
        assert!(!io.is_format_error());
        assert!(CodecError::BadMagic { found: 0 }.is_format_error());
        assert!(CodecError::Truncated { filled: 10 }.is_format_error());
    }
}

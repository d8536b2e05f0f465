//! Block type codes.

use serde::{Deserialize, Serialize};

/// A block type code.
///
/// Codes are a small closed set today; unknown codes read from disk are kept
/// as-is and treated as solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockId(u16);

impl BlockId {
    /// Empty space. Zero, and the default fill.
    pub const AIR: Self = Self(0);

    /// Stone.
    pub const STONE: Self = Self(1);

    /// Dirt.
    pub const DIRT: Self = Self(2);

    /// Grass-topped dirt.
    pub const GRASS: Self = Self(3);

    /// Water. Not solid.
    pub const WATER: Self = Self(4);

    /// Creates a block id from a raw code.
    #[must_use]
    pub const fn from_raw(code: u16) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns true for blocks that stop movement (everything but air and water).
    #[must_use]
    pub const fn is_solid(self) -> bool {
        self.0 != Self::AIR.0 && self.0 != Self::WATER.0
    }

    /// Returns true for empty space.
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }

    /// Returns a display name, or `None` for unknown codes.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("air"),
            1 => Some("stone"),
            2 => Some("dirt"),
            3 => Some("grass"),
            4 => Some("water"),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "block#{}", self.0),
        }
    }
}

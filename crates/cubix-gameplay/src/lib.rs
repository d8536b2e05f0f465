//! # Cubix Gameplay
//!
//! Player-facing systems for Cubix:
//! - Player physics with gravity and jumping
//! - Per-axis AABB collision against the block world
//! - Session handle for the active world

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod physics;
pub mod session;


/// Prelude for convenient imports
pub mod prelude {
    pub use crate::physics::*;
    pub use crate::session::*;
}

pub use prelude::*;

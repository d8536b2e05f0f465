//! # Cubix World
//!
//! Authoritative block world for Cubix.
//!
//! This crate handles:
//! - Dense 16³ chunks of block codes with dirty tracking
//! - Deterministic procedural generation
//! - Run-length chunk codec
//! - Sparse chunk index with lazy load-or-generate
//! - Dirty-only persistence and world directory management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod block;
pub mod chunk;
pub mod codec;
pub mod generation;
pub mod persistence;
pub mod world;
pub mod world_info;


/// Prelude for convenient imports
pub mod prelude {
    pub use crate::block::*;
    pub use crate::chunk::*;
    pub use crate::generation::*;
    pub use crate::persistence::*;
    pub use crate::world::*;
    pub use crate::world_info::*;
}

pub use prelude::*;

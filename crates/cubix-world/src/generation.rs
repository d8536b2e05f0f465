//! Procedural terrain generation.
//!
//! Terrain height comes from fractal value noise sampled on an integer
//! lattice. Lattice values are hashed from `(seed, x, z)` with integer
//! arithmetic only, so a chunk regenerated on any platform matches the
//! first generation bit for bit.

use cubix_common::{ChunkPos, CHUNK_SIZE};

use crate::block::BlockId;
use crate::chunk::Chunk;

/// World generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// World seed
    pub seed: u64,
    /// Surface height where the noise is zero
    pub base_height: f64,
    /// Height added at full noise
    pub height_amplitude: f64,
    /// Horizontal frequency of the first octave
    pub frequency: f64,
    /// Number of noise octaves
    pub octaves: u32,
    /// Columns below this height and above the surface fill with water
    pub sea_level: i32,
    /// Dirt blocks beneath the grass layer
    pub dirt_depth: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 24.0,
            height_amplitude: 18.0,
            frequency: 0.01,
            octaves: 5,
            sea_level: 22,
            dirt_depth: 3,
        }
    }
}

/// Procedural world generator bound to one seed.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    /// Configuration
    config: GeneratorConfig,
}

impl WorldGenerator {
    /// Creates a new generator with the given config.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Creates a generator with default terrain settings.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig {
            seed,
            ..Default::default()
        })
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the bound seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Generates the chunk at the given coordinate.
    ///
    /// The result is dirty so the first save persists it.
    #[must_use]
    pub fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new();
        let origin = pos.origin();
        let size = CHUNK_SIZE as usize;

        for lz in 0..size {
            let z = origin.z + lz as i32;
            for lx in 0..size {
                let x = origin.x + lx as i32;
                let height = self.column_height(x, z);

                for ly in 0..size {
                    let y = origin.y + ly as i32;
                    let id = self.classify(y, height);
                    if id != BlockId::AIR {
                        chunk.set(lx, ly, lz, id);
                    }
                }
            }
        }

        chunk
    }

    /// Returns the block the generator places at a global coordinate.
    #[must_use]
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.classify(y, self.column_height(x, z))
    }

    /// Returns the terrain surface height of column `(x, z)`.
    #[must_use]
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let c = &self.config;
        let noise = self.fbm2(
            f64::from(x) * c.frequency,
            f64::from(z) * c.frequency,
            c.octaves,
        );
        (c.base_height + c.height_amplitude * noise).floor() as i32
    }

    /// Maps a height relative to the column surface to a block.
    fn classify(&self, y: i32, height: i32) -> BlockId {
        if y > height {
            return if y <= self.config.sea_level {
                BlockId::WATER
            } else {
                BlockId::AIR
            };
        }
        if y == height {
            BlockId::GRASS
        } else if y >= height - self.config.dirt_depth {
            BlockId::DIRT
        } else {
            BlockId::STONE
        }
    }

    /// Fractal sum of value noise, normalised to `[0, 1]`.
    fn fbm2(&self, x: f64, z: f64, octaves: u32) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        let mut norm = 0.0;
        for _ in 0..octaves {
            sum += amp * self.value_noise2(x * freq, z * freq);
            norm += amp;
            amp *= 0.5;
            freq *= 2.0;
        }
        if norm == 0.0 {
            return 0.0;
        }
        sum / norm
    }

    /// Smoothstep-interpolated lattice noise in `[0, 1]`.
    fn value_noise2(&self, x: f64, z: f64) -> f64 {
        let x0 = x.floor() as i32;
        let z0 = z.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);

        let tx = smooth(x - f64::from(x0));
        let tz = smooth(z - f64::from(z0));

        let v00 = self.hash01(x0, z0);
        let v10 = self.hash01(x1, z0);
        let v01 = self.hash01(x0, z1);
        let v11 = self.hash01(x1, z1);

        let a = lerp(v00, v10, tx);
        let b = lerp(v01, v11, tx);
        lerp(a, b, tz)
    }

    /// Hashes a lattice point to `[0, 1)` using the top 53 bits.
    fn hash01(&self, x: i32, z: i32) -> f64 {
        let mut h = self.config.seed
            ^ (i64::from(x) as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (i64::from(z) as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        h ^= h >> 33;
        ((h >> 11) & ((1u64 << 53) - 1)) as f64 / (1u64 << 53) as f64
    }
}

/// Cubic smoothstep, `3t² − 2t³`.
fn smooth(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

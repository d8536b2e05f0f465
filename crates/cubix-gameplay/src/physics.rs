//! Player physics: gravity and per-axis AABB collision against the block grid.
//!
//! Each tick applies gravity, turns velocity into a displacement and resolves
//! it one axis at a time in the order X, Z, Y, each axis starting from the
//! position left by the previous one. Along the moving axis the whole path is
//! scanned, so a single axis never tunnels through a block. The axes are
//! still resolved independently, which means a diagonal move can clip a block
//! corner that a true swept test would catch. [`ResolverMode::Substepped`]
//! shrinks that error for fast movers.

use std::collections::HashSet;

use cubix_world::World;
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Upper bound on substeps per tick.
pub const MAX_SUBSTEPS: u32 = 64;

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis (up)
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Resolution order within one step.
    pub const RESOLVE_ORDER: [Self; 3] = [Self::X, Self::Z, Self::Y];

    /// Component index into a vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box standing on `feet`, `half_width` out on X and Z, `height` up.
    #[must_use]
    pub fn from_feet(feet: Vec3, half_width: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(feet.x - half_width, feet.y, feet.z - half_width),
            max: Vec3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
        }
    }

    /// Box of the unit block at integer coordinates.
    #[must_use]
    pub fn block(pos: IVec3) -> Self {
        let min = pos.as_vec3();
        Self {
            min,
            max: min + Vec3::ONE,
        }
    }

    /// Union of this box and the box moved by `d` along `axis`.
    #[must_use]
    pub fn swept(&self, axis: Axis, d: f32) -> Self {
        let mut out = *self;
        let i = axis.index();
        if d > 0.0 {
            out.max[i] += d;
        } else {
            out.min[i] += d;
        }
        out
    }

    /// Checks if the interiors overlap. Touching faces do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Inclusive range of integer blocks whose interiors the box overlaps.
    #[must_use]
    pub fn block_range(&self) -> (IVec3, IVec3) {
        let lo = self.min.floor().as_ivec3();
        let hi = self.max.ceil().as_ivec3() - IVec3::ONE;
        (lo, hi)
    }
}

/// Solid-block lookup used by the resolver.
///
/// Takes `&mut self` because the world loads chunks lazily on first query.
pub trait CollisionQuery {
    /// Checks if the block at the given global coordinate stops movement.
    fn is_solid(&mut self, x: i32, y: i32, z: i32) -> bool;
}

/// A chunk that cannot be loaded under [`cubix_world::LoadPolicy::Strict`]
/// is solid, so the player cannot enter space whose contents are unknown.
impl CollisionQuery for World {
    fn is_solid(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.try_get_block(x, y, z).map_or(true, |block| block.is_solid())
    }
}

/// Mock collision query for testing.
#[derive(Debug, Default)]
pub struct MockCollision {
    /// Individually solid blocks
    solid_blocks: HashSet<IVec3>,
    /// Every block with y below this is solid
    floor: Option<i32>,
    /// Number of queries answered
    queries: usize,
}

impl MockCollision {
    /// Creates a new mock collision with nothing solid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a block as solid.
    pub fn set_solid(&mut self, x: i32, y: i32, z: i32) {
        self.solid_blocks.insert(IVec3::new(x, y, z));
    }

    /// Makes every block below `top` solid, so the floor surface is at `top`.
    pub fn set_floor(&mut self, top: i32) {
        self.floor = Some(top);
    }

    /// Number of queries answered so far.
    #[must_use]
    pub const fn queries(&self) -> usize {
        self.queries
    }
}

impl CollisionQuery for MockCollision {
    fn is_solid(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.queries += 1;
        if let Some(top) = self.floor {
            if y < top {
                return true;
            }
        }
        self.solid_blocks.contains(&IVec3::new(x, y, z))
    }
}

/// How a tick's displacement is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolverMode {
    /// One X, Z, Y pass per tick.
    #[default]
    PerAxis,
    /// Split the displacement so no pass moves further than `max_step`.
    Substepped {
        /// Largest per-pass displacement on any axis
        max_step: f32,
    },
}

/// Player physics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration in blocks/s² (positive pulls down)
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_velocity: f32,
    /// Horizontal walking speed in blocks/s
    pub move_speed: f32,
    /// Player box half-width on X and Z
    pub half_width: f32,
    /// Player box height
    pub height: f32,
    /// Gap left between the box and a block it is stopped against
    pub epsilon: f32,
    /// Resolution mode
    pub mode: ResolverMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            jump_velocity: 9.0,
            move_speed: 4.3,
            half_width: 0.3,
            height: 1.8,
            epsilon: 1e-4,
            mode: ResolverMode::PerAxis,
        }
    }
}

impl PhysicsConfig {
    /// Clamps values to sensible ranges.
    pub fn validate(&mut self) {
        self.gravity = self.gravity.clamp(0.0, 200.0);
        self.jump_velocity = self.jump_velocity.clamp(0.0, 100.0);
        self.move_speed = self.move_speed.clamp(0.0, 100.0);
        self.half_width = self.half_width.clamp(0.05, 0.49);
        self.height = self.height.clamp(0.1, 3.0);
        self.epsilon = self.epsilon.clamp(1e-6, 1e-2);
        if let ResolverMode::Substepped { max_step } = &mut self.mode {
            *max_step = max_step.clamp(0.05, 1.0);
        }
    }
}

/// Physics state of the player, anchored at the feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPhysicsState {
    /// Feet position
    pub position: Vec3,
    /// Velocity in blocks/s
    pub velocity: Vec3,
    /// Box half-width on X and Z
    pub half_width: f32,
    /// Box height
    pub height: f32,
    /// Whether the last tick ended standing on a floor
    pub on_ground: bool,
}

impl PlayerPhysicsState {
    /// Creates a resting player at `position` with the configured box.
    #[must_use]
    pub fn new(position: Vec3, config: &PhysicsConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            half_width: config.half_width,
            height: config.height,
            on_ground: false,
        }
    }

    /// Current collision box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_feet(self.position, self.half_width, self.height)
    }

    /// Sets the horizontal velocity requested by input.
    pub fn set_move_velocity(&mut self, x: f32, z: f32) {
        self.velocity.x = x;
        self.velocity.z = z;
    }
}

/// Which axes were stopped by a block during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// X movement was clamped
    pub hit_x: bool,
    /// Y movement was clamped
    pub hit_y: bool,
    /// Z movement was clamped
    pub hit_z: bool,
    /// The player landed on a floor
    pub on_ground: bool,
}

impl StepReport {
    fn hit(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.hit_x,
            Axis::Y => self.hit_y,
            Axis::Z => self.hit_z,
        }
    }

    fn set_hit(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.hit_x = true,
            Axis::Y => self.hit_y = true,
            Axis::Z => self.hit_z = true,
        }
    }
}

/// Moves the player through the world without entering solid blocks.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    config: PhysicsConfig,
}

impl CollisionResolver {
    /// Creates a resolver with the given configuration.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Starts a jump if the player is on the ground. Returns true if it did.
    pub fn jump(&self, state: &mut PlayerPhysicsState) -> bool {
        if !state.on_ground {
            return false;
        }
        state.velocity.y = self.config.jump_velocity;
        state.on_ground = false;
        true
    }

    /// Advances one physics tick of length `dt` seconds.
    pub fn step<C: CollisionQuery + ?Sized>(
        &self,
        query: &mut C,
        state: &mut PlayerPhysicsState,
        dt: f32,
    ) -> StepReport {
        state.on_ground = false;
        state.velocity.y -= self.config.gravity * dt;

        let delta = state.velocity * dt;
        let mut report = StepReport::default();

        match self.config.mode {
            ResolverMode::PerAxis => self.move_axes(query, state, delta, &mut report),
            ResolverMode::Substepped { max_step } => {
                let longest = delta.abs().max_element();
                let steps = if max_step > 0.0 {
                    ((longest / max_step).ceil() as u32).clamp(1, MAX_SUBSTEPS)
                } else {
                    1
                };
                let part = delta / steps as f32;
                for _ in 0..steps {
                    self.move_axes(query, state, part, &mut report);
                }
            },
        }

        report.on_ground = state.on_ground;
        report
    }

    fn move_axes<C: CollisionQuery + ?Sized>(
        &self,
        query: &mut C,
        state: &mut PlayerPhysicsState,
        delta: Vec3,
        report: &mut StepReport,
    ) {
        for axis in Axis::RESOLVE_ORDER {
            let d = delta[axis.index()];
            // A clamped axis has zero velocity for the rest of the tick.
            if d == 0.0 || report.hit(axis) {
                continue;
            }
            if self.resolve_axis(query, state, axis, d) {
                state.velocity[axis.index()] = 0.0;
                report.set_hit(axis);
                if axis == Axis::Y && d < 0.0 {
                    state.on_ground = true;
                }
            }
        }
    }

    /// Moves the player by `d` along `axis`, stopping `epsilon` short of the
    /// nearest solid block face on the way. Returns true if it stopped.
    ///
    /// Blocks the box already overlaps are ignored, so a player stuck inside
    /// terrain can walk out instead of being pushed back through it.
    fn resolve_axis<C: CollisionQuery + ?Sized>(
        &self,
        query: &mut C,
        state: &mut PlayerPhysicsState,
        axis: Axis,
        d: f32,
    ) -> bool {
        let i = axis.index();
        let eps = self.config.epsilon;
        let current = state.aabb();
        let origin = state.position[i];
        let extent_max = current.max[i] - origin;
        let extent_min = origin - current.min[i];

        let (lo, hi) = current.swept(axis, d).block_range();
        let mut allowed = origin + d;
        let mut clamped = false;

        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                for x in lo.x..=hi.x {
                    let block = IVec3::new(x, y, z);
                    if Aabb::block(block).overlaps(&current) || !query.is_solid(x, y, z) {
                        continue;
                    }
                    let face = block[i] as f32;
                    if d > 0.0 {
                        let stop = face - extent_max - eps;
                        if stop < allowed {
                            allowed = stop;
                            clamped = true;
                        }
                    } else {
                        let stop = face + 1.0 + extent_min + eps;
                        if stop > allowed {
                            allowed = stop;
                            clamped = true;
                        }
                    }
                }
            }
        }

        state.position[i] = allowed;
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn no_gravity() -> CollisionResolver {
        CollisionResolver::new(PhysicsConfig {
            gravity: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_aabb_from_feet() {
        let aabb = Aabb::from_feet(Vec3::new(1.0, 2.0, 3.0), 0.5, 2.0);
        assert_eq!(aabb.min, Vec3::new(0.5, 2.0, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 4.0, 3.5));
    }

    #[test]
    fn test_aabb_overlaps_excludes_touching() {
        let a = Aabb::block(IVec3::new(0, 0, 0));
        let b = Aabb::block(IVec3::new(1, 0, 0));
        let c = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_block_range() {
        let aabb = Aabb::new(Vec3::new(-0.3, 1.0, 0.2), Vec3::new(0.3, 2.8, 0.8));
        let (lo, hi) = aabb.block_range();
        assert_eq!(lo, IVec3::new(-1, 1, 0));
        assert_eq!(hi, IVec3::new(0, 2, 0));
    }

    #[test]
    fn test_swept_extends_in_direction() {
        let aabb = Aabb::from_feet(Vec3::ZERO, 0.5, 1.0);
        let forward = aabb.swept(Axis::X, 3.0);
        assert_eq!(forward.min.x, -0.5);
        assert_eq!(forward.max.x, 3.5);
        let back = aabb.swept(Axis::Y, -2.0);
        assert_eq!(back.min.y, -2.0);
        assert_eq!(back.max.y, 1.0);
    }

    #[test]
    fn test_mock_collision_floor() {
        let mut collision = MockCollision::new();
        collision.set_floor(0);
        collision.set_solid(4, 2, 4);
        assert!(collision.is_solid(100, -1, 100));
        assert!(!collision.is_solid(100, 0, 100));
        assert!(collision.is_solid(4, 2, 4));
        assert_eq!(collision.queries(), 3);
    }

    #[test]
    fn test_wall_stops_positive_x() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        for y in 0..3 {
            collision.set_solid(10, y, 0);
        }
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.5, 0.5), resolver.config());
        state.velocity.x = 16.0;

        let report = resolver.step(&mut collision, &mut state, 1.0);

        let eps = resolver.config().epsilon;
        let face = state.aabb().max.x;
        assert!(report.hit_x);
        assert!(face < 10.0, "box entered the block: {face}");
        assert!(10.0 - face <= 2.0 * eps, "stopped too early: {face}");
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_wall_stops_negative_z() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        collision.set_solid(0, 1, -6);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.5, 0.5), resolver.config());
        state.velocity.z = -12.0;

        let report = resolver.step(&mut collision, &mut state, 1.0);

        let eps = resolver.config().epsilon;
        let face = state.aabb().min.z;
        assert!(report.hit_z);
        assert!(face > -5.0);
        assert!(face - -5.0 <= 2.0 * eps);
    }

    #[test]
    fn test_player_inside_block_is_not_pushed_back() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        collision.set_solid(0, 0, 0);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.0, 0.5), resolver.config());
        state.velocity.x = 3.0;

        let report = resolver.step(&mut collision, &mut state, 0.1);

        assert!(!report.hit_x);
        assert!((state.position.x - 0.8).abs() < 1e-5);
        assert_eq!(state.velocity.x, 3.0);
    }

    #[test]
    fn test_player_inside_block_still_stops_at_next_wall() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        collision.set_solid(0, 0, 0);
        collision.set_solid(2, 0, 0);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.0, 0.5), resolver.config());
        state.velocity.x = 10.0;

        let report = resolver.step(&mut collision, &mut state, 0.5);

        let face = state.aabb().max.x;
        assert!(report.hit_x);
        assert!(face < 2.0);
        assert!(2.0 - face <= 2.0 * resolver.config().epsilon);
    }

    #[test]
    fn test_free_movement_is_unclamped() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 10.0, 0.5), resolver.config());
        state.velocity = Vec3::new(2.0, 0.0, -3.0);

        let report = resolver.step(&mut collision, &mut state, 0.5);
        assert_eq!(report, StepReport::default());
        assert!((state.position - Vec3::new(1.5, 10.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_falling_lands_on_floor() {
        let resolver = CollisionResolver::default();
        let mut collision = MockCollision::new();
        collision.set_floor(0);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 3.0, 0.5), resolver.config());

        let mut landed = false;
        for _ in 0..200 {
            let report = resolver.step(&mut collision, &mut state, DT);
            if report.on_ground {
                landed = true;
                assert!(state.on_ground);
                assert_eq!(state.velocity.y, 0.0);
                break;
            }
            assert!(!state.on_ground);
            assert!(state.velocity.y < 0.0);
        }
        assert!(landed);
        assert!(state.position.y >= 0.0);
        assert!(state.position.y <= 2.0 * resolver.config().epsilon);

        // Standing still keeps re-detecting the floor.
        resolver.step(&mut collision, &mut state, DT);
        assert!(state.on_ground);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let resolver = CollisionResolver::default();
        let mut collision = MockCollision::new();
        collision.set_floor(0);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.0, 0.5), resolver.config());

        assert!(!resolver.jump(&mut state));
        resolver.step(&mut collision, &mut state, DT);
        assert!(state.on_ground);

        assert!(resolver.jump(&mut state));
        resolver.step(&mut collision, &mut state, DT);
        assert!(!state.on_ground);
        assert!(state.position.y > 0.1);
        assert!(!resolver.jump(&mut state));
    }

    #[test]
    fn test_ceiling_stops_upward_without_grounding() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        collision.set_solid(0, 4, 0);
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.0, 0.5), resolver.config());
        state.velocity.y = 10.0;

        let report = resolver.step(&mut collision, &mut state, 1.0);
        assert!(report.hit_y);
        assert!(!state.on_ground);
        assert!(state.aabb().max.y < 4.0);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_slides_along_wall() {
        let resolver = no_gravity();
        let mut collision = MockCollision::new();
        for z in -5..5 {
            for y in 0..2 {
                collision.set_solid(1, y, z);
            }
        }
        let mut state = PlayerPhysicsState::new(Vec3::new(0.5, 0.0, 0.5), resolver.config());
        state.velocity = Vec3::new(2.0, 0.0, 2.0);

        let report = resolver.step(&mut collision, &mut state, 0.5);
        assert!(report.hit_x);
        assert!(!report.hit_z);
        assert!((state.position.z - 1.5).abs() < 1e-5);
        assert!(state.aabb().max.x < 1.0);
    }

    #[test]
    fn test_water_is_not_solid_in_world() {
        use cubix_world::{BlockId, WorldInfo};
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let info = WorldInfo::new("w", "Test", 1, temp_dir.path().join("w"));
        let mut world = World::new(1, info);
        world.set_block(0, 200, 0, BlockId::WATER);
        world.set_block(1, 200, 0, BlockId::STONE);
        assert!(!world.is_solid(0, 200, 0));
        assert!(world.is_solid(1, 200, 0));
        assert!(!world.is_solid(2, 200, 0));
    }

    #[test]
    fn test_unavailable_chunk_is_solid_under_strict() {
        use cubix_common::ChunkPos;
        use cubix_world::{LoadPolicy, WorldInfo};
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let info = WorldInfo::new("w", "Test", 1, temp_dir.path().join("w"));
        let pos = ChunkPos::new(0, 12, 0);
        std::fs::create_dir_all(info.chunk_dir()).expect("mkdir failed");
        std::fs::write(info.chunk_file(pos), b"garbage").expect("write failed");

        let mut world = World::new(1, info);
        world.set_load_policy(LoadPolicy::Strict);

        // y = 193 lies in the corrupt chunk; y = 180 is in an intact one.
        assert!(world.is_solid(0, 193, 0));
        assert!(!world.is_loaded(pos));
        assert!(!world.is_solid(0, 180, 0));
    }

    #[test]
    fn test_substepped_matches_per_axis_on_simple_fall() {
        let per_axis = CollisionResolver::default();
        let substepped = CollisionResolver::new(PhysicsConfig {
            mode: ResolverMode::Substepped { max_step: 0.1 },
            ..Default::default()
        });
        let mut collision = MockCollision::new();
        collision.set_floor(0);

        let mut a = PlayerPhysicsState::new(Vec3::new(0.5, 2.0, 0.5), per_axis.config());
        let mut b = a;
        for _ in 0..120 {
            per_axis.step(&mut collision, &mut a, DT);
            substepped.step(&mut collision, &mut b, DT);
        }
        assert!(a.on_ground && b.on_ground);
        assert!((a.position.y - b.position.y).abs() < 1e-4);
    }

    #[test]
    fn test_substepped_catches_corner() {
        // A block the per-axis pass skips by moving X first, then Z.
        let mut collision = MockCollision::new();
        collision.set_solid(2, 0, 2);
        collision.set_solid(2, 1, 2);
        let start = Vec3::new(0.5, 0.0, 0.5);
        let velocity = Vec3::new(4.0, 0.0, 4.0);

        let substepped = CollisionResolver::new(PhysicsConfig {
            gravity: 0.0,
            mode: ResolverMode::Substepped { max_step: 0.1 },
            ..Default::default()
        });
        let mut state = PlayerPhysicsState::new(start, substepped.config());
        state.velocity = velocity;
        let report = substepped.step(&mut collision, &mut state, 1.0);
        assert!(report.hit_x || report.hit_z);

        let per_axis = no_gravity();
        let mut state = PlayerPhysicsState::new(start, per_axis.config());
        state.velocity = velocity;
        let report = per_axis.step(&mut collision, &mut state, 1.0);
        assert!(!report.hit_x && !report.hit_z);
    }

    #[test]
    fn test_config_validate_clamps() {
        let mut config = PhysicsConfig {
            half_width: 2.0,
            epsilon: 0.0,
            mode: ResolverMode::Substepped { max_step: 10.0 },
            ..Default::default()
        };
        config.validate();
        assert!((config.half_width - 0.49).abs() < 1e-6);
        assert!(config.epsilon > 0.0);
        assert_eq!(config.mode, ResolverMode::Substepped { max_step: 1.0 });
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = PhysicsConfig {
            mode: ResolverMode::Substepped { max_step: 0.25 },
            ..Default::default()
        };
        let text = toml::to_string(&config).expect("Failed to serialize");
        let parsed: PhysicsConfig = toml::from_str(&text).expect("Failed to parse");
        assert_eq!(parsed.mode, config.mode);
        assert_eq!(parsed.gravity, config.gravity);
    }
}

//! Game session: the one world being played, if any.
//!
//! A [`Session`] is passed by reference to whatever needs the active world.
//! "No world" is the `MainMenu` state rather than a missing global.

use cubix_common::WorldError;
use cubix_world::{save_dirty_chunks, LoadPolicy, SaveReport, World, WorldInfo};
use glam::{Vec2, Vec3};
use thiserror::Error;
use tracing::{info, warn};

use crate::physics::{CollisionResolver, PhysicsConfig, PlayerPhysicsState, StepReport};

/// Height the spawn scan starts from.
pub const SPAWN_SCAN_TOP: i32 = 80;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A world is already being played.
    #[error("world {0:?} is already active")]
    AlreadyActive(String),

    /// No world is being played.
    #[error("no active world")]
    NoActiveWorld,

    /// Some dirty chunks could not be written. The world stays active.
    #[error("save incomplete: {} chunks failed", .0.failed.len())]
    SaveIncomplete(SaveReport),

    /// The world could not be read.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No world loaded.
    #[default]
    MainMenu,
    /// A world is active.
    Playing,
}

/// Player input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Strafe input in [-1, 1]
    pub move_x: f32,
    /// Forward input in [-1, 1]
    pub move_z: f32,
    /// Jump pressed this tick
    pub jump: bool,
}

/// World and player of a running session.
#[derive(Debug)]
pub struct ActiveWorld {
    /// Block world
    pub world: World,
    /// Player physics state
    pub player: PlayerPhysicsState,
}

/// Explicit handle to the optional active world.
#[derive(Debug, Default)]
pub struct Session {
    active: Option<ActiveWorld>,
    resolver: CollisionResolver,
}

impl Session {
    /// Creates a session at the main menu.
    #[must_use]
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            active: None,
            resolver: CollisionResolver::new(physics),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Playing
        } else {
            SessionState::MainMenu
        }
    }

    /// Collision resolver used for ticks.
    #[must_use]
    pub const fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    /// Opens `info` and spawns the player on the surface at the origin column.
    ///
    /// Under [`LoadPolicy::Strict`] a corrupt chunk in the spawn column fails
    /// the call and the session stays at the main menu.
    pub fn enter_world(
        &mut self,
        info: WorldInfo,
        policy: LoadPolicy,
    ) -> Result<&mut ActiveWorld, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyActive(active.world.info().name().to_string()));
        }

        info!("Entering world {:?} (seed {})", info.name(), info.seed());
        let mut world = World::new(info.seed(), info);
        world.set_load_policy(policy);

        let surface = match world.try_surface_height(0, 0, SPAWN_SCAN_TOP) {
            Ok(surface) => surface,
            Err(e) => {
                warn!("Cannot spawn in world {:?}: {e}", world.info().name());
                return Err(e.into());
            },
        };
        let spawn = Vec3::new(0.5, (surface + 1) as f32, 0.5);
        let player = PlayerPhysicsState::new(spawn, self.resolver.config());

        Ok(self.active.insert(ActiveWorld { world, player }))
    }

    /// Active world and player, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveWorld> {
        self.active.as_ref()
    }

    /// Mutable active world and player, if any.
    pub fn active_mut(&mut self) -> Option<&mut ActiveWorld> {
        self.active.as_mut()
    }

    /// Active block world, if any.
    #[must_use]
    pub fn world(&self) -> Option<&World> {
        self.active.as_ref().map(|a| &a.world)
    }

    /// Mutable active block world, if any.
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.active.as_mut().map(|a| &mut a.world)
    }

    /// Player state, if a world is active.
    #[must_use]
    pub fn player(&self) -> Option<&PlayerPhysicsState> {
        self.active.as_ref().map(|a| &a.player)
    }

    /// Applies input and advances the player by `dt` seconds.
    pub fn tick(&mut self, input: TickInput, dt: f32) -> Result<StepReport, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveWorld)?;
        let config = self.resolver.config();

        let mut wish = Vec2::new(input.move_x, input.move_z);
        if wish.length_squared() > 1.0 {
            wish = wish.normalize();
        }
        wish *= config.move_speed;
        active.player.set_move_velocity(wish.x, wish.y);

        if input.jump {
            self.resolver.jump(&mut active.player);
        }

        Ok(self
            .resolver
            .step(&mut active.world, &mut active.player, dt))
    }

    /// Writes dirty chunks without leaving the world.
    pub fn save(&mut self) -> Result<SaveReport, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveWorld)?;
        Ok(save_dirty_chunks(&mut active.world))
    }

    /// Saves and leaves the world.
    ///
    /// If any chunk fails to write, the world stays active and the report is
    /// returned in [`SessionError::SaveIncomplete`].
    pub fn exit_world(&mut self) -> Result<SaveReport, SessionError> {
        let report = self.save()?;
        if !report.is_complete() {
            warn!(
                "Staying in world: {} chunks failed to save",
                report.failed.len()
            );
            return Err(SessionError::SaveIncomplete(report));
        }
        if !report.skipped.is_empty() {
            warn!(
                "Left {} quarantined chunks unsaved",
                report.skipped.len()
            );
        }
        if let Some(active) = self.active.take() {
            info!("Left world {:?}", active.world.info().name());
        }
        Ok(report)
    }

    /// Leaves the world without saving, dropping unsaved edits.
    ///
    /// Returns the abandoned world, or `None` if no world was active.
    pub fn abandon_world(&mut self) -> Option<ActiveWorld> {
        let active = self.active.take()?;
        let unsaved = active.world.dirty_chunks().len();
        if unsaved > 0 {
            warn!(
                "Abandoned world {:?} with {unsaved} unsaved chunks",
                active.world.info().name()
            );
        }
        Some(active)
    }
}

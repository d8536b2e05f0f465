//! Command handlers: world management and headless play sessions.

use anyhow::{Context, Result};
use cubix_common::ChunkPos;
use cubix_gameplay::{Session, SessionError, TickInput};
use cubix_world::{parse_seed, SaveReport, WorldCatalog, WorldInfo};
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::timing::FixedStep;

/// Extra save attempts after a failed exit save.
pub const SAVE_RETRIES: u32 = 2;

/// How a headless play session is driven.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Ticks to run; `None` uses the configured session length
    pub ticks: Option<u32>,
    /// Input held for every tick
    pub input: TickInput,
    /// Pace ticks to wall-clock time
    pub realtime: bool,
}

/// Result of a headless play session.
#[derive(Debug)]
pub struct PlayOutcome {
    /// Ticks simulated
    pub ticks: u32,
    /// Final feet position
    pub position: Vec3,
    /// Player ended on the ground
    pub on_ground: bool,
    /// Chunks loaded during the session
    pub loaded_chunks: usize,
    /// Stored chunks that failed to load
    pub load_failures: Vec<ChunkPos>,
    /// Chunks written on exit
    pub saved: Vec<ChunkPos>,
    /// Chunks whose edits were lost after every save attempt failed
    pub lost: Vec<ChunkPos>,
    /// Quarantined chunks left unwritten under strict loading
    pub skipped: Vec<ChunkPos>,
}

/// Lists worlds under the saves root.
pub fn list_worlds(config: &EngineConfig) -> Result<Vec<WorldInfo>> {
    let catalog = WorldCatalog::new(&config.saves_dir);
    catalog
        .list_worlds()
        .with_context(|| format!("listing {}", config.saves_dir.display()))
}

/// Creates a world from a name and seed text.
pub fn create_world(config: &EngineConfig, name: &str, seed_text: Option<&str>) -> Result<WorldInfo> {
    let seed = parse_seed(seed_text.unwrap_or(&config.default_seed_text));
    let catalog = WorldCatalog::new(&config.saves_dir);
    catalog
        .create_world(name, seed)
        .with_context(|| format!("creating world {name:?}"))
}

/// Deletes a world by id.
pub fn delete_world(config: &EngineConfig, id: &str) -> Result<WorldInfo> {
    let catalog = WorldCatalog::new(&config.saves_dir);
    let info = catalog
        .open_world(id)
        .with_context(|| format!("opening world {id}"))?;
    catalog
        .delete_world(&info)
        .with_context(|| format!("deleting world {id}"))?;
    Ok(info)
}

/// Runs a headless session in world `id` and saves on exit.
///
/// A partial save is retried, then the remaining edits are dropped and
/// reported in [`PlayOutcome::lost`] rather than failing the command.
pub fn play(config: &EngineConfig, id: &str, options: PlayOptions) -> Result<PlayOutcome> {
    let catalog = WorldCatalog::new(&config.saves_dir);
    let info = catalog
        .open_world(id)
        .with_context(|| format!("opening world {id}"))?;

    let mut session = Session::new(config.physics.clone());
    session.enter_world(info, config.load_policy())?;

    let ticks = options.ticks.unwrap_or(config.session_ticks);
    if options.realtime {
        run_realtime(&mut session, config.tick_rate, ticks, options.input)?;
    } else {
        let dt = config.tick_dt();
        for _ in 0..ticks {
            session.tick(options.input, dt)?;
        }
    }

    let Some(active) = session.active() else {
        anyhow::bail!("session ended unexpectedly");
    };
    let player = active.player;
    let loaded_chunks = active.world.loaded_count();
    let load_failures: Vec<ChunkPos> = active.world.load_failures().iter().map(|f| f.pos).collect();
    info!(
        "Simulated {ticks} ticks: player at ({:.2}, {:.2}, {:.2}), {loaded_chunks} chunks loaded",
        player.position.x, player.position.y, player.position.z
    );

    let ExitOutcome { saved, lost, skipped } = exit_with_retry(&mut session)?;
    Ok(PlayOutcome {
        ticks,
        position: player.position,
        on_ground: player.on_ground,
        loaded_chunks,
        load_failures,
        saved,
        lost,
        skipped,
    })
}

fn run_realtime(session: &mut Session, tick_rate: u32, ticks: u32, input: TickInput) -> Result<()> {
    let mut timing = FixedStep::new(tick_rate);
    let dt = timing.fixed_dt();
    let mut done = 0;
    while done < ticks {
        let frame_dt = timing.delta_time();
        let due = timing.accumulate(frame_dt);
        for _ in 0..due.min(ticks - done) {
            session.tick(input, dt)?;
            done += 1;
        }
        timing.sleep_remainder();
    }
    debug!("Realtime loop finished after {done} ticks");
    Ok(())
}

#[derive(Debug, Default)]
struct ExitOutcome {
    saved: Vec<ChunkPos>,
    lost: Vec<ChunkPos>,
    skipped: Vec<ChunkPos>,
}

/// Leaves the world, retrying a partial save before giving up on it.
fn exit_with_retry(session: &mut Session) -> Result<ExitOutcome> {
    let mut outcome = ExitOutcome::default();
    let mut attempt = 0;
    loop {
        match session.exit_world() {
            Ok(report) => {
                outcome.saved.extend(report.saved);
                outcome.skipped = report.skipped;
                return Ok(outcome);
            },
            Err(SessionError::SaveIncomplete(report)) => {
                log_failed(&report);
                outcome.saved.extend(report.saved);
                if attempt == SAVE_RETRIES {
                    outcome.lost = report.failed.into_iter().map(|(pos, _)| pos).collect();
                    outcome.skipped = report.skipped;
                    warn!("Giving up on {} chunks after {attempt} retries", outcome.lost.len());
                    session.abandon_world();
                    return Ok(outcome);
                }
                attempt += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }
}

fn log_failed(report: &SaveReport) {
    for (pos, e) in &report.failed {
        warn!("Chunk {pos} not saved: {e}");
    }
}

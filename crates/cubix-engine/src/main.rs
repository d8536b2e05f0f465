//! # Cubix Engine
//!
//! Headless entry point for Cubix.
//!
//! This crate ties together all subsystems:
//! - World: chunk storage, generation and persistence
//! - Gameplay: player physics and the session handle

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod timing;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cubix_gameplay::TickInput;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::PlayOptions;
use crate::config::EngineConfig;

#[derive(Parser)]
#[command(name = "cubix", version, about = "Headless Cubix world tool")]
struct Cli {
    /// Config file (defaults to cubix.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the saves directory
    #[arg(long, global = true)]
    saves_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved worlds
    List,
    /// Create a new world
    Create {
        /// Display name
        name: String,
        /// Seed text: an integer, or any text to hash
        #[arg(long, short)]
        seed: Option<String>,
    },
    /// Delete a world and all its chunks
    Delete {
        /// World id
        id: String,
    },
    /// Run a headless session in a world, then save and exit
    Play {
        /// World id
        id: String,
        /// Ticks to simulate
        #[arg(long, short)]
        ticks: Option<u32>,
        /// Strafe input held every tick, in [-1, 1]
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        move_x: f32,
        /// Forward input held every tick, in [-1, 1]
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        move_z: f32,
        /// Hold jump
        #[arg(long)]
        jump: bool,
        /// Pace ticks to wall-clock time
        #[arg(long)]
        realtime: bool,
    },
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(EngineConfig::config_path);
    // Logged once the subscriber below exists.
    let loaded = EngineConfig::try_load_from(&config_path);
    let mut config = loaded
        .as_ref()
        .ok()
        .and_then(Option::clone)
        .unwrap_or_default();
    if let Some(saves_dir) = &cli.saves_dir {
        config.saves_dir.clone_from(saves_dir);
    }

    // RUST_LOG wins over the configured filter.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("Cubix {}", env!("CARGO_PKG_VERSION"));
    match &loaded {
        Ok(Some(_)) => info!("Loaded config from {}", config_path.display()),
        Ok(None) => info!("Config file {} not found, using defaults", config_path.display()),
        Err(e) => warn!("{e}, using defaults"),
    }
    info!("Saves directory: {}", config.saves_dir.display());

    run(cli.command, &config, &config_path)
}

fn run(command: Command, config: &EngineConfig, config_path: &std::path::Path) -> Result<()> {
    match command {
        Command::List => {
            let worlds = commands::list_worlds(config)?;
            if worlds.is_empty() {
                println!("No worlds in {}", config.saves_dir.display());
            }
            for world in worlds {
                println!("{}  {:<24} seed {}", world.id(), world.name(), world.seed());
            }
        },
        Command::Create { name, seed } => {
            let world = commands::create_world(config, &name, seed.as_deref())?;
            println!("Created {} ({}) with seed {}", world.name(), world.id(), world.seed());
        },
        Command::Delete { id } => {
            let world = commands::delete_world(config, &id)?;
            println!("Deleted {} ({})", world.name(), world.id());
        },
        Command::Play {
            id,
            ticks,
            move_x,
            move_z,
            jump,
            realtime,
        } => {
            let options = PlayOptions {
                ticks,
                input: TickInput {
                    move_x: move_x.clamp(-1.0, 1.0),
                    move_z: move_z.clamp(-1.0, 1.0),
                    jump,
                },
                realtime,
            };
            let outcome = commands::play(config, &id, options)?;
            println!(
                "Ran {} ticks, player at ({:.2}, {:.2}, {:.2}){}",
                outcome.ticks,
                outcome.position.x,
                outcome.position.y,
                outcome.position.z,
                if outcome.on_ground { " on ground" } else { "" }
            );
            println!(
                "{} chunks loaded, {} saved",
                outcome.loaded_chunks,
                outcome.saved.len()
            );
            if !outcome.load_failures.is_empty() {
                println!("{} stored chunks failed to load", outcome.load_failures.len());
            }
            for pos in &outcome.skipped {
                println!("  kept damaged chunk {pos} on disk");
            }
            if !outcome.lost.is_empty() {
                warn!("{} chunks could not be saved", outcome.lost.len());
                for pos in &outcome.lost {
                    println!("  unsaved chunk {pos}");
                }
            }
        },
        Command::Config { write } => {
            let text = toml::to_string_pretty(config)?;
            println!("# {}", config_path.display());
            print!("{text}");
            if write {
                config.save_to(config_path)?;
            }
        },
    }
    Ok(())
}

//! Engine configuration.
//!
//! Loaded from `cubix.toml` in the platform config directory unless a path
//! is given on the command line.

use cubix_gameplay::PhysicsConfig;
use cubix_world::LoadPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration file name.
const CONFIG_FILE: &str = "cubix.toml";

/// Application directory name under the platform dirs.
const APP_DIR: &str = "cubix";

/// Log filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "cubix=info";

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// File is not valid config TOML
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Storage ===
    /// Directory holding one subdirectory per world
    pub saves_dir: PathBuf,
    /// Fail chunk loads on corrupt files instead of regenerating
    pub strict_chunk_loads: bool,

    // === Simulation ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Ticks a headless play session runs before exiting
    pub session_ticks: u32,

    // === World Creation ===
    /// Seed text used when `create` is given none
    pub default_seed_text: String,

    // === Debug ===
    /// tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: String,

    // === Physics ===
    /// Player physics
    pub physics: PhysicsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            saves_dir: default_saves_dir(),
            strict_chunk_loads: false,

            tick_rate: 60,
            session_ticks: 600,

            default_seed_text: String::new(),

            log_filter: DEFAULT_LOG_FILTER.to_string(),

            physics: PhysicsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    ///
    /// Returns `Ok(None)` if the file doesn't exist. Nothing is logged, so
    /// this can run before the tracing subscriber is installed.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut config = toml::from_str::<Self>(&contents)?;
        config.validate();
        Ok(Some(config))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join(APP_DIR).join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.tick_rate = self.tick_rate.clamp(10, 240);
        self.session_ticks = self.session_ticks.max(1);
        self.physics.validate();

        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
    }

    /// Chunk load policy implied by `strict_chunk_loads`.
    #[must_use]
    pub fn load_policy(&self) -> LoadPolicy {
        if self.strict_chunk_loads {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Regenerate
        }
    }

    /// Length of one simulation tick in seconds.
    #[must_use]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Platform data directory for saves, or `./saves` if there is none.
fn default_saves_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(APP_DIR).join("saves"),
        None => PathBuf::from("saves"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubix_gameplay::ResolverMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.strict_chunk_loads);
        assert_eq!(config.load_policy(), LoadPolicy::Regenerate);
        assert!(config.saves_dir.ends_with("saves"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        config.tick_rate = 1;
        config.session_ticks = 0;
        config.log_filter = "  ".to_string();
        config.physics.half_width = 5.0;

        config.validate();

        assert_eq!(config.tick_rate, 10);
        assert_eq!(config.session_ticks, 1);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.physics.half_width < 0.5);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("cubix.toml");

        let mut config = EngineConfig::default();
        config.saves_dir = temp_dir.path().join("worlds");
        config.strict_chunk_loads = true;
        config.tick_rate = 30;
        config.physics.mode = ResolverMode::Substepped { max_step: 0.5 };

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::try_load_from(&config_path)
            .expect("Failed to load config")
            .expect("config file should exist");
        assert_eq!(loaded.saves_dir, temp_dir.path().join("worlds"));
        assert_eq!(loaded.load_policy(), LoadPolicy::Strict);
        assert_eq!(loaded.tick_rate, 30);
        assert_eq!(loaded.physics.mode, ResolverMode::Substepped { max_step: 0.5 });
    }

    #[test]
    fn test_config_load_missing_file() {
        let loaded = EngineConfig::try_load_from("/nonexistent/path/cubix.toml");
        assert!(matches!(loaded, Ok(None)));
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("cubix.toml");
        fs::write(&config_path, "tick_rate = 20\n[physics]\ngravity = 10.0\n")
            .expect("write failed");

        let config = EngineConfig::try_load_from(&config_path)
            .expect("Failed to load config")
            .expect("config file should exist");
        assert_eq!(config.tick_rate, 20);
        assert!((config.physics.gravity - 10.0).abs() < 1e-6);
        assert!((config.physics.jump_velocity - 9.0).abs() < 1e-6);
        assert_eq!(config.session_ticks, 600);
    }

    #[test]
    fn test_config_invalid_file_is_parse_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("cubix.toml");
        fs::write(&config_path, "tick_rate = \"fast\"").expect("write failed");

        let loaded = EngineConfig::try_load_from(&config_path);
        assert!(matches!(loaded, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_unreadable_path_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // A directory where the file should be.
        let loaded = EngineConfig::try_load_from(temp_dir.path());
        assert!(matches!(loaded, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_load_validates() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("cubix.toml");
        fs::write(&config_path, "tick_rate = 1000\nlog_filter = \"\"\n").expect("write failed");

        let config = EngineConfig::try_load_from(&config_path)
            .expect("Failed to load config")
            .expect("config file should exist");
        assert_eq!(config.tick_rate, 240);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_tick_dt() {
        let mut config = EngineConfig::default();
        config.tick_rate = 20;
        assert!((config.tick_dt() - 0.05).abs() < 1e-6);
    }
}

//! World identity records and the per-world directory layout.
//!
//! ```text
//! <saves>/<world-id>/meta.toml
//! <saves>/<world-id>/chunks/c.<cx>.<cy>.<cz>.bin
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use cubix_common::{ChunkPos, WorldError, WorldResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Metadata file name inside a world directory.
pub const META_FILE: &str = "meta.toml";

/// Chunk subdirectory inside a world directory.
pub const CHUNK_DIR: &str = "chunks";

/// Name used when a world is created with a blank name.
pub const DEFAULT_WORLD_NAME: &str = "Unnamed World";

/// Immutable identity of one world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldInfo {
    id: String,
    name: String,
    seed: u64,
    dir: PathBuf,
}

impl WorldInfo {
    /// Creates a world info record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, seed: u64, dir: PathBuf) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seed,
            dir,
        }
    }

    /// Stable unique id (also the directory name).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generation seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// World directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directory holding chunk files.
    #[must_use]
    pub fn chunk_dir(&self) -> PathBuf {
        self.dir.join(CHUNK_DIR)
    }

    /// Path of the file for one chunk.
    #[must_use]
    pub fn chunk_file(&self, pos: ChunkPos) -> PathBuf {
        self.chunk_dir()
            .join(format!("c.{}.{}.{}.bin", pos.x, pos.y, pos.z))
    }
}

/// Contents of `meta.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Display name
    pub name: String,
    /// Generation seed
    pub seed: u64,
    /// Creation time, seconds since the Unix epoch
    #[serde(default)]
    pub created_at: u64,
}

impl WorldMeta {
    /// Reads metadata from a world directory.
    pub fn load(dir: &Path) -> WorldResult<Self> {
        let contents = fs::read_to_string(dir.join(META_FILE))?;
        toml::from_str(&contents).map_err(|e| WorldError::Meta(e.to_string()))
    }

    /// Writes metadata into a world directory.
    pub fn save(&self, dir: &Path) -> WorldResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| WorldError::Meta(e.to_string()))?;
        fs::write(dir.join(META_FILE), contents)?;
        Ok(())
    }
}

/// Lists, creates and deletes world directories under one saves root.
#[derive(Debug, Clone)]
pub struct WorldCatalog {
    saves_dir: PathBuf,
}

impl WorldCatalog {
    /// Creates a catalog rooted at `saves_dir`.
    #[must_use]
    pub fn new(saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            saves_dir: saves_dir.into(),
        }
    }

    /// Saves root.
    #[must_use]
    pub fn saves_dir(&self) -> &Path {
        &self.saves_dir
    }

    /// Creates the saves root if missing.
    pub fn ensure(&self) -> WorldResult<()> {
        fs::create_dir_all(&self.saves_dir)?;
        Ok(())
    }

    /// Lists worlds sorted by display name.
    ///
    /// Directories without readable metadata are skipped.
    pub fn list_worlds(&self) -> WorldResult<Vec<WorldInfo>> {
        if !self.saves_dir.exists() {
            return Ok(Vec::new());
        }

        let mut worlds = Vec::new();
        for entry in fs::read_dir(&self.saves_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir = entry.path();
            let id = entry.file_name().to_string_lossy().into_owned();
            match WorldMeta::load(&dir) {
                Ok(meta) => worlds.push(WorldInfo::new(id, meta.name, meta.seed, dir)),
                Err(WorldError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Skipping {} (no {META_FILE})", dir.display());
                },
                Err(e) => warn!("Skipping world {id}: {e}"),
            }
        }
        worlds.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(worlds)
    }

    /// Creates a new world directory with a fresh id.
    pub fn create_world(&self, name: &str, seed: u64) -> WorldResult<WorldInfo> {
        self.ensure()?;

        let name = match name.trim() {
            "" => DEFAULT_WORLD_NAME,
            trimmed => trimmed,
        };
        let id = uuid::Uuid::new_v4().to_string();
        let dir = self.saves_dir.join(&id);
        fs::create_dir_all(&dir)?;

        let meta = WorldMeta {
            name: name.to_string(),
            seed,
            created_at: unix_now(),
        };
        meta.save(&dir)?;

        info!("Created world {name:?} ({id}) with seed {seed}");
        Ok(WorldInfo::new(id, meta.name, seed, dir))
    }

    /// Opens an existing world by id.
    pub fn open_world(&self, id: &str) -> WorldResult<WorldInfo> {
        let dir = self.world_dir(id)?;
        let meta = WorldMeta::load(&dir)?;
        Ok(WorldInfo::new(id, meta.name, meta.seed, dir))
    }

    /// Deletes a world directory and everything in it.
    ///
    /// Deleting a world whose directory is already gone is a no-op.
    pub fn delete_world(&self, world: &WorldInfo) -> WorldResult<()> {
        let dir = self.world_dir(world.id())?;
        if !dir.exists() {
            return Ok(());
        }
        fs::remove_dir_all(&dir)?;
        info!("Deleted world {:?} ({})", world.name(), world.id());
        Ok(())
    }

    /// Resolves a world id to its directory, refusing anything that is not a
    /// plain child of the saves root.
    fn world_dir(&self, id: &str) -> WorldResult<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => {},
            _ if id.is_empty() => return Err(WorldError::InvalidWorldId(id.to_string())),
            _ => return Err(WorldError::PathEscape(self.saves_dir.join(id))),
        }
        Ok(self.saves_dir.join(id))
    }
}

/// Parses user seed text.
///
/// Blank text is seed 0, decimal integers are used as-is, and anything else
/// is hashed with 64-bit FNV-1a over its UTF-16 code units.
#[must_use]
pub fn parse_seed(text: &str) -> u64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    if let Ok(value) = text.parse::<i64>() {
        return value as u64;
    }
    text.encode_utf16().fold(0xcbf2_9ce4_8422_2325_u64, |h, unit| {
        (h ^ u64::from(unit)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chunk_file_naming() {
        let info = WorldInfo::new("abc", "Test", 1, PathBuf::from("/saves/abc"));
        assert_eq!(
            info.chunk_file(ChunkPos::new(-1, 0, 12)),
            PathBuf::from("/saves/abc/chunks/c.-1.0.12.bin")
        );
    }

    #[test]
    fn test_create_and_list() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path().join("saves"));

        let b = catalog.create_world("Beta", 2).expect("create failed");
        let a = catalog.create_world("  Alpha ", 1).expect("create failed");
        assert_eq!(a.name(), "Alpha");
        assert!(a.dir().join(META_FILE).exists());

        // Stray directory without metadata is ignored.
        fs::create_dir_all(catalog.saves_dir().join("junk")).expect("mkdir failed");

        let worlds = catalog.list_worlds().expect("list failed");
        assert_eq!(worlds, vec![a, b]);
    }

    #[test]
    fn test_blank_name_gets_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path());
        let info = catalog.create_world("   ", 0).expect("create failed");
        assert_eq!(info.name(), DEFAULT_WORLD_NAME);
    }

    #[test]
    fn test_open_world_reads_meta() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path());
        let created = catalog.create_world("Test", 42).expect("create failed");

        let opened = catalog.open_world(created.id()).expect("open failed");
        assert_eq!(opened, created);

        let meta = WorldMeta::load(created.dir()).expect("meta failed");
        assert!(meta.created_at > 0);
    }

    #[test]
    fn test_delete_world() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path());
        let info = catalog.create_world("Doomed", 9).expect("create failed");
        fs::create_dir_all(info.chunk_dir()).expect("mkdir failed");
        fs::write(info.chunk_file(ChunkPos::default()), b"x").expect("write failed");

        catalog.delete_world(&info).expect("delete failed");
        assert!(!info.dir().exists());
        // Second delete is a no-op.
        catalog.delete_world(&info).expect("delete failed");
    }

    #[test]
    fn test_delete_refuses_escape() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path().join("saves"));
        let evil = WorldInfo::new("../outside", "Evil", 0, temp_dir.path().to_path_buf());
        assert!(matches!(
            catalog.delete_world(&evil),
            Err(WorldError::PathEscape(_))
        ));
        assert!(matches!(
            catalog.open_world(""),
            Err(WorldError::InvalidWorldId(_))
        ));
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = WorldCatalog::new(temp_dir.path().join("absent"));
        assert!(catalog.list_worlds().expect("list failed").is_empty());
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed(""), 0);
        assert_eq!(parse_seed("   "), 0);
        assert_eq!(parse_seed("42"), 42);
        assert_eq!(parse_seed(" -1 "), u64::MAX);
        // FNV-1a of "a"
        assert_eq!(parse_seed("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(parse_seed("hello"), parse_seed(" hello "));
        assert_ne!(parse_seed("hello"), parse_seed("world"));
    }
}

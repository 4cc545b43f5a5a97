//! # Roster Store
//!
//! The player roster and its JSON file. The file is a pretty-printed array of
//! `{name, class, hp, cd, init}` objects; it is read once at startup and written
//! only when the game master asks for it.
//!
//! ```rust,no_run
//! use initiative_host::roster::Roster;
//! use initiative_host::types::Player;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut roster = Roster::load("players.json").await?;
//!     roster.add(Player::new("Aria", "Rogue", 12, 0));
//!     roster.save().await?;
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info};
use tokio::fs;

use crate::errors::RosterError;
use crate::types::Player;

/// Default roster file name.
pub const DEFAULT_ROSTER_FILE: &str = "players.json";

#[derive(Debug, Clone)]
pub struct Roster {
    path: PathBuf,
    players: Vec<Player>,
}

impl Roster {
    /// An empty roster bound to `path`; nothing is read.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            players: Vec::new(),
        }
    }

    /// Load the roster at `path`. A missing file yields an empty roster.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, RosterError> {
        let path = path.into();
        let players = match fs::read_to_string(&path).await {
            Ok(data) => {
                // Guard against any accidental leading NULs
                let cleaned = data.trim_start_matches('\0');
                serde_json::from_str::<Vec<Player>>(cleaned).map_err(|e| RosterError::Json {
                    path: path.display().to_string(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No roster at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                return Err(RosterError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        info!("Loaded {} players from {}", players.len(), path.display());
        Ok(Self { path, players })
    }

    /// Write the roster as pretty-printed JSON.
    pub async fn save(&self) -> Result<(), RosterError> {
        let content = serde_json::to_string_pretty(&self.players).map_err(|e| RosterError::Json {
            path: self.path.display().to_string(),
            source: e,
        })?;
        write_roster_file(&self.path, &content).map_err(|e| RosterError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        info!("Saved {} players to {}", self.players.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Player, RosterError> {
        let len = self.players.len();
        self.players
            .get(index)
            .ok_or(RosterError::NoSuchPlayer { index, len })
    }

    pub fn add(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn update(&mut self, index: usize, player: Player) -> Result<(), RosterError> {
        let len = self.players.len();
        let slot = self
            .players
            .get_mut(index)
            .ok_or(RosterError::NoSuchPlayer { index, len })?;
        *slot = player;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Player, RosterError> {
        if index >= self.players.len() {
            return Err(RosterError::NoSuchPlayer {
                index,
                len: self.players.len(),
            });
        }
        Ok(self.players.remove(index))
    }

    /// Copy battle initiatives back into the roster, matched by position.
    pub fn apply_initiatives(&mut self, battle_players: &[Player]) {
        for (slot, chosen) in self.players.iter_mut().zip(battle_players) {
            slot.init = chosen.init;
        }
    }
}

/// Write `content` next to `path` and rename it into place while holding an
/// exclusive lock on the current file. The temp file is removed on any failure.
fn write_roster_file(path: &Path, content: &str) -> std::io::Result<()> {
    use std::fs::OpenOptions;
    use std::io::Write;

    let current = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;
    current.lock_exclusive()?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_ROSTER_FILE);
    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{}.", base))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;
    debug!("Staged roster at {}", staged.path().display());

    // Dropping the PersistError deletes the staged file
    staged.persist(path).map_err(|e| e.error)?;
    current.unlock()?;
    Ok(())
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::models::PlayerRecord;

const MAPPINGS_FILE: &str = "mappings.json";
const ROSTER_FILE: &str = "roster.json";

/// File-based persistence for the coaching session: the name-to-handle
/// links and the last successfully ingested roster. Every save replaces
/// the whole file. Single coach, single session; concurrent writers are
/// out of scope.
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted in `data_dir`, creating the directory if
    /// needed.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Self { data_dir })
    }

    // --- Handle Mappings ---

    /// Load every known name-to-handle link. A missing or unreadable
    /// file is an empty store, never an error.
    pub fn load_mappings(&self) -> BTreeMap<String, String> {
        self.read_json_or_default(&self.mappings_path())
    }

    /// Persist the whole mapping set, replacing the previous file.
    pub fn save_mappings(&self, mappings: &BTreeMap<String, String>) -> Result<()> {
        let path = self.mappings_path();
        self.write_json(&path, mappings)?;
        info!("Saved {} handle mappings to {}", mappings.len(), path.display());
        Ok(())
    }

    // --- Roster Cache ---

    /// Load the roster from the previous successful ingest, if any.
    pub fn load_roster(&self) -> Option<Vec<PlayerRecord>> {
        let path = self.roster_path();
        if !path.exists() {
            return None;
        }
        let roster: Vec<PlayerRecord> = self.read_json_or_default(&path);
        if roster.is_empty() {
            None
        } else {
            Some(roster)
        }
    }

    /// Replace the cached roster wholesale. Called only after an ingest
    /// succeeded, so a failed ingest never clobbers the previous roster.
    pub fn save_roster(&self, players: &[PlayerRecord]) -> Result<()> {
        let path = self.roster_path();
        self.write_json(&path, &players)?;
        info!("Cached {} roster players to {}", players.len(), path.display());
        Ok(())
    }

    // --- Helper Methods ---

    fn mappings_path(&self) -> PathBuf {
        self.data_dir.join(MAPPINGS_FILE)
    }

    fn roster_path(&self) -> PathBuf {
        self.data_dir.join(ROSTER_FILE)
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn read_json_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        if !path.exists() {
            return T::default();
        }

        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                return T::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(data) => data,
            Err(e) => {
                warn!("Corrupt store file {}: {}", path.display(), e);
                T::default()
            }
        }
    }
}

use std::collections::BTreeMap;

use anyhow::Result;
use log::{info, warn};

use crate::config::AppConfig;
use crate::domain::models::{OpeningCount, PlayerRecord};
use crate::errors::CoachError;
use crate::ingest::{RosterSource, SkippedRow};
use crate::roster;
use crate::stats::OpeningSource;
use crate::store::SessionStore;

/// Outcome of one repertoire analysis, kept for re-display until the
/// next successful run replaces it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub target_name: String,
    pub handle: String,
    pub white: Vec<OpeningCount>,
    pub black: Vec<OpeningCount>,
}

/// Process-local state for one coaching session: the roster, the durable
/// name-to-handle links, and the most recent analysis. Loaded at open,
/// mutated only by explicit actions, one at a time.
pub struct Session {
    store: SessionStore,
    roster: Vec<PlayerRecord>,
    skipped: Vec<SkippedRow>,
    mappings: BTreeMap<String, String>,
    last_analysis: Option<Analysis>,
}

impl Session {
    /// Open a session: create the store, load persisted handle mappings
    /// and the roster cached by the previous successful ingest.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = SessionStore::new(&config.data_dir)?;
        let mappings = store.load_mappings();
        let roster = store.load_roster().unwrap_or_default();
        info!(
            "Session opened: {} roster players, {} handle mappings",
            roster.len(),
            mappings.len()
        );

        Ok(Self {
            store,
            roster,
            skipped: Vec::new(),
            mappings,
            last_analysis: None,
        })
    }

    // --- Roster ---

    /// Replace the roster from one source, optionally keeping only one
    /// club's players. On failure the previous roster, in memory and on
    /// disk, stays untouched.
    pub fn load_roster(
        &mut self,
        source: &dyn RosterSource,
        club_filter: Option<i64>,
    ) -> Result<(), CoachError> {
        info!("Loading roster from {}", source.describe());
        let mut outcome = source.load()?;
        for row in &outcome.skipped {
            warn!("Row {} skipped: {}", row.row, row.reason);
        }
        roster::join_clubs(&mut outcome.players, &outcome.clubs);
        if let Some(club_ref) = club_filter {
            outcome.players.retain(|player| player.club_ref == Some(club_ref));
        }

        self.roster = outcome.players;
        self.skipped = outcome.skipped;
        if let Err(e) = self.store.save_roster(&self.roster) {
            warn!("Roster cache not written: {}", e);
        }
        Ok(())
    }

    pub fn roster(&self) -> &[PlayerRecord] {
        &self.roster
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    // --- Handle Mappings ---

    /// Record one name-to-handle link; last write wins. Persisted
    /// immediately, replacing the whole store file.
    pub fn record_mapping(&mut self, player_name: &str, handle: &str) -> Result<()> {
        self.mappings
            .insert(player_name.to_string(), handle.to_string());
        self.store.save_mappings(&self.mappings)
    }

    pub fn handle_for(&self, player_name: &str) -> Option<&str> {
        self.mappings.get(player_name).map(String::as_str)
    }

    pub fn mappings(&self) -> &BTreeMap<String, String> {
        &self.mappings
    }

    // --- Analysis ---

    /// Run one repertoire analysis and remember it. When the source
    /// yields nothing usable the previous analysis, if any, stays.
    pub fn analyze(
        &mut self,
        target_name: &str,
        handle: &str,
        source: &dyn OpeningSource,
        max_games: u32,
    ) -> Result<&Analysis, CoachError> {
        info!(
            "Analyzing {} ({}) via {}",
            target_name,
            handle,
            source.describe()
        );
        let Some(repertoire) = source.collect(handle, max_games) else {
            return Err(CoachError::insufficient(handle));
        };
        let analysis = Analysis {
            target_name: target_name.to_string(),
            handle: handle.to_string(),
            white: repertoire.white,
            black: repertoire.black,
        };
        Ok(self.last_analysis.insert(analysis))
    }

    pub fn last_analysis(&self) -> Option<&Analysis> {
        self.last_analysis.as_ref()
    }
}

use anyhow::Result;
use log::{debug, info, warn};

use crate::config::StatsSettings;
use crate::domain::models::{ExportedGame, GameRecord};
use crate::http::WebClient;
use crate::stats::tally::repertoire_from_games;
use crate::stats::{OpeningSource, Repertoire};

const NDJSON_ACCEPT: &str = "application/x-ndjson";

/// Primary repertoire source: the public game-export API. One JSON object
/// per line, most recent games first, opening metadata included when the
/// query asks for it.
pub struct GameExportSource {
    base_url: String,
    top_openings: usize,
    client: WebClient,
}

impl GameExportSource {
    pub fn new(settings: &StatsSettings) -> Result<Self> {
        let client = WebClient::new(&settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            base_url: settings.api_base_url.clone(),
            top_openings: settings.top_openings,
            client,
        })
    }

    // --- URL Building ---

    fn build_url(&self, handle: &str, max_games: u32) -> String {
        format!(
            "{}/api/games/user/{}?max={}&opening=true",
            self.base_url,
            urlencoding::encode(handle),
            max_games
        )
    }

    // --- HTTP Fetching ---

    fn fetch_export(&self, handle: &str, max_games: u32) -> Option<String> {
        let url = self.build_url(handle, max_games);
        debug!("Fetching game export: {}", url);
        let response = match self.client.get_with_headers(&url, &[("Accept", NDJSON_ACCEPT)]) {
            Ok(response) => response,
            Err(e) => {
                warn!("Game export fetch failed for {}: {}", handle, e);
                return None;
            }
        };
        let status = response.status();
        if !status.is_success() {
            warn!("Game export for {} answered HTTP {}", handle, status);
            return None;
        }
        match response.text() {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Game export body unreadable for {}: {}", handle, e);
                None
            }
        }
    }
}

impl OpeningSource for GameExportSource {
    fn describe(&self) -> String {
        format!("game export API at {}", self.base_url)
    }

    fn collect(&self, handle: &str, max_games: u32) -> Option<Repertoire> {
        let body = self.fetch_export(handle, max_games)?;
        let games = classify_export(&body, handle);
        if games.is_empty() {
            info!("No classifiable games for {}", handle);
            return None;
        }
        Some(repertoire_from_games(&games, self.top_openings))
    }
}

/// Reduce an export body to per-color game records. Lines that do not
/// parse as a game, or whose white-side identity is missing, are skipped
/// one by one rather than failing the run.
pub fn classify_export(body: &str, handle: &str) -> Vec<GameRecord> {
    let mut games = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let exported: ExportedGame = match serde_json::from_str(line) {
            Ok(game) => game,
            Err(e) => {
                warn!("Skipping unparseable export line: {}", e);
                continue;
            }
        };
        if let Some(game) = exported.classify(handle) {
            games.push(game);
        }
    }
    games
}

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::SourceSettings;
use crate::domain::models::{ClubRecord, PlayerRecord};
use crate::errors::CoachError;
use crate::http::WebClient;
use crate::ingest::{parse_elo, IngestOutcome, RosterSource, SkippedRow};

const PLAYER_ROW_SELECTOR: &str = "table tr";
const CELL_SELECTOR: &str = "td";
const HEADING_SELECTOR: &str = "h1";
const FEDERATION_ID_PATTERN: &str = r"^[A-Z]\d{5}$";

// Roster rows pad a leading decoration cell, so real entries are wider.
const MIN_ROW_CELLS: usize = 4;
const COL_FEDERATION_ID: usize = 1;
const COL_NAME: usize = 2;
const COL_ELO: usize = 3;
const COL_CATEGORY: usize = 4;

/// Scraper for a single club's public roster page. Rows that do not look
/// like player entries (navigation, headers, ads) are filtered by shape
/// and by the federation id pattern in the second cell.
pub struct RosterPageSource {
    base_url: String,
    club_ref: i64,
    client: WebClient,
    federation_id_regex: Regex,
}

impl RosterPageSource {
    pub fn new(settings: &SourceSettings, club_ref: i64) -> Result<Self> {
        let client = WebClient::new(&settings.user_agent, settings.timeout_secs)?;
        let federation_id_regex = Self::compile_regex()?;

        Ok(Self {
            base_url: settings.roster_base_url.clone(),
            club_ref,
            client,
            federation_id_regex,
        })
    }

    // --- Construction Helpers ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(FEDERATION_ID_PATTERN).context("Failed to compile federation id regex")
    }

    // --- URL Building ---

    fn build_url(&self) -> String {
        format!(
            "{}/ListeJoueurs.aspx?Action=CLUB&ClubRef={}",
            self.base_url, self.club_ref
        )
    }

    // --- HTTP Fetching ---

    fn fetch_page(&self) -> Result<String, CoachError> {
        let url = self.build_url();
        debug!("Fetching roster page: {}", url);
        let response = self.client.get(&url).map_err(CoachError::unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::remote(status));
        }
        response.text().map_err(CoachError::unavailable)
    }

    // --- Row Extraction ---

    /// Extract players from a roster page. A page without player rows is
    /// an empty roster, not an error.
    pub fn parse_page(&self, html: &str) -> IngestOutcome {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse(PLAYER_ROW_SELECTOR).unwrap();
        let cell_selector = Selector::parse(CELL_SELECTOR).unwrap();

        let club_name = self.extract_club_name(&document);
        let mut outcome = IngestOutcome::default();
        if let Some(name) = &club_name {
            outcome.clubs.push(ClubRecord {
                club_ref: self.club_ref,
                name: name.clone(),
            });
        }

        for (idx, row) in document.select(&row_selector).enumerate() {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
                .collect();
            if cells.len() <= MIN_ROW_CELLS {
                continue;
            }
            if !self.federation_id_regex.is_match(&cells[COL_FEDERATION_ID]) {
                continue;
            }
            let name = cells[COL_NAME].clone();
            if name.is_empty() {
                outcome
                    .skipped
                    .push(SkippedRow::new(idx + 1, "player row without a name"));
                continue;
            }
            outcome.players.push(PlayerRecord {
                name,
                federation_id: Some(cells[COL_FEDERATION_ID].clone()),
                category_raw: cells[COL_CATEGORY].clone(),
                // The rating cell may carry a type suffix after the number.
                elo: parse_elo(cells[COL_ELO].split_whitespace().next().unwrap_or("")),
                club_ref: Some(self.club_ref),
                club_name: club_name.clone(),
            });
        }

        outcome
    }

    fn extract_club_name(&self, document: &Html) -> Option<String> {
        let heading_selector = Selector::parse(HEADING_SELECTOR).unwrap();
        document
            .select(&heading_selector)
            .next()
            .map(|heading| normalize_whitespace(&heading.text().collect::<String>()))
            .filter(|name| !name.is_empty())
    }
}

impl RosterSource for RosterPageSource {
    fn describe(&self) -> String {
        format!("club roster page for club {}", self.club_ref)
    }

    fn load(&self) -> Result<IngestOutcome, CoachError> {
        let html = self.fetch_page()?;
        let outcome = self.parse_page(&html);
        info!(
            "Roster page parsed: {} players, {} rows skipped",
            outcome.players.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::StatsSettings;
use crate::domain::models::OpeningCount;
use crate::http::WebClient;
use crate::stats::tally::OpeningTally;
use crate::stats::{OpeningSource, Repertoire};

const WHITE_REGION_SELECTOR: &str = "#white-repertoire";
const BLACK_REGION_SELECTOR: &str = "#black-repertoire";
const ROW_SELECTOR: &str = "tr";
const OPENING_SELECTOR: &str = ".opening";
const GAMES_SELECTOR: &str = ".games";
const GAMES_COUNT_PATTERN: &str = r"(\d+)";
const MAX_ROWS: usize = 5;

/// Secondary repertoire source: a scrape of the player's public profile
/// page. A textual heuristic over third-party markup with no stability
/// guarantee, so every structural miss degrades to an empty table rather
/// than an error.
pub struct ProfileScrapeSource {
    base_url: String,
    client: WebClient,
    games_count_regex: Regex,
}

impl ProfileScrapeSource {
    pub fn new(settings: &StatsSettings) -> Result<Self> {
        let client = WebClient::new(&settings.user_agent, settings.timeout_secs)?;
        let games_count_regex = Self::compile_regex()?;

        Ok(Self {
            base_url: settings.profile_base_url.clone(),
            client,
            games_count_regex,
        })
    }

    // --- Construction Helpers ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(GAMES_COUNT_PATTERN).context("Failed to compile games count regex")
    }

    // --- URL Building ---

    fn build_url(&self, handle: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(handle))
    }

    // --- HTTP Fetching ---

    fn fetch_page(&self, handle: &str) -> Option<String> {
        let url = self.build_url(handle);
        debug!("Fetching profile page: {}", url);
        let response = match self.client.get(&url) {
            Ok(response) => response,
            Err(e) => {
                warn!("Profile fetch failed for {}: {}", handle, e);
                return None;
            }
        };
        let status = response.status();
        if !status.is_success() {
            warn!("Profile page for {} answered HTTP {}", handle, status);
            return None;
        }
        match response.text() {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Profile body unreadable for {}: {}", handle, e);
                None
            }
        }
    }

    // --- Region Extraction ---

    /// Extract both repertoire regions from profile markup. Regions or
    /// rows that do not match the expected structure simply contribute
    /// nothing.
    pub fn parse_profile(&self, html: &str) -> Repertoire {
        let document = Html::parse_document(html);
        Repertoire {
            white: self.extract_region(&document, WHITE_REGION_SELECTOR),
            black: self.extract_region(&document, BLACK_REGION_SELECTOR),
        }
    }

    fn extract_region(&self, document: &Html, marker: &str) -> Vec<OpeningCount> {
        let region_selector = Selector::parse(marker).unwrap();
        let row_selector = Selector::parse(ROW_SELECTOR).unwrap();
        let opening_selector = Selector::parse(OPENING_SELECTOR).unwrap();
        let games_selector = Selector::parse(GAMES_SELECTOR).unwrap();

        let Some(region) = document.select(&region_selector).next() else {
            debug!("Repertoire region '{}' not found", marker);
            return Vec::new();
        };

        let mut tally = OpeningTally::new();
        let mut rows_taken = 0;
        for row in region.select(&row_selector) {
            if rows_taken == MAX_ROWS {
                break;
            }
            let Some(opening) = row
                .select(&opening_selector)
                .next()
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
            else {
                continue;
            };
            let Some(games) = row
                .select(&games_selector)
                .next()
                .map(|cell| cell.text().collect::<String>())
                .and_then(|text| self.parse_games_count(&text))
            else {
                continue;
            };
            tally.add_count(&opening, games);
            rows_taken += 1;
        }
        tally.into_ranked(MAX_ROWS)
    }

    fn parse_games_count(&self, text: &str) -> Option<u32> {
        let captures = self.games_count_regex.captures(text)?;
        captures.get(1)?.as_str().parse().ok()
    }
}

impl OpeningSource for ProfileScrapeSource {
    fn describe(&self) -> String {
        format!("profile pages under {}", self.base_url)
    }

    /// The profile page already shows a fixed top five per color, so the
    /// game window does not apply here.
    fn collect(&self, handle: &str, _max_games: u32) -> Option<Repertoire> {
        let html = self.fetch_page(handle)?;
        Some(self.parse_profile(&html))
    }
}

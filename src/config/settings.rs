use std::env;
use std::path::PathBuf;

/// Hosted federation workbook (sheets `joueur` and `club`).
const DEFAULT_WORKBOOK_URL: &str = "http://basilevinet.com/data/BaseFFE.xls";
/// Federation site serving club roster pages.
const DEFAULT_ROSTER_BASE_URL: &str = "http://www.echecs.asso.fr";
/// Game-export API host (newline-delimited JSON).
const DEFAULT_GAMES_API_URL: &str = "https://lichess.org";
/// Third-party repertoire profile pages; deployment-specific, so the
/// default is a placeholder meant to be repointed.
const DEFAULT_PROFILE_BASE_URL: &str = "https://repertoire.example/player";

pub struct SourceSettings {
    pub workbook_url: String,
    pub roster_base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            // The hosted export moves around; deployments repoint it.
            workbook_url: env::var("FFE_WORKBOOK_URL")
                .unwrap_or_else(|_| DEFAULT_WORKBOOK_URL.to_string()),
            roster_base_url: DEFAULT_ROSTER_BASE_URL.to_string(),
            user_agent: "MasterCoach/0.1",
            timeout_secs: 10,
        }
    }
}

pub struct StatsSettings {
    pub api_base_url: String,
    pub profile_base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    /// Window of most-recent games requested from the export API.
    pub max_games: u32,
    /// Entries kept per color in a ranked repertoire table.
    pub top_openings: usize,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_GAMES_API_URL.to_string(),
            profile_base_url: DEFAULT_PROFILE_BASE_URL.to_string(),
            user_agent: "MasterCoach/0.1",
            timeout_secs: 10,
            max_games: 50,
            top_openings: 5,
        }
    }
}

pub struct AppConfig {
    pub sources: SourceSettings,
    pub stats: StatsSettings,
    /// Directory holding `mappings.json` and the parsed-roster cache.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            sources: SourceSettings::default(),
            stats: StatsSettings::default(),
            data_dir: env::var("MASTER_COACH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
        }
    }
}

// Config is passed explicitly into services and clients (Dependency
// Injection) rather than living in a global.

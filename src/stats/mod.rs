pub mod lichess;
pub mod profile_scrape;
pub mod tally;

pub use lichess::GameExportSource;
pub use profile_scrape::ProfileScrapeSource;
pub use tally::OpeningTally;

use crate::domain::models::OpeningCount;

/// Ranked opening tables for one handle, one per color. A color the
/// player never had once the call succeeded is an empty table, never a
/// missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repertoire {
    pub white: Vec<OpeningCount>,
    pub black: Vec<OpeningCount>,
}

/// One way of obtaining a player's repertoire. Strategies are picked
/// explicitly by the caller and never fall back to each other.
pub trait OpeningSource {
    /// Human-readable description for logs and messages.
    fn describe(&self) -> String;

    /// Fetch and rank openings for `handle`, looking at up to
    /// `max_games` recent games where the source supports a window.
    /// Never errs: total absence of data (transport failure, bad status,
    /// zero classifiable games) degrades to `None`.
    fn collect(&self, handle: &str, max_games: u32) -> Option<Repertoire>;
}

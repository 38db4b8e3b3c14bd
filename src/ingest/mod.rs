pub mod delimited;
pub mod roster_page;
pub mod workbook;

pub use delimited::DelimitedSource;
pub use roster_page::RosterPageSource;
pub use workbook::WorkbookSource;

use crate::domain::models::{ClubRecord, PlayerRecord, DEFAULT_ELO};
use crate::errors::CoachError;

/// One roster source parsed into the canonical record shape.
///
/// The three sources (hosted workbook, delimited upload, scraped roster
/// page) never interoperate; the caller picks one explicitly and gets the
/// same shape back from all of them.
pub trait RosterSource {
    /// Where this roster comes from, for logs and error messages.
    fn describe(&self) -> String;

    /// Parse the source. A failure aborts the whole pass; per-row problems
    /// do not fail the pass and are returned as diagnostics instead.
    fn load(&self) -> Result<IngestOutcome, CoachError>;
}

/// Records that parsed, plus diagnostics for the rows that did not.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub players: Vec<PlayerRecord>,
    pub clubs: Vec<ClubRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Why one source row was left out of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based row number in the source.
    pub row: usize,
    pub reason: String,
}

impl SkippedRow {
    pub fn new(row: usize, reason: impl ToString) -> Self {
        Self {
            row,
            reason: reason.to_string(),
        }
    }
}

/// Display name from structured name fields: family name upper-cased,
/// given name title-cased, e.g. `("dupont", "jean-marie")` → `DUPONT
/// Jean-Marie`.
pub fn compose_name(family: &str, given: &str) -> String {
    let family = family.trim().to_uppercase();
    let given = title_case(given);
    if given.is_empty() {
        family
    } else {
        format!("{family} {given}")
    }
}

/// Rating cell to a non-negative Elo; absent or non-numeric values fall
/// back to the sentinel so ranking never fails on a missing rating.
pub fn parse_elo(raw: &str) -> u32 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| *value >= 0.0)
        .map(|value| value.round() as u32)
        .unwrap_or(DEFAULT_ELO)
}

/// Club reference cell; sources disagree on whether it is an integer or a
/// spreadsheet float, so both spellings are accepted.
pub fn parse_club_ref(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|value| value as i64))
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_boundary = true;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}

use std::fs;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use log::info;

use crate::domain::models::{PlayerRecord, DEFAULT_ELO};
use crate::errors::CoachError;
use crate::ingest::{compose_name, parse_club_ref, parse_elo, IngestOutcome, RosterSource, SkippedRow};

/// Local federation export: semicolon-separated, Latin-1 encoded, same
/// logical columns as the hosted workbook's player sheet. Carries no club
/// table, so records come back without club names.
pub struct DelimitedSource {
    path: PathBuf,
}

impl DelimitedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for DelimitedSource {
    fn describe(&self) -> String {
        format!("delimited export at {}", self.path.display())
    }

    fn load(&self) -> Result<IngestOutcome, CoachError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            CoachError::unavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        parse_delimited(&bytes)
    }
}

/// Parse raw export bytes into player records.
pub fn parse_delimited(bytes: &[u8]) -> Result<IngestOutcome, CoachError> {
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CoachError::schema(format!("unreadable header row: {e}")))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut players = Vec::new();
    let mut skipped = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row_no = idx + 2; // 1-based, header on row 1
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                skipped.push(SkippedRow::new(row_no, format!("unparseable line: {e}")));
                continue;
            }
        };
        let Some(family) = field(&record, columns.family) else {
            skipped.push(SkippedRow::new(row_no, "missing 'Nom'"));
            continue;
        };
        let given = columns
            .given
            .and_then(|col| field(&record, col))
            .unwrap_or("");
        players.push(PlayerRecord {
            name: compose_name(family, given),
            federation_id: columns
                .federation_id
                .and_then(|col| field(&record, col))
                .map(str::to_string),
            category_raw: field(&record, columns.category).unwrap_or("").to_string(),
            elo: field(&record, columns.elo).map(parse_elo).unwrap_or(DEFAULT_ELO),
            club_ref: field(&record, columns.club_ref).and_then(parse_club_ref),
            club_name: None,
        });
    }
    info!(
        "Delimited export parsed: {} players, {} rows skipped",
        players.len(),
        skipped.len()
    );

    Ok(IngestOutcome {
        players,
        clubs: Vec::new(),
        skipped,
    })
}

struct Columns {
    family: usize,
    given: Option<usize>,
    category: usize,
    elo: usize,
    club_ref: usize,
    federation_id: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, CoachError> {
        Ok(Self {
            family: require_header(headers, "Nom")?,
            given: find_header(headers, "Prenom"),
            category: require_header(headers, "Cat")?,
            elo: require_header(headers, "Elo")?,
            club_ref: require_header(headers, "ClubRef")?,
            federation_id: find_header(headers, "NrFFE"),
        })
    }
}

fn require_header(headers: &StringRecord, name: &str) -> Result<usize, CoachError> {
    find_header(headers, name)
        .ok_or_else(|| CoachError::schema(format!("export has no '{name}' column")))
}

fn find_header(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn field<'r>(record: &'r StringRecord, col: usize) -> Option<&'r str> {
    record.get(col).map(str::trim).filter(|value| !value.is_empty())
}

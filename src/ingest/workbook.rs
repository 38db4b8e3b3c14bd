use std::io::Cursor;

use anyhow::Result;
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use log::{debug, info};

use crate::config::SourceSettings;
use crate::domain::models::{ClubRecord, PlayerRecord, DEFAULT_ELO};
use crate::errors::CoachError;
use crate::http::WebClient;
use crate::ingest::{compose_name, parse_club_ref, parse_elo, IngestOutcome, RosterSource, SkippedRow};
use crate::roster;

const PLAYERS_SHEET: &str = "joueur";
const CLUBS_SHEET: &str = "club";

/// Hosted federation workbook: one file, two named sheets, fetched over
/// HTTP and parsed in memory. Auto-detection keeps both the legacy `.xls`
/// export and its `.xlsx` successor working.
pub struct WorkbookSource {
    url: String,
    client: WebClient,
}

impl WorkbookSource {
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let client = WebClient::new(&settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            url: settings.workbook_url.clone(),
            client,
        })
    }

    fn download(&self) -> Result<Vec<u8>, CoachError> {
        let response = self.client.get(&self.url).map_err(CoachError::unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::unavailable(format!(
                "workbook host answered HTTP {status}"
            )));
        }
        let bytes = response.bytes().map_err(CoachError::unavailable)?;
        Ok(bytes.to_vec())
    }
}

impl RosterSource for WorkbookSource {
    fn describe(&self) -> String {
        format!("hosted workbook at {}", self.url)
    }

    fn load(&self) -> Result<IngestOutcome, CoachError> {
        let bytes = self.download()?;
        let mut outcome = parse_workbook(bytes)?;
        // This source carries both tables, so the club join happens here.
        roster::join_clubs(&mut outcome.players, &outcome.clubs);
        Ok(outcome)
    }
}

/// Parse workbook bytes into the canonical roster shape.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<IngestOutcome, CoachError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| CoachError::unavailable(format!("unreadable workbook: {e}")))?;

    for sheet in [PLAYERS_SHEET, CLUBS_SHEET] {
        if !workbook.sheet_names().iter().any(|name| name.as_str() == sheet) {
            return Err(CoachError::schema(format!(
                "workbook has no sheet named '{sheet}'"
            )));
        }
    }

    let players_range = workbook
        .worksheet_range(PLAYERS_SHEET)
        .map_err(|e| CoachError::unavailable(format!("cannot read sheet '{PLAYERS_SHEET}': {e}")))?;
    let clubs_range = workbook
        .worksheet_range(CLUBS_SHEET)
        .map_err(|e| CoachError::unavailable(format!("cannot read sheet '{CLUBS_SHEET}': {e}")))?;

    let (players, skipped) = players_from_rows(players_range.rows())?;
    let clubs = clubs_from_rows(clubs_range.rows())?;
    info!(
        "Workbook parsed: {} players, {} clubs, {} rows skipped",
        players.len(),
        clubs.len(),
        skipped.len()
    );

    Ok(IngestOutcome {
        players,
        clubs,
        skipped,
    })
}

/// Map the `joueur` sheet (header row first) to player records.
pub fn players_from_rows<'a, I>(mut rows: I) -> Result<(Vec<PlayerRecord>, Vec<SkippedRow>), CoachError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| CoachError::schema(format!("sheet '{PLAYERS_SHEET}' is empty")))?;
    let columns = PlayerColumns::locate(header)?;

    let mut players = Vec::new();
    let mut skipped = Vec::new();
    for (idx, row) in rows.enumerate() {
        let row_no = idx + 2; // 1-based, header on row 1
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let Some(family) = cell_text(row, columns.family) else {
            skipped.push(SkippedRow::new(row_no, "missing 'Nom'"));
            continue;
        };
        let given = cell_text(row, columns.given).unwrap_or_default();
        players.push(PlayerRecord {
            name: compose_name(&family, &given),
            federation_id: columns.federation_id.and_then(|col| cell_text(row, col)),
            category_raw: cell_text(row, columns.category).unwrap_or_default(),
            elo: cell_elo(row, columns.elo),
            club_ref: cell_club_ref(row, columns.club_ref),
            club_name: None,
        });
    }
    Ok((players, skipped))
}

/// Map the `club` sheet (header row first) to club records.
pub fn clubs_from_rows<'a, I>(mut rows: I) -> Result<Vec<ClubRecord>, CoachError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| CoachError::schema(format!("sheet '{CLUBS_SHEET}' is empty")))?;
    let ref_col = require_column(header, "Ref", CLUBS_SHEET)?;
    let name_col = require_column(header, "Nom", CLUBS_SHEET)?;

    let mut clubs = Vec::new();
    for row in rows {
        let Some(club_ref) = cell_club_ref(row, ref_col) else {
            debug!("club row without a numeric 'Ref', ignored");
            continue;
        };
        let Some(name) = cell_text(row, name_col) else {
            continue;
        };
        clubs.push(ClubRecord { club_ref, name });
    }
    Ok(clubs)
}

struct PlayerColumns {
    family: usize,
    given: usize,
    category: usize,
    elo: usize,
    club_ref: usize,
    federation_id: Option<usize>,
}

impl PlayerColumns {
    fn locate(header: &[Data]) -> Result<Self, CoachError> {
        Ok(Self {
            family: require_column(header, "Nom", PLAYERS_SHEET)?,
            given: require_column(header, "Prenom", PLAYERS_SHEET)?,
            category: require_column(header, "Cat", PLAYERS_SHEET)?,
            elo: require_column(header, "Elo", PLAYERS_SHEET)?,
            club_ref: require_column(header, "ClubRef", PLAYERS_SHEET)?,
            federation_id: find_column(header, "NrFFE"),
        })
    }
}

fn require_column(header: &[Data], name: &str, sheet: &str) -> Result<usize, CoachError> {
    find_column(header, name)
        .ok_or_else(|| CoachError::schema(format!("sheet '{sheet}' has no '{name}' column")))
}

fn find_column(header: &[Data], name: &str) -> Option<usize> {
    header.iter().position(|cell| {
        cell.get_string()
            .map(|text| text.trim().eq_ignore_ascii_case(name))
            .unwrap_or(false)
    })
}

fn cell_text(row: &[Data], col: usize) -> Option<String> {
    let text = row.get(col)?.as_string()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cell_elo(row: &[Data], col: usize) -> u32 {
    let Some(cell) = row.get(col) else {
        return DEFAULT_ELO;
    };
    if let Some(value) = cell.as_f64() {
        if value >= 0.0 {
            return value.round() as u32;
        }
        return DEFAULT_ELO;
    }
    cell.get_string().map(parse_elo).unwrap_or(DEFAULT_ELO)
}

fn cell_club_ref(row: &[Data], col: usize) -> Option<i64> {
    let cell = row.get(col)?;
    if let Some(value) = cell.as_i64() {
        return Some(value);
    }
    if let Some(value) = cell.as_f64() {
        return Some(value as i64);
    }
    cell.get_string().and_then(parse_club_ref)
}

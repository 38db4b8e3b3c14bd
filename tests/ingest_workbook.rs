use std::fs;
use std::path::PathBuf;

use calamine::Data;

use master_coach::config::SourceSettings;
use master_coach::domain::models::ClubRecord;
use master_coach::errors::CoachError;
use master_coach::ingest::workbook::{clubs_from_rows, parse_workbook, players_from_rows};
use master_coach::ingest::{RosterSource, SkippedRow, WorkbookSource};
use master_coach::roster::join_clubs;

fn fixture_bytes(name: &str) -> Vec<u8> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read(path).expect("fixture file should be readable")
}

fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

fn f(value: f64) -> Data {
    Data::Float(value)
}

#[test]
fn player_rows_map_to_records() {
    let rows: Vec<Vec<Data>> = vec![
        vec![s("Nom"), s("Prenom"), s("Cat"), s("Elo"), s("ClubRef"), s("NrFFE")],
        vec![s("dupont"), s("jean"), s("MinM"), f(1450.0), f(608.0), s("A12345")],
        vec![s("martin"), s("eve"), s("MinF"), s("1600"), s("608"), Data::Empty],
        vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty],
        vec![Data::Empty, s("SansNom"), s("PouM"), f(1200.0), f(608.0), s("B23456")],
        vec![s("leroy"), s("max"), s("CadM"), f(-5.0), Data::Empty, Data::Empty],
    ];

    let (players, skipped) =
        players_from_rows(rows.iter().map(Vec::as_slice)).expect("header should locate columns");

    assert_eq!(players.len(), 3);
    assert_eq!(players[0].name, "DUPONT Jean");
    assert_eq!(players[0].federation_id.as_deref(), Some("A12345"));
    assert_eq!(players[0].elo, 1450);
    assert_eq!(players[0].club_ref, Some(608));
    assert_eq!(players[1].name, "MARTIN Eve");
    assert_eq!(players[1].elo, 1600);
    assert_eq!(players[1].club_ref, Some(608));
    // A negative rating cell falls back to the sentinel.
    assert_eq!(players[2].elo, 1000);
    assert_eq!(players[2].club_ref, None);

    // The all-empty row vanishes silently; only the row missing its
    // family name leaves a diagnostic.
    assert_eq!(skipped, vec![SkippedRow::new(5, "missing 'Nom'")]);
}

#[test]
fn player_sheet_without_required_column_is_a_schema_mismatch() {
    let rows: Vec<Vec<Data>> = vec![vec![s("Nom"), s("Prenom"), s("Cat"), s("Elo")]];
    let err = players_from_rows(rows.iter().map(Vec::as_slice))
        .expect_err("a header without 'ClubRef' should not pass");
    assert!(matches!(err, CoachError::SchemaMismatch { .. }));
}

#[test]
fn empty_player_sheet_is_a_schema_mismatch() {
    let err = players_from_rows(std::iter::empty::<&[Data]>())
        .expect_err("a sheet without a header row should not pass");
    assert!(matches!(err, CoachError::SchemaMismatch { .. }));
}

#[test]
fn club_rows_without_a_numeric_ref_are_ignored() {
    let rows: Vec<Vec<Data>> = vec![
        vec![s("Ref"), s("Nom")],
        vec![f(608.0), s("Echiquier Royal")],
        vec![s("n/a"), s("Sans Ref")],
        vec![f(123.0), Data::Empty],
    ];

    let clubs = clubs_from_rows(rows.iter().map(Vec::as_slice)).expect("header should locate");
    assert_eq!(
        clubs,
        vec![ClubRecord {
            club_ref: 608,
            name: "Echiquier Royal".to_string(),
        }]
    );
}

#[test]
fn parses_workbook_fixture() {
    let outcome = parse_workbook(fixture_bytes("base_ffe.xlsx")).expect("fixture should parse");

    assert_eq!(outcome.players.len(), 3);
    assert_eq!(outcome.clubs.len(), 2);
    assert_eq!(outcome.skipped, vec![SkippedRow::new(5, "missing 'Nom'")]);

    assert_eq!(outcome.players[0].name, "DUPONT Jean");
    assert_eq!(outcome.players[0].federation_id.as_deref(), Some("A12345"));
    assert_eq!(outcome.players[0].elo, 1450);
    assert_eq!(outcome.players[2].name, "NOËL Éric");
    // Row without a rating cell.
    assert_eq!(outcome.players[2].elo, 1000);

    let mut players = outcome.players;
    join_clubs(&mut players, &outcome.clubs);
    assert_eq!(players[0].club_name.as_deref(), Some("Echiquier Royal"));
    assert_eq!(players[1].club_name.as_deref(), Some("Echiquier Royal"));
    // Club 999 is not in the club sheet.
    assert_eq!(players[2].club_name, None);
}

#[test]
fn garbage_bytes_are_source_unavailable() {
    let err = parse_workbook(b"definitely not a spreadsheet".to_vec())
        .expect_err("garbage bytes should not parse");
    assert!(matches!(err, CoachError::SourceUnavailable { .. }));
}

#[test]
fn hosted_workbook_loads_and_joins_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/data/BaseFFE.xlsx")
        .with_status(200)
        .with_body(fixture_bytes("base_ffe.xlsx"))
        .create();

    let settings = SourceSettings {
        workbook_url: format!("{}/data/BaseFFE.xlsx", server.url()),
        ..Default::default()
    };
    let source = WorkbookSource::new(&settings).expect("client should build");
    let outcome = source.load().expect("hosted workbook should load");
    mock.assert();

    assert_eq!(outcome.players.len(), 3);
    // This source joins clubs itself.
    assert_eq!(outcome.players[0].club_name.as_deref(), Some("Echiquier Royal"));
}

#[test]
fn hosted_workbook_error_status_is_source_unavailable() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/data/BaseFFE.xlsx")
        .with_status(404)
        .create();

    let settings = SourceSettings {
        workbook_url: format!("{}/data/BaseFFE.xlsx", server.url()),
        ..Default::default()
    };
    let source = WorkbookSource::new(&settings).expect("client should build");
    let err = source.load().expect_err("a missing workbook should not load");
    mock.assert();
    assert!(matches!(err, CoachError::SourceUnavailable { .. }));
}

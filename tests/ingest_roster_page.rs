use std::fs;
use std::path::PathBuf;

use master_coach::config::SourceSettings;
use master_coach::domain::models::ClubRecord;
use master_coach::errors::CoachError;
use master_coach::ingest::{RosterPageSource, RosterSource, SkippedRow};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_roster_page_fixture() {
    let source = RosterPageSource::new(&SourceSettings::default(), 608).expect("source should build");
    let outcome = source.parse_page(&read_fixture("roster_page.html"));

    assert_eq!(
        outcome.clubs,
        vec![ClubRecord {
            club_ref: 608,
            name: "Club de l'Echiquier Royal".to_string(),
        }]
    );

    assert_eq!(outcome.players.len(), 3);
    assert_eq!(outcome.players[0].name, "DUPONT Jean");
    assert_eq!(outcome.players[0].federation_id.as_deref(), Some("A12345"));
    // The rating cell reads "1450 F".
    assert_eq!(outcome.players[0].elo, 1450);
    assert_eq!(outcome.players[0].category_raw, "MinM");
    assert_eq!(outcome.players[0].club_ref, Some(608));
    assert_eq!(
        outcome.players[0].club_name.as_deref(),
        Some("Club de l'Echiquier Royal")
    );

    assert_eq!(outcome.players[1].name, "MARTIN Eve");
    assert_eq!(outcome.players[1].elo, 1600);

    // Runs of whitespace collapse; a non-numeric rating falls back.
    assert_eq!(outcome.players[2].name, "LEROY Max");
    assert_eq!(outcome.players[2].elo, 1000);

    // The row with a federation id but no name leaves a diagnostic; the
    // row failing the id pattern vanishes silently.
    assert_eq!(
        outcome.skipped,
        vec![SkippedRow::new(7, "player row without a name")]
    );
    assert!(outcome.players.iter().all(|p| p.name != "Pas Un Joueur"));
}

#[test]
fn page_without_player_rows_is_an_empty_roster() {
    let source = RosterPageSource::new(&SourceSettings::default(), 608).expect("source should build");
    let outcome = source.parse_page("<html><body><p>Aucune liste ici.</p></body></html>");

    assert!(outcome.players.is_empty());
    assert!(outcome.clubs.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn loads_roster_page_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/ListeJoueurs.aspx?Action=CLUB&ClubRef=608")
        .with_status(200)
        .with_body(read_fixture("roster_page.html"))
        .create();

    let settings = SourceSettings {
        roster_base_url: server.url(),
        ..Default::default()
    };
    let source = RosterPageSource::new(&settings, 608).expect("source should build");
    let outcome = source.load().expect("roster page should load");
    mock.assert();
    assert_eq!(outcome.players.len(), 3);
}

#[test]
fn error_status_is_a_remote_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/ListeJoueurs.aspx?Action=CLUB&ClubRef=608")
        .with_status(404)
        .create();

    let settings = SourceSettings {
        roster_base_url: server.url(),
        ..Default::default()
    };
    let source = RosterPageSource::new(&settings, 608).expect("source should build");
    let err = source.load().expect_err("a missing page should not load");
    mock.assert();
    assert!(matches!(err, CoachError::RemoteError { status: 404 }));
}

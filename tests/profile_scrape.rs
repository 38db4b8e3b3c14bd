use std::fs;
use std::path::PathBuf;

use master_coach::config::StatsSettings;
use master_coach::stats::{OpeningSource, ProfileScrapeSource};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_profile_fixture_per_color() {
    let source = ProfileScrapeSource::new(&StatsSettings::default()).expect("source should build");
    let repertoire = source.parse_profile(&read_fixture("profile_page.html"));

    let white: Vec<(&str, u32)> = repertoire
        .white
        .iter()
        .map(|entry| (entry.opening.as_str(), entry.games))
        .collect();
    // Five rows at most per color; the sixth stays out. Equal counts
    // keep their row order.
    assert_eq!(
        white,
        vec![
            ("Partie Espagnole", 12),
            ("Gambit du Roi", 8),
            ("Anglaise", 8),
            ("Italienne", 5),
            ("Ecossaise", 3),
        ]
    );

    let black: Vec<(&str, u32)> = repertoire
        .black
        .iter()
        .map(|entry| (entry.opening.as_str(), entry.games))
        .collect();
    // The row whose games cell has no integer contributes nothing.
    assert_eq!(black, vec![("Sicilienne", 9), ("Caro-Kann", 4)]);
}

#[test]
fn missing_region_is_an_empty_table() {
    let source = ProfileScrapeSource::new(&StatsSettings::default()).expect("source should build");
    let html = r#"<html><body>
        <div id="white-repertoire"><table>
            <tr><td class="opening">Espagnole</td><td class="games">4 parties</td></tr>
        </table></div>
    </body></html>"#;

    let repertoire = source.parse_profile(html);
    assert_eq!(repertoire.white.len(), 1);
    assert_eq!(repertoire.white[0].opening, "Espagnole");
    assert_eq!(repertoire.white[0].games, 4);
    assert!(repertoire.black.is_empty());
}

#[test]
fn collects_profile_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/player/Kasparovfan")
        .with_status(200)
        .with_body(read_fixture("profile_page.html"))
        .create();

    let settings = StatsSettings {
        profile_base_url: format!("{}/player", server.url()),
        ..Default::default()
    };
    let source = ProfileScrapeSource::new(&settings).expect("source should build");
    let repertoire = source
        .collect("Kasparovfan", 50)
        .expect("profile should yield a repertoire");
    mock.assert();

    assert_eq!(repertoire.white.len(), 5);
    assert_eq!(repertoire.black.len(), 2);
}

#[test]
fn error_status_degrades_to_none() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/player/Kasparovfan")
        .with_status(500)
        .create();

    let settings = StatsSettings {
        profile_base_url: format!("{}/player", server.url()),
        ..Default::default()
    };
    let source = ProfileScrapeSource::new(&settings).expect("source should build");
    assert!(source.collect("Kasparovfan", 50).is_none());
    mock.assert();
}

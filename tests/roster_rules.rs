use master_coach::domain::models::{ClubRecord, PlayerRecord};
use master_coach::domain::AgeCategory;
use master_coach::roster::{
    club_directory, full_roster_sorted, join_clubs, rank_by_category, top_youth,
};

fn player(name: &str, category: &str, elo: u32, club_ref: Option<i64>) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        federation_id: None,
        category_raw: category.to_string(),
        elo,
        club_ref,
        club_name: None,
    }
}

#[test]
fn category_labels_converge_on_prefix_codes() {
    assert_eq!(AgeCategory::classify("MinM"), AgeCategory::Minime);
    assert_eq!(AgeCategory::classify("MINIME"), AgeCategory::Minime);
    assert_eq!(AgeCategory::classify(" min "), AgeCategory::Minime);
    assert_eq!(AgeCategory::classify("PpoF"), AgeCategory::PetitPoussin);
    assert_eq!(AgeCategory::classify("Benjamine"), AgeCategory::Benjamin);
    assert_eq!(AgeCategory::classify("SenM"), AgeCategory::Unknown);
    assert_eq!(AgeCategory::classify(""), AgeCategory::Unknown);
}

#[test]
fn categories_order_young_to_old_with_unknown_last() {
    let mut categories = vec![
        AgeCategory::Unknown,
        AgeCategory::Junior,
        AgeCategory::Poussin,
        AgeCategory::Minime,
        AgeCategory::PetitPoussin,
    ];
    categories.sort();
    assert_eq!(
        categories,
        vec![
            AgeCategory::PetitPoussin,
            AgeCategory::Poussin,
            AgeCategory::Minime,
            AgeCategory::Junior,
            AgeCategory::Unknown,
        ]
    );
}

#[test]
fn join_sets_names_for_matching_refs_only() {
    let mut players = vec![
        player("DUPONT Jean", "MinM", 1450, Some(608)),
        player("NOËL Éric", "SenM", 1000, Some(999)),
        player("SOLO Han", "CadM", 1500, None),
    ];
    let clubs = vec![ClubRecord {
        club_ref: 608,
        name: "Echiquier Royal".to_string(),
    }];

    join_clubs(&mut players, &clubs);
    assert_eq!(players[0].club_name.as_deref(), Some("Echiquier Royal"));
    assert_eq!(players[1].club_name, None);
    assert_eq!(players[2].club_name, None);
}

#[test]
fn join_never_resets_an_existing_name() {
    let mut players = vec![player("DUPONT Jean", "MinM", 1450, Some(608))];
    players[0].club_name = Some("Echiquier Royal".to_string());

    join_clubs(&mut players, &[]);
    assert_eq!(players[0].club_name.as_deref(), Some("Echiquier Royal"));

    // Re-joining against the same table changes nothing either.
    let clubs = vec![ClubRecord {
        club_ref: 608,
        name: "Echiquier Royal".to_string(),
    }];
    join_clubs(&mut players, &clubs);
    join_clubs(&mut players, &clubs);
    assert_eq!(players[0].club_name.as_deref(), Some("Echiquier Royal"));
}

#[test]
fn ranking_picks_best_rated_of_one_category() {
    let players = vec![
        player("DUPONT Jean", "MinM", 1450, None),
        player("MARTIN Eve", "MinF", 1600, None),
        player("LEROY Max", "CadM", 1700, None),
    ];

    let ranked = rank_by_category(&players, AgeCategory::Minime, 1);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name, "MARTIN Eve");
}

#[test]
fn ranking_caps_at_limit_and_keeps_ties_in_ingestion_order() {
    let players = vec![
        player("FIRST In", "BenM", 1400, None),
        player("SECOND In", "BenF", 1400, None),
        player("BEST Of", "BenM", 1550, None),
        player("LAST Out", "BenM", 1300, None),
    ];

    let ranked = rank_by_category(&players, AgeCategory::Benjamin, 3);
    let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["BEST Of", "FIRST In", "SECOND In"]);
}

#[test]
fn ranking_an_absent_category_is_empty() {
    let players = vec![player("DUPONT Jean", "MinM", 1450, None)];
    assert!(rank_by_category(&players, AgeCategory::Poussin, 10).is_empty());
}

#[test]
fn full_roster_orders_by_category_then_rating() {
    let players = vec![
        player("ADULT One", "SenM", 2000, None),
        player("MINIME Low", "MinM", 1200, None),
        player("POUSSIN Ace", "PouF", 1350, None),
        player("MINIME High", "MinF", 1600, None),
    ];

    let sorted = full_roster_sorted(&players);
    let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["POUSSIN Ace", "MINIME High", "MINIME Low", "ADULT One"]
    );
}

#[test]
fn top_youth_takes_the_best_of_each_category_present() {
    let players = vec![
        player("MINIME Low", "MinM", 1200, None),
        player("MINIME High", "MinF", 1600, None),
        player("POUSSIN Ace", "PouM", 1100, None),
        player("ADULT One", "SenM", 2000, None),
    ];

    let picks = top_youth(&players);
    assert_eq!(picks.len(), 2);
    assert_eq!(picks[0].0, AgeCategory::Minime);
    assert_eq!(picks[0].1.name, "MINIME High");
    assert_eq!(picks[1].0, AgeCategory::Poussin);
    assert_eq!(picks[1].1.name, "POUSSIN Ace");
}

#[test]
fn club_directory_is_deduplicated_and_sorted_by_name() {
    let mut players = vec![
        player("A One", "MinM", 1400, Some(608)),
        player("B Two", "MinF", 1500, Some(608)),
        player("C Three", "CadM", 1450, Some(123)),
        player("D Four", "BenM", 1300, None),
    ];
    let clubs = vec![
        ClubRecord {
            club_ref: 608,
            name: "Echiquier Royal".to_string(),
        },
        ClubRecord {
            club_ref: 123,
            name: "Tour Blanche".to_string(),
        },
    ];
    join_clubs(&mut players, &clubs);

    let directory = club_directory(&players);
    assert_eq!(
        directory,
        vec![
            (608, "Echiquier Royal".to_string()),
            (123, "Tour Blanche".to_string()),
        ]
    );
}

use std::collections::HashMap;

use crate::domain::models::{ClubRecord, PlayerRecord};
use crate::domain::AgeCategory;

/// Left join of players onto club names, keyed by club reference.
///
/// Idempotent: a player whose club name is already set keeps it unless a
/// fresh match overwrites it with the same value, and unmatched players
/// are never reset to `None`.
pub fn join_clubs(players: &mut [PlayerRecord], clubs: &[ClubRecord]) {
    if clubs.is_empty() {
        return;
    }
    let by_ref: HashMap<i64, &str> = clubs
        .iter()
        .map(|club| (club.club_ref, club.name.as_str()))
        .collect();
    for player in players.iter_mut() {
        let Some(club_ref) = player.club_ref else {
            continue;
        };
        if let Some(name) = by_ref.get(&club_ref) {
            player.club_name = Some((*name).to_string());
        }
    }
}

/// Players of one category, best rating first, capped at `limit`.
///
/// Equal ratings keep their ingestion order, so re-running on the same
/// roster always ranks identically.
pub fn rank_by_category(
    players: &[PlayerRecord],
    category: AgeCategory,
    limit: usize,
) -> Vec<PlayerRecord> {
    let mut ranked: Vec<PlayerRecord> = players
        .iter()
        .filter(|player| player.category() == category)
        .cloned()
        .collect();
    sort_by_elo(&mut ranked);
    ranked.truncate(limit);
    ranked
}

/// The whole roster ordered by (category, rating descending), with
/// unrecognized categories after every known one.
pub fn full_roster_sorted(players: &[PlayerRecord]) -> Vec<PlayerRecord> {
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| a.category().cmp(&b.category()).then(b.elo.cmp(&a.elo)));
    sorted
}

fn sort_by_elo(players: &mut [PlayerRecord]) {
    // sort_by is stable, so ties keep ingestion order.
    players.sort_by(|a, b| b.elo.cmp(&a.elo));
}

/// Best rated player of each youth category. Categories with nobody in
/// them are simply absent.
pub fn top_youth(players: &[PlayerRecord]) -> Vec<(AgeCategory, PlayerRecord)> {
    AgeCategory::youth()
        .into_iter()
        .filter_map(|category| {
            rank_by_category(players, category, 1)
                .into_iter()
                .next()
                .map(|player| (category, player))
        })
        .collect()
}

/// Unique clubs present in the roster, sorted by name, for selection
/// lists.
pub fn club_directory(players: &[PlayerRecord]) -> Vec<(i64, String)> {
    let mut clubs: Vec<(i64, String)> = players
        .iter()
        .filter_map(|player| Some((player.club_ref?, player.club_name.clone()?)))
        .collect();
    clubs.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    clubs.dedup();
    clubs
}

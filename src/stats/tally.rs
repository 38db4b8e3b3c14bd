use std::collections::HashMap;

use crate::domain::models::{Color, GameRecord, OpeningCount};
use crate::stats::Repertoire;

/// Accumulator for opening frequencies. Works from single game
/// occurrences or from pre-counted pairs, and remembers first-seen order
/// so equal counts rank deterministically.
#[derive(Debug, Default)]
pub struct OpeningTally {
    table: Vec<OpeningCount>,
    index: HashMap<String, usize>,
}

impl OpeningTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more game under `opening`.
    pub fn add_occurrence(&mut self, opening: &str) {
        self.add_count(opening, 1);
    }

    /// Merge a pre-counted pair, as scraped sources report them.
    pub fn add_count(&mut self, opening: &str, games: u32) {
        match self.index.get(opening) {
            Some(&at) => self.table[at].games += games,
            None => {
                self.index.insert(opening.to_string(), self.table.len());
                self.table.push(OpeningCount {
                    opening: opening.to_string(),
                    games,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Finish the tally: most played first, ties in first-seen order,
    /// capped at `limit`. Short tables are not padded.
    pub fn into_ranked(mut self, limit: usize) -> Vec<OpeningCount> {
        // sort_by is stable, so ties keep insertion order.
        self.table.sort_by(|a, b| b.games.cmp(&a.games));
        self.table.truncate(limit);
        self.table
    }
}

/// Split classified games by color and rank each side's openings.
pub fn repertoire_from_games(games: &[GameRecord], limit: usize) -> Repertoire {
    let mut white = OpeningTally::new();
    let mut black = OpeningTally::new();
    for game in games {
        match game.color {
            Color::White => white.add_occurrence(&game.opening),
            Color::Black => black.add_occurrence(&game.opening),
        }
    }
    Repertoire {
        white: white.into_ranked(limit),
        black: black.into_ranked(limit),
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::category::AgeCategory;

/// Rating used when a source carries no usable Elo for a player.
/// Ranking must never fail on a missing rating.
pub const DEFAULT_ELO: u32 = 1000;

/// Fallback opening label for games exported without opening metadata.
pub const UNKNOWN_OPENING: &str = "Inconnue";

/// One federation player, in the canonical shape every roster source
/// converges on. Created once per ingest pass and immutable afterwards;
/// a re-ingest replaces the whole roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name: `NOM Prenom` from structured sources, verbatim text
    /// from scraped pages.
    pub name: String,
    pub federation_id: Option<String>,
    /// Free-text category label exactly as the source spelled it.
    pub category_raw: String,
    pub elo: u32,
    pub club_ref: Option<i64>,
    pub club_name: Option<String>,
}

impl PlayerRecord {
    /// Canonical age category, derived from the raw label.
    pub fn category(&self) -> AgeCategory {
        AgeCategory::classify(&self.category_raw)
    }
}

/// One club, used only to enrich players via a left join on `club_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRecord {
    pub club_ref: i64,
    pub name: String,
}

/// Which side the analyzed player held in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

/// One fetched game reduced to what the repertoire tally needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub opening: String,
    pub color: Color,
}

/// One ranked entry of an opening-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpeningCount {
    pub opening: String,
    pub games: u32,
}

// --- Game Export Response Structures ---

/// One line of the game-history export (newline-delimited JSON).
#[derive(Debug, Deserialize)]
pub struct ExportedGame {
    pub opening: Option<GameOpening>,
    pub players: Option<GamePlayers>,
}

#[derive(Debug, Deserialize)]
pub struct GameOpening {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GamePlayers {
    pub white: Option<GameSide>,
    pub black: Option<GameSide>,
}

#[derive(Debug, Deserialize)]
pub struct GameSide {
    pub user: Option<SideUser>,
}

#[derive(Debug, Deserialize)]
pub struct SideUser {
    pub name: Option<String>,
}

impl ExportedGame {
    /// Reduce the exported game to a [`GameRecord`] for `handle`.
    ///
    /// The color comes from comparing the white-side account name to the
    /// queried handle, case-insensitively. Games whose white-side identity
    /// is absent are dropped: without it the color cannot be determined, so
    /// the game counts to neither color. A game with no opening metadata
    /// still counts, under [`UNKNOWN_OPENING`].
    pub fn classify(&self, handle: &str) -> Option<GameRecord> {
        let white_name = self.white_name()?;
        let color = if white_name.eq_ignore_ascii_case(handle) {
            Color::White
        } else {
            Color::Black
        };
        Some(GameRecord {
            opening: self.opening_name(),
            color,
        })
    }

    fn white_name(&self) -> Option<&str> {
        self.players
            .as_ref()?
            .white
            .as_ref()?
            .user
            .as_ref()?
            .name
            .as_deref()
    }

    fn opening_name(&self) -> String {
        self.opening
            .as_ref()
            .and_then(|o| o.name.clone())
            .unwrap_or_else(|| UNKNOWN_OPENING.to_string())
    }
}

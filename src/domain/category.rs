use serde::{Deserialize, Serialize};

/// Length of the canonical category prefix code.
pub const CATEGORY_CODE_LEN: usize = 3;

/// Federation age categories, ordered youngest to oldest.
///
/// The derived `Ord` relies on this declaration order; `Unknown` must stay
/// last so adult and unrecognized labels sort after every youth category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    PetitPoussin, // PPO, U8
    Poussin,      // POU, U10
    Pupille,      // PUP, U12
    Benjamin,     // BEN, U14
    Minime,       // MIN, U16
    Cadet,        // CAD, U18
    Junior,       // JUN, U20
    /// Adult or unrecognized label; sorts after all known codes.
    Unknown,
}

impl AgeCategory {
    /// Classify a free-text category label.
    ///
    /// The label is upper-cased and truncated to a 3-character prefix code,
    /// so `"Minime"`, `"MinM"` and `"min"` all land on the same category.
    /// The truncation is lossy by design: the prefix is the canonical key
    /// for every category-based query.
    pub fn classify(raw: &str) -> Self {
        let code: String = raw
            .trim()
            .to_uppercase()
            .chars()
            .take(CATEGORY_CODE_LEN)
            .collect();
        match code.as_str() {
            "PPO" => AgeCategory::PetitPoussin,
            "POU" => AgeCategory::Poussin,
            "PUP" => AgeCategory::Pupille,
            "BEN" => AgeCategory::Benjamin,
            "MIN" => AgeCategory::Minime,
            "CAD" => AgeCategory::Cadet,
            "JUN" => AgeCategory::Junior,
            _ => AgeCategory::Unknown,
        }
    }

    /// The 3-letter prefix code, or `"---"` for unknown categories.
    pub fn code(&self) -> &'static str {
        match self {
            AgeCategory::PetitPoussin => "PPO",
            AgeCategory::Poussin => "POU",
            AgeCategory::Pupille => "PUP",
            AgeCategory::Benjamin => "BEN",
            AgeCategory::Minime => "MIN",
            AgeCategory::Cadet => "CAD",
            AgeCategory::Junior => "JUN",
            AgeCategory::Unknown => "---",
        }
    }

    /// Full French label as used by the federation listings.
    pub fn label(&self) -> &'static str {
        match self {
            AgeCategory::PetitPoussin => "Petit Poussin",
            AgeCategory::Poussin => "Poussin",
            AgeCategory::Pupille => "Pupille",
            AgeCategory::Benjamin => "Benjamin",
            AgeCategory::Minime => "Minime",
            AgeCategory::Cadet => "Cadet",
            AgeCategory::Junior => "Junior",
            AgeCategory::Unknown => "Autre",
        }
    }

    /// Youth categories the team-suggestion block ranks, oldest first.
    pub fn youth() -> [AgeCategory; 4] {
        [
            AgeCategory::Minime,
            AgeCategory::Benjamin,
            AgeCategory::Pupille,
            AgeCategory::Poussin,
        ]
    }
}

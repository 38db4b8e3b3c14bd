pub mod normalize;

pub use normalize::{club_directory, full_roster_sorted, join_clubs, rank_by_category, top_youth};

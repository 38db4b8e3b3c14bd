pub mod preparation;
pub mod session;

pub use preparation::{PreparationService, RosterChoice, StatsChoice};
pub use session::{Analysis, Session};

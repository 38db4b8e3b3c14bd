pub mod settings;

pub use settings::{AppConfig, SourceSettings, StatsSettings};

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod ingest;
pub mod report;
pub mod roster;
pub mod services;
pub mod stats;
pub mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::{Command, RosterCommand};
use crate::config::AppConfig;
use crate::services::{PreparationService, RosterChoice, StatsChoice};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_roster(source: &RosterCommand) -> Result<()> {
    let (choice, club_filter) = match source {
        RosterCommand::Workbook { club } => (RosterChoice::Workbook, *club),
        RosterCommand::Upload { path, club } => {
            (RosterChoice::File { path: path.clone() }, *club)
        }
        RosterCommand::Scrape { club_ref } => {
            (RosterChoice::ClubPage { club_ref: *club_ref }, None)
        }
    };
    let mut service = PreparationService::new(AppConfig::new())?;
    service.run_roster(choice, club_filter)
}

pub fn handle_clubs() -> Result<()> {
    let service = PreparationService::new(AppConfig::new())?;
    service.run_clubs()
}

pub fn handle_rank(category: &str, limit: usize) -> Result<()> {
    let service = PreparationService::new(AppConfig::new())?;
    service.run_rank(category, limit)
}

pub fn handle_youth() -> Result<()> {
    let service = PreparationService::new(AppConfig::new())?;
    service.run_youth()
}

pub fn handle_link(player: &str, handle: &str) -> Result<()> {
    let mut service = PreparationService::new(AppConfig::new())?;
    service.run_link(player, handle)
}

pub fn handle_prepare(
    target: &str,
    handle: Option<&str>,
    scrape: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let stats = if scrape {
        StatsChoice::ProfileScrape
    } else {
        StatsChoice::ExportApi
    };
    let mut service = PreparationService::new(AppConfig::new())?;
    service.run_prepare(target, handle, stats, output)
}

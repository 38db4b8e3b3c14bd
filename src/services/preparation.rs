use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use log::info;

use crate::config::AppConfig;
use crate::domain::models::{OpeningCount, PlayerRecord};
use crate::domain::AgeCategory;
use crate::ingest::{DelimitedSource, RosterPageSource, RosterSource, WorkbookSource};
use crate::report;
use crate::roster;
use crate::services::session::{Analysis, Session};
use crate::stats::{GameExportSource, OpeningSource, ProfileScrapeSource};

/// Which roster source to read. Picked explicitly by the caller, never
/// by inspecting the input.
pub enum RosterChoice {
    Workbook,
    File { path: PathBuf },
    ClubPage { club_ref: i64 },
}

/// Which repertoire strategy to use for an analysis.
pub enum StatsChoice {
    ExportApi,
    ProfileScrape,
}

/// Drives one coach action end to end: build the right adapter, run it
/// through the session, print the outcome.
pub struct PreparationService {
    config: AppConfig,
    session: Session,
}

impl PreparationService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let session = Session::open(&config)?;
        Ok(Self { config, session })
    }

    // --- Roster Actions ---

    /// Ingest a roster and show it sorted by category and rating.
    pub fn run_roster(&mut self, choice: RosterChoice, club_filter: Option<i64>) -> Result<()> {
        let source = self.build_roster_source(choice)?;
        self.session.load_roster(source.as_ref(), club_filter)?;
        self.print_skip_summary();
        self.print_roster();
        Ok(())
    }

    /// Show the best rated players of one category from the current
    /// roster.
    pub fn run_rank(&self, category_code: &str, limit: usize) -> Result<()> {
        let category = parse_category(category_code)?;
        let players = self.require_roster()?;
        let ranked = roster::rank_by_category(players, category, limit);
        println!();
        println!("Top {} {}", ranked.len(), category.label());
        for (idx, player) in ranked.iter().enumerate() {
            println!("{:>3}. {:<30} {:>5}", idx + 1, player.name, player.elo);
        }
        Ok(())
    }

    /// Show the strongest player of each youth category.
    pub fn run_youth(&self) -> Result<()> {
        let players = self.require_roster()?;
        let suggestions = roster::top_youth(players);
        println!();
        println!("Suggestion Top Jeunes");
        if suggestions.is_empty() {
            println!("  (no youth players in the roster)");
        }
        for (category, player) in suggestions {
            println!("  {:<12} {} ({})", category.label(), player.name, player.elo);
        }
        Ok(())
    }

    /// List the clubs present in the hosted workbook without touching
    /// the session roster.
    pub fn run_clubs(&self) -> Result<()> {
        let source = WorkbookSource::new(&self.config.sources)?;
        let outcome = source.load()?;
        let clubs = roster::club_directory(&outcome.players);
        println!();
        for (club_ref, name) in &clubs {
            println!("{:>8}  {}", club_ref, name);
        }
        println!("\n{} clubs", clubs.len());
        Ok(())
    }

    // --- Handle Actions ---

    /// Record one name-to-handle link.
    pub fn run_link(&mut self, player_name: &str, handle: &str) -> Result<()> {
        if !self.session.roster().is_empty()
            && !self.session.roster().iter().any(|p| p.name == player_name)
        {
            println!("Note: '{}' is not in the current roster.", player_name);
        }
        self.session.record_mapping(player_name, handle)?;
        println!("Linked {} -> {}", player_name, handle);
        Ok(())
    }

    // --- Match Preparation ---

    /// Analyze an opponent's repertoire and write the preparation sheet.
    pub fn run_prepare(
        &mut self,
        target_name: &str,
        handle: Option<&str>,
        stats: StatsChoice,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let handle = self.resolve_handle(target_name, handle)?;
        let source = self.build_stats_source(stats)?;
        let max_games = self.config.stats.max_games;

        let analysis = self
            .session
            .analyze(target_name, &handle, source.as_ref(), max_games)?;
        Self::print_analysis(analysis);

        let bytes = report::render_report(
            &analysis.target_name,
            &analysis.handle,
            Some(&analysis.white),
            Some(&analysis.black),
            Local::now().date_naive(),
        )?;
        let path = output.unwrap_or_else(|| PathBuf::from(report::report_filename(target_name)));
        fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nReport written to {}", path.display());
        Ok(())
    }

    // --- Construction Helpers ---

    fn build_roster_source(&self, choice: RosterChoice) -> Result<Box<dyn RosterSource>> {
        match choice {
            RosterChoice::Workbook => Ok(Box::new(WorkbookSource::new(&self.config.sources)?)),
            RosterChoice::File { path } => Ok(Box::new(DelimitedSource::new(path))),
            RosterChoice::ClubPage { club_ref } => {
                Ok(Box::new(RosterPageSource::new(&self.config.sources, club_ref)?))
            }
        }
    }

    fn build_stats_source(&self, choice: StatsChoice) -> Result<Box<dyn OpeningSource>> {
        match choice {
            StatsChoice::ExportApi => Ok(Box::new(GameExportSource::new(&self.config.stats)?)),
            StatsChoice::ProfileScrape => {
                Ok(Box::new(ProfileScrapeSource::new(&self.config.stats)?))
            }
        }
    }

    fn resolve_handle(&self, target_name: &str, explicit: Option<&str>) -> Result<String> {
        if let Some(handle) = explicit {
            return Ok(handle.to_string());
        }
        match self.session.handle_for(target_name) {
            Some(handle) => {
                info!("Using linked handle {} for {}", handle, target_name);
                Ok(handle.to_string())
            }
            None => bail!(
                "No handle linked to '{}'. Record one with the link command or pass --handle.",
                target_name
            ),
        }
    }

    fn require_roster(&self) -> Result<&[PlayerRecord]> {
        let players = self.session.roster();
        if players.is_empty() {
            bail!("No roster loaded. Run the roster command first.");
        }
        Ok(players)
    }

    // --- Display ---

    fn print_roster(&self) {
        let sorted = roster::full_roster_sorted(self.session.roster());
        println!();
        println!("{:<5} {:>5}  {:<30} {}", "Cat", "Elo", "Joueur", "Club");
        for player in &sorted {
            println!(
                "{:<5} {:>5}  {:<30} {}",
                player.category().code(),
                player.elo,
                player.name,
                player.club_name.as_deref().unwrap_or("-")
            );
        }
        println!("\n{} players", sorted.len());
    }

    fn print_skip_summary(&self) {
        let skipped = self.session.skipped();
        if skipped.is_empty() {
            return;
        }
        println!("{} row(s) skipped during ingest:", skipped.len());
        for row in skipped {
            println!("  row {}: {}", row.row, row.reason);
        }
    }

    fn print_analysis(analysis: &Analysis) {
        println!();
        println!("Repertoire of {} ({})", analysis.target_name, analysis.handle);
        Self::print_table("With White", &analysis.white);
        Self::print_table("With Black", &analysis.black);
    }

    fn print_table(title: &str, table: &[OpeningCount]) {
        println!("\n  {}:", title);
        if table.is_empty() {
            println!("    (not enough data)");
            return;
        }
        for row in table {
            println!("    - {} ({}x)", row.opening, row.games);
        }
    }
}

fn parse_category(code: &str) -> Result<AgeCategory> {
    let category = AgeCategory::classify(code);
    if category == AgeCategory::Unknown {
        bail!(
            "Unknown category '{}' (expected one of PPO, POU, PUP, BEN, MIN, CAD, JUN)",
            code
        );
    }
    Ok(category)
}

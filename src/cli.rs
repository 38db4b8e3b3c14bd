use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "master-coach club preparation tool")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Load the roster from a source and show it by category and rating
    Roster {
        #[clap(subcommand)]
        source: RosterCommand,
    },
    /// List the clubs found in the hosted workbook
    Clubs,
    /// Show the best rated players of one category from the loaded roster
    Rank {
        /// Category code (PPO, POU, PUP, BEN, MIN, CAD, JUN)
        category: String,
        /// Number of players to list
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Suggest the strongest youth player per category
    Youth,
    /// Link a roster player name to an online handle
    Link {
        /// Player display name, quoted
        player: String,
        /// Online handle
        handle: String,
    },
    /// Analyze an opponent's repertoire and write the preparation sheet
    Prepare {
        /// Opponent display name, quoted
        target: String,
        /// Online handle (defaults to the linked one)
        #[arg(long)]
        handle: Option<String>,
        /// Scrape the profile page instead of calling the game export API
        #[arg(long)]
        scrape: bool,
        /// Output file (defaults to prepa_<name>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum RosterCommand {
    /// Download the hosted federation workbook
    Workbook {
        /// Keep only the players of this club reference
        #[arg(short, long)]
        club: Option<i64>,
    },
    /// Read a local semicolon-separated export file
    Upload {
        /// Path to the export file
        path: PathBuf,
        /// Keep only the players of this club reference
        #[arg(short, long)]
        club: Option<i64>,
    },
    /// Scrape a federation club roster page
    Scrape {
        /// Federation club reference
        club_ref: i64,
    },
}

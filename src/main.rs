use anyhow::Result;

use master_coach::cli::Command;
use master_coach::{
    handle_clubs, handle_link, handle_prepare, handle_rank, handle_roster, handle_youth,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Roster { source } => handle_roster(source),
        Command::Clubs => handle_clubs(),
        Command::Rank { category, limit } => handle_rank(category, *limit),
        Command::Youth => handle_youth(),
        Command::Link { player, handle } => handle_link(player, handle),
        Command::Prepare {
            target,
            handle,
            scrape,
            output,
        } => handle_prepare(target, handle.as_deref(), *scrape, output.clone()),
    }
}

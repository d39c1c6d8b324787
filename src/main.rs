use anyhow::Result;

use poker_ledger::cli::Command;
use poker_ledger::{handle_completions, handle_rebuild, handle_serve, handle_standings, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
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
        Command::Serve { port } => handle_serve(*port),
        Command::Rebuild => handle_rebuild(),
        Command::Standings { limit } => handle_standings(*limit),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

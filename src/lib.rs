pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::{LeaderboardService, ServerService, StandingsReport};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_rebuild() -> Result<()> {
    let config = AppConfig::from_env()?;
    let mut conn = open_store(&config)?;
    let entries = LeaderboardService::new().rebuild(&mut conn)?;
    log::info!("Rebuilt leaderboard for {} players", entries.len());
    Ok(())
}

pub fn handle_standings(limit: Option<usize>) -> Result<()> {
    let config = AppConfig::from_env()?;
    let mut conn = open_store(&config)?;
    let report = StandingsReport::new(limit).render(&mut conn)?;
    println!("{report}");
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<database::DbConn> {
    let pool = database::create_pool(&config.store)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::initialize_schema(&mut conn)?;
    Ok(conn)
}

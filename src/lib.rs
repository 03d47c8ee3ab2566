//! shelfmap library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the diagnostics filter (EnvFilter syntax).
pub const LOG_ENV: &str = "SHELFMAP_LOG";

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Add { .. } => c::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => c::edit::handle(&cli.command, cfg),
        Commands::Cell { .. } => c::cell::handle(&cli.command, cfg),
        Commands::Place { .. } => c::place::handle(&cli.command, cfg),
        Commands::Unplace { .. } => c::unplace::handle(&cli.command, cfg),
        Commands::Move { .. } => c::move_col::handle(&cli.command, cfg),
        Commands::Pick { .. } | Commands::Done { .. } => c::pick::handle(&cli.command, cfg),
        Commands::Compact { .. } => c::compact::handle(&cli.command, cfg),
        Commands::Del { .. } => c::del::handle(&cli.command, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg),
        Commands::Map => c::map::handle(&cli.command, cfg),
        Commands::Stats => c::stats::handle(&cli.command, cfg),
        Commands::Undo => c::undo::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
        Commands::Import { .. } => c::import::handle(&cli.command, cfg),
    }
}

/// Diagnostics to stderr, filtered by `SHELFMAP_LOG` (default: warnings).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("shelfmap=warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // config is loaded once; --db overrides the configured database
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    tracing::debug!(database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg)
}

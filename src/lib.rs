//! admindesk library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod shell;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::seed::SeedData;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

/// Build the session workspace from `--seed`, or the configured default seed.
pub fn open_workspace(cli: &Cli, cfg: &Config) -> AppResult<Workspace> {
    let seed_path = cli.seed.as_ref().or(cfg.default_seed.as_ref());
    let seed = match seed_path {
        Some(p) => {
            let path = expand_tilde(p);
            let seed = SeedData::load(&path)?;
            if matches!(cli.command, Commands::Shell { .. }) {
                info(format!(
                    "Loaded {} record(s) from {}",
                    seed.total(),
                    path.display()
                ));
            }
            seed
        }
        None => SeedData::default(),
    };
    Workspace::from_seed(cfg, seed)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => crate::cli::commands::init::handle(cli),
        Commands::Config { .. } => crate::cli::commands::config::handle(&cli.command, cfg),
        Commands::List { .. } => {
            crate::cli::commands::list::handle(&cli.command, cfg, open_workspace(cli, cfg)?)
        }
        Commands::Check { .. } => {
            crate::cli::commands::check::handle(&cli.command, &open_workspace(cli, cfg)?)
        }
        Commands::Export { .. } => {
            crate::cli::commands::export::handle(&cli.command, open_workspace(cli, cfg)?)
        }
        Commands::Shell { .. } => {
            crate::cli::commands::shell::handle(&cli.command, cfg, open_workspace(cli, cfg)?)
        }
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta
    let cfg = Config::load()?;

    // 3️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}

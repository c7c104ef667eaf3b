//! Job board - command line entry point
//!
//! Handles:
//! - Configuration loading (with environment overrides)
//! - Application-level logging initialization
//! - Preference store and HTTP source setup
//! - Dispatching one command, or an interactive shell

use anyhow::{Context, Result};
use clap::Parser;

use jobboard_core::config::ConfigManager;
use jobboard_core::engine::ReconciliationEngine;
use jobboard_core::logging::{init_tracing, init_tracing_with_file};
use jobboard_core::prefs::FileStore;
use jobboard_core::source::HrflowSource;

mod actions;
mod args;
mod render;
mod shell;

use actions::View;
use args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging settings)
    let mut config_manager = ConfigManager::new(&cli.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let mut settings = config_manager.settings().clone();
    settings.apply_env_overrides();

    let mut level = settings.logging.level;
    for _ in 0..cli.verbose {
        level = level.more_verbose();
    }

    let _log_guard = if settings.logging.to_file {
        let logs_dir = config_manager.logs_folder();
        match init_tracing_with_file(level, &logs_dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!(
                    "Warning: Cannot log to {}: {}. Logging to stderr only.",
                    logs_dir.display(),
                    e
                );
                init_tracing(level);
                None
            }
        }
    } else {
        init_tracing(level);
        None
    };

    tracing::debug!("Config: {}", config_manager.path().display());
    tracing::debug!("Core version: {}", jobboard_core::version());

    let command = cli.command.unwrap_or(Command::List);
    let categories = settings.board.categories.clone();

    if command == Command::Categories {
        println!("{}", categories.join("\n"));
        return Ok(());
    }

    if settings.api.board_key.is_empty() {
        tracing::warn!(
            "No board key configured; set [api].board_key in {} or HRFLOW_BOARD_KEY",
            config_manager.path().display()
        );
    }

    let store = match settings.storage.prefs_path() {
        Some(path) => FileStore::open(path),
        None => FileStore::open_default().context("Failed to locate the preferences file")?,
    };
    tracing::debug!("Preferences: {}", store.path().display());

    let source = HrflowSource::new(settings.api.clone()).context("Failed to build HTTP client")?;
    let mut engine = ReconciliationEngine::new(source, store, &settings.paging);

    if command == Command::Shell {
        return shell::run(&mut engine, &categories).await;
    }

    engine.initialize().await;
    match actions::apply(&mut engine, &command, &categories).await? {
        View::Board => print!("{}", render::board(&engine, |_| false)),
        View::Card(i) => print!(
            "{}",
            render::job_card(i + 1, &engine.displayed_jobs()[i], true)
        ),
    }
    Ok(())
}

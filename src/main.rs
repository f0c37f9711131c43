mod config;
mod entry;
mod error;
mod ledger;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;

use config::{Config, Mode};
use ledger::Ledger;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    match config.mode {
        Mode::Help | Mode::Version => return run::as_cli(&config, &Ledger::new()),
        Mode::Report => logging::init_stderr(&config.log_filter)?,
        // The terminal belongs to the dashboard, so the TUI logs to a file
        Mode::Tui => logging::init_file(&config::data_dir()?, &config.log_filter)?,
    }

    let mut ledger = if config.demo {
        Ledger::demo()
    } else {
        Ledger::new()
    };
    tracing::info!(mode = ?config.mode, demo = config.demo, "session started");

    let result = match config.mode {
        Mode::Tui => run::as_tui(&mut ledger),
        _ => run::as_cli(&config, &ledger),
    };

    tracing::info!(
        transactions = ledger.transactions().len(),
        balance = %ledger.balance(),
        "session ended"
    );
    result
}

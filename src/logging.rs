use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub(crate) const LOG_FILE_NAME: &str = "quantro.log";

/// Send logs to `quantro.log` in `dir`. Used by the TUI, where stderr would draw over the screen.
pub(crate) fn init_file(dir: &Path, filter: &str) -> Result<()> {
    let file = open_log_file(dir)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

pub(crate) fn init_stderr(filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

fn env_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {filter}"))
}

pub(crate) fn open_log_file(dir: &Path) -> Result<File> {
    let path = dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

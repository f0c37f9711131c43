use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const LOG_ENV: &str = "QUANTRO_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Tui,
    Report,
    Help,
    Version,
}

/// Everything `main` needs to know before the ledger is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) mode: Mode,
    /// Start the session with the sample transactions instead of an empty ledger.
    pub(crate) demo: bool,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args, std::env::var(LOG_ENV).ok())
    }

    pub(crate) fn parse(args: &[String], log_env: Option<String>) -> Result<Self> {
        let mut mode = Mode::Tui;
        let mut demo = false;

        for arg in args {
            match arg.as_str() {
                "--demo" => demo = true,
                "report" | "r" => mode = Mode::Report,
                "--help" | "-h" | "help" => mode = Mode::Help,
                "--version" | "-V" | "version" => mode = Mode::Version,
                other => anyhow::bail!("Unknown argument: {other}"),
            }
        }

        let log_filter = log_env
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            mode,
            demo,
            log_filter,
        })
    }
}

/// Directory the TUI writes its log file to, created on demand.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "quantro", "Quantro")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

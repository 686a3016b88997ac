use std::path::PathBuf;

use clap::Parser;
use safetyboard_core::StatusFilter;
use safetyboard_logging::LogDestination;

/// Product safety dashboard: loads the Trustified, UnboxHealth and Open Data
/// datasets and shows totals, a donut chart and filterable results.
#[derive(Debug, Clone, Parser)]
#[command(name = "safetyboard", version, about)]
pub struct Cli {
    /// Directory or base URL holding the three dataset files.
    #[arg(long)]
    pub base: Option<String>,

    /// Location of the Trustified dataset (overrides --base).
    #[arg(long)]
    pub trustified: Option<String>,

    /// Location of the UnboxHealth dataset (overrides --base).
    #[arg(long)]
    pub unbox: Option<String>,

    /// Location of the Open Data dataset (overrides --base).
    #[arg(long = "open-data")]
    pub open_data: Option<String>,

    /// RON config file.
    #[arg(long, default_value = crate::config::CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Initial status filter: pass, fail, pending, not_healthy or all.
    /// A status and a search query exclude each other.
    #[arg(long, conflicts_with_all = ["category", "query"])]
    pub status: Option<StatusFilter>,

    /// Initial category filter (exact category text).
    #[arg(long, conflicts_with = "query")]
    pub category: Option<String>,

    /// Initial search query.
    #[arg(long)]
    pub query: Option<String>,

    /// Write dashboard.html and summary.json into this directory.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Read commands and search queries from stdin.
    #[arg(long, short)]
    pub interactive: bool,

    /// Log destination: terminal, file or both.
    #[arg(long)]
    pub log: Option<LogDestination>,
}

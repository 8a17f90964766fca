//! CLI argument definitions for mlfund.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `companies` | Fetch the company list |
//! | `company <SYMBOL>` | Fetch financial statements and their analysis for one company |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `$MLFUND_API_BASE` | Backend API base URL |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--theme` | `light` | Theme recorded in the UI state |
//! | `--sidebar-toggle` | `false` | Toggle the sidebar before fetching |
//!
//! # Examples
//!
//! ```bash
//! mlfund companies --pretty
//! mlfund company INFY.NS --base-url http://localhost:8000/api
//! mlfund company TCS.NS --threshold 15 --theme dark
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use mlfund_core::DEFAULT_THRESHOLD;

/// mlfund - fundamentals dashboard client
#[derive(Debug, Parser)]
#[command(
    name = "mlfund",
    author,
    version,
    about = "Fundamentals dashboard client",
    long_about = "Fetches company lists and financial statements from the mlfund backend \
through the same state store the dashboard uses, then prints the resulting resource state \
as JSON.\n\
\n\
Exit codes: 0 success, 2 invalid input, 3 fetch failed, 4 serialization error."
)]
pub struct Cli {
    /// Backend API base URL; overrides MLFUND_API_BASE.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Theme to set before fetching.
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Toggle the sidebar before fetching.
    #[arg(long, global = true, default_value_t = false)]
    pub sidebar_toggle: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the company list.
    Companies,
    /// Fetch financial statements for one company and categorise its metrics.
    Company(CompanyArgs),
}

#[derive(Debug, Args)]
pub struct CompanyArgs {
    /// Ticker symbol, e.g. AAPL or INFY.NS.
    pub symbol: String,

    /// Averages above this are pros, below it cons. Fractions are
    /// compared as percentages.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: f64,
}

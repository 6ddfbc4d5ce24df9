//! CLI argument definitions for stockcast.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `resolve` | Resolve a company name to its exchange ticker |
//! | `intervals` | Show the period/interval compatibility matrix |
//! | `history` | Fetch historical OHLC bars |
//! | `summary` | Formatted price statistics for a ticker |
//! | `forecast` | 50-day close-price forecast |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock price analysis and forecasting CLI for BSE/NSE listings.
#[derive(Debug, Parser)]
#[command(
    name = "stockcast",
    author,
    version,
    about = "Stock price analysis and forecasting CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a company name to its exchange-suffixed ticker.
    ///
    /// # Examples
    ///
    ///   stockcast resolve "Infosys Limited" --exchange nse
    Resolve(ResolveArgs),

    /// Show which sampling intervals are legal for each history period.
    ///
    /// # Examples
    ///
    ///   stockcast intervals
    ///   stockcast intervals --period 1y
    Intervals(IntervalsArgs),

    /// Fetch historical OHLC bars for a ticker.
    ///
    /// The (period, interval) pair is validated against the compatibility
    /// matrix before any data is requested.
    ///
    /// # Examples
    ///
    ///   stockcast history RELIANCE.NS --period 1y --interval 1d
    ///   stockcast history TCS.BO --period 5d --interval 15m
    History(HistoryArgs),

    /// Formatted price statistics (day and 52-week high/low).
    ///
    /// # Examples
    ///
    ///   stockcast summary INFY.NS
    Summary(SummaryArgs),

    /// Project a 50-day close-price forecast from a year of daily history.
    ///
    /// When the instrument has too little history for the model, the output
    /// carries an explicit unavailable status instead of failing.
    ///
    /// # Examples
    ///
    ///   stockcast forecast SBIN.NS --pretty
    Forecast(ForecastArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Company name or listing code.
    pub company: String,

    /// Stock exchange (bse or nse).
    #[arg(long, default_value = "bse")]
    pub exchange: String,
}

/// Arguments for the `intervals` command.
#[derive(Debug, Args)]
pub struct IntervalsArgs {
    /// Restrict output to one period (e.g. 1y).
    #[arg(long)]
    pub period: Option<String>,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Exchange-suffixed ticker (e.g. RELIANCE.NS).
    pub symbol: String,

    /// History span: 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y.
    #[arg(long, default_value = "1y")]
    pub period: String,

    /// Sampling interval: 5m, 15m, 30m, 1h, 1d, 1wk, 1mo, 3mo.
    #[arg(long, default_value = "1d")]
    pub interval: String,
}

/// Arguments for the `summary` command.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Exchange-suffixed ticker.
    pub symbol: String,
}

/// Arguments for the `forecast` command.
#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Exchange-suffixed ticker.
    pub symbol: String,
}

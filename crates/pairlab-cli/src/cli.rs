//! CLI argument definitions for pairlab.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `summarize` | Pair metrics for the configured universe or explicit pairs |
//! | `beta` | Hedge ratio by one or more estimators |
//! | `rolling` | Rolling OLS beta |
//! | `coint` | Log-price cointegration diagnosis |
//! | `hedge` | Size the base leg for an alt position |
//! | `simulate` | Full hedge workflow with P&L and effectiveness |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table, csv) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--verbose` | `false` | Debug-level logging on stderr |
//! | `--config` | `$PAIRLAB_CONFIG` | JSON configuration file |
//!
//! # Examples
//!
//! ```bash
//! pairlab summarize --data closes.csv --lookback 1y --format table
//! pairlab beta --data closes.csv --base QQQ --alt TQQQ --method robust
//! pairlab simulate --data closes.csv --base SPY --alt UPRO --qty-alt 500 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pairlab_core::HedgeMethod;

/// Hedge-ratio and pairs statistics for base/alt instrument pairs.
#[derive(Debug, Parser)]
#[command(
    name = "pairlab",
    author,
    version,
    about = "Hedge-ratio and pairs statistics for instrument pairs",
    long_about = "pairlab estimates how an alt instrument (for example a leveraged ETF) moves \
against its base, tests whether their spread mean-reverts, and sizes and back-tests a static \
hedge.\n\
\n\
Price history is read from a CSV file with columns date,symbol,close,volume.\n\
\n\
Use 'pairlab <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON envelope (default)
    /// - table: ASCII table format
    /// - csv: Tabular rows only, undefined values as empty cells
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Log at debug level (overrides PAIRLAB_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// JSON configuration file with the pair universe and defaults.
    #[arg(long, global = true, env = "PAIRLAB_CONFIG")]
    pub config: Option<PathBuf>,

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
    /// Comma-separated rows.
    Csv,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute pair metrics for every selected pair.
    ///
    /// # Examples
    ///
    ///   pairlab summarize --data closes.csv
    ///   pairlab summarize --data closes.csv --pair QQQ:TQQQ:3 --pair SPY:UPRO:3
    ///   pairlab summarize --data closes.csv --issuer ProShares --sort deviation
    Summarize(SummarizeArgs),

    /// Estimate the hedge ratio of alt on base.
    ///
    /// # Examples
    ///
    ///   pairlab beta --data closes.csv --base QQQ --alt TQQQ
    ///   pairlab beta --data closes.csv --base QQQ --alt TQQQ --method wls
    Beta(BetaArgs),

    /// Rolling OLS beta over a trailing window.
    Rolling(RollingArgs),

    /// Engle–Granger cointegration test on log prices.
    Coint(CointArgs),

    /// Size the base leg that hedges an alt position.
    ///
    /// # Examples
    ///
    ///   pairlab hedge --qty-alt 1000 --price-alt 52.3 --price-base 410.2 --beta 3
    Hedge(HedgeArgs),

    /// Run the hedge workflow: ratio, rolling beta, spread bands, P&L and
    /// effectiveness.
    Simulate(SimulateArgs),
}

/// Date selection shared by data-driven commands.
///
/// Explicit `--start`/`--end` win over `--lookback`; with neither, the full
/// range of the data file is used.
#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<String>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<String>,

    /// Lookback ending at the last date in the data.
    #[arg(long, value_enum)]
    pub lookback: Option<Lookback>,
}

/// Lookback presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lookback {
    #[value(name = "1m")]
    OneMonth,
    #[value(name = "3m")]
    ThreeMonths,
    #[value(name = "6m")]
    SixMonths,
    Ytd,
    #[value(name = "1y")]
    OneYear,
    #[value(name = "3y")]
    ThreeYears,
    Max,
}

/// Base/alt selection shared by single-pair commands.
#[derive(Debug, Clone, Args)]
pub struct PairArgs {
    /// Price history CSV (date,symbol,close,volume).
    #[arg(long)]
    pub data: PathBuf,

    /// Base instrument symbol.
    #[arg(long)]
    pub base: String,

    /// Alt instrument symbol.
    #[arg(long)]
    pub alt: String,

    #[command(flatten)]
    pub period: PeriodArgs,
}

/// Arguments for the `summarize` command.
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Price history CSV (date,symbol,close,volume).
    #[arg(long)]
    pub data: PathBuf,

    /// Explicit pair as BASE:ALT or BASE:ALT:TARGET. Repeatable; replaces the
    /// configured universe.
    #[arg(long = "pair")]
    pub pairs: Vec<String>,

    /// Keep only pairs from these issuers. Repeatable.
    #[arg(long = "issuer")]
    pub issuers: Vec<String>,

    /// Keep only pairs on these bases. Repeatable.
    #[arg(long = "base")]
    pub bases: Vec<String>,

    /// Row order of the result.
    #[arg(long, value_enum, default_value_t = SortOrder::Input)]
    pub sort: SortOrder,

    #[command(flatten)]
    pub period: PeriodArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Universe order.
    Input,
    /// Largest |beta - target| first; undefined deviations last.
    Deviation,
}

/// Arguments for the `beta` command.
#[derive(Debug, Args)]
pub struct BetaArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Estimator(s): ols, wls, robust, coint. Repeatable; defaults to all.
    #[arg(long = "method")]
    pub methods: Vec<HedgeMethod>,
}

/// Arguments for the `rolling` command.
#[derive(Debug, Args)]
pub struct RollingArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Window length in observations (20-200; default from config).
    #[arg(long)]
    pub window: Option<usize>,
}

/// Arguments for the `coint` command.
#[derive(Debug, Args)]
pub struct CointArgs {
    #[command(flatten)]
    pub pair: PairArgs,
}

/// Arguments for the `hedge` command.
#[derive(Debug, Args)]
pub struct HedgeArgs {
    /// Alt shares to hedge (default from config).
    #[arg(long)]
    pub qty_alt: Option<f64>,

    /// Current alt price.
    #[arg(long)]
    pub price_alt: f64,

    /// Current base price.
    #[arg(long)]
    pub price_base: f64,

    /// Beta of alt on base.
    #[arg(long, allow_hyphen_values = true)]
    pub beta: f64,
}

/// Arguments for the `simulate` command.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Hedge-ratio estimator.
    #[arg(long, default_value_t = HedgeMethod::Ols)]
    pub method: HedgeMethod,

    /// Rolling-beta window (20-200; default from config).
    #[arg(long)]
    pub window: Option<usize>,

    /// Alt shares held long (default from config).
    #[arg(long)]
    pub qty_alt: Option<f64>,
}

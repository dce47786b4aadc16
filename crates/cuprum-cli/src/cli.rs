//! CLI argument definitions for cuprum.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Daily commodity-futures price pipeline over a local DuckDB store.
#[derive(Debug, Parser)]
#[command(
    name = "cuprum",
    version,
    about = "Commodity futures price pipeline: fetch, enrich, classify",
    long_about = "Cuprum ingests a daily price series for one commodity future, derives \
trend/momentum indicators, and produces rule-based textual insights, persisting \
intermediate tables in a local DuckDB file.\n\
\n\
Run stages individually (extract, transform, insights) or all at once (run). \
Pipelines are batch and single-writer: run them serially against one database file."
)]
pub struct Cli {
    /// Path of the DuckDB database file.
    #[arg(long, global = true, default_value = "data/cuprum.duckdb")]
    pub db: PathBuf,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: extract, transform, insights.
    Run(FetchArgs),
    /// Fetch the raw daily series and replace raw_prices.
    Extract(FetchArgs),
    /// Enrich raw_prices with indicators into processed_prices.
    Transform,
    /// Classify trend and momentum from the latest processed row.
    Insights,
    /// Show table presence, row counts, and recent pipeline runs.
    Status,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Futures ticker to fetch.
    #[arg(long, default_value = "HG=F")]
    pub symbol: String,

    /// Lookback window: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, or max.
    #[arg(long, default_value = "5y")]
    pub lookback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

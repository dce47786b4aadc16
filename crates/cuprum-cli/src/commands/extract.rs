use cuprum_core::YahooProvider;
use cuprum_pipeline::{run_extract, ExtractError, PipelineError};

use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::CommandView;

pub fn run(cli: &Cli, args: &FetchArgs) -> Result<CommandView, CliError> {
    let (symbol, lookback) = super::parse_fetch(args)?;
    let store = super::open_store(cli)?;
    let provider = YahooProvider::new()
        .map_err(|error| PipelineError::Extract(ExtractError::Provider(error)))?;

    let report =
        run_extract(&provider, &store, &symbol, lookback).map_err(PipelineError::Extract)?;

    let lines = vec![
        format!(
            "extracted {} rows for {} ({}) into raw_prices",
            report.rows, report.symbol, report.lookback
        ),
        format!("columns: {}", report.columns.join(", ")),
    ];
    Ok(CommandView {
        data: serde_json::to_value(&report)?,
        lines,
    })
}

use cuprum_core::YahooProvider;
use cuprum_pipeline::{run_all, ExtractError, PipelineError};

use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::CommandView;

pub fn run(cli: &Cli, args: &FetchArgs) -> Result<CommandView, CliError> {
    let (symbol, lookback) = super::parse_fetch(args)?;
    let store = super::open_store(cli)?;
    let provider = YahooProvider::new()
        .map_err(|error| PipelineError::Extract(ExtractError::Provider(error)))?;

    let outcome = run_all(&provider, &store, &symbol, lookback)?;

    let mut lines = vec![
        format!("run {}", outcome.run_id),
        format!(
            "extract: {} rows for {} ({})",
            outcome.extract.rows, outcome.extract.symbol, outcome.extract.lookback
        ),
        format!(
            "transform: {} rows (price column '{}' via {})",
            outcome.transform.rows,
            outcome.transform.price_column,
            outcome.transform.rule.as_str()
        ),
    ];
    for insight in &outcome.insights {
        lines.push(insight.text.clone());
    }

    Ok(CommandView {
        data: serde_json::to_value(&outcome)?,
        lines,
    })
}

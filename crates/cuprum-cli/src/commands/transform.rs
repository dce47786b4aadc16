use cuprum_pipeline::{run_transform, PipelineError};

use crate::cli::Cli;
use crate::error::CliError;

use super::CommandView;

pub fn run(cli: &Cli) -> Result<CommandView, CliError> {
    let store = super::open_store(cli)?;
    let report = run_transform(&store).map_err(PipelineError::Transform)?;

    let lines = vec![format!(
        "processed {} rows into processed_prices (price column '{}' via {}{})",
        report.rows,
        report.price_column,
        report.rule.as_str(),
        if report.renamed {
            ", renamed to 'close'"
        } else {
            ""
        }
    )];
    Ok(CommandView {
        data: serde_json::to_value(&report)?,
        lines,
    })
}

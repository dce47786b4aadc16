use cuprum_pipeline::{run_insights, PipelineError};
use cuprum_warehouse::StoreError;
use serde_json::json;

use crate::cli::Cli;
use crate::error::CliError;

use super::CommandView;

pub fn run(cli: &Cli) -> Result<CommandView, CliError> {
    let store = super::open_store(cli)?;

    match run_insights(&store) {
        Ok(insights) => {
            let lines = insights
                .iter()
                .map(|insight| insight.text.clone())
                .collect();
            Ok(CommandView {
                data: serde_json::to_value(&insights)?,
                lines,
            })
        }
        // An absent processed table means the pipeline never ran or was
        // interrupted; that is guidance, not a failure.
        Err(StoreError::TableMissing { table }) => Ok(CommandView {
            data: json!({ "status": "not_run", "missing_table": table }),
            lines: vec![String::from(
                "pipeline has not run yet: no processed_prices table; run `cuprum run` first",
            )],
        }),
        Err(error) => Err(PipelineError::Insight(error).into()),
    }
}

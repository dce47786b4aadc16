use cuprum_pipeline::{PROCESSED_TABLE, RAW_TABLE};
use cuprum_warehouse::RunRecord;
use serde::Serialize;

use crate::cli::Cli;
use crate::error::CliError;

use super::CommandView;

const RECENT_RUN_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
struct TableStatus {
    name: String,
    present: bool,
    rows: Option<i64>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    db_path: String,
    tables: Vec<TableStatus>,
    recent_runs: Vec<RunRecord>,
}

pub fn run(cli: &Cli) -> Result<CommandView, CliError> {
    let store = super::open_store(cli)?;

    let mut tables = Vec::new();
    for name in [RAW_TABLE, PROCESSED_TABLE] {
        let present = store.table_exists(name)?;
        let rows = if present {
            Some(store.count_rows(name)?)
        } else {
            None
        };
        tables.push(TableStatus {
            name: name.to_owned(),
            present,
            rows,
        });
    }

    let recent_runs = store.recent_runs(RECENT_RUN_LIMIT)?;

    let mut lines = vec![format!("db: {}", cli.db.display())];
    for table in &tables {
        match table.rows {
            Some(rows) => lines.push(format!("{}: {} rows", table.name, rows)),
            None => lines.push(format!("{}: not created (pipeline not yet run)", table.name)),
        }
    }
    if recent_runs.is_empty() {
        lines.push(String::from("no recorded pipeline runs"));
    } else {
        lines.push(String::from("recent runs:"));
        for record in &recent_runs {
            lines.push(format!(
                "  {} {} {} rows={} latency_ms={} at {}",
                record.run_id,
                record.stage,
                record.status,
                record.rows,
                record.latency_ms,
                record.recorded_at
            ));
        }
    }

    let report = StatusReport {
        db_path: cli.db.display().to_string(),
        tables,
        recent_runs,
    };
    Ok(CommandView {
        data: serde_json::to_value(&report)?,
        lines,
    })
}

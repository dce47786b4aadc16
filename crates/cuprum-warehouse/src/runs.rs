//! Append-only pipeline run log.
//!
//! Observability only: never consulted by pipeline logic, surfaced by the
//! `status` command.

use duckdb::ToSql;
use serde::Serialize;

use crate::{escape_sql_string, PriceStore, StoreError};

#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub run_id: String,
    pub stage: String,
    pub status: String,
    pub rows: i64,
    pub latency_ms: i64,
    pub recorded_at: String,
}

impl PriceStore {
    pub fn record_run_stage(
        &self,
        run_id: &str,
        stage: &str,
        status: &str,
        rows: usize,
        latency_ms: u64,
    ) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO pipeline_runs (run_id, stage, status, rows, latency_ms) VALUES ('{}', '{}', '{}', {}, {})",
            escape_sql_string(run_id),
            escape_sql_string(stage),
            escape_sql_string(status),
            rows,
            latency_ms,
        );
        self.connection.execute_batch(sql.as_str())?;
        Ok(())
    }

    /// Most recent run stages, newest first.
    pub fn recent_runs(&self, limit: usize) -> Result<Vec<RunRecord>, StoreError> {
        let sql = format!(
            "SELECT run_id, stage, status, COALESCE(rows, 0), COALESCE(latency_ms, 0), CAST(recorded_at AS VARCHAR) \
             FROM pipeline_runs ORDER BY recorded_at DESC, rowid DESC LIMIT {limit}"
        );
        let mut statement = self.connection.prepare(&sql)?;
        let mut cursor = statement.query([] as [&dyn ToSql; 0])?;

        let mut records = Vec::new();
        while let Some(row) = cursor.next()? {
            records.push(RunRecord {
                run_id: row.get(0)?,
                stage: row.get(1)?,
                status: row.get(2)?,
                rows: row.get(3)?,
                latency_ms: row.get(4)?,
                recorded_at: row.get(5)?,
            });
        }
        Ok(records)
    }
}

//! The three-stage cuprum pipeline: extract, transform, insights.
//!
//! Every stage is a synchronous batch step that fully materializes its
//! input and output. No stage retries; a failure aborts the stage and the
//! remaining stages do not execute. Concurrent runs against one store are
//! a caller responsibility: run pipelines serially.

pub mod extract;
pub mod indicators;
pub mod insight;
pub mod resolve;
pub mod transform;

use std::time::Instant;

use cuprum_core::{Lookback, PriceProvider, Symbol};
use cuprum_warehouse::{PriceStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use extract::{normalize_label, run_extract, ExtractError, ExtractReport, RAW_TABLE};
pub use indicators::{forward_fill, horizon_return, trailing_mean};
pub use insight::{
    run_insights, Insight, InsightKind, MomentumSignal, TrendSignal, NO_DATA_MESSAGE,
};
pub use resolve::{resolve_price_column, Resolution, ResolutionRule};
pub use transform::{run_transform, TransformError, TransformReport, PRICE_COLUMN, PROCESSED_TABLE};

/// Stage-tagged pipeline failure, as surfaced to the orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extract stage failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("transform stage failed: {0}")]
    Transform(#[from] TransformError),

    #[error("insight stage failed: {0}")]
    Insight(#[from] StoreError),
}

/// Result of one full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: String,
    pub extract: ExtractReport,
    pub transform: TransformReport,
    pub insights: Vec<Insight>,
}

/// Run extract, transform, and insights in sequence, halting on the first
/// stage failure. Each stage is appended to the run log; on a failure the
/// log write is best-effort so the stage error is what surfaces.
pub fn run_all(
    provider: &dyn PriceProvider,
    store: &PriceStore,
    symbol: &Symbol,
    lookback: Lookback,
) -> Result<RunOutcome, PipelineError> {
    let run_id = Uuid::new_v4().to_string();

    let started = Instant::now();
    let extract = match run_extract(provider, store, symbol, lookback) {
        Ok(report) => {
            store
                .record_run_stage(&run_id, "extract", "ok", report.rows, elapsed_ms(started))
                .map_err(|error| PipelineError::Extract(error.into()))?;
            report
        }
        Err(error) => {
            let _ = store.record_run_stage(&run_id, "extract", "failed", 0, elapsed_ms(started));
            return Err(PipelineError::Extract(error));
        }
    };

    let started = Instant::now();
    let transform = match run_transform(store) {
        Ok(report) => {
            store
                .record_run_stage(&run_id, "transform", "ok", report.rows, elapsed_ms(started))
                .map_err(|error| PipelineError::Transform(error.into()))?;
            report
        }
        Err(error) => {
            let _ = store.record_run_stage(&run_id, "transform", "failed", 0, elapsed_ms(started));
            return Err(PipelineError::Transform(error));
        }
    };

    let started = Instant::now();
    let insights = match run_insights(store) {
        Ok(insights) => {
            store
                .record_run_stage(&run_id, "insights", "ok", insights.len(), elapsed_ms(started))
                .map_err(PipelineError::Insight)?;
            insights
        }
        Err(error) => {
            let _ = store.record_run_stage(&run_id, "insights", "failed", 0, elapsed_ms(started));
            return Err(PipelineError::Insight(error));
        }
    };

    Ok(RunOutcome {
        run_id,
        extract,
        transform,
        insights,
    })
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

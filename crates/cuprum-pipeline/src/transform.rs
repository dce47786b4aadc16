//! Transform stage: forward-fill `raw_prices`, resolve the canonical price
//! column, append the indicator columns, and replace `processed_prices`.

use cuprum_core::{SeriesColumn, ValidationError};
use cuprum_warehouse::{PriceStore, StoreError};
use serde::Serialize;
use thiserror::Error;

use crate::extract::RAW_TABLE;
use crate::indicators::{forward_fill, horizon_return, trailing_mean};
use crate::resolve::{resolve_price_column, ResolutionRule};

pub const PROCESSED_TABLE: &str = "processed_prices";
pub const PRICE_COLUMN: &str = "close";

const SHORT_WINDOW: usize = 50;
const LONG_WINDOW: usize = 200;
const RETURN_HORIZON: usize = 7;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("no price column found among {columns:?}")]
    PriceColumnNotFound { columns: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub rows: usize,
    /// Source column the canonical price was resolved from.
    pub price_column: String,
    pub rule: ResolutionRule,
    pub renamed: bool,
}

/// Enrich the raw series into `processed_prices`.
///
/// Two runs over an unchanged `raw_prices` produce identical output; the
/// replace is an atomic swap, so a failure leaves the previous processed
/// table intact.
pub fn run_transform(store: &PriceStore) -> Result<TransformReport, TransformError> {
    let mut table = store.read_all(RAW_TABLE)?;

    for column in table.columns_mut() {
        column.values = forward_fill(&column.values);
    }

    let names = table.column_names();
    let resolution = resolve_price_column(&names)
        .ok_or(TransformError::PriceColumnNotFound { columns: names })?;
    let renamed = resolution.column != PRICE_COLUMN;
    if renamed {
        table.rename_column(&resolution.column, PRICE_COLUMN);
    }

    let close_values = match table.column(PRICE_COLUMN) {
        Some(column) => column.values.clone(),
        None => {
            return Err(TransformError::PriceColumnNotFound {
                columns: table.column_names(),
            })
        }
    };

    table.push_column(SeriesColumn::new(
        "ma50",
        trailing_mean(&close_values, SHORT_WINDOW),
    ))?;
    table.push_column(SeriesColumn::new(
        "ma200",
        trailing_mean(&close_values, LONG_WINDOW),
    ))?;
    table.push_column(SeriesColumn::new(
        "return_7d",
        horizon_return(&close_values, RETURN_HORIZON),
    ))?;

    store.replace_table(PROCESSED_TABLE, &table)?;

    Ok(TransformReport {
        rows: table.len(),
        price_column: resolution.column,
        rule: resolution.rule,
        renamed,
    })
}

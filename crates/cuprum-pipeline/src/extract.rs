//! Extract stage: fetch the provider series, normalize its column labels,
//! and replace `raw_prices` wholesale.

use cuprum_core::{
    ColumnLabel, Lookback, PriceProvider, ProviderError, SeriesColumn, SeriesRequest, SeriesTable,
    Symbol, ValidationError,
};
use cuprum_warehouse::{PriceStore, StoreError};
use serde::Serialize;
use thiserror::Error;

pub const RAW_TABLE: &str = "raw_prices";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub symbol: String,
    pub lookback: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Flatten a provider label into a scalar field name: the primary label
/// alone when the sub-label is empty, otherwise joined with an underscore;
/// then lowercased with spaces replaced by underscores.
pub fn normalize_label(label: &ColumnLabel) -> String {
    let flat = match &label.detail {
        Some(detail) if !detail.is_empty() => format!("{}_{}", label.primary, detail),
        _ => label.primary.clone(),
    };
    flat.to_lowercase().replace(' ', "_")
}

/// Fetch and persist the raw daily series.
///
/// Provider failures propagate uncaught. Zero downloaded rows is not an
/// error here; the empty table is written and downstream stages must
/// tolerate it.
pub fn run_extract(
    provider: &dyn PriceProvider,
    store: &PriceStore,
    symbol: &Symbol,
    lookback: Lookback,
) -> Result<ExtractReport, ExtractError> {
    let request = SeriesRequest::new(symbol.clone(), lookback);
    let series = provider.daily_series(&request)?;

    let columns: Vec<SeriesColumn> = series
        .columns
        .into_iter()
        .map(|column| SeriesColumn::new(normalize_label(&column.label), column.values))
        .collect();
    let table = SeriesTable::new(series.dates, columns)?;

    store.replace_table(RAW_TABLE, &table)?;

    Ok(ExtractReport {
        symbol: symbol.to_string(),
        lookback: lookback.to_string(),
        rows: table.len(),
        columns: table.column_names(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_label_is_lowercased() {
        assert_eq!(normalize_label(&ColumnLabel::new("Close")), "close");
    }

    #[test]
    fn nested_label_joins_with_underscore() {
        assert_eq!(
            normalize_label(&ColumnLabel::nested("Close", "HG=F")),
            "close_hg=f"
        );
    }

    #[test]
    fn empty_sub_label_keeps_the_primary() {
        assert_eq!(normalize_label(&ColumnLabel::nested("Close", "")), "close");
    }

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(normalize_label(&ColumnLabel::new("Adj Close")), "adj_close");
    }
}

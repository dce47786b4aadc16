//! Shared fixtures for cuprum behavior tests.

use cuprum_core::{
    PriceProvider, ProviderError, ProviderSeries, SeriesColumn, SeriesRequest, SeriesTable,
    TradingDay,
};
use cuprum_warehouse::{PriceStore, StoreConfig};
use tempfile::TempDir;
use time::{Date, Month};

/// Fresh store in a temporary directory; keep the guard alive for the test.
pub fn temp_store() -> (TempDir, PriceStore) {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = PriceStore::open(&StoreConfig {
        db_path: temp.path().join("cuprum.duckdb"),
    })
    .expect("store open");
    (temp, store)
}

/// Consecutive calendar days starting 2024-01-01. Weekends are irrelevant
/// to the window math, so a plain calendar run is fine.
pub fn trading_days(count: usize) -> Vec<TradingDay> {
    let mut date = Date::from_calendar_date(2024, Month::January, 1).expect("valid date");
    let mut days = Vec::with_capacity(count);
    for _ in 0..count {
        days.push(TradingDay::new(date));
        date = date.next_day().expect("next day");
    }
    days
}

/// Table with a single `close` column over a fresh date spine.
pub fn close_table(values: &[Option<f64>]) -> SeriesTable {
    SeriesTable::new(
        trading_days(values.len()),
        vec![SeriesColumn::new("close", values.to_vec())],
    )
    .expect("table")
}

/// Table with the given column names, every cell holding `value`.
pub fn constant_table(rows: usize, columns: &[&str], value: f64) -> SeriesTable {
    let columns = columns
        .iter()
        .map(|name| SeriesColumn::new(*name, vec![Some(value); rows]))
        .collect();
    SeriesTable::new(trading_days(rows), columns).expect("table")
}

/// Provider that hands back a fixed series.
pub struct StaticProvider {
    pub series: ProviderSeries,
}

impl PriceProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn daily_series(&self, _request: &SeriesRequest) -> Result<ProviderSeries, ProviderError> {
        Ok(self.series.clone())
    }
}

/// Provider that always fails, for halt-on-failure scenarios.
pub struct FailingProvider;

impl PriceProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn daily_series(&self, _request: &SeriesRequest) -> Result<ProviderSeries, ProviderError> {
        Err(ProviderError::Status { code: 500 })
    }
}

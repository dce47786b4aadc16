//! Market-data provider contract consumed by the extract stage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ColumnLabel, Lookback, Symbol, TradingDay};

/// Request for one symbol's daily series over a lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub lookback: Lookback,
}

impl SeriesRequest {
    pub fn new(symbol: Symbol, lookback: Lookback) -> Self {
        Self { symbol, lookback }
    }
}

/// One labeled value column as delivered by a provider, pre-normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderColumn {
    pub label: ColumnLabel,
    pub values: Vec<Option<f64>>,
}

/// Time-ordered daily series as delivered by a provider.
///
/// Labels may be nested or partially filled; the extract stage owns
/// flattening them into canonical field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSeries {
    pub dates: Vec<TradingDay>,
    pub columns: Vec<ProviderColumn>,
}

/// Provider failures. All are unrecoverable for the current run; no retries.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP status {code}")]
    Status { code: u16 },

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider returned no bars for {symbol}")]
    EmptyPayload { symbol: String },
}

/// A source of daily OHLCV series.
pub trait PriceProvider {
    fn name(&self) -> &'static str;

    /// Fetch the full series in one blocking call. Blocks until completion
    /// or failure; there are no timeout or cancellation semantics beyond the
    /// transport's own.
    fn daily_series(&self, request: &SeriesRequest) -> Result<ProviderSeries, ProviderError>;
}

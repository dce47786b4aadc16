pub mod domain;
mod error;
pub mod provider;
pub mod series;
pub mod yahoo;

pub use domain::{Lookback, Symbol, TradingDay};
pub use error::ValidationError;
pub use provider::{
    PriceProvider, ProviderColumn, ProviderError, ProviderSeries, SeriesRequest,
};
pub use series::{ColumnLabel, SeriesColumn, SeriesRow, SeriesTable};
pub use yahoo::YahooProvider;

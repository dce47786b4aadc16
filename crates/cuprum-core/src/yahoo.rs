//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API in a single blocking
//! request. Yahoo has no official API and is subject to unannounced format
//! changes; decode failures surface as typed errors.

use std::time::Duration;

use serde::Deserialize;
use time::OffsetDateTime;

use crate::provider::{
    PriceProvider, ProviderColumn, ProviderError, ProviderSeries, SeriesRequest,
};
use crate::{ColumnLabel, TradingDay};

const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartOuter,
}

#[derive(Debug, Deserialize)]
struct ChartOuter {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
    adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance provider over a blocking HTTP client.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;
        Ok(Self { client })
    }

    fn chart_url(request: &SeriesRequest) -> String {
        format!(
            "{CHART_BASE_URL}/{symbol}?range={range}&interval=1d&includeAdjustedClose=true",
            symbol = urlencoding::encode(request.symbol.as_str()),
            range = request.lookback,
        )
    }

    /// Decode a chart API body into a provider series.
    fn decode_chart(symbol: &str, body: &str) -> Result<ProviderSeries, ProviderError> {
        let response: ChartResponse =
            serde_json::from_str(body).map_err(|error| ProviderError::Decode(error.to_string()))?;

        let result = response.chart.result.ok_or_else(|| {
            if let Some(error) = response.chart.error {
                if error.code == "Not Found" {
                    ProviderError::SymbolNotFound {
                        symbol: symbol.to_owned(),
                    }
                } else {
                    ProviderError::Decode(format!("{}: {}", error.code, error.description))
                }
            } else {
                ProviderError::Decode(String::from("empty result with no error"))
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode(String::from("result array is empty")))?;

        let timestamps = data.timestamp.unwrap_or_default();
        if timestamps.is_empty() {
            return Err(ProviderError::EmptyPayload {
                symbol: symbol.to_owned(),
            });
        }

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode(String::from("no quote data")))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|blocks| blocks.into_iter().next())
            .map(|block| block.adjclose);

        let mut dates = Vec::with_capacity(timestamps.len());
        let mut open = Vec::with_capacity(timestamps.len());
        let mut high = Vec::with_capacity(timestamps.len());
        let mut low = Vec::with_capacity(timestamps.len());
        let mut close = Vec::with_capacity(timestamps.len());
        let mut adj_close = Vec::with_capacity(timestamps.len());
        let mut volume = Vec::with_capacity(timestamps.len());

        for (index, &ts) in timestamps.iter().enumerate() {
            let bar_open = quote.open.get(index).copied().flatten();
            let bar_high = quote.high.get(index).copied().flatten();
            let bar_low = quote.low.get(index).copied().flatten();
            let bar_close = quote.close.get(index).copied().flatten();
            let bar_volume = quote.volume.get(index).copied().flatten();

            // Skip bars where all OHLCV are null (holidays/non-trading days)
            if bar_open.is_none()
                && bar_high.is_none()
                && bar_low.is_none()
                && bar_close.is_none()
                && bar_volume.is_none()
            {
                continue;
            }

            let date = OffsetDateTime::from_unix_timestamp(ts)
                .map(|dt| TradingDay::new(dt.date()))
                .map_err(|_| ProviderError::Decode(format!("invalid timestamp: {ts}")))?;

            dates.push(date);
            open.push(bar_open);
            high.push(bar_high);
            low.push(bar_low);
            close.push(bar_close);
            adj_close.push(
                adj_closes
                    .as_ref()
                    .and_then(|values| values.get(index).copied().flatten()),
            );
            volume.push(bar_volume.map(|v| v as f64));
        }

        if dates.is_empty() {
            return Err(ProviderError::EmptyPayload {
                symbol: symbol.to_owned(),
            });
        }

        let mut columns = vec![
            ProviderColumn {
                label: ColumnLabel::new("Open"),
                values: open,
            },
            ProviderColumn {
                label: ColumnLabel::new("High"),
                values: high,
            },
            ProviderColumn {
                label: ColumnLabel::new("Low"),
                values: low,
            },
            ProviderColumn {
                label: ColumnLabel::new("Close"),
                values: close,
            },
        ];
        if adj_closes.is_some() {
            columns.push(ProviderColumn {
                label: ColumnLabel::new("Adj Close"),
                values: adj_close,
            });
        }
        columns.push(ProviderColumn {
            label: ColumnLabel::new("Volume"),
            values: volume,
        });

        Ok(ProviderSeries { dates, columns })
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn daily_series(&self, request: &SeriesRequest) -> Result<ProviderSeries, ProviderError> {
        let url = Self::chart_url(request);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text()?;
        Self::decode_chart(request.symbol.as_str(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_body(timestamps: &str, closes: &str) -> String {
        format!(
            r#"{{"chart":{{"result":[{{"timestamp":{timestamps},"indicators":{{"quote":[{{"open":{closes},"high":{closes},"low":{closes},"close":{closes},"volume":[100,200]}}],"adjclose":[{{"adjclose":{closes}}}]}}}}],"error":null}}}}"#
        )
    }

    #[test]
    fn decodes_chart_payload_into_labeled_columns() {
        // 2024-01-02 and 2024-01-03 midnight UTC
        let body = chart_body("[1704153600,1704240000]", "[4.1,4.2]");
        let series = YahooProvider::decode_chart("HG=F", &body).expect("must decode");

        assert_eq!(series.dates.len(), 2);
        assert_eq!(series.dates[0].format_iso(), "2024-01-02");
        let labels: Vec<&str> = series
            .columns
            .iter()
            .map(|column| column.label.primary.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["Open", "High", "Low", "Close", "Adj Close", "Volume"]
        );
        assert_eq!(series.columns[3].values, vec![Some(4.1), Some(4.2)]);
        assert_eq!(series.columns[5].values, vec![Some(100.0), Some(200.0)]);
    }

    #[test]
    fn skips_all_null_bars() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704153600,1704240000],"indicators":{"quote":[{"open":[4.1,null],"high":[4.3,null],"low":[4.0,null],"close":[4.2,null],"volume":[100,null]}]}}],"error":null}}"#;
        let series = YahooProvider::decode_chart("HG=F", body).expect("must decode");
        assert_eq!(series.dates.len(), 1);
    }

    #[test]
    fn maps_not_found_error_to_symbol_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = YahooProvider::decode_chart("NOPE=F", body).expect_err("must fail");
        assert!(matches!(err, ProviderError::SymbolNotFound { .. }));
    }

    #[test]
    fn empty_timestamps_are_an_empty_payload() {
        let body = r#"{"chart":{"result":[{"timestamp":[],"indicators":{"quote":[{"open":[],"high":[],"low":[],"close":[],"volume":[]}]}}],"error":null}}"#;
        let err = YahooProvider::decode_chart("HG=F", body).expect_err("must fail");
        assert!(matches!(err, ProviderError::EmptyPayload { .. }));
    }
}

//! Yahoo Finance market data adapter.
//!
//! Fetches daily OHLCV bars from the v8 chart API with a single blocking
//! request per ticker. Retry and backoff belong to the caller's schedule,
//! not here; a failed call is reported and the analysis degrades that
//! ticker. Yahoo has no official API, so response-shape errors are expected
//! occasionally.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::error::AdvisorError;
use crate::domain::price_bar::PriceBar;
use crate::ports::market_data_port::MarketDataPort;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
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
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooAdapter {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: "https://query2.finance.yahoo.com".to_string(),
        }
    }

    /// Point the adapter at a different host (tests, mirrors).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            ..Self::new()
        }
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end_ts = end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();
        format!(
            "{}/v8/finance/chart/{ticker}?period1={start_ts}&period2={end_ts}&interval=1d",
            self.base_url
        )
    }

    /// Flatten the chart payload into bars, skipping all-null rows
    /// (holidays and half-days). "Not Found" is the valid no-data answer.
    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, AdvisorError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return match resp.chart.error {
                    Some(err) if err.code == "Not Found" => Ok(Vec::new()),
                    Some(err) => Err(AdvisorError::MarketData {
                        ticker: ticker.to_string(),
                        reason: format!("{}: {}", err.code, err.description),
                    }),
                    None => Err(AdvisorError::MarketData {
                        ticker: ticker.to_string(),
                        reason: "empty result with no error".to_string(),
                    }),
                };
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };
        let quote = data.indicators.quote.into_iter().next().ok_or_else(|| {
            AdvisorError::MarketData {
                ticker: ticker.to_string(),
                reason: "no quote data in response".to_string(),
            }
        })?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| AdvisorError::MarketData {
                    ticker: ticker.to_string(),
                    reason: format!("invalid timestamp {ts}"),
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close)
            else {
                continue;
            };

            bars.push(PriceBar {
                ticker: ticker.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume: volume.unwrap_or(0),
            });
        }

        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }
}

impl MarketDataPort for YahooAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, AdvisorError> {
        let url = self.chart_url(ticker, start, end);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AdvisorError::MarketData {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(AdvisorError::MarketData {
                ticker: ticker.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| AdvisorError::MarketData {
            ticker: ticker.to_string(),
            reason: format!("unexpected response shape: {e}"),
        })?;

        Self::parse_response(ticker, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> Result<Vec<PriceBar>, AdvisorError> {
        let chart: ChartResponse = serde_json::from_str(payload).unwrap();
        YahooAdapter::parse_response("ABCD", chart)
    }

    #[test]
    fn parses_daily_bars_in_date_order() {
        // 2024-01-03 then 2024-01-02: output must be re-sorted ascending.
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704240000, 1704153600],
                    "indicators": {
                        "quote": [{
                            "open": [5.1, 5.0],
                            "high": [5.4, 5.2],
                            "low": [5.0, 4.9],
                            "close": [5.3, 5.1],
                            "volume": [12000, 10000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let bars = parse(payload).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
        assert_eq!(bars[0].close, 5.1);
        assert_eq!(bars[1].volume, 12000);
        assert_eq!(bars[0].ticker, "ABCD");
    }

    #[test]
    fn all_null_rows_are_skipped() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000],
                    "indicators": {
                        "quote": [{
                            "open": [null, 5.0],
                            "high": [null, 5.2],
                            "low": [null, 4.9],
                            "close": [null, 5.1],
                            "volume": [null, 10000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let bars = parse(payload).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 5.1);
    }

    #[test]
    fn not_found_is_empty_not_error() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        }"#;

        assert!(parse(payload).unwrap().is_empty());
    }

    #[test]
    fn other_api_errors_surface() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Bad Request", "description": "invalid period" }
            }
        }"#;

        let err = parse(payload).unwrap_err();
        assert!(matches!(err, AdvisorError::MarketData { .. }));
        assert!(err.to_string().contains("Bad Request"));
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600],
                    "indicators": {
                        "quote": [{
                            "open": [5.0],
                            "high": [5.2],
                            "low": [4.9],
                            "close": [5.1],
                            "volume": [null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let bars = parse(payload).unwrap();
        assert_eq!(bars[0].volume, 0);
    }

    #[test]
    fn chart_url_uses_unix_day_bounds() {
        let adapter = YahooAdapter::new();
        let url = adapter.chart_url(
            "ABCD",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/ABCD?"));
        assert!(url.contains("period1=1704153600"));
        assert!(url.contains("interval=1d"));
    }
}

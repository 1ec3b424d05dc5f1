//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One daily bar for a ticker, as returned by the market data accessor.
/// Series are always ordered by date ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

//! Technical indicator snapshot per ticker.
//!
//! Unlike a backtester this engine does not keep full indicator time series;
//! each analysis run reduces a daily bar series to a single
//! [`TickerIndicators`] snapshot describing where the ticker stands today.

pub mod levels;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod volume;

use serde::Serialize;
use std::fmt;

/// Trend classification against the two moving averages.
///
/// Invariant: bullish iff price > sma20 > sma50, bearish iff
/// price < sma20 < sma50, sideways otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSignal {
    Oversold,
    Overbought,
    Neutral,
}

impl RsiSignal {
    pub fn classify(rsi: f64) -> Self {
        if rsi < 30.0 {
            RsiSignal::Oversold
        } else if rsi > 70.0 {
            RsiSignal::Overbought
        } else {
            RsiSignal::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    High,
    Normal,
    Low,
}

impl VolumeTrend {
    pub fn classify(ratio: f64) -> Self {
        if ratio > 1.5 {
            VolumeTrend::High
        } else if ratio > 0.5 {
            VolumeTrend::Normal
        } else {
            VolumeTrend::Low
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Sideways => write!(f, "sideways"),
        }
    }
}

/// Full indicator snapshot for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerIndicators {
    pub price: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub high: f64,
    pub low: f64,
    pub open: f64,

    pub sma_20: f64,
    pub sma_50: f64,
    pub price_vs_sma20: f64,
    pub price_vs_sma50: f64,

    pub avg_volume: f64,
    pub volume_ratio: f64,
    pub volume_trend: VolumeTrend,

    pub week_change: f64,
    pub month_change: f64,
    pub rsi: f64,
    pub rsi_signal: RsiSignal,

    pub support_level: f64,
    pub resistance_level: f64,
    pub distance_to_support: f64,
    pub distance_to_resistance: f64,

    pub trend: Trend,
    pub breakout_potential: bool,
    pub breakdown_risk: bool,
}

/// Per-ticker market data entry: either a snapshot or an error marker.
/// A failed or empty fetch never aborts the run; the ticker is carried
/// through as `Error` and the rest of the universe proceeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TickerData {
    Indicators(TickerIndicators),
    Error { error: String },
}

impl TickerData {
    pub fn indicators(&self) -> Option<&TickerIndicators> {
        match self {
            TickerData::Indicators(ind) => Some(ind),
            TickerData::Error { .. } => None,
        }
    }
}

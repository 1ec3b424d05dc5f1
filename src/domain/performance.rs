//! Portfolio performance statistics over the equity history.

use chrono::NaiveDate;
use serde::Serialize;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Annual risk-free rate assumed for the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.045;

/// One total-equity observation from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub total_return: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub trading_days: usize,
    pub starting_equity: f64,
    pub current_equity: f64,
}

/// Performance section of the report: either computed stats or an error
/// marker. A missing history never fails the surrounding report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PerformanceSection {
    Stats(PerformanceStats),
    Error { error: String },
}

impl PerformanceSection {
    pub fn stats(&self) -> Option<&PerformanceStats> {
        match self {
            PerformanceSection::Stats(stats) => Some(stats),
            PerformanceSection::Error { .. } => None,
        }
    }
}

impl PerformanceStats {
    /// Compute over an ascending equity history. `None` on an empty history.
    pub fn compute(history: &[EquityPoint]) -> Option<Self> {
        let first = history.first()?;
        let last = history.last()?;

        let returns = daily_returns(history);

        let total_return = if first.equity != 0.0 {
            last.equity / first.equity - 1.0
        } else {
            0.0
        };

        let stddev = sample_stddev(&returns);
        let volatility = if returns.len() > 1 {
            stddev * TRADING_DAYS_PER_YEAR.sqrt()
        } else {
            0.0
        };

        // Daily rate that compounds to the annual risk-free rate.
        let rf_daily = (1.0 + RISK_FREE_RATE).powf(1.0 / TRADING_DAYS_PER_YEAR) - 1.0;
        let sharpe_ratio = if stddev > 0.0 {
            let mean_excess =
                returns.iter().map(|r| r - rf_daily).sum::<f64>() / returns.len() as f64;
            mean_excess / stddev * TRADING_DAYS_PER_YEAR.sqrt()
        } else {
            0.0
        };

        Some(PerformanceStats {
            total_return,
            volatility,
            max_drawdown: max_drawdown(history),
            sharpe_ratio,
            trading_days: history.len(),
            starting_equity: first.equity,
            current_equity: last.equity,
        })
    }
}

fn daily_returns(history: &[EquityPoint]) -> Vec<f64> {
    history
        .windows(2)
        .map(|w| {
            if w[0].equity != 0.0 {
                w[1].equity / w[0].equity - 1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Largest peak-to-trough decline as a negative fraction.
fn max_drawdown(history: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for point in history {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let drawdown = point.equity / peak - 1.0;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }
    worst
}

/// Sample standard deviation (n - 1 denominator); 0 with fewer than two
/// observations.
fn sample_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

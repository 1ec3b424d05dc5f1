//! Simple moving average over closing prices.

/// Mean of the last `period` closes. With fewer than `period` bars the latest
/// close is returned instead — a degraded-precision default, not an error.
pub fn sma_or_latest(closes: &[f64], period: usize) -> f64 {
    let Some(&latest) = closes.last() else {
        return 0.0;
    };
    if period == 0 || closes.len() < period {
        return latest;
    }
    let window = &closes[closes.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

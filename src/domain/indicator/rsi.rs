//! Relative Strength Index over a simple delta average.
//!
//! Deliberately uses a plain mean of gains/losses over the trailing window
//! rather than Wilder's smoothing; downstream scoring and the prompt text
//! depend on this formulation's output range.

/// RSI over the trailing `period` price changes. Returns the neutral value 50
/// when fewer than `period` bars exist.
pub fn simple_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period {
        return 50.0;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let take = deltas.len().min(period);
    if take == 0 {
        return 50.0;
    }
    let recent = &deltas[deltas.len() - take..];

    let avg_gain = recent.iter().map(|d| d.max(0.0)).sum::<f64>() / take as f64;
    let avg_loss = recent.iter().map(|d| (-d).max(0.0)).sum::<f64>() / take as f64;

    if avg_loss == 0.0 {
        // All gains pins the oscillator at the top; a completely flat
        // series has no strength signal either way.
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

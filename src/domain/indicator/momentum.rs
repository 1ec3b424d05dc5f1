//! Price momentum over fixed lookbacks.

/// Percent change from the close `lookback` bars back (inclusive of the
/// current bar, so `lookback = 2` compares against the previous close).
/// Returns 0 when the series is too short or the reference close is 0.
pub fn change_from(closes: &[f64], lookback: usize) -> f64 {
    if lookback < 2 || closes.len() < lookback {
        return 0.0;
    }
    let current = closes[closes.len() - 1];
    let past = closes[closes.len() - lookback];
    if past == 0.0 {
        return 0.0;
    }
    (current - past) / past * 100.0
}

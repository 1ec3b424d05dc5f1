//! Volume averages and ratios.

/// Mean volume over the trailing `period` bars; with a shorter series the
/// latest volume stands in for the average.
pub fn average_volume(volumes: &[i64], period: usize) -> f64 {
    let Some(&latest) = volumes.last() else {
        return 0.0;
    };
    if period == 0 || volumes.len() < period {
        return latest as f64;
    }
    let window = &volumes[volumes.len() - period..];
    window.iter().map(|&v| v as f64).sum::<f64>() / period as f64
}

/// Latest volume relative to its average; 1.0 when the average is zero.
pub fn volume_ratio(latest: i64, average: f64) -> f64 {
    if average > 0.0 {
        latest as f64 / average
    } else {
        1.0
    }
}

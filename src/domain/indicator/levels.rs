//! Support and resistance from the recent trading range.

use crate::domain::price_bar::PriceBar;

/// (support, resistance): min low / max high over the trailing `window` bars.
/// With a shorter series the whole series is used.
pub fn support_resistance(bars: &[PriceBar], window: usize) -> (f64, f64) {
    let tail = &bars[bars.len().saturating_sub(window)..];
    let support = tail.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let resistance = tail.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    (support, resistance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(day: u32, low: f64, high: f64) -> PriceBar {
        PriceBar {
            ticker: "ABCD".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: (low + high) / 2.0,
            high,
            low,
            close: (low + high) / 2.0,
            volume: 1000,
        }
    }

    #[test]
    fn extremes_over_window() {
        let bars = vec![
            make_bar(1, 10.0, 100.0), // outside the window
            make_bar(2, 50.0, 60.0),
            make_bar(3, 45.0, 70.0),
            make_bar(4, 55.0, 65.0),
        ];
        let (support, resistance) = support_resistance(&bars, 3);
        assert!((support - 45.0).abs() < f64::EPSILON);
        assert!((resistance - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn window_larger_than_series() {
        let bars = vec![make_bar(1, 40.0, 80.0), make_bar(2, 50.0, 60.0)];
        let (support, resistance) = support_resistance(&bars, 20);
        assert!((support - 40.0).abs() < f64::EPSILON);
        assert!((resistance - 80.0).abs() < f64::EPSILON);
    }
}

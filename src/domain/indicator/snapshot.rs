//! Assembles the per-ticker indicator snapshot.

use super::{RsiSignal, TickerIndicators, Trend, VolumeTrend};
use super::{levels, momentum, rsi, sma, volume};
use crate::domain::price_bar::PriceBar;

pub const SMA_SHORT: usize = 20;
pub const SMA_LONG: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const RANGE_WINDOW: usize = 20;
pub const VOLUME_WINDOW: usize = 20;
/// A level within 5% of the current price counts as "near".
pub const LEVEL_PROXIMITY: f64 = 0.05;

const DAILY_LOOKBACK: usize = 2;
const WEEK_LOOKBACK: usize = 5;
const MONTH_LOOKBACK: usize = 20;

/// Reduce an ordered daily series to one snapshot. Returns `None` on an empty
/// series; the caller records that ticker as errored and moves on.
pub fn compute_snapshot(bars: &[PriceBar]) -> Option<TickerIndicators> {
    let last = bars.last()?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<i64> = bars.iter().map(|b| b.volume).collect();

    let price = last.close;
    let sma_20 = sma::sma_or_latest(&closes, SMA_SHORT);
    let sma_50 = sma::sma_or_latest(&closes, SMA_LONG);

    let avg_volume = volume::average_volume(&volumes, VOLUME_WINDOW);
    let volume_ratio = volume::volume_ratio(last.volume, avg_volume);

    let rsi = rsi::simple_rsi(&closes, RSI_PERIOD);
    let (support_level, resistance_level) = levels::support_resistance(bars, RANGE_WINDOW);

    let trend = classify_trend(price, sma_20, sma_50);

    Some(TickerIndicators {
        price,
        change_percent: momentum::change_from(&closes, DAILY_LOOKBACK),
        volume: last.volume,
        high: last.high,
        low: last.low,
        open: last.open,

        sma_20,
        sma_50,
        price_vs_sma20: percent_vs(price, sma_20),
        price_vs_sma50: percent_vs(price, sma_50),

        avg_volume,
        volume_ratio,
        volume_trend: VolumeTrend::classify(volume_ratio),

        week_change: momentum::change_from(&closes, WEEK_LOOKBACK),
        month_change: momentum::change_from(&closes, MONTH_LOOKBACK),
        rsi,
        rsi_signal: RsiSignal::classify(rsi),

        support_level,
        resistance_level,
        distance_to_support: percent_of_price(price - support_level, price),
        distance_to_resistance: percent_of_price(resistance_level - price, price),

        trend,
        breakout_potential: resistance_level - price < price * LEVEL_PROXIMITY,
        breakdown_risk: price - support_level < price * LEVEL_PROXIMITY,
    })
}

pub fn classify_trend(price: f64, sma_20: f64, sma_50: f64) -> Trend {
    if price > sma_20 && sma_20 > sma_50 {
        Trend::Bullish
    } else if price < sma_20 && sma_20 < sma_50 {
        Trend::Bearish
    } else {
        Trend::Sideways
    }
}

fn percent_vs(price: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (price - reference) / reference * 100.0
}

fn percent_of_price(distance: f64, price: f64) -> f64 {
    if price == 0.0 {
        return 0.0;
    }
    distance / price * 100.0
}

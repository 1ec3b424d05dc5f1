//! Ranks non-held tickers into conviction tiers.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::domain::indicator::{TickerData, TickerIndicators, Trend, VolumeTrend};

const HIGH_VOLUME_CHANGE_PERCENT: f64 = 2.0;
const MOMENTUM_PERCENT: f64 = 5.0;
/// Theme check: the growth index showing strength reads as a tech tailwind.
const TECH_INDEX: &str = "QQQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ConvictionTier {
    Low,
    Moderate,
    High,
}

/// A candidate ticker with the signals that earned it a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub ticker: String,
    pub current_price: f64,
    pub signals: Vec<String>,
    pub technical_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Opportunities {
    pub high_conviction: Vec<Opportunity>,
    pub moderate_conviction: Vec<Opportunity>,
    pub watch_list: Vec<Opportunity>,
    pub market_themes: Vec<String>,
}

/// Scan market data for entries worth a look. Index/volatility tickers and
/// anything already held are excluded; a ticker lands in the tier of the
/// highest conviction any of its signals reached, and tickers with no
/// signals are left out entirely.
pub fn identify_opportunities(
    market_data: &BTreeMap<String, TickerData>,
    held_tickers: &HashSet<String>,
    excluded_tickers: &HashSet<String>,
    volatility_ticker: &str,
) -> Opportunities {
    let mut opportunities = Opportunities::default();

    for (ticker, data) in market_data {
        if excluded_tickers.contains(ticker) || held_tickers.contains(ticker) {
            continue;
        }
        let Some(ind) = data.indicators() else {
            continue;
        };

        let mut signals = Vec::new();
        let mut conviction = ConvictionTier::Low;

        if ind.rsi < 30.0 {
            signals.push("Oversold RSI - potential bounce".to_string());
            conviction = conviction.max(ConvictionTier::Moderate);
        }
        if ind.trend == Trend::Bullish && ind.breakout_potential {
            signals.push("Bullish trend with breakout potential".to_string());
            conviction = conviction.max(ConvictionTier::High);
        }
        if ind.volume_trend == VolumeTrend::High && ind.change_percent > HIGH_VOLUME_CHANGE_PERCENT
        {
            signals.push("High volume breakout".to_string());
            conviction = conviction.max(ConvictionTier::Moderate);
        }

        if signals.is_empty() {
            continue;
        }

        let opportunity = Opportunity {
            ticker: ticker.clone(),
            current_price: ind.price,
            signals,
            technical_score: technical_score(ind),
        };

        match conviction {
            ConvictionTier::High => opportunities.high_conviction.push(opportunity),
            ConvictionTier::Moderate => opportunities.moderate_conviction.push(opportunity),
            ConvictionTier::Low => opportunities.watch_list.push(opportunity),
        }
    }

    if let Some(vol) = market_data
        .get(volatility_ticker)
        .and_then(TickerData::indicators)
    {
        if vol.price < 20.0 {
            opportunities
                .market_themes
                .push("Low volatility environment - good for growth stocks".to_string());
        }
    }
    if let Some(tech) = market_data.get(TECH_INDEX).and_then(TickerData::indicators) {
        if tech.change_percent > 1.0 {
            opportunities
                .market_themes
                .push("Technology sector showing strength".to_string());
        }
    }

    opportunities
}

/// Composite 0-100 score from trend, RSI, volume, and weekly momentum.
pub fn technical_score(ind: &TickerIndicators) -> f64 {
    let mut score: f64 = 50.0;

    match ind.trend {
        Trend::Bullish => score += 20.0,
        Trend::Bearish => score -= 20.0,
        Trend::Sideways => {}
    }

    if (30.0..=70.0).contains(&ind.rsi) {
        score += 10.0;
    } else if ind.rsi < 30.0 {
        score += 5.0;
    } else {
        score -= 10.0;
    }

    match ind.volume_trend {
        VolumeTrend::High => score += 10.0,
        VolumeTrend::Low => score -= 10.0,
        VolumeTrend::Normal => {}
    }

    if ind.week_change > MOMENTUM_PERCENT {
        score += 10.0;
    } else if ind.week_change < -MOMENTUM_PERCENT {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0)
}

//! Market sentiment from broad-index moves and the volatility gauge.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::indicator::TickerData;

const BULLISH_THRESHOLD: i32 = 2;
const BEARISH_THRESHOLD: i32 = -2;
const INDEX_MOVE_PERCENT: f64 = 1.0;
const VOLATILITY_ELEVATED: f64 = 30.0;
const VOLATILITY_LOW: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSentiment {
    pub sentiment: Sentiment,
    pub score: i32,
    pub factors: Vec<String>,
}

/// Score the market: +1/-1 per index moving beyond +/-1% on the day, -2 for
/// an elevated volatility gauge, +1 for a calm one. Factors are appended in
/// check order (indices first, volatility last) so the list is reproducible.
pub fn analyze_sentiment(
    market_data: &BTreeMap<String, TickerData>,
    index_tickers: &[String],
    volatility_ticker: &str,
) -> MarketSentiment {
    let mut score = 0;
    let mut factors = Vec::new();

    for index in index_tickers {
        let Some(ind) = market_data.get(index).and_then(TickerData::indicators) else {
            continue;
        };
        let change = ind.change_percent;
        if change > INDEX_MOVE_PERCENT {
            score += 1;
            factors.push(format!("{index} up {change:.1}%"));
        } else if change < -INDEX_MOVE_PERCENT {
            score -= 1;
            factors.push(format!("{index} down {change:.1}%"));
        }
    }

    if let Some(ind) = market_data
        .get(volatility_ticker)
        .and_then(TickerData::indicators)
    {
        let level = ind.price;
        if level > VOLATILITY_ELEVATED {
            score -= 2;
            factors.push(format!("{volatility_ticker} elevated at {level:.1}"));
        } else if level < VOLATILITY_LOW {
            score += 1;
            factors.push(format!("{volatility_ticker} low at {level:.1}"));
        }
    }

    let sentiment = if score >= BULLISH_THRESHOLD {
        Sentiment::Bullish
    } else if score <= BEARISH_THRESHOLD {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    };

    MarketSentiment {
        sentiment,
        score,
        factors,
    }
}

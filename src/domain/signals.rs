//! Derived trading signals for a held position.

use serde::Serialize;

use crate::domain::indicator::{TickerIndicators, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStrength {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionRecommendation {
    Hold,
    ConsiderSell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Qualitative read on one position, attached to the valued portfolio so the
/// model sees the same factors a human reviewer would list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSignals {
    pub strength: SignalStrength,
    pub recommendation: PositionRecommendation,
    pub risk_level: RiskLevel,
    pub key_factors: Vec<String>,
}

/// Factor order is fixed: trend, RSI, levels, then P&L milestones.
pub fn position_signals(pnl_percent: f64, tech: &TickerIndicators) -> PositionSignals {
    let mut strength = SignalStrength::Neutral;
    let mut recommendation = PositionRecommendation::Hold;
    let mut risk_level = RiskLevel::Medium;
    let mut key_factors = Vec::new();

    match tech.trend {
        Trend::Bullish => {
            key_factors.push("Bullish trend - price above moving averages".to_string());
            strength = SignalStrength::Bullish;
        }
        Trend::Bearish => {
            key_factors.push("Bearish trend - price below moving averages".to_string());
            strength = SignalStrength::Bearish;
            risk_level = RiskLevel::High;
        }
        Trend::Sideways => {}
    }

    if tech.rsi > 70.0 {
        key_factors.push(format!("Overbought RSI: {:.1}", tech.rsi));
        risk_level = RiskLevel::High;
    } else if tech.rsi < 30.0 {
        key_factors.push(format!("Oversold RSI: {:.1} - potential bounce", tech.rsi));
    }

    if tech.breakdown_risk {
        key_factors.push("Near support level - breakdown risk".to_string());
        risk_level = RiskLevel::High;
    } else if tech.breakout_potential {
        key_factors.push("Near resistance - breakout potential".to_string());
    }

    if pnl_percent < -10.0 {
        key_factors.push(format!(
            "Large loss: {pnl_percent:.1}% - consider stop loss"
        ));
        recommendation = PositionRecommendation::ConsiderSell;
    } else if pnl_percent > 20.0 {
        key_factors.push(format!(
            "Strong gain: {pnl_percent:.1}% - consider taking profits"
        ));
    }

    PositionSignals {
        strength,
        recommendation,
        risk_level,
        key_factors,
    }
}

//! The assembled analysis report.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::indicator::TickerData;
use crate::domain::opportunity::Opportunities;
use crate::domain::performance::PerformanceSection;
use crate::domain::portfolio::{PortfolioSummary, StopLossAlert};
use crate::domain::sector::SectorAnalysis;
use crate::domain::sentiment::MarketSentiment;

/// Position and cash limits the decision should respect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingConstraints {
    pub max_cash_per_trade: f64,
    pub max_positions: usize,
    pub current_positions: usize,
    pub available_cash: f64,
}

/// Immutable snapshot of one analysis run. This is the sole input to the
/// prompt compiler and the only shape promised to downstream consumers
/// (serialized as a nested JSON mapping).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub timestamp: NaiveDateTime,
    pub portfolio: PortfolioSummary,
    pub market_data: BTreeMap<String, TickerData>,
    pub performance: PerformanceSection,
    pub stop_loss_alerts: Vec<StopLossAlert>,
    pub market_sentiment: MarketSentiment,
    pub sector_analysis: SectorAnalysis,
    pub trading_constraints: TradingConstraints,
    pub opportunities: Opportunities,
}

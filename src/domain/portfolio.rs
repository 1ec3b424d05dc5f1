//! Portfolio valuation against current prices.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::decision::Urgency;
use crate::domain::indicator::TickerIndicators;
use crate::domain::position::Position;
use crate::domain::signals::PositionSignals;

/// Fixed starting balance for a portfolio with no ledger yet.
pub const FRESH_START_CASH: f64 = 100.0;

/// A position combined with its current price. Derived fresh on every
/// analysis run, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuedPosition {
    pub ticker: String,
    pub shares: f64,
    pub buy_price: f64,
    pub cost_basis: f64,
    pub stop_loss: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_analysis: Option<TickerIndicators>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_signals: Option<PositionSignals>,
}

/// The valued portfolio: positions plus aggregate cash/equity/P&L.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub positions: Vec<ValuedPosition>,
    pub cash_balance: f64,
    pub total_equity: f64,
    pub total_pnl: f64,
    pub positions_count: usize,
}

/// A stop-loss breach on a held position, surfaced as an urgent sell
/// recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopLossAlert {
    pub ticker: String,
    pub shares: f64,
    pub current_price: f64,
    pub stop_loss: f64,
    pub reason: String,
    pub urgency: Urgency,
}

impl PortfolioSummary {
    /// Deterministic state for a portfolio with no ledger: the documented
    /// fixed starting balance, zero positions, zero P&L.
    pub fn fresh() -> Self {
        PortfolioSummary {
            positions: Vec::new(),
            cash_balance: FRESH_START_CASH,
            total_equity: FRESH_START_CASH,
            total_pnl: 0.0,
            positions_count: 0,
        }
    }

    /// Value every position at its looked-up price. A ticker without a price
    /// (failed fetch) values at 0 rather than failing the run.
    pub fn value(positions: &[Position], cash: f64, prices: &HashMap<String, f64>) -> Self {
        let valued: Vec<ValuedPosition> = positions
            .iter()
            .map(|pos| {
                let price = prices.get(&pos.ticker).copied().unwrap_or(0.0);
                ValuedPosition {
                    ticker: pos.ticker.clone(),
                    shares: pos.shares,
                    buy_price: pos.buy_price,
                    cost_basis: pos.cost_basis,
                    stop_loss: pos.stop_loss,
                    current_price: price,
                    current_value: pos.market_value(price),
                    pnl: pos.unrealized_pnl(price),
                    pnl_percent: pos.pnl_percent(price),
                    technical_analysis: None,
                    trading_signals: None,
                }
            })
            .collect();

        let total_value: f64 = valued.iter().map(|p| p.current_value).sum();
        let total_pnl: f64 = valued.iter().map(|p| p.pnl).sum();
        let positions_count = valued.len();

        PortfolioSummary {
            positions: valued,
            cash_balance: cash,
            total_equity: cash + total_value,
            total_pnl,
            positions_count,
        }
    }

    /// Pure stop-loss sweep over the valued positions; re-run on every
    /// valuation. A triggered stop emits exactly one high-urgency alert.
    pub fn stop_loss_alerts(&self) -> Vec<StopLossAlert> {
        self.positions
            .iter()
            .filter(|pos| pos.stop_loss > 0.0 && pos.current_price <= pos.stop_loss)
            .map(|pos| StopLossAlert {
                ticker: pos.ticker.clone(),
                shares: pos.shares,
                current_price: pos.current_price,
                stop_loss: pos.stop_loss,
                reason: "stop_loss_triggered".to_string(),
                urgency: Urgency::High,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position(ticker: &str, shares: f64, buy_price: f64, stop_loss: f64) -> Position {
        Position {
            ticker: ticker.to_string(),
            shares,
            buy_price,
            cost_basis: shares * buy_price,
            stop_loss,
        }
    }

    fn price_map(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(t, p)| (t.to_string(), *p))
            .collect()
    }

    #[test]
    fn fresh_portfolio_has_fixed_starting_balance() {
        let summary = PortfolioSummary::fresh();
        assert!((summary.cash_balance - 100.0).abs() < f64::EPSILON);
        assert!((summary.total_equity - 100.0).abs() < f64::EPSILON);
        assert!((summary.total_pnl - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.positions_count, 0);
        assert!(summary.positions.is_empty());
    }

    #[test]
    fn valuation_aggregates_positions_and_cash() {
        let positions = vec![
            sample_position("AAAA", 10.0, 5.0, 0.0),
            sample_position("BBBB", 20.0, 2.0, 0.0),
        ];
        let prices = price_map(&[("AAAA", 6.0), ("BBBB", 1.5)]);
        let summary = PortfolioSummary::value(&positions, 50.0, &prices);

        // AAAA: value 60, pnl +10; BBBB: value 30, pnl -10.
        assert!((summary.total_equity - 140.0).abs() < 1e-9);
        assert!((summary.total_pnl - 0.0).abs() < 1e-9);
        assert_eq!(summary.positions_count, 2);
        assert!((summary.positions[0].pnl_percent - 20.0).abs() < 1e-9);
    }

    #[test]
    fn missing_price_values_at_zero() {
        let positions = vec![sample_position("GONE", 10.0, 5.0, 0.0)];
        let summary = PortfolioSummary::value(&positions, 100.0, &HashMap::new());

        assert!((summary.positions[0].current_value - 0.0).abs() < f64::EPSILON);
        assert!((summary.positions[0].pnl - (-50.0)).abs() < 1e-9);
        assert!((summary.total_equity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stop_loss_triggers_exactly_one_alert() {
        let positions = vec![sample_position("ABCD", 10.0, 50.0, 40.0)];
        let prices = price_map(&[("ABCD", 39.99)]);
        let summary = PortfolioSummary::value(&positions, 0.0, &prices);

        let alerts = summary.stop_loss_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].ticker, "ABCD");
        assert_eq!(alerts[0].urgency, Urgency::High);
        assert_eq!(alerts[0].reason, "stop_loss_triggered");
    }

    #[test]
    fn stop_loss_not_triggered_above_stop() {
        let positions = vec![sample_position("ABCD", 10.0, 50.0, 40.0)];
        let prices = price_map(&[("ABCD", 40.01)]);
        let summary = PortfolioSummary::value(&positions, 0.0, &prices);

        assert!(summary.stop_loss_alerts().is_empty());
    }

    #[test]
    fn stop_loss_sweep_is_repeatable() {
        let positions = vec![sample_position("ABCD", 10.0, 50.0, 40.0)];
        let prices = price_map(&[("ABCD", 35.0)]);
        let summary = PortfolioSummary::value(&positions, 0.0, &prices);

        assert_eq!(summary.stop_loss_alerts().len(), 1);
        assert_eq!(summary.stop_loss_alerts().len(), 1);
    }
}

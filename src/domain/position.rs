//! Portfolio positions as recorded in the ledger.

use serde::Serialize;

/// A held position, read from the portfolio ledger. The ledger writer owns
/// mutation; analysis treats positions as read-only input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub ticker: String,
    pub shares: f64,
    pub buy_price: f64,
    pub cost_basis: f64,
    pub stop_loss: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        price * self.shares
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        (price - self.buy_price) * self.shares
    }

    /// P&L as a percentage of cost basis; 0 when there is no cost basis.
    pub fn pnl_percent(&self, price: f64) -> f64 {
        if self.cost_basis > 0.0 {
            self.unrealized_pnl(price) / self.cost_basis * 100.0
        } else {
            0.0
        }
    }

    /// A stop of 0 means no stop is set.
    pub fn stop_loss_triggered(&self, price: f64) -> bool {
        self.stop_loss > 0.0 && price <= self.stop_loss
    }
}

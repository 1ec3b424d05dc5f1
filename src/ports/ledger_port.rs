//! Portfolio ledger access port trait.
//!
//! The ledger is owned by an external writer; this side only reads.

use crate::domain::error::AdvisorError;
use crate::domain::performance::EquityPoint;
use crate::domain::position::Position;

/// The most recent ledger state: open positions and the cash balance.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub positions: Vec<Position>,
    pub cash: f64,
}

pub trait LedgerPort {
    /// Latest positions and cash. `None` when no ledger exists yet — the
    /// caller starts from the fresh-portfolio state.
    fn load_latest(&self) -> Result<Option<LedgerSnapshot>, AdvisorError>;

    /// Total-equity history in date order, for performance statistics.
    fn equity_history(&self) -> Result<Vec<EquityPoint>, AdvisorError>;
}

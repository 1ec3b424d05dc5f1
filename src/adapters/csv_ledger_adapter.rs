//! CSV portfolio ledger adapter.
//!
//! The ledger is an append-style CSV owned by the trade executor: one row per
//! position per day, plus a `TOTAL` row per day carrying the aggregate equity
//! and cash balance. This adapter reads the latest day's snapshot and the
//! full equity history; it never writes.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::error::AdvisorError;
use crate::domain::performance::EquityPoint;
use crate::domain::position::Position;
use crate::ports::ledger_port::{LedgerPort, LedgerSnapshot};

const TOTAL_MARKER: &str = "TOTAL";

pub struct CsvLedgerAdapter {
    path: PathBuf,
}

/// One ledger line. Numeric fields are optional because `TOTAL` rows leave
/// the per-position columns empty and vice versa.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    date: String,
    ticker: String,
    #[serde(default)]
    shares: Option<f64>,
    #[serde(default)]
    buy_price: Option<f64>,
    #[serde(default)]
    cost_basis: Option<f64>,
    #[serde(default)]
    stop_loss: Option<f64>,
    #[serde(default)]
    cash_balance: Option<f64>,
    #[serde(default)]
    total_equity: Option<f64>,
}

impl CsvLedgerAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_rows(&self) -> Result<Vec<(NaiveDate, LedgerRow)>, AdvisorError> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| AdvisorError::Ledger {
                reason: format!("failed to open {}: {}", self.path.display(), e),
            })?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<LedgerRow>() {
            let row = result.map_err(|e| AdvisorError::Ledger {
                reason: format!("malformed row in {}: {}", self.path.display(), e),
            })?;
            let date =
                NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                    AdvisorError::Ledger {
                        reason: format!("invalid date '{}': {}", row.date, e),
                    }
                })?;
            rows.push((date, row));
        }
        Ok(rows)
    }
}

impl LedgerPort for CsvLedgerAdapter {
    fn load_latest(&self) -> Result<Option<LedgerSnapshot>, AdvisorError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let rows = self.read_rows()?;
        let Some(latest) = rows.iter().map(|(date, _)| *date).max() else {
            return Ok(None);
        };

        let mut positions = Vec::new();
        let mut cash = 0.0;
        for (date, row) in &rows {
            if *date != latest {
                continue;
            }
            if row.ticker == TOTAL_MARKER {
                cash = row.cash_balance.unwrap_or(0.0);
            } else {
                positions.push(Position {
                    ticker: row.ticker.to_uppercase(),
                    shares: row.shares.unwrap_or(0.0),
                    buy_price: row.buy_price.unwrap_or(0.0),
                    cost_basis: row.cost_basis.unwrap_or(0.0),
                    stop_loss: row.stop_loss.unwrap_or(0.0),
                });
            }
        }

        Ok(Some(LedgerSnapshot { positions, cash }))
    }

    fn equity_history(&self) -> Result<Vec<EquityPoint>, AdvisorError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut history: Vec<EquityPoint> = self
            .read_rows()?
            .into_iter()
            .filter(|(_, row)| row.ticker == TOTAL_MARKER)
            .filter_map(|(date, row)| {
                row.total_equity.map(|equity| EquityPoint { date, equity })
            })
            .collect();

        history.sort_by_key(|point| point.date);
        Ok(history)
    }
}

//! Market data access port trait.

use chrono::NaiveDate;

use crate::domain::error::AdvisorError;
use crate::domain::price_bar::PriceBar;

pub trait MarketDataPort {
    /// Daily bars for `ticker` over `[start, end]`, ordered by date
    /// ascending. An empty vec is a valid "no data" answer, not an error.
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, AdvisorError>;
}

//! Builds the full analysis report from the data ports.
//!
//! One synchronous pass per run: fetch bars per ticker, reduce to indicator
//! snapshots, value the portfolio, then derive the qualitative sections.
//! A failed ticker or a missing history degrades its own section only; the
//! report itself always comes back structurally complete. Callers are
//! responsible for not running two analyses against the same ledger at once.

use chrono::{Duration, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::warn;

use crate::domain::config::AdvisorConfig;
use crate::domain::indicator::{TickerData, snapshot};
use crate::domain::opportunity;
use crate::domain::performance::{PerformanceSection, PerformanceStats};
use crate::domain::portfolio::PortfolioSummary;
use crate::domain::report::{AnalysisReport, TradingConstraints};
use crate::domain::sector;
use crate::domain::sentiment;
use crate::domain::signals;
use crate::ports::ledger_port::{LedgerPort, LedgerSnapshot};
use crate::ports::market_data_port::MarketDataPort;

/// History window fetched per ticker; enough for the 50-day average.
const ANALYSIS_WINDOW_DAYS: i64 = 60;

pub struct Analyzer<'a> {
    market: &'a dyn MarketDataPort,
    ledger: &'a dyn LedgerPort,
    config: &'a AdvisorConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        market: &'a dyn MarketDataPort,
        ledger: &'a dyn LedgerPort,
        config: &'a AdvisorConfig,
    ) -> Self {
        Analyzer {
            market,
            ledger,
            config,
        }
    }

    pub fn build_report(&self, as_of: NaiveDateTime) -> AnalysisReport {
        let ledger = self.load_ledger();

        let market_data = self.fetch_market_data(&ledger, as_of);

        let prices: HashMap<String, f64> = market_data
            .iter()
            .filter_map(|(ticker, data)| data.indicators().map(|ind| (ticker.clone(), ind.price)))
            .collect();

        let mut portfolio = PortfolioSummary::value(&ledger.positions, ledger.cash, &prices);
        for pos in portfolio.positions.iter_mut() {
            if let Some(ind) = market_data.get(&pos.ticker).and_then(TickerData::indicators) {
                pos.trading_signals = Some(signals::position_signals(pos.pnl_percent, ind));
                pos.technical_analysis = Some(ind.clone());
            }
        }

        let stop_loss_alerts = portfolio.stop_loss_alerts();

        let market_sentiment = sentiment::analyze_sentiment(
            &market_data,
            &self.config.market.index_tickers,
            &self.config.market.volatility_ticker,
        );

        let held: HashSet<String> = portfolio
            .positions
            .iter()
            .map(|p| p.ticker.clone())
            .collect();
        let excluded: HashSet<String> =
            self.config.market.benchmark_tickers().into_iter().collect();
        let opportunities = opportunity::identify_opportunities(
            &market_data,
            &held,
            &excluded,
            &self.config.market.volatility_ticker,
        );

        let sector_analysis = sector::analyze_sectors(&portfolio.positions);
        let performance = self.performance_section();

        let trading_constraints = TradingConstraints {
            max_cash_per_trade: self.config.trading.max_cash_per_trade,
            max_positions: self.config.trading.max_positions,
            current_positions: portfolio.positions_count,
            available_cash: portfolio.cash_balance,
        };

        AnalysisReport {
            timestamp: as_of,
            portfolio,
            market_data,
            performance,
            stop_loss_alerts,
            market_sentiment,
            sector_analysis,
            trading_constraints,
            opportunities,
        }
    }

    /// A missing ledger is the documented fresh start; a broken one is
    /// logged and treated the same way rather than failing the run.
    fn load_ledger(&self) -> LedgerSnapshot {
        match self.ledger.load_latest() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => LedgerSnapshot {
                positions: Vec::new(),
                cash: crate::domain::portfolio::FRESH_START_CASH,
            },
            Err(err) => {
                warn!(error = %err, "ledger unreadable, starting from fresh state");
                LedgerSnapshot {
                    positions: Vec::new(),
                    cash: crate::domain::portfolio::FRESH_START_CASH,
                }
            }
        }
    }

    /// Fetch and reduce every ticker in the universe. Errors and empty
    /// series become per-ticker markers; the loop keeps going.
    fn fetch_market_data(
        &self,
        ledger: &LedgerSnapshot,
        as_of: NaiveDateTime,
    ) -> BTreeMap<String, TickerData> {
        let mut tickers: BTreeSet<String> = self
            .config
            .market
            .benchmark_tickers()
            .into_iter()
            .collect();
        tickers.extend(self.config.market.watchlist.iter().cloned());
        tickers.extend(ledger.positions.iter().map(|p| p.ticker.clone()));

        let end = as_of.date() + Duration::days(1);
        let start = end - Duration::days(ANALYSIS_WINDOW_DAYS);

        let mut market_data = BTreeMap::new();
        for ticker in tickers {
            let data = match self.market.fetch_daily(&ticker, start, end) {
                Ok(bars) => match snapshot::compute_snapshot(&bars) {
                    Some(ind) => TickerData::Indicators(ind),
                    None => {
                        warn!(%ticker, "no price data in window");
                        TickerData::Error {
                            error: "no price data".to_string(),
                        }
                    }
                },
                Err(err) => {
                    warn!(%ticker, error = %err, "market data fetch failed");
                    TickerData::Error {
                        error: err.to_string(),
                    }
                }
            };
            market_data.insert(ticker, data);
        }
        market_data
    }

    fn performance_section(&self) -> PerformanceSection {
        let history = match self.ledger.equity_history() {
            Ok(history) => history,
            Err(err) => {
                warn!(error = %err, "equity history unavailable");
                return PerformanceSection::Error {
                    error: err.to_string(),
                };
            }
        };
        match PerformanceStats::compute(&history) {
            Some(stats) => PerformanceSection::Stats(stats),
            None => PerformanceSection::Error {
                error: "No performance data available".to_string(),
            },
        }
    }
}

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;

use capadvisor::domain::config::{
    AdvisorConfig, DataConfig, MarketConfig, ModelConfig, TradingConfig,
};
use capadvisor::domain::error::AdvisorError;
use capadvisor::domain::performance::EquityPoint;
use capadvisor::domain::position::Position;
pub use capadvisor::domain::price_bar::PriceBar;
use capadvisor::ports::ledger_port::{LedgerPort, LedgerSnapshot};
use capadvisor::ports::market_data_port::MarketDataPort;
use capadvisor::ports::model_port::ModelPort;

pub struct MockMarketDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_daily(
        &self,
        ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PriceBar>, AdvisorError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(AdvisorError::MarketData {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub struct MockLedgerPort {
    pub snapshot: Option<LedgerSnapshot>,
    pub history: Vec<EquityPoint>,
}

impl MockLedgerPort {
    pub fn empty() -> Self {
        Self {
            snapshot: None,
            history: Vec::new(),
        }
    }

    pub fn with_positions(positions: Vec<Position>, cash: f64) -> Self {
        Self {
            snapshot: Some(LedgerSnapshot { positions, cash }),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, equities: &[f64]) -> Self {
        self.history = equities
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: date(2025, 7, 1) + chrono::Duration::days(i as i64),
                equity,
            })
            .collect();
        self
    }
}

impl LedgerPort for MockLedgerPort {
    fn load_latest(&self) -> Result<Option<LedgerSnapshot>, AdvisorError> {
        Ok(self.snapshot.clone())
    }

    fn equity_history(&self) -> Result<Vec<EquityPoint>, AdvisorError> {
        Ok(self.history.clone())
    }
}

/// Canned model that records every prompt pair it is handed.
pub struct MockModelPort {
    pub reply: Result<String, String>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl MockModelPort {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ModelPort for MockModelPort {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisorError> {
        self.calls
            .borrow_mut()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.reply
            .clone()
            .map_err(|reason| AdvisorError::Model { reason })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn as_of() -> NaiveDateTime {
    date(2025, 8, 1).and_hms_opt(19, 0, 0).unwrap()
}

pub fn make_bar(ticker: &str, day: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        ticker: ticker.to_string(),
        date: day,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

/// `count` daily bars ending near `as_of`, stepping the close by `step`.
pub fn generate_bars(ticker: &str, count: usize, start_price: f64, step: f64) -> Vec<PriceBar> {
    let start = date(2025, 6, 1);
    (0..count)
        .map(|i| {
            make_bar(
                ticker,
                start + chrono::Duration::days(i as i64),
                start_price + step * i as f64,
            )
        })
        .collect()
}

pub fn sample_config() -> AdvisorConfig {
    AdvisorConfig {
        model: ModelConfig {
            api_key: "sk-test".into(),
            model: "gpt-4o".into(),
            temperature: 0.7,
            base_url: "https://api.openai.com/v1".into(),
        },
        trading: TradingConfig {
            max_cash_per_trade: 1000.0,
            max_positions: 10,
        },
        data: DataConfig {
            portfolio_csv: "portfolio.csv".into(),
        },
        market: MarketConfig {
            index_tickers: vec!["SPY".into(), "QQQ".into(), "IWM".into()],
            volatility_ticker: "VIX".into(),
            watchlist: vec!["EFGH".into()],
        },
    }
}

pub fn sample_position(ticker: &str, shares: f64, buy_price: f64, stop_loss: f64) -> Position {
    Position {
        ticker: ticker.to_string(),
        shares,
        buy_price,
        cost_basis: shares * buy_price,
        stop_loss,
    }
}

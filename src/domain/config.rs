//! Typed configuration assembled from the config port.
//!
//! Every component takes its configuration as an explicit value; nothing in
//! the domain reads ambient global state.

use std::path::PathBuf;

use crate::domain::error::AdvisorError;
use crate::ports::config_port::ConfigPort;

/// Language model connection settings, `[openai]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub base_url: String,
}

/// Trading limits, `[trading]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingConfig {
    pub max_cash_per_trade: f64,
    pub max_positions: usize,
}

/// File locations, `[data]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub portfolio_csv: PathBuf,
}

/// Ticker universe, `[market]` section. The watchlist holds the non-held
/// candidates scanned for opportunities.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub index_tickers: Vec<String>,
    pub volatility_ticker: String,
    pub watchlist: Vec<String>,
}

impl MarketConfig {
    /// Indices plus the volatility gauge: always fetched, never treated as
    /// buy candidates.
    pub fn benchmark_tickers(&self) -> Vec<String> {
        let mut tickers = self.index_tickers.clone();
        tickers.push(self.volatility_ticker.clone());
        tickers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub model: ModelConfig,
    pub trading: TradingConfig,
    pub data: DataConfig,
    pub market: MarketConfig,
}

impl AdvisorConfig {
    /// Read the full configuration, falling back to documented defaults for
    /// anything unset.
    pub fn from_port(config: &dyn ConfigPort) -> Self {
        let model = ModelConfig {
            api_key: config.get_string("openai", "api_key").unwrap_or_default(),
            model: config
                .get_string("openai", "model")
                .unwrap_or_else(|| "gpt-4o".to_string()),
            temperature: config.get_double("openai", "temperature", 0.7),
            base_url: config
                .get_string("openai", "base_url")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        };

        let trading = TradingConfig {
            max_cash_per_trade: config.get_double("trading", "max_cash_per_trade", 1000.0),
            max_positions: config.get_int("trading", "max_positions", 10).max(0) as usize,
        };

        let data = DataConfig {
            portfolio_csv: PathBuf::from(
                config
                    .get_string("data", "portfolio_csv")
                    .unwrap_or_else(|| "portfolio.csv".to_string()),
            ),
        };

        let market = MarketConfig {
            index_tickers: ticker_list(
                config.get_string("market", "index_tickers"),
                &["SPY", "QQQ", "IWM"],
            ),
            volatility_ticker: config
                .get_string("market", "volatility_ticker")
                .unwrap_or_else(|| "VIX".to_string())
                .to_uppercase(),
            watchlist: ticker_list(config.get_string("market", "watchlist"), &[]),
        };

        AdvisorConfig {
            model,
            trading,
            data,
            market,
        }
    }

    /// Checks that only matter for a live model call.
    pub fn validate_for_decide(&self) -> Result<(), AdvisorError> {
        if self.model.api_key.trim().is_empty() {
            return Err(AdvisorError::ConfigMissing {
                section: "openai".into(),
                key: "api_key".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(AdvisorError::ConfigInvalid {
                section: "openai".into(),
                key: "temperature".into(),
                reason: format!("{} is outside 0..=2", self.model.temperature),
            });
        }
        Ok(())
    }

    /// Soft checks: suspicious values are reported, not fatal.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.trading.max_cash_per_trade <= 0.0 {
            warnings.push("max cash per trade should be positive".to_string());
        }
        if self.trading.max_positions == 0 {
            warnings.push("max positions should be positive".to_string());
        }
        if !self.data.portfolio_csv.exists() {
            warnings.push(format!(
                "portfolio ledger not found: {} (starting fresh)",
                self.data.portfolio_csv.display()
            ));
        }
        warnings
    }
}

fn ticker_list(raw: Option<String>, defaults: &[&str]) -> Vec<String> {
    match raw {
        Some(value) => value
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect(),
        None => defaults.iter().map(|t| t.to_string()).collect(),
    }
}

//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AdvisorConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[openai]
api_key = sk-test
model = gpt-4o
temperature = 0.4

[trading]
max_cash_per_trade = 500
max_positions = 8

[data]
portfolio_csv = ledger/portfolio.csv

[market]
index_tickers = SPY,QQQ,IWM
volatility_ticker = VIX
watchlist = ABCD,EFGH
"#;

    #[test]
    fn reads_strings_ints_and_doubles() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();

        assert_eq!(
            adapter.get_string("openai", "api_key"),
            Some("sk-test".to_string())
        );
        assert_eq!(adapter.get_int("trading", "max_positions", 0), 8);
        assert_eq!(
            adapter.get_double("openai", "temperature", 0.7),
            0.4
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[openai]\n").unwrap();

        assert_eq!(adapter.get_string("openai", "api_key"), None);
        assert_eq!(adapter.get_int("trading", "max_positions", 10), 10);
        assert_eq!(adapter.get_double("openai", "temperature", 0.7), 0.7);
        assert!(adapter.get_bool("trading", "missing", true));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[trading]\nmax_positions = many\n").unwrap();
        assert_eq!(adapter.get_int("trading", "max_positions", 10), 10);
    }

    #[test]
    fn bool_variants() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = yes\nb = 0\nc = maybe\n").unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(!adapter.get_bool("x", "b", true));
        assert!(adapter.get_bool("x", "c", true));
    }

    #[test]
    fn loads_typed_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        let config = AdvisorConfig::from_port(&adapter);

        assert_eq!(config.model.api_key, "sk-test");
        assert!((config.trading.max_cash_per_trade - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.market.watchlist, vec!["ABCD", "EFGH"]);
        assert_eq!(
            config.data.portfolio_csv,
            std::path::PathBuf::from("ledger/portfolio.csv")
        );
    }

    #[test]
    fn from_file_errors_on_missing_path() {
        assert!(FileConfigAdapter::from_file("/nonexistent/capadvisor.ini").is_err());
    }
}

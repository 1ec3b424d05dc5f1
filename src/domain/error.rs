//! Domain error types.

/// Top-level error type for capadvisor.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("ledger error: {reason}")]
    Ledger { reason: String },

    #[error("market data error for {ticker}: {reason}")]
    MarketData { ticker: String, reason: String },

    #[error("model error: {reason}")]
    Model { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AdvisorError> for std::process::ExitCode {
    fn from(err: &AdvisorError) -> Self {
        let code: u8 = match err {
            AdvisorError::Io(_) => 1,
            AdvisorError::ConfigParse { .. }
            | AdvisorError::ConfigMissing { .. }
            | AdvisorError::ConfigInvalid { .. } => 2,
            AdvisorError::Ledger { .. } => 3,
            AdvisorError::MarketData { .. } => 4,
            AdvisorError::Model { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

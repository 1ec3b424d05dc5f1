//! One decision run: report -> prompt -> model -> parsed decisions.

use serde::Serialize;
use tracing::error;

use chrono::NaiveDateTime;

use crate::domain::decision::TradingDecision;
use crate::domain::decision_parser::parse_decisions;
use crate::domain::prompt::{SYSTEM_PROMPT, compile_prompt};
use crate::domain::report::AnalysisReport;
use crate::ports::model_port::ModelPort;

/// Result of one decision run. A model failure yields `error` plus an empty
/// decision list; a reply that reaches the parser always yields at least one
/// decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutcome {
    pub timestamp: NaiveDateTime,
    pub model: String,
    pub decisions: Vec<TradingDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn advise(
    report: &AnalysisReport,
    model: &dyn ModelPort,
    model_name: &str,
    benchmark_tickers: &[String],
) -> DecisionOutcome {
    let prompt = compile_prompt(report, benchmark_tickers);

    match model.generate(SYSTEM_PROMPT, &prompt) {
        Ok(reply) => DecisionOutcome {
            timestamp: report.timestamp,
            model: model_name.to_string(),
            decisions: parse_decisions(&reply),
            raw_response: Some(reply),
            error: None,
        },
        Err(err) => {
            error!(error = %err, "model call failed");
            DecisionOutcome {
                timestamp: report.timestamp,
                model: model_name.to_string(),
                decisions: Vec::new(),
                raw_response: None,
                error: Some(err.to_string()),
            }
        }
    }
}

//! Typed trading decisions produced by the decision parser.

use serde::{Serialize, Serializer};
use std::fmt;

/// Share quantity on a decision: an exact count or the "all" sentinel the
/// model may use when closing a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shares {
    Count(f64),
    All,
}

impl Serialize for Shares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Shares::Count(n) => serializer.serialize_f64(*n),
            Shares::All => serializer.serialize_str("all"),
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shares::Count(n) => write!(f, "{n}"),
            Shares::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conviction {
    High,
    Medium,
    Low,
}

impl Conviction {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().as_str() {
            "HIGH" => Some(Conviction::High),
            "MEDIUM" => Some(Conviction::Medium),
            "LOW" => Some(Conviction::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().as_str() {
            "HIGH" => Some(Urgency::High),
            "MEDIUM" => Some(Urgency::Medium),
            "LOW" => Some(Urgency::Low),
            _ => None,
        }
    }
}

/// A validated trading decision. Buys and sells always carry a ticker; a
/// hold may be portfolio-wide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TradingDecision {
    Buy {
        ticker: String,
        shares: Shares,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_price: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stop_loss: Option<f64>,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        conviction: Option<Conviction>,
    },
    Sell {
        ticker: String,
        shares: Shares,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_price: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stop_loss: Option<f64>,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        urgency: Option<Urgency>,
    },
    Hold {
        #[serde(skip_serializing_if = "Option::is_none")]
        ticker: Option<String>,
        reason: String,
    },
}

impl TradingDecision {
    pub fn ticker(&self) -> Option<&str> {
        match self {
            TradingDecision::Buy { ticker, .. } | TradingDecision::Sell { ticker, .. } => {
                Some(ticker)
            }
            TradingDecision::Hold { ticker, .. } => ticker.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_serialize_as_number_or_sentinel() {
        assert_eq!(
            serde_json::to_value(Shares::Count(10.0)).unwrap(),
            serde_json::json!(10.0)
        );
        assert_eq!(
            serde_json::to_value(Shares::All).unwrap(),
            serde_json::json!("all")
        );
    }

    #[test]
    fn conviction_parses_case_insensitively() {
        assert_eq!(Conviction::parse("high"), Some(Conviction::High));
        assert_eq!(Conviction::parse(" MEDIUM "), Some(Conviction::Medium));
        assert_eq!(Conviction::parse("extreme"), None);
    }

    #[test]
    fn decision_serializes_with_action_tag() {
        let decision = TradingDecision::Buy {
            ticker: "ABCD".into(),
            shares: Shares::Count(10.0),
            target_price: Some(5.25),
            stop_loss: None,
            reason: "test".into(),
            conviction: Some(Conviction::High),
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["action"], "buy");
        assert_eq!(json["ticker"], "ABCD");
        assert_eq!(json["shares"], 10.0);
        assert_eq!(json["conviction"], "high");
        assert!(json.get("stop_loss").is_none());
    }

    #[test]
    fn hold_without_ticker() {
        let decision = TradingDecision::Hold {
            ticker: None,
            reason: "wait".into(),
        };
        assert_eq!(decision.ticker(), None);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["action"], "hold");
        assert!(json.get("ticker").is_none());
    }
}

//! Parses the model's free-text reply into typed trading decisions.
//!
//! Three tiers: the structured ACTION-block grammar, then a regex sweep for
//! natural-language buy/sell phrases, then a single default hold. The parser
//! never returns an empty list, and a malformed block drops alone without
//! taking the batch with it.

use regex::Regex;
use tracing::warn;

use crate::domain::decision::{Conviction, Shares, TradingDecision, Urgency};

const EXTRACTED_REASON: &str = "Extracted from AI text response";
const NO_SIGNAL_REASON: &str = "No clear trading signals identified in response";
const DEFAULT_BUY_SHARES: f64 = 100.0;

pub fn parse_decisions(response: &str) -> Vec<TradingDecision> {
    let decisions = parse_structured(response);
    if !decisions.is_empty() {
        return decisions;
    }

    let decisions = extract_from_text(response);
    if !decisions.is_empty() {
        return decisions;
    }

    vec![TradingDecision::Hold {
        ticker: None,
        reason: NO_SIGNAL_REASON.to_string(),
    }]
}

/// One ACTION block's fields before validation.
#[derive(Default)]
struct DecisionDraft {
    action: Option<String>,
    ticker: Option<String>,
    shares: Option<Shares>,
    target_price: Option<f64>,
    stop_loss: Option<f64>,
    reason: Option<String>,
    conviction: Option<Conviction>,
    urgency: Option<Urgency>,
}

impl DecisionDraft {
    fn validate(self) -> Option<TradingDecision> {
        let action = self.action?;
        match action.as_str() {
            "buy" => {
                let Some(ticker) = self.ticker.filter(|t| !t.is_empty()) else {
                    warn!("dropping buy decision without ticker");
                    return None;
                };
                Some(TradingDecision::Buy {
                    ticker,
                    shares: self.shares.unwrap_or(Shares::Count(0.0)),
                    target_price: self.target_price,
                    stop_loss: self.stop_loss,
                    reason: self.reason.unwrap_or_default(),
                    conviction: self.conviction,
                })
            }
            "sell" => {
                let Some(ticker) = self.ticker.filter(|t| !t.is_empty()) else {
                    warn!("dropping sell decision without ticker");
                    return None;
                };
                Some(TradingDecision::Sell {
                    ticker,
                    shares: self.shares.unwrap_or(Shares::Count(0.0)),
                    target_price: self.target_price,
                    stop_loss: self.stop_loss,
                    reason: self.reason.unwrap_or_default(),
                    urgency: self.urgency,
                })
            }
            "hold" => Some(TradingDecision::Hold {
                ticker: self.ticker.filter(|t| !t.is_empty()),
                reason: self.reason.unwrap_or_default(),
            }),
            other => {
                warn!(action = %other, "dropping decision with unknown action");
                None
            }
        }
    }
}

/// Tier 1: segment at lines that open with `ACTION:` and scan each segment
/// for the fixed key prefixes.
fn parse_structured(response: &str) -> Vec<TradingDecision> {
    let mut segments: Vec<Vec<&str>> = Vec::new();
    for line in response.lines() {
        if line.starts_with("ACTION:") {
            segments.push(vec![line]);
        } else if let Some(current) = segments.last_mut() {
            current.push(line);
        }
        // Preamble before the first ACTION line carries no decision.
    }

    segments
        .into_iter()
        .filter_map(|segment| parse_segment(&segment).validate())
        .collect()
}

fn parse_segment(lines: &[&str]) -> DecisionDraft {
    let mut draft = DecisionDraft::default();

    for raw in lines {
        let line = raw.trim();
        if let Some(value) = field(line, "ACTION:") {
            draft.action = Some(value.to_lowercase());
        } else if let Some(value) = field(line, "TICKER:") {
            draft.ticker = Some(value.to_uppercase());
        } else if let Some(value) = field(line, "SHARES:") {
            draft.shares = Some(parse_shares(value));
        } else if let Some(value) = field(line, "TARGET_PRICE:") {
            draft.target_price = Some(parse_price(value));
        } else if let Some(value) = field(line, "STOP_LOSS:") {
            draft.stop_loss = Some(parse_price(value));
        } else if let Some(value) = field(line, "REASON:") {
            draft.reason = Some(value.to_string());
        } else if let Some(value) = field(line, "CONVICTION:") {
            draft.conviction = Conviction::parse(value);
        } else if let Some(value) = field(line, "URGENCY:") {
            draft.urgency = Urgency::parse(value);
        }
    }

    draft
}

fn field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).map(str::trim)
}

fn parse_shares(value: &str) -> Shares {
    if value.eq_ignore_ascii_case("all") {
        return Shares::All;
    }
    match value.parse::<f64>() {
        Ok(count) => Shares::Count(count),
        Err(_) => {
            warn!(%value, "unparseable share count, defaulting to 0");
            Shares::Count(0.0)
        }
    }
}

/// Strips a leading currency symbol; an unparseable price becomes 0 and the
/// decision is still kept.
fn parse_price(value: &str) -> f64 {
    match value.replace('$', "").trim().parse::<f64>() {
        Ok(price) => price,
        Err(_) => {
            warn!(%value, "unparseable price, defaulting to 0");
            0.0
        }
    }
}

/// Tier 2: scan prose for buy/sell phrasing with an optional share count and
/// a 2-5 letter ticker.
fn extract_from_text(text: &str) -> Vec<TradingDecision> {
    let buy_pattern = Regex::new(r"(?i)(?:buy|purchase|add)\s+(\d+)?\s*(?:shares?\s+of\s+)?([A-Z]{2,5})\b")
        .expect("valid buy pattern");
    let sell_pattern = Regex::new(
        r"(?i)(?:sell|close|exit)\s+(?:all\s+)?(?:(\d+)\s+)?(?:shares?\s+of\s+)?([A-Z]{2,5})\b",
    )
    .expect("valid sell pattern");

    let mut decisions = Vec::new();

    for caps in buy_pattern.captures_iter(text) {
        let shares = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(Shares::Count)
            .unwrap_or(Shares::Count(DEFAULT_BUY_SHARES));
        decisions.push(TradingDecision::Buy {
            ticker: caps[2].to_uppercase(),
            shares,
            target_price: None,
            stop_loss: None,
            reason: EXTRACTED_REASON.to_string(),
            conviction: None,
        });
    }

    for caps in sell_pattern.captures_iter(text) {
        let shares = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(Shares::Count)
            .unwrap_or(Shares::All);
        decisions.push(TradingDecision::Sell {
            ticker: caps[2].to_uppercase(),
            shares,
            target_price: None,
            stop_loss: None,
            reason: EXTRACTED_REASON.to_string(),
            urgency: None,
        });
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_single_buy() {
        let text = "ACTION: BUY\nTICKER: ABCD\nSHARES: 10\nREASON: test";
        let decisions = parse_decisions(text);

        assert_eq!(
            decisions,
            vec![TradingDecision::Buy {
                ticker: "ABCD".into(),
                shares: Shares::Count(10.0),
                target_price: None,
                stop_loss: None,
                reason: "test".into(),
                conviction: None,
            }]
        );
    }

    #[test]
    fn buy_without_ticker_is_dropped() {
        let text = "ACTION: BUY\nSHARES: 5";
        // The malformed block is dropped; tier 3 supplies the default hold.
        let decisions = parse_decisions(text);
        assert_eq!(
            decisions,
            vec![TradingDecision::Hold {
                ticker: None,
                reason: NO_SIGNAL_REASON.into(),
            }]
        );
    }

    #[test]
    fn multiple_blocks_parse_independently() {
        let text = "Some analysis preamble.\n\
                    ACTION: BUY\nTICKER: aaaa\nSHARES: 50\nTARGET_PRICE: $4.20\nSTOP_LOSS: $3.50\nREASON: breakout\nCONVICTION: HIGH\n\
                    \n\
                    ACTION: SELL\nTICKER: BBBB\nSHARES: ALL\nREASON: stop hit\nURGENCY: high\n\
                    \n\
                    ACTION: HOLD\nTICKER: CCCC\nREASON: wait for earnings";
        let decisions = parse_decisions(text);

        assert_eq!(decisions.len(), 3);
        assert_eq!(
            decisions[0],
            TradingDecision::Buy {
                ticker: "AAAA".into(),
                shares: Shares::Count(50.0),
                target_price: Some(4.20),
                stop_loss: Some(3.50),
                reason: "breakout".into(),
                conviction: Some(Conviction::High),
            }
        );
        assert_eq!(
            decisions[1],
            TradingDecision::Sell {
                ticker: "BBBB".into(),
                shares: Shares::All,
                target_price: None,
                stop_loss: None,
                reason: "stop hit".into(),
                urgency: Some(Urgency::High),
            }
        );
        assert_eq!(
            decisions[2],
            TradingDecision::Hold {
                ticker: Some("CCCC".into()),
                reason: "wait for earnings".into(),
            }
        );
    }

    #[test]
    fn one_bad_block_does_not_abort_the_batch() {
        let text = "ACTION: BUY\nSHARES: 5\n\nACTION: HOLD\nREASON: stay put";
        let decisions = parse_decisions(text);
        assert_eq!(decisions.len(), 1);
        assert!(matches!(decisions[0], TradingDecision::Hold { .. }));
    }

    #[test]
    fn unparseable_numbers_default_to_zero() {
        let text = "ACTION: BUY\nTICKER: ABCD\nSHARES: ten\nTARGET_PRICE: cheap";
        let decisions = parse_decisions(text);

        assert_eq!(
            decisions,
            vec![TradingDecision::Buy {
                ticker: "ABCD".into(),
                shares: Shares::Count(0.0),
                target_price: Some(0.0),
                stop_loss: None,
                reason: String::new(),
                conviction: None,
            }]
        );
    }

    #[test]
    fn price_strips_currency_symbol() {
        let text = "ACTION: BUY\nTICKER: ABCD\nTARGET_PRICE: $12.50";
        let decisions = parse_decisions(text);
        match &decisions[0] {
            TradingDecision::Buy { target_price, .. } => {
                assert_eq!(*target_price, Some(12.50));
            }
            other => panic!("expected buy, got {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_dropped() {
        let text = "ACTION: SHORT\nTICKER: ABCD\nSHARES: 5";
        let decisions = parse_decisions(text);
        assert!(matches!(decisions[0], TradingDecision::Hold { .. }));
    }

    #[test]
    fn action_mentioned_mid_line_does_not_split_blocks() {
        // Only column-zero ACTION lines open a block; a mention inside a
        // reason stays part of that reason.
        let text = "ACTION: HOLD\nREASON: follow the ACTION: BUY plan from yesterday";
        let decisions = parse_decisions(text);
        assert_eq!(
            decisions,
            vec![TradingDecision::Hold {
                ticker: None,
                reason: "follow the ACTION: BUY plan from yesterday".into(),
            }]
        );
    }

    #[test]
    fn fallback_extracts_buy_with_default_shares() {
        let text = "After reviewing the data, I would buy ABCD at the open.";
        let decisions = parse_decisions(text);

        assert_eq!(
            decisions,
            vec![TradingDecision::Buy {
                ticker: "ABCD".into(),
                shares: Shares::Count(100.0),
                target_price: None,
                stop_loss: None,
                reason: EXTRACTED_REASON.into(),
                conviction: None,
            }]
        );
    }

    #[test]
    fn fallback_extracts_sell_all() {
        let text = "I recommend you sell all shares of WXYZ immediately.";
        let decisions = parse_decisions(text);

        assert_eq!(
            decisions,
            vec![TradingDecision::Sell {
                ticker: "WXYZ".into(),
                shares: Shares::All,
                target_price: None,
                stop_loss: None,
                reason: EXTRACTED_REASON.into(),
                urgency: None,
            }]
        );
    }

    #[test]
    fn fallback_reads_explicit_counts() {
        let text = "Purchase 250 shares of EFGH and exit 75 IJKL.";
        let decisions = parse_decisions(text);

        assert_eq!(decisions.len(), 2);
        assert_eq!(
            decisions[0],
            TradingDecision::Buy {
                ticker: "EFGH".into(),
                shares: Shares::Count(250.0),
                target_price: None,
                stop_loss: None,
                reason: EXTRACTED_REASON.into(),
                conviction: None,
            }
        );
        assert_eq!(
            decisions[1],
            TradingDecision::Sell {
                ticker: "IJKL".into(),
                shares: Shares::Count(75.0),
                target_price: None,
                stop_loss: None,
                reason: EXTRACTED_REASON.into(),
                urgency: None,
            }
        );
    }

    #[test]
    fn parser_never_returns_empty() {
        let decisions = parse_decisions("The market outlook remains unclear at this time.");
        assert_eq!(
            decisions,
            vec![TradingDecision::Hold {
                ticker: None,
                reason: NO_SIGNAL_REASON.into(),
            }]
        );

        assert_eq!(parse_decisions("").len(), 1);
    }
}

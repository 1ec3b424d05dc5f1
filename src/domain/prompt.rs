//! Compiles an analysis report into the model prompt.
//!
//! The compiler is a pure function of the report: same report, same text.
//! Section order is fixed, and the closing instruction block is a stored
//! constant — the decision parser's grammar is coupled to the output format
//! it requests, so the block must stay textually stable.

use crate::domain::performance::PerformanceSection;
use crate::domain::report::AnalysisReport;

/// Role and ground rules for the model, sent as the system message.
pub const SYSTEM_PROMPT: &str = "\
You are an expert quantitative trader and portfolio manager with deep research capabilities.
You manage a micro-cap stock portfolio with the goal of generating superior returns through data-driven analysis.

DEEP RESEARCH MANDATE:
- Conduct thorough fundamental analysis of all positions and potential investments
- Analyze financial metrics: P/E ratios, revenue growth, profit margins, debt levels
- Evaluate technical indicators: moving averages, RSI, volume trends, chart patterns
- Consider sector rotation, market cycles, and macroeconomic factors
- Research recent earnings, news, analyst upgrades/downgrades
- Assess competitive positioning and industry dynamics

TRADING RULES:
1. Focus on US micro-cap stocks (market cap < $300M) with growth potential
2. Set intelligent stop-losses based on technical support levels (typically 10-20% below entry)
3. Maximum 10 positions, diversified across sectors
4. Position sizing based on conviction level and risk (typically $500-2000 per trade)
5. Prioritize stocks with strong fundamentals and technical momentum
6. Cut losses quickly, scale into winners on strength

REQUIRED DECISION FORMAT:
You must provide specific, actionable trading decisions:

ACTION: BUY
TICKER: [STOCK_SYMBOL]
SHARES: [EXACT_NUMBER]
TARGET_PRICE: [SPECIFIC_ENTRY_PRICE]
STOP_LOSS: [SPECIFIC_STOP_PRICE]
REASON: [Detailed fundamental + technical analysis]
CONVICTION: [HIGH/MEDIUM/LOW]

ACTION: SELL
TICKER: [STOCK_SYMBOL]
SHARES: [EXACT_NUMBER or \"ALL\"]
TARGET_PRICE: [SPECIFIC_EXIT_PRICE]
REASON: [Detailed exit rationale]
URGENCY: [HIGH/MEDIUM/LOW]

ACTION: HOLD
TICKER: [STOCK_SYMBOL]
REASON: [Detailed hold rationale with price targets]

CRITICAL REQUIREMENTS:
- Provide specific dollar amounts and share quantities
- Include exact entry/exit prices based on technical analysis
- Give detailed reasoning combining fundamental and technical factors
- Consider portfolio balance and risk management
- Be decisive - weak signals should result in HOLD, not trades";

/// Static research-request tail of every prompt.
const DEEP_RESEARCH_REQUEST: &str = "\
=== DEEP RESEARCH ANALYSIS REQUEST ===
Conduct comprehensive analysis and provide specific trading recommendations:

1. FUNDAMENTAL ANALYSIS:
   - Analyze each current position's financial health
   - Review recent earnings, revenue growth, profitability
   - Assess competitive position and industry outlook
   - Consider valuation metrics (P/E, P/S, EV/EBITDA)

2. TECHNICAL ANALYSIS:
   - Evaluate price action, support/resistance levels
   - Analyze volume trends and momentum indicators
   - Identify chart patterns and trend direction
   - Set precise entry/exit prices based on technicals

3. PORTFOLIO OPTIMIZATION:
   - Assess sector diversification and concentration risk
   - Determine optimal position sizes based on conviction
   - Balance growth vs value opportunities
   - Consider correlation between holdings

4. MARKET CONTEXT:
   - Factor in current market cycle and sentiment
   - Consider sector rotation and macroeconomic trends
   - Evaluate relative strength vs benchmarks

PROVIDE SPECIFIC ACTIONABLE DECISIONS:
- Exact share quantities and dollar amounts
- Precise entry/exit target prices
- Specific stop-loss levels based on technical support
- Detailed reasoning combining fundamental + technical factors
- Clear conviction levels (HIGH/MEDIUM/LOW) for each decision

Remember: Be decisive with strong convictions, conservative with weak signals.";

/// Serialize the report into the user prompt.
pub fn compile_prompt(report: &AnalysisReport, benchmark_tickers: &[String]) -> String {
    let portfolio = &report.portfolio;
    let constraints = &report.trading_constraints;
    let mut lines: Vec<String> = vec![
        "=== PORTFOLIO ANALYSIS REQUEST ===".into(),
        format!("Date: {}", report.timestamp.format("%Y-%m-%d %H:%M")),
        String::new(),
        "=== CURRENT PORTFOLIO ===".into(),
        format!("Cash Balance: ${}", fmt_money(portfolio.cash_balance)),
        format!("Total Equity: ${}", fmt_money(portfolio.total_equity)),
        format!("Total P&L: ${}", fmt_money(portfolio.total_pnl)),
        format!(
            "Positions: {}/{}",
            portfolio.positions_count, constraints.max_positions
        ),
        String::new(),
    ];

    if !portfolio.positions.is_empty() {
        lines.push("=== CURRENT POSITIONS ===".into());
        for pos in &portfolio.positions {
            lines.push(format!(
                "{}: {} shares @ ${:.2} (Current: ${:.2}, P&L: {:+.1}%, Stop: ${:.2})",
                pos.ticker,
                pos.shares,
                pos.buy_price,
                pos.current_price,
                pos.pnl_percent,
                pos.stop_loss
            ));
        }
        lines.push(String::new());
    }

    if !report.stop_loss_alerts.is_empty() {
        lines.push("=== URGENT STOP LOSS ALERTS ===".into());
        for alert in &report.stop_loss_alerts {
            lines.push(format!(
                "SELL {}: Stop loss triggered at ${:.2} (Stop was ${:.2})",
                alert.ticker, alert.current_price, alert.stop_loss
            ));
        }
        lines.push(String::new());
    }

    lines.push("=== MARKET CONDITIONS ===".into());
    lines.push(format!(
        "Market Sentiment: {}",
        report.market_sentiment.sentiment.to_string().to_uppercase()
    ));
    for factor in &report.market_sentiment.factors {
        lines.push(format!("- {factor}"));
    }
    lines.push(String::new());

    lines.push("Key Market Data:".into());
    for ticker in benchmark_tickers {
        if let Some(ind) = report.market_data.get(ticker).and_then(|d| d.indicators()) {
            lines.push(format!(
                "{}: ${:.2} ({:+.1}%)",
                ticker, ind.price, ind.change_percent
            ));
        }
    }
    lines.push(String::new());

    if let PerformanceSection::Stats(stats) = &report.performance {
        lines.push("=== PORTFOLIO PERFORMANCE ===".into());
        lines.push(format!(
            "Total Return: {:+.1}%",
            stats.total_return * 100.0
        ));
        lines.push(format!(
            "Max Drawdown: {:+.1}%",
            stats.max_drawdown * 100.0
        ));
        lines.push(format!("Sharpe Ratio: {:.2}", stats.sharpe_ratio));
        lines.push(format!("Trading Days: {}", stats.trading_days));
        lines.push(String::new());
    }

    lines.push("=== TRADING CONSTRAINTS ===".into());
    lines.push(format!(
        "Available Cash: ${}",
        fmt_money(constraints.available_cash)
    ));
    lines.push(format!(
        "Max Per Trade: ${}",
        fmt_money(constraints.max_cash_per_trade)
    ));
    lines.push(format!("Max Positions: {}", constraints.max_positions));
    lines.push(format!(
        "Current Positions: {}",
        constraints.current_positions
    ));
    lines.push(String::new());
    lines.push(DEEP_RESEARCH_REQUEST.into());

    lines.join("\n")
}

/// Two-decimal money with comma-grouped thousands ("12,345.60").
fn fmt_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

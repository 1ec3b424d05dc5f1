//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::openai_adapter::OpenAiAdapter;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::advisor;
use crate::domain::analyzer::Analyzer;
use crate::domain::config::AdvisorConfig;
use crate::domain::error::AdvisorError;
use crate::domain::prompt::compile_prompt;
use crate::domain::report::AnalysisReport;

#[derive(Parser, Debug)]
#[command(
    name = "capadvisor",
    about = "Micro-cap portfolio analysis and AI-assisted trading advisor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the analysis report and emit it as JSON
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Analysis date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the compiled model prompt without calling the model
    Prompt {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Run the full pipeline: analysis, model call, parsed decisions
    Decide {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the valued portfolio summary
    Portfolio {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            output,
            date,
        } => run_analyze(&config, output.as_ref(), date),
        Command::Prompt { config, date } => run_prompt(&config, date),
        Command::Decide {
            config,
            output,
            date,
        } => run_decide(&config, output.as_ref(), date),
        Command::Portfolio { config } => run_portfolio(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

fn load_config(path: &PathBuf) -> Result<AdvisorConfig, ExitCode> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        let err = AdvisorError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;

    let config = AdvisorConfig::from_port(&adapter);
    for warning in config.warnings() {
        eprintln!("warning: {warning}");
    }
    Ok(config)
}

fn as_of_timestamp(date: Option<NaiveDate>) -> chrono::NaiveDateTime {
    match date {
        Some(date) => date.and_hms_opt(0, 0, 0).expect("midnight exists"),
        None => chrono::Local::now().naive_local(),
    }
}

fn build_report(config: &AdvisorConfig, date: Option<NaiveDate>) -> AnalysisReport {
    let market = YahooAdapter::new();
    let ledger = CsvLedgerAdapter::new(config.data.portfolio_csv.clone());
    let analyzer = Analyzer::new(&market, &ledger, config);

    eprintln!("Building analysis report...");
    analyzer.build_report(as_of_timestamp(date))
}

fn emit_json<T: serde::Serialize>(value: &T, output: Option<&PathBuf>) -> ExitCode {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                let err = AdvisorError::from(e);
                eprintln!("error: {err}");
                return ExitCode::from(&err);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    ExitCode::SUCCESS
}

fn run_analyze(
    config_path: &PathBuf,
    output: Option<&PathBuf>,
    date: Option<NaiveDate>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let report = build_report(&config, date);
    emit_json(&report, output)
}

fn run_prompt(config_path: &PathBuf, date: Option<NaiveDate>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let report = build_report(&config, date);
    println!(
        "{}",
        compile_prompt(&report, &config.market.benchmark_tickers())
    );
    ExitCode::SUCCESS
}

fn run_decide(
    config_path: &PathBuf,
    output: Option<&PathBuf>,
    date: Option<NaiveDate>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    if let Err(e) = config.validate_for_decide() {
        eprintln!("error: {e}");
        return ExitCode::from(&e);
    }

    let report = build_report(&config, date);

    eprintln!("Requesting decisions from {}...", config.model.model);
    let model = OpenAiAdapter::new(config.model.clone());
    let outcome = advisor::advise(
        &report,
        &model,
        &config.model.model,
        &config.market.benchmark_tickers(),
    );

    if let Some(error) = &outcome.error {
        eprintln!("warning: decision run failed: {error}");
    } else {
        eprintln!("Parsed {} decision(s)", outcome.decisions.len());
    }
    emit_json(&outcome, output)
}

fn run_portfolio(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let report = build_report(&config, None);
    let portfolio = &report.portfolio;

    println!("Cash Balance:  ${:.2}", portfolio.cash_balance);
    println!("Total Equity:  ${:.2}", portfolio.total_equity);
    println!("Total P&L:     ${:.2}", portfolio.total_pnl);
    println!("Positions:     {}", portfolio.positions_count);
    for pos in &portfolio.positions {
        println!(
            "  {}: {} @ ${:.2} -> ${:.2} ({:+.1}%)",
            pos.ticker, pos.shares, pos.buy_price, pos.current_price, pos.pnl_percent
        );
    }
    for alert in &report.stop_loss_alerts {
        println!(
            "  STOP LOSS: {} at ${:.2} (stop ${:.2})",
            alert.ticker, alert.current_price, alert.stop_loss
        );
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    if let Err(e) = config.validate_for_decide() {
        eprintln!("error: {e}");
        return ExitCode::from(&e);
    }
    println!("Configuration OK");
    ExitCode::SUCCESS
}

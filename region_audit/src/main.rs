//! Entry point for the Region Audit binary.
//!
//! Loads one spreadsheet into a fresh session and prints the requested
//! view.  Logging is configured through `AUDIT_LOG_LEVEL` and
//! `AUDIT_LOG_FORMAT` (or `RUST_LOG`); see [`region_audit::config`].

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use region_audit::config::LoggingConfig;
use region_audit::decode::decode_file;
use region_audit::logging::init_logging;
use region_audit::models::AppStep;
use region_audit::report::{render_dashboard, render_ledger, render_validation, ReportHeader};
use region_audit::Session;
use serde_json::json;
use std::path::PathBuf;

/// Regulatory data audit: regional staffing completeness checks.
#[derive(Parser, Debug)]
#[command(name = "region_audit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Input {
    /// Spreadsheet to audit (.xlsx, .xls, .ods or .csv).
    file: PathBuf,
    /// Worksheet to read; defaults to the first sheet.
    #[arg(long, env = "AUDIT_SHEET")]
    sheet: Option<String>,
    /// Print JSON instead of a text view.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the per-region validation table and findings.
    Validate(Input),
    /// Show workforce KPIs (valid datasets only).
    Dashboard(Input),
    /// Print the ledger of one region (valid datasets only).
    Report {
        #[command(flatten)]
        input: Input,
        /// Region to print; defaults to the first region of the table.
        #[arg(long)]
        region: Option<String>,
        /// Only list records matching this term.
        #[arg(long, default_value = "")]
        search: String,
    },
}

fn load(input: &Input) -> Result<Session> {
    let rows = decode_file(&input.file, input.sheet.as_deref())?;
    let mut session = Session::new();
    session.load(&rows)?;
    Ok(session)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Validate(input) => {
            let session = load(&input)?;
            let validation = session
                .validation()
                .ok_or_else(|| anyhow!("no dataset loaded"))?;
            if input.json {
                println!("{}", serde_json::to_string_pretty(validation)?);
            } else {
                print!("{}", render_validation(validation));
            }
        }
        Command::Dashboard(input) => {
            let mut session = load(&input)?;
            session.navigate(AppStep::Dashboard)?;
            let model = session.read_model()?;
            if input.json {
                let body = json!({
                    "kpis": model.global_kpis().to_json(),
                    "validationTable": model.validation().validation_table,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render_dashboard(&model));
            }
        }
        Command::Report {
            input,
            region,
            search,
        } => {
            let mut session = load(&input)?;
            session.navigate(AppStep::Report)?;
            let model = session.read_model()?;
            let region = match region {
                Some(region) => region,
                None => model
                    .default_region()
                    .ok_or_else(|| anyhow!("the dataset has no regions"))?
                    .to_string(),
            };
            if !model.validation().regions.iter().any(|r| r.name == region) {
                return Err(anyhow!("unknown region: {}", region));
            }
            if input.json {
                let body = json!({
                    "summary": model.region_summary(&region),
                    "records": model.search_within_region(&region, &search),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render_ledger(&model, &region, &search, &ReportHeader::new()));
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("{}", err);
    }
    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "audit failed");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

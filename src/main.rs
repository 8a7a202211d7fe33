//! On-call report command line.
//!
//! # Usage
//!
//! ```bash
//! # Fetch a month of the schedule and print the report
//! oncall-report <api-key> <schedule-name> <YYYY-MM-DD> [holidays]
//!
//! # Same, with the arguments read from a YAML file
//! oncall-report --config config/report.yaml
//!
//! # Report from a saved timeline response
//! oncall-report --file timeline.json <YYYY-MM-DD> [holidays]
//!
//! # Serve POST /report, using the file's holidays as default
//! oncall-report serve config/report.yaml [addr]
//! ```
//!
//! Add `--json` to print the report as JSON. Holidays are a comma-separated
//! list of days of the month, e.g. `8,29`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: info). Logs go to stderr.

use std::env;
use std::fs;
use std::process::ExitCode;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oncall_report::api::{AppState, create_router};
use oncall_report::calculation::build_report;
use oncall_report::config::{ConfigLoader, HolidaySet, ReportConfig, parse_month_start};
use oncall_report::error::ReportError;
use oncall_report::models::{Report, parse_timeline};
use oncall_report::render::{render_json, render_text};
use oncall_report::source::TimelineClient;

const USAGE: &str = "\
usage:
  oncall-report [--json] <api-key> <schedule-name> <YYYY-MM-DD> [holidays]
  oncall-report [--json] --config <report.yaml>
  oncall-report [--json] --file <timeline.json> <YYYY-MM-DD> [holidays]
  oncall-report serve <report.yaml> [addr]";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
enum Command {
    Fetch {
        config: ReportConfig,
    },
    Offline {
        path: String,
        month_start: NaiveDate,
        holidays: HolidaySet,
    },
    Serve {
        config_path: String,
        addr: String,
    },
}

fn parse_args(args: &[String]) -> Result<(Command, bool), CliError> {
    let json = args.iter().any(|a| a == "--json");
    let args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--json")
        .collect();

    let command = match args.as_slice() {
        ["serve", config_path] => Command::Serve {
            config_path: config_path.to_string(),
            addr: DEFAULT_ADDR.to_string(),
        },
        ["serve", config_path, addr] => Command::Serve {
            config_path: config_path.to_string(),
            addr: addr.to_string(),
        },
        ["--config", path] => Command::Fetch {
            config: ConfigLoader::load(path)?.into_config(),
        },
        ["--file", path, month_start, rest @ ..] if rest.len() <= 1 => Command::Offline {
            path: path.to_string(),
            month_start: parse_month_start(month_start)?,
            holidays: rest
                .first()
                .map(|list| HolidaySet::parse_list(list))
                .unwrap_or_default(),
        },
        [api_key, schedule, month_start, rest @ ..]
            if rest.len() <= 1 && !api_key.starts_with("--") =>
        {
            Command::Fetch {
                config: ReportConfig::from_args(api_key, schedule, month_start, rest.first().copied())?,
            }
        }
        _ => return Err(CliError::Usage(USAGE.to_string())),
    };

    Ok((command, json))
}

fn print_report(report: &Report, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", render_json(report)?);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}

async fn run(command: Command, json: bool) -> Result<(), CliError> {
    match command {
        Command::Fetch { config } => {
            let client = TimelineClient::new(&config)?;
            let timeline = client
                .fetch(&config.schedule_name, config.month_start)
                .await?;
            let report = build_report(&timeline, &config.holidays, config.month_start)?;
            print_report(&report, json)
        }
        Command::Offline {
            path,
            month_start,
            holidays,
        } => {
            let body = fs::read(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            let timeline = parse_timeline(&body, &path)?;
            let report = build_report(&timeline, &holidays, month_start)?;
            print_report(&report, json)
        }
        Command::Serve { config_path, addr } => {
            let loader = ConfigLoader::load(&config_path)?;
            let app = create_router(AppState::new(loader.holidays().clone()));

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .map_err(|source| CliError::Io {
                    path: addr.clone(),
                    source,
                })?;
            info!(addr = %addr, "Serving POST /report");

            axum::serve(listener, app)
                .await
                .map_err(|source| CliError::Io { path: addr, source })
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(CliError::Usage(usage)) => {
            eprintln!("{}", usage);
            return ExitCode::from(2);
        }
        Err(err) => {
            error!(error = %err, "Invalid arguments");
            return ExitCode::FAILURE;
        }
    };

    match run(command, json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let retryable = matches!(&err, CliError::Report(e) if e.is_retryable());
            error!(error = %err, retryable, "On-call report failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_fetch_arguments() {
        let (command, json) =
            parse_args(&args(&["key", "ops_schedule", "2024-03-01", "8,29"])).unwrap();
        assert!(!json);
        match command {
            Command::Fetch { config } => {
                assert_eq!(config.schedule_name, "ops_schedule");
                assert!(config.holidays.contains_day(29));
            }
            other => panic!("Expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_offline_arguments_with_json_flag() {
        let (command, json) =
            parse_args(&args(&["--json", "--file", "t.json", "2024-03-01"])).unwrap();
        assert!(json);
        match command {
            Command::Offline {
                path, holidays, ..
            } => {
                assert_eq!(path, "t.json");
                assert!(holidays.is_empty());
            }
            other => panic!("Expected Offline, got {:?}", other),
        }
    }

    #[test]
    fn test_serve_default_addr() {
        let (command, _) = parse_args(&args(&["serve", "config/report.yaml"])).unwrap();
        match command {
            Command::Serve { addr, .. } => assert_eq!(addr, DEFAULT_ADDR),
            other => panic!("Expected Serve, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_arguments_is_usage_error() {
        assert!(matches!(
            parse_args(&args(&["key"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_bad_date_is_report_error() {
        assert!(matches!(
            parse_args(&args(&["key", "ops", "March"])),
            Err(CliError::Report(ReportError::InvalidDate { .. }))
        ));
    }
}

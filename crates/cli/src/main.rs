//! saleorder - command-line client for the sale-order service

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use config::AppContext;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "saleorder")]
#[command(about = "Upload order spreadsheets, generate sale-order reports and browse order history")]
#[command(version)]
struct Cli {
    /// API base URL (overrides api.base_url)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for the token store, pending uploads and logs
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Settings file (TOML or JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "120")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref(), cli.base_url, cli.state_dir)?;
    logging::init_logging(
        cli.log_level.into(),
        &settings.storage.state_dir,
        cli.no_file_log,
    )?;

    info!(base_url = %settings.api.base_url, state_dir = %settings.storage.state_dir.display(), "Starting saleorder");
    let context = AppContext::new(settings)?;

    // Execute command with optional timeout
    if cli.timeout == 0 {
        match cli.command.execute(&context).await {
            Ok(()) => {
                info!("Command completed successfully");
            }
            Err(e) => {
                error!("Command failed: {e:#}");
                std::process::exit(1);
            }
        }
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(&context)).await {
            Ok(Ok(())) => {
                info!("Command completed successfully");
            }
            Ok(Err(e)) => {
                error!("Command failed: {e:#}");
                std::process::exit(1);
            }
            Err(_) => {
                error!("Command timed out after {} seconds", cli.timeout);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "saleorder",
            "orders",
            "search",
            "acme",
            "--base-url",
            "http://localhost:5000/api/v1",
            "-t",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:5000/api/v1"));
        assert_eq!(cli.timeout, 0);
        assert!(matches!(cli.command, Commands::Orders { .. }));
    }

    #[test]
    fn test_report_generate_requires_dealer_and_city() {
        assert!(Cli::try_parse_from(["saleorder", "report", "generate", "--dealer", "Acme"]).is_err());
        assert!(
            Cli::try_parse_from([
                "saleorder", "report", "generate", "--dealer", "Acme", "--city", "Pune",
                "--additional",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_chart_type_parses() {
        let cli = Cli::try_parse_from(["saleorder", "dashboard", "chart", "--type", "city"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard { .. }));
        assert!(Cli::try_parse_from(["saleorder", "dashboard", "chart", "--type", "weekly"]).is_err());
    }
}

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quant_env_action::config::{InputOverrides, Settings};
use quant_env_action::{actions, update_environment_state, Error};

/// Trigger a state change (e.g. redeploy) on a Quant Cloud environment.
///
/// Inputs are read from `INPUT_*` variables; flags take precedence.
#[derive(Parser, Debug)]
#[command(name = "quant-env-action", version, about)]
struct Cli {
    /// API token used as the bearer credential
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long)]
    organization: Option<String>,

    #[arg(long)]
    application: Option<String>,

    #[arg(long)]
    environment: Option<String>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// State change to request (default: redeploy)
    #[arg(long)]
    action: Option<String>,

    /// Retries after the first failed attempt (default: 5)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Optional file (yaml, toml, json) with inputs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> InputOverrides {
        InputOverrides {
            api_key: self.api_key.clone(),
            organization: self.organization.clone(),
            application: self.application.clone(),
            environment: self.environment.clone(),
            base_url: self.base_url.clone(),
            action: self.action.clone(),
            max_retries: self.max_retries,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            actions::set_failed(&failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    info!("{}", started_at(Utc::now()));

    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to read inputs")?;

    update_environment_state(&settings).await?;

    Ok(())
}

fn started_at(now: DateTime<Utc>) -> String {
    format!("Starting at: {} UTC", now.format("%Y-%m-%d %H:%M:%S"))
}

fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(e @ Error::Api { .. }) => e.failure_message(),
        _ => format!("{:#}", err),
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

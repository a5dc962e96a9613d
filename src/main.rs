//! auth5 configuration checker
//!
//! Loads and validates the auth5 settings exactly as the service does at
//! startup. Exits non-zero when the configuration would stop the service.

use anyhow::Context;
use auth5_config::config::{Auth5Config, load_config, load_config_from_path};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Validate and inspect auth5 configuration
#[derive(Parser, Debug)]
#[command(name = "auth5-config")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the settings file (defaults to $AUTH5_CONFIG, then auth5.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the configuration (default)
    Check,
    /// Print the merged configuration as JSON, secrets redacted
    Show,
    /// Print the SMTP transport of one mail profile
    Smtp {
        /// Mail profile nickname
        nickname: String,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable output
    Pretty,
    /// JSON structured output
    Json,
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn summarize(config: &Auth5Config) {
    let nicknames: Vec<_> = config.mail_profile_nicknames().collect();
    info!(
        site = %config.site().name,
        listen = %format!("{}:{}", config.server().host, config.server().port),
        mail_profiles = ?nicknames,
        cors_origins = config.cors().origins.len(),
        "Configuration is valid"
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.log_format);

    // .env entries feed the AUTH5_ overlay; a missing file is not an error
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => warn!(error = %e, "Failed to read .env file"),
        _ => {}
    }

    let config = match &args.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
    .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    match args.command.unwrap_or(Command::Check) {
        Command::Check => summarize(&config),
        Command::Show => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{json}");
        }
        Command::Smtp { nickname } => {
            let smtp = config
                .mail_profile(&nickname)
                .inspect_err(|e| error!(error = %e, "Unknown mail profile"))?;
            let json =
                serde_json::to_string_pretty(smtp).context("Failed to serialize mail profile")?;
            println!("{json}");
        }
    }

    Ok(())
}

//! Validator sentinel CLI
//!
//! Command-line interface for the validator monitoring and notification service.
//! Every setting can also come from the environment.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use validator_sentinel::{load_config, Config, Overrides};

#[derive(Parser)]
#[command(name = "validator-sentinel")]
#[command(about = "Validator health monitoring and Telegram alerting service")]
#[command(version)]
struct Args {
    /// Path to an optional JSON configuration file
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,

    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Telegram chat to notify
    #[arg(long, env = "CHAT_ID")]
    chat_id: Option<String>,

    /// Validator status endpoint URL
    #[arg(long, env = "LINK")]
    link: Option<String>,

    /// Seconds between polls while healthy
    #[arg(long, env = "NORMAL_SLEEP")]
    normal_sleep: Option<u64>,

    /// Seconds between polls while unhealthy
    #[arg(long, env = "FAIL_SLEEP")]
    fail_sleep: Option<u64>,

    /// Seconds before an unchanged problem is announced again
    #[arg(long, env = "HOURLY_REMINDER")]
    hourly_reminder: Option<u64>,

    /// Status endpoint request timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT")]
    fetch_timeout: Option<u64>,

    /// Telegram request timeout in seconds
    #[arg(long, env = "NOTIFY_TIMEOUT")]
    notify_timeout: Option<u64>,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL")]
    telegram_api_url: Option<String>,

    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bot_token: self.bot_token.clone(),
            chat_id: self.chat_id.clone(),
            link: self.link.clone(),
            normal_sleep_seconds: self.normal_sleep,
            fail_sleep_seconds: self.fail_sleep,
            hourly_reminder_seconds: self.hourly_reminder,
            fetch_timeout_seconds: self.fetch_timeout,
            notify_timeout_seconds: self.notify_timeout,
            telegram_api_url: self.telegram_api_url.clone(),
        }
    }
}

fn resolve_config(args: &Args) -> validator_sentinel::Result<Config> {
    let config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    let config = config.with_overrides(args.overrides());
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, link={:?}, log_level={:?}",
        args.config,
        args.link.as_deref().map(validator_sentinel::io::redact_query),
        args.log_level
    );

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting validator sentinel");
    tracing::debug!("{:?}", config);

    if let Err(e) = validator_sentinel::run(config).await {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

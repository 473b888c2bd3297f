#![forbid(unsafe_code)]

//! review-watch: polls the homework status API and reports review status
//! changes to a Telegram chat.

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use review_watch_core::config::{
    DEFAULT_ENDPOINT, DEFAULT_INTERVAL_SECS, DEFAULT_TELEGRAM_API, DEFAULT_TIMEOUT_SECS,
};
use review_watch_core::{ConfigError, RawCredentials, Supervisor, WatchConfig};
use tracing::{error, info};

mod logging;
mod practicum;
mod telegram;
#[cfg(test)]
mod test_server;

use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

#[derive(Parser, Debug)]
#[command(name = "review-watch", version, about = "Watch homework review status and report changes to Telegram")]
struct Args {
    /// Status API token.
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    practicum_token: Option<String>,

    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    /// Chat that receives notifications.
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    /// Homework status endpoint.
    #[arg(long, env = "REVIEW_WATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API base URL.
    #[arg(long, env = "REVIEW_WATCH_TELEGRAM_API", default_value = DEFAULT_TELEGRAM_API)]
    telegram_api: String,

    /// Seconds between polls.
    #[arg(long, env = "REVIEW_WATCH_INTERVAL_SECS", default_value_t = DEFAULT_INTERVAL_SECS)]
    interval_secs: u64,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "REVIEW_WATCH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// First `from_date` (epoch seconds). Defaults to now.
    #[arg(long, env = "REVIEW_WATCH_FROM_DATE")]
    from_date: Option<i64>,

    /// Log level (env-filter syntax).
    #[arg(long, env = "REVIEW_WATCH_LOG", default_value = "info")]
    log: String,

    /// Also append logs to this file.
    #[arg(long, env = "REVIEW_WATCH_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn to_config(&self) -> Result<WatchConfig, ConfigError> {
        let credentials = RawCredentials {
            practicum_token: self.practicum_token.clone(),
            telegram_token: self.telegram_token.clone(),
            telegram_chat_id: self.telegram_chat_id.clone(),
        }
        .validate()?;

        let config = WatchConfig {
            endpoint: self.endpoint.clone(),
            telegram_api: self.telegram_api.clone(),
            interval: Duration::from_secs(self.interval_secs),
            request_timeout: Duration::from_secs(self.timeout_secs),
            start_timestamp: self.from_date,
            ..WatchConfig::new(credentials)
        };
        config.check()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log, args.log_file.as_deref())?;

    let config = match args.to_config() {
        Ok(c) => c,
        Err(e) => {
            error!(severity = "critical", error = %e, "cannot start watcher");
            return Err(e.into());
        }
    };

    run(config).await
}

async fn run(config: WatchConfig) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("build HTTP client")?;

    let source = PracticumClient::new(
        http.clone(),
        &config.endpoint,
        &config.credentials.practicum_token,
    );
    let notifier = TelegramNotifier::new(
        http,
        &config.telegram_api,
        &config.credentials.telegram_token,
        &config.credentials.telegram_chat_id,
    );

    info!(endpoint = %config.endpoint, chat_id = %config.credentials.telegram_chat_id, "review-watch starting");
    let mut supervisor = Supervisor::new(source, notifier, config.supervisor_settings());
    supervisor.run().await;
    Ok(())
}

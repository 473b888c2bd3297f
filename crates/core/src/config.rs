//! Startup configuration and the one fatal check of the system.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::supervisor::SupervisorSettings;

/// Status API token variable.
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Telegram bot token variable.
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Telegram recipient chat id variable.
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Homework status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
/// Seconds between poll cycles.
pub const DEFAULT_INTERVAL_SECS: u64 = 600;
/// Seconds before an HTTP request is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials as read from flags/environment, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawCredentials {
    /// Status API token.
    pub practicum_token: Option<String>,
    /// Telegram bot token.
    pub telegram_token: Option<String>,
    /// Telegram recipient chat id.
    pub telegram_chat_id: Option<String>,
}

impl RawCredentials {
    /// Checks that every required value is present and non-blank.
    ///
    /// All missing names are reported together.
    pub fn validate(self) -> Result<Credentials, ConfigError> {
        let mut missing = Vec::new();
        let practicum_token = required(self.practicum_token, PRACTICUM_TOKEN, &mut missing);
        let telegram_token = required(self.telegram_token, TELEGRAM_TOKEN, &mut missing);
        let telegram_chat_id = required(self.telegram_chat_id, TELEGRAM_CHAT_ID, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        Ok(Credentials {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Validated credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Status API token.
    pub practicum_token: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Telegram recipient chat id.
    pub telegram_chat_id: String,
}

// Tokens must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Everything the watcher needs to start.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Validated credentials.
    pub credentials: Credentials,
    /// Status API URL.
    pub endpoint: String,
    /// Telegram Bot API base URL.
    pub telegram_api: String,
    /// Pause between cycles.
    pub interval: Duration,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// First `from_date`; `None` means now.
    pub start_timestamp: Option<i64>,
}

impl WatchConfig {
    /// Config with default endpoints and timings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api: DEFAULT_TELEGRAM_API.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            start_timestamp: None,
        }
    }

    /// Rejects timings that would hot-loop or never finish a request.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid {
                name: "interval",
                reason: "must be at least one second".into(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "request_timeout",
                reason: "must be at least one second".into(),
            });
        }
        Ok(())
    }

    /// Loop settings derived from this config.
    pub fn supervisor_settings(&self) -> SupervisorSettings {
        SupervisorSettings {
            interval: self.interval,
            start_timestamp: self.start_timestamp,
        }
    }
}

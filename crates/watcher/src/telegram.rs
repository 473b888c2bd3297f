//! Telegram Bot API sink.

use async_trait::async_trait;
use reqwest::Client;
use review_watch_core::{Notifier, NotifyError};
use serde::{Deserialize, Serialize};

pub struct TelegramNotifier {
    http: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let req = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };
        // The URL embeds the bot token; keep it out of error text.
        let resp = self
            .http
            .post(self.send_message_url())
            .json(&req)
            .send()
            .await
            .map_err(|e| NotifyError(e.without_url().to_string()))?;

        let status = resp.status();
        match resp.json::<BotApiResponse>().await {
            Ok(body) if body.ok && status.is_success() => Ok(()),
            Ok(body) => Err(NotifyError(
                body.description
                    .unwrap_or_else(|| format!("Bot API answered with HTTP {status}")),
            )),
            Err(_) => Err(NotifyError(format!("Bot API answered with HTTP {status}"))),
        }
    }

    fn recipient(&self) -> String {
        self.chat_id.clone()
    }
}

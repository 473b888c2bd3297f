//! HTTP client for the homework status API.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use review_watch_core::{CycleError, StatusSource};
use serde_json::Value;

pub struct PracticumClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(http: Client, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        // URLs are stripped from reqwest errors so the text stays stable
        // across polls with different `from_date`.
        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| CycleError::FetchError(e.without_url().to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CycleError::FetchError(format!(
                "{} answered with HTTP {status}",
                self.endpoint
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| CycleError::FetchError(format!("body is not JSON: {}", e.without_url())))
    }
}

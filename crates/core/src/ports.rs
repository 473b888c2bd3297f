//! Seams to the outside world. The binary provides HTTP-backed
//! implementations; tests provide in-memory ones.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CycleError, NotifyError};

/// Source of raw status API responses.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches statuses changed since `from_date` (epoch seconds).
    ///
    /// Implementations report every failure as [`CycleError::FetchError`].
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

/// Outbound message channel to a fixed recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Makes a single delivery attempt.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;

    /// Recipient label for logs.
    fn recipient(&self) -> String;
}

//! One fetch -> validate -> interpret pass.

use serde_json::Value;
use tracing::debug;

use crate::error::CycleError;
use crate::model::CycleOutcome;
use crate::ports::StatusSource;
use crate::status::interpret;
use crate::util::now_secs;
use crate::validation::validate_response;

/// Response field carrying the server time to use as the next `from_date`.
pub const CURRENT_DATE_FIELD: &str = "current_date";

/// Runs one fetch -> validate -> interpret pass.
///
/// `since` falls back to the current time when absent. On success the
/// response's `current_date` becomes the new timestamp; if it is missing or
/// not an integer the previous timestamp is kept. No retries happen here.
pub async fn poll_cycle<S>(source: &S, since: Option<i64>) -> Result<CycleOutcome, CycleError>
where
    S: StatusSource + ?Sized,
{
    let from_date = since.unwrap_or_else(now_secs);
    debug!(from_date, "polling status API");

    let response = source.fetch(from_date).await?;
    let record = validate_response(&response)?;
    let status_message = interpret(&record)?;

    let new_timestamp = response
        .get(CURRENT_DATE_FIELD)
        .and_then(Value::as_i64)
        .unwrap_or(from_date);

    Ok(CycleOutcome {
        new_timestamp,
        status_message,
    })
}

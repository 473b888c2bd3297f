//! Work item record -> notification text.

use crate::error::CycleError;
use crate::model::{ReviewStatus, WorkItemRecord};

/// Builds the notification text for a work item.
///
/// Both `homework_name` and `status` must be present before the status table
/// is consulted. A status outside the known set is an error so that it gets
/// reported rather than skipped.
pub fn interpret(record: &WorkItemRecord) -> Result<String, CycleError> {
    let name = record
        .field("homework_name")
        .and_then(|v| v.as_str())
        .ok_or(CycleError::MalformedRecord("homework_name"))?;
    let raw_status = record
        .field("status")
        .ok_or(CycleError::MalformedRecord("status"))?;

    let status = match raw_status.as_str() {
        Some(s) => s.parse::<ReviewStatus>().map_err(CycleError::UnknownStatus)?,
        None => return Err(CycleError::UnknownStatus(raw_status.to_string())),
    };

    Ok(format!(
        "Changed review status for \"{name}\". {}",
        status.verdict()
    ))
}

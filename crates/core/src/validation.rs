//! Shape checks on the raw status API response.

use serde_json::Value;

use crate::error::CycleError;
use crate::model::WorkItemRecord;

/// Field holding the list of work items, most recent first.
pub const HOMEWORKS_FIELD: &str = "homeworks";

/// Extracts the most recent work item from a status API response.
///
/// The record is returned unchanged; field-level checks belong to
/// [`crate::status::interpret`].
pub fn validate_response(response: &Value) -> Result<WorkItemRecord, CycleError> {
    let obj = response.as_object().ok_or(CycleError::InvalidResponseShape)?;

    let homeworks = obj
        .get(HOMEWORKS_FIELD)
        .ok_or(CycleError::MissingField(HOMEWORKS_FIELD))?
        .as_array()
        .ok_or(CycleError::NotAList(HOMEWORKS_FIELD))?;

    let first = homeworks.first().ok_or(CycleError::NoItemsAvailable)?;
    Ok(WorkItemRecord(first.clone()))
}

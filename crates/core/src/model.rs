use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Review status of a work item as reported by the status API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// The reviewer accepted the work.
    Approved,
    /// The work is under review.
    Reviewing,
    /// The reviewer sent the work back with comments.
    Rejected,
}

impl ReviewStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict appended to a status notification.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Work reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "Work has been taken up for review by the reviewer.",
            Self::Rejected => "Work reviewed: the reviewer has comments.",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(other.to_string()),
        }
    }
}

/// One entry of the `homeworks` list, kept exactly as the API sent it.
///
/// Field checks happen in [`crate::status::interpret`], not at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItemRecord(pub Value);

impl WorkItemRecord {
    /// Raw value of a field, if the record is an object and has it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Result of a fully successful poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Lower bound for the next poll (epoch seconds).
    pub new_timestamp: i64,
    /// Ready-to-send status notification.
    pub status_message: String,
}

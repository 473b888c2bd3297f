use thiserror::Error;

/// Everything that can go wrong inside one poll cycle.
///
/// None of these stop the supervisor; they are rendered with `Display`,
/// de-duplicated and reported through the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// Transport failure, non-success HTTP status or a body that is not JSON.
    #[error("status API request failed: {0}")]
    FetchError(String),

    /// The response body is not a JSON object.
    #[error("status API response is not a JSON object")]
    InvalidResponseShape,

    /// A required key is absent from the response.
    #[error("status API response has no `{0}` field")]
    MissingField(&'static str),

    /// A key that must hold an array holds something else.
    #[error("status API field `{0}` is not a list")]
    NotAList(&'static str),

    /// The response carries no work items.
    #[error("no reviewed work items available")]
    NoItemsAvailable,

    /// A work item lacks a required field.
    #[error("work item record has no valid `{0}` field")]
    MalformedRecord(&'static str),

    /// The work item carries a status outside the known set.
    #[error("unknown review status: {0}")]
    UnknownStatus(String),
}

impl CycleError {
    /// Stable short name of the variant, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FetchError(_) => "fetch_error",
            Self::InvalidResponseShape => "invalid_response_shape",
            Self::MissingField(_) => "missing_field",
            Self::NotAList(_) => "not_a_list",
            Self::NoItemsAvailable => "no_items_available",
            Self::MalformedRecord(_) => "malformed_record",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }
}

/// A notification could not be delivered. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Startup configuration is incomplete. The only fatal condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Names of the required variables that are absent or blank.
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A value is present but unusable.
    #[error("invalid configuration {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

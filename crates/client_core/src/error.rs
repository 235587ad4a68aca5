use std::time::Duration;

use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate tweet. Please try again.";
pub const UNKNOWN_SERVICE_ERROR: &str = "Unknown error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("topic must not be empty")]
    EmptyTopic,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a generation request is already in flight")]
    SubmissionInFlight,
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    /// The service answered, but not with a usable result.
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Transport(String),
    #[error("failed to decode service response: {0}")]
    Decode(String),
}

impl GenerationError {
    /// Message shown in the error banner: server text first, then the
    /// transport's own message, then a generic fallback.
    pub fn banner_message(&self) -> String {
        let message = match self {
            GenerationError::Service { message, .. } => message.trim().to_string(),
            other => other.to_string().trim().to_string(),
        };
        if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

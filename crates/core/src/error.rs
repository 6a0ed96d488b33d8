//! Error types for the textbook QA client.
//!
//! One enum covers configuration, transport, HTTP status and parsing
//! failures. The query hook collapses all of them into a single message
//! string, so the `Display` output of each variant is user-facing.

use thiserror::Error;

/// Unified error type for the textbook QA client.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status code
    #[error("HTTP error! status: {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// The response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Serialization/deserialization errors outside the wire path
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.trim().is_empty() => format!(": {}", d.trim()),
        _ => String::new(),
    }
}

impl AppError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_embeds_code() {
        let err = AppError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_message_with_detail() {
        let err = AppError::Status {
            status: 429,
            detail: Some("Too many requests".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 429: Too many requests");
    }

    #[test]
    fn test_blank_detail_is_omitted() {
        let err = AppError::Status {
            status: 502,
            detail: Some("   ".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_non_status_errors_have_no_code() {
        assert_eq!(AppError::Http("refused".to_string()).status(), None);
        assert_eq!(AppError::Parse("eof".to_string()).status(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}

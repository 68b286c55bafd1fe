//! Data service error types

use std::time::Duration;

/// Fallback message when the service supplied nothing usable.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Errors that can occur while calling the remote data service.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The service rejected the request and supplied a message.
    #[error("Service error: {message}")]
    Service {
        /// Human-readable error message from the service.
        message: String,
        /// Service-specific error code, if available.
        code: Option<String>,
    },

    /// The service could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Failed to interpret the service response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

impl DataError {
    /// Creates a service error with a message.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            code: None,
        }
    }

    /// Creates a service error with a message and an error code.
    pub fn service_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Returns the service error code, if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns the human-readable message to surface to the user.
    ///
    /// Prefers the service-supplied message; empty or absent messages fall
    /// back to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Transport(message) if !message.trim().is_empty() => message.clone(),
            Self::Timeout(d) => format!("Timeout after {d:?}"),
            Self::Parse { message } if !message.trim().is_empty() => message.clone(),
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_service_message() {
        let err = DataError::service_with_code("No such column 'Foo'", "INVALID_FIELD");
        assert_eq!(err.user_message(), "No such column 'Foo'");
        assert_eq!(err.error_code(), Some("INVALID_FIELD"));
    }

    #[test]
    fn test_user_message_falls_back_when_blank() {
        let err = DataError::service("   ");
        assert_eq!(err.user_message(), UNKNOWN_ERROR_MESSAGE);
    }
}

//! Remote client error types.

use thiserror::Error;

/// Message used when no response could be obtained at all.
pub const UNREACHABLE_MESSAGE: &str = "Employee service is unreachable";

/// Failures surfaced by the remote collection client.
///
/// `Display` yields the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// No response was obtained; carries the transport detail
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable(String),

    /// Success status but the body could not be decoded
    #[error("Unexpected response from employee service: {0}")]
    InvalidResponse(String),

    /// Server confirmed a record without an identifier
    #[error("Server response is missing an employee identifier")]
    MissingIdentifier,

    /// Update or delete was asked for without an identifier
    #[error("An employee identifier is required")]
    EmptyIdentifier,
}

impl ClientError {
    /// HTTP status for rejections, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable(_))
    }
}

/// Result type for remote collection operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let rejected = ClientError::Rejected {
            status: 400,
            message: "Validation failed".to_string(),
        };
        assert_eq!(rejected.to_string(), "Validation failed");
        assert_eq!(rejected.status(), Some(400));

        let unreachable = ClientError::Unreachable("connection refused".to_string());
        assert_eq!(unreachable.to_string(), "Employee service is unreachable");
        assert!(unreachable.is_unreachable());
        assert_eq!(unreachable.status(), None);
    }
}

//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error (feed unreachable, bad status, bad payload)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Outbound call exceeded its time budget
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidTimezone("X/Y".to_string()).into();
        assert_eq!(err.to_string(), "Invalid timezone: X/Y");
    }

    #[test]
    fn timeout_message() {
        let err = ApplicationError::Timeout("feed after 5s".to_string());
        assert_eq!(err.to_string(), "Timed out: feed after 5s");
    }
}

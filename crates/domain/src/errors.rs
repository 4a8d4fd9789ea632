//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Timezone identifier is not in the IANA database
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Date/time computation left the representable range
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

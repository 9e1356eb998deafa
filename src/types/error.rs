//! Error types for the parking ticket engine
//!
//! Every failure of an issue or settle operation is classified into one of
//! four kinds so the request boundary can map it to a response.
//!
//! # Error Categories
//!
//! - **Invalid input**: caller-supplied data failed validation (bad lot id)
//! - **Not found**: the referenced ticket does not exist
//! - **Persistence failure**: storage I/O or encoding failed; may be retried
//! - **Internal format**: a stored record could not be decoded

use thiserror::Error;

/// Main error type for the parking ticket engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// Caller-supplied data failed validation
    ///
    /// Recoverable by the caller correcting the input. Nothing was written.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        /// Name of the offending input
        field: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The referenced ticket does not exist
    #[error("Ticket {ticket_id} not found")]
    NotFound {
        /// Identifier that was looked up
        ticket_id: String,
    },

    /// Storage I/O or encoding error
    ///
    /// May be transient. Settling is safe to retry; issuing is not (a lost
    /// success response followed by a retry mints a second ticket).
    #[error("Persistence failure during {operation}: {message}")]
    PersistenceFailure {
        /// Storage operation that failed
        operation: String,
        /// Description of the underlying failure
        message: String,
    },

    /// A stored record could not be decoded
    ///
    /// Indicates corruption or a schema mismatch. Not retried.
    #[error("Ticket {ticket_id} has an unreadable record: {message}")]
    InternalFormat {
        /// Identifier of the corrupt record
        ticket_id: String,
        /// Description of the decoding failure
        message: String,
    },
}

// Conversion from io::Error to ParkingError
impl From<std::io::Error> for ParkingError {
    fn from(error: std::io::Error) -> Self {
        ParkingError::PersistenceFailure {
            operation: "io".to_string(),
            message: error.to_string(),
        }
    }
}

impl ParkingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: &str, value: &str, reason: &str) -> Self {
        ParkingError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(ticket_id: &str) -> Self {
        ParkingError::NotFound {
            ticket_id: ticket_id.to_string(),
        }
    }

    /// Create a PersistenceFailure error
    pub fn persistence(operation: &str, message: impl ToString) -> Self {
        ParkingError::PersistenceFailure {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an InternalFormat error
    pub fn internal_format(ticket_id: &str, message: impl ToString) -> Self {
        ParkingError::InternalFormat {
            ticket_id: ticket_id.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether retrying the failed operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ParkingError::PersistenceFailure { .. })
    }
}

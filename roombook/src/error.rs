//! Error types for the roombook library.
//!
//! This module provides the error hierarchy for all operations in the
//! roombook library, using `thiserror` for ergonomic error handling.
//!
//! Every variant maps onto one of four coarse [`ErrorKind`]s, which is what
//! transport layers (the CLI, an HTTP server) branch on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};

/// Result type alias for operations that may fail with a roombook error.
///
/// # Examples
///
/// ```
/// use roombook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roombook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced reservation does not exist.
    #[error("reservation {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: ReservationId,
    },

    /// Malformed input, such as a bad date ordering or a field that must be
    /// absent on creation.
    #[error("invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The operation is not permitted given the reservation's current state.
    #[error("cannot {operation} reservation {id}: {reason}")]
    InvalidState {
        /// The reservation the operation targeted.
        id: ReservationId,
        /// The operation that was refused.
        operation: Operation,
        /// Why the operation was refused.
        reason: InvalidStateReason,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("invalid configuration file {}: {source}", path.display())]
    Configuration {
        /// The configuration file that failed to parse.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced reservation does not exist.
    NotFound,
    /// The caller supplied malformed input.
    InvalidArgument,
    /// The operation conflicts with the current reservation state.
    InvalidState,
    /// The store failed for reasons unrelated to the request.
    Storage,
}

/// A state-changing operation that can be refused with
/// [`Error::InvalidState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Replacing the reservation's details.
    Update,
    /// Moving the reservation to `CANCELLED`.
    Cancel,
    /// Moving the reservation to `APPROVED`.
    Approve,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Cancel => write!(f, "cancel"),
            Self::Approve => write!(f, "approve"),
        }
    }
}

/// Why an operation was refused with [`Error::InvalidState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateReason {
    /// The reservation is not `PENDING`.
    WrongStatus(ReservationStatus),
    /// The reservation overlaps these approved reservations for the same room.
    Conflict(Vec<ReservationId>),
}

impl fmt::Display for InvalidStateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongStatus(status) => {
                write!(f, "status is {status}, expected {}", ReservationStatus::Pending)
            }
            Self::Conflict(ids) => {
                let ids = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "overlaps approved reservation(s) {ids}")
            }
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::InvalidArgument {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the coarse kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::{Error, ErrorKind, ReservationId};
    ///
    /// let err = Error::NotFound { id: ReservationId::try_from(3).unwrap() };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } | Self::Configuration { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Database(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::DataDirectoryNotFound { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Storage,
        }
    }

    /// Check if error indicates a missing reservation.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is an approval refused because of overlapping approved
    /// reservations.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::{Error, InvalidStateReason, Operation, ReservationId, ReservationStatus};
    ///
    /// let id = ReservationId::try_from(2).unwrap();
    /// let conflict = Error::InvalidState {
    ///     id,
    ///     operation: Operation::Approve,
    ///     reason: InvalidStateReason::Conflict(vec![ReservationId::try_from(1).unwrap()]),
    /// };
    /// assert!(conflict.is_conflict());
    ///
    /// let wrong_status = Error::InvalidState {
    ///     id,
    ///     operation: Operation::Approve,
    ///     reason: InvalidStateReason::WrongStatus(ReservationStatus::Cancelled),
    /// };
    /// assert!(!wrong_status.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::InvalidState {
                reason: InvalidStateReason::Conflict(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i64) -> ReservationId {
        ReservationId::try_from(value).unwrap()
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound { id: id(17) };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("17"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = Error::InvalidArgument {
            field: "end_date".to_string(),
            message: "must be after start_date".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid argument"));
        assert!(display.contains("end_date"));
        assert!(display.contains("must be after start_date"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_wrong_status_error() {
        let err = Error::InvalidState {
            id: id(4),
            operation: Operation::Cancel,
            reason: InvalidStateReason::WrongStatus(ReservationStatus::Approved),
        };
        let display = format!("{err}");
        assert!(display.contains("cannot cancel reservation 4"));
        assert!(display.contains("APPROVED"));
        assert!(!err.is_conflict());
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_conflict_error_lists_ids() {
        let err = Error::InvalidState {
            id: id(9),
            operation: Operation::Approve,
            reason: InvalidStateReason::Conflict(vec![id(2), id(5)]),
        };
        let display = format!("{err}");
        assert!(display.contains("cannot approve reservation 9"));
        assert!(display.contains("2, 5"));
        assert!(err.is_conflict());
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_conflict_and_wrong_status_messages_differ() {
        let wrong_status = Error::InvalidState {
            id: id(1),
            operation: Operation::Approve,
            reason: InvalidStateReason::WrongStatus(ReservationStatus::Cancelled),
        };
        let conflict = Error::InvalidState {
            id: id(1),
            operation: Operation::Approve,
            reason: InvalidStateReason::Conflict(vec![id(3)]),
        };
        assert_ne!(wrong_status.to_string(), conflict.to_string());
    }

    #[test]
    fn test_lock_timeout_error() {
        let err = Error::LockTimeout { seconds: 5 };
        let display = format!("{err}");
        assert!(display.contains("lock timeout"));
        assert!(display.contains("5s"));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 3,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 3"));
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation = crate::reservation::ValidationError {
            field: "id".into(),
            message: "must be positive".into(),
        };
        let err: Error = validation.into();
        match err {
            Error::InvalidArgument { field, message } => {
                assert_eq!(field, "id");
                assert_eq!(message, "must be positive");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Update.to_string(), "update");
        assert_eq!(Operation::Cancel.to_string(), "cancel");
        assert_eq!(Operation::Approve.to_string(), "approve");
    }
}

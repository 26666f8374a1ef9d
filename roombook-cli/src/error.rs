//! Errors surfaced by the `roombook` binary and the exit code each maps to.

use roombook::{Error as LibError, ErrorKind};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Library(LibError),
    /// A flag or positional value failed to parse.
    InvalidArguments(String),
    Io(std::io::Error),
    /// Another process held the write lock past the busy timeout.
    Timeout,
    /// The database is missing and auto-init is off.
    NoDataDirectory(PathBuf),
    Config(String),
    /// The command ran but its answer is a failure, as with
    /// `check-availability --fail-if-reserved` on a reserved room.
    SemanticFailure(String),
}

impl CliError {
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | wrong status, approval conflict, or room reserved |
    /// | 2 | write lock timeout |
    /// | 3 | no database and auto-init disabled |
    /// | 4 | invalid argument |
    /// | 5 | I/O |
    /// | 6 | storage |
    /// | 7 | configuration |
    /// | 8 | no such reservation |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::Timeout => 2,
            Self::NoDataDirectory(_) => 3,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
            Self::Library(LibError::Io(_)) => 5,
            Self::Library(LibError::Configuration { .. }) => 7,
            Self::Library(err) => match err.kind() {
                ErrorKind::InvalidState => 1,
                ErrorKind::InvalidArgument => 4,
                ErrorKind::Storage => 6,
                ErrorKind::NotFound => 8,
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::NoDataDirectory(path) => {
                write!(
                    f,
                    "Data directory not found: {} (run `roombook init` or enable auto-init)",
                    path.display()
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => CliError::Timeout,
            LibError::DataDirectoryNotFound { path } => CliError::NoDataDirectory(path),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook::{InvalidStateReason, Operation, ReservationId, ReservationStatus};

    fn id(value: i64) -> ReservationId {
        ReservationId::try_from(value).unwrap()
    }

    #[test]
    fn test_domain_errors_map_to_distinct_codes() {
        let not_found = CliError::from(LibError::NotFound { id: id(1) });
        assert_eq!(not_found.exit_code(), 8);

        let invalid = CliError::from(LibError::InvalidArgument {
            field: "end_date".into(),
            message: "bad".into(),
        });
        assert_eq!(invalid.exit_code(), 4);

        let conflict = CliError::from(LibError::InvalidState {
            id: id(2),
            operation: Operation::Approve,
            reason: InvalidStateReason::Conflict(vec![id(1)]),
        });
        assert_eq!(conflict.exit_code(), 1);

        let wrong_status = CliError::from(LibError::InvalidState {
            id: id(2),
            operation: Operation::Cancel,
            reason: InvalidStateReason::WrongStatus(ReservationStatus::Cancelled),
        });
        assert_eq!(wrong_status.exit_code(), 1);
    }

    #[test]
    fn test_lock_timeout_becomes_timeout() {
        let err = CliError::from(LibError::LockTimeout { seconds: 5 });
        assert!(matches!(err, CliError::Timeout));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_data_dir_keeps_path() {
        let err = CliError::from(LibError::DataDirectoryNotFound {
            path: PathBuf::from("/nowhere"),
        });
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn test_storage_errors_are_generic() {
        let err = CliError::from(LibError::DatabaseCorruption {
            details: "bad page".into(),
        });
        assert_eq!(err.exit_code(), 6);

        let io = CliError::from(LibError::Io(std::io::Error::other("disk")));
        assert_eq!(io.exit_code(), 5);
    }
}

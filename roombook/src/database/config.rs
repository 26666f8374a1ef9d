//! Where the reservation database lives and how it is opened.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the reservation database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "roombook.db";

/// File name of the optional settings file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Overrides `~/.roombook` when set to a non-empty value.
pub const DATA_DIR_ENV: &str = "ROOMBOOK_DATA_DIR";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for [`Database::open`](super::Database::open).
///
/// ```
/// use roombook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/roombook.db").with_busy_timeout(Duration::from_secs(1));
/// assert!(config.auto_create);
/// assert_eq!(config.busy_timeout.as_millis(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Location of the database file.
    pub path: PathBuf,
    /// How long a writer waits for another writer, such as a concurrent
    /// approval, before the operation fails with a lock timeout.
    pub busy_timeout: Duration,
    /// Create the file and its directory when missing.
    pub auto_create: bool,
    /// Open without write access; the schema is checked but never created.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// A writable, auto-created database at `path` with a five second busy timeout.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            auto_create: true,
            read_only: false,
        }
    }

    /// Replaces the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens without write access. Implies [`without_auto_create`](Self::without_auto_create).
    #[must_use]
    pub fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self.without_auto_create()
        }
    }

    /// Fails with `DataDirectoryNotFound` instead of creating a missing file.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }
}

/// `~/.roombook`.
///
/// # Errors
///
/// Fails when the home directory is unknown.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".roombook"))
        .ok_or_else(|| Error::InvalidArgument {
            field: "data_dir".into(),
            message: format!("no home directory found; set {DATA_DIR_ENV} or pass --data-dir"),
        })
}

/// Picks the data directory: `explicit` (the `--data-dir` flag), then
/// `ROOMBOOK_DATA_DIR`, then [`default_data_dir`].
///
/// # Errors
///
/// Fails when neither override is set and the home directory is unknown.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// `roombook.db` inside the resolved data directory.
///
/// # Errors
///
/// See [`resolve_data_dir`].
pub fn resolve_database_path() -> Result<PathBuf> {
    resolve_data_dir(None).map(|dir| dir.join(DATABASE_FILE_NAME))
}

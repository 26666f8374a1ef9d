//! Opening and configuring the `SQLite` connection.
//!
//! Every connection runs in WAL mode with `synchronous = NORMAL`, so readers
//! never block the single writer, and waits up to the configured busy
//! timeout when another connection holds the write lock.

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::migrations;

/// A `SQLite`-backed reservation store.
///
/// Each `Database` owns one connection. Several processes (or threads, each
/// with its own `Database`) may open the same file; writers are serialized
/// by `SQLite` and wait up to the configured busy timeout.
///
/// # Examples
///
/// ```no_run
/// use roombook::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/roombook.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    pub(super) config: DatabaseConfig,
}

impl Database {
    /// Opens the reservation database described by `config`.
    ///
    /// A missing file is created (along with its directory) unless
    /// auto-creation is off. Writable connections are switched to WAL and
    /// get the schema created on first use; read-only connections only
    /// check that the schema version matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] if the file is missing and
    /// auto-creation is off, [`Error::UnsupportedSchemaVersion`] if the file
    /// was written by another schema version, or an I/O or database error.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create || config.read_only {
                return Err(Error::DataDirectoryNotFound {
                    path: config.path.clone(),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(&config.path, open_flags(&config))?;
        configure(&conn, &config)?;

        if config.read_only {
            migrations::verify_schema_version(&conn)?;
        } else {
            migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!(
            "Opened reservation database at {} (busy timeout {:?})",
            config.path.display(),
            config.busy_timeout
        );

        Ok(Self { conn, config })
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the raw connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the raw connection mutably.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

fn open_flags(config: &DatabaseConfig) -> OpenFlags {
    let access = if config.read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    };
    access | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    // Set before switching journal mode, which may itself need to wait
    conn.busy_timeout(config.busy_timeout)?;

    if !config.read_only {
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("wal") {
            log::warn!("SQLite kept journal mode '{mode}' instead of WAL");
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
    }
    Ok(())
}

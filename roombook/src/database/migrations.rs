//! Schema creation and version gating.
//!
//! There is a single schema version today. A file without a version is
//! treated as fresh and gets the schema; a file with any other version is
//! refused rather than migrated.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CURRENT_SCHEMA_VERSION, METADATA_TABLE_EXISTS, SCHEMA_DDL, SELECT_SCHEMA_VERSION,
    STORE_SCHEMA_VERSION,
};

/// Creates the reservation tables and records [`CURRENT_SCHEMA_VERSION`].
///
/// # Errors
///
/// Returns a database error if any statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use roombook::database::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_DDL)?;
    conn.execute(STORE_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    log::debug!("Created reservation schema v{CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Reads the stored schema version; `0` means the schema was never created.
///
/// # Errors
///
/// Returns a database error if the metadata cannot be read or the stored
/// version is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: i64 = conn.query_row(METADATA_TABLE_EXISTS, [], |row| row.get(0))?;
    if has_metadata == 0 {
        return Ok(0);
    }

    let stored: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;

    match stored {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|e| {
            Error::Database(rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            ))
        }),
    }
}

/// Creates the schema on a fresh file, otherwise requires the current version.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for a file written by another
/// schema version, or a database error if creation fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => initialize_schema(conn),
        found => require_current(found),
    }
}

/// Requires the current version without creating anything.
///
/// Read-only connections go through here; an uninitialized file is refused.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] unless the stored version is
/// [`CURRENT_SCHEMA_VERSION`].
pub fn verify_schema_version(conn: &Connection) -> Result<()> {
    require_current(get_schema_version(conn)?)
}

fn require_current(found: i32) -> Result<()> {
    if found == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }
    let hint = if found > CURRENT_SCHEMA_VERSION {
        "written by a newer roombook"
    } else {
        "not initialized or written by an older roombook"
    };
    log::error!("Refusing reservation database with schema v{found} ({hint})");
    Err(Error::UnsupportedSchemaVersion {
        expected: CURRENT_SCHEMA_VERSION,
        found,
    })
}

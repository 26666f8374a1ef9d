//! SQL for the reservation schema.

/// Schema version written by this build. Files carrying any other non-zero
/// version are refused.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Tables and indices of a fresh database.
///
/// Dates are ISO-8601 `TEXT`; their lexical order is chronological, so the
/// half-open overlap test runs directly in SQL. `AUTOINCREMENT` keeps the
/// ids of deleted reservations from coming back.
pub const SCHEMA_DDL: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        room_id INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'APPROVED', 'CANCELLED')),
        CHECK (end_date > start_date)
    );

    -- conflict lookups filter on room and APPROVED status
    CREATE INDEX IF NOT EXISTS idx_reservations_room_status
        ON reservations(room_id, status);

    CREATE INDEX IF NOT EXISTS idx_reservations_user
        ON reservations(user_id);
";

pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

pub const STORE_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)";

/// Used to tell an empty file apart from one missing its version row.
pub const METADATA_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'";

//! Database fixtures for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use roombook::database::{Database, DatabaseConfig};

/// An empty database whose directory is left on disk for the rest of the run,
/// since the manager takes ownership of the connection.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::Builder::new()
        .prefix("roombook-test")
        .tempdir()
        .unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("roombook.db"))).unwrap();
    std::mem::forget(dir);
    db
}

#[allow(dead_code)]
pub fn database_path(dir: &Path) -> PathBuf {
    dir.join("roombook.db")
}

/// A second handle on `path` that waits up to ten seconds for the write lock.
#[allow(dead_code)]
pub fn open_shared(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(10))).unwrap()
}

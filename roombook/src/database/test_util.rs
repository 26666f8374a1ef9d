//! Fixtures for the database unit tests.

use std::ops::{Deref, DerefMut};

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::database::{Database, DatabaseConfig};
use crate::reservation::DateRange;

/// A database file that lives as long as the guard.
pub struct TestDatabase {
    db: Database,
    _dir: TempDir,
}

impl Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl DerefMut for TestDatabase {
    fn deref_mut(&mut self) -> &mut Database {
        &mut self.db
    }
}

/// Opens an empty reservation database in a fresh temporary directory.
pub fn create_test_database() -> TestDatabase {
    let dir = TempDir::new().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("roombook.db"))).unwrap();
    TestDatabase { db, _dir: dir }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// January 2024, `start_day` inclusive to `end_day` exclusive.
pub fn range(start_day: u32, end_day: u32) -> DateRange {
    DateRange::new(date(2024, 1, start_day), date(2024, 1, end_day)).unwrap()
}

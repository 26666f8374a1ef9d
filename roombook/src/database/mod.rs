//! Database layer for persistent storage of room reservations.
//!
//! This module provides a SQLite-based [`ReservationStore`](crate::ReservationStore)
//! implementation, including connection management, schema versioning,
//! CRUD operations and the exclusive transactions used for approvals.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use roombook::database::{Database, DatabaseConfig};
//! use roombook::{DateRange, ReservationRecord, ReservationStore};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/roombook.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Store a pending reservation
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//! ).unwrap();
//! let saved = db.save(&ReservationRecord::pending(7, 1, range)).unwrap();
//!
//! // List all reservations
//! for reservation in db.find_all().unwrap() {
//!     println!("{:?}", reservation);
//! }
//! ```

mod config;
mod connection;
pub mod init;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
mod test_util;
mod transaction;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, CONFIG_FILE_NAME,
    DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;
pub use init::{init_data_dir, InitOptions, InitResult};

// Re-export migration functions for advanced use cases
pub use migrations::{
    check_schema_compatibility, get_schema_version, initialize_schema, verify_schema_version,
};

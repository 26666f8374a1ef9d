#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roombook
//!
//! A library for managing room reservations.
//!
//! Reservations move through a small lifecycle (`PENDING` to `APPROVED` or
//! `CANCELLED`). Approval is gated by an availability check that refuses to
//! approve a reservation whose date range overlaps an already approved
//! reservation for the same room.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`ReservationDraft`] and [`DateRange`]: the domain model
//! - [`ReservationStore`]: the persistence contract, implemented by
//!   [`Database`] (`SQLite`) and [`MemoryStore`]
//! - [`ReservationManager`]: the lifecycle state machine
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use roombook::{MemoryStore, ReservationDraft, ReservationManager, ReservationStatus};
//!
//! let mut manager = ReservationManager::new(MemoryStore::new());
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let created = manager.create(&ReservationDraft::new(7, 1, start, end)).unwrap();
//! assert_eq!(created.status(), ReservationStatus::Pending);
//!
//! let approved = manager.approve(created.id()).unwrap();
//! assert_eq!(approved.status(), ReservationStatus::Approved);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod manager;
pub mod reservation;
pub mod store;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, InvalidStateReason, Operation, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use manager::{Availability, AvailabilityChecker, AvailabilityStatus, ReservationManager};
pub use reservation::{
    DateRange, Reservation, ReservationDraft, ReservationId, ReservationRecord,
    ReservationStatus, RoomId, UserId,
};
pub use store::{MemoryStore, Page, ReservationStore, SearchDefaults, SearchFilter};

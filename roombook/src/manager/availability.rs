//! Room availability checks.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::reservation::{DateRange, ReservationId, ReservationStatus, RoomId};
use crate::store::ReservationStore;

/// Whether a room is free for a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    /// No approved reservation overlaps the range.
    Available,
    /// At least one approved reservation overlaps the range.
    Reserved,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Reserved => write!(f, "RESERVED"),
        }
    }
}

/// Outcome of an availability check.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{AvailabilityChecker, DateRange, MemoryStore};
///
/// let store = MemoryStore::new();
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
/// ).unwrap();
///
/// let availability = AvailabilityChecker::check(&store, 12, &range, None).unwrap();
/// assert!(availability.is_available());
/// assert_eq!(availability.message(), "Room 12 is available for reservation");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// The room that was checked.
    pub room_id: RoomId,
    /// The requested dates.
    pub range: DateRange,
    /// The verdict.
    pub status: AvailabilityStatus,
    /// Approved reservations overlapping the range, ordered by id.
    pub conflicts: Vec<ReservationId>,
}

impl Availability {
    /// Returns true if nothing blocks the range.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }

    /// Returns a one-line human-readable verdict.
    #[must_use]
    pub fn message(&self) -> String {
        match self.status {
            AvailabilityStatus::Available => {
                format!("Room {} is available for reservation", self.room_id)
            }
            AvailabilityStatus::Reserved => {
                format!("Room {} is not available for reservation", self.room_id)
            }
        }
    }
}

/// Decides whether a room is free, counting only approved reservations.
pub struct AvailabilityChecker;

impl AvailabilityChecker {
    /// Checks `room_id` for `range`, ignoring the reservation `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn check<S>(
        store: &S,
        room_id: RoomId,
        range: &DateRange,
        exclude: Option<ReservationId>,
    ) -> Result<Availability>
    where
        S: ReservationStore + ?Sized,
    {
        let conflicts =
            store.find_conflict_ids(room_id, range, ReservationStatus::Approved, exclude)?;

        let status = if conflicts.is_empty() {
            AvailabilityStatus::Available
        } else {
            let ids = conflicts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            log::info!("Room {room_id} has approved reservations overlapping {range}: {ids}");
            AvailabilityStatus::Reserved
        };

        Ok(Availability {
            room_id,
            range: *range,
            status,
            conflicts,
        })
    }
}

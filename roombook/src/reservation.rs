//! Reservation types for tracking room bookings.
//!
//! This module provides the reservation entity, its status lifecycle, the
//! half-open [`DateRange`] used for overlap checks, and the input types used
//! to create and persist reservations.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of the user who requested a reservation.
pub type UserId = i64;

/// Identifier of a bookable room.
pub type RoomId = i64;

/// Store-assigned identifier of a reservation.
///
/// Identifiers are always positive.
///
/// # Examples
///
/// ```
/// use roombook::ReservationId;
///
/// let id = ReservationId::try_from(42).unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
///
/// assert!(ReservationId::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReservationId(i64);

impl ReservationId {
    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ReservationId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError {
                field: "id".into(),
                message: format!("reservation id must be positive, got {value}"),
            });
        }
        Ok(Self(value))
    }
}

impl From<ReservationId> for i64 {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a reservation.
///
/// Reservations start out `PENDING`. `APPROVED` and `CANCELLED` are terminal.
///
/// # Examples
///
/// ```
/// use roombook::ReservationStatus;
///
/// let status: ReservationStatus = "approved".parse().unwrap();
/// assert_eq!(status, ReservationStatus::Approved);
/// assert_eq!(status.to_string(), "APPROVED");
/// assert!(status.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Awaiting approval or cancellation.
    Pending,
    /// Approved; holds the room for its date range.
    Approved,
    /// Cancelled before approval.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the canonical upper-case name used in storage and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true if no further transition is possible from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }
}

/// A validated half-open date range `[start, end)`.
///
/// The end date is exclusive, so a range ending on the day another starts
/// does not overlap it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::DateRange;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
///
/// let first = DateRange::new(d(1), d(10)).unwrap();
/// let back_to_back = DateRange::new(d(10), d(20)).unwrap();
/// let overlapping = DateRange::new(d(9), d(15)).unwrap();
///
/// assert!(!first.overlaps(&back_to_back));
/// assert!(first.overlaps(&overlapping));
///
/// // The end must be strictly after the start
/// assert!(DateRange::new(d(5), d(5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not strictly after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError {
                field: "end_date".into(),
                message: format!("end date {end} must be after start date {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of days covered by the range.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A persisted room reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{DateRange, Reservation, ReservationId, ReservationStatus};
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
/// ).unwrap();
/// let id = ReservationId::try_from(1).unwrap();
/// let reservation = Reservation::new(id, 10, 2, range, ReservationStatus::Pending);
///
/// assert_eq!(reservation.room_id(), 2);
/// assert!(reservation.is_pending());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    user_id: UserId,
    room_id: RoomId,
    range: DateRange,
    status: ReservationStatus,
}

impl Reservation {
    /// Creates a reservation from its stored parts.
    #[must_use]
    pub const fn new(
        id: ReservationId,
        user_id: UserId,
        room_id: RoomId,
        range: DateRange,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id,
            user_id,
            room_id,
            range,
            status,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the booked date range.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Returns the first booked day.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.range.start
    }

    /// Returns the exclusive end date.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.range.end
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true if the reservation is still awaiting a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, ReservationStatus::Pending)
    }
}

/// Caller-supplied reservation details for create and update.
///
/// Dates are kept unvalidated here so that the manager can report a bad
/// ordering as an invalid argument. `id` and `status` exist only so that
/// requests carrying them can be rejected on creation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::ReservationDraft;
///
/// let draft = ReservationDraft::new(
///     7,
///     1,
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// );
/// assert!(draft.date_range().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    /// Must be absent on creation.
    #[serde(default)]
    pub id: Option<ReservationId>,
    /// The requesting user.
    pub user_id: UserId,
    /// The room to book.
    pub room_id: RoomId,
    /// First booked day.
    pub start_date: NaiveDate,
    /// Exclusive end date.
    pub end_date: NaiveDate,
    /// Must be absent on creation.
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

impl ReservationDraft {
    /// Creates a draft with no id and no status.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user_id,
            room_id,
            start_date,
            end_date,
            status: None,
        }
    }

    /// Sets the id field.
    #[must_use]
    pub const fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the status field.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Validates and returns the draft's date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the end date is not after the start date.
    pub fn date_range(&self) -> Result<DateRange, ValidationError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// A reservation as handed to [`crate::ReservationStore::save`].
///
/// Records without an id are inserted and receive a fresh one. Records with
/// an id replace the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    /// Existing id, or `None` for an insert.
    pub id: Option<ReservationId>,
    /// The requesting user.
    pub user_id: UserId,
    /// The booked room.
    pub room_id: RoomId,
    /// The booked dates.
    pub range: DateRange,
    /// Status to persist.
    pub status: ReservationStatus,
}

impl ReservationRecord {
    /// Creates a new, not yet persisted, pending record.
    #[must_use]
    pub const fn pending(user_id: UserId, room_id: RoomId, range: DateRange) -> Self {
        Self {
            id: None,
            user_id,
            room_id,
            range,
            status: ReservationStatus::Pending,
        }
    }

    /// Returns the same record with a different status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Materializes the record under the given id.
    #[must_use]
    pub const fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation::new(id, self.user_id, self.room_id, self.range, self.status)
    }
}

impl From<&Reservation> for ReservationRecord {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: Some(reservation.id),
            user_id: reservation.user_id,
            room_id: reservation.room_id,
            range: reservation.range,
            status: reservation.status,
        }
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;

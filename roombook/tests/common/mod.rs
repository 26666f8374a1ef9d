//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the roombook library.

pub mod database;

use chrono::NaiveDate;
use roombook::{DateRange, ReservationDraft, RoomId, UserId};

/// Builds a date in 2024.
#[allow(dead_code)]
pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// Builds a range within one month of 2024.
#[allow(dead_code)]
pub fn range(month: u32, start_day: u32, end_day: u32) -> DateRange {
    DateRange::new(day(month, start_day), day(month, end_day)).unwrap()
}

/// Builder for reservation drafts with sensible defaults.
///
/// Defaults to user 1, room 1, 2024-01-01 up to 2024-01-05.
#[allow(dead_code)]
pub struct DraftFixture {
    user_id: UserId,
    room_id: RoomId,
    start: NaiveDate,
    end: NaiveDate,
}

#[allow(dead_code)]
impl DraftFixture {
    /// Creates a new fixture builder with default values.
    pub fn new() -> Self {
        Self {
            user_id: 1,
            room_id: 1,
            start: day(1, 1),
            end: day(1, 5),
        }
    }

    /// Sets the requesting user.
    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the room.
    pub fn room(mut self, room_id: RoomId) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets the dates.
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Builds the draft.
    pub fn build(self) -> ReservationDraft {
        ReservationDraft::new(self.user_id, self.room_id, self.start, self.end)
    }
}

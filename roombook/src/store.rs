//! The reservation store contract.
//!
//! The store is a dumb record keeper: it persists reservations and answers
//! queries, while the [`crate::ReservationManager`] owns every lifecycle
//! rule. Two implementations ship with the crate: [`crate::Database`]
//! (`SQLite`) and [`MemoryStore`].

mod memory;

pub use memory::MemoryStore;

use crate::error::{Error, Result};
use crate::reservation::{
    DateRange, Reservation, ReservationId, ReservationRecord, ReservationStatus, RoomId, UserId,
};

/// Persistence operations required by the reservation manager.
pub trait ReservationStore {
    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Returns every reservation ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_all(&self) -> Result<Vec<Reservation>>;

    /// Returns one page of reservations matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn search(&self, filter: &SearchFilter, page: Page) -> Result<Vec<Reservation>>;

    /// Inserts a record without an id or replaces the record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn save(&mut self, record: &ReservationRecord) -> Result<Reservation>;

    /// Removes a reservation, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn delete_by_id(&mut self, id: ReservationId) -> Result<bool>;

    /// Returns whether a reservation with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn exists_by_id(&self, id: ReservationId) -> Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Returns ids of reservations for `room_id` in `status` whose range
    /// overlaps `range`, skipping `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_conflict_ids(
        &self,
        room_id: RoomId,
        range: &DateRange,
        status: ReservationStatus,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>>;

    /// Runs `f` with exclusive write access to the store.
    ///
    /// Changes made by `f` become visible atomically when it returns `Ok` and
    /// are discarded when it returns `Err`. No other writer can interleave
    /// between the reads and writes performed inside `f`.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a storage error if exclusive access
    /// cannot be acquired or committed.
    fn exclusive<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}

/// Criteria for [`ReservationStore::search`].
///
/// Unset page fields fall back to [`SearchDefaults`].
///
/// # Examples
///
/// ```
/// use roombook::SearchFilter;
///
/// let filter = SearchFilter::new().with_room(3).with_page_size(25);
/// assert_eq!(filter.room_id, Some(3));
/// assert_eq!(filter.user_id, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Only reservations for this room.
    pub room_id: Option<RoomId>,
    /// Only reservations by this user.
    pub user_id: Option<UserId>,
    /// Zero-based page number.
    pub page: Option<u32>,
    /// Number of results per page.
    pub page_size: Option<u32>,
}

impl SearchFilter {
    /// Creates a filter matching everything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            room_id: None,
            user_id: None,
            page: None,
            page_size: None,
        }
    }

    /// Restricts results to one room.
    #[must_use]
    pub const fn with_room(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Restricts results to one user.
    #[must_use]
    pub const fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Selects a zero-based page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Returns true if the reservation satisfies the room and user criteria.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.room_id.map_or(true, |room| reservation.room_id() == room)
            && self.user_id.map_or(true, |user| reservation.user_id() == user)
    }
}

/// A resolved page of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page number.
    pub number: u32,
    /// Number of results per page; always positive.
    pub size: u32,
}

impl Page {
    /// Number of results to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

/// Paging defaults applied to searches that leave page fields unset.
///
/// # Examples
///
/// ```
/// use roombook::{SearchDefaults, SearchFilter};
///
/// let defaults = SearchDefaults::default();
/// let page = defaults.resolve(&SearchFilter::new()).unwrap();
/// assert_eq!(page.number, 0);
/// assert_eq!(page.size, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    /// Page size used when the filter has none.
    pub page_size: u32,
    /// Upper bound applied to requested page sizes.
    pub max_page_size: Option<u32>,
}

/// Page size used when neither the filter nor configuration sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }
}

impl SearchDefaults {
    /// Resolves the filter's page fields against these defaults.
    ///
    /// Page sizes above `max_page_size` are capped.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested page size is zero.
    pub fn resolve(&self, filter: &SearchFilter) -> Result<Page> {
        let requested = filter.page_size.unwrap_or(self.page_size);
        if requested == 0 {
            return Err(Error::InvalidArgument {
                field: "page_size".into(),
                message: "page size must be positive".into(),
            });
        }

        let size = match self.max_page_size {
            Some(max) if requested > max => {
                log::debug!("Capping page size {requested} to {max}");
                max
            }
            _ => requested,
        };

        Ok(Page {
            number: filter.page.unwrap_or(0),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reservation(id: i64, user_id: UserId, room_id: RoomId) -> Reservation {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap();
        Reservation::new(
            ReservationId::try_from(id).unwrap(),
            user_id,
            room_id,
            range,
            ReservationStatus::Pending,
        )
    }

    #[test]
    fn test_filter_matches_everything_by_default() {
        let filter = SearchFilter::new();
        assert!(filter.matches(&reservation(1, 5, 6)));
    }

    #[test]
    fn test_filter_matches_room_and_user() {
        let filter = SearchFilter::new().with_room(6).with_user(5);
        assert!(filter.matches(&reservation(1, 5, 6)));
        assert!(!filter.matches(&reservation(2, 5, 7)));
        assert!(!filter.matches(&reservation(3, 4, 6)));
    }

    #[test]
    fn test_defaults_resolve_to_first_page_of_ten() {
        let page = SearchDefaults::default()
            .resolve(&SearchFilter::new())
            .unwrap();
        assert_eq!(page, Page { number: 0, size: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_filter_page_fields_override_defaults() {
        let filter = SearchFilter::new().with_page(3).with_page_size(7);
        let page = SearchDefaults::default().resolve(&filter).unwrap();
        assert_eq!(page, Page { number: 3, size: 7 });
        assert_eq!(page.offset(), 21);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let filter = SearchFilter::new().with_page_size(0);
        let err = SearchDefaults::default().resolve(&filter).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref field, .. } if field == "page_size"));
    }

    #[test]
    fn test_max_page_size_caps_request() {
        let defaults = SearchDefaults {
            page_size: 10,
            max_page_size: Some(50),
        };
        let page = defaults
            .resolve(&SearchFilter::new().with_page_size(500))
            .unwrap();
        assert_eq!(page.size, 50);
    }
}

//! The reservation lifecycle.
//!
//! [`ReservationManager`] owns every rule about how reservations change:
//! drafts are validated, only `PENDING` reservations may be updated,
//! cancelled or approved, and approval is refused while an overlapping
//! approved reservation exists for the same room.
//!
//! Every mutating operation runs inside [`ReservationStore::exclusive`], so
//! the checks and the write it guards are atomic with respect to other
//! writers.

mod availability;

pub use availability::{Availability, AvailabilityChecker, AvailabilityStatus};

use crate::error::{Error, InvalidStateReason, Operation, Result};
use crate::reservation::{
    DateRange, Reservation, ReservationDraft, ReservationId, ReservationRecord, ReservationStatus,
    RoomId,
};
use crate::store::{ReservationStore, SearchDefaults, SearchFilter};

/// Drives reservations through their lifecycle on top of a store.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{ErrorKind, MemoryStore, ReservationDraft, ReservationManager};
///
/// let mut manager = ReservationManager::new(MemoryStore::new());
/// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
///
/// let first = manager.create(&ReservationDraft::new(1, 4, d(1), d(5))).unwrap();
/// let second = manager.create(&ReservationDraft::new(2, 4, d(3), d(8))).unwrap();
///
/// manager.approve(first.id()).unwrap();
/// let err = manager.approve(second.id()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidState);
/// assert!(err.is_conflict());
/// ```
#[derive(Debug)]
pub struct ReservationManager<S> {
    store: S,
    defaults: SearchDefaults,
}

impl<S: ReservationStore> ReservationManager<S> {
    /// Creates a manager with the default paging settings.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            defaults: SearchDefaults::default(),
        }
    }

    /// Replaces the paging defaults used by [`Self::search`].
    #[must_use]
    pub const fn with_search_defaults(mut self, defaults: SearchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Returns the paging defaults used by [`Self::search`].
    #[must_use]
    pub const fn search_defaults(&self) -> SearchDefaults {
        self.defaults
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the manager, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the reservation with this id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such reservation exists, or a
    /// storage error.
    pub fn get(&self, id: ReservationId) -> Result<Reservation> {
        load(&self.store, id)
    }

    /// Returns every reservation ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn list(&self) -> Result<Vec<Reservation>> {
        self.store.find_all()
    }

    /// Returns one page of reservations matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the page size is zero, or a
    /// storage error.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<Reservation>> {
        let page = self.defaults.resolve(filter)?;
        log::debug!(
            "Searching reservations (room {:?}, user {:?}, page {}, size {})",
            filter.room_id,
            filter.user_id,
            page.number,
            page.size
        );
        self.store.search(filter, page)
    }

    /// Creates a `PENDING` reservation from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the draft carries an id or a
    /// status, or if its end date is not after its start date.
    pub fn create(&mut self, draft: &ReservationDraft) -> Result<Reservation> {
        if draft.id.is_some() {
            return Err(Error::InvalidArgument {
                field: "id".into(),
                message: "id must not be set when creating a reservation".into(),
            });
        }
        if draft.status.is_some() {
            return Err(Error::InvalidArgument {
                field: "status".into(),
                message: "status must not be set when creating a reservation".into(),
            });
        }
        let range = draft.date_range()?;

        let record = ReservationRecord::pending(draft.user_id, draft.room_id, range);
        let created = self.store.exclusive(|store| store.save(&record))?;

        log::info!(
            "Created reservation {} for room {} ({range})",
            created.id(),
            created.room_id()
        );
        Ok(created)
    }

    /// Replaces the user, room and dates of a `PENDING` reservation.
    ///
    /// Any id or status on the draft is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`], [`Error::InvalidState`] if the
    /// reservation is not `PENDING`, or [`Error::InvalidArgument`] if the
    /// draft's end date is not after its start date. Checks happen in that
    /// order.
    pub fn update(&mut self, id: ReservationId, draft: &ReservationDraft) -> Result<Reservation> {
        let updated = self.store.exclusive(|store| {
            load_pending(&*store, id, Operation::Update)?;
            let range = draft.date_range()?;

            let record = ReservationRecord {
                id: Some(id),
                user_id: draft.user_id,
                room_id: draft.room_id,
                range,
                status: ReservationStatus::Pending,
            };
            store.save(&record)
        })?;

        log::info!("Updated reservation {id}");
        Ok(updated)
    }

    /// Cancels a `PENDING` reservation and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or [`Error::InvalidState`] if the
    /// reservation is not `PENDING`.
    pub fn cancel(&mut self, id: ReservationId) -> Result<Reservation> {
        let cancelled = self
            .store
            .exclusive(|store| cancel_pending(store, id))?;

        log::info!("Cancelled reservation {id}");
        Ok(cancelled)
    }

    /// Deletes a reservation whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such reservation exists.
    pub fn delete(&mut self, id: ReservationId) -> Result<()> {
        self.store.exclusive(|store| {
            if store.delete_by_id(id)? {
                Ok(())
            } else {
                Err(Error::NotFound { id })
            }
        })?;

        log::info!("Deleted reservation {id}");
        Ok(())
    }

    /// Approves a `PENDING` reservation if no approved reservation for the
    /// same room overlaps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`], or [`Error::InvalidState`] if the
    /// reservation is not `PENDING` or conflicts with an approved one.
    pub fn approve(&mut self, id: ReservationId) -> Result<Reservation> {
        let approved = self
            .store
            .exclusive(|store| approve_pending(store, id))?;

        log::info!(
            "Approved reservation {id} for room {} ({})",
            approved.room_id(),
            approved.range()
        );
        Ok(approved)
    }

    /// Reports whether `room_id` is free for `range`.
    ///
    /// No reservation is excluded from this check.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be queried.
    pub fn check_availability(&self, room_id: RoomId, range: &DateRange) -> Result<Availability> {
        AvailabilityChecker::check(&self.store, room_id, range, None)
    }
}

fn load<S: ReservationStore + ?Sized>(store: &S, id: ReservationId) -> Result<Reservation> {
    store.find_by_id(id)?.ok_or(Error::NotFound { id })
}

fn require_pending(reservation: &Reservation, operation: Operation) -> Result<()> {
    if reservation.is_pending() {
        return Ok(());
    }

    log::warn!(
        "Refusing to {operation} reservation {}: status is {}",
        reservation.id(),
        reservation.status()
    );
    Err(Error::InvalidState {
        id: reservation.id(),
        operation,
        reason: InvalidStateReason::WrongStatus(reservation.status()),
    })
}

/// Loads `id` and requires it to still be `PENDING`.
fn load_pending<S: ReservationStore>(
    store: &S,
    id: ReservationId,
    operation: Operation,
) -> Result<Reservation> {
    let existing = load(store, id)?;
    require_pending(&existing, operation)?;
    Ok(existing)
}

fn cancel_pending<S: ReservationStore>(store: &mut S, id: ReservationId) -> Result<Reservation> {
    let existing = load_pending(&*store, id, Operation::Cancel)?;
    store.save(&ReservationRecord::from(&existing).with_status(ReservationStatus::Cancelled))
}

/// Approves `id` unless an approved reservation for its room overlaps it.
fn approve_pending<S: ReservationStore>(store: &mut S, id: ReservationId) -> Result<Reservation> {
    let existing = load_pending(&*store, id, Operation::Approve)?;

    let availability =
        AvailabilityChecker::check(&*store, existing.room_id(), existing.range(), Some(id))?;
    if !availability.is_available() {
        log::warn!(
            "Refusing to approve reservation {id}: {}",
            availability.message()
        );
        return Err(Error::InvalidState {
            id,
            operation: Operation::Approve,
            reason: InvalidStateReason::Conflict(availability.conflicts),
        });
    }

    store.save(&ReservationRecord::from(&existing).with_status(ReservationStatus::Approved))
}

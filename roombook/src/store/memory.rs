//! In-memory reservation store.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::reservation::{
    DateRange, Reservation, ReservationId, ReservationRecord, ReservationStatus, RoomId,
};

use super::{Page, ReservationStore, SearchFilter};

/// A [`ReservationStore`] that keeps everything in memory.
///
/// Reservations are kept ordered by id, with a per-room index so conflict
/// queries only look at reservations for the requested room.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{DateRange, MemoryStore, ReservationRecord, ReservationStore};
///
/// let mut store = MemoryStore::new();
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
/// ).unwrap();
///
/// let saved = store.save(&ReservationRecord::pending(1, 2, range)).unwrap();
/// assert_eq!(saved.id().value(), 1);
/// assert!(store.exists_by_id(saved.id()).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<ReservationId, Reservation>,
    by_room: HashMap<RoomId, BTreeSet<ReservationId>>,
    last_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored reservations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no reservations are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&mut self) -> Result<ReservationId> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| Error::InvalidArgument {
                field: "id".into(),
                message: format!("no reservation ids left after {}", self.last_id),
            })?;
        let id = ReservationId::try_from(next)?;
        self.last_id = next;
        Ok(id)
    }

    fn unindex(&mut self, reservation: &Reservation) {
        if let Some(ids) = self.by_room.get_mut(&reservation.room_id()) {
            ids.remove(&reservation.id());
            if ids.is_empty() {
                self.by_room.remove(&reservation.room_id());
            }
        }
    }
}

impl ReservationStore for MemoryStore {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.records.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Reservation>> {
        Ok(self.records.values().cloned().collect())
    }

    fn search(&self, filter: &SearchFilter, page: Page) -> Result<Vec<Reservation>> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.size).unwrap_or(usize::MAX);

        Ok(self
            .records
            .values()
            .filter(|r| filter.matches(r))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    fn save(&mut self, record: &ReservationRecord) -> Result<Reservation> {
        let id = match record.id {
            Some(id) => {
                self.last_id = self.last_id.max(id.value());
                id
            }
            None => self.next_id()?,
        };

        if let Some(previous) = self.records.get(&id).cloned() {
            self.unindex(&previous);
        }

        let reservation = record.clone().into_reservation(id);
        self.by_room
            .entry(reservation.room_id())
            .or_default()
            .insert(id);
        self.records.insert(id, reservation.clone());

        Ok(reservation)
    }

    fn delete_by_id(&mut self, id: ReservationId) -> Result<bool> {
        match self.records.remove(&id) {
            Some(removed) => {
                self.unindex(&removed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn exists_by_id(&self, id: ReservationId) -> Result<bool> {
        Ok(self.records.contains_key(&id))
    }

    fn find_conflict_ids(
        &self,
        room_id: RoomId,
        range: &DateRange,
        status: ReservationStatus,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>> {
        let Some(ids) = self.by_room.get(&room_id) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .filter(|id| Some(**id) != exclude)
            .filter_map(|id| self.records.get(id))
            .filter(|r| r.status() == status && r.range().overlaps(range))
            .map(Reservation::id)
            .collect())
    }

    fn exclusive<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(start_day: u32, end_day: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, end_day).unwrap(),
        )
        .unwrap()
    }

    fn save(store: &mut MemoryStore, room: RoomId, r: DateRange, status: ReservationStatus) -> Reservation {
        store
            .save(&ReservationRecord::pending(1, room, r).with_status(status))
            .unwrap()
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let a = save(&mut store, 1, range(1, 2), ReservationStatus::Pending);
        let b = save(&mut store, 1, range(1, 2), ReservationStatus::Pending);
        assert_eq!(a.id().value(), 1);
        assert_eq!(b.id().value(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_replaces_record_and_reindexes_room() {
        let mut store = MemoryStore::new();
        let original = save(&mut store, 1, range(1, 5), ReservationStatus::Approved);

        let mut moved = ReservationRecord::from(&original);
        moved.room_id = 2;
        store.save(&moved).unwrap();

        assert!(store
            .find_conflict_ids(1, &range(1, 5), ReservationStatus::Approved, None)
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .find_conflict_ids(2, &range(1, 5), ReservationStatus::Approved, None)
                .unwrap(),
            vec![original.id()]
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_with_unknown_id_inserts_and_advances_sequence() {
        let mut store = MemoryStore::new();
        let mut record = ReservationRecord::pending(1, 1, range(1, 2));
        record.id = Some(ReservationId::try_from(10).unwrap());
        store.save(&record).unwrap();

        let next = save(&mut store, 1, range(1, 2), ReservationStatus::Pending);
        assert_eq!(next.id().value(), 11);
    }

    #[test]
    fn test_exhausted_id_sequence_is_an_error() {
        let mut store = MemoryStore::new();
        let mut record = ReservationRecord::pending(1, 1, range(1, 2));
        record.id = Some(ReservationId::try_from(i64::MAX).unwrap());
        store.save(&record).unwrap();

        let err = store
            .save(&ReservationRecord::pending(1, 1, range(3, 4)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref field, .. } if field == "id"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let r = save(&mut store, 1, range(1, 2), ReservationStatus::Pending);

        assert!(store.delete_by_id(r.id()).unwrap());
        assert!(!store.delete_by_id(r.id()).unwrap());
        assert!(!store.exists_by_id(r.id()).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_conflicts_respect_status_room_and_exclusion() {
        let mut store = MemoryStore::new();
        let approved = save(&mut store, 1, range(1, 10), ReservationStatus::Approved);
        save(&mut store, 1, range(1, 10), ReservationStatus::Pending);
        save(&mut store, 1, range(1, 10), ReservationStatus::Cancelled);
        save(&mut store, 2, range(1, 10), ReservationStatus::Approved);

        let conflicts = store
            .find_conflict_ids(1, &range(5, 15), ReservationStatus::Approved, None)
            .unwrap();
        assert_eq!(conflicts, vec![approved.id()]);

        let excluded = store
            .find_conflict_ids(1, &range(5, 15), ReservationStatus::Approved, Some(approved.id()))
            .unwrap();
        assert!(excluded.is_empty());

        let back_to_back = store
            .find_conflict_ids(1, &range(10, 20), ReservationStatus::Approved, None)
            .unwrap();
        assert!(back_to_back.is_empty());
    }

    #[test]
    fn test_search_pages_in_id_order() {
        let mut store = MemoryStore::new();
        for _ in 0..5 {
            save(&mut store, 1, range(1, 2), ReservationStatus::Pending);
        }
        save(&mut store, 2, range(1, 2), ReservationStatus::Pending);

        let filter = SearchFilter::new().with_room(1);
        let first = store.search(&filter, Page { number: 0, size: 2 }).unwrap();
        let last = store.search(&filter, Page { number: 2, size: 2 }).unwrap();
        let beyond = store.search(&filter, Page { number: 3, size: 2 }).unwrap();

        let ids = |rs: &[Reservation]| rs.iter().map(|r| r.id().value()).collect::<Vec<_>>();
        assert_eq!(ids(&first), vec![1, 2]);
        assert_eq!(ids(&last), vec![5]);
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_exclusive_rolls_back_on_error() {
        let mut store = MemoryStore::new();
        let kept = save(&mut store, 1, range(1, 2), ReservationStatus::Pending);

        let result: Result<()> = store.exclusive(|s| {
            s.save(&ReservationRecord::pending(2, 2, range(3, 4)))?;
            s.delete_by_id(kept.id())?;
            Err(Error::InvalidArgument {
                field: "test".into(),
                message: "abort".into(),
            })
        });

        assert!(result.is_err());
        assert_eq!(store.find_all().unwrap(), vec![kept]);
    }

    #[test]
    fn test_exclusive_commits_on_success() {
        let mut store = MemoryStore::new();
        let saved = store
            .exclusive(|s| s.save(&ReservationRecord::pending(2, 2, range(3, 4))))
            .unwrap();
        assert!(store.exists_by_id(saved.id()).unwrap());
    }
}

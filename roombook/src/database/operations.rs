//! Database CRUD operations for reservations.
//!
//! This module implements the create, read, update, and delete operations
//! for room reservations, and the [`ReservationStore`] implementation built
//! on top of them.

use chrono::{Datelike, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{
    DateRange, Reservation, ReservationId, ReservationRecord, ReservationStatus, RoomId,
};
use crate::store::{Page, ReservationStore, SearchFilter};

use super::connection::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date for storage.
///
/// Only four-digit years are accepted, so that the stored text sorts in
/// date order and the overlap predicate can be evaluated in SQL.
fn date_to_sql(field: &str, date: NaiveDate) -> Result<String> {
    if !(0..=9999).contains(&date.year()) {
        return Err(Error::InvalidArgument {
            field: field.into(),
            message: format!("year {} is outside the supported range 0000-9999", date.year()),
        });
    }
    Ok(date.format(DATE_FORMAT).to_string())
}

fn date_from_sql(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `user_id`, `room_id`, `start_date`,
/// `end_date`, status
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let room_id: i64 = row.get(2)?;
    let start: String = row.get(3)?;
    let end: String = row.get(4)?;
    let status: String = row.get(5)?;

    let id = ReservationId::try_from(id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e)))?;
    let range = DateRange::new(date_from_sql(3, &start)?, date_from_sql(4, &end)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Reservation::new(id, user_id, room_id, range, status))
}

// SQL statements for CRUD operations
const SELECT_BY_ID: &str = r"
    SELECT id, user_id, room_id, start_date, end_date, status
    FROM reservations
    WHERE id = ?1
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, user_id, room_id, start_date, end_date, status
    FROM reservations
    ORDER BY id
";

const SEARCH_RESERVATIONS: &str = r"
    SELECT id, user_id, room_id, start_date, end_date, status
    FROM reservations
    WHERE (?1 IS NULL OR room_id = ?1)
      AND (?2 IS NULL OR user_id = ?2)
    ORDER BY id
    LIMIT ?3 OFFSET ?4
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (user_id, room_id, start_date, end_date, status)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const UPSERT_RESERVATION: &str = r"
    INSERT INTO reservations (id, user_id, room_id, start_date, end_date, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id) DO UPDATE SET
        user_id = excluded.user_id,
        room_id = excluded.room_id,
        start_date = excluded.start_date,
        end_date = excluded.end_date,
        status = excluded.status
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?1";

const CHECK_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM reservations WHERE id = ?1)";

// Half-open overlap: existing.start < requested.end AND requested.start < existing.end
const SELECT_CONFLICTS: &str = r"
    SELECT id
    FROM reservations
    WHERE room_id = ?1
      AND status = ?2
      AND start_date < ?4
      AND ?3 < end_date
      AND (?5 IS NULL OR id <> ?5)
    ORDER BY id
";

impl Database {
    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(conn
            .query_row(SELECT_BY_ID, [i64::from(id)], row_to_reservation)
            .optional()?)
    }

    /// Lists all reservations ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Returns one page of reservations matching the filter's room and user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_reservations(
        conn: &Connection,
        filter: &SearchFilter,
        page: Page,
    ) -> Result<Vec<Reservation>> {
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(SEARCH_RESERVATIONS)?;
        let reservations = stmt
            .query_map(
                params![filter.room_id, filter.user_id, i64::from(page.size), offset],
                row_to_reservation,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Inserts or replaces a reservation row.
    ///
    /// Records without an id receive the next id from the table's sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be stored or the statement fails.
    pub fn save_reservation(conn: &Connection, record: &ReservationRecord) -> Result<Reservation> {
        let start = date_to_sql("start_date", record.range.start())?;
        let end = date_to_sql("end_date", record.range.end())?;
        let status = record.status.as_str();

        let id = match record.id {
            Some(id) => {
                conn.execute(
                    UPSERT_RESERVATION,
                    params![i64::from(id), record.user_id, record.room_id, start, end, status],
                )?;
                id
            }
            None => {
                conn.execute(
                    INSERT_RESERVATION,
                    params![record.user_id, record.room_id, start, end, status],
                )?;
                ReservationId::try_from(conn.last_insert_rowid())?
            }
        };

        Ok(record.clone().into_reservation(id))
    }

    /// Deletes a reservation by id, returning whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_reservation(conn: &Connection, id: ReservationId) -> Result<bool> {
        let rows = conn.execute(DELETE_RESERVATION, [i64::from(id)])?;
        Ok(rows > 0)
    }

    /// Returns whether a reservation with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn reservation_exists(conn: &Connection, id: ReservationId) -> Result<bool> {
        Ok(conn.query_row(CHECK_EXISTS, [i64::from(id)], |row| row.get(0))?)
    }

    /// Returns ids of reservations for the room in `status` whose dates
    /// overlap `range`, excluding `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be stored or the query fails.
    pub fn find_conflicting_ids(
        conn: &Connection,
        room_id: RoomId,
        range: &DateRange,
        status: ReservationStatus,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>> {
        let start = date_to_sql("start_date", range.start())?;
        let end = date_to_sql("end_date", range.end())?;

        let mut stmt = conn.prepare(SELECT_CONFLICTS)?;
        let ids = stmt
            .query_map(
                params![room_id, status.as_str(), start, end, exclude.map(i64::from)],
                |row| row.get::<_, i64>(0),
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        ids.into_iter()
            .map(|id| ReservationId::try_from(id).map_err(Error::from))
            .collect()
    }

    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrity check fails or detects corruption.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/roombook.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// db.verify_integrity().unwrap();
    /// ```
    pub fn verify_integrity(&mut self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}

impl ReservationStore for Database {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Self::get_reservation(&self.conn, id)
    }

    fn find_all(&self) -> Result<Vec<Reservation>> {
        Self::list_all_reservations(&self.conn)
    }

    fn search(&self, filter: &SearchFilter, page: Page) -> Result<Vec<Reservation>> {
        Self::search_reservations(&self.conn, filter, page)
    }

    fn save(&mut self, record: &ReservationRecord) -> Result<Reservation> {
        Self::save_reservation(&self.conn, record)
    }

    fn delete_by_id(&mut self, id: ReservationId) -> Result<bool> {
        Self::delete_reservation(&self.conn, id)
    }

    fn exists_by_id(&self, id: ReservationId) -> Result<bool> {
        Self::reservation_exists(&self.conn, id)
    }

    fn find_conflict_ids(
        &self,
        room_id: RoomId,
        range: &DateRange,
        status: ReservationStatus,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>> {
        Self::find_conflicting_ids(&self.conn, room_id, range, status, exclude)
    }

    fn exclusive<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.with_immediate_transaction(f)
    }
}

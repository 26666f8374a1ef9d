//! Transaction management utilities.
//!
//! Mutating reservation operations read state, decide, then write. They run
//! inside an immediate transaction so that the write lock is taken before
//! the first read and no other connection can commit in between.

use rusqlite::ErrorCode;

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Runs `f` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err`. When the connection is already inside a transaction,
    /// `f` simply joins it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the write lock cannot be acquired
    /// within the busy timeout, the error returned by `f`, or a database
    /// error if the commit fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    /// use roombook::ReservationStore;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
    /// let count = db
    ///     .with_immediate_transaction(|db| Ok(db.find_all()?.len()))
    ///     .unwrap();
    /// println!("{count} reservations");
    /// ```
    pub fn with_immediate_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if !self.conn.is_autocommit() {
            return f(self);
        }

        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| self.lock_error(e))?;

        match f(self) {
            Ok(value) => {
                if let Err(e) = self.conn.execute_batch("COMMIT") {
                    self.rollback();
                    return Err(self.lock_error(e));
                }
                Ok(value)
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn rollback(&self) {
        if self.conn.is_autocommit() {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            log::warn!("Failed to roll back transaction: {e}");
        }
    }

    /// Maps `SQLITE_BUSY` to a lock timeout; other errors pass through.
    fn lock_error(&self, err: rusqlite::Error) -> Error {
        match err {
            rusqlite::Error::SqliteFailure(ref e, _) if e.code == ErrorCode::DatabaseBusy => {
                Error::LockTimeout {
                    seconds: self.config.busy_timeout.as_secs(),
                }
            }
            other => Error::Database(other),
        }
    }
}

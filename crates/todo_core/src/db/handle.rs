//! Owned, lazily opened database handle.
//!
//! # Responsibility
//! - Remember where the task database lives without touching disk.
//! - Open, configure and migrate the connection on first use only.
//! - Tie connection teardown to the owner (`close` or drop).
//!
//! # Invariants
//! - At most one connection is opened per handle.
//! - A failed open leaves the handle unopened; the next call retries.

use super::{open_db, open_db_in_memory, DbResult};
use log::{info, warn};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Storage target for a [`DbHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// SQLite database file, created on first open.
    File(PathBuf),
    /// Private in-memory database, discarded when the handle closes.
    Memory,
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => write!(f, ":memory:"),
        }
    }
}

/// Lazily initialized connection owned by the application.
///
/// Repositories borrow the handle and ask for the connection per operation,
/// so nothing is opened until the first store call.
#[derive(Debug)]
pub struct DbHandle {
    location: DbLocation,
    conn: OnceCell<Connection>,
}

impl DbHandle {
    /// Creates a handle for a database file. Does not open it.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(DbLocation::File(path.as_ref().to_path_buf()))
    }

    /// Creates a handle for a fresh in-memory database. Does not open it.
    pub fn in_memory() -> Self {
        Self::new(DbLocation::Memory)
    }

    fn new(location: DbLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Returns whether the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Returns the connection, opening and migrating it on first use.
    ///
    /// # Errors
    /// - Returns `DbError` when the open, pragma setup or migrations fail.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        })
    }

    /// Closes the connection if it was opened.
    ///
    /// Unlike dropping the handle, close failures are reported.
    pub fn close(mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!(
                    "event=db_close module=db status=ok location={}",
                    self.location
                );
                Ok(())
            }
            Err((_conn, err)) => {
                warn!(
                    "event=db_close module=db status=error location={} error={}",
                    self.location, err
                );
                Err(err.into())
            }
        }
    }
}

impl Drop for DbHandle {
    fn drop(&mut self) {
        if self.conn.take().is_some() {
            info!(
                "event=db_close module=db status=ok mode=drop location={}",
                self.location
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DbHandle, DbLocation};

    #[test]
    fn handle_opens_lazily_and_reuses_connection() {
        let handle = DbHandle::in_memory();
        assert!(!handle.is_open());

        let first = handle.connection().expect("in-memory open should succeed");
        assert!(handle.is_open());
        let second = handle.connection().expect("second call reuses connection");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn close_on_unopened_handle_is_noop() {
        let handle = DbHandle::file("/nonexistent/dir/never-opened.sqlite3");
        assert!(matches!(handle.location(), DbLocation::File(_)));
        handle.close().expect("closing an unopened handle should succeed");
    }

    #[test]
    fn location_display_is_readable() {
        assert_eq!(DbLocation::Memory.to_string(), ":memory:");
    }
}

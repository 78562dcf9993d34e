//! Where task records live on disk.
//!
//! # Responsibility
//! - Hand out a ready-to-use SQLite connection through [`DbHandle`].
//! - Bring older task databases up to the current `tasks` schema.
//!
//! # Invariants
//! - A connection is never returned before its schema is current.
//! - A database written by a newer build is refused, not downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;
pub mod migrations;
mod open;

pub use handle::{DbHandle, DbLocation};
pub use open::{open_db, open_db_in_memory};

/// Result of opening, migrating or closing the task database.
pub type DbResult<T> = Result<T, DbError>;

/// Failure below the repository layer.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected an open, pragma, migration or close.
    Sqlite(rusqlite::Error),
    /// The file's `user_version` is ahead of [`migrations::latest_version`].
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

//! Persistence gateway over a namespaced key-value medium.
//!
//! # Responsibility
//! - Abstract the key-value medium behind [`StorageMedium`].
//! - Persist users, entries and garden state as JSON under a fixed prefix.
//!
//! # Invariants
//! - Medium failures are logged and degraded by the gateway, never returned
//!   to gateway callers.
//! - Read-modify-write helpers are serialized; last writer wins.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entry_store;
pub mod medium;

pub use entry_store::{AppState, EntryStore, StorageQuota, StoreConfig};
pub use medium::{MemoryMedium, SqliteMedium, StorageMedium, UnavailableMedium};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage medium.
#[derive(Debug)]
pub enum StorageError {
    /// The medium is disabled or cannot be reached at all.
    Unavailable,
    /// A lock guarding the medium was poisoned by a panicking writer.
    LockPoisoned,
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage medium is unavailable"),
            Self::LockPoisoned => write!(f, "storage medium lock is poisoned"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable | Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

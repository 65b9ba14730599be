//! Key-value storage media.
//!
//! # Responsibility
//! - Provide string get/set/remove over a flat key space.
//! - Offer a SQLite-backed medium, an in-memory medium and a disabled one.
//!
//! # Invariants
//! - `set_item` overwrites any previous value for the key.
//! - `remove_item` on a missing key succeeds.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::storage::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Flat string key-value medium used by the entry store.
pub trait StorageMedium {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// SQLite-backed medium storing items in the `kv_items` table.
pub struct SqliteMedium {
    conn: Mutex<Connection>,
}

impl SqliteMedium {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens a storage database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl StorageMedium for SqliteMedium {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_items (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local medium for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored item.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    fn items(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.items.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl StorageMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

/// Medium that rejects every call, standing in for disabled storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableMedium;

impl StorageMedium for UnavailableMedium {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }
}

impl<M: StorageMedium + ?Sized> StorageMedium for &M {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryMedium, SqliteMedium, StorageMedium, UnavailableMedium};
    use crate::storage::StorageError;

    fn exercise(medium: &dyn StorageMedium) {
        assert_eq!(medium.get_item("k").expect("get should work"), None);
        medium.set_item("k", "one").expect("set should work");
        medium.set_item("k", "two").expect("overwrite should work");
        assert_eq!(
            medium.get_item("k").expect("get should work").as_deref(),
            Some("two")
        );
        medium.remove_item("k").expect("remove should work");
        medium.remove_item("k").expect("removing twice should work");
        assert_eq!(medium.get_item("k").expect("get should work"), None);
    }

    #[test]
    fn sqlite_medium_overwrites_and_removes() {
        let medium = SqliteMedium::open_in_memory().expect("in-memory db should open");
        exercise(&medium);
    }

    #[test]
    fn memory_medium_overwrites_and_removes() {
        let medium = MemoryMedium::new();
        exercise(&medium);
        medium.set_item("a", "1").expect("set should work");
        assert_eq!(medium.snapshot().len(), 1);
    }

    #[test]
    fn unavailable_medium_rejects_everything() {
        let medium = UnavailableMedium;
        assert!(matches!(
            medium.set_item("k", "v"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(medium.get_item("k"), Err(StorageError::Unavailable)));
    }
}

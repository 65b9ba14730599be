//! Versioned, namespaced persistence gateway for journal data.
//!
//! # Responsibility
//! - Persist the user, entry collection and garden record as JSON items.
//! - Stamp the schema version marker and the last-sync timestamp.
//! - Degrade to no-op writes and empty reads when the medium is disabled.
//!
//! # Invariants
//! - Entry reads are always sorted by `date` descending, whatever the
//!   stored order.
//! - One unreadable entry record never hides the others.
//! - No gateway method returns an error or panics. Medium and JSON failures
//!   are logged and read as absent data.
//! - The availability probe runs once, at construction, and its warning is
//!   logged at most once per gateway.
//! - Log events carry counts and sizes only, never entry text.
//!
//! # Key layout
//! `<prefix>user`, `<prefix>entries`, `<prefix>garden`, `<prefix>version`
//! (literal `"1.0"`), `<prefix>lastSync` (RFC 3339).

use crate::model::entry::{Entry, EntryPatch};
use crate::model::garden::GardenState;
use crate::model::user::User;
use crate::storage::medium::StorageMedium;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Prefix shared by every key the gateway owns.
pub const STORAGE_PREFIX: &str = "fine-flow:";
/// Schema marker written under `<prefix>version`.
pub const STORAGE_VERSION: &str = "1.0";
/// Soft size limit for the serialized entry collection.
pub const MAX_STORAGE_BYTES: usize = 10 * 1024 * 1024;

const AVAILABILITY_PROBE_KEY: &str = "__storage_test__";

/// Gateway configuration. Defaults match the persisted schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub prefix: String,
    /// Payloads above this size log a warning; the write still happens.
    pub max_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: STORAGE_PREFIX.to_string(),
            max_bytes: MAX_STORAGE_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
struct StoreKeys {
    user: String,
    entries: String,
    garden: String,
    version: String,
    last_sync: String,
}

impl StoreKeys {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            user: format!("{prefix}user"),
            entries: format!("{prefix}entries"),
            garden: format!("{prefix}garden"),
            version: format!("{prefix}version"),
            last_sync: format!("{prefix}lastSync"),
        }
    }
}

/// Snapshot of everything the gateway holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: Option<User>,
    pub entries: Vec<Entry>,
    pub garden: Option<GardenState>,
    pub is_authenticated: bool,
    pub last_sync_time: DateTime<Utc>,
}

/// Serialized size of the app state against the soft limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageQuota {
    pub used_bytes: usize,
    pub percentage: f64,
}

/// Journal persistence gateway over a [`StorageMedium`].
pub struct EntryStore<M: StorageMedium> {
    medium: M,
    keys: StoreKeys,
    max_bytes: usize,
    available: bool,
    write_lock: Mutex<()>,
}

impl<M: StorageMedium> EntryStore<M> {
    /// Creates a gateway with the default prefix and size limit.
    pub fn new(medium: M) -> Self {
        Self::with_config(medium, StoreConfig::default())
    }

    /// Creates a gateway, probing the medium once.
    ///
    /// # Side effects
    /// - Writes and removes a probe key.
    /// - Writes the schema version marker when the medium is available.
    /// - Logs one warning when the medium is unavailable.
    pub fn with_config(medium: M, config: StoreConfig) -> Self {
        let available = probe(&medium);
        let store = Self {
            medium,
            keys: StoreKeys::with_prefix(&config.prefix),
            max_bytes: config.max_bytes,
            available,
            write_lock: Mutex::new(()),
        };

        if available {
            store.set_item(&store.keys.version, STORAGE_VERSION, "version");
            info!("event=store_init module=storage status=ok version={STORAGE_VERSION}");
        } else {
            warn!("event=store_init module=storage status=unavailable fallback=noop");
        }
        store
    }

    /// Whether the medium passed the construction probe.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Stored schema marker, if any.
    pub fn stored_version(&self) -> Option<String> {
        self.get_item(&self.keys.version, "version")
    }

    pub fn save_user(&self, user: &User) {
        if self.write_json(&self.keys.user, user, "user").is_some() {
            info!("event=user_save module=storage status=ok");
        }
    }

    pub fn get_user(&self) -> Option<User> {
        self.read_json(&self.keys.user, "user")
    }

    pub fn clear_user(&self) {
        if self.remove_item(&self.keys.user, "user") {
            info!("event=user_clear module=storage status=ok");
        }
    }

    /// Overwrites the full entry collection.
    ///
    /// Payloads over the configured limit are written anyway, with a warning.
    pub fn save_entries(&self, entries: &[Entry]) {
        if let Some(bytes) = self.write_json(&self.keys.entries, entries, "entries") {
            info!(
                "event=entries_save module=storage status=ok count={} bytes={bytes}",
                entries.len()
            );
        }
    }

    /// All entries, newest `date` first.
    ///
    /// Records are parsed one by one: an unreadable record is skipped with a
    /// warning, and derived fields are rebuilt for the rest.
    pub fn get_entries(&self) -> Vec<Entry> {
        let records: Vec<serde_json::Value> = self
            .read_json(&self.keys.entries, "entries")
            .unwrap_or_default();
        let total = records.len();
        let mut entries: Vec<Entry> = records
            .into_iter()
            .filter_map(|record| serde_json::from_value::<Entry>(record).ok())
            .map(|mut entry| {
                entry.refresh_derived();
                entry
            })
            .collect();
        if entries.len() < total {
            warn!(
                "event=store_read module=storage status=partial item=entries skipped={} kept={}",
                total - entries.len(),
                entries.len()
            );
        }
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Prepends `entry` to the collection and saves it.
    pub fn add_entry(&self, entry: Entry) -> Entry {
        let _guard = self.write_guard();
        let mut entries = self.get_entries();
        entries.insert(0, entry.clone());
        self.save_entries(&entries);
        entry
    }

    /// Applies `patch` to the entry with `id` and stamps `updated_at`.
    ///
    /// Returns `None` when no entry has that id.
    pub fn update_entry(&self, id: &str, patch: &EntryPatch) -> Option<Entry> {
        let _guard = self.write_guard();
        let mut entries = self.get_entries();
        let entry = entries.iter_mut().find(|entry| entry.id == id)?;
        patch.apply(entry, Utc::now());
        let updated = entry.clone();
        self.save_entries(&entries);
        Some(updated)
    }

    /// Removes the entry with `id`. Returns whether it existed.
    pub fn delete_entry(&self, id: &str) -> bool {
        let _guard = self.write_guard();
        let entries = self.get_entries();
        let before = entries.len();
        let kept: Vec<Entry> = entries.into_iter().filter(|entry| entry.id != id).collect();
        if kept.len() == before {
            return false;
        }
        self.save_entries(&kept);
        true
    }

    /// Looks up one entry by id.
    pub fn get_entry(&self, id: &str) -> Option<Entry> {
        self.get_entries().into_iter().find(|entry| entry.id == id)
    }

    pub fn save_garden(&self, garden: &GardenState) {
        if self.write_json(&self.keys.garden, garden, "garden").is_some() {
            info!("event=garden_save module=storage status=ok");
        }
    }

    /// Cached garden record. Its `growth_stage` is advisory only.
    pub fn get_garden(&self) -> Option<GardenState> {
        self.read_json(&self.keys.garden, "garden")
    }

    /// Removes user, entries, garden and last-sync items. The version marker
    /// stays.
    pub fn clear_all(&self) {
        let _guard = self.write_guard();
        let keys = [
            (&self.keys.user, "user"),
            (&self.keys.entries, "entries"),
            (&self.keys.garden, "garden"),
            (&self.keys.last_sync, "last_sync"),
        ];
        let cleared = keys
            .into_iter()
            .filter(|(key, label)| self.remove_item(key, label))
            .count();
        info!("event=store_clear module=storage status=ok cleared={cleared}");
    }

    pub fn update_sync_time(&self) {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.set_item(&self.keys.last_sync, &stamp, "last_sync");
    }

    /// Last sync timestamp. Unparseable values read as absent.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        let raw = self.get_item(&self.keys.last_sync, "last_sync")?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(err) => {
                error!("event=store_read module=storage status=error item=last_sync error={err}");
                None
            }
        }
    }

    /// Snapshot of all records. A missing last-sync time reads as now.
    pub fn app_state(&self) -> AppState {
        let user = self.get_user();
        AppState {
            is_authenticated: user.is_some(),
            user,
            entries: self.get_entries(),
            garden: self.get_garden(),
            last_sync_time: self.last_sync().unwrap_or_else(Utc::now),
        }
    }

    /// Serialized app-state size against the configured limit.
    ///
    /// Reports zero usage when the medium is unavailable.
    pub fn check_quota(&self) -> StorageQuota {
        if !self.available {
            return StorageQuota {
                used_bytes: 0,
                percentage: 0.0,
            };
        }
        let used_bytes = match serde_json::to_vec(&self.app_state()) {
            Ok(bytes) => bytes.len(),
            Err(err) => {
                error!("event=quota_check module=storage status=error error={err}");
                0
            }
        };
        let percentage = used_bytes as f64 / self.max_bytes.max(1) as f64 * 100.0;
        info!(
            "event=quota_check module=storage status=ok used_bytes={used_bytes} percentage={percentage:.1}"
        );
        StorageQuota {
            used_bytes,
            percentage,
        }
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str, label: &str) -> Option<T> {
        let raw = self.get_item(key, label)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(
                    "event=store_read module=storage status=error item={label} error_code=malformed_json error={err}"
                );
                None
            }
        }
    }

    /// Serializes and writes `value`; returns the payload size on success.
    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T, label: &str) -> Option<usize> {
        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(err) => {
                error!("event=store_write module=storage status=error item={label} error_code=serialize_failed error={err}");
                return None;
            }
        };
        if data.len() > self.max_bytes {
            warn!(
                "event=store_write module=storage status=oversize item={label} bytes={} limit={}",
                data.len(),
                self.max_bytes
            );
        }
        self.set_item(key, &data, label).then_some(data.len())
    }

    fn get_item(&self, key: &str, label: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        match self.medium.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                error!("event=store_read module=storage status=error item={label} error={err}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str, label: &str) -> bool {
        if !self.available {
            debug!("event=store_write module=storage status=skipped item={label}");
            return false;
        }
        match self.medium.set_item(key, value) {
            Ok(()) => true,
            Err(err) => {
                error!("event=store_write module=storage status=error item={label} error={err}");
                false
            }
        }
    }

    fn remove_item(&self, key: &str, label: &str) -> bool {
        if !self.available {
            return false;
        }
        match self.medium.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                error!("event=store_remove module=storage status=error item={label} error={err}");
                false
            }
        }
    }
}

fn probe<M: StorageMedium>(medium: &M) -> bool {
    let result = medium
        .set_item(AVAILABILITY_PROBE_KEY, AVAILABILITY_PROBE_KEY)
        .and_then(|()| medium.remove_item(AVAILABILITY_PROBE_KEY));
    if let Err(err) = &result {
        debug!("event=store_probe module=storage status=error error={err}");
    }
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::{EntryStore, StoreConfig, STORAGE_VERSION};
    use crate::model::entry::Entry;
    use crate::storage::medium::{MemoryMedium, StorageMedium};
    use chrono::Utc;

    #[test]
    fn probe_key_is_not_left_behind() {
        let medium = MemoryMedium::new();
        let _store = EntryStore::new(&medium);
        let items = medium.snapshot();
        assert!(!items.contains_key("__storage_test__"));
        assert_eq!(
            items.get("fine-flow:version").map(String::as_str),
            Some(STORAGE_VERSION)
        );
    }

    #[test]
    fn custom_prefix_namespaces_every_key() {
        let medium = MemoryMedium::new();
        let store = EntryStore::with_config(
            &medium,
            StoreConfig {
                prefix: "test:".to_string(),
                ..StoreConfig::default()
            },
        );
        store.save_entries(&[Entry::with_id("a", Utc::now(), None, "x")]);
        store.update_sync_time();

        let keys: Vec<String> = medium.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["test:entries", "test:lastSync", "test:version"]);
    }

    #[test]
    fn update_of_missing_entry_writes_nothing() {
        let medium = MemoryMedium::new();
        let store = EntryStore::new(&medium);
        let patch = crate::model::entry::EntryPatch {
            content: Some("new".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update_entry("missing", &patch), None);
        assert_eq!(medium.get_item("fine-flow:entries").expect("get works"), None);
    }
}

//! Journal use-case service.
//!
//! # Responsibility
//! - Create, edit, delete and list entries through the entry store.
//! - Serve calendar, search and analysis views over the live collection.
//! - Plant the garden and keep its cached counters current.
//!
//! # Invariants
//! - Every mutation writes through to the store before returning.
//! - Growth stage and weather are always derived from live entries; the
//!   cached garden stage is never read back as truth.
//! - Entry text never appears in log events.

use crate::analysis::growth::{derive_stage, GrowthStage};
use crate::analysis::mood::{classify_recent_mood, MoodLabel};
use crate::analysis::period::{filter_by_period, AnalysisPeriod};
use crate::analysis::stats::JournalStats;
use crate::analysis::weather::{classify_weather, WeatherMood};
use crate::model::entry::{Entry, EntryId, EntryPatch};
use crate::model::garden::{GardenState, PlantType};
use crate::storage::entry_store::EntryStore;
use crate::storage::medium::StorageMedium;
use crate::validation::{validate_entry_form, EntryForm, FieldErrors};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAX_PLANT_NAME_CHARS: usize = 40;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    /// Input failed form validation.
    Validation(FieldErrors),
    /// No entry has the requested id.
    EntryNotFound(EntryId),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "validation failed: {errors}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::EntryNotFound(_) => None,
        }
    }
}

impl From<FieldErrors> for JournalError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Journal facade over an [`EntryStore`].
pub struct JournalService<'s, M: StorageMedium> {
    store: &'s EntryStore<M>,
}

impl<'s, M: StorageMedium> JournalService<'s, M> {
    pub fn new(store: &'s EntryStore<M>) -> Self {
        Self { store }
    }

    /// Saves a new entry dated now.
    pub fn create_entry(&self, form: &EntryForm) -> JournalResult<Entry> {
        self.create_entry_on(form, Utc::now())
    }

    /// Saves a new entry for an explicit date (backfilled calendar days).
    pub fn create_entry_on(&self, form: &EntryForm, date: DateTime<Utc>) -> JournalResult<Entry> {
        let draft = validate_entry_form(form)?;
        let entry = self
            .store
            .add_entry(Entry::new(date, draft.title, draft.content));
        info!(
            "event=entry_create module=journal status=ok words={} quality={}",
            entry.word_count,
            entry.quality.as_str()
        );
        self.after_mutation();
        Ok(entry)
    }

    /// Replaces title and content of an existing entry.
    pub fn update_entry(&self, id: &str, form: &EntryForm) -> JournalResult<Entry> {
        let draft = validate_entry_form(form)?;
        let patch = EntryPatch {
            title: Some(draft.title),
            content: Some(draft.content),
            ..EntryPatch::default()
        };
        let entry = self
            .store
            .update_entry(id, &patch)
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))?;
        info!(
            "event=entry_update module=journal status=ok words={}",
            entry.word_count
        );
        self.after_mutation();
        Ok(entry)
    }

    pub fn delete_entry(&self, id: &str) -> JournalResult<()> {
        if !self.store.delete_entry(id) {
            return Err(JournalError::EntryNotFound(id.to_string()));
        }
        info!("event=entry_delete module=journal status=ok");
        self.after_mutation();
        Ok(())
    }

    pub fn get_entry(&self, id: &str) -> Option<Entry> {
        self.store.get_entry(id)
    }

    /// All entries, newest first.
    pub fn list_entries(&self) -> Vec<Entry> {
        self.store.get_entries()
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// A blank query returns every entry.
    pub fn search_entries(&self, query: &str) -> Vec<Entry> {
        let needle = query.trim().to_lowercase();
        let entries = self.store.get_entries();
        if needle.is_empty() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| {
                entry.content.to_lowercase().contains(&needle)
                    || entry
                        .title
                        .as_deref()
                        .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Entries whose local date is `day`.
    pub fn entries_on_day(&self, day: NaiveDate) -> Vec<Entry> {
        self.store
            .get_entries()
            .into_iter()
            .filter(|entry| entry.local_date(&Local) == day)
            .collect()
    }

    /// Entries in a local calendar month.
    pub fn entries_in_month(&self, year: i32, month: u32) -> Vec<Entry> {
        self.store
            .get_entries()
            .into_iter()
            .filter(|entry| {
                let date = entry.local_date(&Local);
                date.year() == year && date.month() == month
            })
            .collect()
    }

    /// Entries inside `period`, newest first.
    pub fn entries_for_period(&self, period: AnalysisPeriod) -> Vec<Entry> {
        let entries = self.store.get_entries();
        filter_by_period(&entries, period)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Mood readout over the newest entries.
    pub fn analyze_mood(&self) -> MoodLabel {
        let mood = classify_recent_mood(&self.store.get_entries());
        info!("event=mood_analyze module=journal status=ok mood={mood}");
        mood
    }

    /// Garden weather over the entries inside `period`.
    pub fn analyze_weather(&self, period: AnalysisPeriod) -> WeatherMood {
        let entries = self.store.get_entries();
        let scoped = filter_by_period(&entries, period);
        let weather = classify_weather(scoped.iter().copied());
        info!(
            "event=weather_analyze module=journal status=ok period={period} scoped={} weather={weather}",
            scoped.len()
        );
        weather
    }

    /// Growth stage derived from live entries.
    pub fn growth_stage(&self) -> GrowthStage {
        derive_stage(&self.store.get_entries())
    }

    pub fn stats(&self) -> JournalStats {
        JournalStats::compute(&self.store.get_entries())
    }

    /// Plants the garden, replacing any previous one.
    pub fn plant_seed(&self, plant_type: PlantType, plant_name: &str) -> JournalResult<GardenState> {
        let name = plant_name.trim();
        if name.is_empty() {
            return Err(FieldErrors::single("plantName", "Give your seed a name").into());
        }
        if name.chars().count() > MAX_PLANT_NAME_CHARS {
            return Err(FieldErrors::single("plantName", "Name is too long").into());
        }

        let mut garden = GardenState::plant(plant_type, name, Utc::now());
        garden.refresh_from_entries(&self.store.get_entries(), &Local);
        self.store.save_garden(&garden);
        info!(
            "event=garden_plant module=journal status=ok plant_type={} stage={}",
            garden.plant_type, garden.growth_stage
        );
        Ok(garden)
    }

    /// Stored garden with counters recomputed from live entries.
    pub fn garden(&self) -> Option<GardenState> {
        let mut garden = self.store.get_garden()?;
        garden.refresh_from_entries(&self.store.get_entries(), &Local);
        Some(garden)
    }

    fn after_mutation(&self) {
        if let Some(garden) = self.garden() {
            self.store.save_garden(&garden);
        }
        self.store.update_sync_time();
    }
}

#[cfg(test)]
mod tests {
    use super::{JournalError, JournalService};
    use crate::storage::entry_store::EntryStore;
    use crate::storage::medium::MemoryMedium;
    use crate::validation::EntryForm;

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let store = EntryStore::new(MemoryMedium::new());
        let service = JournalService::new(&store);
        service
            .create_entry(&EntryForm::new("Beach Day", "sand everywhere"))
            .expect("entry should save");
        service
            .create_entry(&EntryForm::new("", "Quiet BEACH walk"))
            .expect("entry should save");
        service
            .create_entry(&EntryForm::new("", "office"))
            .expect("entry should save");

        assert_eq!(service.search_entries("beach").len(), 2);
        assert_eq!(service.search_entries("  ").len(), 3);
        assert!(service.search_entries("mountain").is_empty());
    }

    #[test]
    fn delete_of_unknown_entry_reports_not_found() {
        let store = EntryStore::new(MemoryMedium::new());
        let service = JournalService::new(&store);
        assert_eq!(
            service.delete_entry("nope"),
            Err(JournalError::EntryNotFound("nope".to_string()))
        );
    }
}

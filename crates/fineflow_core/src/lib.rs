//! Core domain logic for Fine Flow.
//! This crate is the single source of truth for journal, garden and
//! analysis invariants.

pub mod analysis;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod validation;

pub use analysis::growth::{derive_stage, derive_stage_in, unique_days, unique_days_in, GrowthStage};
pub use analysis::mood::{classify_mood, classify_recent_mood, MoodLabel};
pub use analysis::period::{filter_by_period, filter_by_period_at, AnalysisPeriod, UnknownPeriod};
pub use analysis::reveal::{RevealSequence, RevealState};
pub use analysis::stats::JournalStats;
pub use analysis::weather::{classify_weather, WeatherMood};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::entry::{count_words, Entry, EntryId, EntryPatch, EntryQuality};
pub use model::garden::{GardenState, PlantType};
pub use model::user::User;
pub use service::journal_service::{JournalError, JournalResult, JournalService};
pub use service::session_service::{SessionError, SessionResult, SessionService};
pub use storage::{
    AppState, EntryStore, MemoryMedium, SqliteMedium, StorageError, StorageMedium, StorageQuota,
    StoreConfig, UnavailableMedium,
};
pub use validation::{EntryForm, FieldErrors};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

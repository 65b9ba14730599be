//! Journal entry model.
//!
//! # Responsibility
//! - Define the canonical dated journal record.
//! - Derive word count and quality tier from content.
//!
//! # Invariants
//! - `word_count` equals the whitespace-delimited token count of `content`.
//! - `quality` is always `EntryQuality::from_word_count(word_count)`.
//! - `updated_at` is never earlier than `created_at` for entries created here.
//! - Stored records missing derived fields still load; `refresh_derived`
//!   rebuilds them from `content` and `date`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier for a journal entry.
///
/// Kept as a string so records written by earlier clients (numeric
/// millisecond ids) still load.
pub type EntryId = String;

/// Entries with fewer words than this are `Short`.
pub const MEDIUM_ENTRY_MIN_WORDS: usize = 50;
/// Entries with at least this many words are `Long`.
pub const LONG_ENTRY_MIN_WORDS: usize = 200;

/// Quality tier bucketed from word count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryQuality {
    /// Fewer than 50 words.
    #[default]
    Short,
    /// 50 to 199 words.
    Medium,
    /// 200 words or more.
    Long,
}

impl EntryQuality {
    pub fn from_word_count(word_count: usize) -> Self {
        if word_count < MEDIUM_ENTRY_MIN_WORDS {
            Self::Short
        } else if word_count < LONG_ENTRY_MIN_WORDS {
            Self::Medium
        } else {
            Self::Long
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Accepts missing, null or unknown quality names as the default tier.
fn lenient_quality<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntryQuality, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(EntryQuality::from_name)
        .unwrap_or_default())
}

/// Counts whitespace-delimited tokens. Blank content counts as zero words.
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// One dated journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    /// The day this entry belongs to. Usually equal to `created_at`.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default, deserialize_with = "lenient_quality")]
    pub quality: EntryQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_media: Option<bool>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Creates a new entry with a generated id, dated `date`.
    pub fn new(date: DateTime<Utc>, title: Option<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), date, title, content)
    }

    /// Creates an entry with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: impl Into<EntryId>,
        date: DateTime<Utc>,
        title: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let word_count = count_words(&content);
        let now = Utc::now();
        Self {
            id: id.into(),
            date,
            title,
            content,
            word_count,
            quality: EntryQuality::from_word_count(word_count),
            has_media: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces content and recomputes `word_count` and `quality`.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.word_count = count_words(&self.content);
        self.quality = EntryQuality::from_word_count(self.word_count);
    }

    /// Rebuilds derived fields after loading a stored record.
    ///
    /// Missing timestamps fall back to `date`, and `updated_at` is lifted to
    /// `created_at` when older.
    pub fn refresh_derived(&mut self) {
        self.word_count = count_words(&self.content);
        self.quality = EntryQuality::from_word_count(self.word_count);
        if self.created_at == DateTime::<Utc>::default() {
            self.created_at = self.date;
        }
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
    }

    /// Calendar date of this entry as seen from `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }

    /// Title and content joined by a single space, the text keyword
    /// classifiers look at. A missing title contributes an empty string.
    pub fn analysis_text(&self) -> String {
        format!("{} {}", self.title.as_deref().unwrap_or(""), self.content)
    }
}

/// Partial update applied by the entry store.
///
/// `None` leaves a field untouched. Nested options clear the field when set
/// to `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub date: Option<DateTime<Utc>>,
    pub title: Option<Option<String>>,
    pub content: Option<String>,
    pub has_media: Option<Option<bool>>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.title.is_none()
            && self.content.is_none()
            && self.has_media.is_none()
    }

    /// Applies the patch and stamps `updated_at`.
    pub fn apply(&self, entry: &mut Entry, now: DateTime<Utc>) {
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(content) = &self.content {
            entry.set_content(content.clone());
        }
        if let Some(has_media) = self.has_media {
            entry.has_media = has_media;
        }
        entry.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::{count_words, Entry, EntryPatch, EntryQuality};
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn quality_tiers_split_at_50_and_200_words() {
        let date = Utc::now();
        assert_eq!(Entry::new(date, None, words(49)).quality, EntryQuality::Short);
        assert_eq!(Entry::new(date, None, words(50)).quality, EntryQuality::Medium);
        assert_eq!(Entry::new(date, None, words(199)).quality, EntryQuality::Medium);
        assert_eq!(Entry::new(date, None, words(200)).quality, EntryQuality::Long);
    }

    #[test]
    fn word_count_ignores_repeated_whitespace() {
        assert_eq!(count_words("  one\t two\n\nthree  "), 3);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn patch_recomputes_derived_fields_and_stamps_updated_at() {
        let mut entry = Entry::with_id("e1", Utc::now(), None, "short");
        let later = entry.updated_at + chrono::Duration::seconds(5);
        EntryPatch {
            content: Some(words(60)),
            title: Some(Some("Title".to_string())),
            ..EntryPatch::default()
        }
        .apply(&mut entry, later);

        assert_eq!(entry.word_count, 60);
        assert_eq!(entry.quality, EntryQuality::Medium);
        assert_eq!(entry.title.as_deref(), Some("Title"));
        assert_eq!(entry.updated_at, later);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_omits_absent_options() {
        let entry = Entry::with_id("e1", Utc::now(), None, "hello there");
        let json = serde_json::to_value(&entry).expect("entry should serialize");
        assert_eq!(json["wordCount"], 2);
        assert_eq!(json["quality"], "short");
        assert!(json.get("title").is_none());
        assert!(json.get("hasMedia").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn deserializes_records_written_by_web_clients() {
        let raw = r#"{
            "id": "1718000000000",
            "date": "2024-06-10T22:30:00.000Z",
            "title": "Evening",
            "content": "quiet evening",
            "wordCount": 2,
            "quality": "short",
            "createdAt": "2024-06-10T22:30:00.000Z",
            "updatedAt": "2024-06-10T22:30:00.000Z"
        }"#;
        let entry: Entry = serde_json::from_str(raw).expect("web record should parse");
        assert_eq!(entry.id, "1718000000000");
        assert_eq!(entry.has_media, None);

        let plus_two = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        assert_eq!(
            entry.local_date(&plus_two),
            NaiveDate::from_ymd_opt(2024, 6, 11).expect("valid date")
        );
        assert_eq!(
            entry.local_date(&Utc),
            NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
        );
    }

    #[test]
    fn drifted_record_loads_and_rebuilds_derived_fields() {
        let raw = r#"{
            "id": "old-1",
            "date": "2024-06-10T08:00:00Z",
            "content": "one two three",
            "quality": "epic"
        }"#;
        let mut entry: Entry = serde_json::from_str(raw).expect("drifted record should parse");
        assert_eq!(entry.word_count, 0);
        assert_eq!(entry.quality, EntryQuality::Short);

        entry.refresh_derived();
        assert_eq!(entry.word_count, 3);
        assert_eq!(entry.quality, EntryQuality::Short);
        assert_eq!(entry.created_at, entry.date);
        assert_eq!(entry.updated_at, entry.date);
    }

    #[test]
    fn refresh_derived_corrects_stale_counts() {
        let mut entry = Entry::with_id("e1", Utc::now(), None, words(60));
        entry.word_count = 3;
        entry.quality = EntryQuality::Long;

        entry.refresh_derived();
        assert_eq!(entry.word_count, 60);
        assert_eq!(entry.quality, EntryQuality::Medium);
    }
}

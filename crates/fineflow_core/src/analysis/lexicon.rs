//! Shared keyword-scoring helpers for the classifiers.

use crate::model::entry::Entry;

/// Builds the lowercase text blob scored by the classifiers.
///
/// Returns `None` when `entries` is empty so callers can apply their own
/// empty-input label.
pub(crate) fn analysis_blob<'a, I>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut parts = entries.into_iter().map(Entry::analysis_text).peekable();
    parts.peek()?;
    Some(parts.collect::<Vec<_>>().join(" ").to_lowercase())
}

/// Counts lexicon words contained anywhere in `blob`.
///
/// Substring containment, not word matching: "sadly" hits "sad".
pub(crate) fn lexicon_score(blob: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| blob.contains(*word)).count()
}

#[cfg(test)]
mod tests {
    use super::{analysis_blob, lexicon_score};
    use crate::model::entry::Entry;
    use chrono::Utc;

    #[test]
    fn blob_is_none_for_empty_input() {
        let entries: Vec<Entry> = Vec::new();
        assert!(analysis_blob(&entries).is_none());
    }

    #[test]
    fn blob_joins_title_and_content_in_lowercase() {
        let entries = vec![
            Entry::with_id("a", Utc::now(), Some("Morning".to_string()), "Coffee"),
            Entry::with_id("b", Utc::now(), None, "WALK"),
        ];
        assert_eq!(
            analysis_blob(&entries).as_deref(),
            Some("morning coffee  walk")
        );
    }

    #[test]
    fn score_uses_substring_containment() {
        assert_eq!(lexicon_score("sadly unhappy", &["sad", "happy", "joy"]), 2);
    }
}

//! Keyword mood classifier.
//!
//! # Invariants
//! - Empty input is `Neutral`.
//! - Categories are scored in declared order and the first one reaching the
//!   maximum wins ties.
//! - A maximum score of zero is `Neutral`.

use crate::analysis::lexicon::{analysis_blob, lexicon_score};
use crate::model::entry::Entry;
use std::fmt::{Display, Formatter};

/// How many newest entries the mood readout looks at.
pub const RECENT_ENTRY_WINDOW: usize = 5;

/// Sentiment category shown by the mood screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodLabel {
    Neutral,
    Happy,
    Sad,
    Excited,
    Anxious,
    Calm,
}

impl MoodLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
        }
    }

    /// Display text for the mood face.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Happy => "Happy",
            Self::Sad => "Feeling Blue",
            Self::Excited => "Excited",
            Self::Anxious => "Anxious",
            Self::Calm => "Peaceful",
        }
    }
}

impl Display for MoodLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const MOOD_LEXICONS: &[(MoodLabel, &[&str])] = &[
    (
        MoodLabel::Happy,
        &[
            "happy", "joy", "grateful", "wonderful", "amazing", "love", "excited", "great",
            "beautiful", "blessed", "thankful", "awesome", "fantastic",
        ],
    ),
    (
        MoodLabel::Sad,
        &[
            "sad", "depressed", "lonely", "hurt", "crying", "tears", "miss", "lost", "grief",
            "heartbreak", "alone", "empty",
        ],
    ),
    (
        MoodLabel::Excited,
        &[
            "excited", "thrilled", "amazing", "incredible", "fantastic", "adventure", "new",
            "celebrate", "achievement", "success", "victory",
        ],
    ),
    (
        MoodLabel::Anxious,
        &[
            "anxious", "worried", "stress", "nervous", "fear", "panic", "overwhelmed", "scared",
            "uncertain", "doubt", "pressure",
        ],
    ),
    (
        MoodLabel::Calm,
        &[
            "calm", "peaceful", "serene", "relaxed", "quiet", "tranquil", "mindful", "meditation",
            "stillness", "content", "balanced",
        ],
    ),
];

/// Per-category scores in declared order.
pub fn mood_scores(text: &str) -> Vec<(MoodLabel, usize)> {
    let blob = text.to_lowercase();
    MOOD_LEXICONS
        .iter()
        .map(|(label, words)| (*label, lexicon_score(&blob, words)))
        .collect()
}

/// Classifies the combined text of `entries`.
pub fn classify_mood<'a, I>(entries: I) -> MoodLabel
where
    I: IntoIterator<Item = &'a Entry>,
{
    match analysis_blob(entries) {
        Some(blob) => top_mood(&blob),
        None => MoodLabel::Neutral,
    }
}

/// Classifies the newest [`RECENT_ENTRY_WINDOW`] entries of a newest-first
/// collection.
pub fn classify_recent_mood(entries: &[Entry]) -> MoodLabel {
    classify_mood(entries.iter().take(RECENT_ENTRY_WINDOW))
}

fn top_mood(blob: &str) -> MoodLabel {
    let scores = mood_scores(blob);
    let max = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
    if max == 0 {
        return MoodLabel::Neutral;
    }
    scores
        .into_iter()
        .find(|(_, score)| *score == max)
        .map_or(MoodLabel::Neutral, |(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::{classify_mood, classify_recent_mood, mood_scores, MoodLabel};
    use crate::model::entry::Entry;
    use chrono::{Duration, Utc};

    fn entries(texts: &[&str]) -> Vec<Entry> {
        texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Entry::with_id(format!("e{idx}"), Utc::now(), None, *text))
            .collect()
    }

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(classify_mood(&Vec::<Entry>::new()), MoodLabel::Neutral);
    }

    #[test]
    fn happy_and_grateful_score_happy() {
        let input = entries(&["I am so happy and grateful today"]);
        assert_eq!(classify_mood(&input), MoodLabel::Happy);

        let scores = mood_scores("I am so happy and grateful today");
        assert_eq!(scores[0], (MoodLabel::Happy, 2));
        assert!(scores[1..].iter().all(|(_, score)| *score == 0));
    }

    #[test]
    fn no_lexicon_hits_is_neutral() {
        let input = entries(&["went to the store, bought bread"]);
        assert_eq!(classify_mood(&input), MoodLabel::Neutral);
    }

    #[test]
    fn ties_go_to_the_first_declared_category() {
        // "amazing" and "fantastic" count for both happy and excited.
        let input = entries(&["amazing fantastic"]);
        assert_eq!(classify_mood(&input), MoodLabel::Happy);

        // one sad hit, one calm hit
        let input = entries(&["lonely but calm"]);
        assert_eq!(classify_mood(&input), MoodLabel::Sad);
    }

    #[test]
    fn matching_is_case_insensitive_substring_containment() {
        let input = entries(&["SADLY the PANIC was real, Worried"]);
        assert_eq!(classify_mood(&input), MoodLabel::Anxious);
    }

    #[test]
    fn title_text_is_scored_too() {
        let mut entry = Entry::with_id("t", Utc::now(), Some("Serene".to_string()), "nothing");
        entry.has_media = Some(true);
        assert_eq!(classify_mood([&entry]), MoodLabel::Calm);
    }

    #[test]
    fn result_does_not_depend_on_entry_order() {
        let forward = entries(&["stress at work", "nervous call", "quiet tea"]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(classify_mood(&forward), classify_mood(&backward));
        assert_eq!(classify_mood(&forward), MoodLabel::Anxious);
    }

    #[test]
    fn recent_readout_only_looks_at_newest_five() {
        let now = Utc::now();
        let mut input = entries(&["plain", "plain", "plain", "plain", "plain", "grief tears lost"]);
        for (idx, entry) in input.iter_mut().enumerate() {
            entry.date = now - Duration::days(idx as i64);
        }
        assert_eq!(classify_recent_mood(&input), MoodLabel::Neutral);
        assert_eq!(classify_mood(&input), MoodLabel::Sad);
    }
}

//! Garden weather classifier.
//!
//! Separate from [`crate::analysis::mood`]: different label space and
//! lexicons, and the two must not be merged.
//!
//! # Invariants
//! - Empty input is `Cloudy`.
//! - `Clearing` wins whenever improving and negative words both appear.
//! - Otherwise positive vs negative decides, with a tie being `Cloudy`.

use crate::analysis::lexicon::{analysis_blob, lexicon_score};
use crate::model::entry::Entry;
use std::fmt::{Display, Formatter};

const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "grateful", "wonderful", "amazing", "love", "excited", "great", "beautiful",
    "blessed", "thankful", "awesome", "fantastic", "peaceful", "calm", "content",
];
const NEGATIVE_WORDS: &[&str] = &[
    "sad", "depressed", "lonely", "hurt", "crying", "anxious", "worried", "stress", "nervous",
    "fear", "overwhelmed", "scared", "angry", "frustrated",
];
const IMPROVING_WORDS: &[&str] = &[
    "better", "improving", "hopeful", "learning", "growing", "trying", "progress", "healing",
];

/// Weather shown over the garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherMood {
    Sunny,
    Cloudy,
    Rainy,
    Clearing,
}

impl WeatherMood {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Clearing => "clearing",
        }
    }
}

impl Display for WeatherMood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexicon hit counts behind a weather readout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeatherScores {
    pub positive: usize,
    pub negative: usize,
    pub improving: usize,
}

impl WeatherScores {
    pub fn from_text(text: &str) -> Self {
        let blob = text.to_lowercase();
        Self {
            positive: lexicon_score(&blob, POSITIVE_WORDS),
            negative: lexicon_score(&blob, NEGATIVE_WORDS),
            improving: lexicon_score(&blob, IMPROVING_WORDS),
        }
    }

    pub fn weather(self) -> WeatherMood {
        if self.improving > 0 && self.negative > 0 {
            WeatherMood::Clearing
        } else if self.positive > self.negative {
            WeatherMood::Sunny
        } else if self.negative > self.positive {
            WeatherMood::Rainy
        } else {
            WeatherMood::Cloudy
        }
    }
}

/// Classifies the combined text of `entries` into garden weather.
pub fn classify_weather<'a, I>(entries: I) -> WeatherMood
where
    I: IntoIterator<Item = &'a Entry>,
{
    match analysis_blob(entries) {
        Some(blob) => WeatherScores::from_text(&blob).weather(),
        None => WeatherMood::Cloudy,
    }
}

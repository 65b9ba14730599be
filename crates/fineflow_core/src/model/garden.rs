//! Garden state model and onboarding seeds.
//!
//! # Responsibility
//! - Define the cached garden record persisted next to entries.
//! - Refresh cached counters from the live entry collection.
//!
//! # Invariants
//! - `growth_stage` is advisory. Readers recompute it from entries via
//!   [`crate::analysis::growth::derive_stage_in`] instead of trusting storage.

use crate::analysis::growth::{derive_stage_in, GrowthStage};
use crate::model::entry::Entry;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seed choices offered when a garden is first planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantType {
    Hope,
    Peace,
    Joy,
    Growth,
}

impl PlantType {
    pub const ALL: [PlantType; 4] = [Self::Hope, Self::Peace, Self::Joy, Self::Growth];

    /// Stable id persisted in `GardenState::plant_type`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Hope => "hope",
            Self::Peace => "peace",
            Self::Joy => "joy",
            Self::Growth => "growth",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hope => "Seed of Hope",
            Self::Peace => "Seed of Peace",
            Self::Joy => "Seed of Joy",
            Self::Growth => "Seed of Growth",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Hope => "Grows into a resilient flower",
            Self::Peace => "Blooms with calming leaves",
            Self::Joy => "Radiates warmth and happiness",
            Self::Growth => "Becomes a mighty tree",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plant| plant.id() == value)
    }
}

/// Cached garden record.
///
/// `plant_type` stays a plain string so unknown seeds written by other
/// clients survive a read/write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenState {
    pub plant_type: String,
    pub plant_name: String,
    pub entries_count: usize,
    pub watering_dates: Vec<DateTime<Utc>>,
    pub growth_stage: u8,
    pub created_at: DateTime<Utc>,
}

impl GardenState {
    /// Plants a fresh seed with empty counters.
    pub fn plant(plant_type: PlantType, plant_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            plant_type: plant_type.id().to_string(),
            plant_name: plant_name.into(),
            entries_count: 0,
            watering_dates: Vec::new(),
            growth_stage: GrowthStage::Seed.index(),
            created_at: now,
        }
    }

    pub fn known_plant_type(&self) -> Option<PlantType> {
        PlantType::from_id(&self.plant_type)
    }

    /// Recomputes cached counters from live entries.
    ///
    /// Watering dates mirror entry dates, newest first.
    pub fn refresh_from_entries<Tz: TimeZone>(&mut self, entries: &[Entry], tz: &Tz) {
        let mut watering_dates: Vec<DateTime<Utc>> = entries.iter().map(|entry| entry.date).collect();
        watering_dates.sort_by(|a, b| b.cmp(a));

        self.entries_count = entries.len();
        self.watering_dates = watering_dates;
        self.growth_stage = derive_stage_in(entries, tz).index();
    }

    /// Cached stage, if the stored index is in range.
    pub fn cached_stage(&self) -> Option<GrowthStage> {
        GrowthStage::from_index(self.growth_stage)
    }
}

#[cfg(test)]
mod tests {
    use super::{GardenState, PlantType};
    use crate::analysis::growth::GrowthStage;
    use crate::model::entry::Entry;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn plant_ids_round_trip() {
        for plant in PlantType::ALL {
            assert_eq!(PlantType::from_id(plant.id()), Some(plant));
        }
        assert_eq!(PlantType::from_id("cactus"), None);
    }

    #[test]
    fn refresh_replaces_stale_cached_stage() {
        let base = Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut garden = GardenState::plant(PlantType::Joy, "Sunny", base);
        garden.growth_stage = GrowthStage::Blooming.index();

        let entries: Vec<Entry> = (0..3)
            .map(|day| Entry::new(base + Duration::days(day), None, "note"))
            .collect();
        garden.refresh_from_entries(&entries, &Utc);

        assert_eq!(garden.entries_count, 3);
        assert_eq!(garden.cached_stage(), Some(GrowthStage::Sprouting));
        assert_eq!(garden.watering_dates[0], base + Duration::days(2));
    }
}

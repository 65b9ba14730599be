//! Timed reveal of a classification result.
//!
//! # Responsibility
//! - Describe the "analyzing" presentation as named phases with durations.
//! - Settle on a result computed before the sequence starts.
//!
//! # Invariants
//! - The settled value is always the precomputed result, whatever the
//!   elapsed time or number of `advance` calls.
//! - Time only moves forward. Dropping a sequence mid-way has no effects.

use crate::analysis::mood::MoodLabel;
use crate::analysis::weather::WeatherMood;
use std::time::Duration;

/// Per-step pause while cycling through garden weather.
pub const WEATHER_CYCLE_STEP: Duration = Duration::from_millis(500);
/// How long the mood face "thinks" before showing a result.
pub const MOOD_ANALYSIS_DELAY: Duration = Duration::from_millis(2500);

const WEATHER_CYCLE: [WeatherMood; 4] = [
    WeatherMood::Cloudy,
    WeatherMood::Rainy,
    WeatherMood::Clearing,
    WeatherMood::Sunny,
];

/// One displayed value and how long it stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPhase<T> {
    pub shown: T,
    pub duration: Duration,
}

/// What a caller should display right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState<T> {
    /// Still animating; `step` indexes the active phase.
    Cycling { step: usize, shown: T },
    Settled(T),
}

impl<T: Copy> RevealState<T> {
    pub fn shown(&self) -> T {
        match self {
            Self::Cycling { shown, .. } => *shown,
            Self::Settled(value) => *value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RevealSequence<T> {
    phases: Vec<RevealPhase<T>>,
    result: T,
    elapsed: Duration,
}

impl<T: Copy> RevealSequence<T> {
    pub fn new(phases: Vec<RevealPhase<T>>, result: T) -> Self {
        Self {
            phases,
            result,
            elapsed: Duration::ZERO,
        }
    }

    pub fn result(&self) -> T {
        self.result
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Moves the clock forward by `delta` and returns the new state.
    pub fn advance(&mut self, delta: Duration) -> RevealState<T> {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.state()
    }

    /// Jumps straight to the result.
    pub fn skip(&mut self) -> T {
        self.elapsed = self.elapsed.max(self.total_duration());
        self.result
    }

    pub fn state(&self) -> RevealState<T> {
        let mut phase_end = Duration::ZERO;
        for (step, phase) in self.phases.iter().enumerate() {
            phase_end += phase.duration;
            if self.elapsed < phase_end {
                return RevealState::Cycling {
                    step,
                    shown: phase.shown,
                };
            }
        }
        RevealState::Settled(self.result)
    }
}

impl RevealSequence<WeatherMood> {
    /// Cycles cloudy, rainy, clearing, sunny, then settles on `result`.
    pub fn weather(result: WeatherMood) -> Self {
        let phases = WEATHER_CYCLE
            .into_iter()
            .map(|shown| RevealPhase {
                shown,
                duration: WEATHER_CYCLE_STEP,
            })
            .collect();
        Self::new(phases, result)
    }
}

impl RevealSequence<MoodLabel> {
    /// Holds `current` while analyzing, then settles on `result`.
    pub fn mood(current: MoodLabel, result: MoodLabel) -> Self {
        Self::new(
            vec![RevealPhase {
                shown: current,
                duration: MOOD_ANALYSIS_DELAY,
            }],
            result,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealSequence, RevealState, MOOD_ANALYSIS_DELAY, WEATHER_CYCLE_STEP};
    use crate::analysis::mood::MoodLabel;
    use crate::analysis::weather::WeatherMood;
    use std::time::Duration;

    #[test]
    fn weather_reveal_cycles_then_settles_on_result() {
        let mut sequence = RevealSequence::weather(WeatherMood::Rainy);
        assert_eq!(
            sequence.state(),
            RevealState::Cycling {
                step: 0,
                shown: WeatherMood::Cloudy
            }
        );

        let shown: Vec<WeatherMood> = (0..4)
            .map(|_| sequence.advance(WEATHER_CYCLE_STEP).shown())
            .collect();
        assert_eq!(
            shown,
            vec![
                WeatherMood::Rainy,
                WeatherMood::Clearing,
                WeatherMood::Sunny,
                WeatherMood::Rainy,
            ]
        );
        assert!(sequence.is_settled());
        assert_eq!(sequence.state(), RevealState::Settled(WeatherMood::Rainy));
    }

    #[test]
    fn phase_boundaries_belong_to_the_next_phase() {
        let mut sequence = RevealSequence::weather(WeatherMood::Sunny);
        let state = sequence.advance(WEATHER_CYCLE_STEP - Duration::from_millis(1));
        assert_eq!(state.shown(), WeatherMood::Cloudy);
        let state = sequence.advance(Duration::from_millis(1));
        assert_eq!(
            state,
            RevealState::Cycling {
                step: 1,
                shown: WeatherMood::Rainy
            }
        );
    }

    #[test]
    fn mood_reveal_holds_current_face_until_delay_passes() {
        let mut sequence = RevealSequence::mood(MoodLabel::Neutral, MoodLabel::Calm);
        assert_eq!(sequence.total_duration(), MOOD_ANALYSIS_DELAY);
        assert_eq!(
            sequence.advance(Duration::from_millis(2000)).shown(),
            MoodLabel::Neutral
        );
        assert_eq!(
            sequence.advance(Duration::from_secs(60)),
            RevealState::Settled(MoodLabel::Calm)
        );
    }

    #[test]
    fn skip_settles_immediately() {
        let mut sequence = RevealSequence::weather(WeatherMood::Clearing);
        assert_eq!(sequence.skip(), WeatherMood::Clearing);
        assert!(sequence.is_settled());
        assert_eq!(sequence.result(), WeatherMood::Clearing);
    }
}

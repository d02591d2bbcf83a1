use crate::config::LiveConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    Penalties,
    Finished,
}

impl MatchPhase {
    /// Phase after this one. Extra time only follows a level second half
    /// when the competition plays it.
    pub fn next(self, level: bool, extra_time_enabled: bool) -> MatchPhase {
        match self {
            MatchPhase::PreMatch => MatchPhase::FirstHalf,
            MatchPhase::FirstHalf => MatchPhase::HalfTime,
            MatchPhase::HalfTime => MatchPhase::SecondHalf,
            MatchPhase::SecondHalf if level && extra_time_enabled => MatchPhase::ExtraTime,
            MatchPhase::SecondHalf => MatchPhase::Finished,
            MatchPhase::ExtraTime => MatchPhase::Penalties,
            MatchPhase::Penalties => MatchPhase::Finished,
            MatchPhase::Finished => MatchPhase::Finished,
        }
    }

    fn start_minute(self) -> u16 {
        match self {
            MatchPhase::PreMatch | MatchPhase::FirstHalf => 0,
            MatchPhase::HalfTime | MatchPhase::SecondHalf => 45,
            MatchPhase::ExtraTime | MatchPhase::Finished => 90,
            MatchPhase::Penalties => 120,
        }
    }

    fn played_minutes(self) -> Option<u16> {
        match self {
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => Some(45),
            MatchPhase::ExtraTime => Some(30),
            _ => None,
        }
    }
}

/// Maps real elapsed time onto the displayed phase and minute.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    config: LiveConfig,
}

impl PhaseClock {
    pub fn new(config: LiveConfig) -> Self {
        PhaseClock { config }
    }

    fn minute_ms(&self) -> f64 {
        self.config.match_duration_secs as f64 * 1000.0 / 90.0
    }

    fn duration_ms(&self, phase: MatchPhase) -> Option<f64> {
        match phase {
            MatchPhase::PreMatch => Some(self.config.pre_match_secs as f64 * 1000.0),
            MatchPhase::HalfTime => Some(self.config.half_time_secs as f64 * 1000.0),
            MatchPhase::Penalties => Some(self.config.penalties_secs as f64 * 1000.0),
            MatchPhase::Finished => None,
            phase => phase
                .played_minutes()
                .map(|minutes| minutes as f64 * self.minute_ms()),
        }
    }

    /// `level` is whether the match is level after 90 minutes.
    pub fn position(&self, elapsed_ms: i64, level: bool) -> (MatchPhase, u16) {
        let mut phase = MatchPhase::PreMatch;
        let mut remaining = elapsed_ms.max(0) as f64;

        loop {
            let Some(duration) = self.duration_ms(phase) else {
                let minute = if level && self.config.extra_time_enabled { 120 } else { 90 };
                return (MatchPhase::Finished, minute);
            };

            if remaining < duration {
                let minute = match phase.played_minutes() {
                    Some(_) => phase.start_minute() + (remaining / self.minute_ms()) as u16,
                    None => phase.start_minute(),
                };
                return (phase, minute);
            }

            remaining -= duration;
            phase = phase.next(level, self.config.extra_time_enabled);
        }
    }
}

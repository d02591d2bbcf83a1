use crate::r#match::engine::config::EngineConfig;
use crate::shared::RandomSource;

/// Crowd-driven luck. The fuller the home stadium, the higher the ceiling of
/// the home side's luck roll.
pub struct HomeAdvantage {
    luck_base: i32,
    home_bonus_span: i32,
}

impl HomeAdvantage {
    pub fn new(config: &EngineConfig) -> Self {
        HomeAdvantage {
            luck_base: config.luck_base,
            home_bonus_span: config.home_bonus_span,
        }
    }

    /// Spectators for a stadium of `capacity`, drawn in `[capacity / 3, capacity]`.
    pub fn draw_spectators(capacity: u32, rng: &mut dyn RandomSource) -> u32 {
        let capacity = capacity.min(i32::MAX as u32) as i32;
        rng.range(capacity / 3, capacity).max(0) as u32
    }

    pub fn occupancy(spectators: u32, capacity: u32) -> f64 {
        if capacity == 0 {
            return 0.0;
        }

        (spectators as f64 / capacity as f64).clamp(0.0, 1.0)
    }

    pub fn home_luck_ceiling(&self, spectators: u32, capacity: u32) -> i32 {
        let bonus = (Self::occupancy(spectators, capacity) * self.home_bonus_span as f64).floor();
        self.luck_base + bonus as i32
    }

    pub fn away_luck_ceiling(&self) -> i32 {
        self.luck_base
    }
}

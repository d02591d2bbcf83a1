use serde::{Deserialize, Serialize};

/// Balance of the action engine. Percentages are in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub actions_min: i32,
    pub actions_max: i32,

    pub luck_base: i32,
    pub home_bonus_span: i32,
    pub luck_drift: i32,
    pub luck_floor_home: i32,
    pub luck_floor_away: i32,

    pub pass_completion: i32,
    pub advance_favoured: i32,
    pub advance_unfavoured: i32,
    pub mentality_bonus: i32,

    pub shot_favoured: i32,
    pub miss_unfavoured: i32,
    pub foul_favoured: i32,
    pub foul_unfavoured: i32,
    pub free_kick_favoured: i32,
    pub free_kick_miss_unfavoured: i32,

    pub decay_base: f32,
    pub decay_stamina_factor: f32,

    pub substitution_threshold: f32,
    pub max_substitutions: u8,

    pub injury_intensity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            actions_min: 15,
            actions_max: 25,

            luck_base: 20,
            home_bonus_span: 10,
            luck_drift: 3,
            luck_floor_home: 10,
            luck_floor_away: 8,

            pass_completion: 75,
            advance_favoured: 65,
            advance_unfavoured: 45,
            mentality_bonus: 3,

            shot_favoured: 65,
            miss_unfavoured: 55,
            foul_favoured: 40,
            foul_unfavoured: 20,
            free_kick_favoured: 40,
            free_kick_miss_unfavoured: 70,

            decay_base: 0.5,
            decay_stamina_factor: 1.5,

            substitution_threshold: 40.0,
            max_substitutions: 3,

            injury_intensity: 0.25,
        }
    }
}

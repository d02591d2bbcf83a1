use serde::{Deserialize, Serialize};

/// Skill ratings on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSkills {
    pub stamina: f32,
    pub playmaking: f32,
    pub scoring: f32,
    pub winger: f32,
    pub goalkeeping: f32,
    pub passing: f32,
    pub defending: f32,
    pub set_pieces: f32,
}

impl PlayerSkills {
    pub fn uniform(value: f32) -> Self {
        PlayerSkills {
            stamina: value,
            playmaking: value,
            scoring: value,
            winger: value,
            goalkeeping: value,
            passing: value,
            defending: value,
            set_pieces: value,
        }
    }

    pub fn average(&self) -> f32 {
        (self.stamina
            + self.playmaking
            + self.scoring
            + self.winger
            + self.goalkeeping
            + self.passing
            + self.defending
            + self.set_pieces)
            / 8.0
    }
}

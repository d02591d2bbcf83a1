use crate::club::player::injury::InjuryType;
use crate::club::player::position::PlayerRole;
use crate::club::player::skills::PlayerSkills;
use serde::{Deserialize, Serialize};

pub const CONDITION_MAX_VALUE: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub role: PlayerRole,
    pub age: u8,
    pub skills: PlayerSkills,
    /// Match fitness in `[0, 100]`. Older records may not carry it.
    pub condition: Option<f32>,
    pub is_injured: bool,
    pub injury: Option<InjuryType>,
    pub injury_count: u16,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Missing condition counts as an exhausted player.
    pub fn condition_or_default(&self) -> f32 {
        self.condition.unwrap_or(0.0)
    }

    pub fn decrease_condition(&mut self, amount: f32) {
        let value = (self.condition_or_default() - amount).clamp(0.0, CONDITION_MAX_VALUE);
        self.condition = Some(value);
    }

    pub fn set_condition(&mut self, value: f32) {
        self.condition = Some(value.clamp(0.0, CONDITION_MAX_VALUE));
    }

    pub fn set_injury(&mut self, injury: InjuryType) {
        self.is_injured = true;
        self.injury = Some(injury);
        self.injury_count = self.injury_count.saturating_add(1);
    }

    pub fn average(&self) -> i32 {
        self.skills.average() as i32
    }

    pub fn offence_average(&self) -> i32 {
        let skills = &self.skills;
        ((skills.playmaking + skills.winger + skills.passing + self.condition_or_default()) / 4.0)
            as i32
    }

    pub fn defence_average(&self) -> i32 {
        let skills = &self.skills;
        ((skills.playmaking + skills.defending + self.condition_or_default()) / 3.0) as i32
    }

    pub fn scoring_average(&self) -> i32 {
        ((self.skills.scoring + self.condition_or_default()) / 2.0) as i32
    }

    pub fn goalkeeping_average(&self) -> i32 {
        ((self.skills.goalkeeping + self.condition_or_default()) / 2.0) as i32
    }

    pub fn set_pieces_average(&self) -> i32 {
        ((self.skills.set_pieces + self.condition_or_default()) / 2.0) as i32
    }
}

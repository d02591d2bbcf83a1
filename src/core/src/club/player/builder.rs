use crate::club::player::player::Player;
use crate::club::player::position::PlayerRole;
use crate::club::player::skills::PlayerSkills;

#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<u32>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<PlayerRole>,
    age: Option<u8>,
    skills: Option<PlayerSkills>,
    condition: Option<Option<f32>>,
    injury_count: Option<u16>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn role(mut self, role: PlayerRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn skills(mut self, skills: PlayerSkills) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn condition(mut self, condition: Option<f32>) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn injury_count(mut self, injury_count: u16) -> Self {
        self.injury_count = Some(injury_count);
        self
    }

    pub fn build(self) -> Result<Player, String> {
        Ok(Player {
            id: self.id.ok_or("id is required")?,
            first_name: self.first_name.ok_or("first_name is required")?,
            last_name: self.last_name.unwrap_or_default(),
            role: self.role.ok_or("role is required")?,
            age: self.age.unwrap_or(25),
            skills: self.skills.ok_or("skills is required")?,
            condition: self.condition.unwrap_or(Some(100.0)),
            is_injured: false,
            injury: None,
            injury_count: self.injury_count.unwrap_or(0),
        })
    }
}

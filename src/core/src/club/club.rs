use crate::club::player::Player;
use crate::r#match::squad::{Mentality, Module};
use serde::{Deserialize, Serialize};

/// What a match needs to know about a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRef {
    pub id: u32,
    pub name: String,
    /// Manager in control of the club, `None` for computer-run clubs.
    pub user_id: Option<u32>,
}

impl ClubRef {
    pub fn new(id: u32, name: &str, user_id: Option<u32>) -> Self {
        ClubRef {
            id,
            name: name.to_string(),
            user_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stadium {
    pub capacity: u32,
}

/// A club together with everything the selector and the engine read: roster,
/// ground and the manager's tactical choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSquad {
    pub club: ClubRef,
    pub stadium: Stadium,
    pub module: Module,
    pub mentality: Mentality,
    pub players: Vec<Player>,
}

impl ClubSquad {
    pub fn player(&self, player_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }
}

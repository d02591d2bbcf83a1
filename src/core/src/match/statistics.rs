use crate::r#match::events::MatchSide;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub shots: u16,
    pub shots_on_target: u16,
    pub fouls: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub possession: u8,
    pub passes: u16,
    pub completed_passes: u16,
    pub tackles: u16,
    pub interceptions: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub home: TeamStatistics,
    pub away: TeamStatistics,
}

impl MatchStatistics {
    pub fn side(&self, side: MatchSide) -> &TeamStatistics {
        match side {
            MatchSide::Home => &self.home,
            MatchSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: MatchSide) -> &mut TeamStatistics {
        match side {
            MatchSide::Home => &mut self.home,
            MatchSide::Away => &mut self.away,
        }
    }
}

/// What a single player did in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMatchStats {
    pub player_id: u32,
    pub club_id: u32,
    pub side: MatchSide,
    pub position: String,
    pub started: bool,
    pub minutes: u8,
    pub goals: u16,
    pub assists: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub passes: u16,
    pub completed_passes: u16,
    pub tackles: u16,
    pub yellow_cards: u8,
    pub red_cards: u8,
    pub saves: u16,
    pub goals_conceded: u16,
    pub rating: f32,
    pub mvp: bool,
}

impl PlayerMatchStats {
    pub fn new(player_id: u32, club_id: u32, side: MatchSide, position: &str, started: bool) -> Self {
        PlayerMatchStats {
            player_id,
            club_id,
            side,
            position: position.to_string(),
            started,
            minutes: 0,
            goals: 0,
            assists: 0,
            shots: 0,
            shots_on_target: 0,
            passes: 0,
            completed_passes: 0,
            tackles: 0,
            yellow_cards: 0,
            red_cards: 0,
            saves: 0,
            goals_conceded: 0,
            rating: 0.0,
            mvp: false,
        }
    }
}

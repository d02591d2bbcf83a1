use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchSide {
    Home,
    Away,
}

impl MatchSide {
    pub fn opposite(&self) -> MatchSide {
        match self {
            MatchSide::Home => MatchSide::Away,
            MatchSide::Away => MatchSide::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    KickOff,
    Goal,
    FreeKickGoal,
    Save,
    Miss,
    Foul,
    YellowCard,
    RedCard,
    Substitution,
    Injury,
}

impl EventKind {
    pub fn is_goal(&self) -> bool {
        matches!(self, EventKind::Goal | EventKind::FreeKickGoal)
    }
}

/// One line of the match timeline. Every event carries the score as it stood
/// right after it, which is what the live view replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub match_id: u32,
    pub minute: u8,
    pub kind: EventKind,
    pub side: Option<MatchSide>,
    pub player_id: Option<u32>,
    pub secondary_player_id: Option<u32>,
    pub description: String,
    pub home_score: u8,
    pub away_score: u8,
}

impl TimelineEvent {
    pub fn new(minute: u8, kind: EventKind, side: Option<MatchSide>, description: String) -> Self {
        TimelineEvent {
            match_id: 0,
            minute,
            kind,
            side,
            player_id: None,
            secondary_player_id: None,
            description,
            home_score: 0,
            away_score: 0,
        }
    }

    pub fn with_player(mut self, player_id: u32) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_secondary_player(mut self, player_id: u32) -> Self {
        self.secondary_player_id = Some(player_id);
        self
    }

    pub fn with_score(mut self, home_score: u8, away_score: u8) -> Self {
        self.home_score = home_score;
        self.away_score = away_score;
        self
    }

    pub fn is_goal_for(&self, side: MatchSide) -> bool {
        self.kind.is_goal() && self.side == Some(side)
    }
}

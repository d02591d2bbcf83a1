use crate::club::{ClubRef, InjuryType};
use crate::r#match::events::{EventKind, MatchSide, TimelineEvent};
use crate::r#match::squad::Formation;
use crate::r#match::statistics::{MatchStatistics, PlayerMatchStats};
use serde::{Deserialize, Serialize};

/// Condition and fitness to write back to the roster after a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub player_id: u32,
    pub club_id: u32,
    pub condition: f32,
    pub injury: Option<InjuryType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u8,
    pub away_score: u8,
}

/// Result override used by administrators to stage a specific outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForcedResult {
    HomeWin,
    AwayWin,
    Draw,
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub match_id: u32,
    pub home: ClubRef,
    pub away: ClubRef,
    pub home_score: u8,
    pub away_score: u8,
    pub spectators: u32,
    pub actions: u32,
    pub events: Vec<TimelineEvent>,
    pub statistics: MatchStatistics,
    pub player_stats: Vec<PlayerMatchStats>,
    pub home_formation: Formation,
    pub away_formation: Formation,
    pub player_updates: Vec<PlayerUpdate>,
}

impl MatchResult {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.match_id,
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }

    pub fn score(&self, side: MatchSide) -> u8 {
        match side {
            MatchSide::Home => self.home_score,
            MatchSide::Away => self.away_score,
        }
    }

    /// Bends the score to the requested outcome. The trailing side gets
    /// awarded goals at full time so the timeline still adds up to the score.
    pub fn apply_forced(&mut self, forced: ForcedResult) {
        let (home_target, away_target) = match forced {
            ForcedResult::HomeWin if self.home_score <= self.away_score => {
                (self.away_score + 1, self.away_score)
            }
            ForcedResult::AwayWin if self.away_score <= self.home_score => {
                (self.home_score, self.home_score + 1)
            }
            ForcedResult::Draw if self.home_score != self.away_score => {
                let level = self.home_score.max(self.away_score);
                (level, level)
            }
            _ => return,
        };

        let minute = self.events.last().map(|e| e.minute.max(90)).unwrap_or(90);

        while self.home_score < home_target {
            self.award_goal(MatchSide::Home, minute);
        }

        while self.away_score < away_target {
            self.award_goal(MatchSide::Away, minute);
        }
    }

    fn award_goal(&mut self, side: MatchSide, minute: u8) {
        let team = match side {
            MatchSide::Home => {
                self.home_score += 1;
                &self.home.name
            }
            MatchSide::Away => {
                self.away_score += 1;
                &self.away.name
            }
        };

        let mut event = TimelineEvent::new(
            minute,
            EventKind::Goal,
            Some(side),
            format!("Goal awarded to {}", team),
        )
        .with_score(self.home_score, self.away_score);

        event.match_id = self.match_id;

        self.events.push(event);
    }
}

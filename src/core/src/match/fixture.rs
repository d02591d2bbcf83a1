use crate::club::ClubRef;
use crate::r#match::events::{MatchSide, TimelineEvent};
use crate::r#match::result::{MatchResult, MatchSummary};
use crate::r#match::squad::Formation;
use crate::r#match::statistics::{MatchStatistics, PlayerMatchStats};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRef {
    pub id: u32,
    pub season_id: u32,
    pub number: u16,
    pub kickoff: NaiveDateTime,
    pub is_last: bool,
}

/// A fixture and, once played, its result.
///
/// Status only moves forward (`Scheduled` -> `InProgress` -> `Completed`);
/// `reset` is the single way back. Once completed the score and the timeline
/// are frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u32,
    pub home: ClubRef,
    pub away: ClubRef,
    pub round: RoundRef,
    pub spectators: Option<u32>,
    status: MatchStatus,
    home_score: Option<u8>,
    away_score: Option<u8>,
    events: Vec<TimelineEvent>,
    statistics: Option<MatchStatistics>,
    player_stats: Vec<PlayerMatchStats>,
    home_formation: Option<Formation>,
    away_formation: Option<Formation>,
}

impl Match {
    pub fn new(id: u32, home: ClubRef, away: ClubRef, round: RoundRef) -> Self {
        Match {
            id,
            home,
            away,
            round,
            spectators: None,
            status: MatchStatus::Scheduled,
            home_score: None,
            away_score: None,
            events: Vec::new(),
            statistics: None,
            player_stats: Vec::new(),
            home_formation: None,
            away_formation: None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn home_score(&self) -> Option<u8> {
        self.home_score
    }

    pub fn away_score(&self) -> Option<u8> {
        self.away_score
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn statistics(&self) -> Option<&MatchStatistics> {
        self.statistics.as_ref()
    }

    pub fn player_stats(&self) -> &[PlayerMatchStats] {
        &self.player_stats
    }

    pub fn formation(&self, side: MatchSide) -> Option<&Formation> {
        match side {
            MatchSide::Home => self.home_formation.as_ref(),
            MatchSide::Away => self.away_formation.as_ref(),
        }
    }

    pub fn club(&self, side: MatchSide) -> &ClubRef {
        match side {
            MatchSide::Home => &self.home,
            MatchSide::Away => &self.away,
        }
    }

    pub fn goals(&self, side: MatchSide) -> usize {
        self.events.iter().filter(|e| e.is_goal_for(side)).count()
    }

    /// The only way events enter a match: stamps the back-reference and keeps
    /// the timeline ordered by minute. Completed matches refuse new events.
    pub fn push_event(&mut self, mut event: TimelineEvent) -> bool {
        if self.is_completed() {
            return false;
        }

        event.match_id = self.id;

        let position = self.events.partition_point(|e| e.minute <= event.minute);
        self.events.insert(position, event);

        true
    }

    /// Marks the match as being played live: the score starts at 0-0 and the
    /// timeline stays empty until the live session hands it back.
    pub fn start(&mut self, result: &MatchResult) -> bool {
        if self.status != MatchStatus::Scheduled {
            return false;
        }

        self.status = MatchStatus::InProgress;
        self.home_score = Some(0);
        self.away_score = Some(0);
        self.spectators = Some(result.spectators);
        self.home_formation = Some(result.home_formation.clone());
        self.away_formation = Some(result.away_formation.clone());
        self.events.clear();
        self.statistics = None;
        self.player_stats.clear();

        true
    }

    pub fn complete(
        &mut self,
        home_score: u8,
        away_score: u8,
        events: Vec<TimelineEvent>,
        statistics: MatchStatistics,
        player_stats: Vec<PlayerMatchStats>,
    ) -> bool {
        if self.is_completed() {
            return false;
        }

        self.events.clear();
        for event in events {
            self.push_event(event);
        }

        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.statistics = Some(statistics);
        self.player_stats = player_stats;
        self.status = MatchStatus::Completed;

        true
    }

    pub fn complete_with_result(&mut self, result: &MatchResult) -> bool {
        if self.is_completed() {
            return false;
        }

        self.spectators = Some(result.spectators);
        self.home_formation = Some(result.home_formation.clone());
        self.away_formation = Some(result.away_formation.clone());

        self.complete(
            result.home_score,
            result.away_score,
            result.events.clone(),
            result.statistics.clone(),
            result.player_stats.clone(),
        )
    }

    /// Back to an unplayed fixture: no score, timeline, statistics,
    /// formations or player contributions.
    pub fn reset(&mut self) {
        self.status = MatchStatus::Scheduled;
        self.home_score = None;
        self.away_score = None;
        self.spectators = None;
        self.events.clear();
        self.statistics = None;
        self.player_stats.clear();
        self.home_formation = None;
        self.away_formation = None;
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.id,
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_score: self.home_score.unwrap_or(0),
            away_score: self.away_score.unwrap_or(0),
        }
    }
}

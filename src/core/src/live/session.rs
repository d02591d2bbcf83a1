use crate::club::ClubRef;
use crate::live::phase::MatchPhase;
use crate::r#match::{MatchResult, MatchStatistics, PlayerMatchStats, TimelineEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live mirror of a match that has already been simulated. The full result
/// sits in the session and is revealed minute by minute; finalizing copies
/// it back onto the match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub match_id: u32,
    pub home: ClubRef,
    pub away: ClubRef,
    pub started_at: DateTime<Utc>,
    pub phase: MatchPhase,
    pub minute: u16,
    pub paused: bool,
    pub pause_reason: Option<String>,
    pub paused_at: Option<DateTime<Utc>>,
    pub home_score: u8,
    pub away_score: u8,
    pub spectators: u32,
    pub events: Vec<TimelineEvent>,
    pub statistics: MatchStatistics,
    pub player_stats: Vec<PlayerMatchStats>,
    pub final_home_score: u8,
    pub final_away_score: u8,
    pub finished: bool,
    pub finalize_attempts: u32,
}

/// What subscribers receive on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub match_id: u32,
    pub phase: MatchPhase,
    pub minute: u16,
    pub home_score: u8,
    pub away_score: u8,
    pub paused: bool,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatchData {
    pub match_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub phase: MatchPhase,
    pub minute: u16,
    pub home_score: u8,
    pub away_score: u8,
    pub spectators: u32,
    pub paused: bool,
    pub pause_reason: Option<String>,
    pub finished: bool,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatchSummary {
    pub match_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub phase: MatchPhase,
    pub minute: u16,
    pub home_score: u8,
    pub away_score: u8,
    pub paused: bool,
}

impl LiveSession {
    pub fn from_result(result: &MatchResult, started_at: DateTime<Utc>) -> Self {
        LiveSession {
            match_id: result.match_id,
            home: result.home.clone(),
            away: result.away.clone(),
            started_at,
            phase: MatchPhase::PreMatch,
            minute: 0,
            paused: false,
            pause_reason: None,
            paused_at: None,
            home_score: 0,
            away_score: 0,
            spectators: result.spectators,
            events: result.events.clone(),
            statistics: result.statistics.clone(),
            player_stats: result.player_stats.clone(),
            final_home_score: result.home_score,
            final_away_score: result.away_score,
            finished: false,
            finalize_attempts: 0,
        }
    }

    pub fn is_level(&self) -> bool {
        self.final_home_score == self.final_away_score
    }

    pub fn revealed_events(&self) -> impl Iterator<Item = &TimelineEvent> {
        let minute = self.minute;
        let finished = self.finished;

        self.events
            .iter()
            .filter(move |e| finished || e.minute as u16 <= minute)
    }

    /// Moves the mirror forward and returns the events revealed by the move,
    /// those with a minute in `(old, new]`. The mirrored score follows the
    /// snapshot of the last revealed event.
    pub fn advance_to(&mut self, phase: MatchPhase, minute: u16) -> Vec<TimelineEvent> {
        let previous = self.minute;
        let minute = minute.max(previous);

        self.phase = phase;
        self.minute = minute;

        let revealed: Vec<TimelineEvent> = self
            .events
            .iter()
            .filter(|e| (e.minute as u16) > previous && (e.minute as u16) <= minute)
            .cloned()
            .collect();

        let score = self
            .revealed_events()
            .last()
            .map(|e| (e.home_score, e.away_score));

        if let Some((home_score, away_score)) = score {
            self.home_score = home_score;
            self.away_score = away_score;
        }

        revealed
    }

    /// Final whistle: everything is revealed and the mirror shows the final score.
    pub fn finish(&mut self) {
        self.phase = MatchPhase::Finished;
        self.minute = self.minute.max(90);
        self.finished = true;
        self.paused = false;
        self.pause_reason = None;
        self.paused_at = None;
        self.home_score = self.final_home_score;
        self.away_score = self.final_away_score;
    }

    pub fn pause(&mut self, reason: Option<String>, now: DateTime<Utc>) -> bool {
        if self.paused || self.finished {
            return false;
        }

        self.paused = true;
        self.pause_reason = reason;
        self.paused_at = Some(now);

        true
    }

    /// Resumes the clock, shifting the start so paused time does not count.
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if !self.paused {
            return false;
        }

        if let Some(paused_at) = self.paused_at.take() {
            self.started_at += now - paused_at;
        }

        self.paused = false;
        self.pause_reason = None;

        true
    }

    pub fn snapshot(&self, recent_events: usize) -> LiveSnapshot {
        let revealed: Vec<&TimelineEvent> = self.revealed_events().collect();
        let skip = revealed.len().saturating_sub(recent_events);

        LiveSnapshot {
            match_id: self.match_id,
            phase: self.phase,
            minute: self.minute,
            home_score: self.home_score,
            away_score: self.away_score,
            paused: self.paused,
            events: revealed.into_iter().skip(skip).cloned().collect(),
        }
    }

    pub fn live_data(&self) -> LiveMatchData {
        LiveMatchData {
            match_id: self.match_id,
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            phase: self.phase,
            minute: self.minute,
            home_score: self.home_score,
            away_score: self.away_score,
            spectators: self.spectators,
            paused: self.paused,
            pause_reason: self.pause_reason.clone(),
            finished: self.finished,
            events: self.revealed_events().cloned().collect(),
        }
    }

    pub fn summary(&self) -> LiveMatchSummary {
        LiveMatchSummary {
            match_id: self.match_id,
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            phase: self.phase,
            minute: self.minute,
            home_score: self.home_score,
            away_score: self.away_score,
            paused: self.paused,
        }
    }
}

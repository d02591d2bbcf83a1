use crate::r#match::{MatchStatus, MatchSummary, SimulationError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Simulated, persisted as in progress and handed to the live view.
    Started(MatchSummary),
    Skipped { match_id: u32, status: MatchStatus },
    AlreadyRunning(u32),
    Failed(SimulationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalizeOutcome {
    Completed,
    CompletedAfterRetry { retries: u32 },
    AlreadyCompleted,
    NotInProgress,
    MatchNotFound,
    ConflictExhausted { attempts: u32 },
}

impl FinalizeOutcome {
    /// Whether the live session is done with. Only exhausted conflicts keep
    /// it open for the next tick.
    pub fn closes_session(&self) -> bool {
        !matches!(self, FinalizeOutcome::ConflictExhausted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResetOutcome {
    Reset {
        session_removed: bool,
        standings_reverted: bool,
    },
    MatchNotFound {
        session_removed: bool,
    },
    ConflictExhausted {
        attempts: u32,
    },
}

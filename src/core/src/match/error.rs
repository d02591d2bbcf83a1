use crate::r#match::fixture::MatchStatus;
use crate::r#match::squad::FormationError;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("match {0} not found")]
    MatchNotFound(u32),
    #[error("squad of club {0} not found")]
    ClubNotFound(u32),
    #[error("match {match_id} is {status:?}, only scheduled matches can be simulated")]
    NotScheduled { match_id: u32, status: MatchStatus },
    #[error(transparent)]
    RosterIncomplete(#[from] FormationError),
    #[error("invalid formation for club {club_id}: {reason}")]
    InvalidFormation { club_id: u32, reason: String },
    #[error("simulation of match {match_id} aborted: {reason}")]
    Aborted { match_id: u32, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },
    #[error("match {id} was modified concurrently: expected version {expected}, found {actual}")]
    Conflict { id: u32, expected: u64, actual: u64 },
    #[error(
        "standings of club {club_id} in season {season_id} were modified concurrently: expected version {expected}, found {actual}"
    )]
    StandingsConflict {
        season_id: u32,
        club_id: u32,
        expected: u64,
        actual: u64,
    },
}

use crate::r#match::{Match, MatchStatus};
use crate::store::error::StoreError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub type Version = u64;

/// Match persistence with optimistic concurrency: every save names the
/// version it was loaded at and fails with `StoreError::Conflict` when the
/// record moved on in between.
pub trait MatchRepository: Send + Sync {
    fn find(&self, match_id: u32) -> Option<(Match, Version)>;

    fn find_many(&self, match_ids: &[u32]) -> Vec<(Match, Version)>;

    fn find_by_round(&self, round_id: u32) -> Vec<Match>;

    /// Matches in `status` whose kickoff is at or before `until`.
    fn find_due(&self, status: MatchStatus, until: NaiveDateTime) -> Vec<Match>;

    fn insert(&self, fixture: Match);

    fn save(&self, fixture: &Match, expected: Version) -> Result<Version, StoreError>;

    /// Bulk save, one result per item in input order.
    fn save_all(&self, items: &[(Match, Version)]) -> Vec<Result<Version, StoreError>>;
}

#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: RwLock<HashMap<u32, (Match, Version)>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn save_locked(
        matches: &mut HashMap<u32, (Match, Version)>,
        fixture: &Match,
        expected: Version,
    ) -> Result<Version, StoreError> {
        let Some((stored, version)) = matches.get_mut(&fixture.id) else {
            return Err(StoreError::NotFound {
                entity: "match",
                id: fixture.id,
            });
        };

        if *version != expected {
            return Err(StoreError::Conflict {
                id: fixture.id,
                expected,
                actual: *version,
            });
        }

        *stored = fixture.clone();
        *version += 1;

        Ok(*version)
    }
}

impl MatchRepository for InMemoryMatchRepository {
    fn find(&self, match_id: u32) -> Option<(Match, Version)> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);
        matches.get(&match_id).cloned()
    }

    fn find_many(&self, match_ids: &[u32]) -> Vec<(Match, Version)> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);
        match_ids
            .iter()
            .filter_map(|id| matches.get(id).cloned())
            .collect()
    }

    fn find_by_round(&self, round_id: u32) -> Vec<Match> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);

        let mut result: Vec<Match> = matches
            .values()
            .filter(|(m, _)| m.round.id == round_id)
            .map(|(m, _)| m.clone())
            .collect();

        result.sort_by_key(|m| m.id);
        result
    }

    fn find_due(&self, status: MatchStatus, until: NaiveDateTime) -> Vec<Match> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);

        let mut result: Vec<Match> = matches
            .values()
            .filter(|(m, _)| m.status() == status && m.round.kickoff <= until)
            .map(|(m, _)| m.clone())
            .collect();

        result.sort_by_key(|m| (m.round.kickoff, m.id));
        result
    }

    fn insert(&self, fixture: Match) {
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        matches.insert(fixture.id, (fixture, 0));
    }

    fn save(&self, fixture: &Match, expected: Version) -> Result<Version, StoreError> {
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        Self::save_locked(&mut matches, fixture, expected)
    }

    fn save_all(&self, items: &[(Match, Version)]) -> Vec<Result<Version, StoreError>> {
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        items
            .iter()
            .map(|(fixture, expected)| Self::save_locked(&mut matches, fixture, *expected))
            .collect()
    }
}

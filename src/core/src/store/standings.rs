use crate::league::StandingsRow;
use crate::store::error::StoreError;
use crate::store::matches::Version;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Standings persistence with optimistic concurrency. A row that does not
/// exist yet is at version 0; every save bumps the version of the rows it
/// writes.
pub trait StandingsRepository: Send + Sync {
    /// Loads the rows of all given clubs in one go. Missing rows are left out.
    fn find_by_clubs(&self, season_id: u32, club_ids: &[u32]) -> Vec<(StandingsRow, Version)>;

    fn find_by_season(&self, season_id: u32) -> Vec<StandingsRow>;

    /// Writes all rows or none: fails with `StoreError::StandingsConflict`
    /// when any row moved past the version it was loaded at.
    fn save_all(&self, rows: &[(StandingsRow, Version)]) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryStandingsRepository {
    rows: RwLock<HashMap<(u32, u32), (StandingsRow, Version)>>,
}

impl InMemoryStandingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StandingsRepository for InMemoryStandingsRepository {
    fn find_by_clubs(&self, season_id: u32, club_ids: &[u32]) -> Vec<(StandingsRow, Version)> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        club_ids
            .iter()
            .filter_map(|club_id| rows.get(&(season_id, *club_id)).cloned())
            .collect()
    }

    fn find_by_season(&self, season_id: u32) -> Vec<StandingsRow> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.values()
            .filter(|(row, _)| row.season_id == season_id)
            .map(|(row, _)| row.clone())
            .collect()
    }

    fn save_all(&self, rows: &[(StandingsRow, Version)]) -> Result<(), StoreError> {
        let mut stored = self.rows.write().unwrap_or_else(PoisonError::into_inner);

        for (row, expected) in rows {
            let actual = stored
                .get(&(row.season_id, row.club_id))
                .map(|(_, version)| *version)
                .unwrap_or(0);

            if actual != *expected {
                return Err(StoreError::StandingsConflict {
                    season_id: row.season_id,
                    club_id: row.club_id,
                    expected: *expected,
                    actual,
                });
            }
        }

        for (row, expected) in rows {
            stored.insert((row.season_id, row.club_id), (row.clone(), expected + 1));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rows_start_at_version_zero() {
        let repository = InMemoryStandingsRepository::new();

        repository
            .save_all(&[(StandingsRow::new(2025, 1), 0)])
            .unwrap();

        let loaded = repository.find_by_clubs(2025, &[1, 2]);

        assert_eq!(loaded, vec![(StandingsRow::new(2025, 1), 1)]);
    }

    #[test]
    fn test_stale_row_rejects_whole_batch() {
        let repository = InMemoryStandingsRepository::new();
        repository
            .save_all(&[(StandingsRow::new(2025, 1), 0)])
            .unwrap();

        let mut fresh = StandingsRow::new(2025, 2);
        fresh.apply(1, 1, 0);

        let result = repository.save_all(&[(fresh, 0), (StandingsRow::new(2025, 1), 0)]);

        assert_eq!(
            result,
            Err(StoreError::StandingsConflict {
                season_id: 2025,
                club_id: 1,
                expected: 0,
                actual: 1
            })
        );
        assert!(repository.find_by_clubs(2025, &[2]).is_empty());
    }
}

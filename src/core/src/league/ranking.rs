use crate::league::table::{LeagueTable, StandingsRow};
use crate::r#match::Match;
use crate::store::{StandingsRepository, Version};
use itertools::Itertools;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Folds match results into the league table.
///
/// Rows are shared between every match a club plays, so each change is a
/// load, modify and compare-and-swap cycle that starts over when another
/// writer got there first.
pub struct RankingService {
    standings: Arc<dyn StandingsRepository>,
}

impl RankingService {
    pub fn new(standings: Arc<dyn StandingsRepository>) -> Self {
        RankingService { standings }
    }

    /// Zeroed rows for every club of a new season. Existing rows are kept.
    pub fn create(&self, season_id: u32, club_ids: &[u32]) {
        self.commit(season_id, club_ids, |_| true);

        info!("season {}: {} standings rows ready", season_id, club_ids.len());
    }

    /// Counts one result for the two clubs. Matches without a score are
    /// ignored, and a result already counted is not counted twice.
    pub fn update(&self, fixture: &Match) -> bool {
        let Some((home_goals, away_goals)) = Self::score(fixture) else {
            warn!("match {} has no score, standings left untouched", fixture.id);
            return false;
        };

        let updated = self.commit(
            fixture.round.season_id,
            &[fixture.home.id, fixture.away.id],
            |rows| Self::count(rows, fixture, home_goals, away_goals),
        );

        debug!(
            "standings for match {} ({} {} - {} {}): {}",
            fixture.id,
            fixture.home.name,
            home_goals,
            away_goals,
            fixture.away.name,
            if updated { "updated" } else { "already counted" }
        );

        updated
    }

    /// Same table as calling `update` for every match in chronological order,
    /// with one bulk load and one bulk save per season.
    pub fn update_all(&self, matches: &[Match]) {
        let by_season = matches
            .iter()
            .filter(|m| Self::score(m).is_some())
            .into_group_map_by(|m| m.round.season_id);

        for (season_id, season_matches) in by_season {
            let ordered: Vec<&Match> = season_matches
                .into_iter()
                .sorted_by_key(|m| (m.round.number, m.round.kickoff, m.id))
                .collect();

            let club_ids: Vec<u32> = ordered
                .iter()
                .flat_map(|m| [m.home.id, m.away.id])
                .unique()
                .collect();

            self.commit(season_id, &club_ids, |rows| {
                let mut changed = false;

                for fixture in &ordered {
                    if let Some((home_goals, away_goals)) = Self::score(fixture) {
                        changed |= Self::count(rows, fixture, home_goals, away_goals);
                    }
                }

                changed
            });

            info!(
                "season {}: applied {} results to {} clubs",
                season_id,
                ordered.len(),
                club_ids.len()
            );
        }
    }

    /// Takes a match's contribution back out of the table. Only what was
    /// actually counted for this match is removed.
    pub fn revert(&self, fixture: &Match) -> bool {
        self.commit(
            fixture.round.season_id,
            &[fixture.home.id, fixture.away.id],
            |rows| {
                rows.values_mut()
                    .map(|row| row.revert(fixture.id))
                    .fold(false, |reverted, row_reverted| reverted | row_reverted)
            },
        )
    }

    /// Whether the match currently contributes to the table.
    pub fn counts(&self, fixture: &Match) -> bool {
        self.standings
            .find_by_clubs(fixture.round.season_id, &[fixture.home.id])
            .iter()
            .any(|(row, _)| row.counts(fixture.id))
    }

    pub fn table(&self, season_id: u32) -> Vec<StandingsRow> {
        LeagueTable::sort(self.standings.find_by_season(season_id))
    }

    /// Loads the clubs' rows, lets `change` edit them and saves them at the
    /// versions they were loaded at. Nothing is written when `change`
    /// reports no change.
    fn commit<F>(&self, season_id: u32, club_ids: &[u32], mut change: F) -> bool
    where
        F: FnMut(&mut HashMap<u32, StandingsRow>) -> bool,
    {
        let mut attempt = 1;

        loop {
            let mut versions: HashMap<u32, Version> = HashMap::new();
            let mut rows: HashMap<u32, StandingsRow> = HashMap::new();

            for (row, version) in self.standings.find_by_clubs(season_id, club_ids) {
                versions.insert(row.club_id, version);
                rows.insert(row.club_id, row);
            }

            for club_id in club_ids {
                rows.entry(*club_id)
                    .or_insert_with(|| StandingsRow::new(season_id, *club_id));
            }

            if !change(&mut rows) {
                return false;
            }

            let changed: Vec<(StandingsRow, Version)> = rows
                .into_values()
                .sorted_by_key(|row| row.club_id)
                .map(|row| {
                    let version = versions.get(&row.club_id).copied().unwrap_or(0);
                    (row, version)
                })
                .collect();

            match self.standings.save_all(&changed) {
                Ok(()) => return true,
                Err(error) => {
                    // Another writer committed in between, start over from its rows
                    debug!("season {}: attempt {}: {}", season_id, attempt, error);
                    attempt += 1;
                }
            }
        }
    }

    fn count(
        rows: &mut HashMap<u32, StandingsRow>,
        fixture: &Match,
        home_goals: u8,
        away_goals: u8,
    ) -> bool {
        let home = rows
            .get_mut(&fixture.home.id)
            .is_some_and(|row| row.apply(fixture.id, home_goals, away_goals));
        let away = rows
            .get_mut(&fixture.away.id)
            .is_some_and(|row| row.apply(fixture.id, away_goals, home_goals));

        home || away
    }

    fn score(fixture: &Match) -> Option<(u8, u8)> {
        Some((fixture.home_score()?, fixture.away_score()?))
    }
}

use crate::context::MatchdayContext;
use crate::league::RankingService;
use crate::r#match::engine::MatchEngine;
use crate::r#match::error::SimulationError;
use crate::r#match::fixture::{Match, MatchStatus};
use crate::r#match::result::{ForcedResult, MatchResult, MatchSummary};
use crate::r#match::setup::MatchSetup;
use crate::store::Version;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of one match inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub match_id: u32,
    pub result: Result<MatchSummary, SimulationError>,
}

/// Direct simulation without the live view: matches go straight from
/// `Scheduled` to `Completed`.
pub struct SimulationService {
    engine: Arc<MatchEngine>,
    context: MatchdayContext,
    ranking: Arc<RankingService>,
}

impl SimulationService {
    pub fn new(
        engine: Arc<MatchEngine>,
        context: MatchdayContext,
        ranking: Arc<RankingService>,
    ) -> Self {
        SimulationService {
            engine,
            context,
            ranking,
        }
    }

    pub fn simulate(
        &self,
        match_id: u32,
        forced: Option<ForcedResult>,
    ) -> Result<MatchSummary, SimulationError> {
        let setup = MatchSetup::load(
            self.context.matches.as_ref(),
            self.context.rosters.as_ref(),
            match_id,
        )?;

        ensure_scheduled(&setup.fixture)?;

        let mut rng = self.context.random.create(match_id);
        let mut result = setup.run(&self.engine, rng.as_mut())?;

        if let Some(forced) = forced {
            debug!("match {}: forcing result {:?}", match_id, forced);
            result.apply_forced(forced);
        }

        let mut fixture = setup.fixture;
        fixture.complete_with_result(&result);

        self.context.matches.save(&fixture, setup.version)?;
        self.context.rosters.apply_updates(&result.player_updates);
        self.context.history.record(&result.player_stats);
        self.ranking.update(&fixture);

        let summary = fixture.summary();

        info!(
            "match {} simulated: {} {} - {} {}",
            match_id, summary.home_team, summary.home_score, summary.away_score, summary.away_team
        );

        Ok(summary)
    }

    /// Every scheduled match of the round.
    pub fn simulate_round(&self, round_id: u32) -> Vec<BatchEntry> {
        let ids: Vec<u32> = self
            .context
            .matches
            .find_by_round(round_id)
            .iter()
            .filter(|m| m.status() == MatchStatus::Scheduled)
            .map(|m| m.id)
            .collect();

        self.simulate_all(&ids)
    }

    /// Runs the engine for every match in parallel, then writes players,
    /// history, matches and standings with one bulk call each. A failing
    /// match is reported in its entry and never stops the others.
    pub fn simulate_all(&self, match_ids: &[u32]) -> Vec<BatchEntry> {
        let mut failures: HashMap<u32, SimulationError> = HashMap::new();
        let mut setups = Vec::with_capacity(match_ids.len());

        let loaded: HashMap<u32, (Match, Version)> = self
            .context
            .matches
            .find_many(match_ids)
            .into_iter()
            .map(|(fixture, version)| (fixture.id, (fixture, version)))
            .collect();

        for &match_id in match_ids {
            let Some((fixture, version)) = loaded.get(&match_id).cloned() else {
                failures.insert(match_id, SimulationError::MatchNotFound(match_id));
                continue;
            };

            let setup = ensure_scheduled(&fixture).and_then(|_| {
                MatchSetup::with_rosters(fixture, version, self.context.rosters.as_ref())
            });

            match setup {
                Ok(setup) => setups.push(setup),
                Err(error) => {
                    failures.insert(match_id, error);
                }
            }
        }

        let engine = &self.engine;
        let random = &self.context.random;

        let played: Vec<(MatchSetup, Result<MatchResult, SimulationError>)> = setups
            .into_par_iter()
            .map(|setup| {
                let mut rng = random.create(setup.match_id());
                let result = setup.run(engine, rng.as_mut());
                (setup, result)
            })
            .collect();

        let mut pending: Vec<(Match, Version)> = Vec::with_capacity(played.len());
        let mut results: Vec<MatchResult> = Vec::with_capacity(played.len());

        for (setup, result) in played {
            match result {
                Ok(result) => {
                    let mut fixture = setup.fixture;
                    fixture.complete_with_result(&result);
                    pending.push((fixture, setup.version));
                    results.push(result);
                }
                Err(error) => {
                    warn!("match {} failed: {}", setup.fixture.id, error);
                    failures.insert(setup.fixture.id, error);
                }
            }
        }

        let saved = self.context.matches.save_all(&pending);

        let mut summaries: HashMap<u32, MatchSummary> = HashMap::new();
        let mut completed = Vec::with_capacity(pending.len());
        let mut updates = Vec::new();
        let mut stats = Vec::new();

        for (((fixture, _), result), outcome) in pending.into_iter().zip(results).zip(saved) {
            match outcome {
                Ok(_) => {
                    summaries.insert(fixture.id, fixture.summary());
                    updates.extend(result.player_updates);
                    stats.extend(result.player_stats);
                    completed.push(fixture);
                }
                Err(error) => {
                    warn!("match {} not saved: {}", fixture.id, error);
                    failures.insert(fixture.id, error.into());
                }
            }
        }

        self.context.rosters.apply_updates(&updates);
        self.context.history.record(&stats);
        self.ranking.update_all(&completed);

        info!(
            "batch of {} matches: {} completed, {} failed",
            match_ids.len(),
            completed.len(),
            failures.len()
        );

        match_ids
            .iter()
            .map(|&match_id| {
                let result = match summaries.remove(&match_id) {
                    Some(summary) => Ok(summary),
                    None => Err(failures
                        .remove(&match_id)
                        .unwrap_or(SimulationError::MatchNotFound(match_id))),
                };

                BatchEntry { match_id, result }
            })
            .collect()
    }
}

fn ensure_scheduled(fixture: &Match) -> Result<(), SimulationError> {
    match fixture.status() {
        MatchStatus::Scheduled => Ok(()),
        status => Err(SimulationError::NotScheduled {
            match_id: fixture.id,
            status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::MatchSide;
    use crate::store::MatchRepository;
    use crate::testing::{self, TestWorld, SEASON};

    #[test]
    fn test_simulate_completes_match_and_standings() {
        let world = TestWorld::new();
        world.add_fixture(1, 1, 2, 1);

        let summary = world.simulation().simulate(1, None).unwrap();

        assert_eq!((summary.home_score, summary.away_score), (5, 5));

        let fixture = world.matches.get(1);
        assert!(fixture.is_completed());
        assert_eq!(fixture.goals(MatchSide::Away), 5);
        assert!(world.ranking().table(SEASON).iter().all(|r| r.played == 1));
    }

    #[test]
    fn test_forced_result_is_persisted_consistently() {
        let world = TestWorld::new();
        world.add_fixture(1, 1, 2, 1);

        let summary = world
            .simulation()
            .simulate(1, Some(ForcedResult::HomeWin))
            .unwrap();

        assert_eq!((summary.home_score, summary.away_score), (6, 5));

        let fixture = world.matches.get(1);
        assert_eq!(fixture.goals(MatchSide::Home), 6);

        let table = world.ranking().table(SEASON);
        assert_eq!(table[0].club_id, 1);
        assert_eq!(table[0].points, 3);
    }

    #[test]
    fn test_simulate_refuses_played_match() {
        let world = TestWorld::new();
        world.add_fixture(1, 1, 2, 1);
        let service = world.simulation();
        service.simulate(1, None).unwrap();

        assert_eq!(
            service.simulate(1, None),
            Err(SimulationError::NotScheduled {
                match_id: 1,
                status: MatchStatus::Completed
            })
        );
    }

    #[test]
    fn test_batch_reports_failures_per_match() {
        let world = TestWorld::new();
        world.add_fixture(1, 1, 2, 1);
        world.add_fixture(2, 3, 4, 1);
        world.matches.insert(testing::fixture(3, 7, 8, 1));
        world.standings.reset();

        let entries = world.simulation().simulate_all(&[1, 2, 3, 99]);

        assert_eq!(
            entries.iter().map(|e| e.match_id).collect::<Vec<_>>(),
            vec![1, 2, 3, 99]
        );
        assert!(entries[0].result.is_ok());
        assert!(entries[1].result.is_ok());
        assert_eq!(entries[2].result, Err(SimulationError::ClubNotFound(7)));
        assert_eq!(entries[3].result, Err(SimulationError::MatchNotFound(99)));

        assert!(world.matches.get(1).is_completed());
        assert!(world.matches.get(2).is_completed());
        assert!(!world.matches.get(3).is_completed());
        assert_eq!(world.matches.saves(), 2);
    }

    #[test]
    fn test_batch_writes_standings_once() {
        let world = TestWorld::new();
        for n in 0..4u32 {
            world.add_fixture(n + 1, n * 2 + 1, n * 2 + 2, 1);
        }
        world.standings.reset();

        let entries = world.simulation().simulate_round(1);

        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.result.is_ok()));
        assert_eq!(world.standings.bulk_loads(), 1);
        assert_eq!(world.standings.saves(), 1);
        assert_eq!(world.ranking().table(SEASON).len(), 8);
        assert!(world.history.career(100).is_some());
    }
}

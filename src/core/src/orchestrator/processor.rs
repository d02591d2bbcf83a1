use crate::config::OrchestratorConfig;
use crate::context::MatchdayContext;
use crate::league::{RankingService, RoundProgress, SeasonCalendar};
use crate::live::LiveSession;
use crate::orchestrator::outcome::{FinalizeOutcome, ProcessOutcome, ResetOutcome};
use crate::r#match::{
    Match, MatchEngine, MatchResult, MatchSetup, MatchStatus, MatchSummary, SimulationError,
};
use crate::store::StoreError;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Runs matches in the background and owns every write that moves a match
/// between statuses.
pub struct MatchProcessor {
    engine: Arc<MatchEngine>,
    context: MatchdayContext,
    ranking: Arc<RankingService>,
    config: OrchestratorConfig,
    calendar: SeasonCalendar,
    in_flight: Mutex<HashSet<u32>>,
}

struct InFlight<'p> {
    processor: &'p MatchProcessor,
    match_id: u32,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.processor
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.match_id);
    }
}

impl MatchProcessor {
    pub fn new(
        engine: Arc<MatchEngine>,
        context: MatchdayContext,
        ranking: Arc<RankingService>,
        config: OrchestratorConfig,
    ) -> Self {
        MatchProcessor {
            engine,
            context,
            ranking,
            config,
            calendar: SeasonCalendar::new(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn dispatch(self: &Arc<Self>, match_id: u32) -> JoinHandle<ProcessOutcome> {
        let processor = Arc::clone(self);

        tokio::spawn(async move { processor.process_match(match_id).await })
    }

    pub async fn process_match(&self, match_id: u32) -> ProcessOutcome {
        let Some(_guard) = self.claim(match_id) else {
            debug!("match {} is already being processed", match_id);
            return ProcessOutcome::AlreadyRunning(match_id);
        };

        let setup = match MatchSetup::load(
            self.context.matches.as_ref(),
            self.context.rosters.as_ref(),
            match_id,
        ) {
            Ok(setup) => setup,
            Err(error) => {
                warn!("match {} cannot be processed: {}", match_id, error);
                return ProcessOutcome::Failed(error);
            }
        };

        let status = setup.fixture.status();
        if status != MatchStatus::Scheduled {
            info!("match {} is {:?}, skipping", match_id, status);
            return ProcessOutcome::Skipped { match_id, status };
        }

        let engine = Arc::clone(&self.engine);
        let random = Arc::clone(&self.context.random);

        let played = tokio::task::spawn_blocking(move || {
            let mut rng = random.create(setup.match_id());
            let result = setup.run(&engine, rng.as_mut());
            (setup, result)
        })
        .await;

        let (setup, result) = match played {
            Ok((setup, Ok(result))) => (setup, result),
            Ok((_, Err(error))) => {
                warn!("match {} simulation failed: {}", match_id, error);
                return ProcessOutcome::Failed(error);
            }
            Err(join_error) => {
                error!("match {} simulation task died: {}", match_id, join_error);
                return ProcessOutcome::Failed(SimulationError::Aborted {
                    match_id,
                    reason: join_error.to_string(),
                });
            }
        };

        let mut fixture = setup.fixture;
        fixture.start(&result);

        if let Err(error) = self.context.matches.save(&fixture, setup.version) {
            warn!("match {} could not be started: {}", match_id, error);
            return ProcessOutcome::Failed(error.into());
        }

        self.context.rosters.apply_updates(&result.player_updates);
        self.context.history.record(&result.player_stats);

        self.create_session(&result);

        let summary = result.summary();
        self.notify_users(&fixture, &summary);

        info!(
            "match {} started live: {} vs {}",
            match_id, summary.home_team, summary.away_team
        );

        ProcessOutcome::Started(summary)
    }

    /// Opens the live mirror of a simulated match, replacing any stale one.
    pub fn create_session(&self, result: &MatchResult) -> LiveSession {
        let session = LiveSession::from_result(result, self.context.clock.now());

        self.context.sessions.insert(session.clone());

        session
    }

    /// Writes the session's result onto the match and folds it into the
    /// standings exactly once. Version conflicts are reloaded and retried.
    pub fn finalize(&self, match_id: u32, session: &LiveSession) -> FinalizeOutcome {
        let max_retries = self.config.finalize_max_retries;
        let mut retries = 0;

        loop {
            let Some((mut fixture, version)) = self.context.matches.find(match_id) else {
                warn!("match {} vanished before finalize", match_id);
                self.context.sessions.remove(match_id);
                return FinalizeOutcome::MatchNotFound;
            };

            match fixture.status() {
                MatchStatus::Completed => {
                    debug!("match {} already completed", match_id);
                    self.context.sessions.remove(match_id);
                    return FinalizeOutcome::AlreadyCompleted;
                }
                MatchStatus::Scheduled => {
                    warn!("match {} was never started, refusing to finalize", match_id);
                    self.context.sessions.remove(match_id);
                    return FinalizeOutcome::NotInProgress;
                }
                MatchStatus::InProgress => {}
            }

            fixture.complete(
                session.final_home_score,
                session.final_away_score,
                session.events.clone(),
                session.statistics.clone(),
                session.player_stats.clone(),
            );

            match self.context.matches.save(&fixture, version) {
                Ok(_) => {
                    self.context.sessions.remove(match_id);
                    self.ranking.update(&fixture);

                    // A reset may have landed between the save and the update
                    if self.still_completed(match_id) {
                        self.check_round_progress(&fixture);
                    } else {
                        warn!(
                            "match {} was reset while finalizing, standings reverted",
                            match_id
                        );
                        self.ranking.revert(&fixture);
                    }

                    info!(
                        "match {} finalized: {} {} - {} {}",
                        match_id,
                        fixture.home.name,
                        session.final_home_score,
                        session.final_away_score,
                        fixture.away.name
                    );

                    return match retries {
                        0 => FinalizeOutcome::Completed,
                        retries => FinalizeOutcome::CompletedAfterRetry { retries },
                    };
                }
                Err(StoreError::Conflict { .. }) if retries < max_retries => {
                    retries += 1;
                    warn!(
                        "match {} changed while finalizing, retry {}/{}",
                        match_id, retries, max_retries
                    );
                }
                Err(error) => {
                    let attempts = retries + 1;
                    error!(
                        "match {} finalize gave up after {} attempts: {}",
                        match_id, attempts, error
                    );

                    let mut pending = session.clone();
                    pending.finalize_attempts += 1;
                    self.context.sessions.update(&pending);

                    return FinalizeOutcome::ConflictExhausted { attempts };
                }
            }
        }
    }

    /// Puts a match back to `Scheduled`, dropping its live session, its
    /// result and, when it had completed, its standings contribution.
    pub fn reset(&self, match_id: u32) -> ResetOutcome {
        let session_removed = self.context.sessions.remove(match_id).is_some();
        let max_retries = self.config.reset_max_retries;
        let mut attempts = 0;

        loop {
            attempts += 1;

            let Some((mut fixture, version)) = self.context.matches.find(match_id) else {
                return ResetOutcome::MatchNotFound { session_removed };
            };

            let completed = fixture.clone();
            fixture.reset();

            match self.context.matches.save(&fixture, version) {
                Ok(_) => {
                    let standings_reverted =
                        completed.is_completed() && self.ranking.revert(&completed);

                    info!(
                        "match {} reset (session removed: {}, standings reverted: {})",
                        match_id, session_removed, standings_reverted
                    );

                    return ResetOutcome::Reset {
                        session_removed,
                        standings_reverted,
                    };
                }
                Err(StoreError::Conflict { .. }) if attempts <= max_retries => {
                    warn!("match {} changed while resetting, retrying", match_id);
                }
                Err(error) => {
                    error!("match {} reset failed: {}", match_id, error);
                    return ResetOutcome::ConflictExhausted { attempts };
                }
            }
        }
    }

    fn claim(&self, match_id: u32) -> Option<InFlight<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        in_flight.insert(match_id).then(|| InFlight {
            processor: self,
            match_id,
        })
    }

    fn notify_users(&self, fixture: &Match, summary: &MatchSummary) {
        for user_id in [fixture.home.user_id, fixture.away.user_id]
            .into_iter()
            .flatten()
        {
            if let Err(error) = self.context.notifier.notify(user_id, summary) {
                warn!("match {}: {}", fixture.id, error);
            }
        }
    }

    fn still_completed(&self, match_id: u32) -> bool {
        self.context
            .matches
            .find(match_id)
            .is_some_and(|(fixture, _)| fixture.is_completed())
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    /// Closes the match's round once every match in it is completed.
    pub fn check_round_progress(&self, fixture: &Match) -> RoundProgress {
        let remaining = self
            .context
            .matches
            .find_by_round(fixture.round.id)
            .iter()
            .filter(|m| !m.is_completed())
            .count();

        if remaining > 0 {
            debug!(
                "round {} of season {}: {} matches to go",
                fixture.round.number, fixture.round.season_id, remaining
            );
            return RoundProgress::Pending { remaining };
        }

        self.calendar.close_round(&fixture.round)
    }
}

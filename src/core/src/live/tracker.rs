use crate::config::LiveConfig;
use crate::live::phase::{MatchPhase, PhaseClock};
use crate::live::publisher::SnapshotPublisher;
use crate::live::session::{LiveMatchData, LiveMatchSummary, LiveSession};
use crate::orchestrator::{FinalizeOutcome, MatchProcessor, ResetOutcome};
use crate::shared::Clock;
use crate::store::SessionStore;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced {
        phase: MatchPhase,
        minute: u16,
        revealed: usize,
    },
    Paused,
    Finished(FinalizeOutcome),
    /// Session closed or reset while the tick was running.
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceFinishOutcome {
    SessionNotFound,
    Finalized(FinalizeOutcome),
}

/// Drives every open live session off the clock and publishes what the
/// spectators should see.
pub struct LiveMatchTracker {
    sessions: Arc<dyn SessionStore>,
    processor: Arc<MatchProcessor>,
    publisher: Arc<dyn SnapshotPublisher>,
    clock: Arc<dyn Clock>,
    phases: PhaseClock,
    config: LiveConfig,
}

impl LiveMatchTracker {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        processor: Arc<MatchProcessor>,
        publisher: Arc<dyn SnapshotPublisher>,
        clock: Arc<dyn Clock>,
        config: LiveConfig,
    ) -> Self {
        LiveMatchTracker {
            sessions,
            processor,
            publisher,
            clock,
            phases: PhaseClock::new(config.clone()),
            config,
        }
    }

    /// Ticks every open session on its own task; one failing session never
    /// holds up the others.
    pub async fn tick(self: &Arc<Self>) -> usize {
        let mut tasks = JoinSet::new();

        for session in self.sessions.all() {
            let tracker = Arc::clone(self);
            let match_id = session.match_id;

            tasks.spawn(async move { (match_id, tracker.tick_session(match_id)) });
        }

        let mut ticked = 0;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((match_id, outcome)) => {
                    ticked += 1;
                    debug!("live match {}: {:?}", match_id, outcome);
                }
                Err(join_error) => error!("live tick task failed: {}", join_error),
            }
        }

        ticked
    }

    pub fn tick_session(&self, match_id: u32) -> TickOutcome {
        let Some(mut session) = self.sessions.get(match_id) else {
            return TickOutcome::Gone;
        };

        if session.paused {
            return TickOutcome::Paused;
        }

        if session.finished {
            return TickOutcome::Finished(self.finalize(&session));
        }

        let elapsed = (self.clock.now() - session.started_at).num_milliseconds();
        let (phase, minute) = self.phases.position(elapsed, session.is_level());

        if phase == MatchPhase::Finished {
            return match self.close(&mut session) {
                Some(outcome) => TickOutcome::Finished(outcome),
                None => TickOutcome::Gone,
            };
        }

        let revealed = session.advance_to(phase, minute);

        if !self.sessions.update(&session) {
            return TickOutcome::Gone;
        }

        self.publish(&session);

        TickOutcome::Advanced {
            phase,
            minute,
            revealed: revealed.len(),
        }
    }

    /// Blows the final whistle now, whatever the clock says.
    pub fn force_finish(&self, match_id: u32) -> ForceFinishOutcome {
        let Some(mut session) = self.sessions.get(match_id) else {
            return ForceFinishOutcome::SessionNotFound;
        };

        info!("match {}: forcing the final whistle", match_id);

        match self.close(&mut session) {
            Some(outcome) => ForceFinishOutcome::Finalized(outcome),
            None => ForceFinishOutcome::SessionNotFound,
        }
    }

    pub fn get_live_data(&self, match_id: u32) -> Option<LiveMatchData> {
        self.sessions.get(match_id).map(|s| s.live_data())
    }

    pub fn live_matches(&self) -> Vec<LiveMatchSummary> {
        let mut matches: Vec<LiveMatchSummary> =
            self.sessions.all().iter().map(LiveSession::summary).collect();

        matches.sort_by_key(|m| m.match_id);
        matches
    }

    pub fn pause(&self, match_id: u32, reason: Option<String>) -> bool {
        self.modify(match_id, |session, now| session.pause(reason, now))
    }

    pub fn resume(&self, match_id: u32) -> bool {
        self.modify(match_id, |session, now| session.resume(now))
    }

    pub fn reset(&self, match_id: u32) -> ResetOutcome {
        let outcome = self.processor.reset(match_id);
        self.publisher.close(match_id);
        outcome
    }

    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("live tracker started, tick every {:?}", period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("live tracker stopped");
    }

    fn modify(
        &self,
        match_id: u32,
        change: impl FnOnce(&mut LiveSession, DateTime<Utc>) -> bool,
    ) -> bool {
        let Some(mut session) = self.sessions.get(match_id) else {
            return false;
        };

        if !change(&mut session, self.clock.now()) || !self.sessions.update(&session) {
            return false;
        }

        self.publish(&session);
        true
    }

    /// `None` when the session disappeared underneath us.
    fn close(&self, session: &mut LiveSession) -> Option<FinalizeOutcome> {
        session.finish();

        if !self.sessions.update(session) {
            return None;
        }

        self.publish(session);

        Some(self.finalize(session))
    }

    fn finalize(&self, session: &LiveSession) -> FinalizeOutcome {
        let outcome = self.processor.finalize(session.match_id, session);

        if outcome.closes_session() {
            self.publisher.close(session.match_id);
        }

        outcome
    }

    fn publish(&self, session: &LiveSession) {
        let snapshot = session.snapshot(self.config.recent_events);

        if let Err(error) = self.publisher.publish(&snapshot) {
            warn!("match {}: snapshot not delivered: {}", session.match_id, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::MatchStatus;
    use crate::testing::{RecordingPublisher, TestWorld};
    use chrono::TimeDelta;

    async fn live(world: &TestWorld, match_id: u32, home: u32, away: u32) {
        world.add_fixture(match_id, home, away, 1);
        world.processor().process_match(match_id).await;
    }

    #[tokio::test]
    async fn test_tick_reveals_events_up_to_current_minute() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        world.clock.advance(TimeDelta::seconds(25));

        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Advanced {
                phase: MatchPhase::FirstHalf,
                minute: 10,
                revealed: 1
            }
        );

        let snapshot = world.publisher.last(1).unwrap();
        assert_eq!((snapshot.home_score, snapshot.away_score), (1, 0));
        assert_eq!(snapshot.minute, 10);
        assert!(snapshot.events.iter().all(|e| e.minute <= 10));

        let data = tracker.get_live_data(1).unwrap();
        assert_eq!(data.events.len(), 2);
    }

    #[tokio::test]
    async fn test_tick_after_full_time_finalizes() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        world.clock.advance(TimeDelta::seconds(200));

        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Finished(FinalizeOutcome::Completed)
        );

        let fixture = world.matches.get(1);
        assert_eq!(fixture.status(), MatchStatus::Completed);
        assert_eq!((fixture.home_score(), fixture.away_score()), (Some(5), Some(5)));

        let snapshot = world.publisher.last(1).unwrap();
        assert_eq!(snapshot.phase, MatchPhase::Finished);
        assert_eq!((snapshot.home_score, snapshot.away_score), (5, 5));
        assert_eq!(*world.publisher.closed.lock().unwrap(), vec![1]);
        assert_eq!(tracker.tick_session(1), TickOutcome::Gone);
    }

    #[tokio::test]
    async fn test_force_finish_finalizes_immediately() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        assert_eq!(
            tracker.force_finish(1),
            ForceFinishOutcome::Finalized(FinalizeOutcome::Completed)
        );
        assert!(world.matches.get(1).is_completed());
        assert_eq!(tracker.force_finish(1), ForceFinishOutcome::SessionNotFound);
        assert!(tracker.get_live_data(1).is_none());
    }

    #[tokio::test]
    async fn test_paused_time_does_not_count() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        world.clock.advance(TimeDelta::seconds(25));
        tracker.tick_session(1);

        assert!(tracker.pause(1, Some("floodlight failure".to_string())));
        assert!(!tracker.pause(1, None));

        world.clock.advance(TimeDelta::seconds(100));
        assert_eq!(tracker.tick_session(1), TickOutcome::Paused);

        assert!(tracker.resume(1));
        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Advanced {
                phase: MatchPhase::FirstHalf,
                minute: 10,
                revealed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failed_publishing_does_not_stop_finalize() {
        let mut world = TestWorld::new();
        world.publisher = std::sync::Arc::new(RecordingPublisher::failing());
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        world.clock.advance(TimeDelta::seconds(200));

        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Finished(FinalizeOutcome::Completed)
        );
        assert!(world.publisher.count() > 0);
    }

    #[tokio::test]
    async fn test_exhausted_finalize_is_retried_next_tick() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        world.clock.advance(TimeDelta::seconds(200));
        world.matches.fail_next_saves(4);

        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Finished(FinalizeOutcome::ConflictExhausted { attempts: 4 })
        );
        assert!(world.sessions.get(1).unwrap().finished);

        assert_eq!(
            tracker.tick_session(1),
            TickOutcome::Finished(FinalizeOutcome::Completed)
        );
        assert!(world.matches.get(1).is_completed());
    }

    #[tokio::test]
    async fn test_tick_handles_every_session() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        live(&world, 2, 3, 4).await;
        let tracker = world.tracker();

        let summaries = tracker.live_matches();
        assert_eq!(
            summaries.iter().map(|s| s.match_id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        world.clock.advance(TimeDelta::seconds(200));

        assert_eq!(tracker.tick().await, 2);
        assert!(world.matches.get(1).is_completed());
        assert!(world.matches.get(2).is_completed());
        assert!(tracker.live_matches().is_empty());
    }

    #[tokio::test]
    async fn test_reset_closes_the_live_channel() {
        let world = TestWorld::new();
        live(&world, 1, 1, 2).await;
        let tracker = world.tracker();

        assert!(matches!(
            tracker.reset(1),
            ResetOutcome::Reset {
                session_removed: true,
                ..
            }
        ));
        assert_eq!(tracker.tick_session(1), TickOutcome::Gone);
        assert_eq!(*world.publisher.closed.lock().unwrap(), vec![1]);
    }
}

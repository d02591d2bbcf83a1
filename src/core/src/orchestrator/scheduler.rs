use crate::config::SchedulerConfig;
use crate::orchestrator::processor::MatchProcessor;
use crate::r#match::MatchStatus;
use crate::shared::Clock;
use crate::store::MatchRepository;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Dispatches every scheduled match whose kickoff has passed.
pub struct MatchScheduler {
    matches: Arc<dyn MatchRepository>,
    processor: Arc<MatchProcessor>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
}

impl MatchScheduler {
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        processor: Arc<MatchProcessor>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        MatchScheduler {
            matches,
            processor,
            clock,
            config,
        }
    }

    pub fn due_matches(&self) -> Vec<u32> {
        let now = self.clock.now().naive_utc();

        self.matches
            .find_due(MatchStatus::Scheduled, now)
            .iter()
            .map(|m| m.id)
            .collect()
    }

    pub fn dispatch_due(&self) -> Vec<JoinHandle<super::ProcessOutcome>> {
        let due = self.due_matches();

        if !due.is_empty() {
            info!("dispatching {} due matches", due.len());
        }

        due.into_iter()
            .map(|match_id| self.processor.dispatch(match_id))
            .collect()
    }

    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("match scheduler started, every {}s", self.config.interval_secs);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let dispatched = self.dispatch_due();
                    debug!("scheduler tick, {} matches dispatched", dispatched.len());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("match scheduler stopped");
    }
}

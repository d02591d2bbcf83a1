use crate::club::{ClubSquad, InjuryEvaluator, InjuryService};
use crate::config::MatchdayConfig;
use crate::context::MatchdayContext;
use crate::league::RankingService;
use crate::live::{LiveChannels, LiveMatchTracker, LiveSnapshot, SnapshotPublisher};
use crate::orchestrator::{MatchProcessor, MatchScheduler, NotificationHub};
use crate::r#match::{Match, MatchEngine, SimulationService};
use crate::shared::{
    Clock, EntropyRandomFactory, RandomSourceFactory, SeededRandomFactory, SystemClock,
};
use crate::store::{
    InMemoryMatchRepository, InMemoryPlayerHistory, InMemoryRosterRepository,
    InMemorySessionStore, InMemoryStandingsRepository, MatchRepository,
};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Generated world handed over by the data crate.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub squads: Vec<ClubSquad>,
    pub matches: Vec<Match>,
    /// Season id and the clubs taking part.
    pub seasons: Vec<(u32, Vec<u32>)>,
}

/// Outcome of asking for a match's live snapshots.
#[derive(Debug)]
pub enum LiveSubscription {
    Live(broadcast::Receiver<LiveSnapshot>),
    Finished,
    NotFound,
}

/// Everything wired together over the in-memory stores.
pub struct MatchdaySimulator {
    pub config: MatchdayConfig,
    pub matches: Arc<InMemoryMatchRepository>,
    pub rosters: Arc<InMemoryRosterRepository>,
    pub history: Arc<InMemoryPlayerHistory>,
    pub sessions: Arc<InMemorySessionStore>,
    pub standings: Arc<InMemoryStandingsRepository>,
    pub channels: Arc<LiveChannels>,
    pub notifications: Arc<NotificationHub>,
    pub ranking: Arc<RankingService>,
    pub simulation: Arc<SimulationService>,
    pub processor: Arc<MatchProcessor>,
    pub tracker: Arc<LiveMatchTracker>,
    pub scheduler: Arc<MatchScheduler>,
}

impl MatchdaySimulator {
    pub fn in_memory(config: MatchdayConfig) -> Self {
        let random: Arc<dyn RandomSourceFactory> = match config.seed {
            Some(seed) => Arc::new(SeededRandomFactory::new(seed)),
            None => Arc::new(EntropyRandomFactory),
        };

        Self::with_parts(config, Arc::new(SystemClock), random)
    }

    pub fn with_parts(
        config: MatchdayConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSourceFactory>,
    ) -> Self {
        let matches = Arc::new(InMemoryMatchRepository::new());
        let rosters = Arc::new(InMemoryRosterRepository::new());
        let history = Arc::new(InMemoryPlayerHistory::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let standings = Arc::new(InMemoryStandingsRepository::new());
        let channels = Arc::new(LiveChannels::new(config.live.channel_capacity));
        let notifications = Arc::new(NotificationHub::new(config.live.channel_capacity));

        let context = MatchdayContext {
            matches: matches.clone(),
            rosters: rosters.clone(),
            history: history.clone(),
            sessions: sessions.clone(),
            standings: standings.clone(),
            notifier: notifications.clone(),
            random,
            clock: clock.clone(),
        };

        let injuries: Arc<dyn InjuryEvaluator> =
            Arc::new(InjuryService::new(config.injury.clone()));
        let engine = Arc::new(MatchEngine::new(config.engine.clone(), injuries));
        let ranking = Arc::new(RankingService::new(standings.clone()));

        let simulation = Arc::new(SimulationService::new(
            engine.clone(),
            context.clone(),
            ranking.clone(),
        ));

        let processor = Arc::new(MatchProcessor::new(
            engine,
            context,
            ranking.clone(),
            config.orchestrator.clone(),
        ));

        let tracker = Arc::new(LiveMatchTracker::new(
            sessions.clone(),
            processor.clone(),
            channels.clone(),
            clock.clone(),
            config.live.clone(),
        ));

        let scheduler = Arc::new(MatchScheduler::new(
            matches.clone(),
            processor.clone(),
            clock,
            config.scheduler.clone(),
        ));

        MatchdaySimulator {
            config,
            matches,
            rosters,
            history,
            sessions,
            standings,
            channels,
            notifications,
            ranking,
            simulation,
            processor,
            tracker,
            scheduler,
        }
    }

    /// Subscribes to a match that is scheduled or running. Finished matches
    /// get no channel, nothing would ever close it.
    pub fn subscribe_live(&self, match_id: u32) -> LiveSubscription {
        match self.matches.find(match_id) {
            None => return LiveSubscription::NotFound,
            Some((fixture, _)) if fixture.is_completed() => return LiveSubscription::Finished,
            Some(_) => {}
        }

        let receiver = self.channels.subscribe(match_id);

        // Completed in between, its channel was already closed
        if self
            .matches
            .find(match_id)
            .is_some_and(|(fixture, _)| fixture.is_completed())
        {
            debug!("match {} finished while subscribing", match_id);
            self.channels.close(match_id);
            return LiveSubscription::Finished;
        }

        LiveSubscription::Live(receiver)
    }

    pub fn seed(&self, data: SeedData) {
        info!(
            "seeding {} clubs, {} matches, {} seasons",
            data.squads.len(),
            data.matches.len(),
            data.seasons.len()
        );

        for squad in data.squads {
            self.rosters.insert(squad);
        }

        for fixture in data.matches {
            self.matches.insert(fixture);
        }

        for (season_id, club_ids) in &data.seasons {
            self.ranking.create(*season_id, club_ids);
        }
    }
}

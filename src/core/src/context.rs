use crate::orchestrator::UserNotifier;
use crate::shared::{Clock, RandomSourceFactory};
use crate::store::{
    MatchRepository, PlayerHistory, RosterRepository, SessionStore, StandingsRepository,
};
use std::sync::Arc;

/// Collaborators shared by the simulation service, the orchestrator and the
/// live tracker.
#[derive(Clone)]
pub struct MatchdayContext {
    pub matches: Arc<dyn MatchRepository>,
    pub rosters: Arc<dyn RosterRepository>,
    pub history: Arc<dyn PlayerHistory>,
    pub sessions: Arc<dyn SessionStore>,
    pub standings: Arc<dyn StandingsRepository>,
    pub notifier: Arc<dyn UserNotifier>,
    pub random: Arc<dyn RandomSourceFactory>,
    pub clock: Arc<dyn Clock>,
}

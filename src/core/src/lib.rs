pub mod club;
pub mod config;
pub mod context;
pub mod league;
pub mod live;
pub mod r#match;
pub mod orchestrator;
pub mod shared;
pub mod simulator;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::*;
pub use context::*;
pub use simulator::*;

pub use club::{ClubRef, ClubSquad, Player, PlayerBuilder, PlayerRole, PlayerSkills, Stadium};
pub use league::{LeagueTable, RankingService, RoundProgress, SeasonCalendar, StandingsRow};
pub use live::{
    ForceFinishOutcome, LiveChannels, LiveMatchData, LiveMatchSummary, LiveMatchTracker,
    LiveSnapshot, MatchPhase,
};
pub use orchestrator::{
    FinalizeOutcome, MatchProcessor, MatchScheduler, NotificationHub, ProcessOutcome,
    ResetOutcome,
};
pub use r#match::{
    BatchEntry, ForcedResult, Match, MatchStatus, MatchSummary, Mentality, Module, RoundRef,
    SimulationError, SimulationService,
};

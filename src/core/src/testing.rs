//! Builders and fakes shared by the unit tests.

use crate::club::{
    ClubRef, ClubSquad, InjuryEvaluator, InjuryType, NoInjuries, Player, PlayerBuilder, PlayerRole,
    PlayerSkills, Stadium,
};
use crate::config::MatchdayConfig;
use crate::context::MatchdayContext;
use crate::league::{RankingService, StandingsRow};
use crate::live::{LiveMatchTracker, LiveSnapshot, PublishError, SnapshotPublisher};
use crate::orchestrator::{MatchProcessor, NotifyError, UserNotifier};
use crate::r#match::{
    EventKind, Match, MatchEngine, MatchSide, MatchStatistics, MatchStatus, MatchSummary, Mentality,
    Module, RoundRef, SimulationService, TimelineEvent,
};
use crate::shared::{Clock, ManualClock, RandomSource, RandomSourceFactory, SeededRandomFactory};
use crate::store::{
    InMemoryMatchRepository, InMemoryPlayerHistory, InMemoryRosterRepository,
    InMemorySessionStore, InMemoryStandingsRepository, MatchRepository, RosterRepository,
    StandingsRepository, StoreError, Version,
};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SEASON: u32 = 2025;

/// Every roll succeeds, ranges return their lower bound unless overridden,
/// `pick` takes the first candidate and `chance` never fires.
pub struct ScriptedRandom {
    overrides: HashMap<(i32, i32), i32>,
    ranges: Vec<(i32, i32)>,
    success: bool,
}

impl ScriptedRandom {
    pub fn succeeding() -> Self {
        ScriptedRandom {
            overrides: HashMap::new(),
            ranges: Vec::new(),
            success: true,
        }
    }

    pub fn failing() -> Self {
        ScriptedRandom {
            success: false,
            ..Self::succeeding()
        }
    }

    pub fn with_range(mut self, min: i32, max: i32, value: i32) -> Self {
        self.overrides.insert((min, max), value);
        self
    }

    pub fn ranges(&self) -> &[(i32, i32)] {
        &self.ranges
    }
}

impl RandomSource for ScriptedRandom {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        self.ranges.push((min, max));
        self.overrides.get(&(min, max)).copied().unwrap_or(min)
    }

    fn percentage(&mut self, _percent: i32) -> bool {
        self.success
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }

    fn chance(&mut self, _probability: f64) -> bool {
        false
    }
}

/// Twenty all-successful actions for every match: always 5-5.
pub struct ScriptedFactory;

impl RandomSourceFactory for ScriptedFactory {
    fn create(&self, _match_id: u32) -> Box<dyn RandomSource> {
        Box::new(ScriptedRandom::succeeding().with_range(15, 25, 20))
    }
}

pub struct AlwaysInjure;

impl InjuryEvaluator for AlwaysInjure {
    fn evaluate(&self, _: &Player, _: f64, _: &mut dyn RandomSource) -> Option<InjuryType> {
        Some(InjuryType::Cramp)
    }
}

pub fn player(id: u32, role: PlayerRole, skill: f32) -> Player {
    PlayerBuilder::new()
        .id(id)
        .name("Player", &id.to_string())
        .role(role)
        .skills(PlayerSkills::uniform(skill))
        .build()
        .unwrap()
}

/// Eighteen even players: enough for the default module plus a full bench.
pub fn squad(club_id: u32, name: &str, user_id: Option<u32>, first_player_id: u32) -> ClubSquad {
    let roles = [
        (PlayerRole::Goalkeeper, 2),
        (PlayerRole::CentralDefender, 6),
        (PlayerRole::Midfielder, 6),
        (PlayerRole::Forward, 4),
    ];

    let players = roles
        .iter()
        .flat_map(|&(role, count)| std::iter::repeat_n(role, count))
        .enumerate()
        .map(|(idx, role)| player(first_player_id + idx as u32, role, 50.0))
        .collect();

    ClubSquad {
        club: ClubRef::new(club_id, name, user_id),
        stadium: Stadium { capacity: 50_000 },
        module: Module::default(),
        mentality: Mentality::Normal,
        players,
    }
}

pub fn kickoff(round_number: u16) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 2)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap()
        + TimeDelta::days(7 * (round_number as i64 - 1))
}

pub fn fixture(id: u32, home_club: u32, away_club: u32, round_number: u16) -> Match {
    Match::new(
        id,
        ClubRef::new(home_club, &format!("Club {}", home_club), None),
        ClubRef::new(away_club, &format!("Club {}", away_club), None),
        RoundRef {
            id: round_number as u32,
            season_id: SEASON,
            number: round_number,
            kickoff: kickoff(round_number),
            is_last: false,
        },
    )
}

pub fn completed(
    match_id: u32,
    home_club: u32,
    away_club: u32,
    round_number: u16,
    (home_goals, away_goals): (u8, u8),
) -> Match {
    let mut fixture = fixture(match_id, home_club, away_club, round_number);

    let mut events = Vec::new();
    for goal in 1..=home_goals {
        events.push(
            TimelineEvent::new(goal * 10, EventKind::Goal, Some(MatchSide::Home), String::new())
                .with_score(goal, 0),
        );
    }
    for goal in 1..=away_goals {
        events.push(
            TimelineEvent::new(goal * 10 + 5, EventKind::Goal, Some(MatchSide::Away), String::new())
                .with_score(home_goals, goal),
        );
    }

    fixture.complete(
        home_goals,
        away_goals,
        events,
        MatchStatistics::default(),
        Vec::new(),
    );
    fixture
}

type Hook = Box<dyn FnOnce() + Send>;

/// Counts how the standings are read and written. A hook can be armed to run
/// once right before the next load.
pub struct CountingStandings {
    inner: InMemoryStandingsRepository,
    bulk_loads: AtomicUsize,
    saves: AtomicUsize,
    before_load: Mutex<Option<Hook>>,
}

impl CountingStandings {
    pub fn new(inner: InMemoryStandingsRepository) -> Self {
        CountingStandings {
            inner,
            bulk_loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            before_load: Mutex::new(None),
        }
    }

    pub fn reset(&self) {
        self.bulk_loads.store(0, Ordering::SeqCst);
        self.saves.store(0, Ordering::SeqCst);
    }

    pub fn bulk_loads(&self) -> usize {
        self.bulk_loads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn before_next_load(&self, hook: impl FnOnce() + Send + 'static) {
        *self.before_load.lock().unwrap() = Some(Box::new(hook));
    }
}

impl StandingsRepository for CountingStandings {
    fn find_by_clubs(&self, season_id: u32, club_ids: &[u32]) -> Vec<(StandingsRow, Version)> {
        let hook = self.before_load.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }

        self.bulk_loads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_clubs(season_id, club_ids)
    }

    fn find_by_season(&self, season_id: u32) -> Vec<StandingsRow> {
        self.inner.find_by_season(season_id)
    }

    fn save_all(&self, rows: &[(StandingsRow, Version)]) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_all(rows)
    }
}

/// Match store whose next saves lose the version race.
#[derive(Default)]
pub struct FlakyMatchRepository {
    inner: InMemoryMatchRepository,
    conflicts: AtomicU32,
    saves: AtomicU32,
}

impl FlakyMatchRepository {
    pub fn fail_next_saves(&self, count: u32) {
        self.conflicts.store(count, Ordering::SeqCst);
    }

    pub fn saves(&self) -> u32 {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn get(&self, match_id: u32) -> Match {
        self.inner.find(match_id).unwrap().0
    }
}

impl MatchRepository for FlakyMatchRepository {
    fn find(&self, match_id: u32) -> Option<(Match, Version)> {
        self.inner.find(match_id)
    }

    fn find_many(&self, match_ids: &[u32]) -> Vec<(Match, Version)> {
        self.inner.find_many(match_ids)
    }

    fn find_by_round(&self, round_id: u32) -> Vec<Match> {
        self.inner.find_by_round(round_id)
    }

    fn find_due(&self, status: MatchStatus, until: NaiveDateTime) -> Vec<Match> {
        self.inner.find_due(status, until)
    }

    fn insert(&self, fixture: Match) {
        self.inner.insert(fixture)
    }

    fn save(&self, fixture: &Match, expected: Version) -> Result<Version, StoreError> {
        let conflicted = self
            .conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();

        if conflicted {
            return Err(StoreError::Conflict {
                id: fixture.id,
                expected,
                actual: expected + 1,
            });
        }

        let saved = self.inner.save(fixture, expected);
        if saved.is_ok() {
            self.saves.fetch_add(1, Ordering::SeqCst);
        }
        saved
    }

    fn save_all(&self, items: &[(Match, Version)]) -> Vec<Result<Version, StoreError>> {
        items
            .iter()
            .map(|(fixture, version)| self.save(fixture, *version))
            .collect()
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub snapshots: Mutex<Vec<LiveSnapshot>>,
    pub closed: Mutex<Vec<u32>>,
    failing: AtomicBool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        RecordingPublisher {
            failing: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn last(&self, match_id: u32) -> Option<LiveSnapshot> {
        self.snapshots
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.match_id == match_id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }
}

impl SnapshotPublisher for RecordingPublisher {
    fn publish(&self, snapshot: &LiveSnapshot) -> Result<(), PublishError> {
        self.snapshots.lock().unwrap().push(snapshot.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(PublishError::Failed {
                match_id: snapshot.match_id,
                reason: "transport down".to_string(),
            });
        }

        Ok(())
    }

    fn close(&self, match_id: u32) {
        self.closed.lock().unwrap().push(match_id);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(u32, MatchSummary)>>,
}

impl UserNotifier for RecordingNotifier {
    fn notify(&self, user_id: u32, summary: &MatchSummary) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((user_id, summary.clone()));
        Ok(())
    }
}

/// In-memory world with a manual clock and fully scripted matches.
pub struct TestWorld {
    pub config: MatchdayConfig,
    pub matches: Arc<FlakyMatchRepository>,
    pub rosters: Arc<InMemoryRosterRepository>,
    pub history: Arc<InMemoryPlayerHistory>,
    pub sessions: Arc<InMemorySessionStore>,
    pub standings: Arc<CountingStandings>,
    pub notifier: Arc<RecordingNotifier>,
    pub publisher: Arc<RecordingPublisher>,
    pub clock: Arc<ManualClock>,
    pub random: Arc<dyn RandomSourceFactory>,
    pub injuries: Arc<dyn InjuryEvaluator>,
}

impl TestWorld {
    pub fn new() -> Self {
        TestWorld {
            config: MatchdayConfig::default(),
            matches: Arc::new(FlakyMatchRepository::default()),
            rosters: Arc::new(InMemoryRosterRepository::new()),
            history: Arc::new(InMemoryPlayerHistory::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            standings: Arc::new(CountingStandings::new(InMemoryStandingsRepository::new())),
            notifier: Arc::new(RecordingNotifier::default()),
            publisher: Arc::new(RecordingPublisher::default()),
            clock: Arc::new(ManualClock::new(kickoff(1).and_utc())),
            random: Arc::new(ScriptedFactory),
            injuries: Arc::new(NoInjuries),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        TestWorld {
            random: Arc::new(SeededRandomFactory::new(seed)),
            ..Self::new()
        }
    }

    /// Club `n` is managed by user `100 + n`, its players are numbered from `n * 100`.
    pub fn add_fixture(&self, match_id: u32, home_club: u32, away_club: u32, round_number: u16) {
        for club_id in [home_club, away_club] {
            if self.rosters.squad(club_id).is_none() {
                self.rosters.insert(squad(
                    club_id,
                    &format!("Club {}", club_id),
                    Some(100 + club_id),
                    club_id * 100,
                ));
            }
        }

        let mut fixture = fixture(match_id, home_club, away_club, round_number);
        fixture.home.user_id = Some(100 + home_club);
        fixture.away.user_id = Some(100 + away_club);

        self.matches.insert(fixture);
    }

    pub fn context(&self) -> MatchdayContext {
        MatchdayContext {
            matches: self.matches.clone(),
            rosters: self.rosters.clone(),
            history: self.history.clone(),
            sessions: self.sessions.clone(),
            standings: self.standings.clone(),
            notifier: self.notifier.clone(),
            random: self.random.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn engine(&self) -> Arc<MatchEngine> {
        Arc::new(MatchEngine::new(
            self.config.engine.clone(),
            self.injuries.clone(),
        ))
    }

    pub fn ranking(&self) -> Arc<RankingService> {
        Arc::new(RankingService::new(self.standings.clone()))
    }

    pub fn processor(&self) -> Arc<MatchProcessor> {
        Arc::new(MatchProcessor::new(
            self.engine(),
            self.context(),
            self.ranking(),
            self.config.orchestrator.clone(),
        ))
    }

    pub fn tracker(&self) -> Arc<LiveMatchTracker> {
        Arc::new(LiveMatchTracker::new(
            self.sessions.clone(),
            self.processor(),
            self.publisher.clone(),
            self.clock.clone(),
            self.config.live.clone(),
        ))
    }

    pub fn simulation(&self) -> SimulationService {
        SimulationService::new(self.engine(), self.context(), self.ranking())
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

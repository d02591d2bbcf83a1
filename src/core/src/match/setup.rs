use crate::club::ClubSquad;
use crate::r#match::engine::MatchEngine;
use crate::r#match::error::SimulationError;
use crate::r#match::fixture::Match;
use crate::r#match::result::MatchResult;
use crate::r#match::squad::FormationSelector;
use crate::shared::RandomSource;
use crate::store::{MatchRepository, RosterRepository, Version};

/// Everything one engine run reads, loaded up front so the run itself never
/// goes back to the stores.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub fixture: Match,
    pub version: Version,
    pub home: ClubSquad,
    pub away: ClubSquad,
}

impl MatchSetup {
    pub fn load(
        matches: &dyn MatchRepository,
        rosters: &dyn RosterRepository,
        match_id: u32,
    ) -> Result<Self, SimulationError> {
        let (fixture, version) = matches
            .find(match_id)
            .ok_or(SimulationError::MatchNotFound(match_id))?;

        Self::with_rosters(fixture, version, rosters)
    }

    pub fn with_rosters(
        fixture: Match,
        version: Version,
        rosters: &dyn RosterRepository,
    ) -> Result<Self, SimulationError> {
        let home = rosters
            .squad(fixture.home.id)
            .ok_or(SimulationError::ClubNotFound(fixture.home.id))?;
        let away = rosters
            .squad(fixture.away.id)
            .ok_or(SimulationError::ClubNotFound(fixture.away.id))?;

        Ok(MatchSetup {
            fixture,
            version,
            home,
            away,
        })
    }

    pub fn match_id(&self) -> u32 {
        self.fixture.id
    }

    /// Picks both formations and plays the match in the home stadium.
    pub fn run(
        &self,
        engine: &MatchEngine,
        rng: &mut dyn RandomSource,
    ) -> Result<MatchResult, SimulationError> {
        let home = FormationSelector::select(
            self.home.club.id,
            &self.home.players,
            self.home.module,
            self.home.mentality,
        )?;
        let away = FormationSelector::select(
            self.away.club.id,
            &self.away.players,
            self.away.module,
            self.away.mentality,
        )?;

        engine.play(&self.fixture, home, away, self.home.stadium.capacity, rng)
    }
}

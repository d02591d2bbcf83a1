use crate::generators::PlayerGenerator;
use crate::loaders::{ClubEntity, LeagueEntity};
use crate::DatabaseEntity;
use chrono::{NaiveDateTime, TimeDelta};
use core::{ClubRef, ClubSquad, Match, Module, PlayerRole, RoundRef, SeedData, Stadium};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Backup goalkeeper plus roughly one extra player for every two starters.
const GOALKEEPERS: usize = 2;

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// `start` moves the first round, the league file's date is used otherwise.
    pub fn generate(
        data: &DatabaseEntity,
        start: Option<NaiveDateTime>,
        seed: Option<u64>,
    ) -> SeedData {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let league = &data.league;
        let player_generator = PlayerGenerator::with_people_names(&league.names);

        let squads: Vec<ClubSquad> = league
            .clubs
            .iter()
            .map(|club| Self::generate_squad(club, &player_generator, &mut rng))
            .collect();

        let matches = Self::generate_fixtures(league, start.unwrap_or(league.season_start));

        info!(
            "league {}: {} clubs, {} fixtures generated",
            league.name,
            squads.len(),
            matches.len()
        );

        SeedData {
            squads,
            matches,
            seasons: vec![(
                league.season_id,
                league.clubs.iter().map(|c| c.id).collect(),
            )],
        }
    }

    fn generate_squad(
        club: &ClubEntity,
        generator: &PlayerGenerator,
        rng: &mut StdRng,
    ) -> ClubSquad {
        let module = Module::parse(&club.module).unwrap_or_else(|| {
            warn!(
                "club {} has an unknown module '{}', using {}",
                club.name,
                club.module,
                Module::default()
            );
            Module::default()
        });

        let mut players = Vec::new();

        for _ in 0..GOALKEEPERS {
            players.push(generator.generate(rng, PlayerRole::Goalkeeper, club.reputation));
        }

        for (count, role) in [
            (module.cd, PlayerRole::CentralDefender),
            (module.wb, PlayerRole::WingBack),
            (module.mf, PlayerRole::Midfielder),
            (module.wng, PlayerRole::Wing),
            (module.fw, PlayerRole::Forward),
        ] {
            let count = count as usize;
            for _ in 0..count + count.div_ceil(2) {
                players.push(generator.generate(rng, role, club.reputation));
            }
        }

        ClubSquad {
            club: ClubRef::new(club.id, &club.name, club.user_id),
            stadium: Stadium {
                capacity: club.stadium_capacity,
            },
            module,
            mentality: club.mentality,
            players,
        }
    }

    /// Double round robin with the circle method: the first club stays put
    /// while the rest rotate, the second half mirrors the first with home and
    /// away swapped.
    pub fn generate_fixtures(league: &LeagueEntity, start: NaiveDateTime) -> Vec<Match> {
        let mut clubs: Vec<Option<&ClubEntity>> = league.clubs.iter().map(Some).collect();
        if clubs.len() % 2 == 1 {
            clubs.push(None);
        }

        let size = clubs.len();
        if size < 2 {
            return Vec::new();
        }

        let rounds_per_half = size - 1;
        let total_rounds = rounds_per_half * 2;

        let mut first_half: Vec<Vec<(&ClubEntity, &ClubEntity)>> = Vec::with_capacity(rounds_per_half);

        for round in 0..rounds_per_half {
            let pairs = (0..size / 2)
                .filter_map(|i| {
                    let (a, b) = (clubs[i]?, clubs[size - 1 - i]?);
                    Some(if (round + i) % 2 == 0 { (a, b) } else { (b, a) })
                })
                .collect();

            first_half.push(pairs);
            clubs[1..].rotate_right(1);
        }

        let second_half: Vec<Vec<(&ClubEntity, &ClubEntity)>> = first_half
            .iter()
            .map(|pairs| pairs.iter().map(|&(home, away)| (away, home)).collect())
            .collect();

        let mut match_id = 1;
        let mut matches = Vec::new();

        for (idx, pairs) in first_half.iter().chain(second_half.iter()).enumerate() {
            let number = idx as u16 + 1;
            let round = RoundRef {
                id: league.season_id * 1000 + number as u32,
                season_id: league.season_id,
                number,
                kickoff: start + TimeDelta::days(league.round_interval_days * idx as i64),
                is_last: idx + 1 == total_rounds,
            };

            for &(home, away) in pairs {
                matches.push(Match::new(
                    match_id,
                    ClubRef::new(home.id, &home.name, home.user_id),
                    ClubRef::new(away.id, &away.name, away.user_id),
                    round.clone(),
                ));
                match_id += 1;
            }
        }

        matches
    }
}

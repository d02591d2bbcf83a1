use chrono::NaiveDateTime;
use core::Mentality;
use serde::Deserialize;

const STATIC_LEAGUE_JSON: &str = include_str!("../data/league.json");

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntity {
    pub id: u32,
    pub name: String,
    pub season_id: u32,
    pub season_start: NaiveDateTime,
    pub round_interval_days: i64,
    pub clubs: Vec<ClubEntity>,
    pub names: NamesEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubEntity {
    pub id: u32,
    pub name: String,
    pub stadium_capacity: u32,
    pub reputation: u16,
    pub module: String,
    #[serde(default)]
    pub mentality: Mentality,
    pub user_id: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamesEntity {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load() -> Result<LeagueEntity, serde_json::Error> {
        serde_json::from_str(STATIC_LEAGUE_JSON)
    }
}

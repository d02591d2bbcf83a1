mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

pub struct DatabaseEntity {
    pub league: LeagueEntity,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, serde_json::Error> {
        Ok(DatabaseEntity {
            league: LeagueLoader::load()?,
        })
    }
}

use crate::club::ClubSquad;
use crate::r#match::PlayerUpdate;
use log::warn;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub trait RosterRepository: Send + Sync {
    fn squad(&self, club_id: u32) -> Option<ClubSquad>;

    /// Writes condition and injuries back, one bulk call per batch.
    fn apply_updates(&self, updates: &[PlayerUpdate]);
}

#[derive(Default)]
pub struct InMemoryRosterRepository {
    squads: RwLock<HashMap<u32, ClubSquad>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, squad: ClubSquad) {
        let mut squads = self.squads.write().unwrap_or_else(PoisonError::into_inner);
        squads.insert(squad.club.id, squad);
    }

    pub fn squads(&self) -> Vec<ClubSquad> {
        let squads = self.squads.read().unwrap_or_else(PoisonError::into_inner);
        let mut result: Vec<ClubSquad> = squads.values().cloned().collect();
        result.sort_by_key(|s| s.club.id);
        result
    }
}

impl RosterRepository for InMemoryRosterRepository {
    fn squad(&self, club_id: u32) -> Option<ClubSquad> {
        let squads = self.squads.read().unwrap_or_else(PoisonError::into_inner);
        squads.get(&club_id).cloned()
    }

    fn apply_updates(&self, updates: &[PlayerUpdate]) {
        let mut squads = self.squads.write().unwrap_or_else(PoisonError::into_inner);

        for update in updates {
            let player = squads
                .get_mut(&update.club_id)
                .and_then(|squad| squad.player_mut(update.player_id));

            match player {
                Some(player) => {
                    player.set_condition(update.condition);
                    if let Some(injury) = update.injury
                        && !player.is_injured
                    {
                        player.set_injury(injury);
                    }
                }
                None => warn!(
                    "player {} of club {} not found, condition not saved",
                    update.player_id, update.club_id
                ),
            }
        }
    }
}

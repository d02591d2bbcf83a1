use crate::club::{Player, PlayerRole};
use crate::r#match::squad::formation::Formation;
use crate::r#match::squad::module::{Mentality, Module};
use log::debug;
use std::cmp::Reverse;

pub struct FormationSelector;

const DEFAULT_BENCH_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormationError {
    #[error(
        "roster of club {club_id} is incomplete: {goalkeepers} goalkeepers and {outfield} outfield players available, {required} outfield players required"
    )]
    RosterIncomplete {
        club_id: u32,
        goalkeepers: usize,
        outfield: usize,
        required: usize,
    },
}

impl FormationSelector {
    /// Picks the starting eleven and the bench. Same roster and module always
    /// give the same formation.
    pub fn select(
        club_id: u32,
        roster: &[Player],
        module: Module,
        mentality: Mentality,
    ) -> Result<Formation, FormationError> {
        let available: Vec<&Player> = roster.iter().filter(|p| !p.is_injured).collect();

        let goalkeepers = available.iter().filter(|p| p.role.is_goalkeeper()).count();
        let outfield = available.len() - goalkeepers;

        if goalkeepers == 0 || outfield < module.outfield() {
            return Err(FormationError::RosterIncomplete {
                club_id,
                goalkeepers,
                outfield,
                required: module.outfield(),
            });
        }

        debug!(
            "club {}: selecting {} from {} available players",
            club_id,
            module,
            available.len()
        );

        let mut used_players: Vec<u32> = Vec::with_capacity(DEFAULT_BENCH_SIZE + 11);
        let mut players = Vec::with_capacity(module.outfield() + 1);

        for required_role in module.positions() {
            if let Some(best_player) =
                Self::find_best_player_for_position(&available, &used_players, required_role)
            {
                debug!(
                    "club {}: {} for {}",
                    club_id,
                    best_player.full_name(),
                    required_role.get_short_name()
                );

                used_players.push(best_player.id);
                players.push(best_player.clone());
            }
        }

        let substitutes = Self::select_substitutes(&available, &used_players);

        Ok(Formation {
            module,
            mentality,
            players,
            substitutes,
        })
    }

    /// Role holders first, then compatible roles, then any outfield player.
    /// Goalkeepers only ever fill the goalkeeper slot.
    fn find_best_player_for_position<'p>(
        available: &[&'p Player],
        used_players: &[u32],
        required_role: PlayerRole,
    ) -> Option<&'p Player> {
        let unused = move || {
            available
                .iter()
                .copied()
                .filter(move |p| !used_players.contains(&p.id))
        };

        let best = |candidates: Vec<&'p Player>| {
            candidates
                .into_iter()
                .max_by_key(|p| (Self::role_rating(p, required_role), Reverse(p.id)))
        };

        if let Some(player) = best(unused().filter(|p| p.role == required_role).collect()) {
            return Some(player);
        }

        if required_role.is_goalkeeper() {
            return None;
        }

        if let Some(player) = best(
            unused()
                .filter(|p| required_role.compatible().contains(&p.role))
                .collect(),
        ) {
            return Some(player);
        }

        unused()
            .filter(|p| !p.role.is_goalkeeper())
            .max_by_key(|p| (p.average(), Reverse(p.id)))
    }

    fn role_rating(player: &Player, role: PlayerRole) -> i32 {
        match role {
            PlayerRole::Goalkeeper => player.goalkeeping_average(),
            PlayerRole::CentralDefender | PlayerRole::WingBack => player.defence_average(),
            PlayerRole::Midfielder | PlayerRole::Wing => {
                player.offence_average() + player.defence_average()
            }
            PlayerRole::Forward => player.offence_average() + player.scoring_average(),
        }
    }

    fn select_substitutes(available: &[&Player], used_players: &[u32]) -> Vec<Player> {
        let mut remaining: Vec<&Player> = available
            .iter()
            .copied()
            .filter(|p| !used_players.contains(&p.id))
            .collect();

        remaining.sort_by_key(|p| (Reverse(p.average()), p.id));

        let mut substitutes: Vec<Player> = Vec::with_capacity(DEFAULT_BENCH_SIZE);

        // Backup goalkeeper takes the first bench spot
        if let Some(idx) = remaining.iter().position(|p| p.role.is_goalkeeper()) {
            substitutes.push(remaining.remove(idx).clone());
        }

        substitutes.extend(
            remaining
                .into_iter()
                .filter(|p| !p.role.is_goalkeeper())
                .take(DEFAULT_BENCH_SIZE - substitutes.len())
                .cloned(),
        );

        substitutes
    }
}

use crate::loaders::NamesEntity;
use core::{Player, PlayerBuilder, PlayerRole, PlayerSkills};
use rand::rngs::StdRng;
use rand::RngExt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

static PLAYER_ID_SEQUENCE: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(1));

pub struct PlayerGenerator {
    first_names: Vec<String>,
    last_names: Vec<String>,
}

impl PlayerGenerator {
    pub fn with_people_names(names: &NamesEntity) -> Self {
        PlayerGenerator {
            first_names: names.first_names.clone(),
            last_names: names.last_names.clone(),
        }
    }

    pub fn generate(&self, rng: &mut StdRng, role: PlayerRole, reputation: u16) -> Player {
        let rep_factor = (reputation as f32 / 10000.0).clamp(0.0, 1.0);

        PlayerBuilder::new()
            .id(PLAYER_ID_SEQUENCE.fetch_add(1, Ordering::SeqCst))
            .name(&self.first_name(rng), &self.last_name(rng))
            .role(role)
            .age(rng.random_range(17..=35))
            .skills(Self::generate_skills(rng, role, rep_factor))
            .condition(Some(rng.random_range(85.0..=100.0)))
            .build()
            .expect("Failed to build Player")
    }

    fn generate_skills(rng: &mut StdRng, role: PlayerRole, rep_factor: f32) -> PlayerSkills {
        let skill_min = 30.0 + rep_factor * 30.0;
        let skill_max = (50.0 + rep_factor * 40.0).min(95.0);

        let mut roll = |boost: f32| (rng.random_range(skill_min..=skill_max) + boost).min(99.0);

        let (gk, def, pm, sc, wi) = match role {
            PlayerRole::Goalkeeper => (20.0, 0.0, -15.0, -25.0, -25.0),
            PlayerRole::CentralDefender => (-30.0, 12.0, 0.0, -10.0, -10.0),
            PlayerRole::WingBack => (-30.0, 6.0, 0.0, -10.0, 6.0),
            PlayerRole::Midfielder => (-30.0, 0.0, 12.0, 0.0, 0.0),
            PlayerRole::Wing => (-30.0, -8.0, 4.0, 4.0, 12.0),
            PlayerRole::Forward => (-30.0, -10.0, 0.0, 12.0, 0.0),
        };

        PlayerSkills {
            stamina: roll(0.0),
            playmaking: roll(pm).max(1.0),
            scoring: roll(sc).max(1.0),
            winger: roll(wi).max(1.0),
            goalkeeping: roll(gk).max(1.0),
            passing: roll(pm / 2.0).max(1.0),
            defending: roll(def).max(1.0),
            set_pieces: roll(0.0),
        }
    }

    fn first_name(&self, rng: &mut StdRng) -> String {
        Self::pick(rng, &self.first_names, "Alex")
    }

    fn last_name(&self, rng: &mut StdRng) -> String {
        Self::pick(rng, &self.last_names, "Smith")
    }

    fn pick(rng: &mut StdRng, names: &[String], fallback: &str) -> String {
        if names.is_empty() {
            return fallback.to_string();
        }

        names[rng.random_range(0..names.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generator() -> PlayerGenerator {
        PlayerGenerator::with_people_names(&NamesEntity {
            first_names: vec!["Ivan".to_string()],
            last_names: vec!["Petrov".to_string()],
        })
    }

    #[test]
    fn test_goalkeepers_are_better_in_goal() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = generator();

        for _ in 0..20 {
            let keeper = generator.generate(&mut rng, PlayerRole::Goalkeeper, 6000);
            let striker = generator.generate(&mut rng, PlayerRole::Forward, 6000);

            assert!(keeper.skills.goalkeeping > striker.skills.goalkeeping);
            assert!(keeper.condition.unwrap() >= 85.0);
            assert_eq!(keeper.full_name(), "Ivan Petrov");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(2);
        let generator = generator();

        let first = generator.generate(&mut rng, PlayerRole::Midfielder, 5000);
        let second = generator.generate(&mut rng, PlayerRole::Midfielder, 5000);

        assert_ne!(first.id, second.id);
    }
}

use crate::club::player::player::Player;
use crate::shared::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryType {
    Knock,
    Cramp,
    DeadLeg,
    HamstringStrain,
    AnkleSprain,
    GroinStrain,
    KneeLigament,
    BrokenLeg,
}

// Pools ordered from the lightest to the worst; the roll walks up the list.
const POOLS: [(i32, &[InjuryType]); 3] = [
    (50, &[InjuryType::Knock, InjuryType::Cramp, InjuryType::DeadLeg]),
    (90, &[
        InjuryType::HamstringStrain,
        InjuryType::AnkleSprain,
        InjuryType::GroinStrain,
    ]),
    (i32::MAX, &[InjuryType::KneeLigament, InjuryType::BrokenLeg]),
];

impl InjuryType {
    /// Pick a match injury. Veterans and exhausted players draw from the
    /// heavier pools more often.
    pub fn random_match_injury(rng: &mut dyn RandomSource, age: u8, condition: f32) -> InjuryType {
        let age_penalty = (age as i32 - 28).max(0);
        let fatigue_penalty = ((100.0 - condition.clamp(0.0, 100.0)) / 8.0) as i32;

        let roll = rng.range(0, 99) + age_penalty + fatigue_penalty;

        let pool = POOLS
            .iter()
            .find(|(limit, _)| roll < *limit)
            .map(|(_, pool)| *pool)
            .unwrap_or(POOLS[POOLS.len() - 1].1);

        pool[rng.pick(pool.len())]
    }
}

impl std::fmt::Display for InjuryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InjuryType::Knock => "knock",
            InjuryType::Cramp => "cramp",
            InjuryType::DeadLeg => "dead leg",
            InjuryType::HamstringStrain => "hamstring strain",
            InjuryType::AnkleSprain => "ankle sprain",
            InjuryType::GroinStrain => "groin strain",
            InjuryType::KneeLigament => "knee ligament damage",
            InjuryType::BrokenLeg => "broken leg",
        };

        f.write_str(name)
    }
}

/// Decides whether a player taking part in an action gets injured.
pub trait InjuryEvaluator: Send + Sync {
    fn evaluate(
        &self,
        player: &Player,
        intensity: f64,
        rng: &mut dyn RandomSource,
    ) -> Option<InjuryType>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InjuryConfig {
    pub base_probability: f64,
    pub veteran_age: u8,
    pub veteran_factor: f64,
    pub tired_condition: f32,
    pub tired_factor: f64,
    pub history_factor: f64,
    /// Share of the risk removed by medical staff, `[0, 1]`.
    pub prevention: f64,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        InjuryConfig {
            base_probability: 0.02,
            veteran_age: 30,
            veteran_factor: 1.5,
            tired_condition: 50.0,
            tired_factor: 2.0,
            history_factor: 1.3,
            prevention: 0.0,
        }
    }
}

pub struct InjuryService {
    config: InjuryConfig,
}

impl InjuryService {
    pub fn new(config: InjuryConfig) -> Self {
        InjuryService { config }
    }

    pub fn probability(&self, player: &Player, intensity: f64) -> f64 {
        let config = &self.config;

        let mut probability = config.base_probability;

        if player.age > config.veteran_age {
            probability *= config.veteran_factor;
        }

        if player.condition_or_default() < config.tired_condition {
            probability *= config.tired_factor;
        }

        if player.injury_count > 0 {
            probability *= config.history_factor;
        }

        probability *= intensity;
        probability *= 1.0 - config.prevention.clamp(0.0, 1.0);

        probability.clamp(0.0, 1.0)
    }
}

impl InjuryEvaluator for InjuryService {
    fn evaluate(
        &self,
        player: &Player,
        intensity: f64,
        rng: &mut dyn RandomSource,
    ) -> Option<InjuryType> {
        if player.is_injured {
            return None;
        }

        if !rng.chance(self.probability(player, intensity)) {
            return None;
        }

        Some(InjuryType::random_match_injury(
            rng,
            player.age,
            player.condition_or_default(),
        ))
    }
}

/// Evaluator for friendlies and replays where nobody gets hurt.
pub struct NoInjuries;

impl InjuryEvaluator for NoInjuries {
    fn evaluate(&self, _: &Player, _: f64, _: &mut dyn RandomSource) -> Option<InjuryType> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::player::builder::PlayerBuilder;
    use crate::club::player::position::PlayerRole;
    use crate::club::player::skills::PlayerSkills;
    use crate::shared::StdRandom;

    fn player(age: u8, condition: f32, injury_count: u16) -> Player {
        PlayerBuilder::new()
            .id(1)
            .name("Ivan", "Petrov")
            .role(PlayerRole::Forward)
            .age(age)
            .skills(PlayerSkills::uniform(50.0))
            .condition(Some(condition))
            .injury_count(injury_count)
            .build()
            .unwrap()
    }

    #[test]
    fn test_description_names_injury() {
        assert_eq!(InjuryType::HamstringStrain.to_string(), "hamstring strain");
    }

    #[test]
    fn test_base_probability_for_fresh_young_player() {
        let service = InjuryService::new(InjuryConfig::default());

        let probability = service.probability(&player(24, 90.0, 0), 1.0);

        assert!((probability - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_risk_factors_multiply() {
        let service = InjuryService::new(InjuryConfig::default());

        let probability = service.probability(&player(33, 40.0, 2), 0.5);

        assert!((probability - 0.02 * 1.5 * 2.0 * 1.3 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_prevention_reduces_risk() {
        let service = InjuryService::new(InjuryConfig {
            prevention: 0.5,
            ..InjuryConfig::default()
        });

        let probability = service.probability(&player(24, 90.0, 0), 1.0);

        assert!((probability - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_injured_player_is_not_evaluated_again() {
        let service = InjuryService::new(InjuryConfig {
            base_probability: 1.0,
            ..InjuryConfig::default()
        });
        let mut rng = StdRandom::with_seed(1);

        let mut injured = player(24, 90.0, 0);
        injured.set_injury(InjuryType::Cramp);

        assert!(service.evaluate(&injured, 1.0, &mut rng).is_none());
        assert!(service.evaluate(&player(24, 90.0, 0), 1.0, &mut rng).is_some());
    }

    #[test]
    fn test_exhausted_veteran_draws_heavier_injuries() {
        let mut rng = StdRandom::with_seed(3);

        let light = (0..200)
            .map(|_| InjuryType::random_match_injury(&mut rng, 36, 0.0))
            .filter(|injury| {
                matches!(
                    injury,
                    InjuryType::Knock | InjuryType::Cramp | InjuryType::DeadLeg
                )
            })
            .count();

        // roll + 8 + 12 stays below the light-pool limit only for rolls under 30
        assert!(light < 120);
    }
}

use crate::r#match::PlayerMatchStats;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Per-player career log fed by every simulated match.
pub trait PlayerHistory: Send + Sync {
    fn record(&self, stats: &[PlayerMatchStats]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerCareer {
    pub appearances: u16,
    pub minutes: u32,
    pub goals: u16,
    pub assists: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub mvp: u16,
    pub average_rating: f32,
}

impl PlayerCareer {
    fn add(&mut self, stats: &PlayerMatchStats) {
        let games = self.appearances as f32;

        self.average_rating = (self.average_rating * games + stats.rating) / (games + 1.0);
        self.appearances += 1;
        self.minutes += stats.minutes as u32;
        self.goals += stats.goals;
        self.assists += stats.assists;
        self.yellow_cards += stats.yellow_cards as u16;
        self.red_cards += stats.red_cards as u16;

        if stats.mvp {
            self.mvp += 1;
        }
    }
}

#[derive(Default)]
pub struct InMemoryPlayerHistory {
    careers: RwLock<HashMap<u32, PlayerCareer>>,
}

impl InMemoryPlayerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn career(&self, player_id: u32) -> Option<PlayerCareer> {
        let careers = self.careers.read().unwrap_or_else(PoisonError::into_inner);
        careers.get(&player_id).cloned()
    }
}

impl PlayerHistory for InMemoryPlayerHistory {
    fn record(&self, stats: &[PlayerMatchStats]) {
        let mut careers = self.careers.write().unwrap_or_else(PoisonError::into_inner);

        for item in stats {
            careers.entry(item.player_id).or_default().add(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::MatchSide;

    #[test]
    fn test_average_rating_is_running_mean() {
        let history = InMemoryPlayerHistory::new();

        let mut first = PlayerMatchStats::new(7, 1, MatchSide::Home, "FW", true);
        first.rating = 6.0;
        first.goals = 1;
        let mut second = first.clone();
        second.rating = 8.0;
        second.mvp = true;

        history.record(&[first]);
        history.record(&[second]);

        let career = history.career(7).unwrap();

        assert_eq!(career.appearances, 2);
        assert_eq!(career.goals, 2);
        assert_eq!(career.mvp, 1);
        assert!((career.average_rating - 7.0).abs() < f32::EPSILON);
    }
}

use crate::r#match::RoundRef;
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// What closing a match did to its round and season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "progress", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundProgress {
    /// Matches of the round still to be played.
    Pending { remaining: usize },
    Advanced { next_round: u16 },
    SeasonFinished { season_id: u32 },
    /// The round had been closed before.
    AlreadyAdvanced,
}

#[derive(Debug, Clone, Copy)]
struct SeasonState {
    next_round: u16,
    finished: bool,
}

impl Default for SeasonState {
    fn default() -> Self {
        SeasonState {
            next_round: 1,
            finished: false,
        }
    }
}

/// Which round each season is up to.
#[derive(Default)]
pub struct SeasonCalendar {
    seasons: Mutex<HashMap<u32, SeasonState>>,
}

impl SeasonCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_round(&self, season_id: u32) -> u16 {
        let seasons = self.seasons.lock().unwrap_or_else(PoisonError::into_inner);
        seasons
            .get(&season_id)
            .map(|state| state.next_round)
            .unwrap_or(1)
    }

    pub fn is_finished(&self, season_id: u32) -> bool {
        let seasons = self.seasons.lock().unwrap_or_else(PoisonError::into_inner);
        seasons.get(&season_id).is_some_and(|state| state.finished)
    }

    /// Moves the season past a round whose matches are all completed. A
    /// round the season already moved past is left alone.
    pub fn close_round(&self, round: &RoundRef) -> RoundProgress {
        let mut seasons = self.seasons.lock().unwrap_or_else(PoisonError::into_inner);
        let state = seasons.entry(round.season_id).or_default();

        if state.next_round > round.number {
            return RoundProgress::AlreadyAdvanced;
        }

        state.next_round = round.number + 1;

        if round.is_last {
            state.finished = true;
            info!("season {} finished", round.season_id);
            return RoundProgress::SeasonFinished {
                season_id: round.season_id,
            };
        }

        info!(
            "season {}: round {} finished, next round {}",
            round.season_id, round.number, state.next_round
        );

        RoundProgress::Advanced {
            next_round: state.next_round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn round(number: u16, is_last: bool) -> RoundRef {
        RoundRef {
            is_last,
            ..testing::fixture(1, 1, 2, number).round
        }
    }

    #[test]
    fn test_closing_round_advances_season() {
        let calendar = SeasonCalendar::new();

        assert_eq!(
            calendar.close_round(&round(1, false)),
            RoundProgress::Advanced { next_round: 2 }
        );
        assert_eq!(calendar.next_round(testing::SEASON), 2);
        assert!(!calendar.is_finished(testing::SEASON));
    }

    #[test]
    fn test_round_is_closed_once() {
        let calendar = SeasonCalendar::new();
        calendar.close_round(&round(1, false));
        calendar.close_round(&round(2, false));

        assert_eq!(
            calendar.close_round(&round(1, false)),
            RoundProgress::AlreadyAdvanced
        );
        assert_eq!(calendar.next_round(testing::SEASON), 3);
    }

    #[test]
    fn test_last_round_finishes_season() {
        let calendar = SeasonCalendar::new();

        assert_eq!(
            calendar.close_round(&round(38, true)),
            RoundProgress::SeasonFinished {
                season_id: testing::SEASON
            }
        );
        assert!(calendar.is_finished(testing::SEASON));
        assert_eq!(calendar.next_round(testing::SEASON), 39);
    }
}

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub season_id: u32,
    pub club_id: u32,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub points: u16,
    /// Goals for and against per counted match. A match is counted once;
    /// applying it again replaces its earlier result.
    #[serde(skip)]
    results: BTreeMap<u32, (u8, u8)>,
}

impl StandingsRow {
    pub fn new(season_id: u32, club_id: u32) -> Self {
        StandingsRow {
            season_id,
            club_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
            results: BTreeMap::new(),
        }
    }

    /// Counts a match result. Returns `false` when exactly this result is
    /// already counted.
    pub fn apply(&mut self, match_id: u32, goals_for: u8, goals_against: u8) -> bool {
        match self.results.insert(match_id, (goals_for, goals_against)) {
            Some(previous) if previous == (goals_for, goals_against) => return false,
            Some((old_for, old_against)) => self.subtract(old_for, old_against),
            None => {}
        }

        self.played += 1;
        self.goals_for += goals_for as u16;
        self.goals_against += goals_against as u16;

        match goals_for.cmp(&goals_against) {
            Ordering::Greater => self.won += 1,
            Ordering::Equal => self.drawn += 1,
            Ordering::Less => self.lost += 1,
        }

        self.recalculate_points();

        true
    }

    /// Takes a counted match back out of the row. Returns `false` when the
    /// match was never counted.
    pub fn revert(&mut self, match_id: u32) -> bool {
        let Some((goals_for, goals_against)) = self.results.remove(&match_id) else {
            return false;
        };

        self.subtract(goals_for, goals_against);

        true
    }

    pub fn counts(&self, match_id: u32) -> bool {
        self.results.contains_key(&match_id)
    }

    fn subtract(&mut self, goals_for: u8, goals_against: u8) {
        self.played -= 1;
        self.goals_for -= goals_for as u16;
        self.goals_against -= goals_against as u16;

        match goals_for.cmp(&goals_against) {
            Ordering::Greater => self.won -= 1,
            Ordering::Equal => self.drawn -= 1,
            Ordering::Less => self.lost -= 1,
        }

        self.recalculate_points();
    }

    fn recalculate_points(&mut self) {
        self.points = self.won * 3 + self.drawn;
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

pub struct LeagueTable;

impl LeagueTable {
    /// Points, then goal difference, then goals scored. Club id keeps equal
    /// rows in a stable order.
    pub fn sort(rows: Vec<StandingsRow>) -> Vec<StandingsRow> {
        rows.into_iter()
            .sorted_by_key(|row| {
                (
                    Reverse(row.points),
                    Reverse(row.goal_difference()),
                    Reverse(row.goals_for),
                    row.club_id,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_win_draw_loss() {
        let mut row = StandingsRow::new(2025, 1);

        row.apply(1, 3, 1);
        row.apply(2, 0, 0);
        row.apply(3, 1, 2);

        assert_eq!(row.played, 3);
        assert_eq!((row.won, row.drawn, row.lost), (1, 1, 1));
        assert_eq!((row.goals_for, row.goals_against), (4, 3));
        assert_eq!(row.points, 4);
    }

    #[test]
    fn test_revert_undoes_apply() {
        let mut row = StandingsRow::new(2025, 1);
        row.apply(1, 2, 0);
        let before = row.clone();

        row.apply(2, 1, 1);

        assert!(row.revert(2));
        assert_eq!(row, before);
    }

    #[test]
    fn test_same_match_counts_once() {
        let mut row = StandingsRow::new(2025, 1);

        assert!(row.apply(7, 2, 1));
        assert!(!row.apply(7, 2, 1));

        assert_eq!((row.played, row.won, row.points), (1, 1, 3));
    }

    #[test]
    fn test_new_result_replaces_counted_one() {
        let mut row = StandingsRow::new(2025, 1);
        row.apply(7, 2, 1);

        assert!(row.apply(7, 0, 0));

        assert_eq!((row.played, row.won, row.drawn, row.points), (1, 0, 1, 1));
        assert_eq!((row.goals_for, row.goals_against), (0, 0));
    }

    #[test]
    fn test_revert_of_uncounted_match_is_noop() {
        let mut row = StandingsRow::new(2025, 1);
        row.apply(1, 1, 0);
        let before = row.clone();

        assert!(!row.revert(2));
        assert_eq!(row, before);
    }

    #[test]
    fn test_sort_by_points_then_goal_difference() {
        let mut a = StandingsRow::new(2025, 1);
        a.apply(1, 1, 0);
        let mut b = StandingsRow::new(2025, 2);
        b.apply(2, 4, 0);
        let mut c = StandingsRow::new(2025, 3);
        c.apply(3, 0, 0);

        let sorted: Vec<u32> = LeagueTable::sort(vec![c, a, b])
            .into_iter()
            .map(|r| r.club_id)
            .collect();

        assert_eq!(sorted, vec![2, 1, 3]);
    }
}

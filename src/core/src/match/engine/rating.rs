use crate::club::PlayerFieldPositionGroup;
use crate::r#match::statistics::PlayerMatchStats;

/// Match rating on a 1.0 - 10.0 scale, 6.0 for an anonymous afternoon.
pub fn match_rating(
    stats: &PlayerMatchStats,
    position_group: PlayerFieldPositionGroup,
    team_goals: u8,
    opponent_goals: u8,
) -> f32 {
    let mut rating: f32 = 6.0;

    rating += (stats.goals as f32 * 1.0).min(3.0);
    rating += (stats.assists as f32 * 0.5).min(1.5);

    if stats.passes > 3 {
        let pass_pct = stats.completed_passes as f32 / stats.passes as f32;
        rating += ((pass_pct - 0.70) * 2.0).clamp(-0.4, 0.5);
    }

    if stats.shots > 0 {
        let shot_accuracy = stats.shots_on_target as f32 / stats.shots as f32;
        rating += ((shot_accuracy - 0.4) * 0.6).clamp(-0.2, 0.3);
    }

    let tackle_weight = match position_group {
        PlayerFieldPositionGroup::Defender => 0.12,
        PlayerFieldPositionGroup::Midfielder => 0.08,
        _ => 0.05,
    };
    rating += (stats.tackles as f32 * tackle_weight).min(0.5);

    if position_group == PlayerFieldPositionGroup::Goalkeeper {
        rating += (stats.saves as f32 * 0.2).min(1.0);
    }

    rating -= stats.yellow_cards as f32 * 0.5;
    rating -= stats.red_cards as f32 * 2.0;

    if team_goals > opponent_goals {
        rating += 0.3;
    } else if team_goals < opponent_goals {
        rating -= 0.2;
    }

    if opponent_goals == 0 {
        match position_group {
            PlayerFieldPositionGroup::Goalkeeper => rating += 0.8,
            PlayerFieldPositionGroup::Defender => rating += 0.4,
            PlayerFieldPositionGroup::Midfielder => rating += 0.1,
            _ => {}
        }
    }

    if opponent_goals >= 3 {
        match position_group {
            PlayerFieldPositionGroup::Goalkeeper => rating -= 0.5,
            PlayerFieldPositionGroup::Defender => rating -= 0.3,
            _ => {}
        }
    }

    rating.clamp(1.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::MatchSide;

    fn stats() -> PlayerMatchStats {
        PlayerMatchStats::new(1, 1, MatchSide::Home, "FW", true)
    }

    #[test]
    fn test_quiet_draw_is_base_rating() {
        let rating = match_rating(&stats(), PlayerFieldPositionGroup::Forward, 1, 1);

        assert!((rating - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hat_trick_in_a_win() {
        let mut stats = stats();
        stats.goals = 3;
        stats.shots = 3;
        stats.shots_on_target = 3;

        let rating = match_rating(&stats, PlayerFieldPositionGroup::Forward, 3, 1);

        assert!((rating - 9.6).abs() < 0.001);
    }

    #[test]
    fn test_red_card_costs_two_points() {
        let mut stats = stats();
        stats.red_cards = 1;

        let rating = match_rating(&stats, PlayerFieldPositionGroup::Forward, 1, 1);

        assert!((rating - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clean_sheet_goalkeeper() {
        let mut stats = stats();
        stats.saves = 2;

        let rating = match_rating(&stats, PlayerFieldPositionGroup::Goalkeeper, 0, 0);

        assert!((rating - 7.2).abs() < 0.001);
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut stats = stats();
        stats.red_cards = 1;
        stats.yellow_cards = 2;

        let rating = match_rating(&stats, PlayerFieldPositionGroup::Defender, 0, 5);

        assert!(rating >= 1.0);
        assert!(rating <= 10.0);
    }
}

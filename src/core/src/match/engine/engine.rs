use crate::club::{InjuryEvaluator, Player};
use crate::r#match::engine::attendance::HomeAdvantage;
use crate::r#match::engine::config::EngineConfig;
use crate::r#match::engine::rating::match_rating;
use crate::r#match::engine::side::SideState;
use crate::r#match::error::SimulationError;
use crate::r#match::events::{EventKind, MatchSide, TimelineEvent};
use crate::r#match::fixture::Match;
use crate::r#match::result::{MatchResult, PlayerUpdate};
use crate::r#match::squad::{Formation, Zone};
use crate::r#match::statistics::{MatchStatistics, PlayerMatchStats};
use crate::shared::RandomSource;
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use std::sync::Arc;

const MATCH_MINUTES: i32 = 90;

/// Turn-based match engine. The ball moves between three zones and every
/// action is a handful of weighted rolls; no positions, no physics.
pub struct MatchEngine {
    config: EngineConfig,
    injuries: Arc<dyn InjuryEvaluator>,
}

impl MatchEngine {
    pub fn new(config: EngineConfig, injuries: Arc<dyn InjuryEvaluator>) -> Self {
        MatchEngine { config, injuries }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn play(
        &self,
        fixture: &Match,
        home: Formation,
        away: Formation,
        capacity: u32,
        rng: &mut dyn RandomSource,
    ) -> Result<MatchResult, SimulationError> {
        Self::validate(fixture.home.id, &home)?;
        Self::validate(fixture.away.id, &away)?;

        let advantage = HomeAdvantage::new(&self.config);
        let spectators = HomeAdvantage::draw_spectators(capacity, rng);

        let mut play = MatchPlay::new(
            &self.config,
            self.injuries.as_ref(),
            fixture,
            home,
            away,
        );

        play.home.set_luck(
            advantage.home_luck_ceiling(spectators, capacity),
            self.config.luck_floor_home,
        );
        play.away.set_luck(
            advantage.away_luck_ceiling(),
            self.config.luck_floor_away,
        );

        let actions = rng
            .range(self.config.actions_min, self.config.actions_max)
            .max(1);

        play.kick_off(rng);

        for action in 1..=actions {
            let minute = (MATCH_MINUTES * action / actions) as u8;
            play.play_action(minute, rng);
        }

        debug!(
            "match {} played in {} actions: {} {} - {} {}",
            fixture.id,
            actions,
            fixture.home.name,
            play.home_score,
            play.away_score,
            fixture.away.name
        );

        Ok(play.finish(spectators, actions as u32))
    }

    fn validate(club_id: u32, formation: &Formation) -> Result<(), SimulationError> {
        let invalid = |reason: &str| SimulationError::InvalidFormation {
            club_id,
            reason: reason.to_string(),
        };

        match formation.goalkeeper() {
            Some(p) if p.role.is_goalkeeper() => {}
            _ => return Err(invalid("no goalkeeper in the first slot")),
        }

        if formation.players.len() != formation.module.outfield() + 1 {
            return Err(invalid("starting eleven does not match the module"));
        }

        if !formation.module.is_valid() {
            return Err(invalid("module leaves a zone without players"));
        }

        Ok(())
    }
}

struct MatchPlay<'a> {
    config: &'a EngineConfig,
    injuries: &'a dyn InjuryEvaluator,
    match_id: u32,
    home: SideState,
    away: SideState,
    possession: MatchSide,
    zone: Zone,
    home_score: u8,
    away_score: u8,
    home_actions: u32,
    events: Vec<TimelineEvent>,
    statistics: MatchStatistics,
    player_stats: BTreeMap<u32, PlayerMatchStats>,
}

impl<'a> MatchPlay<'a> {
    fn new(
        config: &'a EngineConfig,
        injuries: &'a dyn InjuryEvaluator,
        fixture: &Match,
        home: Formation,
        away: Formation,
    ) -> Self {
        let home = SideState::new(MatchSide::Home, fixture.home.clone(), home);
        let away = SideState::new(MatchSide::Away, fixture.away.clone(), away);

        let mut player_stats = BTreeMap::new();

        for side in [&home, &away] {
            for (slot, player) in side.formation.players.iter().enumerate() {
                let mut stats = PlayerMatchStats::new(
                    player.id,
                    side.club.id,
                    side.side,
                    side.formation.module.position_label(slot),
                    true,
                );
                stats.minutes = MATCH_MINUTES as u8;
                player_stats.insert(player.id, stats);
            }
        }

        MatchPlay {
            config,
            injuries,
            match_id: fixture.id,
            home,
            away,
            possession: MatchSide::Home,
            zone: Zone::Midfield,
            home_score: 0,
            away_score: 0,
            home_actions: 0,
            events: Vec::new(),
            statistics: MatchStatistics::default(),
            player_stats,
        }
    }

    fn side(&self, side: MatchSide) -> &SideState {
        match side {
            MatchSide::Home => &self.home,
            MatchSide::Away => &self.away,
        }
    }

    fn side_mut(&mut self, side: MatchSide) -> &mut SideState {
        match side {
            MatchSide::Home => &mut self.home,
            MatchSide::Away => &mut self.away,
        }
    }

    fn stats_mut(&mut self, player_id: u32) -> Option<&mut PlayerMatchStats> {
        self.player_stats.get_mut(&player_id)
    }

    fn record(
        &mut self,
        minute: u8,
        kind: EventKind,
        side: MatchSide,
        description: String,
    ) -> &mut TimelineEvent {
        let mut event = TimelineEvent::new(minute, kind, Some(side), description)
            .with_score(self.home_score, self.away_score);
        event.match_id = self.match_id;

        self.events.push(event);
        let last = self.events.len() - 1;
        &mut self.events[last]
    }

    fn kick_off(&mut self, rng: &mut dyn RandomSource) {
        self.possession = if rng.range(0, 1) == 0 {
            MatchSide::Home
        } else {
            MatchSide::Away
        };
        self.zone = Zone::Midfield;

        let side = self.possession;
        let team = self.side(side).club.name.clone();
        self.record(0, EventKind::KickOff, side, format!("{} kick off", team));
    }

    fn play_action(&mut self, minute: u8, rng: &mut dyn RandomSource) {
        let attacking = self.possession;
        let defending = attacking.opposite();
        let zone = self.zone;

        if attacking == MatchSide::Home {
            self.home_actions += 1;
        }

        let passer = self.pass(attacking, rng);

        let drift = self.config.luck_drift;
        let luck = self.side_mut(attacking).roll_luck(rng, drift);

        let attackers = self.side(attacking).group(zone);
        let defenders = self.side(defending).group(zone.inverse());

        let diff = (self.side(attacking).offence_average(&attackers) + attackers.len() as i32)
            - (self.side(defending).defence_average(&defenders) + defenders.len() as i32);

        let base = if diff > 0 {
            self.config.advance_favoured
        } else {
            self.config.advance_unfavoured
        };

        let bonus = self.config.mentality_bonus;
        let mentality = self.side(attacking).formation.mentality.attack_modifier(bonus)
            - self.side(defending).formation.mentality.defence_modifier(bonus);

        let chance = base + diff + luck + mentality;

        debug!(
            "match {} minute {}: {:?} in {:?}, diff {}, luck {}, chance {}",
            self.match_id, minute, attacking, zone, diff, luck, chance
        );

        let mut participants = vec![(attacking, passer)];

        if rng.percentage(chance) {
            match zone.forward() {
                Some(next) => self.zone = next,
                None => self.shoot(minute, rng),
            }
        } else if let Some(tackler) = self.defend(minute, diff, rng) {
            participants.push((defending, tackler));
        }

        for (side, slot) in participants {
            self.check_injury(minute, side, slot, rng);
        }

        self.decay_condition();

        for side in [MatchSide::Home, MatchSide::Away] {
            self.apply_substitutions(minute, side);
        }
    }

    fn pass(&mut self, side: MatchSide, rng: &mut dyn RandomSource) -> usize {
        let slots: Vec<usize> = self.side(side).active_slots().collect();
        let passer = slots[rng.pick(slots.len())];
        let passer_id = self.side(side).player(passer).id;

        let completed = rng.percentage(self.config.pass_completion);

        let team = self.statistics.side_mut(side);
        team.passes += 1;
        if completed {
            team.completed_passes += 1;
        }

        if let Some(stats) = self.stats_mut(passer_id) {
            stats.passes += 1;
            if completed {
                stats.completed_passes += 1;
            }
        }

        passer
    }

    fn pick(&self, side: MatchSide, zone: Zone, rng: &mut dyn RandomSource) -> Option<usize> {
        let group = self.side(side).group(zone);

        if group.is_empty() {
            return None;
        }

        Some(group[rng.pick(group.len())])
    }

    fn keeper_average(&self, side: MatchSide) -> i32 {
        self.side(side)
            .goalkeeper()
            .map(|gk| gk.goalkeeping_average())
            .unwrap_or(0)
    }

    fn shoot(&mut self, minute: u8, rng: &mut dyn RandomSource) {
        let attacking = self.possession;
        let defending = attacking.opposite();

        let Some(scorer) = self.pick(attacking, Zone::Offence, rng) else {
            return;
        };

        let scorer_average = self.side(attacking).player(scorer).scoring_average();
        let keeper_average = self.keeper_average(defending);

        self.statistics.side_mut(attacking).shots += 1;
        let scorer_id = self.side(attacking).player(scorer).id;
        if let Some(stats) = self.stats_mut(scorer_id) {
            stats.shots += 1;
        }

        if scorer_average >= keeper_average {
            let diff = scorer_average - keeper_average;

            if rng.percentage(self.config.shot_favoured + diff / 2) {
                self.goal(minute, scorer, EventKind::Goal, rng);
            } else {
                self.save(minute, scorer);
            }
        } else {
            let diff = keeper_average - scorer_average;

            if rng.percentage(self.config.miss_unfavoured + diff / 2) {
                self.miss(minute, scorer);
            } else {
                self.goal(minute, scorer, EventKind::Goal, rng);
            }
        }
    }

    fn goal(&mut self, minute: u8, scorer: usize, kind: EventKind, rng: &mut dyn RandomSource) {
        let attacking = self.possession;
        let defending = attacking.opposite();

        match attacking {
            MatchSide::Home => self.home_score += 1,
            MatchSide::Away => self.away_score += 1,
        }

        self.statistics.side_mut(attacking).shots_on_target += 1;

        let scorer_player = self.side(attacking).player(scorer);
        let scorer_id = scorer_player.id;
        let scorer_name = scorer_player.full_name();

        if let Some(stats) = self.stats_mut(scorer_id) {
            stats.goals += 1;
            stats.shots_on_target += 1;
        }

        let assist = if kind == EventKind::Goal {
            let candidates: Vec<usize> = self
                .side(attacking)
                .group(Zone::Midfield)
                .into_iter()
                .filter(|&slot| slot != scorer)
                .collect();

            if candidates.is_empty() {
                None
            } else {
                Some(self.side(attacking).player(candidates[rng.pick(candidates.len())]).id)
            }
        } else {
            None
        };

        if let Some(assist_id) = assist
            && let Some(stats) = self.stats_mut(assist_id)
        {
            stats.assists += 1;
        }

        if let Some(keeper_id) = self.side(defending).goalkeeper().map(|gk| gk.id)
            && let Some(stats) = self.stats_mut(keeper_id)
        {
            stats.goals_conceded += 1;
        }

        let description = match kind {
            EventKind::FreeKickGoal => format!("{} scores from a free kick", scorer_name),
            _ => format!("{} scores", scorer_name),
        };

        let event = self.record(minute, kind, attacking, description);
        event.player_id = Some(scorer_id);
        event.secondary_player_id = assist;

        self.possession = defending;
        self.zone = Zone::Midfield;
    }

    fn save(&mut self, minute: u8, shooter: usize) {
        let attacking = self.possession;
        let defending = attacking.opposite();

        self.statistics.side_mut(attacking).shots_on_target += 1;

        let shooter_id = self.side(attacking).player(shooter).id;
        if let Some(stats) = self.stats_mut(shooter_id) {
            stats.shots_on_target += 1;
        }

        let keeper = self
            .side(defending)
            .goalkeeper()
            .map(|gk| (gk.id, gk.full_name()));

        if let Some((keeper_id, _)) = keeper
            && let Some(stats) = self.stats_mut(keeper_id)
        {
            stats.saves += 1;
        }

        let description = match &keeper {
            Some((_, name)) => format!("{} saves, corner", name),
            None => "Shot blocked on the line, corner".to_string(),
        };

        let event = self.record(minute, EventKind::Save, defending, description);
        event.player_id = keeper.map(|(id, _)| id);
        event.secondary_player_id = Some(shooter_id);
    }

    fn miss(&mut self, minute: u8, shooter: usize) {
        let attacking = self.possession;
        let shooter_player = self.side(attacking).player(shooter);
        let shooter_id = shooter_player.id;
        let description = format!("{} misses the target", shooter_player.full_name());

        let event = self.record(minute, EventKind::Miss, attacking, description);
        event.player_id = Some(shooter_id);

        self.possession = attacking.opposite();
        self.zone = Zone::Offence.inverse();
    }

    /// Failed advance: the defending side wins the ball, possibly by fouling.
    /// Returns the tackler's slot.
    fn defend(&mut self, minute: u8, diff: i32, rng: &mut dyn RandomSource) -> Option<usize> {
        let attacking = self.possession;
        let defending = attacking.opposite();
        let zone = self.zone;

        let tackler = self.pick(defending, zone.inverse(), rng)?;
        let tackler_id = self.side(defending).player(tackler).id;

        self.statistics.side_mut(defending).tackles += 1;
        if let Some(stats) = self.stats_mut(tackler_id) {
            stats.tackles += 1;
        }

        let foul_chance = if diff > 0 {
            self.config.foul_favoured
        } else {
            self.config.foul_unfavoured
        };

        if rng.percentage(foul_chance) {
            self.foul(minute, tackler, rng);

            if zone == Zone::Offence {
                self.free_kick(minute, rng);
            }
        } else {
            self.statistics.side_mut(defending).interceptions += 1;
            self.possession = defending;
            self.zone = zone.inverse();
        }

        Some(tackler)
    }

    fn foul(&mut self, minute: u8, fouler: usize, rng: &mut dyn RandomSource) {
        let defending = self.possession.opposite();

        let player = self.side(defending).player(fouler);
        let fouler_id = player.id;
        let fouler_name = player.full_name();
        let defending_skill = player.skills.defending as i32;

        self.statistics.side_mut(defending).fouls += 1;

        let event = self.record(
            minute,
            EventKind::Foul,
            defending,
            format!("Foul by {}", fouler_name),
        );
        event.player_id = Some(fouler_id);

        if !rng.percentage(100 - defending_skill) {
            return;
        }

        self.statistics.side_mut(defending).yellow_cards += 1;
        if let Some(stats) = self.stats_mut(fouler_id) {
            stats.yellow_cards += 1;
        }

        if self.side(defending).cautioned.contains(&fouler_id) {
            self.statistics.side_mut(defending).red_cards += 1;
            if let Some(stats) = self.stats_mut(fouler_id) {
                stats.red_cards += 1;
                stats.minutes = minute;
            }

            self.side_mut(defending).send_off(fouler);

            let event = self.record(
                minute,
                EventKind::RedCard,
                defending,
                format!("Second yellow, {} is sent off", fouler_name),
            );
            event.player_id = Some(fouler_id);
        } else {
            self.side_mut(defending).cautioned.push(fouler_id);

            let event = self.record(
                minute,
                EventKind::YellowCard,
                defending,
                format!("{} is booked", fouler_name),
            );
            event.player_id = Some(fouler_id);
        }
    }

    fn free_kick(&mut self, minute: u8, rng: &mut dyn RandomSource) {
        let attacking = self.possession;
        let defending = attacking.opposite();

        let group = self.side(attacking).group(Zone::Offence);
        let Some(taker) = group.iter().copied().max_by_key(|&slot| {
            let player = self.side(attacking).player(slot);
            (player.set_pieces_average(), Reverse(player.id))
        }) else {
            return;
        };

        let taker_average = self.side(attacking).player(taker).set_pieces_average();
        let keeper_average = self.keeper_average(defending);

        self.statistics.side_mut(attacking).shots += 1;
        let taker_id = self.side(attacking).player(taker).id;
        if let Some(stats) = self.stats_mut(taker_id) {
            stats.shots += 1;
        }

        if taker_average >= keeper_average {
            let diff = taker_average - keeper_average;

            if rng.percentage(self.config.free_kick_favoured + diff / 2) {
                self.goal(minute, taker, EventKind::FreeKickGoal, rng);
            } else {
                self.save(minute, taker);
            }
        } else {
            let diff = keeper_average - taker_average;

            if rng.percentage(self.config.free_kick_miss_unfavoured + diff / 2) {
                self.miss(minute, taker);
            } else {
                self.goal(minute, taker, EventKind::FreeKickGoal, rng);
            }
        }
    }

    fn check_injury(&mut self, minute: u8, side: MatchSide, slot: usize, rng: &mut dyn RandomSource) {
        if self.side(side).is_sent_off(slot) {
            return;
        }

        let player = self.side(side).player(slot);
        let Some(injury) = self
            .injuries
            .evaluate(player, self.config.injury_intensity, rng)
        else {
            return;
        };

        let player = self.side_mut(side).player_mut(slot);
        player.set_injury(injury);

        let player_id = player.id;
        let description = format!("{} is injured ({})", player.full_name(), injury);

        let event = self.record(minute, EventKind::Injury, side, description);
        event.player_id = Some(player_id);
    }

    fn decay_condition(&mut self) {
        let base = self.config.decay_base;
        let factor = self.config.decay_stamina_factor;

        for side in [&mut self.home, &mut self.away] {
            let slots: Vec<usize> = side.active_slots().collect();

            for slot in slots {
                let player = side.player_mut(slot);
                let decay = base + factor * (100.0 - player.skills.stamina) / 100.0;
                player.decrease_condition(decay);
            }
        }
    }

    fn apply_substitutions(&mut self, minute: u8, side: MatchSide) {
        while self.side(side).substitutions < self.config.max_substitutions {
            let Some((slot, bench_index)) = self.next_substitution(side) else {
                break;
            };

            let club_id = self.side(side).club.id;
            let position = self.side(side).formation.module.position_label(slot);

            let state = self.side_mut(side);
            let outgoing = state.substitute(slot, bench_index);
            let outgoing_id = outgoing.id;
            let outgoing_name = outgoing.full_name();

            let incoming = state.player(slot);
            let incoming_id = incoming.id;
            let incoming_name = incoming.full_name();

            if let Some(stats) = self.stats_mut(outgoing_id) {
                stats.minutes = minute;
            }

            let mut stats = PlayerMatchStats::new(incoming_id, club_id, side, position, false);
            stats.minutes = (MATCH_MINUTES as u8).saturating_sub(minute);
            self.player_stats.insert(incoming_id, stats);

            let event = self.record(
                minute,
                EventKind::Substitution,
                side,
                format!("{} replaces {}", incoming_name, outgoing_name),
            );
            event.player_id = Some(incoming_id);
            event.secondary_player_id = Some(outgoing_id);
        }
    }

    /// Most urgent change first: injured players, then the most tired one
    /// below the threshold. Returns the slot and the bench index to bring on.
    fn next_substitution(&self, side: MatchSide) -> Option<(usize, usize)> {
        let state = self.side(side);
        let threshold = self.config.substitution_threshold;

        let mut candidates: Vec<usize> = state
            .active_slots()
            .filter(|&slot| {
                let player = state.player(slot);
                player.is_injured || player.condition_or_default() < threshold
            })
            .collect();

        candidates.sort_by(|&a, &b| {
            let (pa, pb) = (state.player(a), state.player(b));
            pb.is_injured
                .cmp(&pa.is_injured)
                .then(
                    pa.condition_or_default()
                        .partial_cmp(&pb.condition_or_default())
                        .unwrap_or(Ordering::Equal),
                )
                .then(a.cmp(&b))
        });

        candidates.into_iter().find_map(|slot| {
            Self::replacement(state.player(slot), &state.formation.substitutes)
                .map(|bench_index| (slot, bench_index))
        })
    }

    fn replacement(outgoing: &Player, bench: &[Player]) -> Option<usize> {
        let best = |filter: &dyn Fn(&Player) -> bool| {
            bench
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_injured && filter(p))
                .max_by_key(|(_, p)| (p.average(), Reverse(p.id)))
                .map(|(idx, _)| idx)
        };

        best(&|p| p.role == outgoing.role)
            .or_else(|| best(&|p| outgoing.role.compatible().contains(&p.role)))
    }

    fn finish(self, spectators: u32, actions: u32) -> MatchResult {
        let mut statistics = self.statistics;

        let home_possession = ((self.home_actions * 100) / actions.max(1)).min(100) as u8;
        statistics.home.possession = home_possession;
        statistics.away.possession = 100 - home_possession;

        let mut player_stats: Vec<PlayerMatchStats> = self.player_stats.into_values().collect();

        let mut roles = BTreeMap::new();
        for side in [&self.home, &self.away] {
            for player in side.all_players() {
                roles.insert(player.id, player.role.position_group());
            }
        }

        for stats in player_stats.iter_mut() {
            let (team_goals, opponent_goals) = match stats.side {
                MatchSide::Home => (self.home_score, self.away_score),
                MatchSide::Away => (self.away_score, self.home_score),
            };

            if let Some(group) = roles.get(&stats.player_id) {
                stats.rating = match_rating(stats, *group, team_goals, opponent_goals);
            }
        }

        if let Some(mvp) = player_stats.iter_mut().max_by(|a, b| {
            a.rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal)
                .then(b.player_id.cmp(&a.player_id))
        }) {
            mvp.mvp = true;
        }

        let player_updates = [&self.home, &self.away]
            .into_iter()
            .flat_map(|side| {
                side.all_players().map(|player| PlayerUpdate {
                    player_id: player.id,
                    club_id: side.club.id,
                    condition: player.condition_or_default(),
                    injury: player.injury,
                })
            })
            .collect();

        MatchResult {
            match_id: self.match_id,
            home: self.home.club.clone(),
            away: self.away.club.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
            spectators,
            actions,
            events: self.events,
            statistics,
            player_stats,
            home_formation: self.home.formation,
            away_formation: self.away.formation,
            player_updates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{ClubSquad, NoInjuries};
    use crate::r#match::squad::FormationSelector;
    use crate::shared::StdRandom;
    use crate::testing::{self, AlwaysInjure, ScriptedRandom};

    fn engine(injuries: Arc<dyn InjuryEvaluator>) -> MatchEngine {
        MatchEngine::new(EngineConfig::default(), injuries)
    }

    fn formation(squad: &ClubSquad) -> Formation {
        FormationSelector::select(squad.club.id, &squad.players, squad.module, squad.mentality)
            .unwrap()
    }

    fn play_with(
        engine: &MatchEngine,
        home: &ClubSquad,
        away: &ClubSquad,
        rng: &mut dyn RandomSource,
    ) -> MatchResult {
        let fixture = testing::fixture(1, home.club.id, away.club.id, 1);

        engine
            .play(&fixture, formation(home), formation(away), 50_000, rng)
            .unwrap()
    }

    fn squads() -> (ClubSquad, ClubSquad) {
        (
            testing::squad(1, "Club 1", None, 100),
            testing::squad(2, "Club 2", None, 200),
        )
    }

    fn count(result: &MatchResult, kind: EventKind, side: MatchSide) -> usize {
        result
            .events
            .iter()
            .filter(|e| e.kind == kind && e.side == Some(side))
            .count()
    }

    #[test]
    fn test_all_successful_rolls_end_five_all() {
        let (home, away) = squads();
        let mut rng = ScriptedRandom::succeeding().with_range(15, 25, 20);

        let result = play_with(&engine(Arc::new(NoInjuries)), &home, &away, &mut rng);

        assert_eq!(result.actions, 20);
        assert_eq!((result.home_score, result.away_score), (5, 5));
        assert_eq!(count(&result, EventKind::Goal, MatchSide::Home), 5);
        assert_eq!(count(&result, EventKind::Goal, MatchSide::Away), 5);
        assert_eq!(result.statistics.home.possession, 50);
        assert_eq!(result.statistics.away.possession, 50);
        assert_eq!(result.events[0].kind, EventKind::KickOff);
        assert_eq!(result.events[0].side, Some(MatchSide::Home));
    }

    #[test]
    fn test_full_stadium_raises_home_luck_ceiling() {
        let (home, away) = squads();
        let mut rng = ScriptedRandom::succeeding()
            .with_range(15, 25, 20)
            .with_range(16_666, 50_000, 50_000);

        let result = play_with(&engine(Arc::new(NoInjuries)), &home, &away, &mut rng);

        assert_eq!(result.spectators, 50_000);
        assert!(rng.ranges().contains(&(0, 30)));
        assert!(rng.ranges().contains(&(0, 20)));
        assert!(!rng.ranges().iter().any(|&(min, max)| min == 0 && max > 30));
    }

    #[test]
    fn test_score_always_matches_goal_events() {
        let (home, away) = squads();
        let engine = engine(Arc::new(NoInjuries));

        for seed in 0..25 {
            let mut rng = StdRandom::with_seed(seed);
            let result = play_with(&engine, &home, &away, &mut rng);

            let home_goals = result
                .events
                .iter()
                .filter(|e| e.kind.is_goal() && e.side == Some(MatchSide::Home))
                .count();
            let away_goals = result
                .events
                .iter()
                .filter(|e| e.kind.is_goal() && e.side == Some(MatchSide::Away))
                .count();

            assert_eq!(result.home_score as usize, home_goals, "seed {}", seed);
            assert_eq!(result.away_score as usize, away_goals, "seed {}", seed);
            assert!(
                result.events.windows(2).all(|w| w[0].minute <= w[1].minute),
                "seed {}",
                seed
            );
            assert!((15..=25).contains(&result.actions));
            assert_eq!(
                result.statistics.home.possession + result.statistics.away.possession,
                100
            );
            assert_eq!(result.player_stats.iter().filter(|s| s.mvp).count(), 1);
        }
    }

    #[test]
    fn test_missing_condition_is_treated_as_exhausted() {
        let (mut home, away) = squads();
        for player in home.players.iter_mut() {
            player.condition = None;
        }

        let mut rng = StdRandom::with_seed(3);
        let result = play_with(&engine(Arc::new(NoInjuries)), &home, &away, &mut rng);

        let home_updates: Vec<&PlayerUpdate> =
            result.player_updates.iter().filter(|u| u.club_id == 1).collect();

        assert!(!home_updates.is_empty());
        assert!(
            home_updates
                .iter()
                .all(|u| (0.0..=100.0).contains(&u.condition))
        );
        assert_eq!(count(&result, EventKind::Substitution, MatchSide::Home), 3);
    }

    #[test]
    fn test_tired_players_are_replaced_up_to_the_limit() {
        let (mut home, mut away) = squads();
        for player in home.players.iter_mut().chain(away.players.iter_mut()) {
            player.set_condition(41.0);
        }

        let mut rng = ScriptedRandom::succeeding().with_range(15, 25, 20);
        let result = play_with(&engine(Arc::new(NoInjuries)), &home, &away, &mut rng);

        assert_eq!(count(&result, EventKind::Substitution, MatchSide::Home), 3);
        assert_eq!(count(&result, EventKind::Substitution, MatchSide::Away), 3);

        let substitutes: Vec<&PlayerMatchStats> =
            result.player_stats.iter().filter(|s| !s.started).collect();

        assert_eq!(substitutes.len(), 6);
        assert!(substitutes.iter().all(|s| s.minutes < 90));
    }

    #[test]
    fn test_injured_players_are_substituted() {
        let (home, away) = squads();
        let mut rng = ScriptedRandom::succeeding().with_range(15, 25, 20);

        let result = play_with(&engine(Arc::new(AlwaysInjure)), &home, &away, &mut rng);

        assert!(count(&result, EventKind::Injury, MatchSide::Home) >= 1);
        assert!(count(&result, EventKind::Substitution, MatchSide::Home) >= 1);
        assert!(count(&result, EventKind::Substitution, MatchSide::Home) <= 3);
        assert!(
            result
                .player_updates
                .iter()
                .any(|u| u.injury == Some(crate::club::InjuryType::Cramp))
        );
    }

    #[test]
    fn test_formation_without_goalkeeper_is_rejected() {
        let (home, away) = squads();
        let fixture = testing::fixture(1, 1, 2, 1);

        let mut broken = formation(&home);
        broken.players.swap(0, 1);

        let result = engine(Arc::new(NoInjuries)).play(
            &fixture,
            broken,
            formation(&away),
            50_000,
            &mut StdRandom::with_seed(1),
        );

        assert!(matches!(
            result,
            Err(SimulationError::InvalidFormation { club_id: 1, .. })
        ));
    }

    #[test]
    fn test_forced_result_keeps_goal_events_consistent() {
        let (home, away) = squads();
        let mut rng = ScriptedRandom::succeeding().with_range(15, 25, 20);
        let mut result = play_with(&engine(Arc::new(NoInjuries)), &home, &away, &mut rng);

        result.apply_forced(crate::r#match::ForcedResult::AwayWin);

        assert_eq!((result.home_score, result.away_score), (5, 6));
        assert_eq!(
            result
                .events
                .iter()
                .filter(|e| e.is_goal_for(MatchSide::Away))
                .count(),
            6
        );
        assert_eq!(result.events.last().unwrap().minute, 90);
    }
}

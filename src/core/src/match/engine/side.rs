use crate::club::{ClubRef, Player};
use crate::r#match::events::MatchSide;
use crate::r#match::squad::{Formation, Zone};
use crate::shared::RandomSource;

/// One team during a match: the formation on the pitch, its zone groups and
/// the running luck ceiling.
pub(crate) struct SideState {
    pub side: MatchSide,
    pub club: ClubRef,
    pub formation: Formation,
    groups: [Vec<usize>; 3],
    sent_off: Vec<usize>,
    pub cautioned: Vec<u32>,
    pub substitutions: u8,
    /// Players taken off, kept for the condition write-back.
    pub replaced: Vec<Player>,
    pub luck_ceiling: i32,
    luck_max: i32,
    luck_floor: i32,
}

impl SideState {
    pub fn new(side: MatchSide, club: ClubRef, formation: Formation) -> Self {
        let groups = [
            formation.zone_slots(Zone::Defence),
            formation.zone_slots(Zone::Midfield),
            formation.zone_slots(Zone::Offence),
        ];

        SideState {
            side,
            club,
            formation,
            groups,
            sent_off: Vec::new(),
            cautioned: Vec::new(),
            substitutions: 0,
            replaced: Vec::new(),
            luck_ceiling: 0,
            luck_max: 0,
            luck_floor: 0,
        }
    }

    pub fn set_luck(&mut self, ceiling: i32, floor: i32) {
        self.luck_ceiling = ceiling;
        self.luck_max = ceiling;
        self.luck_floor = floor.min(ceiling);
    }

    /// Draws this action's luck and lets the ceiling drift: a lucky roll
    /// lowers it, an unlucky one raises it, never past the starting ceiling.
    pub fn roll_luck(&mut self, rng: &mut dyn RandomSource, drift: i32) -> i32 {
        let luck = rng.range(0, self.luck_ceiling);

        if luck > self.luck_ceiling / 2 {
            self.luck_ceiling -= rng.range(0, drift);
            if self.luck_ceiling < 0 {
                self.luck_ceiling = self.luck_floor;
            }
        } else {
            self.luck_ceiling += rng.range(0, drift);
        }

        self.luck_ceiling = self.luck_ceiling.clamp(0, self.luck_max);

        luck
    }

    /// Slots playing in `zone`. Falls back to every outfield player still on
    /// the pitch when red cards emptied the group.
    pub fn group(&self, zone: Zone) -> Vec<usize> {
        let group = &self.groups[zone.index()];

        if !group.is_empty() {
            return group.clone();
        }

        self.active_slots().filter(|&slot| slot != 0).collect()
    }

    pub fn active_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.formation.players.len()).filter(|slot| !self.sent_off.contains(slot))
    }

    pub fn player(&self, slot: usize) -> &Player {
        &self.formation.players[slot]
    }

    pub fn player_mut(&mut self, slot: usize) -> &mut Player {
        &mut self.formation.players[slot]
    }

    pub fn goalkeeper(&self) -> Option<&Player> {
        if self.sent_off.contains(&0) {
            return None;
        }

        self.formation.goalkeeper()
    }

    pub fn offence_average(&self, slots: &[usize]) -> i32 {
        Self::average(slots.iter().map(|&s| self.player(s).offence_average()))
    }

    pub fn defence_average(&self, slots: &[usize]) -> i32 {
        Self::average(slots.iter().map(|&s| self.player(s).defence_average()))
    }

    fn average(values: impl Iterator<Item = i32>) -> i32 {
        let (sum, count) = values.fold((0, 0), |(sum, count), v| (sum + v, count + 1));

        if count == 0 { 0 } else { sum / count }
    }

    pub fn is_sent_off(&self, slot: usize) -> bool {
        self.sent_off.contains(&slot)
    }

    /// Removes a player from every zone group for the rest of the match.
    pub fn send_off(&mut self, slot: usize) {
        self.sent_off.push(slot);

        for group in self.groups.iter_mut() {
            group.retain(|&s| s != slot);
        }
    }

    /// Swaps a bench player into `slot`, returning the player taken off.
    pub fn substitute(&mut self, slot: usize, bench_index: usize) -> &Player {
        let incoming = self.formation.substitutes.remove(bench_index);
        let outgoing = std::mem::replace(&mut self.formation.players[slot], incoming);

        self.substitutions += 1;
        self.replaced.push(outgoing);

        &self.replaced[self.replaced.len() - 1]
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.formation.players.iter().chain(self.replaced.iter())
    }
}

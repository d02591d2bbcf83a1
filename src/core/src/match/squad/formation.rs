use crate::club::Player;
use crate::r#match::squad::module::{Mentality, Module};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Third of the pitch the ball is in, seen from the side in possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Defence,
    Midfield,
    Offence,
}

impl Zone {
    /// The next zone towards goal, `None` from the offence zone.
    pub fn forward(&self) -> Option<Zone> {
        match self {
            Zone::Defence => Some(Zone::Midfield),
            Zone::Midfield => Some(Zone::Offence),
            Zone::Offence => None,
        }
    }

    /// The same third seen from the other side.
    pub fn inverse(&self) -> Zone {
        match self {
            Zone::Defence => Zone::Offence,
            Zone::Midfield => Zone::Midfield,
            Zone::Offence => Zone::Defence,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Zone::Defence => 0,
            Zone::Midfield => 1,
            Zone::Offence => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub module: Module,
    pub mentality: Mentality,
    /// Starting eleven: goalkeeper, then the module order (CD, WB, MF, WNG, FW).
    pub players: Vec<Player>,
    pub substitutes: Vec<Player>,
}

impl Formation {
    pub fn goalkeeper(&self) -> Option<&Player> {
        self.players.first()
    }

    fn central_defender_slots(&self) -> Range<usize> {
        let start = 1;
        start..start + self.module.cd as usize
    }

    fn wing_back_slots(&self) -> Range<usize> {
        let start = self.central_defender_slots().end;
        start..start + self.module.wb as usize
    }

    fn midfielder_slots(&self) -> Range<usize> {
        let start = self.wing_back_slots().end;
        start..start + self.module.mf as usize
    }

    fn wing_slots(&self) -> Range<usize> {
        let start = self.midfielder_slots().end;
        start..start + self.module.wng as usize
    }

    fn forward_slots(&self) -> Range<usize> {
        let start = self.wing_slots().end;
        start..start + self.module.fw as usize
    }

    /// Slots taking part in play in the given zone.
    ///
    /// defence: GK + CD + WB + MF, midfield: CD + WB + MF + WNG,
    /// offence: MF + WNG + FW.
    pub fn zone_slots(&self, zone: Zone) -> Vec<usize> {
        let slots: Vec<usize> = match zone {
            Zone::Defence => std::iter::once(0)
                .chain(self.central_defender_slots())
                .chain(self.wing_back_slots())
                .chain(self.midfielder_slots())
                .collect(),
            Zone::Midfield => self
                .central_defender_slots()
                .chain(self.wing_back_slots())
                .chain(self.midfielder_slots())
                .chain(self.wing_slots())
                .collect(),
            Zone::Offence => self
                .midfielder_slots()
                .chain(self.wing_slots())
                .chain(self.forward_slots())
                .collect(),
        };

        slots.into_iter().filter(|&s| s < self.players.len()).collect()
    }

    pub fn player_ids(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.id).collect()
    }
}

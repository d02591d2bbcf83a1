use crate::club::PlayerRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outfield shape of a formation: how many central defenders, wing backs,
/// midfielders, wings and forwards line up in front of the goalkeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Module {
    pub cd: u8,
    pub wb: u8,
    pub mf: u8,
    pub wng: u8,
    pub fw: u8,
}

impl Default for Module {
    fn default() -> Self {
        Module::new(4, 0, 4, 0, 2)
    }
}

impl Module {
    pub const fn new(cd: u8, wb: u8, mf: u8, wng: u8, fw: u8) -> Self {
        Module { cd, wb, mf, wng, fw }
    }

    pub fn outfield(&self) -> usize {
        (self.cd + self.wb + self.mf + self.wng + self.fw) as usize
    }

    /// A module is playable when it fields ten outfield players and every
    /// zone group of the engine has somebody in it.
    pub fn is_valid(&self) -> bool {
        self.outfield() == 10
            && self.cd + self.wb + self.mf + self.wng > 0
            && self.mf + self.wng + self.fw > 0
    }

    /// Accepts `"D-M-F"` (`"4-4-2"`) or the full `"CD-WB-MF-WNG-FW"` notation.
    pub fn parse(value: &str) -> Option<Module> {
        let parts: Vec<u8> = value
            .split('-')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;

        let module = match parts.as_slice() {
            [d, m, f] => Module::new(*d, 0, *m, 0, *f),
            [cd, wb, mf, wng, fw] => Module::new(*cd, *wb, *mf, *wng, *fw),
            _ => return None,
        };

        module.is_valid().then_some(module)
    }

    /// Role of every starting slot, goalkeeper first.
    pub fn positions(&self) -> Vec<PlayerRole> {
        let mut positions = Vec::with_capacity(self.outfield() + 1);

        positions.push(PlayerRole::Goalkeeper);

        for (count, role) in [
            (self.cd, PlayerRole::CentralDefender),
            (self.wb, PlayerRole::WingBack),
            (self.mf, PlayerRole::Midfielder),
            (self.wng, PlayerRole::Wing),
            (self.fw, PlayerRole::Forward),
        ] {
            positions.extend(std::iter::repeat_n(role, count as usize));
        }

        positions
    }

    pub fn position_label(&self, index: usize) -> &'static str {
        self.positions()
            .get(index)
            .map(|role| role.get_short_name())
            .unwrap_or("SUB")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wb == 0 && self.wng == 0 {
            write!(f, "{}-{}-{}", self.cd, self.mf, self.fw)
        } else {
            write!(
                f,
                "{}-{}-{}-{}-{}",
                self.cd, self.wb, self.mf, self.wng, self.fw
            )
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mentality {
    Defensive,
    #[default]
    Normal,
    Offensive,
}

impl Mentality {
    /// Shift applied to the advance chance of the side in possession.
    pub fn attack_modifier(&self, bonus: i32) -> i32 {
        match self {
            Mentality::Defensive => -bonus,
            Mentality::Normal => 0,
            Mentality::Offensive => bonus,
        }
    }

    /// How much this side takes off the opponent's advance chance when defending.
    pub fn defence_modifier(&self, bonus: i32) -> i32 {
        match self {
            Mentality::Defensive => bonus,
            Mentality::Normal => 0,
            Mentality::Offensive => -bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_notation() {
        let module = Module::parse("4-4-2").unwrap();

        assert_eq!(module, Module::new(4, 0, 4, 0, 2));
        assert_eq!(module.to_string(), "4-4-2");
    }

    #[test]
    fn test_parse_full_notation() {
        let module = Module::parse("3-2-3-0-2").unwrap();

        assert_eq!(module, Module::new(3, 2, 3, 0, 2));
        assert_eq!(module.to_string(), "3-2-3-0-2");
    }

    #[test]
    fn test_parse_rejects_wrong_player_count() {
        assert!(Module::parse("4-4-3").is_none());
        assert!(Module::parse("4-x-2").is_none());
        assert!(Module::parse("4-6").is_none());
    }

    #[test]
    fn test_positions_start_with_goalkeeper() {
        let positions = Module::new(4, 0, 4, 0, 2).positions();

        assert_eq!(positions.len(), 11);
        assert_eq!(positions[0], PlayerRole::Goalkeeper);
        assert_eq!(positions[1], PlayerRole::CentralDefender);
        assert_eq!(positions[10], PlayerRole::Forward);
    }

    #[test]
    fn test_position_label() {
        let module = Module::new(3, 2, 3, 0, 2);

        assert_eq!(module.position_label(0), "GK");
        assert_eq!(module.position_label(4), "WB");
        assert_eq!(module.position_label(11), "SUB");
    }

    #[test]
    fn test_mentality_modifiers() {
        assert_eq!(Mentality::Offensive.attack_modifier(3), 3);
        assert_eq!(Mentality::Defensive.attack_modifier(3), -3);
        assert_eq!(Mentality::Normal.defence_modifier(3), 0);
        assert_eq!(Mentality::Defensive.defence_modifier(3), 3);
    }
}

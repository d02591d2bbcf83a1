use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRole {
    Goalkeeper,
    CentralDefender,
    WingBack,
    Midfielder,
    Wing,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFieldPositionGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerRole {
    pub fn get_short_name(&self) -> &'static str {
        match self {
            PlayerRole::Goalkeeper => "GK",
            PlayerRole::CentralDefender => "CD",
            PlayerRole::WingBack => "WB",
            PlayerRole::Midfielder => "MF",
            PlayerRole::Wing => "WNG",
            PlayerRole::Forward => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        *self == PlayerRole::Goalkeeper
    }

    /// Roles that can stand in for this one when nobody of the role is left.
    pub fn compatible(&self) -> &'static [PlayerRole] {
        match self {
            PlayerRole::Goalkeeper => &[],
            PlayerRole::CentralDefender => &[PlayerRole::WingBack],
            PlayerRole::WingBack => &[PlayerRole::CentralDefender],
            PlayerRole::Midfielder => &[PlayerRole::Wing, PlayerRole::Forward],
            PlayerRole::Wing => &[PlayerRole::Midfielder, PlayerRole::Forward],
            PlayerRole::Forward => &[PlayerRole::Wing, PlayerRole::Midfielder],
        }
    }

    pub fn position_group(&self) -> PlayerFieldPositionGroup {
        match self {
            PlayerRole::Goalkeeper => PlayerFieldPositionGroup::Goalkeeper,
            PlayerRole::CentralDefender | PlayerRole::WingBack => {
                PlayerFieldPositionGroup::Defender
            }
            PlayerRole::Midfielder | PlayerRole::Wing => PlayerFieldPositionGroup::Midfielder,
            PlayerRole::Forward => PlayerFieldPositionGroup::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_is_symmetric_for_defence() {
        assert!(PlayerRole::CentralDefender.compatible().contains(&PlayerRole::WingBack));
        assert!(PlayerRole::WingBack.compatible().contains(&PlayerRole::CentralDefender));
    }

    #[test]
    fn test_goalkeeper_has_no_stand_in() {
        assert!(PlayerRole::Goalkeeper.compatible().is_empty());
    }

    #[test]
    fn test_position_groups() {
        assert_eq!(PlayerRole::WingBack.position_group(), PlayerFieldPositionGroup::Defender);
        assert_eq!(PlayerRole::Wing.position_group(), PlayerFieldPositionGroup::Midfielder);
        assert_eq!(PlayerRole::Forward.position_group(), PlayerFieldPositionGroup::Forward);
    }
}

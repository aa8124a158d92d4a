use serde::{Deserialize, Serialize};

use crate::*;

/// Named board presets. Harder tiers grow the board and shrink the flag allowance relative to
/// the mine count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Difficult,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Difficult];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Difficult => "difficult",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name))
    }

    pub const fn size(self) -> Coord {
        match self {
            Self::Easy => 8,
            Self::Medium => 12,
            Self::Hard => 16,
            Self::Difficult => 18,
        }
    }

    pub const fn mines(self) -> CellCount {
        match self {
            Self::Easy => 14,
            Self::Medium => 26,
            Self::Hard => 38,
            Self::Difficult => 54,
        }
    }

    pub const fn flag_modifier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
            Self::Difficult => 2.5,
        }
    }

    /// Half the cells of the board.
    pub const fn move_budget(self) -> CellCount {
        mult(self.size(), self.size()) / 2
    }

    pub const fn config(self) -> GameConfig {
        GameConfig::new_unchecked(
            self.size(),
            self.mines(),
            self.flag_modifier(),
            self.move_budget(),
        )
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_configs() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()));
        }
    }

    #[test]
    fn preset_budgets_and_flag_capacity() {
        assert_eq!(Difficulty::Easy.move_budget(), 32);
        assert_eq!(Difficulty::Medium.move_budget(), 72);
        assert_eq!(Difficulty::Hard.move_budget(), 128);
        assert_eq!(Difficulty::Difficult.move_budget(), 162);

        assert_eq!(Difficulty::Easy.config().flag_capacity(), 14);
        assert_eq!(Difficulty::Medium.config().flag_capacity(), 18);
        assert_eq!(Difficulty::Hard.config().flag_capacity(), 19);
        assert_eq!(Difficulty::Difficult.config().flag_capacity(), 22);
    }

    #[test]
    fn names_round_trip_case_insensitively() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(difficulty.name()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name("nightmare"), None);
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use blastfield_core::{CellCount, Coord, Difficulty, GameConfig, mult};
use serde::Deserialize;

/// Game settings read from a TOML file. Every field is optional; explicit numbers override the
/// chosen difficulty preset.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub difficulty: Option<Difficulty>,
    pub size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub flag_modifier: Option<f64>,
    pub moves: Option<CellCount>,
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the game config. `difficulty` and `mines` come from the command line and win over
    /// the file. A custom size without an explicit move budget gets half its cells as moves.
    pub fn resolve(
        &self,
        difficulty: Option<Difficulty>,
        mines: Option<CellCount>,
    ) -> blastfield_core::Result<GameConfig> {
        let preset = difficulty.or(self.difficulty).unwrap_or_default();
        let size = self.size.unwrap_or(preset.size());
        let moves = match (self.moves, self.size) {
            (Some(moves), _) => moves,
            (None, Some(size)) => mult(size, size) / 2,
            (None, None) => preset.move_budget(),
        };

        GameConfig::new(
            size,
            mines.or(self.mines).unwrap_or(preset.mines()),
            self.flag_modifier.unwrap_or(preset.flag_modifier()),
            moves,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blastfield_core::{ConfigIssue, GameError};

    #[test]
    fn empty_file_is_easy_preset() {
        let file = FileConfig::from_toml_str("").unwrap();

        assert_eq!(file, FileConfig::default());
        assert_eq!(file.resolve(None, None).unwrap(), Difficulty::Easy.config());
    }

    #[test]
    fn difficulty_and_overrides_from_file() {
        let file = FileConfig::from_toml_str(
            r#"
            difficulty = "hard"
            mines = 40
            seed = 7
            "#,
        )
        .unwrap();

        let config = file.resolve(None, None).unwrap();

        assert_eq!(file.seed, Some(7));
        assert_eq!(config.size, 16);
        assert_eq!(config.total_mines, 40);
        assert_eq!(config.flag_modifier, 2.0);
        assert_eq!(config.move_budget, 128);
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = FileConfig::from_toml_str("difficulty = \"hard\"\nmines = 40").unwrap();

        let config = file.resolve(Some(Difficulty::Medium), Some(20)).unwrap();

        assert_eq!(config.size, 12);
        assert_eq!(config.total_mines, 20);
    }

    #[test]
    fn custom_size_derives_move_budget() {
        let file = FileConfig::from_toml_str("size = 10\nmines = 20\nflag_modifier = 1.25").unwrap();

        let config = file.resolve(None, None).unwrap();

        assert_eq!(config.move_budget, 50);
        assert_eq!(config.flag_capacity(), 16);
    }

    #[test]
    fn invalid_mine_count_is_rejected() {
        let file = FileConfig::from_toml_str("mines = 64").unwrap();

        assert_eq!(
            file.resolve(None, None),
            Err(GameError::InvalidConfiguration(ConfigIssue::MineCount {
                mines: 64,
                cells: 64
            }))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("bombs = 3").is_err());
        assert!(FileConfig::from_toml_str("difficulty = \"nightmare\"").is_err());
    }
}

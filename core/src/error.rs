use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
}

/// The configuration rule a rejected [`GameConfig`](crate::GameConfig) broke.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board size {0} is too small, need at least 2")]
    BoardTooSmall(Coord),
    #[error("board must be square, got {rows}x{cols}")]
    NotSquare { rows: Coord, cols: Coord },
    #[error("mine count {mines} must be greater than 2 and less than {cells}")]
    MineCount { mines: CellCount, cells: CellCount },
    #[error("flag modifier must be a finite positive number")]
    FlagModifier,
    #[error("move budget must be at least 1")]
    MoveBudget,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

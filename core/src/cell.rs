use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::{CellCount, Coord2};

/// The three mine subtypes. All of them count the same for adjacency numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineKind {
    MiniBomb,
    Mine,
    Blast,
}

impl MineKind {
    pub const ALL: [MineKind; 3] = [Self::MiniBomb, Self::Mine, Self::Blast];

    /// Extra moves charged, on top of the click itself, when the mine is hit without a power-up.
    /// `None` means the hit ends the game.
    pub const fn penalty(self) -> Option<CellCount> {
        match self {
            Self::MiniBomb => Some(4),
            Self::Mine => Some(6),
            Self::Blast => None,
        }
    }
}

/// One counter per [`MineKind`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub mini_bomb: CellCount,
    pub mine: CellCount,
    pub blast: CellCount,
}

impl KindCounts {
    pub const fn total(&self) -> CellCount {
        self.mini_bomb + self.mine + self.blast
    }
}

impl Index<MineKind> for KindCounts {
    type Output = CellCount;

    fn index(&self, kind: MineKind) -> &Self::Output {
        match kind {
            MineKind::MiniBomb => &self.mini_bomb,
            MineKind::Mine => &self.mine,
            MineKind::Blast => &self.blast,
        }
    }
}

impl IndexMut<MineKind> for KindCounts {
    fn index_mut(&mut self, kind: MineKind) -> &mut Self::Output {
        match kind {
            MineKind::MiniBomb => &mut self.mini_bomb,
            MineKind::Mine => &mut self.mine,
            MineKind::Blast => &mut self.blast,
        }
    }
}

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Opened safe cell with its adjacent live-mine count, 0 renders blank.
    Revealed(u8),
    /// Mine taken off the board, either by a power-up or by paying its penalty.
    Disarmed(MineKind),
    /// Live mine shown after the game was lost.
    Exposed(MineKind),
}

impl CellState {
    /// Untouched cells are the only ones that accept flags and clicks.
    pub const fn is_untouched(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Still hiding its contents, flagged or not.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Disarmed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Read view of one grid position, assembled by [`Board::cell`](crate::Board::cell).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub mine: Option<MineKind>,
    pub state: CellState,
}

impl Cell {
    pub const fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    pub const fn is_flagged(&self) -> bool {
        self.state.is_flagged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalties_match_kind() {
        assert_eq!(MineKind::MiniBomb.penalty(), Some(4));
        assert_eq!(MineKind::Mine.penalty(), Some(6));
        assert_eq!(MineKind::Blast.penalty(), None);
    }

    #[test]
    fn kind_counts_index_by_kind() {
        let mut counts = KindCounts::default();
        counts[MineKind::Mine] += 2;
        counts[MineKind::Blast] += 1;

        assert_eq!(counts.mine, 2);
        assert_eq!(counts[MineKind::Blast], 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn revealed_and_flagged_are_exclusive() {
        for state in [
            CellState::Hidden,
            CellState::Flagged,
            CellState::Revealed(0),
            CellState::Disarmed(MineKind::Mine),
            CellState::Exposed(MineKind::Blast),
        ] {
            assert!(!(state.is_revealed() && state.is_flagged()));
        }
    }
}

use crate::*;
pub use random::*;

mod random;

/// Places `total_mines` mines on a board and assigns each one a [`MineKind`].
pub trait MineClassifier {
    fn classify(self, config: &GameConfig) -> MineLayout;
}

/// How many mines of each kind a board of `total_mines` gets: an even split, with the remainder
/// going to [`MineKind::MiniBomb`].
pub const fn kind_quotas(total_mines: CellCount) -> KindCounts {
    let base = total_mines / 3;
    KindCounts {
        mini_bomb: base + total_mines % 3,
        mine: base,
        blast: base,
    }
}

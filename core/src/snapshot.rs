use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the presentation layer needs to draw one frame. Produced by
/// [`GameEngine::snapshot`], never fed back into the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<CellState>,
    /// Live mines per kind.
    pub remaining: KindCounts,
    pub disarmed: KindCounts,
    pub total_mines: CellCount,
    pub flag_count: CellCount,
    pub flag_capacity: CellCount,
    pub moves_left: CellCount,
    pub power_ups_remaining: u8,
    pub power_up_active: bool,
    pub tiles_revealed: CellCount,
    pub phase: Phase,
    pub triggered: Option<Coord2>,
}

impl Snapshot {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let board = engine.board();
        Self {
            size: board.size(),
            cells: board.cells().clone(),
            remaining: board.layout().counts(),
            disarmed: engine.disarmed(),
            total_mines: engine.total_mines(),
            flag_count: engine.flags().len(),
            flag_capacity: engine.flags().capacity(),
            moves_left: engine.moves_left(),
            power_ups_remaining: engine.power_ups_remaining(),
            power_up_active: engine.power_up_active(),
            tiles_revealed: engine.tiles_revealed(),
            phase: engine.phase(),
            triggered: engine.triggered(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    /// Rows top to bottom, each a slice-like view of its cells.
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, CellState>> {
        self.cells.rows().into_iter()
    }
}

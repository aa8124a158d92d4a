use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// What a single [`Board::reveal`] opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    pub cells: CellCount,
    /// Flagged cells the flood opened, their flags are gone.
    pub unflagged: SmallVec<[Coord2; 2]>,
}

/// The grid of cells together with the live mines underneath it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    cells: Array2<CellState>,
    tiles_revealed: CellCount,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            cells: Array2::default(size.to_nd_index()),
            tiles_revealed: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }

    /// Revealed safe cells plus disarmed mines.
    pub fn tiles_revealed(&self) -> CellCount {
        self.tiles_revealed
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn mine_at(&self, coords: Coord2) -> Option<MineKind> {
        self.layout.kind_at(coords)
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        Cell {
            coords,
            mine: self.mine_at(coords),
            state: self.state_at(coords),
        }
    }

    /// Opens an untouched safe cell, flooding through zero-count regions.
    ///
    /// The flood also opens flagged safe cells it reaches and reports them in
    /// [`Reveal::unflagged`]; disarmed cells stop it. Callers must route mines through
    /// [`Board::disarm`]; a reveal aimed at a live mine is refused.
    pub fn reveal(&mut self, coords: Coord2) -> Reveal {
        let mut result = Reveal::default();
        let Ok(coords) = self.layout.validate_coords(coords) else {
            return result;
        };

        if !self.state_at(coords).is_untouched() {
            return result;
        }

        if self.layout.contains_mine(coords) {
            log::warn!("Refusing to reveal live mine at {:?}", coords);
            return result;
        }

        let mut visited = HashSet::new();
        visited.insert(coords);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let state = self.state_at(visit_coords);
            if !state.is_covered() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }
            if state.is_flagged() {
                result.unflagged.push(visit_coords);
            }

            let count = self.layout.adjacent_mine_count(visit_coords);
            self.cells[visit_coords.to_nd_index()] = CellState::Revealed(count);
            self.tiles_revealed += 1;
            result.cells += 1;
            log::trace!("Opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    self.layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_covered())
                        .filter(|&pos| visited.insert(pos)),
                );
            }
        }

        result
    }

    /// Takes the live mine at `coords` off the board and marks the cell disarmed.
    pub fn disarm(&mut self, coords: Coord2) -> Option<MineKind> {
        let coords = self.layout.validate_coords(coords).ok()?;
        let kind = self.layout.remove(coords)?;
        self.cells[coords.to_nd_index()] = CellState::Disarmed(kind);
        self.tiles_revealed += 1;
        log::trace!("Disarmed {:?} at {:?}", kind, coords);
        Some(kind)
    }

    /// Flags an untouched cell or clears a flag. Returns whether the cell changed.
    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        match (*cell, flagged) {
            (CellState::Hidden, true) => {
                *cell = CellState::Flagged;
                true
            }
            (CellState::Flagged, false) => {
                *cell = CellState::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Shows every live mine with its kind marker, flagged ones included.
    pub fn expose_mines(&mut self) -> CellCount {
        let mut exposed = 0;
        for (coords, kind) in self.layout.iter_mines() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if matches!(*cell, CellState::Hidden | CellState::Flagged) {
                *cell = CellState::Exposed(kind);
                exposed += 1;
            }
        }
        exposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord, mines: &[(Coord2, MineKind)]) -> Board {
        Board::new(MineLayout::from_mine_kinds((size, size), mines).unwrap())
    }

    #[test]
    fn reveal_numbered_cell_stops() {
        let mut board = board(3, &[((0, 0), MineKind::Mine)]);

        assert_eq!(board.reveal((1, 1)).cells, 1);
        assert_eq!(board.state_at((1, 1)), CellState::Revealed(1));
        assert_eq!(board.state_at((2, 2)), CellState::Hidden);
        assert_eq!(board.tiles_revealed(), 1);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut board = board(4, &[((0, 0), MineKind::Blast)]);

        let opened = board.reveal((3, 3)).cells;

        assert_eq!(opened, 15);
        assert_eq!(board.state_at((3, 3)), CellState::Revealed(0));
        assert_eq!(board.state_at((1, 1)), CellState::Revealed(1));
        assert_eq!(board.state_at((0, 1)), CellState::Revealed(1));
        assert_eq!(board.state_at((0, 0)), CellState::Hidden);
    }

    #[test]
    fn flood_fill_is_bounded_by_numbers() {
        // a wall of mines down column 2 splits the board
        let mines = [
            ((0, 2), MineKind::Mine),
            ((1, 2), MineKind::MiniBomb),
            ((2, 2), MineKind::Blast),
            ((3, 2), MineKind::Mine),
            ((4, 2), MineKind::MiniBomb),
        ];
        let mut board = board(5, &mines);

        assert_eq!(board.reveal((0, 0)).cells, 10);
        for row in 0..5 {
            assert_eq!(board.state_at((row, 0)), CellState::Revealed(0));
            assert!(matches!(board.state_at((row, 1)), CellState::Revealed(n) if n > 0));
            assert_eq!(board.state_at((row, 3)), CellState::Hidden);
            assert_eq!(board.state_at((row, 4)), CellState::Hidden);
        }
    }

    #[test]
    fn second_reveal_is_noop() {
        let mut board = board(4, &[((0, 0), MineKind::Mine)]);

        board.reveal((3, 3));
        let revealed = board.tiles_revealed();

        assert_eq!(board.reveal((3, 3)), Reveal::default());
        assert_eq!(board.reveal((2, 2)), Reveal::default());
        assert_eq!(board.tiles_revealed(), revealed);
    }

    #[test]
    fn reveal_out_of_bounds_or_on_mine_is_noop() {
        let mut board = board(3, &[((0, 0), MineKind::Blast)]);

        assert_eq!(board.reveal((3, 0)).cells, 0);
        assert_eq!(board.reveal((0, 0)).cells, 0);
        assert_eq!(board.state_at((0, 0)), CellState::Hidden);
        assert_eq!(board.tiles_revealed(), 0);
    }

    #[test]
    fn flood_fill_opens_flagged_safe_cells() {
        let mut board = board(4, &[((0, 0), MineKind::Mine)]);
        assert!(board.set_flag((3, 0), true));
        assert!(board.set_flag((0, 0), true));

        let reveal = board.reveal((3, 3));

        assert_eq!(reveal.cells, 15);
        assert_eq!(reveal.unflagged.as_slice(), [(3, 0)]);
        assert_eq!(board.state_at((3, 0)), CellState::Revealed(0));
        assert_eq!(board.state_at((0, 0)), CellState::Flagged);
        assert_eq!(board.tiles_revealed(), 15);
    }

    #[test]
    fn flood_fill_leaves_disarmed_cells() {
        let mut board = board(3, &[((0, 0), MineKind::MiniBomb), ((2, 2), MineKind::Mine)]);
        board.disarm((0, 0));
        board.disarm((2, 2));

        let reveal = board.reveal((0, 2));

        assert_eq!(reveal.cells, 7);
        assert_eq!(board.state_at((0, 0)), CellState::Disarmed(MineKind::MiniBomb));
        assert_eq!(board.tiles_revealed(), 9);
    }

    #[test]
    fn flood_fill_handles_large_open_board() {
        let mut board = board(255, &[((0, 0), MineKind::Mine)]);

        let opened = board.reveal((254, 254)).cells;

        assert_eq!(opened, 255 * 255 - 1);
    }

    #[test]
    fn disarm_removes_mine_and_updates_adjacency() {
        let mut board = board(3, &[((0, 0), MineKind::MiniBomb), ((2, 2), MineKind::Mine)]);

        assert_eq!(board.disarm((0, 0)), Some(MineKind::MiniBomb));
        assert_eq!(board.disarm((0, 0)), None);
        assert_eq!(board.disarm((1, 1)), None);
        assert_eq!(board.state_at((0, 0)), CellState::Disarmed(MineKind::MiniBomb));
        assert_eq!(board.layout().counts().mini_bomb, 0);
        assert_eq!(board.layout().adjacent_mine_count((1, 1)), 1);
        assert_eq!(board.tiles_revealed(), 1);
    }

    #[test]
    fn expose_mines_marks_hidden_and_flagged() {
        let mut board = board(3, &[((0, 0), MineKind::MiniBomb), ((2, 2), MineKind::Blast)]);
        board.set_flag((2, 2), true);
        board.set_flag((1, 1), true);

        assert_eq!(board.expose_mines(), 2);
        assert_eq!(board.state_at((0, 0)), CellState::Exposed(MineKind::MiniBomb));
        assert_eq!(board.state_at((2, 2)), CellState::Exposed(MineKind::Blast));
        assert_eq!(board.state_at((1, 1)), CellState::Flagged);
    }

    #[test]
    fn cell_view_combines_mine_and_state() {
        let mut board = board(2, &[((0, 0), MineKind::Mine)]);
        board.reveal((1, 1));

        let cell = board.cell((1, 1));
        assert_eq!(cell.coords, (1, 1));
        assert_eq!(cell.mine, None);
        assert!(cell.is_revealed());
        assert_eq!(board.cell((0, 0)).mine, Some(MineKind::Mine));
    }
}

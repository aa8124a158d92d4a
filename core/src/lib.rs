#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use flags::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod engine;
mod error;
mod flags;
mod generator;
mod snapshot;
mod types;

/// Validated parameters of one game: a square board, its mine count, the flag modifier and the
/// move budget a fresh game starts with.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub total_mines: CellCount,
    pub flag_modifier: f64,
    pub move_budget: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(
        size: Coord,
        total_mines: CellCount,
        flag_modifier: f64,
        move_budget: CellCount,
    ) -> Self {
        Self {
            size,
            total_mines,
            flag_modifier,
            move_budget,
        }
    }

    pub fn new(
        size: Coord,
        total_mines: CellCount,
        flag_modifier: f64,
        move_budget: CellCount,
    ) -> Result<Self> {
        let config = Self::new_unchecked(size, total_mines, flag_modifier, move_budget);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(ConfigIssue::BoardTooSmall(self.size).into());
        }

        let cells = self.total_cells();
        if self.total_mines <= 2 || self.total_mines >= cells {
            return Err(ConfigIssue::MineCount {
                mines: self.total_mines,
                cells,
            }
            .into());
        }

        if !self.flag_modifier.is_finite() || self.flag_modifier <= 0.0 {
            return Err(ConfigIssue::FlagModifier.into());
        }

        if self.move_budget == 0 {
            return Err(ConfigIssue::MoveBudget.into());
        }

        Ok(())
    }

    pub const fn dims(&self) -> Coord2 {
        (self.size, self.size)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// `ceil(total_mines / flag_modifier)`.
    pub fn flag_capacity(&self) -> CellCount {
        ceil_div(self.total_mines, self.flag_modifier)
    }
}

/// Where the live mines are and what kind each one is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_kinds: Array2<Option<MineKind>>,
    counts: KindCounts,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_kinds: Array2::default(size.to_nd_index()),
            counts: KindCounts::default(),
        }
    }

    pub fn from_kind_mask(mine_kinds: Array2<Option<MineKind>>) -> Self {
        let mut counts = KindCounts::default();
        for kind in mine_kinds.iter().flatten() {
            counts[*kind] += 1;
        }
        Self { mine_kinds, counts }
    }

    pub fn from_mine_kinds(size: Coord2, mines: &[(Coord2, MineKind)]) -> Result<Self> {
        let mut mine_kinds: Array2<Option<MineKind>> = Array2::default(size.to_nd_index());

        for &(coords, kind) in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_kinds[coords.to_nd_index()] = Some(kind);
        }

        Ok(Self::from_kind_mask(mine_kinds))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_kinds.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_kinds.len().try_into().unwrap_or(CellCount::MAX)
    }

    /// Live mines per kind.
    pub fn counts(&self) -> KindCounts {
        self.counts
    }

    pub fn mine_count(&self) -> CellCount {
        self.counts.total()
    }

    pub fn kind_at(&self, coords: Coord2) -> Option<MineKind> {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_some()
    }

    /// Live mines among the eight neighbours, any kind.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count();
        // at most eight neighbours
        count as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = (Coord2, MineKind)> + '_ {
        self.mine_kinds
            .indexed_iter()
            .filter_map(|((row, col), kind)| Some(((row as Coord, col as Coord), (*kind)?)))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }

    /// Places a mine on an empty cell, returns `false` if the cell already holds one.
    pub(crate) fn place(&mut self, coords: Coord2, kind: MineKind) -> bool {
        let slot = &mut self.mine_kinds[coords.to_nd_index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(kind);
        self.counts[kind] += 1;
        true
    }

    pub(crate) fn remove(&mut self, coords: Coord2) -> Option<MineKind> {
        let kind = self.mine_kinds[coords.to_nd_index()].take()?;
        self.counts[kind] -= 1;
        Some(kind)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = Option<MineKind>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_kinds[coords.to_nd_index()]
    }
}

/// Game-level result of one intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The intent was not allowed in the current phase or on that cell; nothing changed.
    Ignored,
    Continue,
    Won,
    Lost,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl BitOr for Outcome {
    type Output = Outcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use Outcome::*;
        match (self, rhs) {
            (Lost, _) => Lost,
            (_, Lost) => Lost,
            (Won, _) => Won,
            (_, Won) => Won,
            (Continue, _) => Continue,
            (_, Continue) => Continue,
            (Ignored, Ignored) => Ignored,
        }
    }
}

/// Something that happened while an intent was processed, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A reveal opened `cells` cells starting at `coords`.
    Opened { coords: Coord2, cells: CellCount },
    Disarmed {
        coords: Coord2,
        kind: MineKind,
        penalty: CellCount,
        by_power_up: bool,
    },
    Detonated { coords: Coord2, kind: MineKind },
    Flagged { coords: Coord2 },
    Unflagged { coords: Coord2 },
    /// The oldest flag was pushed out to make room and its cell was resolved.
    Evicted { coords: Coord2 },
    PowerUpArmed { remaining: u8 },
    PowerUpSpent,
    MovesExhausted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub outcome: Outcome,
    pub events: SmallVec<[Event; 4]>,
}

impl Report {
    pub fn ignored() -> Self {
        Self {
            outcome: Outcome::Ignored,
            events: SmallVec::new(),
        }
    }

    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            events: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}

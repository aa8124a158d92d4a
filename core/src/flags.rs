use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Flagged positions in the order they were placed, never more than `capacity` of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTracker {
    order: VecDeque<Coord2>,
    capacity: CellCount,
}

impl FlagTracker {
    pub fn new(capacity: CellCount) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity.into()),
            capacity,
        }
    }

    pub fn capacity(&self) -> CellCount {
        self.capacity
    }

    pub fn len(&self) -> CellCount {
        // bounded by capacity
        self.order.len() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.order.contains(&coords)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.order.iter().copied()
    }

    /// Appends `coords`. When the tracker is already full the oldest flag is evicted first and
    /// returned. Pushing a position that is already tracked changes nothing.
    pub fn push(&mut self, coords: Coord2) -> Option<Coord2> {
        if self.contains(coords) || self.capacity == 0 {
            return None;
        }

        let evicted = if self.is_full() {
            self.order.pop_front()
        } else {
            None
        };
        self.order.push_back(coords);
        evicted
    }

    pub fn remove(&mut self, coords: Coord2) -> bool {
        match self.order.iter().position(|&pos| pos == coords) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

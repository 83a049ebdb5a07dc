//! Test utilities for the search and the agent

use crate::{Position, Side};

/// A tiny placement game on a strip of cells.
///
/// A stone may be placed on an empty cell whose direct neighbours are both
/// empty, whoever owns the surrounding stones. On a strip of three cells the
/// side to move wins by taking the middle cell and loses otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strip {
    cells: Vec<Option<Side>>,
}

impl Strip {
    /// Creates an empty strip of `len` cells.
    pub fn new(len: usize) -> Self{
        Strip {
            cells: vec![None; len],
        }
    }

    /// Returns the stone on `cell`, if any.
    pub fn get(&self, cell: usize) -> Option<Side>{
        self.cells.get(cell).copied().flatten()
    }

    fn is_free(&self, cell: usize) -> bool{
        self.cells.get(cell).is_some_and(|stone| stone.is_none())
    }
}

impl Position for Strip {
    fn cell_count(&self) -> usize{
        self.cells.len()
    }

    fn place(&mut self, cell: usize, side: Side) -> bool{
        let left_free = cell == 0 || self.get(cell - 1).is_none();
        let right_free = self.get(cell + 1).is_none();

        if !self.is_free(cell) || !left_free || !right_free {
            return false;
        }

        self.cells[cell] = Some(side);
        true
    }
}

/// Replays a sequence of placements, alternating sides from `first`.
///
/// # Panics
/// Panics if one of the placements is illegal.
#[allow(dead_code)]
pub fn replay<P: Position>(mut position: P, first: Side, cells: &[usize]) -> P{
    let mut side = first;

    for &cell in cells {
        assert!(position.place(cell, side), "illegal placement {} for {}", cell, side);
        side = side.opponent();
    }

    position
}

//! NoGo board implementation.
//!
//! NoGo is played with Go stones on a Go board, but capturing is forbidden:
//! a placement is illegal if it lands on an occupied cell, if it removes the
//! last liberty of an adjacent opponent group, or if the group it joins is
//! left without liberty. A player who cannot place loses.
//!
//! Cells are stored in row-major order:
//! ```text
//! [0][1][2]
//! [3][4][5]
//! [6][7][8]
//! ```

use std::fmt;

use crate::{Position, Side};

/// A NoGo board of arbitrary dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Side>>
}

impl Board {
    /// Side length of the standard board.
    pub const STANDARD_SIZE: usize = 9;

    /// Creates an empty `width x height` board.
    pub fn new(width: usize, height: usize) -> Self{
        Board { width, height, cells: vec![None; width * height] }
    }

    /// Creates an empty standard 9x9 board.
    pub fn standard() -> Self{
        Self::new(Self::STANDARD_SIZE, Self::STANDARD_SIZE)
    }

    #[inline]
    pub fn width(&self) -> usize{
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize{
        self.height
    }

    /// Returns the stone on `cell`, or `None` if the cell is empty or out of the board.
    #[inline]
    pub fn get(&self, cell: usize) -> Option<Side>{
        self.cells.get(cell).copied().flatten()
    }

    /// Returns the index of the cell at column `x`, row `y`.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> usize{
        y * self.width + x
    }

    fn neighbours(&self, cell: usize) -> impl Iterator<Item = usize>{
        let (width, height) = (self.width, self.height);
        let (x, y) = (cell % width, cell / width);

        [
            (x > 0).then(|| cell - 1),
            (x + 1 < width).then(|| cell + 1),
            (y > 0).then(|| cell - width),
            (y + 1 < height).then(|| cell + width),
        ].into_iter().flatten()
    }

    /// Checks whether the group containing the stone on `start` touches an empty cell.
    fn has_liberty(&self, start: usize) -> bool{
        let Some(side) = self.get(start) else { return true };

        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(cell) = stack.pop() {
            for next in self.neighbours(cell) {
                match self.cells[next] {
                    None => return true,
                    Some(stone) if stone == side && !visited[next] => {
                        visited[next] = true;
                        stack.push(next);
                    }
                    Some(_) => {}
                }
            }
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self{
        Self::standard()
    }
}

impl Position for Board {
    fn cell_count(&self) -> usize{
        self.cells.len()
    }

    fn place(&mut self, cell: usize, side: Side) -> bool{
        if cell >= self.cells.len() || self.cells[cell].is_some() {
            return false;
        }

        self.cells[cell] = Some(side);

        let captures = self.neighbours(cell)
            .any(|next| self.cells[next] == Some(side.opponent()) && !self.has_liberty(next));

        if captures || !self.has_liberty(cell) {
            self.cells[cell] = None;
            return false;
        }

        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        if self.width == 0 {
            return Ok(());
        }

        for row in self.cells.chunks(self.width) {
            for stone in row {
                let symbol = match stone {
                    Some(Side::Black) => 'X',
                    Some(Side::White) => 'O',
                    None => '.'
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board(){
        let board = Board::standard();

        assert_eq!(board.cell_count(), 81);
        assert_eq!(board.legal_count(Side::Black), 81);
        assert_eq!(board.legal_count(Side::White), 81);
    }

    #[test]
    fn test_occupied(){
        let mut board = Board::new(3, 3);

        assert!(board.place(4, Side::Black));
        assert!(!board.place(4, Side::Black));
        assert!(!board.place(4, Side::White));
        assert!(!board.place(9, Side::White));
    }

    #[test]
    fn test_capture_forbidden(){
        // . X .
        // X O .
        // . . .
        let mut board = Board::new(3, 3);
        board.place(1, Side::Black);
        board.place(3, Side::Black);
        board.place(4, Side::White);
        board.place(7, Side::Black);

        // the white stone keeps a single liberty on 5
        assert!(!board.is_legal(5, Side::Black));
        assert!(board.is_legal(5, Side::White));
    }

    #[test]
    fn test_suicide_forbidden(){
        // . X .
        // X . .
        // . . .
        let mut board = Board::new(3, 3);
        board.place(1, Side::Black);
        board.place(3, Side::Black);

        assert!(!board.is_legal(0, Side::White));
        assert!(board.is_legal(0, Side::Black));
    }

    #[test]
    fn test_group_liberties(){
        // X X O
        // . . .
        let mut board = Board::new(3, 2);
        board.place(0, Side::Black);
        board.place(1, Side::Black);
        board.place(2, Side::White);

        // filling 3 leaves the black group a liberty on 4
        assert!(board.is_legal(3, Side::White));
        board.place(3, Side::White);
        // 4 would now capture the black pair
        assert!(!board.is_legal(4, Side::White));
        // and black on 4 would capture the white stone on 3
        assert!(!board.is_legal(4, Side::Black));
    }

    #[test]
    fn test_rejected_placement_leaves_board_unchanged(){
        let mut board = Board::new(3, 3);
        board.place(1, Side::Black);
        board.place(3, Side::Black);

        let before = board.clone();
        assert!(!board.place(0, Side::White));
        assert_eq!(board, before);
    }

    #[test]
    fn test_display(){
        let mut board = Board::new(2, 2);
        board.place(0, Side::Black);
        board.place(3, Side::White);

        assert_eq!(board.to_string(), "X.\n.O\n");
    }

    #[test]
    fn test_empty_dimensions(){
        let board = Board::new(0, 3);

        assert_eq!(board.cell_count(), 0);
        assert_eq!(board.legal_count(Side::Black), 0);
        assert_eq!(board.to_string(), "");
    }
}

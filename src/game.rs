//! Module defining the game-side interface used by the search: sides, actions
//! and the `Position` trait.

use std::{fmt, str::FromStr};

/// One of the two players of a placement game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White
}

impl Side {
    /// Returns the other side.
    ///
    /// # Examples
    /// ```rust
    /// use nogo_mcts::Side;
    /// assert_eq!(Side::Black.opponent(), Side::White);
    /// assert_eq!(Side::White.opponent(), Side::Black);
    /// ```
    #[inline]
    pub fn opponent(self) -> Side{
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white")
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>{
        match s {
            "black" => Ok(Side::Black),
            "white" => Ok(Side::White),
            other => Err(other.to_string())
        }
    }
}

/// The move returned by an agent: a stone placed on a cell, or a pass when
/// no legal placement exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Place { cell: usize, side: Side },
    Pass
}

impl Action {
    /// Returns the placed cell, or `None` for a pass.
    #[inline]
    pub fn cell(&self) -> Option<usize>{
        match self {
            Action::Place { cell, .. } => Some(*cell),
            Action::Pass => None
        }
    }

    /// Applies the action to a copy of `position`.
    ///
    /// # Returns
    /// The resulting position, or `None` if the placement is illegal.
    /// A pass leaves the position unchanged.
    pub fn apply<P: Position>(&self, position: &P) -> Option<P>{
        let mut after = position.clone();

        match *self {
            Action::Place { cell, side } => after.place(cell, side).then_some(after),
            Action::Pass => Some(after)
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        match self {
            Action::Place { cell, side } => write!(f, "{}@{}", side, cell),
            Action::Pass => f.write_str("pass")
        }
    }
}

/// Trait defining a position of a placement game played on a fixed grid.
///
/// Cells are identified by their index, from `0` to `cell_count() - 1`.
/// Either side may be asked to place at any time: the position itself does
/// not track whose turn it is, the search does.
///
/// Equality is used to find the current position among the children of the
/// previous search root, so two positions must compare equal exactly when
/// they describe the same board.
pub trait Position: Clone + PartialEq {
    /// Returns the number of cells of the grid.
    fn cell_count(&self) -> usize;

    /// Places a stone of `side` on `cell` if that placement is legal.
    ///
    /// # Returns
    /// `true` if the stone was placed. On `false` the position must be left
    /// unchanged.
    fn place(&mut self, cell: usize, side: Side) -> bool;

    /// Checks whether `side` may place on `cell`, by trial-applying the
    /// placement on a copy.
    ///
    /// # Examples
    /// ```rust
    /// use nogo_mcts::{nogo::Board, Position, Side};
    /// let mut board = Board::new(3, 3);
    /// assert!(board.is_legal(4, Side::Black));
    /// board.place(4, Side::Black);
    /// assert!(!board.is_legal(4, Side::White));
    /// ```
    fn is_legal(&self, cell: usize, side: Side) -> bool{
        let mut after = self.clone();
        after.place(cell, side)
    }

    /// Counts the cells on which `side` may legally place.
    fn legal_count(&self, side: Side) -> usize{
        (0..self.cell_count()).filter(|&cell| self.is_legal(cell, side)).count()
    }
}

//! Number of search iterations spent on a move.

/// Policy deciding how many iterations a move request runs, from the number
/// of legal placements available to the side to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IterationBudget {
    /// Hand-tuned step table, see [`step_table`].
    #[default]
    StepTable,
    /// The same number of iterations for every move.
    Fixed(usize)
}

impl IterationBudget {
    /// Returns the number of iterations to run. No search is run when no
    /// placement is legal; otherwise at least one iteration is run.
    ///
    /// # Examples
    /// ```rust
    /// use nogo_mcts::IterationBudget;
    /// assert_eq!(IterationBudget::StepTable.iterations(81), 70_000);
    /// assert_eq!(IterationBudget::Fixed(500).iterations(81), 500);
    /// assert_eq!(IterationBudget::Fixed(500).iterations(0), 0);
    /// ```
    #[inline]
    pub fn iterations(&self, legal_moves: usize) -> usize{
        match *self {
            _ if legal_moves == 0 => 0,
            IterationBudget::StepTable => step_table(legal_moves),
            IterationBudget::Fixed(n) => n.max(1)
        }
    }
}

/// The step table. It rises then falls: the middle game, where the outcome
/// is decided, gets the largest budget. Each bound belongs to the lower bucket.
pub fn step_table(legal_moves: usize) -> usize{
    match legal_moves {
        61.. => 70_000,
        31..=60 => 100_000,
        21..=30 => 90_000,
        11..=20 => 70_000,
        1..=10 => 50_000,
        0 => 0
    }
}

//! Implementation of Monte Carlo Tree Search (MCTS) with random playouts.
//!
//! Every iteration descends the tree with UCB1, expands exactly one new node
//! and evaluates it by a uniformly random playout to the end of the game,
//! then folds the outcome back along the path. The tree outlives a single
//! move request: after a move is chosen the root advances to the matching
//! child, and the next request starts from whatever statistics were gathered
//! below it.

use std::rc::Rc;

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, trace};

use crate::{utils, IterationBudget, Node, NodeRef, Position, Side};

/// Data stored in each node of the MCTS tree.
///
/// `value` is the sum of the outcomes backpropagated through the node, each
/// signed according to the depth parity of the node (see [`Mcts::iterate`]).
#[derive(Clone, Debug)]
pub struct SearchStats<P>{
    position: P,
    value: i64,
    visits: u64
}

impl<P> SearchStats<P>{
    /// Creates zero statistics for `position`.
    pub fn new(position: P) -> Self{
        SearchStats { position, value: 0, visits: 0 }
    }

    #[inline]
    pub fn position(&self) -> &P{
        &self.position
    }

    #[inline]
    pub fn value(&self) -> i64{
        self.value
    }

    #[inline]
    pub fn visits(&self) -> u64{
        self.visits
    }

    /// Average value seen from the parent, i.e. with the sign flipped.
    ///
    /// Only meaningful for a node that has been visited at least once.
    #[inline]
    pub fn parent_value(&self) -> f64{
        -(self.value as f64 / self.visits as f64)
    }

    /// Adds one backpropagated outcome.
    #[inline]
    pub fn add_value(&mut self, value: i64){
        self.value += value;
        self.visits += 1;
    }
}

/// Type alias for a `Node` containing `SearchStats`.
pub type SearchNode<P> = Node<SearchStats<P>>;
/// Type alias for a strong reference (`Rc<RefCell<...>>`) to a `SearchNode`.
pub type SearchNodeRef<P> = NodeRef<SearchStats<P>>;

/// The standard Upper Confidence Bound 1 (UCB1) selection score, with a
/// fixed exploration constant of `sqrt(2)`.
///
/// # Parameters
/// - `value`: The mean value of the child, seen from the parent.
/// - `n_visits`: Number of visits of the child.
/// - `parent_n_visits`: Number of visits of the parent.
///
/// # Examples
/// ```rust
/// use nogo_mcts::ucb1;
/// assert_eq!(ucb1(0.5, 4.0, 1.0), 0.5);
/// assert!(ucb1(0.5, 1.0, 10.0) > ucb1(0.5, 2.0, 10.0));
/// ```
#[inline]
pub fn ucb1(value: f64, n_visits: f64, parent_n_visits: f64) -> f64{
    value + (2.0 * parent_n_visits.ln()).sqrt() / n_visits
}

/// Result of one step of the descent.
enum Step<P>{
    /// Move on to an existing child.
    Descend(SearchNodeRef<P>),
    /// A child was created and played out; the side that got stuck in the playout.
    Expanded(SearchNodeRef<P>, Side),
    /// The side to move has no legal placement.
    Terminal
}

/// The Monte Carlo Tree Search state of one agent.
///
/// The tree is single-threaded shared state (`Rc<RefCell<...>>`); a search
/// running concurrently would need its own `Mcts` and its own random number
/// generator.
pub struct Mcts<P: Position>{
    root: Option<SearchNodeRef<P>>,
    /// Cell order shuffled by the selection.
    order: Vec<usize>,
    /// Cell order shuffled by the playouts.
    playout_order: Vec<usize>
}

impl<P: Position> Default for Mcts<P>{
    fn default() -> Self{
        Self::new()
    }
}

impl<P: Position> Mcts<P>{
    /// Outcome of a search iteration where the searching side did not get stuck.
    pub const SURVIVED: i64 = 1;
    /// Outcome of a search iteration where the searching side got stuck.
    pub const STUCK: i64 = 0;

    /// Creates an MCTS instance without any tree yet. The first search
    /// starts from a fresh root.
    #[inline]
    pub fn new() -> Self{
        Mcts { root: None, order: Vec::new(), playout_order: Vec::new() }
    }

    /// Returns the current root, if a search has been run.
    #[inline]
    pub fn root(&self) -> Option<SearchNodeRef<P>>{
        self.root.as_ref().map(Rc::clone)
    }

    /// Number of visits of the root, `0` without a tree.
    #[inline]
    pub fn count_visit(&self) -> u64{
        self.root.as_ref().map_or(0, |root| root.borrow().get().visits())
    }

    /// Makes `position` the root of the tree.
    ///
    /// The children of the current root are searched for an equal position,
    /// so that the statistics gathered below the opponent's reply are kept.
    /// Deeper matches are not looked for: if none of the children matches a
    /// fresh root is created and the old tree is released.
    pub fn locate_root(&mut self, position: &P){
        let found = self.root.as_ref().and_then(|root| {
            root.borrow().children()
                .find(|(_, child)| child.borrow().get().position() == position)
                .map(|(_, child)| Rc::clone(child))
        });

        match found {
            Some(node) => {
                trace!(visits = node.borrow().get().visits(), "reusing subtree as search root");
                self.root = Some(node);
            }
            None => {
                trace!("starting search from a fresh root");
                self.root = Some(Node::new_root(SearchStats::new(position.clone())));
            }
        }
    }

    /// Chooses a move for `side` in `position`.
    ///
    /// Locates the root, runs as many iterations as `budget` allows for the
    /// number of legal placements, then advances the root to the chosen child.
    /// When the budget ran out before the root got a child, iterations go on
    /// until it has one, so that a move is returned whenever one is legal.
    ///
    /// # Returns
    /// The cell to play, or `None` if `side` has no legal placement.
    pub fn search<R: Rng + ?Sized>(&mut self, position: &P, side: Side, budget: &IterationBudget, rng: &mut R) -> Option<usize>{
        self.locate_root(position);

        let legal_moves = position.legal_count(side);
        let iterations = budget.iterations(legal_moves);

        if iterations == 0 {
            debug!(%side, legal_moves, "no legal placement, passing");
            return None;
        }

        self.run(side, iterations, rng);
        while self.root().is_some_and(|root| root.borrow().child_count() == 0) {
            self.iterate(side, rng);
        }

        let visits = self.count_visit();
        let cell = self.advance();

        debug!(%side, legal_moves, iterations, visits, ?cell, "search complete");
        cell
    }

    /// Runs `iterations` search iterations for `side` from the current root.
    pub fn run<R: Rng + ?Sized>(&mut self, side: Side, iterations: usize, rng: &mut R){
        for _ in 0..iterations {
            self.iterate(side, rng);
        }
    }

    /// Performs one full iteration (selection, expansion, simulation,
    /// backpropagation) for the searching `side`.
    ///
    /// The outcome is [`Self::SURVIVED`] if `side` is not the one left
    /// without a legal placement, [`Self::STUCK`] otherwise. It is negated
    /// once when the descent stopped at an odd depth, then backpropagated
    /// with alternating signs.
    ///
    /// Does nothing before a root has been located.
    pub fn iterate<R: Rng + ?Sized>(&mut self, side: Side, rng: &mut R){
        let Some(root) = self.root() else { return };

        let cells = root.borrow().get().position().cell_count();
        utils::fill_order(&mut self.order, cells);
        utils::fill_order(&mut self.playout_order, cells);

        let mut trajectory = vec![root];
        let mut mover = side;

        let loser = loop {
            let node = Rc::clone(&trajectory[trajectory.len() - 1]);

            // only a fresh root can be reached without visits
            if node.borrow().get().visits() == 0 {
                let position = node.borrow().get().position().clone();
                break self.simulation(position, mover, rng);
            }

            match self.selection(&node, mover, rng) {
                Step::Descend(child) => {
                    trajectory.push(child);
                    mover = mover.opponent();
                }
                Step::Expanded(child, loser) => {
                    trajectory.push(child);
                    break loser;
                }
                Step::Terminal => break mover
            }
        };

        let mut value = if loser != side { Self::SURVIVED } else { Self::STUCK };
        if (trajectory.len() - 1) % 2 == 1 {
            value = -value;
        }

        Self::backpropagation(&trajectory, value);
    }

    /// Performs one step of the selection phase from `node`, where `mover` is to play.
    ///
    /// Cells are visited in a fresh random order. Existing children are
    /// scored with [`ucb1`], the first best score winning ties. The first
    /// legal cell without a child is expanded and played out instead.
    fn selection<R: Rng + ?Sized>(&mut self, node: &SearchNodeRef<P>, mover: Side, rng: &mut R) -> Step<P>{
        self.order.shuffle(rng);

        let parent_visits = node.borrow().get().visits() as f64;
        let mut best: Option<(f64, SearchNodeRef<P>)> = None;

        for &cell in self.order.iter() {
            let child = node.borrow().get_child(cell);

            match child {
                Some(child) => {
                    let score = {
                        let stats = &*child.borrow();
                        ucb1(stats.get().parent_value(), stats.get().visits() as f64, parent_visits)
                    };

                    if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
                        best = Some((score, child));
                    }
                }
                None => {
                    let mut after = node.borrow().get().position().clone();

                    if after.place(cell, mover) {
                        let child = Self::expansion(node, cell, after.clone());
                        let loser = Self::simulation_with(after, mover.opponent(), &mut self.playout_order, rng);
                        return Step::Expanded(child, loser);
                    }
                }
            }
        }

        match best {
            Some((_, child)) => Step::Descend(child),
            None => Step::Terminal
        }
    }

    /// Performs the expansion phase: attaches a zero-statistics child for `cell`.
    #[inline]
    fn expansion(node: &SearchNodeRef<P>, cell: usize, position: P) -> SearchNodeRef<P>{
        Node::add_child(node, cell, SearchStats::new(position))
    }

    /// Performs the simulation phase from `position` with `mover` to play.
    ///
    /// # Returns
    /// The side left without a legal placement.
    #[inline]
    fn simulation<R: Rng + ?Sized>(&mut self, position: P, mover: Side, rng: &mut R) -> Side{
        Self::simulation_with(position, mover, &mut self.playout_order, rng)
    }

    fn simulation_with<R: Rng + ?Sized>(mut position: P, mut mover: Side, order: &mut [usize], rng: &mut R) -> Side{
        while utils::random_placement(&mut position, mover, order, rng).is_some() {
            mover = mover.opponent();
        }
        mover
    }

    /// Performs the backpropagation phase: walks `trajectory` from its last
    /// node up to the root, adding `value` and flipping its sign at each level.
    fn backpropagation(trajectory: &[SearchNodeRef<P>], value: i64){
        let mut value = value;

        for node in trajectory.iter().rev() {
            node.borrow_mut().get_mut().add_value(value);
            value = -value;
        }
    }

    /// Returns the root child with the best average value seen from the
    /// root, and the move leading to it. Visit counts are not considered.
    pub fn best_child(&self) -> Option<(usize, SearchNodeRef<P>)>{
        let root = self.root.as_ref()?;
        let root = &*root.borrow();

        let mut best: Option<(f64, usize, &SearchNodeRef<P>)> = None;
        for (cell, child) in root.children() {
            let value = child.borrow().get().parent_value();

            if best.as_ref().map_or(true, |(best_value, _, _)| value > *best_value) {
                best = Some((value, cell, child));
            }
        }

        best.map(|(_, cell, child)| (cell, Rc::clone(child)))
    }

    /// Plays the best move: the root advances to the best child, releasing
    /// its siblings.
    ///
    /// # Returns
    /// The move played, or `None` if the root has no child, in which case
    /// the root is kept.
    pub fn advance(&mut self) -> Option<usize>{
        let (cell, child) = self.best_child()?;
        self.root = Some(child);
        Some(cell)
    }
}

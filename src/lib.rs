//! A Monte Carlo Tree Search (MCTS) agent for NoGo and similar placement
//! games, where a player loses as soon as they have no legal placement.
//!
//! The search runs uniformly random playouts from every newly expanded node
//! and keeps its tree from one move request to the next: after choosing a
//! move the root advances to the matching child, and the next request looks
//! for the opponent's reply among that child's children.
//!
//! # Modules
//! - `game`: Defines sides, actions and the `Position` trait the search plays on.
//! - `nogo`: A NoGo board implementing `Position`.
//! - `tree`: Implements the tree data structure used by MCTS.
//! - `budget`: Decides how many iterations a move request runs.
//! - `mcts`: Provides the search itself.
//! - `config`: Parses and validates the agent configuration.
//! - `agent`: The agent answering move requests, in search or random mode.
//! - `utils`: Contains helpers shared by the search and the random mode.
//! - `test_utils`: Provides a tiny game for testing.
//!
//! # Examples
//! ```rust
//! use nogo_mcts::{nogo::Board, Action, ConfigError, Player, Position, Side};
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut player = Player::<Board>::new("name=mcts role=black seed=7 search=MCTS iterations=200")?;
//!
//!     let mut board = Board::new(5, 5);
//!     board.place(12, Side::White);
//!
//!     match player.take_action(&board) {
//!         Action::Place { cell, side } => assert!(board.is_legal(cell, side)),
//!         Action::Pass => unreachable!("black has legal placements"),
//!     }
//!     Ok(())
//! }
//! ```

mod tree;
mod game;
mod budget;
mod mcts;
mod config;
mod agent;
pub mod nogo;
pub mod utils;

#[doc(hidden)]
pub mod test_utils;

pub use tree::*;
pub use game::*;
pub use budget::*;
pub use mcts::*;
pub use config::*;
pub use agent::*;

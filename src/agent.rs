//! The playing agent: configuration, random number generator and, in search
//! mode, the search tree kept from one move to the next.

use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::{utils, Action, AgentConfig, ConfigError, Mcts, Position, SearchMode, Side};

/// An agent playing one side of a placement game.
///
/// # Type Parameters
/// - `P`: The position type of the game.
///
/// # Examples
/// ```rust
/// use nogo_mcts::{nogo::Board, Action, Player};
///
/// let mut player = Player::<Board>::new("name=bot role=black seed=1").unwrap();
/// let board = Board::standard();
///
/// let action = player.take_action(&board);
/// assert!(action.apply(&board).is_some());
/// assert_ne!(action, Action::Pass);
/// ```
pub struct Player<P: Position>{
    config: AgentConfig,
    rng: StdRng,
    /// Cell order of the random mode.
    space: Vec<usize>,
    /// Present in search mode only.
    mcts: Option<Mcts<P>>
}

impl<P: Position> Player<P>{
    /// Creates an agent from space-separated `key=value` tokens.
    ///
    /// # Errors
    /// `ConfigError::InvalidName` if the name holds one of `[]():;` or a
    /// space, `ConfigError::InvalidRole` unless the role is `black` or
    /// `white`, and `ConfigError::InvalidSeed` or
    /// `ConfigError::InvalidIterations` for malformed numbers.
    pub fn new(args: &str) -> Result<Self, ConfigError>{
        Ok(Self::from_config(args.parse()?))
    }

    /// Creates an agent from an already validated configuration.
    pub fn from_config(config: AgentConfig) -> Self{
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng()
        };
        let mcts = (config.search == SearchMode::Mcts).then(Mcts::new);

        Player { config, rng, space: Vec::new(), mcts }
    }

    #[inline]
    pub fn name(&self) -> &str{
        &self.config.name
    }

    /// The side played by the agent.
    #[inline]
    pub fn role(&self) -> Side{
        self.config.role
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig{
        &self.config
    }

    /// The search state, in search mode.
    #[inline]
    pub fn tree(&self) -> Option<&Mcts<P>>{
        self.mcts.as_ref()
    }

    /// Returns the stored value of a configuration property.
    ///
    /// # Errors
    /// `ConfigError::UnknownProperty` if `key` was never set.
    #[inline]
    pub fn property(&self, key: &str) -> Result<&str, ConfigError>{
        self.config.property(key)
    }

    /// Overwrites a configuration property from a `key=value` message.
    #[inline]
    pub fn notify(&mut self, message: &str){
        self.config.notify(message);
    }

    /// Chooses the agent's move in `position`.
    ///
    /// # Returns
    /// A legal placement for the agent's side, or `Action::Pass` if there is none.
    pub fn take_action(&mut self, position: &P) -> Action{
        let side = self.config.role;

        let cell = match self.mcts.as_mut() {
            Some(mcts) => mcts.search(position, side, &self.config.budget, &mut self.rng),
            None => {
                utils::fill_order(&mut self.space, position.cell_count());
                utils::random_placement(&mut position.clone(), side, &mut self.space, &mut self.rng)
            }
        };

        match cell {
            Some(cell) => Action::Place { cell, side },
            None => {
                debug!(name = %self.config.name, %side, "passing");
                Action::Pass
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nogo::Board, test_utils::{replay, Strip}};

    #[test]
    fn test_invalid_config(){
        assert_eq!(
            Player::<Board>::new("role=red").err(),
            Some(ConfigError::InvalidRole("red".to_string()))
        );
        assert_eq!(
            Player::<Board>::new("name=a:b role=black").err(),
            Some(ConfigError::InvalidName("a:b".to_string()))
        );
        assert!(Player::<Board>::new("").is_err());
    }

    #[test]
    fn test_properties() -> Result<(), ConfigError>{
        let mut player = Player::<Board>::new("name=alice role=white seed=5")?;

        assert_eq!(player.name(), "alice");
        assert_eq!(player.role(), Side::White);
        assert_eq!(player.property("seed")?, "5");
        assert_eq!(player.property("search"), Err(ConfigError::UnknownProperty("search".to_string())));

        player.notify("search=MCTS");
        assert_eq!(player.property("search")?, "MCTS");
        assert!(player.tree().is_none());
        Ok(())
    }

    #[test]
    fn test_random_game_is_legal() -> Result<(), ConfigError>{
        let mut black = Player::<Board>::new("role=black seed=1")?;
        let mut white = Player::<Board>::new("role=white seed=2")?;
        let mut board = Board::standard();
        let mut moves = 0;

        loop {
            let player = if moves % 2 == 0 { &mut black } else { &mut white };
            let action = player.take_action(&board);

            match action.apply(&board) {
                _ if action == Action::Pass => break,
                Some(after) => board = after,
                None => panic!("illegal action {} on\n{}", action, board)
            }
            moves += 1;
        }

        let loser = if moves % 2 == 0 { Side::Black } else { Side::White };
        assert!(moves > 0);
        assert_eq!(board.legal_count(loser), 0);
        Ok(())
    }

    #[test]
    fn test_random_mode_is_seeded() -> Result<(), ConfigError>{
        let board = Board::standard();
        let mut first = Player::<Board>::new("role=black seed=77")?;
        let mut second = Player::<Board>::new("role=black seed=77")?;

        for _ in 0..10 {
            assert_eq!(first.take_action(&board), second.take_action(&board));
        }
        Ok(())
    }

    #[test]
    fn test_pass_without_legal_move() -> Result<(), ConfigError>{
        let blocked = replay(Strip::new(3), Side::White, &[1]);

        let mut random = Player::<Strip>::new("role=black seed=1")?;
        assert_eq!(random.take_action(&blocked), Action::Pass);

        let mut search = Player::<Strip>::new("role=black seed=1 search=MCTS")?;
        assert_eq!(search.take_action(&blocked), Action::Pass);
        assert_eq!(search.tree().map(|mcts| mcts.count_visit()), Some(0));
        Ok(())
    }

    #[test]
    fn test_single_iteration_still_places() -> Result<(), ConfigError>{
        let board = Board::standard();
        let mut player = Player::<Board>::new("role=black seed=1 search=MCTS iterations=1")?;

        let action = player.take_action(&board);
        assert_ne!(action, Action::Pass);
        assert!(action.apply(&board).is_some());
        Ok(())
    }

    #[test]
    fn test_zero_iterations_rejected(){
        assert_eq!(
            Player::<Board>::new("role=black search=MCTS iterations=0").err(),
            Some(ConfigError::InvalidIterations("0".to_string()))
        );
    }

    #[test]
    fn test_search_finds_winning_move() -> Result<(), ConfigError>{
        // three legal cells: the step table gives 50 000 iterations
        let mut player = Player::<Strip>::new("role=white seed=3 search=MCTS")?;

        assert_eq!(player.take_action(&Strip::new(3)), Action::Place { cell: 1, side: Side::White });
        Ok(())
    }

    #[test]
    fn test_search_game_is_legal() -> Result<(), ConfigError>{
        let mut black = Player::<Board>::new("name=mcts role=black seed=4 search=MCTS iterations=400")?;
        let mut white = Player::<Board>::new("role=white seed=5")?;
        let mut board = Board::new(4, 4);
        let mut moves = 0;

        loop {
            let player = if moves % 2 == 0 { &mut black } else { &mut white };
            let action = player.take_action(&board);

            if action == Action::Pass {
                break;
            }
            board = action.apply(&board).expect("legal action");
            moves += 1;
        }

        let loser = if moves % 2 == 0 { Side::Black } else { Side::White };
        assert_eq!(board.legal_count(loser), 0);
        Ok(())
    }
}

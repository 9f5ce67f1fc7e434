//! Game configuration and validation.
//!
//! [`GameConfig`] gathers everything fixed at construction time: board size,
//! teleport links, start tile, dice, budget, heuristic weights and an
//! optional RNG seed. [`GameConfig::build`] checks it and returns a ready
//! [`Game`].

use crate::board::{Board, BoardError, Link, Position};
use crate::constants::{CLASSIC_LINKS, NUM_RINGS, START, TILES_PER_RING};
use crate::dice::Dice;
use crate::game::{Game, Rules};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("start {0} is not on the board")]
    StartOffBoard(Position),

    #[error("start {0} is already the goal")]
    StartOnGoal(Position),

    #[error("{agent} die needs at least one face")]
    EmptyDie { agent: &'static str },

    #[error("turn budget must allow at least one move")]
    NoBudget,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub rings: usize,
    pub tiles_per_ring: usize,
    pub start: Position,
    pub links: Vec<Link>,
    pub rules: Rules,
    /// Seed for the default dice. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rings: NUM_RINGS,
            tiles_per_ring: TILES_PER_RING,
            start: START,
            links: CLASSIC_LINKS.to_vec(),
            rules: Rules::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Validate the configuration and build its board.
    pub fn board(&self) -> Result<Board, ConfigError> {
        let board = Board::new(self.rings, self.tiles_per_ring, &self.links)?;
        if !board.contains(self.start) {
            return Err(ConfigError::StartOffBoard(self.start));
        }
        if board.is_goal(self.start) {
            return Err(ConfigError::StartOnGoal(self.start));
        }
        if self.rules.max_die == 0 {
            return Err(ConfigError::EmptyDie { agent: "MAX" });
        }
        if self.rules.min_die == 0 {
            return Err(ConfigError::EmptyDie { agent: "MIN" });
        }
        if self.rules.turn_budget == 0 {
            return Err(ConfigError::NoBudget);
        }
        Ok(board)
    }

    /// Build a game rolling [`fastrand`] dice.
    pub fn build(&self) -> Result<Game, ConfigError> {
        let rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        self.build_with(rng)
    }

    /// Build a game rolling the given dice.
    pub fn build_with<D: Dice>(&self, dice: D) -> Result<Game<D>, ConfigError> {
        let board = self.board()?;
        log::debug!(
            "board {}x{} with {} links, start {}",
            self.rings,
            self.tiles_per_ring,
            self.links.len(),
            self.start
        );
        Ok(Game::new(board, self.rules, self.start, dice))
    }
}

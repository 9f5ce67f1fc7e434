//! Static position evaluation from MAX's point of view.
//!
//! The score adds four terms:
//! - ring progress: inner rings are worth more
//! - a bonus for standing near a ladder entrance on the same ring
//! - a penalty for standing near a snake entrance on the same ring
//! - on ring 0 only, a bonus that shrinks with the index
//!
//! The goal itself scores `+inf`. MIN uses the exact negation, so the game is
//! zero-sum under this evaluation.

use crate::board::{Board, LinkKind, Position};
use crate::constants::{
    LADDER_RANGE, LADDER_WEIGHT, NO_ENTRANCE, PROXIMITY_BASE, RING_WEIGHT, SNAKE_RANGE,
    SNAKE_WEIGHT,
};

/// Tunable weights of the evaluation. `Default` gives the classic values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weights {
    pub ring: f64,
    pub proximity_base: f64,
    pub ladder: f64,
    pub snake: f64,
    /// Ladders strictly closer than this earn a bonus.
    pub ladder_range: usize,
    /// Snakes strictly closer than this incur a penalty.
    pub snake_range: usize,
    /// Distance used when the ring has no entrance of the wanted kind.
    pub no_entrance: usize,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            ring: RING_WEIGHT,
            proximity_base: PROXIMITY_BASE,
            ladder: LADDER_WEIGHT,
            snake: SNAKE_WEIGHT,
            ladder_range: LADDER_RANGE,
            snake_range: SNAKE_RANGE,
            no_entrance: NO_ENTRANCE,
        }
    }
}

/// Scores positions on one board. Cheap to copy; holds only a reference.
#[derive(Copy, Clone, Debug)]
pub struct Evaluator<'a> {
    board: &'a Board,
    weights: Weights,
}

impl<'a> Evaluator<'a> {
    pub fn new(board: &'a Board, weights: Weights) -> Self {
        Self { board, weights }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Desirability of `position` for MAX.
    pub fn score(&self, position: Position) -> f64 {
        if self.board.is_goal(position) {
            return f64::INFINITY;
        }
        let w = &self.weights;

        let progress = self.board.rings().saturating_sub(position.ring) as f64 * w.ring;

        let ladder = self.nearest(position, LinkKind::Ladder);
        let ladder_bonus = if ladder < w.ladder_range {
            (w.proximity_base - ladder as f64) * w.ladder
        } else {
            0.0
        };

        let snake = self.nearest(position, LinkKind::Snake);
        let snake_penalty = if snake < w.snake_range {
            (w.proximity_base - snake as f64) * w.snake
        } else {
            0.0
        };

        let goal_progress = if position.ring == 0 {
            self.board.tiles_per_ring().saturating_sub(position.index) as f64
        } else {
            0.0
        };

        progress + ladder_bonus - snake_penalty + goal_progress
    }

    /// Desirability of `position` for MIN.
    pub fn min_score(&self, position: Position) -> f64 {
        -self.score(position)
    }

    /// Cyclic distance to the closest entrance of `kind` on the same ring.
    pub fn nearest(&self, position: Position, kind: LinkKind) -> usize {
        self.board
            .entrances(position.ring, kind)
            .map(|index| self.board.ring_distance(position.index, index))
            .min()
            .unwrap_or(self.weights.no_entrance)
    }
}

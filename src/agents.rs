//! Direction policies for the two agents.
//!
//! Both agents pick only a [`Direction`]; the turn engine rolls the die
//! afterwards. Each policy looks one ply ahead, averaging the evaluation of
//! every face of its own die in each direction:
//!
//! - [`MaxPlayer`] rolls a d6 and keeps the direction with the higher mean score.
//! - [`MinPlayer`] rolls a d3 and keeps the direction with the lower mean of the
//!   negated score. From ring 0 it refuses any direction where some roll lands
//!   on the goal; if both are refused it flips a coin.
//!
//! Ties go to the direction enumerated first in [`Direction::ALL`].

use std::fmt;

use crate::board::{Direction, Position};
use crate::dice::Dice;
use crate::heuristic::Evaluator;

/// The two sides of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Agent {
    Max,
    Min,
}

impl Agent {
    pub fn opponent(self) -> Self {
        match self {
            Agent::Max => Agent::Min,
            Agent::Min => Agent::Max,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Max => write!(f, "MAX"),
            Agent::Min => write!(f, "MIN"),
        }
    }
}

/// A direction-choosing strategy.
pub trait Policy {
    fn agent(&self) -> Agent;

    /// Pick a direction from `position`. `dice` is only consulted for
    /// explicitly randomized branches, never to peek at the coming roll.
    fn choose_direction<D: Dice + ?Sized>(&self, position: Position, dice: &mut D) -> Direction;
}

/// Mean of `f` over every face of a `faces`-sided die in one direction.
fn expectation(
    eval: &Evaluator<'_>,
    position: Position,
    direction: Direction,
    faces: u32,
    f: impl Fn(Position) -> f64,
) -> f64 {
    let board = eval.board();
    let total: f64 = (1..=faces)
        .map(|roll| f(board.transition(position, direction, roll)))
        .sum();
    total / faces as f64
}

/// The maximizing agent.
#[derive(Copy, Clone, Debug)]
pub struct MaxPlayer<'a> {
    eval: Evaluator<'a>,
    faces: u32,
}

impl<'a> MaxPlayer<'a> {
    pub fn new(eval: Evaluator<'a>, faces: u32) -> Self {
        Self { eval, faces }
    }

    /// Mean score over MAX's die when moving in `direction`.
    pub fn expected_value(&self, position: Position, direction: Direction) -> f64 {
        expectation(&self.eval, position, direction, self.faces, |p| {
            self.eval.score(p)
        })
    }
}

impl Policy for MaxPlayer<'_> {
    fn agent(&self) -> Agent {
        Agent::Max
    }

    fn choose_direction<D: Dice + ?Sized>(&self, position: Position, _dice: &mut D) -> Direction {
        let mut best: Option<(Direction, f64)> = None;
        for direction in Direction::ALL {
            let value = self.expected_value(position, direction);
            log::debug!("MAX at {position}: {direction} expects {value:.2}");
            match best {
                Some((_, v)) if value <= v => {}
                _ => best = Some((direction, value)),
            }
        }
        best.map_or(Direction::Clockwise, |(d, _)| d)
    }
}

/// The minimizing agent.
#[derive(Copy, Clone, Debug)]
pub struct MinPlayer<'a> {
    eval: Evaluator<'a>,
    faces: u32,
}

impl<'a> MinPlayer<'a> {
    pub fn new(eval: Evaluator<'a>, faces: u32) -> Self {
        Self { eval, faces }
    }

    /// Whether some roll in `direction` would put the token on the goal.
    ///
    /// Only applies from ring 0.
    pub fn hands_over_goal(&self, position: Position, direction: Direction) -> bool {
        let board = self.eval.board();
        position.ring == 0
            && (1..=self.faces).any(|roll| board.is_goal(board.transition(position, direction, roll)))
    }

    /// Mean negated score over MIN's die, or `None` if the direction is
    /// disqualified.
    pub fn expected_value(&self, position: Position, direction: Direction) -> Option<f64> {
        if self.hands_over_goal(position, direction) {
            return None;
        }
        Some(expectation(&self.eval, position, direction, self.faces, |p| {
            self.eval.min_score(p)
        }))
    }
}

impl Policy for MinPlayer<'_> {
    fn agent(&self) -> Agent {
        Agent::Min
    }

    fn choose_direction<D: Dice + ?Sized>(&self, position: Position, dice: &mut D) -> Direction {
        let mut best: Option<(Direction, f64)> = None;
        for direction in Direction::ALL {
            let Some(value) = self.expected_value(position, direction) else {
                log::debug!("MIN at {position}: {direction} could reach the goal, skipped");
                continue;
            };
            log::debug!("MIN at {position}: {direction} expects {value:.2}");
            match best {
                Some((_, v)) if value >= v => {}
                _ => best = Some((direction, value)),
            }
        }

        match best {
            Some((direction, _)) => direction,
            None => {
                let [a, b] = Direction::ALL;
                let direction = if dice.flip() { a } else { b };
                log::debug!("MIN at {position}: every direction reaches the goal, picked {direction}");
                direction
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Link};
    use crate::dice::Loaded;
    use crate::heuristic::Weights;

    #[test]
    fn test_opponent() {
        assert_eq!(Agent::Max.opponent(), Agent::Min);
        assert_eq!(Agent::Min.opponent(), Agent::Max);

        let board = Board::classic();
        let eval = Evaluator::new(&board, Weights::default());
        assert_eq!(MaxPlayer::new(eval, 6).agent(), Agent::Max);
        assert_eq!(MinPlayer::new(eval, 3).agent(), Agent::Min);
    }

    #[test]
    fn test_max_prefers_nearby_ladder() {
        let links = [Link::new(Position::new(2, 2), Position::new(1, 2))];
        let board = Board::new(3, 10, &links).unwrap();
        let max = MaxPlayer::new(Evaluator::new(&board, Weights::default()), 6);
        let start = Position::new(2, 0);

        // cw: 77 + 100 + 77 + 74 + 71 + 50, ccw: 71 + 50 + 50 + 50 + 71 + 74
        assert_eq!(max.expected_value(start, Direction::Clockwise), 449.0 / 6.0);
        assert_eq!(max.expected_value(start, Direction::CounterClockwise), 366.0 / 6.0);
        let mut dice = Loaded::new([1]);
        assert_eq!(max.choose_direction(start, &mut dice), Direction::Clockwise);
    }

    #[test]
    fn test_max_tie_keeps_clockwise() {
        let board = Board::new(2, 10, &[]).unwrap();
        let max = MaxPlayer::new(Evaluator::new(&board, Weights::default()), 6);
        let mut dice = Loaded::new([1]);
        assert_eq!(
            max.choose_direction(Position::new(1, 3), &mut dice),
            Direction::Clockwise
        );
    }

    #[test]
    fn test_min_skips_direction_reaching_goal() {
        let board = Board::new(1, 10, &[]).unwrap();
        let min = MinPlayer::new(Evaluator::new(&board, Weights::default()), 3);
        let at = Position::new(0, 2);
        assert!(min.hands_over_goal(at, Direction::CounterClockwise));
        assert!(!min.hands_over_goal(at, Direction::Clockwise));
        assert_eq!(min.expected_value(at, Direction::CounterClockwise), None);
        let mut dice = Loaded::new([1]);
        assert_eq!(min.choose_direction(at, &mut dice), Direction::Clockwise);
    }

    #[test]
    fn test_min_prefers_lower_negated_score() {
        let board = Board::new(1, 10, &[]).unwrap();
        let min = MinPlayer::new(Evaluator::new(&board, Weights::default()), 3);
        let at = Position::new(0, 6);
        // cw lands on 7,8,9 (scores 53,52,51), ccw on 5,4,3 (55,56,57)
        assert_eq!(min.expected_value(at, Direction::Clockwise), Some(-52.0));
        assert_eq!(min.expected_value(at, Direction::CounterClockwise), Some(-56.0));
        let mut dice = Loaded::new([1]);
        assert_eq!(min.choose_direction(at, &mut dice), Direction::CounterClockwise);
    }

    #[test]
    fn test_min_fallback_uses_coin() {
        let board = Board::new(1, 5, &[]).unwrap();
        let min = MinPlayer::new(Evaluator::new(&board, Weights::default()), 3);
        let at = Position::new(0, 2);
        let mut dice = Loaded::with_flips([1], [true, false]);
        assert_eq!(min.choose_direction(at, &mut dice), Direction::Clockwise);
        assert_eq!(min.choose_direction(at, &mut dice), Direction::CounterClockwise);
    }

    #[test]
    fn test_disqualification_only_on_ring_zero() {
        // a ladder straight to the goal from ring 1 does not disqualify
        let links = [Link::new(Position::new(1, 1), Position::new(0, 0))];
        let board = Board::new(2, 10, &links).unwrap();
        let min = MinPlayer::new(Evaluator::new(&board, Weights::default()), 3);
        assert!(!min.hands_over_goal(Position::new(1, 0), Direction::Clockwise));
    }
}

//! The turn engine: whose turn it is, what ends the game, and who won.
//!
//! A [`Game`] owns the immutable [`Board`], the token's position and the
//! injected [`Dice`]. Each call to [`Game::advance_turn`] resolves exactly one
//! move:
//!
//! 1. the active agent's policy picks a direction,
//! 2. the engine rolls that agent's die,
//! 3. the board resolves the move (following at most one teleport),
//! 4. the engine checks for the goal and the turn budget.
//!
//! MAX moves first. The MAX-move counter starts at 1 and is bumped each time
//! MIN hands the turn back; once it exceeds the budget MIN wins.

use std::fmt;

use crate::agents::{Agent, MaxPlayer, MinPlayer, Policy};
use crate::board::{Board, Direction, Position};
use crate::constants::{MAX_DIE_FACES, MIN_DIE_FACES, TURN_BUDGET};
use crate::dice::Dice;
use crate::heuristic::{Evaluator, Weights};

/// Dice sizes, budget and evaluation weights for one game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rules {
    pub max_die: u32,
    pub min_die: u32,
    /// MAX moves allowed before MIN wins.
    pub turn_budget: u32,
    pub weights: Weights,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_die: MAX_DIE_FACES,
            min_die: MIN_DIE_FACES,
            turn_budget: TURN_BUDGET,
            weights: Weights::default(),
        }
    }
}

impl Rules {
    /// Faces on the die `agent` rolls.
    pub fn faces(&self, agent: Agent) -> u32 {
        match agent {
            Agent::Max => self.max_die,
            Agent::Min => self.min_die,
        }
    }
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// MAX landed on the goal after `moves` of its own moves.
    MaxWin { moves: u32 },
    /// MIN's own move put the token on the goal.
    MaxWinBySabotage { moves: u32 },
    /// MAX used up its budget without reaching the goal.
    MinWin { budget: u32 },
}

impl Outcome {
    pub fn winner(&self) -> Agent {
        match self {
            Outcome::MaxWin { .. } | Outcome::MaxWinBySabotage { .. } => Agent::Max,
            Outcome::MinWin { .. } => Agent::Min,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::MaxWin { moves } => {
                write!(f, "MAX wins by reaching the goal in {moves} moves!")
            }
            Outcome::MaxWinBySabotage { .. } => {
                write!(f, "MAX wins (unexpectedly) after MIN's sabotage!")
            }
            Outcome::MinWin { budget } => {
                write!(f, "MIN wins! MAX failed to reach the goal within {budget} moves.")
            }
        }
    }
}

/// State-machine phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    MaxTurn,
    MinTurn,
    GameOver(Outcome),
}

impl Phase {
    /// The agent to move, or `None` once the game is over.
    pub fn active(&self) -> Option<Agent> {
        match self {
            Phase::MaxTurn => Some(Agent::Max),
            Phase::MinTurn => Some(Agent::Min),
            Phase::GameOver(_) => None,
        }
    }
}

/// One resolved move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub agent: Agent,
    pub direction: Direction,
    pub roll: u32,
    pub from: Position,
    /// Tile reached by walking, before any teleport.
    pub landed: Position,
    pub to: Position,
}

impl Move {
    pub fn teleported(&self) -> bool {
        self.landed != self.to
    }
}

/// Read-only view of the game for presentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub position: Position,
    pub phase: Phase,
    /// The MAX-move counter (1 on MAX's first move).
    pub turn: u32,
    pub last_move: Option<Move>,
}

impl Snapshot {
    pub fn active(&self) -> Option<Agent> {
        self.phase.active()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Ask `policy` for a direction and log who chose what.
fn decide<P: Policy, D: Dice>(policy: P, position: Position, dice: &mut D) -> Direction {
    let direction = policy.choose_direction(position, dice);
    log::debug!("{} chooses {direction} at {position}", policy.agent());
    direction
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over: {0}")]
    GameOver(Outcome),
}

/// A game in progress.
pub struct Game<D: Dice = fastrand::Rng> {
    board: Board,
    rules: Rules,
    start: Position,
    position: Position,
    phase: Phase,
    max_moves: u32,
    last_move: Option<Move>,
    dice: D,
}

impl<D: Dice> Game<D> {
    /// Start a game. Inputs are expected to be validated by
    /// [`GameConfig`](crate::config::GameConfig).
    pub(crate) fn new(board: Board, rules: Rules, start: Position, dice: D) -> Self {
        Self {
            board,
            rules,
            start,
            position: start,
            phase: Phase::MaxTurn,
            max_moves: 1,
            last_move: None,
            dice,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.max_moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.board, self.rules.weights)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            phase: self.phase,
            turn: self.max_moves,
            last_move: self.last_move,
        }
    }

    /// Put the token back on the start tile and give MAX the first move.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.phase = Phase::MaxTurn;
        self.max_moves = 1;
        self.last_move = None;
    }

    /// Resolve one move for the active agent.
    pub fn advance_turn(&mut self) -> Result<Snapshot, GameError> {
        let agent = match self.phase {
            Phase::MaxTurn => Agent::Max,
            Phase::MinTurn => Agent::Min,
            Phase::GameOver(outcome) => return Err(GameError::GameOver(outcome)),
        };

        let eval = Evaluator::new(&self.board, self.rules.weights);
        let faces = self.rules.faces(agent);
        let direction = match agent {
            Agent::Max => decide(MaxPlayer::new(eval, faces), self.position, &mut self.dice),
            Agent::Min => decide(MinPlayer::new(eval, faces), self.position, &mut self.dice),
        };
        let roll = self.dice.roll(faces);

        let from = self.position;
        let landed = self.board.step(from, direction, roll);
        let to = self.board.transition(from, direction, roll);
        let mv = Move {
            agent,
            direction,
            roll,
            from,
            landed,
            to,
        };
        if mv.teleported() {
            log::info!("{agent} rolls {roll} {direction}: {from} -> {landed} -> {to}");
        } else {
            log::info!("{agent} rolls {roll} {direction}: {from} -> {to}");
        }
        self.position = to;
        self.last_move = Some(mv);

        self.phase = if self.board.is_goal(to) {
            Phase::GameOver(match agent {
                Agent::Max => Outcome::MaxWin {
                    moves: self.max_moves,
                },
                Agent::Min => Outcome::MaxWinBySabotage {
                    moves: self.max_moves,
                },
            })
        } else {
            match agent.opponent() {
                Agent::Min => Phase::MinTurn,
                Agent::Max => {
                    self.max_moves += 1;
                    if self.max_moves > self.rules.turn_budget {
                        Phase::GameOver(Outcome::MinWin {
                            budget: self.rules.turn_budget,
                        })
                    } else {
                        Phase::MaxTurn
                    }
                }
            }
        };

        if let Phase::GameOver(outcome) = self.phase {
            log::info!("{outcome}");
        }
        Ok(self.snapshot())
    }

    /// Advance until the game ends, returning the outcome.
    pub fn run_to_end(&mut self) -> Outcome {
        loop {
            match self.advance_turn() {
                Ok(snapshot) => {
                    if let Some(outcome) = snapshot.outcome() {
                        return outcome;
                    }
                }
                Err(GameError::GameOver(outcome)) => return outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Loaded;

    fn game(rings: usize, tiles: usize, start: Position, rolls: &[u32]) -> Game<Loaded> {
        let board = Board::new(rings, tiles, &[]).unwrap();
        Game::new(board, Rules::default(), start, Loaded::new(rolls.to_vec()))
    }

    #[test]
    fn test_initial_state() {
        let g = game(3, 10, Position::new(2, 0), &[1]);
        let s = g.snapshot();
        assert_eq!(s.phase, Phase::MaxTurn);
        assert_eq!(s.turn, 1);
        assert_eq!(s.position, Position::new(2, 0));
        assert_eq!(s.last_move, None);
        assert_eq!(s.active(), Some(Agent::Max));
    }

    #[test]
    fn test_turns_alternate_and_counter_bumps_after_min() {
        let mut g = game(3, 10, Position::new(2, 0), &[2]);
        let s = g.advance_turn().unwrap();
        assert_eq!(s.phase, Phase::MinTurn);
        assert_eq!(s.turn, 1);
        let mv = s.last_move.unwrap();
        assert_eq!(mv.agent, Agent::Max);
        assert_eq!(mv.roll, 2);

        let s = g.advance_turn().unwrap();
        assert_eq!(s.phase, Phase::MaxTurn);
        assert_eq!(s.turn, 2);
        assert_eq!(s.last_move.unwrap().agent, Agent::Min);
    }

    #[test]
    fn test_min_rolls_its_own_die() {
        // a scripted 6 wraps to 3 on MIN's d3
        let mut g = game(3, 10, Position::new(2, 0), &[6]);
        g.advance_turn().unwrap();
        let s = g.advance_turn().unwrap();
        assert_eq!(s.last_move.unwrap().roll, 3);
    }

    #[test]
    fn test_max_reaching_goal_wins() {
        // rings=1: from (0,5) both directions can reach the goal, tie -> cw
        let mut g = game(1, 10, Position::new(0, 5), &[5]);
        let s = g.advance_turn().unwrap();
        assert_eq!(s.position, Position::new(0, 0));
        assert_eq!(s.outcome(), Some(Outcome::MaxWin { moves: 1 }));
        assert!(g.is_over());
    }

    #[test]
    fn test_min_sabotage_counts_as_max_win() {
        // 5 tiles: MIN at (0,2) is disqualified both ways, heads -> cw,
        // roll 3 lands on (0,0)
        let board = Board::new(1, 5, &[]).unwrap();
        let mut g = Game::new(board, Rules::default(), Position::new(0, 1), Loaded::new([1, 3]));
        let s = g.advance_turn().unwrap();
        assert_eq!(s.position, Position::new(0, 2));
        let s = g.advance_turn().unwrap();
        assert_eq!(s.outcome(), Some(Outcome::MaxWinBySabotage { moves: 1 }));
        assert_eq!(s.outcome().unwrap().winner(), Agent::Max);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut g = game(2, 10, Position::new(1, 0), &[1]);
        for _ in 0..19 {
            let s = g.advance_turn().unwrap();
            assert!(s.outcome().is_none());
        }
        let s = g.advance_turn().unwrap();
        assert_eq!(s.outcome(), Some(Outcome::MinWin { budget: 10 }));
        assert_eq!(s.turn, 11);
    }

    #[test]
    fn test_advance_after_game_over_fails() {
        let mut g = game(1, 10, Position::new(0, 5), &[5]);
        let outcome = g.run_to_end();
        assert_eq!(
            g.advance_turn(),
            Err(GameError::GameOver(outcome))
        );
    }

    #[test]
    fn test_reset_restores_start() {
        let mut g = game(1, 10, Position::new(0, 5), &[5]);
        g.run_to_end();
        g.reset();
        assert_eq!(g.phase(), Phase::MaxTurn);
        assert_eq!(g.position(), Position::new(0, 5));
        assert_eq!(g.turn(), 1);
        assert_eq!(g.last_move(), None);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            Outcome::MaxWin { moves: 4 }.to_string(),
            "MAX wins by reaching the goal in 4 moves!"
        );
        assert_eq!(
            Outcome::MinWin { budget: 10 }.to_string(),
            "MIN wins! MAX failed to reach the goal within 10 moves."
        );
    }
}

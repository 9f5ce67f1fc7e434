//! Default board layout, dice, turn budget and heuristic weights.
//!
//! Everything here is a default: [`GameConfig`](crate::config::GameConfig)
//! and [`Weights`](crate::heuristic::Weights) copy these values and can
//! override any of them before a game is built.

use crate::board::{Link, Position};

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of concentric rings. Ring 0 is the innermost ring.
pub const NUM_RINGS: usize = 3;

/// Tiles on every ring.
pub const TILES_PER_RING: usize = 10;

/// The single goal tile at the center of the spiral.
pub const GOAL: Position = Position::new(0, 0);

/// Where the token starts: index 0 of the outermost ring.
pub const START: Position = Position::new(NUM_RINGS - 1, 0);

/// Teleport links of the classic board.
///
/// Two snakes (`(0,4)` and `(1,2)` send the token outward) and three ladders.
pub const CLASSIC_LINKS: [Link; 5] = [
    Link::new(Position::new(0, 4), Position::new(1, 5)),
    Link::new(Position::new(1, 2), Position::new(2, 3)),
    Link::new(Position::new(2, 6), Position::new(1, 7)),
    Link::new(Position::new(2, 9), Position::new(1, 0)),
    Link::new(Position::new(1, 8), Position::new(0, 7)),
];

// =============================================================================
// Dice and Turn Budget
// =============================================================================

/// Faces on MAX's die (rolls `1..=6`).
pub const MAX_DIE_FACES: u32 = 6;

/// Faces on MIN's die (rolls `1..=3`).
pub const MIN_DIE_FACES: u32 = 3;

/// MAX moves allowed before MIN wins by default.
pub const TURN_BUDGET: u32 = 10;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Points per ring of progress toward the center.
pub const RING_WEIGHT: f64 = 50.0;

/// Distance bonuses and penalties are `(PROXIMITY_BASE - distance) * weight`.
pub const PROXIMITY_BASE: f64 = 10.0;

/// Multiplier for the ladder bonus.
pub const LADDER_WEIGHT: f64 = 3.0;

/// Multiplier for the snake penalty.
pub const SNAKE_WEIGHT: f64 = 5.0;

/// Ladder entrances closer than this earn a bonus.
pub const LADDER_RANGE: usize = 4;

/// Snake entrances closer than this incur a penalty.
pub const SNAKE_RANGE: usize = 3;

/// Distance reported when a ring has no entrance of the wanted kind.
pub const NO_ENTRANCE: usize = 999;

// =============================================================================
// Presentation
// =============================================================================

/// Pause between turns when the game plays itself.
pub const AUTO_DELAY_MS: u64 = 500;

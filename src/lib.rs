//! Spiral Snakes & Ladders: a two-agent expected-value board simulation.
//!
//! A single token sits on a board of concentric rings. MAX wants to bring it
//! to the goal tile `(0,0)` at the center within a turn budget; MIN wants to
//! stop that. Each turn the active agent picks a direction by averaging a
//! heuristic over its die, then the engine rolls and moves the token, which
//! may be redirected by a snake or ladder.
//!
//! ## Modules
//!
//! - [`constants`] - Default board, dice, budget and heuristic weights
//! - [`board`] - Coordinates, teleport links and the move rule
//! - [`heuristic`] - Static evaluation of a tile for MAX
//! - [`agents`] - MAX and MIN direction policies
//! - [`dice`] - Injectable random sources
//! - [`game`] - The turn engine and its snapshots
//! - [`config`] - Validated game construction
//! - [`render`] - Plain-text board and status
//! - [`console`] - Command console for manual stepping
//!
//! ## Example
//!
//! ```
//! use spiral_ladders::config::GameConfig;
//!
//! let config = GameConfig { seed: Some(1), ..GameConfig::default() };
//! let mut game = config.build().unwrap();
//!
//! // Resolve MAX's first move
//! let snapshot = game.advance_turn().unwrap();
//! println!("MAX moved to {}", snapshot.position);
//!
//! // Play out the rest
//! println!("{}", game.run_to_end());
//! ```

pub mod agents;
pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod dice;
pub mod game;
pub mod heuristic;
pub mod render;

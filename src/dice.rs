//! Random sources for the turn engine.
//!
//! The engine never touches a global generator: it owns a [`Dice`] and hands
//! it to MIN's policy for the coin flip in its fallback. [`fastrand::Rng`] is
//! the production source; [`Loaded`] replays a fixed script for tests and
//! demos.

/// A source of die rolls and fair coin flips.
pub trait Dice {
    /// Roll a die with `faces` sides, returning a value in `1..=faces`.
    fn roll(&mut self, faces: u32) -> u32;

    /// A fair coin flip.
    fn flip(&mut self) -> bool;
}

impl Dice for fastrand::Rng {
    fn roll(&mut self, faces: u32) -> u32 {
        self.u32(1..=faces)
    }

    fn flip(&mut self) -> bool {
        self.bool()
    }
}

/// Scripted dice that cycle through fixed rolls and flips.
///
/// Rolls larger than the requested die wrap around so the result always
/// stays in `1..=faces`.
#[derive(Clone, Debug)]
pub struct Loaded {
    rolls: Vec<u32>,
    flips: Vec<bool>,
    next_roll: usize,
    next_flip: usize,
}

impl Loaded {
    /// Replay `rolls` in order, starting over when exhausted. Flips are always heads.
    pub fn new(rolls: impl Into<Vec<u32>>) -> Self {
        Self::with_flips(rolls, [true])
    }

    pub fn with_flips(rolls: impl Into<Vec<u32>>, flips: impl Into<Vec<bool>>) -> Self {
        let mut rolls = rolls.into();
        if rolls.is_empty() {
            rolls.push(1);
        }
        let mut flips = flips.into();
        if flips.is_empty() {
            flips.push(true);
        }
        Self {
            rolls,
            flips,
            next_roll: 0,
            next_flip: 0,
        }
    }
}

impl Dice for Loaded {
    fn roll(&mut self, faces: u32) -> u32 {
        let raw = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        (raw.max(1) - 1) % faces.max(1) + 1
    }

    fn flip(&mut self) -> bool {
        let heads = self.flips[self.next_flip % self.flips.len()];
        self.next_flip += 1;
        heads
    }
}

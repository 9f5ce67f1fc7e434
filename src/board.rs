//! Spiral board topology: coordinates, teleport links and the move rule.
//!
//! The board is a stack of concentric rings. Every ring holds the same number
//! of tiles and a tile's index wraps around its ring. Some tiles carry a
//! teleport link to another tile: a *ladder* pulls the token toward the
//! center, a *snake* pushes it outward.
//!
//! A [`Board`] is built once from its ring/tile counts and link table and is
//! never mutated afterwards, so agents can evaluate hypothetical moves against
//! it freely.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{CLASSIC_LINKS, GOAL, NUM_RINGS, TILES_PER_RING};

/// A tile coordinate: ring (0 = innermost) and index within the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub ring: usize,
    pub index: usize,
}

impl Position {
    pub const fn new(ring: usize, index: usize) -> Self {
        Self { ring, index }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.ring, self.index)
    }
}

/// Error returned when a coordinate string is not of the form `ring,index`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position '{0}', expected 'ring,index'")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse `"r,i"`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (ring, index) = inner.split_once(',').ok_or_else(err)?;
        let ring = ring.trim().parse().map_err(|_| err())?;
        let index = index.trim().parse().map_err(|_| err())?;
        Ok(Position::new(ring, index))
    }
}

/// Rotational sense of a move along a ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Enumeration order. Policies break ties in favor of the earlier entry.
    pub const ALL: [Direction; 2] = [Direction::Clockwise, Direction::CounterClockwise];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => write!(f, "CW"),
            Direction::CounterClockwise => write!(f, "CCW"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction '{0}', expected 'cw' or 'ccw'")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cw" | "clockwise" => Ok(Direction::Clockwise),
            "ccw" | "counter-clockwise" | "counterclockwise" => Ok(Direction::CounterClockwise),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// What a teleport link does to the token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Target is on a strictly inner ring.
    Ladder,
    /// Target is on a strictly outer ring.
    Snake,
    /// Target is on the same ring.
    Lateral,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Ladder => write!(f, "ladder"),
            LinkKind::Snake => write!(f, "snake"),
            LinkKind::Lateral => write!(f, "portal"),
        }
    }
}

/// A teleport link from one tile to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub from: Position,
    pub to: Position,
}

impl Link {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    pub fn kind(&self) -> LinkKind {
        link_kind(self.from, self.to)
    }
}

fn link_kind(from: Position, to: Position) -> LinkKind {
    use std::cmp::Ordering;
    match to.ring.cmp(&from.ring) {
        Ordering::Less => LinkKind::Ladder,
        Ordering::Greater => LinkKind::Snake,
        Ordering::Equal => LinkKind::Lateral,
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid link '{0}', expected 'ring,index:ring,index'")]
pub struct ParseLinkError(String);

impl FromStr for Link {
    type Err = ParseLinkError;

    /// Parse `"r,i:r,i"` (source first).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLinkError(s.to_string());
        let (from, to) = s.split_once(':').ok_or_else(err)?;
        let from = from.parse().map_err(|_| err())?;
        let to = to.parse().map_err(|_| err())?;
        Ok(Link::new(from, to))
    }
}

/// One cell of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub position: Position,
    /// Where landing on this tile sends the token, if anywhere.
    pub target: Option<Position>,
}

impl Tile {
    pub fn kind(&self) -> Option<LinkKind> {
        self.target.map(|to| link_kind(self.position, to))
    }
}

/// Reasons a board refuses to build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("a board needs at least one ring")]
    NoRings,

    #[error("a ring needs at least one tile")]
    NoTiles,

    #[error("link {link} points outside the board at {position}")]
    OutOfBounds { link: Link, position: Position },

    #[error("link at {0} teleports onto itself")]
    SelfLoop(Position),

    #[error("tile {0} has more than one link")]
    DuplicateSource(Position),
}

/// The complete, immutable game board.
#[derive(Clone, Debug)]
pub struct Board {
    rings: usize,
    tiles_per_ring: usize,
    tiles: BTreeMap<Position, Tile>,
}

impl Board {
    /// Build a board, validating every link.
    pub fn new(rings: usize, tiles_per_ring: usize, links: &[Link]) -> Result<Self, BoardError> {
        if rings == 0 {
            return Err(BoardError::NoRings);
        }
        if tiles_per_ring == 0 {
            return Err(BoardError::NoTiles);
        }

        let mut tiles: BTreeMap<Position, Tile> = (0..rings)
            .flat_map(|ring| (0..tiles_per_ring).map(move |index| Position::new(ring, index)))
            .map(|position| (position, Tile { position, target: None }))
            .collect();

        for &link in links {
            for position in [link.from, link.to] {
                if position.ring >= rings || position.index >= tiles_per_ring {
                    return Err(BoardError::OutOfBounds { link, position });
                }
            }
            if link.from == link.to {
                return Err(BoardError::SelfLoop(link.from));
            }
            // Every position was inserted above and bounds are checked.
            let Some(tile) = tiles.get_mut(&link.from) else {
                return Err(BoardError::OutOfBounds { link, position: link.from });
            };
            if tile.target.is_some() {
                return Err(BoardError::DuplicateSource(link.from));
            }
            tile.target = Some(link.to);
        }

        Ok(Self {
            rings,
            tiles_per_ring,
            tiles,
        })
    }

    /// The default 3x10 board with its two snakes and three ladders.
    pub fn classic() -> Self {
        Self::new(NUM_RINGS, TILES_PER_RING, &CLASSIC_LINKS).expect("classic board is valid")
    }

    pub fn rings(&self) -> usize {
        self.rings
    }

    pub fn tiles_per_ring(&self) -> usize {
        self.tiles_per_ring
    }

    pub fn goal(&self) -> Position {
        GOAL
    }

    pub fn is_goal(&self, position: Position) -> bool {
        position == GOAL
    }

    pub fn contains(&self, position: Position) -> bool {
        position.ring < self.rings && position.index < self.tiles_per_ring
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// All tiles, ordered by ring then index.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// All teleport links, ordered by source tile.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.tiles
            .values()
            .filter_map(|t| t.target.map(|to| Link::new(t.position, to)))
    }

    /// Indices on `ring` whose tile is an entrance of the given kind.
    pub fn entrances(&self, ring: usize, kind: LinkKind) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .range(Position::new(ring, 0)..Position::new(ring + 1, 0))
            .filter(move |(_, tile)| tile.kind() == Some(kind))
            .map(|(p, _)| p.index)
    }

    /// Shortest cyclic distance between two indices on the same ring.
    pub fn ring_distance(&self, a: usize, b: usize) -> usize {
        let t = self.tiles_per_ring;
        let forward = (b + t - a % t) % t;
        let backward = (a + t - b % t) % t;
        forward.min(backward)
    }

    /// Walk `steps` tiles along the ring without resolving teleports.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero or `position` is not on the board.
    pub fn step(&self, position: Position, direction: Direction, steps: u32) -> Position {
        assert!(steps > 0, "step count must be positive");
        assert!(self.contains(position), "{position} is not on the board");

        let t = self.tiles_per_ring;
        let steps = steps as usize % t;
        let index = match direction {
            Direction::Clockwise => (position.index + steps) % t,
            Direction::CounterClockwise => (position.index + t - steps) % t,
        };
        Position::new(position.ring, index)
    }

    /// Where a move of `steps` tiles ends, after at most one teleport.
    ///
    /// A link landing on another link's entrance is not followed further.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero or `position` is not on the board.
    pub fn transition(&self, position: Position, direction: Direction, steps: u32) -> Position {
        let landed = self.step(position, direction, steps);
        match self.tiles.get(&landed).and_then(|t| t.target) {
            Some(target) => {
                log::trace!("{landed} teleports to {target}");
                target
            }
            None => landed,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::board(self, None))
    }
}

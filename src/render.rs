//! Plain-text rendering of the board and the status line.
//!
//! Rings are drawn outermost first, one row each. Every tile shows its index;
//! the token's tile is bracketed and link entrances carry a marker:
//! `^` ladder, `v` snake, `~` same-ring portal.

use std::fmt::Write;

use crate::board::{Board, LinkKind, Position};
use crate::game::Snapshot;

fn marker(kind: Option<LinkKind>) -> char {
    match kind {
        Some(LinkKind::Ladder) => '^',
        Some(LinkKind::Snake) => 'v',
        Some(LinkKind::Lateral) => '~',
        None => ' ',
    }
}

/// Draw the board, bracketing `token` if given.
pub fn board(board: &Board, token: Option<Position>) -> String {
    let mut out = String::new();
    let width = board.tiles_per_ring().saturating_sub(1).to_string().len() + 3;

    for ring in (0..board.rings()).rev() {
        let _ = write!(out, "ring {ring}:");
        for index in 0..board.tiles_per_ring() {
            let position = Position::new(ring, index);
            let kind = board.tile(position).and_then(|t| t.kind());
            let cell = if Some(position) == token {
                format!("[{index}{}]", marker(kind))
            } else {
                format!(" {index}{} ", marker(kind))
            };
            let _ = write!(out, " {cell:>width$}");
        }
        out.push('\n');
    }

    for (label, kind) in [("ladders", LinkKind::Ladder), ("snakes", LinkKind::Snake)] {
        let links: Vec<String> = board
            .links()
            .filter(|l| l.kind() == kind)
            .map(|l| l.to_string())
            .collect();
        if !links.is_empty() {
            let _ = writeln!(out, "{label}: {}", links.join(" "));
        }
    }
    out
}

/// Two-line status: turn and player to move, then the last move.
pub fn status(snapshot: &Snapshot) -> String {
    let mut out = match snapshot.active() {
        Some(agent) => format!("Turn: {} | Current Player: {agent}", snapshot.turn),
        None => format!("Turn: {} | Game over", snapshot.turn),
    };
    if let Some(mv) = snapshot.last_move {
        let _ = write!(
            out,
            "\nLast: {}  Roll: {}  Direction: {}  {} -> {}",
            mv.agent, mv.roll, mv.direction, mv.from, mv.to
        );
        if mv.teleported() {
            let _ = write!(out, " (via {})", mv.landed);
        }
    }
    if let Some(outcome) = snapshot.outcome() {
        let _ = write!(out, "\n{outcome}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    #[test]
    fn test_board_marks_token_and_links() {
        let b = Board::classic();
        let text = board(&b, Some(Position::new(2, 0)));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ring 2:"));
        assert!(lines[0].contains("[0 ]"));
        assert!(lines[0].contains("6^"));
        assert!(lines[2].starts_with("ring 0:"));
        assert!(lines[2].contains("4v"));
        assert!(text.contains("ladders: (1,8)->(0,7) (2,6)->(1,7) (2,9)->(1,0)"));
        assert!(text.contains("snakes: (0,4)->(1,5) (1,2)->(2,3)"));
    }

    #[test]
    fn test_status_before_first_move() {
        let s = Snapshot {
            position: Position::new(2, 0),
            phase: Phase::MaxTurn,
            turn: 1,
            last_move: None,
        };
        assert_eq!(status(&s), "Turn: 1 | Current Player: MAX");
    }
}

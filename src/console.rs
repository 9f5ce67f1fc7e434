//! Line-oriented command console for stepping through a game by hand.
//!
//! Each input line is a command, optionally prefixed by a numeric id. The
//! reply starts with `=` on success or `?` on failure, echoes the id, and is
//! followed by a blank line:
//!
//! ```text
//! 3 step
//! =3 Turn: 1 | Current Player: MIN
//! Last: MAX  Roll: 4  Direction: CW  (2,0) -> (2,4)
//! ```
//!
//! ## Supported Commands
//!
//! - `name`, `version` - Identify the engine
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `step [n]` - Resolve `n` moves (default 1)
//! - `run` - Play until the game ends
//! - `show` - Draw the board and status
//! - `status` - Print the status line
//! - `eval <ring,index> [cw|ccw]` - Score a tile and MAX's expected values from it
//! - `reset` - Return the token to the start tile
//! - `quit` - Exit

use std::io::{self, BufRead, Write};

use crate::agents::MaxPlayer;
use crate::board::{Direction, Position};
use crate::dice::Dice;
use crate::game::{Game, GameError, Phase};
use crate::render;

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "eval",
    "known_command",
    "list_commands",
    "name",
    "quit",
    "reset",
    "run",
    "show",
    "status",
    "step",
    "version",
];

/// Console state: the game being stepped.
pub struct Console<D: Dice = fastrand::Rng> {
    game: Game<D>,
}

impl<D: Dice> Console<D> {
    pub fn new(game: Game<D>) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game<D> {
        &self.game
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "step" => {
                let count = match args.first().map(|a| a.parse::<u32>()) {
                    None => 1,
                    Some(Ok(n)) if n > 0 => n,
                    Some(_) => return (false, "invalid step count".to_string()),
                };
                for _ in 0..count {
                    if let Err(e) = self.game.advance_turn() {
                        return (false, e.to_string());
                    }
                    if self.game.is_over() {
                        break;
                    }
                }
                (true, render::status(&self.game.snapshot()))
            }

            "run" => {
                if let Phase::GameOver(outcome) = self.game.phase() {
                    return (false, GameError::GameOver(outcome).to_string());
                }
                let outcome = self.game.run_to_end();
                (true, outcome.to_string())
            }

            "show" => {
                let snapshot = self.game.snapshot();
                let board = render::board(self.game.board(), Some(snapshot.position));
                (true, format!("\n{board}{}", render::status(&snapshot)))
            }

            "status" => (true, render::status(&self.game.snapshot())),

            "eval" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let position = match arg.parse::<Position>() {
                    Ok(p) if self.game.board().contains(p) => p,
                    Ok(p) => return (false, format!("{p} is not on the board")),
                    Err(e) => return (false, e.to_string()),
                };
                let directions = match args.get(1).map(|a| a.parse::<Direction>()) {
                    None => Direction::ALL.to_vec(),
                    Some(Ok(direction)) => vec![direction],
                    Some(Err(e)) => return (false, e.to_string()),
                };
                let eval = self.game.evaluator();
                let max = MaxPlayer::new(eval, self.game.rules().max_die);
                let mut reply = format!("score {:.2}", eval.score(position));
                if !self.game.board().is_goal(position) {
                    for direction in directions {
                        let value = max.expected_value(position, direction);
                        reply.push_str(&format!(" {direction} {value:.2}"));
                    }
                }
                (true, reply)
            }

            "reset" => {
                self.game.reset();
                (true, String::new())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::dice::Loaded;

    fn console(rolls: &[u32]) -> Console<Loaded> {
        let game = GameConfig::default()
            .build_with(Loaded::new(rolls.to_vec()))
            .unwrap();
        Console::new(game)
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Console::<Loaded>::parse_id("123 step");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "step");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Console::<Loaded>::parse_id("step");
        assert_eq!(id, None);
        assert_eq!(cmd, "step");
    }

    #[test]
    fn test_name_command() {
        let mut c = console(&[1]);
        let (success, response) = c.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "spiral-ladders");
    }

    #[test]
    fn test_known_command() {
        let mut c = console(&[1]);
        assert_eq!(c.execute("known_command", &["step"]), (true, "true".to_string()));
        assert_eq!(c.execute("known_command", &["genmove"]), (true, "false".to_string()));
        assert!(!c.execute("known_command", &[]).0);
    }

    #[test]
    fn test_step_and_reset() {
        let mut c = console(&[1]);
        let (success, response) = c.execute("step", &["2"]);
        assert!(success);
        assert!(response.starts_with("Turn: 2 | Current Player: MAX"));
        assert!(response.contains("Last: MIN  Roll: 1"));

        let (success, _) = c.execute("reset", &[]);
        assert!(success);
        assert_eq!(c.game().turn(), 1);
        assert_eq!(c.game().position(), Position::new(2, 0));

        assert!(!c.execute("step", &["0"]).0);
        assert!(!c.execute("step", &["x"]).0);
    }

    #[test]
    fn test_run_then_step_fails() {
        let mut c = console(&[1, 2, 3]);
        let (success, _) = c.execute("run", &[]);
        assert!(success);
        assert!(c.game().is_over());
        let (success, response) = c.execute("step", &[]);
        assert!(!success);
        assert!(response.starts_with("the game is already over"));
        assert!(!c.execute("run", &[]).0);
    }

    #[test]
    fn test_eval() {
        let mut c = console(&[1]);
        let (success, response) = c.execute("eval", &["2,0"]);
        assert!(success);
        assert!(response.starts_with("score 77.00 CW "));
        assert!(!c.execute("eval", &["9,9"]).0);
        assert!(!c.execute("eval", &["nope"]).0);
        assert_eq!(c.execute("eval", &["0,0"]), (true, "score inf".to_string()));
    }

    #[test]
    fn test_eval_single_direction() {
        let mut c = console(&[1]);
        let (success, response) = c.execute("eval", &["2,0", "ccw"]);
        assert!(success);
        assert!(response.starts_with("score 77.00 CCW "));
        assert!(!response.contains(" CW "));

        let (success, response) = c.execute("eval", &["2,0", "up"]);
        assert!(!success);
        assert_eq!(response, "invalid direction 'up', expected 'cw' or 'ccw'");
    }

    #[test]
    fn test_run_loop_framing() {
        let mut c = console(&[1]);
        let input = b"# comment\n\n7 name\nbogus\nquit\nname\n";
        let mut output = Vec::new();
        c.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "=7 spiral-ladders\n\n? unknown command: bogus\n\n= \n\n");
    }
}

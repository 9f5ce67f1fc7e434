//! Spiral Snakes & Ladders on the terminal.
//!
//! ## Usage
//!
//! - `spiral-ladders` - Let the agents play, one turn every 500 ms
//! - `spiral-ladders auto --delay-ms 0` - Same, without pausing
//! - `spiral-ladders console` - Step through the game with typed commands
//!
//! Board options go before the subcommand, e.g.
//! `spiral-ladders --seed 7 --link 2,6:1,7 --link 1,8:0,7 console`.

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use spiral_ladders::board::{Link, Position};
use spiral_ladders::config::GameConfig;
use spiral_ladders::console::Console;
use spiral_ladders::constants::{
    AUTO_DELAY_MS, MAX_DIE_FACES, MIN_DIE_FACES, NUM_RINGS, START, TILES_PER_RING, TURN_BUDGET,
};
use spiral_ladders::game::Game;
use spiral_ladders::render;

/// Spiral Snakes & Ladders: MAX races to the center, MIN stalls
#[derive(Parser)]
#[command(name = "spiral-ladders")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rings
    #[arg(long, default_value_t = NUM_RINGS)]
    rings: usize,

    /// Tiles per ring
    #[arg(long, default_value_t = TILES_PER_RING)]
    tiles: usize,

    /// Start tile as `ring,index`
    #[arg(long, default_value_t = START)]
    start: Position,

    /// Teleport link `ring,index:ring,index`; repeat to add more.
    /// Replaces the classic snakes and ladders when given.
    #[arg(long = "link")]
    links: Vec<Link>,

    /// MAX moves allowed before MIN wins
    #[arg(long, default_value_t = TURN_BUDGET)]
    budget: u32,

    /// Faces on MAX's die
    #[arg(long, default_value_t = MAX_DIE_FACES)]
    max_die: u32,

    /// Faces on MIN's die
    #[arg(long, default_value_t = MIN_DIE_FACES)]
    min_die: u32,

    /// Seed the dice for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Log every move and evaluation
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the whole game, pausing between turns
    Auto {
        /// Pause between turns in milliseconds
        #[arg(long, default_value_t = AUTO_DELAY_MS)]
        delay_ms: u64,
    },
    /// Step through the game with typed commands
    Console,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig {
            rings: self.rings,
            tiles_per_ring: self.tiles,
            start: self.start,
            seed: self.seed,
            ..GameConfig::default()
        };
        if !self.links.is_empty() {
            config.links = self.links.clone();
        }
        config.rules.turn_budget = self.budget;
        config.rules.max_die = self.max_die;
        config.rules.min_die = self.min_die;
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config();
    let game = config.build().context("invalid game configuration")?;

    match cli.command {
        Some(Commands::Console) => {
            let mut console = Console::new(game);
            console
                .run(io::stdin().lock(), io::stdout().lock())
                .context("console I/O failed")?;
        }
        Some(Commands::Auto { delay_ms }) => run_auto(game, delay_ms)?,
        None => run_auto(game, AUTO_DELAY_MS)?,
    }
    Ok(())
}

fn run_auto(mut game: Game, delay_ms: u64) -> anyhow::Result<()> {
    let delay = Duration::from_millis(delay_ms);
    show(&game);

    while !game.is_over() {
        thread::sleep(delay);
        game.advance_turn()?;
        show(&game);
    }
    Ok(())
}

fn show(game: &Game) {
    let snapshot = game.snapshot();
    println!("{}", render::board(game.board(), Some(snapshot.position)));
    println!("{}\n", render::status(&snapshot));
}

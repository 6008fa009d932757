use crate::game_state::{BoardView, DEFAULT_MAX_TURNS, GameConfig, GameEvent, GameInterface};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Duration;

const RULE: &str = "============================";

/// Wheel of Fortune: sustainability edition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited phrase bank file
    #[arg(short = 'i', long = "input")]
    pub phrasebank_path: Option<String>,

    /// Play in the full-screen terminal UI
    #[arg(long)]
    pub tui: bool,

    /// Seed for the wheel and the computer players, for repeatable games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before each computer move, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 0)]
    pub delay_ms: u64,

    /// End a round without a winner after this many turns
    #[arg(long = "max-turns", default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: usize,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            computer_delay: Duration::from_millis(self.delay_ms),
            max_turns: self.max_turns,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Reads one trimmed line. `None` on end of input or a read error.
pub fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn display_menu() {
    println!("{RULE}");
    println!("Welcome to Wheel of Fortune!");
    println!("{RULE}");
    println!("1. Player vs Player");
    println!("2. Player vs AI");
    println!("3. Player vs Random");
    println!("4. Custom Game");
    println!("5. Exit");
    println!("{RULE}");
}

pub fn display_board(board: &BoardView<'_>) {
    println!();
    println!("{RULE}");
    if let Some(player) = board.current_player() {
        println!("{} has ${}", player.name, player.money());
        if !player.prizes().is_empty() {
            println!("Prizes: {}", player.prizes().join(", "));
        }
    }
    println!("Current Phrase:  {}", board.obscured);
    println!("Guessed: {}", board.guessed_list());
}

pub fn display_event(event: &GameEvent) {
    match event {
        GameEvent::RoundStart { .. } => {
            println!();
            println!("{RULE}");
            println!("       GAME START!");
            println!("{RULE}");
            println!("{event}");
        }
        GameEvent::Won { .. } | GameEvent::NoPlayersLeft | GameEvent::TurnLimitReached { .. } => {
            println!();
            println!("{RULE}");
            println!("{event}");
            println!("{RULE}");
            println!();
        }
        _ => println!("{event}"),
    }
}

/// Line-oriented implementation of the `GameInterface` trait over any
/// `BufRead` source, so games can be scripted in tests.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{message}");
        let _ = io::stdout().flush();
        read_line(&mut self.reader)
    }

    fn display_menu(&mut self) {
        display_menu();
    }

    fn display_board(&mut self, board: &BoardView<'_>) {
        display_board(board);
    }

    fn display_event(&mut self, event: &GameEvent) {
        display_event(event);
    }
}

// Library interface for wheel-of-fortune
// This allows integration tests to access internal modules

pub mod advisor;
pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod phrasebank;
pub mod player;
pub mod tui;
pub mod wheel;

// Re-export commonly used functions for easier testing
pub use advisor::{Move, choose_move, filter_candidates, obscure_phrase, possible_letters};
pub use error::GameError;
pub use game_state::{GameConfig, RoundOutcome, game_loop, play_round};
pub use phrasebank::{load_phrasebank_from_file, load_phrasebank_from_str};
pub use player::Player;

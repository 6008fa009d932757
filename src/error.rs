use std::io;
use thiserror::Error;

/// Errors raised while setting up or playing a round.
///
/// Everything except `Io` (reading a phrase bank file) is recoverable: the
/// game loop reports it and moves on to the next player or back to the menu.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot afford a vowel: costs ${cost}, only ${available} available")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("'{0}' is not a vowel")]
    NotAVowel(char),
    #[error("letter '{0}' has already been guessed")]
    AlreadyGuessed(char),
    #[error("the phrase bank is empty")]
    EmptyPhrasebank,
    #[error("no phrases of at most {0} characters for this difficulty")]
    NoPhrasesForDifficulty(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

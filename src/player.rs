use crate::advisor::{self, GuessedSet, VOWEL_COST, is_vowel};
use crate::error::GameError;
use crate::game_state::{GameInterface, PlayerAction, parse_action};
use rand::Rng;
use std::fmt;

pub const MOVE_PROMPT: &str = "Guess a letter, phrase, or type '_exit' or '_pass': ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer { difficulty: u8 },
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub half_car_count: u32,
    money: u32,
    prizes: Vec<String>,
}

/// Everything a player gets to see when deciding a move.
pub struct TurnView<'a> {
    pub obscured: &'a str,
    pub guessed: &'a GuessedSet,
    pub phrases: &'a [String],
}

impl Player {
    fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            half_car_count: 0,
            money: 0,
            prizes: Vec::new(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn computer(name: impl Into<String>, difficulty: u8) -> Self {
        let difficulty = difficulty.clamp(advisor::MIN_DIFFICULTY, advisor::MAX_DIFFICULTY);
        Self::new(name, PlayerKind::Computer { difficulty })
    }

    #[must_use]
    pub fn money(&self) -> u32 {
        self.money
    }

    #[must_use]
    pub fn prizes(&self) -> &[String] {
        &self.prizes
    }

    #[must_use]
    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer { .. })
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn add_prize(&mut self, prize: &str) {
        self.prizes.push(prize.to_string());
    }

    pub fn go_bankrupt(&mut self) {
        self.money = 0;
        self.half_car_count = 0;
        self.prizes.clear();
    }

    /// Pays for a vowel. Leaves the player untouched when it fails.
    pub fn buy_vowel(&mut self, vowel: char) -> Result<(), GameError> {
        let vowel = vowel.to_ascii_uppercase();
        if !is_vowel(vowel) {
            return Err(GameError::NotAVowel(vowel));
        }
        if self.money < VOWEL_COST {
            return Err(GameError::InsufficientFunds {
                cost: VOWEL_COST,
                available: self.money,
            });
        }
        self.money -= VOWEL_COST;
        Ok(())
    }

    /// Asks the player for a move: humans through the interface, computers
    /// through the advisor. Returns `None` when a human gave unusable input.
    pub fn decide<I, R>(
        &self,
        view: &TurnView<'_>,
        interface: &mut I,
        rng: &mut R,
    ) -> Option<PlayerAction>
    where
        I: GameInterface + ?Sized,
        R: Rng + ?Sized,
    {
        match self.kind {
            PlayerKind::Human => {
                let Some(input) = interface.prompt(MOVE_PROMPT) else {
                    return Some(PlayerAction::Exit);
                };
                parse_action(&input)
            }
            PlayerKind::Computer { difficulty } => {
                let possible = advisor::possible_letters(view.guessed, self.money);
                let mv = advisor::choose_move(
                    view.obscured,
                    view.guessed,
                    &possible,
                    view.phrases,
                    difficulty,
                    rng,
                );
                Some(mv.into())
            }
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.money)
    }
}

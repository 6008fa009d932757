use crate::advisor::{GuessedSet, MAX_DIFFICULTY, MIN_DIFFICULTY, Move, is_vowel, obscure_phrase};
use crate::error::GameError;
use crate::phrasebank::choose_phrase;
use crate::player::{Player, TurnView};
use crate::wheel::{Award, SpinOutcome, Wedge, award_letter, resolve_spin, spin};
use crate::{debug_log, info_log};
use rand::Rng;
use std::fmt;
use std::thread;
use std::time::Duration;

pub const DEFAULT_MAX_TURNS: usize = 500;
/// Most players a custom game seats, humans and computers together.
pub const MAX_PLAYERS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 5,
            Self::Hard => 8,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "EASY" => Some(Self::Easy),
            "MEDIUM" => Some(Self::Medium),
            "HARD" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    PlayerVsPlayer,
    PlayerVsAi,
    PlayerVsRandom,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(GameMode),
    Exit,
}

impl MenuChoice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Play(GameMode::PlayerVsPlayer)),
            "2" => Some(Self::Play(GameMode::PlayerVsAi)),
            "3" => Some(Self::Play(GameMode::PlayerVsRandom)),
            "4" => Some(Self::Play(GameMode::Custom)),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Move),
    Exit,
}

impl From<Move> for PlayerAction {
    fn from(mv: Move) -> Self {
        Self::Move(mv)
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(mv) => write!(f, "{mv}"),
            Self::Exit => write!(f, "_exit"),
        }
    }
}

/// Parses a human move. `None` means the input was empty.
#[must_use]
pub fn parse_action(input: &str) -> Option<PlayerAction> {
    let input = input.trim();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(PlayerAction::Move(Move::Letter(c.to_ascii_uppercase())))
        }
        _ if input.eq_ignore_ascii_case("_exit") => Some(PlayerAction::Exit),
        _ if input.eq_ignore_ascii_case("_pass") => Some(PlayerAction::Move(Move::Pass)),
        _ => Some(PlayerAction::Move(Move::Solve(input.to_uppercase()))),
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Pause before each computer move so humans can follow along.
    pub computer_delay: Duration,
    /// Turns after which a round ends without a winner.
    pub max_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_delay: Duration::ZERO,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Snapshot of the table shown before each turn.
pub struct BoardView<'a> {
    pub obscured: &'a str,
    pub guessed: &'a GuessedSet,
    pub players: &'a [Player],
    pub current: usize,
}

impl BoardView<'_> {
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn guessed_list(&self) -> String {
        self.guessed
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    InvalidSelection,
    InvalidPlayerCount,
    RandomDifficulty,
    SetupFailed(String),
    RoundStart { obscured: String },
    Spun { player: String, wedge: Wedge },
    SpinResolved { player: String, outcome: SpinOutcome },
    InvalidInput,
    ComputerMove { player: String, action: PlayerAction },
    VowelBought { player: String, vowel: char, remaining: u32 },
    LetterFound { player: String, letter: char, count: usize, award: Award },
    LetterMissing { letter: char },
    Rejected { player: String, reason: String },
    Passed { player: String },
    Exited { player: String },
    WrongPhrase,
    Won { player: String, phrase: String },
    NoPlayersLeft,
    TurnLimitReached { phrase: String },
    Goodbye,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSelection => write!(f, "Invalid selection. Please try again."),
            Self::InvalidPlayerCount => write!(f, "Invalid number of players."),
            Self::RandomDifficulty => write!(f, "AI player will choose a random difficulty."),
            Self::SetupFailed(reason) => write!(f, "Error: {reason}"),
            Self::RoundStart { obscured } => write!(f, "The phrase is: {obscured}"),
            Self::Spun { player, wedge } => write!(f, "{player} spun: {wedge}"),
            Self::SpinResolved { player, outcome } => match outcome {
                SpinOutcome::Bankrupt => write!(f, "{player} went bankrupt!"),
                SpinOutcome::LoseATurn => write!(f, "{player} loses a turn."),
                SpinOutcome::HalfCar { count, won_car: false } => {
                    write!(f, "{player} collected a 1/2 CAR wedge! Total: {count}")
                }
                SpinOutcome::HalfCar { won_car: true, .. } => {
                    write!(f, "{player} collected a 1/2 CAR wedge and has won a CAR!")
                }
            },
            Self::InvalidInput => write!(f, "Invalid input. Please try again."),
            Self::ComputerMove { player, action } => write!(f, "{player} plays: {action}"),
            Self::VowelBought { player, vowel, remaining } => write!(
                f,
                "{player} bought a vowel: {vowel}. Remaining money: ${remaining}"
            ),
            Self::LetterFound { player, letter, count, award } => match award {
                Award::Money(amount) => write!(
                    f,
                    "{letter} appears {count} time(s)! {player} won ${amount}!"
                ),
                Award::Prize(prize) => write!(
                    f,
                    "{letter} appears {count} time(s)! {player} won a prize: {prize}!"
                ),
            },
            Self::LetterMissing { letter } => write!(f, "{letter} is not in the phrase."),
            Self::Rejected { player, reason } => write!(f, "{player}: {reason}"),
            Self::Passed { player } => write!(f, "{player} passed."),
            Self::Exited { player } => write!(f, "{player} exited the game."),
            Self::WrongPhrase => write!(f, "Incorrect phrase guess."),
            Self::Won { player, phrase } => write!(f, "{player} wins! The phrase was: {phrase}"),
            Self::NoPlayersLeft => write!(f, "No players left. Game over."),
            Self::TurnLimitReached { phrase } => {
                write!(f, "Nobody solved it in time. The phrase was: {phrase}")
            }
            Self::Goodbye => write!(f, "Thank you for playing! Goodbye!"),
        }
    }
}

/// Front-end used by the game loop for all input and output.
pub trait GameInterface {
    /// Reads one line of input. `None` means the input source is gone.
    fn prompt(&mut self, message: &str) -> Option<String>;
    fn display_menu(&mut self);
    fn display_board(&mut self, board: &BoardView<'_>);
    fn display_event(&mut self, event: &GameEvent);

    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterOutcome {
    Found { count: usize, award: Award },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner { player: String, phrase: String },
    NoPlayersLeft,
    TurnLimit { phrase: String },
}

/// The secret phrase and the letters called against it.
#[derive(Debug, Clone)]
pub struct Round {
    phrase: String,
    guessed: GuessedSet,
}

impl Round {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            guessed: GuessedSet::new(),
        }
    }

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub fn guessed(&self) -> &GuessedSet {
        &self.guessed
    }

    #[must_use]
    pub fn obscured(&self) -> String {
        obscure_phrase(&self.phrase, &self.guessed)
    }

    /// Resolves a called letter against the wedge the player landed on.
    ///
    /// Rejected calls (already guessed, unaffordable vowel) leave both the
    /// round and the player unchanged.
    pub fn call_letter(
        &mut self,
        player: &mut Player,
        letter: char,
        wedge: Wedge,
    ) -> Result<LetterOutcome, GameError> {
        let letter = letter.to_ascii_uppercase();
        if self.guessed.contains(&letter) {
            return Err(GameError::AlreadyGuessed(letter));
        }
        if is_vowel(letter) {
            player.buy_vowel(letter)?;
        }
        self.guessed.insert(letter);

        let count = self
            .phrase
            .chars()
            .filter(|c| c.to_ascii_uppercase() == letter)
            .count();
        if count == 0 {
            return Ok(LetterOutcome::Missing);
        }
        let award = award_letter(player, wedge, count);
        Ok(LetterOutcome::Found { count, award })
    }

    #[must_use]
    pub fn is_solution(&self, guess: &str) -> bool {
        guess.trim().eq_ignore_ascii_case(&self.phrase)
    }
}

/// Plays one round to completion.
///
/// A player keeps the wheel for as long as they call letters that are in the
/// phrase; everything else passes it to the next player.
pub fn play_round<I, R>(
    players: &mut Vec<Player>,
    phrase: &str,
    phrases: &[String],
    interface: &mut I,
    rng: &mut R,
    config: &GameConfig,
) -> RoundOutcome
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut round = Round::new(phrase);
    let mut current = 0;
    info_log!("play_round() - {} player(s), phrase length {}", players.len(), phrase.len());
    interface.display_event(&GameEvent::RoundStart {
        obscured: round.obscured(),
    });

    for turn in 0..config.max_turns {
        if players.is_empty() {
            interface.display_event(&GameEvent::NoPlayersLeft);
            return RoundOutcome::NoPlayersLeft;
        }
        let obscured = round.obscured();
        interface.display_board(&BoardView {
            obscured: &obscured,
            guessed: round.guessed(),
            players: players.as_slice(),
            current,
        });

        let wedge = spin(rng);
        debug_log!("turn {}: {} spun {}", turn, players[current].name, wedge);
        interface.display_event(&GameEvent::Spun {
            player: players[current].name.clone(),
            wedge,
        });
        if let Some(outcome) = resolve_spin(&mut players[current], wedge) {
            interface.display_event(&GameEvent::SpinResolved {
                player: players[current].name.clone(),
                outcome,
            });
            current = (current + 1) % players.len();
            continue;
        }

        let action = loop {
            let view = TurnView {
                obscured: &obscured,
                guessed: round.guessed(),
                phrases,
            };
            if players[current].is_computer() {
                interface.pause(config.computer_delay);
            }
            match players[current].decide(&view, interface, rng) {
                Some(action) => break action,
                None => interface.display_event(&GameEvent::InvalidInput),
            }
        };
        let player = &mut players[current];
        if player.is_computer() {
            interface.display_event(&GameEvent::ComputerMove {
                player: player.name.clone(),
                action: action.clone(),
            });
        }

        match action {
            PlayerAction::Exit => {
                interface.display_event(&GameEvent::Exited {
                    player: player.name.clone(),
                });
                players.remove(current);
                if !players.is_empty() {
                    current %= players.len();
                }
                continue;
            }
            PlayerAction::Move(Move::Pass) => {
                interface.display_event(&GameEvent::Passed {
                    player: player.name.clone(),
                });
            }
            PlayerAction::Move(Move::Letter(letter)) => {
                match round.call_letter(player, letter, wedge) {
                    Ok(outcome) => {
                        let letter = letter.to_ascii_uppercase();
                        if is_vowel(letter) {
                            interface.display_event(&GameEvent::VowelBought {
                                player: player.name.clone(),
                                vowel: letter,
                                remaining: player.money(),
                            });
                        }
                        match outcome {
                            LetterOutcome::Found { count, award } => {
                                interface.display_event(&GameEvent::LetterFound {
                                    player: player.name.clone(),
                                    letter,
                                    count,
                                    award,
                                });
                                continue;
                            }
                            LetterOutcome::Missing => {
                                interface.display_event(&GameEvent::LetterMissing { letter });
                            }
                        }
                    }
                    Err(e) => {
                        interface.display_event(&GameEvent::Rejected {
                            player: player.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
            PlayerAction::Move(Move::Solve(guess)) => {
                if round.is_solution(&guess) {
                    let winner = player.name.clone();
                    info_log!("play_round() - {} solved the phrase on turn {}", winner, turn);
                    interface.display_event(&GameEvent::Won {
                        player: winner.clone(),
                        phrase: round.phrase().to_string(),
                    });
                    return RoundOutcome::Winner {
                        player: winner,
                        phrase: round.phrase().to_string(),
                    };
                }
                interface.display_event(&GameEvent::WrongPhrase);
            }
        }
        current = (current + 1) % players.len();
    }

    if players.is_empty() {
        interface.display_event(&GameEvent::NoPlayersLeft);
        return RoundOutcome::NoPlayersLeft;
    }
    interface.display_event(&GameEvent::TurnLimitReached {
        phrase: round.phrase().to_string(),
    });
    RoundOutcome::TurnLimit {
        phrase: round.phrase().to_string(),
    }
}

fn read_difficulty<I: GameInterface + ?Sized>(interface: &mut I) -> Option<Difficulty> {
    loop {
        let input = interface.prompt("Choose Difficulty (Easy, Medium, Hard): ")?;
        match Difficulty::from_name(&input) {
            Some(difficulty) => return Some(difficulty),
            None => interface.display_event(&GameEvent::InvalidSelection),
        }
    }
}

/// Reads a count in `0..=max`, re-prompting on anything else.
fn read_count<I: GameInterface + ?Sized>(
    interface: &mut I,
    message: &str,
    max: usize,
) -> Option<usize> {
    loop {
        let input = interface.prompt(message)?;
        match input.trim().parse::<usize>() {
            Ok(count) if count <= max => return Some(count),
            _ => interface.display_event(&GameEvent::InvalidPlayerCount),
        }
    }
}

fn read_name<I: GameInterface + ?Sized>(
    interface: &mut I,
    message: &str,
    fallback: String,
) -> Option<String> {
    let name = interface.prompt(message)?;
    let name = name.trim();
    Some(if name.is_empty() { fallback } else { name.to_string() })
}

/// Builds the table for a game mode. Returns the players and the difficulty
/// that decides the phrase length, or `None` when input ran out.
pub fn setup_players<I, R>(
    mode: GameMode,
    interface: &mut I,
    rng: &mut R,
) -> Option<(Vec<Player>, u8)>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut players = Vec::new();
    let difficulty = match mode {
        GameMode::PlayerVsPlayer => {
            for i in 1..=2 {
                let name = read_name(
                    interface,
                    &format!("Enter name for Player {i}: "),
                    format!("Player {i}"),
                )?;
                players.push(Player::human(name));
            }
            read_difficulty(interface)?.level()
        }
        GameMode::PlayerVsAi => {
            let name = read_name(
                interface,
                "Enter name for the human player: ",
                "Player 1".to_string(),
            )?;
            players.push(Player::human(name));
            let difficulty = read_difficulty(interface)?.level();
            players.push(Player::computer("AI", difficulty));
            difficulty
        }
        GameMode::PlayerVsRandom => {
            let name = read_name(
                interface,
                "Enter name for the human player: ",
                "Player 1".to_string(),
            )?;
            players.push(Player::human(name));
            interface.display_event(&GameEvent::RandomDifficulty);
            let difficulty = rng.random_range(MIN_DIFFICULTY..=MAX_DIFFICULTY);
            players.push(Player::computer("AI", difficulty));
            difficulty
        }
        GameMode::Custom => {
            let humans = read_count(interface, "Enter number of human players: ", MAX_PLAYERS)?;
            let computers = read_count(
                interface,
                "Enter number of computer players: ",
                MAX_PLAYERS - humans,
            )?;
            if humans + computers == 0 {
                interface.display_event(&GameEvent::InvalidPlayerCount);
                return None;
            }
            let difficulty = read_difficulty(interface)?.level();
            for i in 1..=humans {
                let name = read_name(
                    interface,
                    &format!("Enter name for human player {i}: "),
                    format!("Player {i}"),
                )?;
                players.push(Player::human(name));
            }
            for i in 1..=computers {
                players.push(Player::computer(format!("Computer {i}"), difficulty));
            }
            difficulty
        }
    };
    Some((players, difficulty))
}

/// Runs the main menu until the player exits or input runs out.
pub fn game_loop<I, R>(phrases: &[String], interface: &mut I, rng: &mut R, config: &GameConfig)
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    loop {
        interface.display_menu();
        let Some(input) = interface.prompt("Select an option (1-5): ") else {
            interface.display_event(&GameEvent::Goodbye);
            break;
        };
        let mode = match MenuChoice::parse(&input) {
            Some(MenuChoice::Play(mode)) => mode,
            Some(MenuChoice::Exit) => {
                interface.display_event(&GameEvent::Goodbye);
                break;
            }
            None => {
                interface.display_event(&GameEvent::InvalidSelection);
                continue;
            }
        };
        info_log!("game_loop() - starting {:?}", mode);

        let Some((mut players, difficulty)) = setup_players(mode, interface, rng) else {
            continue;
        };
        let phrase = match choose_phrase(phrases, difficulty, rng) {
            Ok(phrase) => phrase,
            Err(e) => {
                interface.display_event(&GameEvent::SetupFailed(e.to_string()));
                continue;
            }
        };
        let outcome = play_round(&mut players, &phrase, phrases, interface, rng, config);
        debug_log!("game_loop() - round finished: {:?}", outcome);
    }
}

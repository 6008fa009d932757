// Integration tests for the wheel-of-fortune application
// These tests verify that all modules work together correctly

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use std::io::Cursor;
use wheel_of_fortune::cli::CliInterface;
use wheel_of_fortune::game_state::GameMode;
use wheel_of_fortune::phrasebank::{EMBEDDED_PHRASEBANK, choose_phrase};
use wheel_of_fortune::*;

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| (*p).to_string()).collect()
}

#[test]
fn test_menu_exit_immediately() {
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let mut interface = CliInterface::new(Cursor::new("5\n"));
    let mut rng = StdRng::seed_from_u64(1);

    // Should not panic and should exit gracefully
    game_loop(&bank, &mut interface, &mut rng, &GameConfig::default());
}

#[test]
fn test_menu_invalid_selection_then_end_of_input() {
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let mut interface = CliInterface::new(Cursor::new("abc\n7\n"));
    let mut rng = StdRng::seed_from_u64(2);

    // Running out of input ends the game like choosing Exit
    game_loop(&bank, &mut interface, &mut rng, &GameConfig::default());
}

#[test]
fn test_computer_only_custom_game_from_menu() {
    // Custom game: zero humans, two hard computers, then exit the menu
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let input = "4\n0\n2\nhard\n5\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut rng = StdRng::seed_from_u64(3);

    game_loop(&bank, &mut interface, &mut rng, &GameConfig::default());
}

#[test]
fn test_player_vs_ai_human_leaves() {
    // The human leaves at their first move; the AI finishes the round alone
    let bank = phrases(&["EARTH", "COMPOST", "RECYCLE"]);
    let input = "2\nAda\neasy\n_exit\n5\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut rng = StdRng::seed_from_u64(4);

    game_loop(&bank, &mut interface, &mut rng, &GameConfig::default());
}

#[test]
fn test_player_vs_player_solved_by_first_player() {
    let bank = phrases(&["EARTH"]);
    let mut players = vec![Player::human("Ada"), Player::human("Grace")];
    let mut interface = CliInterface::new(Cursor::new("Earth\n"));
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = play_round(
        &mut players,
        "EARTH",
        &bank,
        &mut interface,
        &mut rng,
        &GameConfig::default(),
    );
    assert!(matches!(outcome, RoundOutcome::Winner { ref phrase, .. } if phrase == "EARTH"));
}

#[test]
fn test_end_to_end_computer_round_on_embedded_bank() {
    // Every phrase in the embedded bank can be played out by computers
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let config = GameConfig::default();
    for (seed, phrase) in bank.iter().enumerate().take(10) {
        let mut players = vec![
            Player::computer("Computer 1", 10),
            Player::computer("Computer 2", 8),
            Player::computer("Computer 3", 1),
        ];
        let mut interface = CliInterface::new(Cursor::new(""));
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let outcome = play_round(&mut players, phrase, &bank, &mut interface, &mut rng, &config);
        match outcome {
            RoundOutcome::Winner { phrase: solved, .. } => assert_eq!(&solved, phrase),
            RoundOutcome::TurnLimit { phrase: unsolved } => assert_eq!(&unsolved, phrase),
            RoundOutcome::NoPlayersLeft => panic!("computers never leave the table"),
        }
    }
}

#[test]
fn test_advisor_narrows_as_letters_are_revealed() {
    // Simulate a round by hand and check the candidate set only ever shrinks
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let secret = "SOLAR PANEL";
    let mut guessed = BTreeSet::new();
    let mut previous = filter_candidates(&obscure_phrase(secret, &guessed), &guessed, &bank).len();
    assert!(previous >= 1);

    for letter in ['L', 'S', 'R', 'N', 'P'] {
        guessed.insert(letter);
        let obscured = obscure_phrase(secret, &guessed);
        let candidates = filter_candidates(&obscured, &guessed, &bank);
        assert!(candidates.iter().any(|c| c.as_str() == secret));
        assert!(candidates.len() <= previous);
        previous = candidates.len();
    }
}

#[test]
fn test_advisor_spec_examples() {
    let bank = phrases(&["CAT", "BAT", "MAT"]);
    let guessed: BTreeSet<char> = ['A'].into_iter().collect();
    assert_eq!(filter_candidates("_A_", &guessed, &bank).len(), 3);

    let bank = phrases(&["EARTH", "OCEAN"]);
    let guessed: BTreeSet<char> = ['T'].into_iter().collect();
    let possible = possible_letters(&guessed, 0);
    let mut rng = StdRng::seed_from_u64(6);
    let mv = choose_move("___T_", &guessed, &possible, &bank, 10, &mut rng);
    assert_eq!(mv, Move::Solve("EARTH".to_string()));

    let mv = choose_move("___T_", &guessed, &[], &bank, 10, &mut rng);
    assert_eq!(mv, Move::Pass);
}

#[test]
fn test_custom_phrasebank_file_to_game() {
    // Integration test: Load custom phrase bank file -> play game
    use std::fs::File;
    use std::io::Write;

    let temp_dir = std::env::temp_dir();
    let bank_path = temp_dir.join("test_custom_phrasebank.txt");

    {
        let mut file = File::create(&bank_path).unwrap();
        writeln!(file, "wind power").unwrap();
        writeln!(file, "").unwrap();
        writeln!(file, "not_valid").unwrap();
        writeln!(file, "green roof").unwrap();
    }

    let bank = load_phrasebank_from_file(&bank_path).unwrap();
    assert_eq!(bank, vec!["WIND POWER".to_string(), "GREEN ROOF".to_string()]);

    let mut rng = StdRng::seed_from_u64(7);
    let phrase = choose_phrase(&bank, 1, &mut rng).unwrap();
    assert!(bank.contains(&phrase));

    let mut players = vec![Player::human("Ada")];
    let input = format!("{phrase}\n");
    let mut interface = CliInterface::new(Cursor::new(input));
    let config = GameConfig::default();
    let outcome = play_round(&mut players, &phrase, &bank, &mut interface, &mut rng, &config);
    assert!(matches!(outcome, RoundOutcome::Winner { .. }));

    std::fs::remove_file(&bank_path).unwrap();
}

#[test]
fn test_missing_phrasebank_file_is_error() {
    let result = load_phrasebank_from_file("/nonexistent/phrases.txt");
    assert!(matches!(result, Err(GameError::Io(_))));
}

#[test]
fn test_setup_then_round_with_seeded_rng_is_reproducible() {
    let bank = load_phrasebank_from_str(EMBEDDED_PHRASEBANK);
    let play = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut interface = CliInterface::new(Cursor::new("0\n2\nmedium\n"));
        let (mut players, difficulty) =
            wheel_of_fortune::game_state::setup_players(GameMode::Custom, &mut interface, &mut rng)
                .unwrap();
        let phrase = choose_phrase(&bank, difficulty, &mut rng).unwrap();
        let config = GameConfig::default();
        let outcome = play_round(&mut players, &phrase, &bank, &mut interface, &mut rng, &config);
        let money: Vec<u32> = players.iter().map(Player::money).collect();
        (outcome, money)
    };
    assert_eq!(play(99), play(99));
}

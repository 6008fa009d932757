use crate::advisor::PLACEHOLDER;
use crate::error::GameError;
use crate::game_state::Difficulty;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_PHRASEBANK: &str = include_str!("resources/phrases.txt");

fn normalize_phrase(line: &str) -> Option<String> {
    let phrase = line.trim().to_uppercase();
    let well_formed = !phrase.is_empty()
        && phrase.chars().any(|c| c.is_ascii_alphabetic())
        && phrase
            .chars()
            .all(|c| c == ' ' || (c.is_ascii_graphic() && c != PLACEHOLDER));
    well_formed.then_some(phrase)
}

pub fn load_phrasebank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_phrase).collect()
}

pub fn load_phrasebank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut phrases = Vec::new();
    for line in reader.lines() {
        if let Some(phrase) = normalize_phrase(&line?) {
            phrases.push(phrase);
        }
    }
    Ok(phrases)
}

/// Longest phrase allowed for a round played at `difficulty`.
#[must_use]
pub fn length_limit(difficulty: u8) -> usize {
    match difficulty {
        d if d == Difficulty::Easy.level() => 12,
        d if d == Difficulty::Medium.level() => 24,
        _ => 48,
    }
}

/// Picks the secret phrase for a new round.
pub fn choose_phrase<R: Rng + ?Sized>(
    phrases: &[String],
    difficulty: u8,
    rng: &mut R,
) -> Result<String, GameError> {
    if phrases.is_empty() {
        return Err(GameError::EmptyPhrasebank);
    }
    let limit = length_limit(difficulty);
    let eligible: Vec<&String> = phrases
        .iter()
        .filter(|p| p.chars().count() <= limit)
        .collect();
    eligible
        .choose(rng)
        .map(|p| (*p).clone())
        .ok_or(GameError::NoPhrasesForDifficulty(limit))
}

//! Word guess: a hidden word is revealed letter by letter, hangman style.
//! Guesses are normalized (lowercased, diacritics stripped), repeats cost
//! nothing, and only wrong fresh letters burn attempts.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::DotSet;
use crate::feedback::{EventSink, GameEvent};

/// The fixed word list, lowercase, three to seven letters.
pub const WORDS: &[&str] = &[
    "sol", "luz", "punto", "braille", "gato", "perro", "casa", "silla",
];

pub const MAX_ATTEMPTS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordPhase {
    Guessing,
    Won,
    Lost,
}

/// What a single guess did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the word.
    Revealed,
    /// The letter is in the word and completed it.
    Solved,
    /// The letter is not in the word.
    Wrong,
    /// The wrong letter used up the last attempt.
    Failed,
    /// Already guessed; no penalty, nothing changes.
    Repeat,
    /// Not a letter, or the game is over; ignored.
    Ignored,
}

/// Folds the Spanish letters a guess may arrive as onto their bare ASCII
/// form, so "á" and "a" count as the same guess.
pub fn strip_diacritic(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' | 'ü' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

pub struct WordGuessGame {
    word: &'static str,
    guessed: BTreeSet<char>,
    attempts_left: u32,
    phase: WordPhase,
    rng: StdRng,
}

impl WordGuessGame {
    pub fn start(mut rng: StdRng) -> Self {
        let word = Self::sample_word(&mut rng);
        Self {
            word,
            guessed: BTreeSet::new(),
            attempts_left: MAX_ATTEMPTS,
            phase: WordPhase::Guessing,
            rng,
        }
    }

    /// One guessed letter, in any case and with or without an accent.
    pub fn guess(&mut self, letter: char, sink: &mut dyn EventSink) -> GuessOutcome {
        if self.phase != WordPhase::Guessing {
            return GuessOutcome::Ignored;
        }
        let ch = strip_diacritic(letter.to_lowercase().next().unwrap_or(letter));
        if !ch.is_ascii_lowercase() {
            return GuessOutcome::Ignored;
        }
        if self.guessed.contains(&ch) {
            return GuessOutcome::Repeat;
        }
        self.guessed.insert(ch);

        if self.word.contains(ch) {
            sink.on_event(&GameEvent::LetterRevealed { letter: ch });
            if self.word.chars().all(|c| self.guessed.contains(&c)) {
                self.phase = WordPhase::Won;
                sink.on_event(&GameEvent::WordSolved {
                    word: self.word,
                    attempts_left: self.attempts_left,
                });
                return GuessOutcome::Solved;
            }
            GuessOutcome::Revealed
        } else {
            self.attempts_left -= 1;
            sink.on_event(&GameEvent::LetterRejected {
                letter: ch,
                attempts_left: self.attempts_left,
            });
            if self.attempts_left == 0 {
                self.phase = WordPhase::Lost;
                sink.on_event(&GameEvent::WordFailed { word: self.word });
                return GuessOutcome::Failed;
            }
            GuessOutcome::Wrong
        }
    }

    /// From `Won` or `Lost` back to a fresh round with a new word.
    pub fn play_again(&mut self) {
        self.word = Self::sample_word(&mut self.rng);
        self.guessed.clear();
        self.attempts_left = MAX_ATTEMPTS;
        self.phase = WordPhase::Guessing;
    }

    /// The word with unguessed letters masked: "s o _" for "sol" after s
    /// and o.
    pub fn masked(&self) -> String {
        let shown: Vec<String> = self
            .word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect();
        shown.join(" ")
    }

    /// One cell per letter: the pattern for revealed letters, `None` for
    /// the still-hidden ones.
    pub fn revealed_cells(&self) -> Vec<Option<DotSet>> {
        self.word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    codec::encode(c)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn word(&self) -> &'static str {
        self.word
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn guessed(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed.iter().copied()
    }

    pub fn phase(&self) -> WordPhase {
        self.phase
    }

    fn sample_word(rng: &mut StdRng) -> &'static str {
        WORDS.choose(rng).copied().unwrap_or(WORDS[0])
    }

    #[cfg(test)]
    fn force_word(&mut self, word: &'static str) {
        self.word = word;
        self.guessed.clear();
        self.attempts_left = MAX_ATTEMPTS;
        self.phase = WordPhase::Guessing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game_with(word: &'static str) -> WordGuessGame {
        let mut game = WordGuessGame::start(StdRng::seed_from_u64(0));
        game.force_word(word);
        game
    }

    #[test]
    fn sol_walkthrough_wins_with_all_attempts_left() {
        let mut game = game_with("sol");
        let mut events = Vec::new();

        assert_eq!(game.guess('s', &mut events), GuessOutcome::Revealed);
        assert_eq!(game.masked(), "s _ _");
        assert_eq!(game.attempts_left(), MAX_ATTEMPTS);

        assert_eq!(game.guess('o', &mut events), GuessOutcome::Revealed);
        assert_eq!(game.masked(), "s o _");

        assert_eq!(game.guess('l', &mut events), GuessOutcome::Solved);
        assert_eq!(game.masked(), "s o l");
        assert_eq!(game.phase(), WordPhase::Won);
        assert_eq!(game.attempts_left(), MAX_ATTEMPTS);
        assert!(events.contains(&GameEvent::WordSolved { word: "sol", attempts_left: 6 }));
    }

    #[test]
    fn wrong_letters_burn_attempts_down_to_a_loss() {
        let mut game = game_with("luz");
        let mut events = Vec::new();

        for (i, wrong) in "abcdef".chars().enumerate() {
            let outcome = game.guess(wrong, &mut events);
            if i < 5 {
                assert_eq!(outcome, GuessOutcome::Wrong);
            } else {
                assert_eq!(outcome, GuessOutcome::Failed);
            }
        }
        assert_eq!(game.phase(), WordPhase::Lost);
        assert_eq!(game.attempts_left(), 0);
        assert!(events.contains(&GameEvent::WordFailed { word: "luz" }));
        // Input after the loss is ignored.
        assert_eq!(game.guess('l', &mut events), GuessOutcome::Ignored);
    }

    #[test]
    fn repeats_and_non_letters_cost_nothing() {
        let mut game = game_with("gato");
        let mut events = Vec::new();

        assert_eq!(game.guess('z', &mut events), GuessOutcome::Wrong);
        assert_eq!(game.guess('z', &mut events), GuessOutcome::Repeat);
        assert_eq!(game.guess('7', &mut events), GuessOutcome::Ignored);
        assert_eq!(game.guess(' ', &mut events), GuessOutcome::Ignored);
        assert_eq!(game.attempts_left(), MAX_ATTEMPTS - 1);
    }

    #[test]
    fn accented_guesses_match_their_bare_letters() {
        let mut game = game_with("casa");
        let mut events = Vec::new();
        assert_eq!(game.guess('á', &mut events), GuessOutcome::Revealed);
        assert!(game.masked().contains('a'));
        // The accented form counts as the same letter.
        assert_eq!(game.guess('A', &mut events), GuessOutcome::Repeat);
    }

    #[test]
    fn every_word_is_winnable_within_the_attempt_budget() {
        for &word in WORDS {
            let mut game = game_with(word);
            let mut events = Vec::new();
            let distinct: BTreeSet<char> = word.chars().collect();
            for c in distinct {
                let outcome = game.guess(c, &mut events);
                assert!(
                    matches!(outcome, GuessOutcome::Revealed | GuessOutcome::Solved),
                    "{word}: {c}"
                );
            }
            assert_eq!(game.phase(), WordPhase::Won, "{word}");
            assert_eq!(game.attempts_left(), MAX_ATTEMPTS, "{word}");
        }
    }

    #[test]
    fn play_again_resets_for_a_new_word() {
        let mut game = game_with("sol");
        let mut events = Vec::new();
        for c in ['s', 'o', 'l'] {
            game.guess(c, &mut events);
        }
        game.play_again();
        assert_eq!(game.phase(), WordPhase::Guessing);
        assert_eq!(game.attempts_left(), MAX_ATTEMPTS);
        assert_eq!(game.guessed().count(), 0);
        assert!(WORDS.contains(&game.word()));
    }

    #[test]
    fn revealed_cells_track_the_mask() {
        let mut game = game_with("sol");
        let mut events = Vec::new();
        game.guess('s', &mut events);
        let cells = game.revealed_cells();
        assert!(cells[0].is_some());
        assert!(cells[1].is_none());
        assert!(cells[2].is_none());
    }
}

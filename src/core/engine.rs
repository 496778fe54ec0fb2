//! The tutor engine ties the pieces together: it owns the settings store,
//! keeps the progress counters current and hands out games configured for
//! the stored learning level.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::feedback::EventSink;
use crate::games::build::BuildLetterGame;
use crate::games::memory::MemoryGame;
use crate::games::quiz::QuizGame;
use crate::games::sequence::SequenceGame;
use crate::games::speed::{SpeedReadingGame, DEFAULT_DURATION};
use crate::games::word_guess::WordGuessGame;
use crate::progress::level_label;
use crate::settings::{Settings, SettingsStore};

pub struct TutorEngine {
    store: SettingsStore,
}

impl TutorEngine {
    /// Opens the settings at `path`; a missing or unreadable file starts
    /// the engine on defaults.
    pub fn from_file_or_new(path: impl AsRef<Path>) -> Self {
        Self { store: SettingsStore::open(path.as_ref()) }
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    /// Records one answered round into the cumulative counters and
    /// persists them.
    pub fn record_answer(&mut self, correct: bool) -> Result<()> {
        self.store.update(|s| s.progress.record(correct))
    }

    pub fn success_rate(&self) -> u32 {
        self.settings().progress.success_rate()
    }

    pub fn level_label(&self) -> &'static str {
        level_label(self.settings().level)
    }

    // Game constructors, seeded from entropy and configured from the
    // stored settings.

    pub fn new_quiz(&self, sink: &mut dyn EventSink) -> QuizGame {
        QuizGame::start(self.settings().level, StdRng::from_entropy(), sink)
    }

    pub fn new_build_game(&self, sink: &mut dyn EventSink) -> BuildLetterGame {
        BuildLetterGame::start(StdRng::from_entropy(), sink)
    }

    pub fn new_memory_game(&self) -> MemoryGame {
        MemoryGame::start(&mut StdRng::from_entropy())
    }

    pub fn new_speed_game(&self) -> SpeedReadingGame {
        SpeedReadingGame::new(DEFAULT_DURATION, StdRng::from_entropy())
    }

    pub fn new_word_game(&self) -> WordGuessGame {
        WordGuessGame::start(StdRng::from_entropy())
    }

    pub fn new_sequence_game(&self) -> SequenceGame {
        SequenceGame::new(StdRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_answers_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut engine = TutorEngine::from_file_or_new(&path);
        engine.record_answer(true).unwrap();
        engine.record_answer(false).unwrap();
        engine.record_answer(true).unwrap();
        assert_eq!(engine.success_rate(), 67);
        drop(engine);

        let engine = TutorEngine::from_file_or_new(&path);
        assert_eq!(engine.settings().progress.total_attempts, 3);
        assert_eq!(engine.settings().progress.total_correct, 2);
    }

    #[test]
    fn quiz_pool_follows_the_stored_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut engine = TutorEngine::from_file_or_new(&path);
        engine.store_mut().set_level(3).unwrap();
        assert_eq!(engine.level_label(), "Avanzado");

        let mut events = Vec::new();
        let quiz = engine.new_quiz(&mut events);
        assert!(quiz.options().len() == 3);
    }
}

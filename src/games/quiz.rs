//! Multiple-choice letter quiz: a pattern is shown, the player picks the
//! letter it spells from a small option set. Streaks are rewarded, misses
//! reset them, and rounds advance on a feedback delay. There is no round
//! cap in here; the driver stops asking when it wants to.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::DotSet;
use crate::feedback::{EventSink, GameEvent, Scheduler, Wakeup};
use crate::games::POINTS_PER_HIT;

/// Options shown per round, the correct one included.
pub const OPTION_COUNT: usize = 3;
/// Every this-many consecutive correct answers earns a celebration.
pub const STREAK_MILESTONE: u32 = 5;
/// Feedback pause after a correct answer.
pub const CORRECT_DELAY: Duration = Duration::from_millis(1500);
/// Longer pause after a miss, so the named answer can be read.
pub const INCORRECT_DELAY: Duration = Duration::from_millis(2000);

/// The letters the level pools are cut from.
const LEVEL_LETTERS: [char; 10] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the player to pick an option.
    Presenting,
    /// Feedback is on screen; input is ignored until the advance fires.
    Feedback,
}

pub struct QuizGame {
    pool: Vec<char>,
    target: char,
    options: Vec<char>,
    score: u32,
    streak: u32,
    round: u32,
    phase: Phase,
    rng: StdRng,
}

impl QuizGame {
    /// Seeds the pool for `level` (higher levels unlock more letters) and
    /// presents the first round.
    pub fn start(level: u8, rng: StdRng, sink: &mut dyn EventSink) -> Self {
        let cut = (level.clamp(1, 3) as usize * 2 + 5).min(LEVEL_LETTERS.len());
        let mut game = Self {
            pool: LEVEL_LETTERS[..cut].to_vec(),
            target: LEVEL_LETTERS[0],
            options: Vec::new(),
            score: 0,
            streak: 0,
            round: 0,
            phase: Phase::Presenting,
            rng,
        };
        game.next_round(sink);
        game
    }

    /// The player picked `choice`. Returns whether it was correct, or
    /// `None` when the input was ignored (feedback pending, or not one of
    /// the offered options).
    pub fn select(
        &mut self,
        choice: char,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) -> Option<bool> {
        if self.phase != Phase::Presenting || !self.options.contains(&choice) {
            return None;
        }
        self.phase = Phase::Feedback;
        let correct = choice == self.target;
        if correct {
            self.score += POINTS_PER_HIT;
            self.streak += 1;
            sink.on_event(&GameEvent::Correct {
                answer: self.target,
                streak: self.streak,
            });
            if self.streak % STREAK_MILESTONE == 0 {
                sink.on_event(&GameEvent::Celebration { streak: self.streak });
            }
            timer.after(CORRECT_DELAY, Wakeup::AdvanceRound);
        } else {
            self.streak = 0;
            sink.on_event(&GameEvent::Incorrect { expected: self.target });
            timer.after(INCORRECT_DELAY, Wakeup::AdvanceRound);
        }
        Some(correct)
    }

    /// Skips the current round without scoring.
    pub fn skip(&mut self, sink: &mut dyn EventSink) {
        if self.phase != Phase::Presenting {
            return;
        }
        sink.on_event(&GameEvent::Skipped { expected: self.target });
        self.next_round(sink);
    }

    /// A letter hint for the current target.
    pub fn hint(&self) -> String {
        match self.target {
            'a' => "Es la primera letra del alfabeto".to_string(),
            'b' => "Viene después de A".to_string(),
            'c' => "Es la tercera letra".to_string(),
            'd' => "Rima con \"red\"".to_string(),
            'e' => "Es la vocal más común en español".to_string(),
            'f' => "Suena como \"efe\"".to_string(),
            'g' => "Suena como \"ge\"".to_string(),
            'h' => "Es una letra muda en español".to_string(),
            'i' => "Es una vocal cerrada".to_string(),
            'j' => "Suena como \"jota\"".to_string(),
            _ => format!(
                "La letra está entre {} y {}",
                self.pool[0].to_uppercase(),
                self.pool[self.pool.len() - 1].to_uppercase()
            ),
        }
    }

    /// Delivers an elapsed delay. A wakeup scheduled for a round that
    /// already moved on is ignored.
    pub fn wake(&mut self, wakeup: Wakeup, sink: &mut dyn EventSink) {
        if wakeup == Wakeup::AdvanceRound && self.phase == Phase::Feedback {
            self.next_round(sink);
        }
    }

    fn next_round(&mut self, sink: &mut dyn EventSink) {
        self.round += 1;
        self.target = *self
            .pool
            .choose(&mut self.rng)
            .unwrap_or(&LEVEL_LETTERS[0]);
        self.options = self.generate_options();
        self.phase = Phase::Presenting;
        tracing::trace!(round = self.round, "quiz round presented");
        sink.on_event(&GameEvent::RoundStarted { round: self.round });
    }

    /// The target plus distractors sampled without replacement, shuffled.
    /// Never contains duplicates.
    fn generate_options(&mut self) -> Vec<char> {
        let mut options = vec![self.target];
        let want = OPTION_COUNT.min(self.pool.len());
        while options.len() < want {
            if let Some(&candidate) = self.pool.choose(&mut self.rng) {
                if !options.contains(&candidate) {
                    options.push(candidate);
                }
            }
        }
        options.shuffle(&mut self.rng);
        options
    }

    pub fn target(&self) -> char {
        self.target
    }

    /// The pattern the player is asked to read.
    pub fn pattern(&self) -> DotSet {
        codec::encode(self.target).unwrap_or(DotSet::EMPTY)
    }

    pub fn options(&self) -> &[char] {
        &self.options
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether the game is waiting for a pick (as opposed to showing
    /// feedback).
    pub fn awaiting_choice(&self) -> bool {
        self.phase == Phase::Presenting
    }

    #[cfg(test)]
    fn force_round(&mut self, target: char, options: Vec<char>) {
        self.target = target;
        self.options = options;
        self.phase = Phase::Presenting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::feedback::{ManualScheduler, NullSink};

    fn game(level: u8, seed: u64) -> (QuizGame, Vec<GameEvent>) {
        let mut events = Vec::new();
        let game = QuizGame::start(level, StdRng::seed_from_u64(seed), &mut events);
        (game, events)
    }

    #[test]
    fn option_sets_are_valid_for_every_level_and_seed() {
        for level in 1..=3 {
            for seed in 0..25 {
                let (game, _) = game(level, seed);
                let options = game.options();
                assert_eq!(options.len(), OPTION_COUNT);
                let target_count = options.iter().filter(|&&c| c == game.target()).count();
                assert_eq!(target_count, 1, "target exactly once");
                for (i, a) in options.iter().enumerate() {
                    assert!(!options[i + 1..].contains(a), "no duplicates");
                }
            }
        }
    }

    #[test]
    fn level_unlocks_larger_pools() {
        assert_eq!(game(1, 0).0.pool.len(), 7);
        assert_eq!(game(2, 0).0.pool.len(), 9);
        assert_eq!(game(3, 0).0.pool.len(), 10);
    }

    #[test]
    fn wrong_answer_keeps_score_resets_streak_and_names_the_target() {
        let mut events = Vec::new();
        let mut timer = ManualScheduler::new();
        let mut game = QuizGame::start(1, StdRng::seed_from_u64(3), &mut events);
        game.force_round('b', vec!['b', 'a', 'e']);
        game.streak = 2;

        assert_eq!(game.select('a', &mut events, &mut timer), Some(false));
        assert_eq!(game.score(), 0);
        assert_eq!(game.streak(), 0);
        assert!(events.contains(&GameEvent::Incorrect { expected: 'b' }));
        assert_eq!(timer.pending, vec![(INCORRECT_DELAY, Wakeup::AdvanceRound)]);

        // Input is ignored while feedback is showing; the wakeup advances.
        assert_eq!(game.select('b', &mut events, &mut timer), None);
        for wakeup in timer.drain() {
            game.wake(wakeup, &mut events);
        }
        assert!(game.awaiting_choice());
    }

    #[test]
    fn correct_answer_awards_points_and_schedules_the_shorter_delay() {
        let mut events = Vec::new();
        let mut timer = ManualScheduler::new();
        let mut game = QuizGame::start(1, StdRng::seed_from_u64(3), &mut events);
        let target = game.target();

        assert_eq!(game.select(target, &mut events, &mut timer), Some(true));
        assert_eq!(game.score(), POINTS_PER_HIT);
        assert_eq!(game.streak(), 1);
        assert!(events.contains(&GameEvent::Correct { answer: target, streak: 1 }));
        assert_eq!(timer.pending, vec![(CORRECT_DELAY, Wakeup::AdvanceRound)]);
    }

    #[test]
    fn every_fifth_consecutive_correct_celebrates() {
        let mut events = Vec::new();
        let mut timer = ManualScheduler::new();
        let mut game = QuizGame::start(2, StdRng::seed_from_u64(9), &mut events);

        for hit in 1..=STREAK_MILESTONE {
            let target = game.target();
            game.select(target, &mut events, &mut timer);
            let celebrated = events
                .iter()
                .any(|e| matches!(e, GameEvent::Celebration { .. }));
            assert_eq!(celebrated, hit == STREAK_MILESTONE, "after hit {hit}");
            for wakeup in timer.drain() {
                game.wake(wakeup, &mut events);
            }
        }
        assert_eq!(game.score(), STREAK_MILESTONE * POINTS_PER_HIT);
    }

    #[test]
    fn skip_advances_without_scoring() {
        let mut events = Vec::new();
        let mut game = QuizGame::start(1, StdRng::seed_from_u64(1), &mut events);
        let target = game.target();
        game.skip(&mut events);
        assert!(events.contains(&GameEvent::Skipped { expected: target }));
        assert_eq!(game.score(), 0);
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn stale_advance_after_a_skip_is_ignored() {
        let mut sink = NullSink;
        let mut timer = ManualScheduler::new();
        let mut game = QuizGame::start(1, StdRng::seed_from_u64(5), &mut sink);
        let target = game.target();
        game.select(target, &mut sink, &mut timer);
        // The feedback wakeup advances once; delivering it again must not
        // advance a second time.
        game.wake(Wakeup::AdvanceRound, &mut sink);
        let round = game.round();
        game.wake(Wakeup::AdvanceRound, &mut sink);
        assert_eq!(game.round(), round);
    }

    #[test]
    fn hints_cover_the_level_one_pool() {
        let (mut game, _) = game(3, 0);
        for &letter in &['a', 'j'] {
            game.force_round(letter, vec![letter]);
            assert!(!game.hint().is_empty());
        }
    }
}

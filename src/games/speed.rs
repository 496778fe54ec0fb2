//! Speed reading against the clock: patterns keep coming while the
//! countdown runs, one keystroke per pattern, case-insensitive. A miss
//! reveals the answer and moves on; only the clock ends the game.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::DotSet;
use crate::feedback::{EventSink, GameEvent, Scheduler, Wakeup};

/// Default round length in seconds.
pub const DEFAULT_DURATION: u32 = 60;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPhase {
    Idle,
    Running,
    Finished,
}

pub struct SpeedReadingGame {
    pool: Vec<char>,
    duration: u32,
    seconds_left: u32,
    hits: u32,
    target: char,
    phase: SpeedPhase,
    rng: StdRng,
}

impl SpeedReadingGame {
    pub fn new(duration_secs: u32, rng: StdRng) -> Self {
        Self {
            pool: codec::letters().collect(),
            duration: duration_secs,
            seconds_left: duration_secs,
            hits: 0,
            target: 'a',
            phase: SpeedPhase::Idle,
            rng,
        }
    }

    /// Starts (or restarts) the countdown and shows the first pattern.
    pub fn start(&mut self, sink: &mut dyn EventSink, timer: &mut dyn Scheduler) {
        self.hits = 0;
        self.seconds_left = self.duration;
        self.phase = SpeedPhase::Running;
        self.next_pattern();
        sink.on_event(&GameEvent::RoundStarted { round: 1 });
        timer.after(TICK, Wakeup::ClockTick);
    }

    /// One keystroke against the current pattern. Correct or not, a new
    /// pattern is generated immediately; the clock never pauses. Returns
    /// whether the guess was right, or `None` when the clock is not
    /// running.
    pub fn answer(&mut self, guess: char, sink: &mut dyn EventSink) -> Option<bool> {
        if self.phase != SpeedPhase::Running {
            return None;
        }
        let correct = guess.to_lowercase().next().unwrap_or(guess) == self.target;
        if correct {
            self.hits += 1;
            sink.on_event(&GameEvent::Correct {
                answer: self.target,
                streak: self.hits,
            });
        } else {
            sink.on_event(&GameEvent::Incorrect { expected: self.target });
        }
        self.next_pattern();
        Some(correct)
    }

    /// Delivers one elapsed second. Re-arms itself until time runs out.
    pub fn wake(
        &mut self,
        wakeup: Wakeup,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) {
        if wakeup != Wakeup::ClockTick || self.phase != SpeedPhase::Running {
            return;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        sink.on_event(&GameEvent::ClockTick { seconds_left: self.seconds_left });
        if self.seconds_left == 0 {
            self.phase = SpeedPhase::Finished;
            sink.on_event(&GameEvent::TimeUp { hits: self.hits });
        } else {
            timer.after(TICK, Wakeup::ClockTick);
        }
    }

    fn next_pattern(&mut self) {
        self.target = *self.pool.choose(&mut self.rng).unwrap_or(&'a');
    }

    pub fn pattern(&self) -> DotSet {
        codec::encode(self.target).unwrap_or(DotSet::EMPTY)
    }

    pub fn target(&self) -> char {
        self.target
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn phase(&self) -> SpeedPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::feedback::ManualScheduler;

    fn running_game(seed: u64) -> (SpeedReadingGame, Vec<GameEvent>, ManualScheduler) {
        let mut events = Vec::new();
        let mut timer = ManualScheduler::new();
        let mut game = SpeedReadingGame::new(3, StdRng::seed_from_u64(seed));
        game.start(&mut events, &mut timer);
        (game, events, timer)
    }

    #[test]
    fn correct_answers_are_case_insensitive_and_keep_the_clock_running() {
        let (mut game, mut events, _timer) = running_game(5);
        let target = game.target().to_uppercase().next().unwrap();
        assert_eq!(game.answer(target, &mut events), Some(true));
        assert_eq!(game.hits(), 1);
        assert_eq!(game.seconds_left(), 3);
    }

    #[test]
    fn a_miss_reveals_the_answer_and_moves_on() {
        let (mut game, mut events, _timer) = running_game(8);
        let target = game.target();
        let wrong = codec::letters().find(|&c| c != target).unwrap();
        assert_eq!(game.answer(wrong, &mut events), Some(false));
        assert!(events.contains(&GameEvent::Incorrect { expected: target }));
        assert_eq!(game.hits(), 0);
        assert_eq!(game.phase(), SpeedPhase::Running);
    }

    #[test]
    fn the_clock_ends_the_game() {
        let (mut game, mut events, mut timer) = running_game(2);
        // Each tick re-arms until zero.
        for _ in 0..3 {
            for wakeup in timer.drain() {
                game.wake(wakeup, &mut events, &mut timer);
            }
        }
        assert_eq!(game.phase(), SpeedPhase::Finished);
        assert!(events.contains(&GameEvent::TimeUp { hits: 0 }));
        assert!(timer.pending.is_empty(), "finished game stops ticking");
        // Input after the clock is ignored.
        assert_eq!(game.answer('a', &mut events), None);
    }

    #[test]
    fn restart_resets_the_tally() {
        let (mut game, mut events, mut timer) = running_game(5);
        let target = game.target();
        game.answer(target, &mut events);
        game.start(&mut events, &mut timer);
        assert_eq!(game.hits(), 0);
        assert_eq!(game.seconds_left(), 3);
    }
}

//! Build-the-letter: a target letter is shown and the player toggles dots
//! until the cell spells it. Correctness is detected continuously after
//! every toggle; there is no submit action and no "incorrect", only "not
//! yet correct".

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::{CellState, DotSet};
use crate::feedback::{EventSink, GameEvent, Scheduler, Wakeup};
use crate::games::POINTS_PER_HIT;

/// Feedback pause before the next letter appears.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1200);
/// Every this-many completed letters earns a celebration.
pub const COMPLETION_MILESTONE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Building,
    Feedback,
}

pub struct BuildLetterGame {
    pool: Vec<char>,
    target: char,
    cell: CellState,
    score: u32,
    completed: u32,
    round: u32,
    phase: Phase,
    rng: StdRng,
}

impl BuildLetterGame {
    pub fn start(rng: StdRng, sink: &mut dyn EventSink) -> Self {
        let mut game = Self {
            pool: codec::letters().collect(),
            target: 'a',
            cell: CellState::new(),
            score: 0,
            completed: 0,
            round: 0,
            phase: Phase::Building,
            rng,
        };
        game.next_round(sink);
        game
    }

    /// Toggles the dot at `index` (0..6) and re-checks the cell against the
    /// target pattern. Returns true when the toggle completed the letter.
    pub fn toggle(
        &mut self,
        index: usize,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) -> bool {
        if self.phase != Phase::Building || index >= 6 {
            return false;
        }
        let on = self.cell.toggle(index);
        sink.on_event(&GameEvent::DotToggled { dot: index as u8 + 1, on });

        let expected = codec::encode(self.target).unwrap_or(DotSet::EMPTY);
        if !codec::matches(self.cell.dot_set(), expected) {
            return false;
        }
        self.phase = Phase::Feedback;
        self.score += POINTS_PER_HIT;
        self.completed += 1;
        sink.on_event(&GameEvent::Correct {
            answer: self.target,
            streak: self.completed,
        });
        if self.completed % COMPLETION_MILESTONE == 0 {
            sink.on_event(&GameEvent::Celebration { streak: self.completed });
        }
        timer.after(ADVANCE_DELAY, Wakeup::AdvanceRound);
        true
    }

    pub fn wake(&mut self, wakeup: Wakeup, sink: &mut dyn EventSink) {
        if wakeup == Wakeup::AdvanceRound && self.phase == Phase::Feedback {
            self.next_round(sink);
        }
    }

    fn next_round(&mut self, sink: &mut dyn EventSink) {
        self.round += 1;
        self.target = *self.pool.choose(&mut self.rng).unwrap_or(&'a');
        self.cell.clear();
        self.phase = Phase::Building;
        sink.on_event(&GameEvent::RoundStarted { round: self.round });
    }

    pub fn target(&self) -> char {
        self.target
    }

    pub fn cell(&self) -> &CellState {
        &self.cell
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn building(&self) -> bool {
        self.phase == Phase::Building
    }
}

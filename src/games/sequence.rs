//! Sequence recall, Simon style: the sequence grows by one letter each
//! round, is replayed item by item while input stays disabled, and the
//! player echoes the whole thing back in one line. Any divergence ends the
//! game, reporting the longest length reproduced.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::DotSet;
use crate::feedback::{EventSink, GameEvent, Scheduler, Wakeup};

/// How long each replayed item stays lit.
pub const ITEM_SHOW: Duration = Duration::from_millis(600);
/// Gap between replayed items.
pub const ITEM_GAP: Duration = Duration::from_millis(200);
/// Pause between a correct echo and the next, longer round.
pub const NEXT_ROUND_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    Idle,
    /// The sequence is being shown; input is disabled.
    Replaying,
    /// Waiting for the player's echo.
    AwaitingInput,
    /// Correct echo acknowledged; the next round is scheduled.
    BetweenRounds,
    Finished,
}

pub struct SequenceGame {
    pool: Vec<char>,
    sequence: Vec<char>,
    phase: SequencePhase,
    rng: StdRng,
}

impl SequenceGame {
    pub fn new(rng: StdRng) -> Self {
        Self {
            pool: codec::letters().collect(),
            sequence: Vec::new(),
            phase: SequencePhase::Idle,
            rng,
        }
    }

    /// Starts over from a one-letter sequence.
    pub fn start(&mut self, sink: &mut dyn EventSink, timer: &mut dyn Scheduler) {
        self.sequence.clear();
        self.next_round(sink, timer);
    }

    /// The player's echo of the full sequence, letters concatenated.
    /// Ignored (returns `None`) outside the input window or for an empty
    /// line; otherwise reports whether the echo matched.
    pub fn submit(
        &mut self,
        text: &str,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) -> Option<bool> {
        if self.phase != SequencePhase::AwaitingInput {
            return None;
        }
        let echo = text.trim().to_lowercase();
        if echo.is_empty() {
            return None;
        }
        let expected: String = self.sequence.iter().collect();
        if echo == expected {
            self.phase = SequencePhase::BetweenRounds;
            sink.on_event(&GameEvent::SequenceRepeated { length: self.sequence.len() });
            timer.after(NEXT_ROUND_DELAY, Wakeup::AdvanceRound);
            Some(true)
        } else {
            self.phase = SequencePhase::Finished;
            sink.on_event(&GameEvent::SequenceBroken {
                reached: self.sequence.len() - 1,
            });
            Some(false)
        }
    }

    pub fn wake(
        &mut self,
        wakeup: Wakeup,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) {
        match (wakeup, self.phase) {
            (Wakeup::ReplayDone, SequencePhase::Replaying) => {
                self.phase = SequencePhase::AwaitingInput;
                sink.on_event(&GameEvent::InputEnabled);
            }
            (Wakeup::AdvanceRound, SequencePhase::BetweenRounds) => {
                self.next_round(sink, timer);
            }
            _ => {}
        }
    }

    fn next_round(&mut self, sink: &mut dyn EventSink, timer: &mut dyn Scheduler) {
        let next = *self.pool.choose(&mut self.rng).unwrap_or(&'a');
        self.sequence.push(next);
        self.phase = SequencePhase::Replaying;
        sink.on_event(&GameEvent::RoundStarted {
            round: self.sequence.len() as u32,
        });
        sink.on_event(&GameEvent::ReplayStarted { length: self.sequence.len() });
        // Input stays disabled until the last item's window elapses.
        timer.after(self.replay_duration(), Wakeup::ReplayDone);
    }

    /// Total replay time: every item's show window plus its gap.
    pub fn replay_duration(&self) -> Duration {
        (ITEM_SHOW + ITEM_GAP) * self.sequence.len() as u32
    }

    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    /// The patterns to light up during replay, in order.
    pub fn replay_cells(&self) -> Vec<DotSet> {
        self.sequence
            .iter()
            .filter_map(|&c| codec::encode(c))
            .collect()
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Rounds fully reproduced so far.
    pub fn rounds_completed(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::feedback::ManualScheduler;

    fn started() -> (SequenceGame, Vec<GameEvent>, ManualScheduler) {
        let mut events = Vec::new();
        let mut timer = ManualScheduler::new();
        let mut game = SequenceGame::new(StdRng::seed_from_u64(21));
        game.start(&mut events, &mut timer);
        (game, events, timer)
    }

    fn deliver(game: &mut SequenceGame, events: &mut Vec<GameEvent>, timer: &mut ManualScheduler) {
        for wakeup in timer.drain() {
            let mut next = ManualScheduler::new();
            game.wake(wakeup, events, &mut next);
            timer.pending.append(&mut next.pending);
        }
    }

    #[test]
    fn echoing_the_sequence_always_advances() {
        let (mut game, mut events, mut timer) = started();
        for round in 1..=8usize {
            assert_eq!(game.sequence().len(), round);
            assert_eq!(game.phase(), SequencePhase::Replaying);
            deliver(&mut game, &mut events, &mut timer); // replay ends
            assert_eq!(game.phase(), SequencePhase::AwaitingInput);

            let echo: String = game.sequence().iter().collect();
            assert_eq!(game.submit(&echo, &mut events, &mut timer), Some(true));
            deliver(&mut game, &mut events, &mut timer); // advance fires
        }
        assert_eq!(game.sequence().len(), 9);
    }

    #[test]
    fn one_wrong_character_ends_the_game_reporting_rounds_completed() {
        let (mut game, mut events, mut timer) = started();
        // Survive two rounds, then fail the third.
        for _ in 0..2 {
            deliver(&mut game, &mut events, &mut timer);
            let echo: String = game.sequence().iter().collect();
            game.submit(&echo, &mut events, &mut timer);
            deliver(&mut game, &mut events, &mut timer);
        }
        deliver(&mut game, &mut events, &mut timer);
        let mut echo: String = game.sequence().iter().collect();
        // Corrupt the last character.
        let last = echo.pop().unwrap();
        let wrong = if last == 'a' { 'b' } else { 'a' };
        echo.push(wrong);

        assert_eq!(game.submit(&echo, &mut events, &mut timer), Some(false));
        assert_eq!(game.phase(), SequencePhase::Finished);
        assert!(events.contains(&GameEvent::SequenceBroken { reached: 2 }));
    }

    #[test]
    fn input_is_disabled_during_replay() {
        let (mut game, mut events, mut timer) = started();
        let echo: String = game.sequence().iter().collect();
        assert_eq!(game.submit(&echo, &mut events, &mut timer), None);
        deliver(&mut game, &mut events, &mut timer);
        assert!(events.contains(&GameEvent::InputEnabled));
        assert_eq!(game.submit(&echo, &mut events, &mut timer), Some(true));
    }

    #[test]
    fn echo_is_trimmed_and_case_folded() {
        let (mut game, mut events, mut timer) = started();
        deliver(&mut game, &mut events, &mut timer);
        let echo: String = game.sequence().iter().collect();
        let noisy = format!("  {}  ", echo.to_uppercase());
        assert_eq!(game.submit(&noisy, &mut events, &mut timer), Some(true));
    }

    #[test]
    fn replay_duration_grows_with_the_sequence() {
        let (mut game, mut events, mut timer) = started();
        assert_eq!(game.replay_duration(), ITEM_SHOW + ITEM_GAP);
        deliver(&mut game, &mut events, &mut timer);
        let echo: String = game.sequence().iter().collect();
        game.submit(&echo, &mut events, &mut timer);
        deliver(&mut game, &mut events, &mut timer);
        assert_eq!(game.replay_duration(), (ITEM_SHOW + ITEM_GAP) * 2);
    }
}

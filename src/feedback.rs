//! The seams between the game state machines and the outside world.
//!
//! Core logic never renders, speaks or beeps: it emits typed [`GameEvent`]s
//! to an injected [`EventSink`] and schedules delayed [`Wakeup`]s through an
//! injected [`Scheduler`]. Rendering, audio and speech are independent
//! subscribers; tests plug in a `Vec<GameEvent>` and a [`ManualScheduler`]
//! and never wait on a wall clock.

use std::time::{Duration, Instant};

use crate::core::types::Dot;

/// Everything a game can report. Subscribers pick what they care about.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new round is in front of the player.
    RoundStarted { round: u32 },
    /// An interactive cell dot changed state.
    DotToggled { dot: Dot, on: bool },
    /// The interactive cell now spells a letter.
    LetterIdentified { letter: char },
    /// A correct answer, with the streak after counting it.
    Correct { answer: char, streak: u32 },
    /// A wrong answer; names the answer that was expected.
    Incorrect { expected: char },
    /// A streak milestone on top of the ordinary correct feedback.
    Celebration { streak: u32 },
    /// The player skipped a round; names the answer they gave up on.
    Skipped { expected: char },
    /// A memory card was turned face up.
    CardRevealed { index: usize },
    /// Two memory cards matched.
    PairFound { letter: char, found: usize, total: usize },
    /// Two memory cards did not match.
    PairMissed { moves: u32 },
    /// The mismatched cards were turned face down again.
    BoardConcealed,
    /// Every pair on the board is matched.
    BoardCompleted { moves: u32 },
    /// One second elapsed on the countdown.
    ClockTick { seconds_left: u32 },
    /// The countdown reached zero; reports the final tally.
    TimeUp { hits: u32 },
    /// A guessed letter is in the word.
    LetterRevealed { letter: char },
    /// A guessed letter is not in the word.
    LetterRejected { letter: char, attempts_left: u32 },
    /// Every distinct letter of the word has been guessed.
    WordSolved { word: &'static str, attempts_left: u32 },
    /// Attempts ran out; reveals the word.
    WordFailed { word: &'static str },
    /// The sequence replay began; input is disabled until it ends.
    ReplayStarted { length: usize },
    /// The sequence replay ended; input is enabled again.
    InputEnabled,
    /// The whole sequence was echoed back correctly.
    SequenceRepeated { length: usize },
    /// The echo diverged; reports the longest length reproduced.
    SequenceBroken { reached: usize },
}

/// Receives every event a game emits. Implementations must not block.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Collecting sink, used by tests and by drivers that fan events out after
/// the state transition finished.
impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Sink that drops everything, for exercising core logic bare.
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

// ─── Audio ──────────────────────────────────────────────────────────────────

/// The closed set of tones the audio collaborator knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PrimarySuccess,
    PrimaryNeutral,
    SecondaryError,
    Toggle,
    Milestone,
}

/// Fire-and-forget tone output. Never blocks the caller.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Which tone, if any, an event maps to.
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    use GameEvent::*;
    match event {
        DotToggled { on: true, .. } => Some(AudioCue::PrimarySuccess),
        DotToggled { on: false, .. } => Some(AudioCue::PrimaryNeutral),
        Correct { .. } | CardRevealed { .. } | PairFound { .. } | LetterRevealed { .. }
        | SequenceRepeated { .. } => Some(AudioCue::PrimarySuccess),
        Incorrect { .. } | PairMissed { .. } | LetterRejected { .. } | WordFailed { .. }
        | SequenceBroken { .. } => Some(AudioCue::SecondaryError),
        Celebration { .. } | BoardCompleted { .. } | TimeUp { .. } | WordSolved { .. } => {
            Some(AudioCue::Milestone)
        }
        _ => None,
    }
}

/// Event subscriber that forwards tones to an [`AudioSink`], honouring the
/// sounds-enabled preference.
pub struct AudioFeedback<S: AudioSink> {
    pub sink: S,
    pub sounds_on: bool,
}

impl<S: AudioSink> AudioFeedback<S> {
    pub fn new(sink: S, sounds_on: bool) -> Self {
        Self { sink, sounds_on }
    }
}

impl<S: AudioSink> EventSink for AudioFeedback<S> {
    fn on_event(&mut self, event: &GameEvent) {
        if !self.sounds_on {
            return;
        }
        if let Some(cue) = cue_for(event) {
            self.sink.play(cue);
        }
    }
}

// ─── Speech ─────────────────────────────────────────────────────────────────

/// One-way speech output. Last call wins: an in-flight utterance is
/// superseded, and the caller never waits on completion.
pub trait Announcer {
    fn announce(&mut self, message: &str);
}

/// The spoken message, if any, an event maps to.
pub fn message_for(event: &GameEvent) -> Option<String> {
    use GameEvent::*;
    match event {
        RoundStarted { round } => Some(format!("Ronda {round}.")),
        DotToggled { dot, on } => Some(format!(
            "Punto {dot} {}",
            if *on { "activado" } else { "desactivado" }
        )),
        LetterIdentified { letter } => Some(format!("Letra identificada: {}", upper(*letter))),
        Correct { .. } => Some("¡Correcto!".to_string()),
        Incorrect { expected } => Some(format!(
            "Incorrecto. La respuesta correcta es {}.",
            upper(*expected)
        )),
        Celebration { streak } => Some(format!("¡Racha de {streak} aciertos seguidos!")),
        Skipped { expected } => Some(format!("Pregunta saltada. Era {}.", upper(*expected))),
        PairFound { found, total, .. } => {
            Some(format!("Pareja encontrada. {found} de {total}."))
        }
        BoardCompleted { .. } => {
            Some("¡Felicidades! Has encontrado todas las parejas.".to_string())
        }
        TimeUp { hits } => Some(format!(
            "Juego finalizado. Has acertado {hits} letra{}.",
            if *hits == 1 { "" } else { "s" }
        )),
        LetterRejected { attempts_left, .. } => {
            Some(format!("Esa letra no está. Quedan {attempts_left} intentos."))
        }
        WordSolved { .. } => Some("¡Enhorabuena! Has descubierto la palabra.".to_string()),
        WordFailed { word } => Some(format!("Has perdido. La palabra era {}.", word.to_uppercase())),
        ReplayStarted { .. } => Some("Observa la secuencia.".to_string()),
        InputEnabled => Some("Tu turno. Escribe la secuencia.".to_string()),
        SequenceRepeated { .. } => {
            Some("¡Bien! Prepárate para la siguiente ronda.".to_string())
        }
        SequenceBroken { reached } => Some(format!(
            "Te has equivocado. Lograste una secuencia de {reached} letra{}.",
            if *reached == 1 { "" } else { "s" }
        )),
        _ => None,
    }
}

fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Event subscriber that narrates, honouring the narrator preference.
pub struct SpeechFeedback<A: Announcer> {
    pub announcer: A,
    pub narrator_on: bool,
}

impl<A: Announcer> SpeechFeedback<A> {
    pub fn new(announcer: A, narrator_on: bool) -> Self {
        Self { announcer, narrator_on }
    }
}

impl<A: Announcer> EventSink for SpeechFeedback<A> {
    fn on_event(&mut self, event: &GameEvent) {
        if !self.narrator_on {
            return;
        }
        if let Some(message) = message_for(event) {
            self.announcer.announce(&message);
        }
    }
}

// ─── Scheduling ─────────────────────────────────────────────────────────────

/// What a game wants to be told when a delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// Feedback pause over, move to the next round.
    AdvanceRound,
    /// Turn the mismatched memory cards face down again.
    ConcealBoard,
    /// The sequence replay window elapsed; re-enable input.
    ReplayDone,
    /// One second of the speed-reading countdown elapsed.
    ClockTick,
}

/// The single delayed-action primitive games are allowed to use. The driver
/// delivers the wakeup back to the game when the delay elapses; a round that
/// already moved on ignores stale wakeups.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, wakeup: Wakeup);
}

/// Test scheduler: records requests and hands them back on demand, so tests
/// control time explicitly.
#[derive(Default)]
pub struct ManualScheduler {
    pub pending: Vec<(Duration, Wakeup)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending wakeup, oldest first.
    pub fn drain(&mut self) -> Vec<Wakeup> {
        self.pending.drain(..).map(|(_, w)| w).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay: Duration, wakeup: Wakeup) {
        self.pending.push((delay, wakeup));
    }
}

/// Wall-clock scheduler for the binaries: deadlines against `Instant::now()`,
/// polled by the driver loop.
#[derive(Default)]
pub struct TimerQueue {
    deadlines: Vec<(Instant, Wakeup)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every wakeup whose deadline has passed, in
    /// deadline order.
    pub fn due(&mut self, now: Instant) -> Vec<Wakeup> {
        self.deadlines.sort_by_key(|&(at, _)| at);
        let split = self.deadlines.partition_point(|&(at, _)| at <= now);
        self.deadlines.drain(..split).map(|(_, w)| w).collect()
    }

    /// How long until the earliest deadline, if any.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.deadlines
            .iter()
            .map(|&(at, _)| at.saturating_duration_since(now))
            .min()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, wakeup: Wakeup) {
        self.deadlines.push((Instant::now() + delay, wakeup));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_feedback_respects_sounds_setting() {
        struct Recorder(Vec<AudioCue>);
        impl AudioSink for Recorder {
            fn play(&mut self, cue: AudioCue) {
                self.0.push(cue);
            }
        }

        let event = GameEvent::Correct { answer: 'a', streak: 1 };
        let mut on = AudioFeedback::new(Recorder(Vec::new()), true);
        on.on_event(&event);
        assert_eq!(on.sink.0, vec![AudioCue::PrimarySuccess]);

        let mut off = AudioFeedback::new(Recorder(Vec::new()), false);
        off.on_event(&event);
        assert!(off.sink.0.is_empty());
    }

    #[test]
    fn incorrect_answer_names_the_expected_letter() {
        let message = message_for(&GameEvent::Incorrect { expected: 'b' }).unwrap();
        assert!(message.contains('B'), "{message}");
    }

    #[test]
    fn timer_queue_releases_only_elapsed_deadlines() {
        let mut queue = TimerQueue::new();
        let now = Instant::now();
        queue.deadlines.push((now, Wakeup::AdvanceRound));
        queue
            .deadlines
            .push((now + Duration::from_secs(60), Wakeup::ClockTick));

        assert_eq!(queue.due(now), vec![Wakeup::AdvanceRound]);
        assert!(!queue.is_empty());
        assert_eq!(
            queue.due(now + Duration::from_secs(61)),
            vec![Wakeup::ClockTick]
        );
    }
}

//! Non-interactive playthrough of every game with a seeded RNG: a smoke
//! harness that drives the whole engine end-to-end and prints the event
//! stream, with no terminal UI and no wall-clock waits.
//! Run with: cargo run --bin simulator

use rand::rngs::StdRng;
use rand::SeedableRng;

use braille_core::core::codec;
use braille_core::feedback::{EventSink, GameEvent, ManualScheduler};
use braille_core::games::build::BuildLetterGame;
use braille_core::games::memory::{CardState, MemoryGame};
use braille_core::games::quiz::QuizGame;
use braille_core::games::sequence::{SequenceGame, SequencePhase};
use braille_core::games::speed::{SpeedPhase, SpeedReadingGame};
use braille_core::games::word_guess::{WordGuessGame, WordPhase};
use braille_core::TutorEngine;

const SEED: u64 = 2024;

/// Prints every event as it happens.
struct Printer;

impl EventSink for Printer {
    fn on_event(&mut self, event: &GameEvent) {
        println!("    {event:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut sink = Printer;
    let mut timer = ManualScheduler::new();

    println!("== Adivina la letra ==");
    let mut quiz = QuizGame::start(2, StdRng::seed_from_u64(SEED), &mut sink);
    let mut engine = TutorEngine::from_file_or_new(
        std::env::temp_dir().join("brailletopia_simulator.json"),
    );
    for _ in 0..6 {
        // Alternate a correct pick and a deliberate miss.
        let target = quiz.target();
        let miss = quiz.options().iter().copied().find(|&c| c != target);
        let choice = if quiz.round() % 2 == 0 {
            miss.unwrap_or(target)
        } else {
            target
        };
        if let Some(correct) = quiz.select(choice, &mut sink, &mut timer) {
            if let Err(err) = engine.record_answer(correct) {
                tracing::warn!(%err, "progress not persisted");
            }
        }
        for wakeup in timer.drain() {
            quiz.wake(wakeup, &mut sink);
        }
    }
    println!(
        "  puntos: {}, aciertos acumulados: {}%",
        quiz.score(),
        engine.success_rate()
    );

    println!("== Construye la letra ==");
    let mut build = BuildLetterGame::start(StdRng::seed_from_u64(SEED), &mut sink);
    for _ in 0..3 {
        let pattern = codec::encode(build.target()).unwrap_or_default();
        for dot in pattern.dots() {
            build.toggle(dot as usize - 1, &mut sink, &mut timer);
        }
        for wakeup in timer.drain() {
            build.wake(wakeup, &mut sink);
        }
    }
    println!("  puntos: {}", build.score());

    println!("== Memoria ==");
    let mut memory = MemoryGame::start(&mut StdRng::seed_from_u64(SEED));
    while !memory.is_complete() {
        let index = memory
            .cards()
            .iter()
            .position(|c| c.state == CardState::Hidden)
            .expect("incomplete board has hidden cards");
        let partner = memory
            .cards()
            .iter()
            .position(|c| {
                c.letter == memory.cards()[index].letter && c.face != memory.cards()[index].face
            })
            .expect("every card has a partner");
        memory.reveal(index, &mut sink, &mut timer);
        memory.reveal(partner, &mut sink, &mut timer);
    }
    println!("  movimientos: {}", memory.moves());

    println!("== Lectura rápida ==");
    let mut speed = SpeedReadingGame::new(5, StdRng::seed_from_u64(SEED));
    speed.start(&mut sink, &mut timer);
    while speed.phase() == SpeedPhase::Running {
        speed.answer(speed.target(), &mut sink);
        for wakeup in timer.drain() {
            speed.wake(wakeup, &mut sink, &mut timer);
        }
    }
    println!("  aciertos: {}", speed.hits());

    println!("== Adivina la palabra ==");
    let mut word = WordGuessGame::start(StdRng::seed_from_u64(SEED));
    for letter in "aeiourslntzgpc".chars() {
        if word.phase() != WordPhase::Guessing {
            break;
        }
        word.guess(letter, &mut sink);
    }
    println!("  palabra: {}, estado: {:?}", word.word(), word.phase());

    println!("== Secuencia ==");
    let mut sequence = SequenceGame::new(StdRng::seed_from_u64(SEED));
    sequence.start(&mut sink, &mut timer);
    for round in 0..5 {
        for wakeup in timer.drain() {
            sequence.wake(wakeup, &mut sink, &mut timer);
        }
        let echo: String = if round < 4 {
            sequence.sequence().iter().collect()
        } else {
            "nope".to_string()
        };
        sequence.submit(&echo, &mut sink, &mut timer);
        for wakeup in timer.drain() {
            sequence.wake(wakeup, &mut sink, &mut timer);
        }
    }
    assert_eq!(sequence.phase(), SequencePhase::Finished);
    println!("  nivel alcanzado: {}", sequence.rounds_completed());
}

//! Interactive terminal tutor: a menu over the quiz, the five games, the
//! translator, the interactive cell, the Perkins keyboard and the family
//! settings panel. Audio cues become terminal bells and narration becomes
//! printed lines, both honouring the stored preferences.

use std::io::{stdin, stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use crossterm::style::Stylize;
use crossterm::terminal;
use rand::rngs::StdRng;
use rand::SeedableRng;

use braille_core::core::keyboard::{dot_for_key, Committed, PerkinsKeyboard};
use braille_core::core::{cell::BrailleCell, translator};
use braille_core::feedback::{
    Announcer, AudioCue, AudioFeedback, AudioSink, EventSink, GameEvent, SpeechFeedback,
    TimerQueue, Wakeup,
};
use braille_core::games::memory::{CardState, Face, MemoryGame};
use braille_core::games::sequence::{SequencePhase, ITEM_GAP, ITEM_SHOW};
use braille_core::games::speed::SpeedPhase;
use braille_core::games::word_guess::WordPhase;
use braille_core::gate::ParentGate;
use braille_core::{DotSet, TutorEngine};

const SETTINGS_PATH: &str = "brailletopia_settings.json";

/// Audio collaborator: short terminal bells, a double bell for milestones.
struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        let bells = match cue {
            AudioCue::Milestone => "\x07\x07",
            _ => "\x07",
        };
        print!("{bells}");
        let _ = stdout().flush();
    }
}

/// Speech collaborator: narration printed as a dim line.
struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&mut self, message: &str) {
        println!("{}", format!("🔊 {message}").dim());
    }
}

/// Fans buffered events out to the audio and speech subscribers.
struct Feedback {
    audio: AudioFeedback<TerminalBell>,
    speech: SpeechFeedback<ConsoleAnnouncer>,
}

impl Feedback {
    fn from_engine(engine: &TutorEngine) -> Self {
        Self {
            audio: AudioFeedback::new(TerminalBell, engine.settings().sounds_on),
            speech: SpeechFeedback::new(ConsoleAnnouncer, engine.settings().narrator_on),
        }
    }

    fn dispatch(&mut self, events: &mut Vec<GameEvent>) {
        for event in events.drain(..) {
            self.audio.on_event(&event);
            self.speech.on_event(&event);
        }
    }

    /// A direct announcement, still gated by the narrator preference.
    fn say(&mut self, message: &str) {
        if self.speech.narrator_on {
            self.speech.announcer.announce(message);
        }
    }
}

fn main() -> braille_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut engine = TutorEngine::from_file_or_new(SETTINGS_PATH);
    println!("{}", "BRAILLETOPÍA ⠃⠗⠇ — tutor de braille".bold());

    loop {
        println!();
        println!("1) Adivina la letra   2) Construye la letra  3) Memoria");
        println!("4) Lectura rápida     5) Adivina la palabra  6) Secuencia");
        println!("7) Traductor          8) Celda interactiva   9) Teclado Perkins");
        println!("0) Ajustes (familia)  salir");
        let choice = prompt("> ")?;
        match choice.as_str() {
            "1" => run_quiz(&mut engine)?,
            "2" => run_build(&mut engine)?,
            "3" => run_memory(&engine)?,
            "4" => run_speed(&engine)?,
            "5" => run_word_guess(&engine)?,
            "6" => run_sequence(&engine)?,
            "7" => run_translator()?,
            "8" => run_cell(&engine)?,
            "9" => run_perkins(&engine)?,
            "0" => run_settings(&mut engine)?,
            "salir" | "q" => break,
            _ => {}
        }
    }
    Ok(())
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}");
    stdout().flush()?;
    let mut line = String::new();
    stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Renders one cell as a 2×3 dot grid.
fn print_cell(dots: DotSet) {
    for (left, right) in [(1, 4), (2, 5), (3, 6)] {
        let mark = |d: u8| if dots.contains(d) { "●" } else { "○" };
        println!("   {} {}", mark(left), mark(right));
    }
}

/// Sleeps through every pending deadline, delivering wakeups in order.
/// Only for games whose wakeups never re-arm the queue.
fn drain_timer(timer: &mut TimerQueue, mut deliver: impl FnMut(Wakeup)) {
    while !timer.is_empty() {
        if let Some(wait) = timer.until_next(Instant::now()) {
            thread::sleep(wait);
        }
        for wakeup in timer.due(Instant::now()) {
            deliver(wakeup);
        }
    }
}

fn run_quiz(engine: &mut TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut timer = TimerQueue::new();
    let mut quiz = engine.new_quiz(&mut events);
    feedback.dispatch(&mut events);

    println!("Escribe la letra elegida, 'pista', 'saltar' o 'fin'.");
    loop {
        println!();
        println!("⭐ Puntos: {}   Racha: {}", quiz.score(), quiz.streak());
        println!("¿Qué letra ves?");
        print_cell(quiz.pattern());
        let shown: Vec<String> = quiz
            .options()
            .iter()
            .map(|c| c.to_uppercase().to_string())
            .collect();
        println!("Opciones: {}", shown.join("  "));

        match prompt("> ")?.as_str() {
            "fin" => break,
            "pista" => println!("💡 {}", quiz.hint()),
            "saltar" => {
                quiz.skip(&mut events);
                feedback.dispatch(&mut events);
            }
            answer => {
                let Some(choice) = answer.to_lowercase().chars().next() else {
                    continue;
                };
                let expected = quiz.target();
                if let Some(correct) = quiz.select(choice, &mut events, &mut timer) {
                    if correct {
                        println!("{}", "¡SÍ! 🎉 ¡Correcto!".green());
                    } else {
                        println!(
                            "{}",
                            format!(
                                "Incorrecto. La respuesta correcta es {}.",
                                expected.to_uppercase()
                            )
                            .red()
                        );
                    }
                    feedback.dispatch(&mut events);
                    engine.record_answer(correct)?;
                    drain_timer(&mut timer, |w| quiz.wake(w, &mut events));
                    feedback.dispatch(&mut events);
                }
            }
        }
    }
    println!(
        "Aciertos acumulados: {}% ({} de {})",
        engine.success_rate(),
        engine.settings().progress.total_correct,
        engine.settings().progress.total_attempts
    );
    Ok(())
}

fn run_build(engine: &mut TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut timer = TimerQueue::new();
    let mut game = engine.new_build_game(&mut events);
    feedback.dispatch(&mut events);

    println!("Activa los puntos (1-6) hasta formar la letra. 'fin' para salir.");
    loop {
        println!();
        println!(
            "Letra objetivo: {}   Puntos: {}",
            game.target().to_uppercase().to_string().bold(),
            game.score()
        );
        print_cell(game.cell().dot_set());
        let input = prompt("punto> ")?;
        if input == "fin" {
            break;
        }
        let Ok(dot) = input.parse::<usize>() else {
            continue;
        };
        if !(1..=6).contains(&dot) {
            continue;
        }
        let completed = game.toggle(dot - 1, &mut events, &mut timer);
        feedback.dispatch(&mut events);
        if completed {
            println!("{}", "¡Correcto!".green());
            drain_timer(&mut timer, |w| game.wake(w, &mut events));
            feedback.dispatch(&mut events);
        }
    }
    Ok(())
}

fn print_board(game: &MemoryGame) {
    println!();
    for (i, card) in game.cards().iter().enumerate() {
        let shown = match card.state {
            CardState::Hidden => "▢".to_string(),
            CardState::FaceUp | CardState::Matched => match card.face {
                Face::Letter => card.letter.to_uppercase().to_string(),
                Face::Pattern => card.pattern().unicode().to_string(),
            },
        };
        print!("{i:>2}:{shown}  ");
        if i % 4 == 3 {
            println!();
        }
    }
    println!(
        "Movimientos: {} – Parejas: {}/{}",
        game.moves(),
        game.found(),
        game.total()
    );
}

fn run_memory(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut timer = TimerQueue::new();
    let mut game = engine.new_memory_game();

    println!("Encuentra cada letra y su patrón. Elige cartas por número; 'fin' para salir.");
    while !game.is_complete() {
        print_board(&game);
        let input = prompt("carta> ")?;
        if input == "fin" {
            break;
        }
        let Ok(index) = input.parse::<usize>() else {
            continue;
        };
        game.reveal(index, &mut events, &mut timer);
        feedback.dispatch(&mut events);
        if !game.board_unlocked() {
            // Let the mismatched pair be seen before it flips back.
            print_board(&game);
        }
        drain_timer(&mut timer, |w| game.wake(w, &mut events));
        feedback.dispatch(&mut events);
    }
    if game.is_complete() {
        println!("¡Felicidades! Has encontrado todas las parejas.");
    }
    Ok(())
}

/// The only mode that needs raw keystrokes: the countdown keeps running
/// while the player types single letters.
fn run_speed(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut timer = TimerQueue::new();
    let mut game = engine.new_speed_game();
    game.start(&mut events, &mut timer);
    feedback.dispatch(&mut events);

    terminal::enable_raw_mode()?;
    let result = (|| -> braille_core::Result<()> {
        let mut shown = (' ', u32::MAX);
        while game.phase() == SpeedPhase::Running {
            let state = (game.target(), game.seconds_left());
            if shown != state {
                shown = state;
                print!(
                    "\r{}  Tiempo: {:>2}s  Aciertos: {}   ",
                    game.pattern().unicode(),
                    game.seconds_left(),
                    game.hits()
                );
                stdout().flush()?;
            }
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char(c) => {
                            let expected = game.target();
                            if game.answer(c, &mut events) == Some(false) {
                                print!("\r\nIncorrecto. Era {}.\r\n", expected.to_uppercase());
                                stdout().flush()?;
                            }
                        }
                        _ => {}
                    }
                }
            }
            for wakeup in timer.due(Instant::now()) {
                game.wake(wakeup, &mut events, &mut timer);
            }
        }
        Ok(())
    })();
    terminal::disable_raw_mode()?;
    result?;
    println!();
    feedback.dispatch(&mut events);
    println!("Aciertos: {}", game.hits());
    Ok(())
}

fn run_word_guess(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut game = engine.new_word_game();

    println!("Adivina la palabra letra a letra. 'fin' para salir.");
    loop {
        println!();
        println!("Palabra: {}", game.masked());
        let cells: String = game
            .revealed_cells()
            .iter()
            .map(|c| c.map(|d| d.unicode()).unwrap_or('▢'))
            .collect();
        println!("Braille: {cells}");
        println!(
            "Intentos restantes: {}   Ya has dicho: {}",
            game.attempts_left(),
            game.guessed()
                .map(|c| c.to_uppercase().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        match game.phase() {
            WordPhase::Guessing => {
                let input = prompt("letra> ")?;
                if input == "fin" {
                    break;
                }
                if let Some(letter) = input.chars().next() {
                    game.guess(letter, &mut events);
                    feedback.dispatch(&mut events);
                }
            }
            _ => {
                let again = prompt("¿Jugar de nuevo? (s/n) ")?;
                if again == "s" {
                    game.play_again();
                } else {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn run_sequence(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut timer = TimerQueue::new();
    let mut game = engine.new_sequence_game();
    game.start(&mut events, &mut timer);
    feedback.dispatch(&mut events);

    loop {
        match game.phase() {
            SequencePhase::Replaying => {
                // Show each item for its window; the scheduler re-enables
                // input once the last window elapses.
                println!();
                println!("Ronda: {}", game.sequence().len());
                for cell in game.replay_cells() {
                    print!("{} ", cell.unicode());
                    stdout().flush()?;
                    thread::sleep(ITEM_SHOW);
                    thread::sleep(ITEM_GAP);
                }
                println!();
                for wakeup in timer.due(Instant::now()) {
                    game.wake(wakeup, &mut events, &mut timer);
                }
                feedback.dispatch(&mut events);
            }
            SequencePhase::AwaitingInput => {
                let echo = prompt("secuencia> ")?;
                if echo == "fin" {
                    break;
                }
                match game.submit(&echo, &mut events, &mut timer) {
                    Some(true) => {
                        println!("{}", "¡Bien! Prepárate para la siguiente ronda.".green())
                    }
                    Some(false) => println!("{}", "Te has equivocado.".red()),
                    None => {}
                }
                feedback.dispatch(&mut events);
            }
            SequencePhase::BetweenRounds => {
                if let Some(wait) = timer.until_next(Instant::now()) {
                    thread::sleep(wait);
                }
                for wakeup in timer.due(Instant::now()) {
                    game.wake(wakeup, &mut events, &mut timer);
                }
                feedback.dispatch(&mut events);
            }
            SequencePhase::Finished => {
                println!("Nivel alcanzado: {}", game.rounds_completed());
                break;
            }
            SequencePhase::Idle => break,
        }
    }
    Ok(())
}

fn run_translator() -> braille_core::Result<()> {
    println!("Escribe un texto (máx. 20 caracteres); línea vacía para salir.");
    loop {
        let text = prompt("texto> ")?;
        if text.is_empty() {
            break;
        }
        let cells = translator::translate(&text);
        let line: String = cells
            .iter()
            .map(|(_, dots)| dots.map(|d| d.unicode()).unwrap_or('▢'))
            .collect();
        println!("{line}");
    }
    Ok(())
}

fn run_cell(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut events = Vec::new();
    let mut cell = BrailleCell::new();

    println!("Celda interactiva: activa puntos (1-6), 'borrar' o 'fin'.");
    loop {
        println!();
        print_cell(cell.dot_set());
        match cell.identified() {
            Some(letter) => println!("Letra: {}", letter.to_uppercase()),
            None => println!("Letra: —"),
        }
        let input = prompt("punto> ")?;
        match input.as_str() {
            "fin" => break,
            "borrar" => {
                cell.reset();
                feedback.say("Celda braille reiniciada");
            }
            _ => {
                if let Ok(dot) = input.parse::<usize>() {
                    if (1..=6).contains(&dot) {
                        cell.toggle(dot - 1, &mut events);
                        feedback.dispatch(&mut events);
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_perkins(engine: &TutorEngine) -> braille_core::Result<()> {
    let mut feedback = Feedback::from_engine(engine);
    let mut keyboard = PerkinsKeyboard::new();

    println!("Teclado Perkins: letras f/d/s y j/k/l son los puntos 1-6.");
    println!("Escribe un acorde y pulsa intro para escribir la letra;");
    println!("línea vacía escribe un espacio, 'borrar' retrocede, 'fin' sale.");
    loop {
        println!();
        println!("Texto: {}", keyboard.output());
        let input = prompt("teclas> ")?;
        match input.as_str() {
            "fin" => break,
            "borrar" => {
                if let Some(removed) = keyboard.backspace() {
                    feedback.say(&format!("Carácter eliminado: {removed}"));
                }
            }
            chord => {
                for key in chord.chars() {
                    if let Some(dot) = dot_for_key(key) {
                        keyboard.press_dot(dot);
                    }
                }
                match keyboard.commit() {
                    Committed::Letter(letter) => {
                        feedback.say(&format!("Letra escrita: {letter}"))
                    }
                    Committed::Space => feedback.say("Espacio añadido"),
                    Committed::Unknown => {}
                }
            }
        }
    }
    Ok(())
}

fn run_settings(engine: &mut TutorEngine) -> braille_core::Result<()> {
    // The arithmetic gate keeps children out of the family panel.
    let mut gate = ParentGate::new(StdRng::from_entropy());
    loop {
        let (a, b) = gate.problem();
        let answer = prompt(&format!("{a} + {b} = ? "))?;
        if answer == "fin" {
            return Ok(());
        }
        match answer.parse::<u32>() {
            Ok(n) if gate.verify(n) => break,
            _ => println!("Respuesta incorrecta. Inténtalo de nuevo."),
        }
    }

    let mut bell = TerminalBell;
    loop {
        let s = engine.settings();
        println!();
        println!(
            "Nivel: {} ({})   Texto: {}%   Contraste: {:?}",
            s.level,
            engine.level_label(),
            s.text_size,
            s.contrast
        );
        println!(
            "Narrador: {}   Sonidos: {}   Aciertos: {}%",
            s.narrator_on,
            s.sounds_on,
            engine.success_rate()
        );
        println!("nivel <1-3> | texto | contraste | narrador | sonidos | fin");
        let input = prompt("ajustes> ")?;
        let store = engine.store_mut();
        match input.as_str() {
            "fin" => break,
            "texto" => {
                let size = store.cycle_text_size()?;
                println!("Tamaño de texto al {size} por ciento");
                if store.settings().sounds_on {
                    bell.play(AudioCue::PrimarySuccess);
                }
            }
            "contraste" => {
                store.toggle_contrast()?;
                if store.settings().sounds_on {
                    bell.play(AudioCue::Toggle);
                }
            }
            "narrador" => {
                store.toggle_narrator()?;
                if store.settings().sounds_on {
                    bell.play(AudioCue::Toggle);
                }
            }
            "sonidos" => {
                store.toggle_sounds()?;
            }
            other => {
                if let Some(level) = other.strip_prefix("nivel ") {
                    if let Ok(level) = level.trim().parse::<u8>() {
                        store.set_level(level)?;
                    }
                }
            }
        }
    }
    Ok(())
}

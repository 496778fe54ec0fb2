//! Memory pairs: each letter appears twice on a shuffled board, once as the
//! printed letter and once as its braille pattern. Two face-up cards either
//! lock as a match or flip back after a short delay; the board is locked
//! while a mismatch is showing.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::codec;
use crate::core::types::DotSet;
use crate::feedback::{EventSink, GameEvent, Scheduler, Wakeup};

/// Letters on the default board (six pairs, twelve cards).
pub const DEFAULT_PAIRS: &[char] = &['a', 'b', 'c', 'd', 'e', 'f'];
/// How long a mismatched pair stays visible.
pub const CONCEAL_DELAY: Duration = Duration::from_millis(1000);

/// Which side of the pair a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Letter,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub letter: char,
    pub face: Face,
    pub state: CardState,
}

impl Card {
    /// The pattern side's dots.
    pub fn pattern(&self) -> DotSet {
        codec::encode(self.letter).unwrap_or(DotSet::EMPTY)
    }
}

pub struct MemoryGame {
    cards: Vec<Card>,
    first: Option<usize>,
    mismatch: Option<(usize, usize)>,
    moves: u32,
    found: usize,
    total: usize,
}

impl MemoryGame {
    pub fn start(rng: &mut StdRng) -> Self {
        Self::with_pairs(DEFAULT_PAIRS, rng)
    }

    pub fn with_pairs(pairs: &[char], rng: &mut StdRng) -> Self {
        let mut cards = Vec::with_capacity(pairs.len() * 2);
        for &letter in pairs {
            cards.push(Card { letter, face: Face::Letter, state: CardState::Hidden });
            cards.push(Card { letter, face: Face::Pattern, state: CardState::Hidden });
        }
        cards.shuffle(rng);
        Self {
            cards,
            first: None,
            mismatch: None,
            moves: 0,
            found: 0,
            total: pairs.len(),
        }
    }

    /// Turns the card at `index` face up. Ignored while a mismatch is
    /// showing, and for cards that are already face up or matched.
    pub fn reveal(
        &mut self,
        index: usize,
        sink: &mut dyn EventSink,
        timer: &mut dyn Scheduler,
    ) {
        if self.mismatch.is_some() || index >= self.cards.len() {
            return;
        }
        if self.cards[index].state != CardState::Hidden {
            return;
        }
        self.cards[index].state = CardState::FaceUp;
        sink.on_event(&GameEvent::CardRevealed { index });

        let first = match self.first.take() {
            None => {
                self.first = Some(index);
                return;
            }
            Some(first) => first,
        };

        // Second card of the move: count it and resolve.
        self.moves += 1;
        if self.cards[first].letter == self.cards[index].letter {
            self.cards[first].state = CardState::Matched;
            self.cards[index].state = CardState::Matched;
            self.found += 1;
            sink.on_event(&GameEvent::PairFound {
                letter: self.cards[index].letter,
                found: self.found,
                total: self.total,
            });
            if self.found == self.total {
                sink.on_event(&GameEvent::BoardCompleted { moves: self.moves });
            }
        } else {
            self.mismatch = Some((first, index));
            sink.on_event(&GameEvent::PairMissed { moves: self.moves });
            timer.after(CONCEAL_DELAY, Wakeup::ConcealBoard);
        }
    }

    pub fn wake(&mut self, wakeup: Wakeup, sink: &mut dyn EventSink) {
        if wakeup != Wakeup::ConcealBoard {
            return;
        }
        if let Some((a, b)) = self.mismatch.take() {
            self.cards[a].state = CardState::Hidden;
            self.cards[b].state = CardState::Hidden;
            sink.on_event(&GameEvent::BoardConcealed);
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.found == self.total
    }

    /// Whether reveals are currently accepted.
    pub fn board_unlocked(&self) -> bool {
        self.mismatch.is_none()
    }
}

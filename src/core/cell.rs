//! The interactive braille cell: six toggleable dots that identify the
//! letter they spell after every change. Rendering is the caller's job;
//! this is only the state and the decode-on-change behaviour.

use crate::core::codec;
use crate::core::types::{CellState, DotSet};
use crate::feedback::{EventSink, GameEvent};

#[derive(Default)]
pub struct BrailleCell {
    state: CellState,
    identified: Option<char>,
}

impl BrailleCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the dot at `index` (0..6), re-identifies the letter and
    /// reports both happenings. Returns the dot's new state.
    pub fn toggle(&mut self, index: usize, sink: &mut dyn EventSink) -> bool {
        let on = self.state.toggle(index);
        sink.on_event(&GameEvent::DotToggled { dot: index as u8 + 1, on });
        self.identify(sink);
        on
    }

    /// Loads the pattern for a letter, replacing the current state. Returns
    /// false (leaving the cell untouched) for unsupported characters.
    pub fn set_letter(&mut self, letter: char) -> bool {
        match codec::encode(letter) {
            Some(dots) => {
                self.state = CellState::from_dot_set(dots);
                self.identified = codec::decode(dots);
                true
            }
            None => false,
        }
    }

    pub fn set_pattern(&mut self, dots: DotSet) {
        self.state = CellState::from_dot_set(dots);
        self.identified = codec::decode(dots);
    }

    pub fn reset(&mut self) {
        self.state.clear();
        self.identified = None;
    }

    pub fn dot_set(&self) -> DotSet {
        self.state.dot_set()
    }

    pub fn state(&self) -> &CellState {
        &self.state
    }

    /// The letter the current pattern spells, if any.
    pub fn identified(&self) -> Option<char> {
        self.identified
    }

    fn identify(&mut self, sink: &mut dyn EventSink) {
        let letter = codec::decode(self.state.dot_set());
        if let Some(l) = letter {
            if self.identified != Some(l) {
                sink.on_event(&GameEvent::LetterIdentified { letter: l });
            }
        }
        self.identified = letter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DotSet;

    #[test]
    fn toggling_a_pattern_identifies_the_letter() {
        let mut cell = BrailleCell::new();
        let mut events = Vec::new();
        cell.toggle(0, &mut events); // dot 1 -> 'a'
        assert_eq!(cell.identified(), Some('a'));
        cell.toggle(1, &mut events); // dots 1,2 -> 'b'
        assert_eq!(cell.identified(), Some('b'));

        let identified: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LetterIdentified { .. }))
            .collect();
        assert_eq!(identified.len(), 2);
    }

    #[test]
    fn unknown_pattern_identifies_nothing() {
        let mut cell = BrailleCell::new();
        let mut events = Vec::new();
        cell.toggle(2, &mut events); // dot 3 alone is no letter
        assert_eq!(cell.identified(), None);
        assert!(events
            .iter()
            .all(|e| !matches!(e, GameEvent::LetterIdentified { .. })));
    }

    #[test]
    fn set_letter_loads_the_pattern() {
        let mut cell = BrailleCell::new();
        assert!(cell.set_letter('d'));
        assert_eq!(cell.dot_set(), DotSet::from_dots(&[1, 4, 5]));
        assert!(!cell.set_letter('?'));
        assert_eq!(cell.identified(), Some('d'));

        cell.reset();
        assert!(cell.dot_set().is_empty());
        assert_eq!(cell.identified(), None);
    }
}

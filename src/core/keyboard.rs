//! Virtual Perkins keyboard: dot keys accumulate a chord, the space bar
//! commits it as a character, backspace edits the output.

use crate::core::codec;
use crate::core::types::{CellState, Dot, DotSet};

/// Physical-keyboard home-row mapping: f/d/s drive dots 1/2/3 and j/k/l
/// drive dots 4/5/6, like the two hands on a Perkins brailler.
pub fn dot_for_key(key: char) -> Option<Dot> {
    match key.to_ascii_lowercase() {
        'f' => Some(1),
        'd' => Some(2),
        's' => Some(3),
        'j' => Some(4),
        'k' => Some(5),
        'l' => Some(6),
        _ => None,
    }
}

/// What committing the pending chord produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    /// The chord spelled a letter, now appended to the output.
    Letter(char),
    /// The chord was empty; a space was appended.
    Space,
    /// The chord spelled nothing; it was discarded.
    Unknown,
}

#[derive(Default)]
pub struct PerkinsKeyboard {
    chord: CellState,
    output: String,
}

impl PerkinsKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one dot to the pending chord. Pressing the same dot twice
    /// within a chord is a no-op, like holding the key down.
    pub fn press_dot(&mut self, dot: Dot) {
        if (1..=6).contains(&dot) {
            let index = dot as usize - 1;
            if !self.chord.is_set(index) {
                self.chord.toggle(index);
            }
        }
    }

    /// Commits the pending chord and clears it.
    pub fn commit(&mut self) -> Committed {
        let dots = self.chord.dot_set();
        self.chord.clear();
        if dots.is_empty() {
            self.output.push(' ');
            return Committed::Space;
        }
        match codec::decode(dots) {
            Some(letter) => {
                self.output.push(letter);
                Committed::Letter(letter)
            }
            None => Committed::Unknown,
        }
    }

    /// Removes and returns the last committed character.
    pub fn backspace(&mut self) -> Option<char> {
        self.output.pop()
    }

    pub fn clear(&mut self) {
        self.output.clear();
        self.chord.clear();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn chord(&self) -> DotSet {
        self.chord.dot_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_keys(kb: &mut PerkinsKeyboard, keys: &str) {
        for key in keys.chars() {
            if let Some(dot) = dot_for_key(key) {
                kb.press_dot(dot);
            }
        }
    }

    #[test]
    fn chord_f_d_commits_b() {
        let mut kb = PerkinsKeyboard::new();
        press_keys(&mut kb, "fd"); // dots 1,2
        assert_eq!(kb.commit(), Committed::Letter('b'));
        assert_eq!(kb.output(), "b");
        assert!(kb.chord().is_empty());
    }

    #[test]
    fn empty_chord_commits_a_space() {
        let mut kb = PerkinsKeyboard::new();
        press_keys(&mut kb, "f");
        kb.commit();
        assert_eq!(kb.commit(), Committed::Space);
        assert_eq!(kb.output(), "a ");
    }

    #[test]
    fn unknown_chord_is_discarded() {
        let mut kb = PerkinsKeyboard::new();
        kb.press_dot(3); // dot 3 alone spells nothing
        assert_eq!(kb.commit(), Committed::Unknown);
        assert_eq!(kb.output(), "");
    }

    #[test]
    fn backspace_removes_the_last_character() {
        let mut kb = PerkinsKeyboard::new();
        press_keys(&mut kb, "fd");
        kb.commit();
        press_keys(&mut kb, "f");
        kb.commit();
        assert_eq!(kb.output(), "ba");
        assert_eq!(kb.backspace(), Some('a'));
        assert_eq!(kb.output(), "b");
        assert_eq!(PerkinsKeyboard::new().backspace(), None);
    }

    #[test]
    fn repeated_dot_presses_are_idempotent() {
        let mut kb = PerkinsKeyboard::new();
        kb.press_dot(1);
        kb.press_dot(1);
        assert_eq!(kb.commit(), Committed::Letter('a'));
    }
}

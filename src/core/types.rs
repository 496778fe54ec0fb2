use std::fmt;

use serde::{Deserialize, Serialize};

/// A dot position inside a 6-dot braille cell. Valid values are 1 through 6,
/// numbered column-first: 1-2-3 down the left column, 4-5-6 down the right.
pub type Dot = u8;

/// Number of dots in a braille cell.
pub const CELL_DOTS: usize = 6;

/// An unordered set of active dot positions, the "value" of one braille cell.
///
/// Backed by a 6-bit mask, so set equality is integer equality and is
/// independent of the order dots were toggled in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DotSet(u8);

impl DotSet {
    pub const EMPTY: DotSet = DotSet(0);

    /// Builds a set from dot numbers. Values outside 1..=6 are ignored.
    pub fn from_dots(dots: &[Dot]) -> Self {
        let mut set = DotSet::EMPTY;
        for &dot in dots {
            set.insert(dot);
        }
        set
    }

    pub fn contains(self, dot: Dot) -> bool {
        (1..=6).contains(&dot) && self.0 & (1 << (dot - 1)) != 0
    }

    pub fn insert(&mut self, dot: Dot) {
        if (1..=6).contains(&dot) {
            self.0 |= 1 << (dot - 1);
        }
    }

    pub fn remove(&mut self, dot: Dot) {
        if (1..=6).contains(&dot) {
            self.0 &= !(1 << (dot - 1));
        }
    }

    /// Flips one dot and returns its new state.
    pub fn toggle(&mut self, dot: Dot) -> bool {
        if self.contains(dot) {
            self.remove(dot);
            false
        } else {
            self.insert(dot);
            true
        }
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Active dot numbers in ascending order.
    pub fn dots(self) -> impl Iterator<Item = Dot> {
        (1..=6).filter(move |&d| self.contains(d))
    }

    /// The Unicode braille character for this pattern. The braille block
    /// assigns dots 1..6 to the low bits in the same order as the mask.
    pub fn unicode(self) -> char {
        char::from_u32(0x2800 + self.0 as u32).unwrap_or('⠀')
    }
}

impl fmt::Debug for DotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DotSet{{")?;
        for (i, dot) in self.dots().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{dot}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for DotSet {
    /// Dot numbers separated by commas, the way announcements read them
    /// ("1, 4, 5"); "ninguno" for the empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ninguno");
        }
        for (i, dot) in self.dots().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dot}")?;
        }
        Ok(())
    }
}

/// The mutable state of one interactive braille cell: six dots, each
/// activated or not, addressed by zero-based index.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct CellState {
    dots: [bool; CELL_DOTS],
}

impl CellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the dot at `index` (0..6) and returns its new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.dots[index] = !self.dots[index];
        self.dots[index]
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.dots[index]
    }

    pub fn clear(&mut self) {
        self.dots = [false; CELL_DOTS];
    }

    /// Reads the cell as the set of active dot numbers.
    pub fn dot_set(&self) -> DotSet {
        let mut set = DotSet::EMPTY;
        for (i, &on) in self.dots.iter().enumerate() {
            if on {
                set.insert(i as Dot + 1);
            }
        }
        set
    }

    pub fn from_dot_set(set: DotSet) -> Self {
        let mut cell = CellState::new();
        for dot in set.dots() {
            cell.dots[dot as usize - 1] = true;
        }
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_set_is_order_independent() {
        let mut a = DotSet::EMPTY;
        for d in [3, 1, 2] {
            a.toggle(d);
        }
        for d in [1, 4] {
            a.toggle(d);
        }
        // net effect: {2, 3, 4}
        let b = DotSet::from_dots(&[4, 3, 2]);
        assert_eq!(a, b);
    }

    #[test]
    fn toggle_round_trips() {
        let mut set = DotSet::EMPTY;
        assert!(set.toggle(5));
        assert!(set.contains(5));
        assert!(!set.toggle(5));
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_range_dots_are_ignored() {
        let set = DotSet::from_dots(&[0, 7, 1]);
        assert_eq!(set, DotSet::from_dots(&[1]));
        assert!(!set.contains(0));
        assert!(!set.contains(7));
    }

    #[test]
    fn cell_state_reads_as_dot_set() {
        let mut cell = CellState::new();
        cell.toggle(0);
        cell.toggle(3);
        assert_eq!(cell.dot_set(), DotSet::from_dots(&[1, 4]));
        assert_eq!(CellState::from_dot_set(cell.dot_set()), cell);
    }

    #[test]
    fn display_lists_dots() {
        assert_eq!(DotSet::from_dots(&[1, 4, 5]).to_string(), "1, 4, 5");
        assert_eq!(DotSet::EMPTY.to_string(), "ninguno");
    }
}

//! The braille alphabet table and the pattern codec built on it.
//!
//! Spanish 6-dot literary braille: the 26 base letters, the accented vowels,
//! ñ, the digits (which reuse the a–j patterns, as real braille numerals do)
//! and the space. Encoding is total over that alphabet; everything else maps
//! to `None` and is rendered as an unknown/blank cell by callers.

use crate::core::types::{Dot, DotSet};

/// Letter table in registration order. Decode scans this table front to
/// back, so for the one duplicated pattern (ñ carries the same dots as z)
/// the first-registered letter, z, wins.
const LETTERS: &[(char, &[Dot])] = &[
    ('a', &[1]),
    ('b', &[1, 2]),
    ('c', &[1, 4]),
    ('d', &[1, 4, 5]),
    ('e', &[1, 5]),
    ('f', &[1, 2, 4]),
    ('g', &[1, 2, 4, 5]),
    ('h', &[1, 2, 5]),
    ('i', &[2, 4]),
    ('j', &[2, 4, 5]),
    ('k', &[1, 3]),
    ('l', &[1, 2, 3]),
    ('m', &[1, 3, 4]),
    ('n', &[1, 3, 4, 5]),
    ('o', &[1, 3, 5]),
    ('p', &[1, 2, 3, 4]),
    ('q', &[1, 2, 3, 4, 5]),
    ('r', &[1, 2, 3, 5]),
    ('s', &[2, 3, 4]),
    ('t', &[2, 3, 4, 5]),
    ('u', &[1, 3, 6]),
    ('v', &[1, 2, 3, 6]),
    ('w', &[2, 4, 5, 6]),
    ('x', &[1, 3, 4, 6]),
    ('y', &[1, 3, 4, 5, 6]),
    ('z', &[1, 3, 5, 6]),
    // Spanish extensions, registered after the plain letters.
    ('á', &[1, 2, 3, 5, 6]),
    ('é', &[2, 3, 4, 6]),
    ('í', &[3, 4]),
    ('ó', &[3, 4, 6]),
    ('ú', &[2, 3, 4, 5, 6]),
    ('ñ', &[1, 3, 5, 6]),
];

/// Digits reuse the a–j patterns; which reading applies is the caller's
/// context, not the codec's.
const DIGITS: &[(char, &[Dot])] = &[
    ('1', &[1]),
    ('2', &[1, 2]),
    ('3', &[1, 4]),
    ('4', &[1, 4, 5]),
    ('5', &[1, 5]),
    ('6', &[1, 2, 4]),
    ('7', &[1, 2, 4, 5]),
    ('8', &[1, 2, 5]),
    ('9', &[2, 4]),
    ('0', &[2, 4, 5]),
];

/// Maps a supported character to its dot pattern. Uppercase input is folded
/// to lowercase; the space maps to the empty cell. Returns `None` for
/// anything outside the supported alphabet.
pub fn encode(c: char) -> Option<DotSet> {
    let c = c.to_lowercase().next().unwrap_or(c);
    if c == ' ' {
        return Some(DotSet::EMPTY);
    }
    lookup(LETTERS, c).or_else(|| lookup(DIGITS, c))
}

/// Maps a dot pattern back to a letter. The empty cell decodes to `None`
/// (the Perkins keyboard treats it as a space itself). For the duplicated
/// pattern the first-registered letter is returned.
pub fn decode(dots: DotSet) -> Option<char> {
    if dots.is_empty() {
        return None;
    }
    LETTERS
        .iter()
        .find(|(_, pattern)| DotSet::from_dots(pattern) == dots)
        .map(|&(c, _)| c)
}

/// Digit-mode decode. Patterns outside a–j have no digit reading.
pub fn decode_digit(dots: DotSet) -> Option<char> {
    DIGITS
        .iter()
        .find(|(_, pattern)| DotSet::from_dots(pattern) == dots)
        .map(|&(c, _)| c)
}

/// Exact pattern comparison: same cardinality, same members, no partial
/// credit. Insensitive to the order dots were toggled in.
pub fn matches(actual: DotSet, expected: DotSet) -> bool {
    actual == expected
}

/// The 26 base letters in alphabetical order, the pool the games draw from.
pub fn letters() -> impl Iterator<Item = char> {
    LETTERS.iter().take(26).map(|&(c, _)| c)
}

fn lookup(table: &[(char, &[Dot])], c: char) -> Option<DotSet> {
    table
        .iter()
        .find(|&&(ch, _)| ch == c)
        .map(|&(_, pattern)| DotSet::from_dots(pattern))
}

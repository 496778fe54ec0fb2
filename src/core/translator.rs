//! Text-to-braille translation for rendering layers: each input character
//! becomes a cell, unknown characters become blank cells.

use crate::core::codec;
use crate::core::types::DotSet;

/// Rendering surfaces show at most this many cells.
pub const MAX_INPUT: usize = 20;

/// Lowercases the input, truncates it to [`MAX_INPUT`] characters and maps
/// each one to its pattern; `None` marks a character to render as an
/// unknown/blank cell.
pub fn translate(text: &str) -> Vec<(char, Option<DotSet>)> {
    text.to_lowercase()
        .chars()
        .take(MAX_INPUT)
        .map(|c| (c, codec::encode(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DotSet;

    #[test]
    fn translates_letters_digits_and_spaces() {
        let cells = translate("Sol 12");
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], ('s', Some(DotSet::from_dots(&[2, 3, 4]))));
        assert_eq!(cells[3], (' ', Some(DotSet::EMPTY)));
        assert_eq!(cells[4], ('1', Some(DotSet::from_dots(&[1]))));
    }

    #[test]
    fn unknown_characters_map_to_blank_cells() {
        let cells = translate("a?b");
        assert_eq!(cells[1], ('?', None));
    }

    #[test]
    fn input_is_truncated() {
        let long = "abcdefghij".repeat(3);
        assert_eq!(translate(&long).len(), MAX_INPUT);
    }
}

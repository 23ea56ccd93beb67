use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// Letter held by a cell before word placement or random fill assigns one.
pub const PLACEHOLDER: char = ' ';

/// One grid position with its letter and state flags.
///
/// Identity is positional: two cells compare equal when they sit at the same coordinates, whatever their letter or
/// flags, since the flags change over the life of a game.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    pos: Coord2,
    letter: char,
    blocked: bool,
    bonus: bool,
    consumed: bool,
}

impl Cell {
    pub(crate) const fn new(pos: Coord2) -> Self {
        Self {
            pos,
            letter: PLACEHOLDER,
            blocked: false,
            bonus: false,
            consumed: false,
        }
    }

    pub const fn pos(&self) -> Coord2 {
        self.pos
    }

    pub const fn row(&self) -> Coord {
        self.pos.0
    }

    pub const fn col(&self) -> Coord {
        self.pos.1
    }

    pub const fn letter(&self) -> char {
        self.letter
    }

    pub const fn is_placeholder(&self) -> bool {
        self.letter == PLACEHOLDER
    }

    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub const fn is_bonus(&self) -> bool {
        self.bonus
    }

    /// Whether the cell was part of an accepted word.
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn set_letter(&mut self, letter: char) {
        self.letter = letter;
    }

    pub(crate) fn set_blocked(&mut self) {
        self.blocked = true;
    }

    pub(crate) fn set_bonus(&mut self) {
        self.bonus = true;
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_letter_and_flags() {
        let plain = Cell::new((1, 2));
        let mut marked = Cell::new((1, 2));
        marked.set_letter('Q');
        marked.set_bonus();
        marked.consume();

        assert_eq!(plain, marked);
        assert_ne!(plain, Cell::new((2, 1)));
    }

    #[test]
    fn new_cell_is_placeholder_without_flags() {
        let cell = Cell::new((0, 0));

        assert!(cell.is_placeholder());
        assert!(!cell.is_blocked());
        assert!(!cell.is_bonus());
        assert!(!cell.is_consumed());
    }
}

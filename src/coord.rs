//! Board coordinates and the human-facing `"B7"` notation.
//!
//! Rows are letters starting at `A`, columns are 1-based numbers. Internally
//! both are 0-indexed. Parsing accepts any letter and any positive number so
//! that `"K3"` or `"A11"` become off-board coordinates the board can reject
//! on its own terms.

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;

/// A (row, column) pair, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Neighbour `steps` cells to the right, or below when `vertical`.
    pub fn offset(self, steps: usize, vertical: bool) -> Self {
        if vertical {
            Coord::new(self.row.saturating_add(steps), self.col)
        } else {
            Coord::new(self.row, self.col.saturating_add(steps))
        }
    }

    /// Every on-board coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| Coord::new(r, c)))
    }
}

/// Letter for a row index (`0 -> 'A'`), or `'?'` past `Z`.
pub fn row_label(row: usize) -> char {
    if row < 26 {
        (b'A' + row as u8) as char
    } else {
        '?'
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row), self.col + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordParseError {
    Empty,
    /// First character is not an ASCII letter.
    BadRow(char),
    /// Column part is missing, not a number, or zero.
    BadColumn,
}

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordParseError::Empty => write!(f, "no coordinate given (e.g. B7)"),
            CoordParseError::BadRow(ch) => write!(f, "row '{}' must be a letter A-J", ch),
            CoordParseError::BadColumn => write!(f, "column must be a number 1-10"),
        }
    }
}

impl core::error::Error for CoordParseError {}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row_ch = chars.next().ok_or(CoordParseError::Empty)?;
        if !row_ch.is_ascii_alphabetic() {
            return Err(CoordParseError::BadRow(row_ch));
        }
        let row = (row_ch.to_ascii_uppercase() as u8 - b'A') as usize;
        let col: usize = chars
            .as_str()
            .trim()
            .parse()
            .map_err(|_| CoordParseError::BadColumn)?;
        if col == 0 {
            return Err(CoordParseError::BadColumn);
        }
        Ok(Coord::new(row, col - 1))
    }
}

//! Common types for the engine: cell states, attack outcomes and errors.

use core::fmt;

use crate::coord::Coord;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Water,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// Hit and Miss are terminal; attacking them again is rejected.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Result of an in-bounds attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Target was already Hit or Miss; nothing changed.
    AlreadyAttacked,
    Hit,
    Miss,
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Origin or tail of the segment falls outside the grid.
    OutOfBounds,
    /// A covered cell is not Water.
    Overlap,
    ZeroLength,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship would extend past the board"),
            PlacementError::Overlap => write!(f, "ship would overlap another ship"),
            PlacementError::ZeroLength => write!(f, "ship has no length"),
        }
    }
}

impl core::error::Error for PlacementError {}

/// Recoverable board errors. None of these end a match: the attacker keeps
/// the turn and is asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    InvalidCoordinate(Coord),
    AlreadyAttacked(Coord),
    InvalidPlacement(PlacementError),
}

impl From<PlacementError> for BoardError {
    fn from(err: PlacementError) -> Self {
        BoardError::InvalidPlacement(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidCoordinate(c) => {
                write!(f, "position (row={}, col={}) is off the board", c.row, c.col)
            }
            BoardError::AlreadyAttacked(c) => write!(f, "{} was already attacked", c),
            BoardError::InvalidPlacement(e) => write!(f, "invalid placement: {}", e),
        }
    }
}

impl core::error::Error for BoardError {}

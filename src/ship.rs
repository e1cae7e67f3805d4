//! Ship descriptors and candidate placements.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::BitBoard;
use crate::common::PlacementError;
use crate::config::BOARD_SIZE;
use crate::coord::Coord;

/// Occupancy mask sized for the game board.
pub type Mask = BitBoard<u128, BOARD_SIZE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationParseError;

impl fmt::Display for OrientationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orientation must be H (horizontal) or V (vertical)")
    }
}

impl core::error::Error for OrientationParseError {}

impl FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H" | "h" => Ok(Orientation::Horizontal),
            "V" | "v" => Ok(Orientation::Vertical),
            _ => Err(OrientationParseError),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn length(&self) -> usize {
        self.length
    }
}

/// A candidate segment: origin, length and orientation. Not yet checked
/// against any board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub origin: Coord,
    pub length: usize,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(origin: Coord, length: usize, orientation: Orientation) -> Self {
        Self {
            origin,
            length,
            orientation,
        }
    }

    pub fn horizontal(origin: Coord, length: usize) -> Self {
        Self::new(origin, length, Orientation::Horizontal)
    }

    pub fn vertical(origin: Coord, length: usize) -> Self {
        Self::new(origin, length, Orientation::Vertical)
    }

    /// Cells covered by the segment, starting at the origin. May run off
    /// the board; see [`Placement::mask`].
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let origin = self.origin;
        let vertical = self.orientation == Orientation::Vertical;
        (0..self.length).map(move |i| origin.offset(i, vertical))
    }

    /// Occupancy mask of the segment, or why it cannot exist on the board.
    pub fn mask(&self) -> Result<Mask, PlacementError> {
        if self.length == 0 {
            return Err(PlacementError::ZeroLength);
        }
        if !self.origin.in_bounds() {
            return Err(PlacementError::OutOfBounds);
        }
        let end = match self.orientation {
            Orientation::Horizontal => self.origin.col.saturating_add(self.length),
            Orientation::Vertical => self.origin.row.saturating_add(self.length),
        };
        if end > BOARD_SIZE {
            return Err(PlacementError::OutOfBounds);
        }
        Mask::from_coords(self.cells()).map_err(|_| PlacementError::OutOfBounds)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = match self.orientation {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        };
        write!(f, "{} {} (length {})", self.origin, o, self.length)
    }
}

//! One player's board: ship occupancy plus the record of attacks against it.

use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackOutcome, BoardError, Cell, PlacementError};
use crate::config::{BOARD_SIZE, FLEET};
use crate::coord::Coord;
use crate::ship::{Mask, Orientation, Placement, ShipType};

/// Display-ready copy of a board, as produced by [`Board::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// Cell at `coord`, or `None` off the board.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }
}

/// Ship cells, hits and misses held as masks. Invariants: `hits ⊆ ships`
/// and `misses ∩ ships = ∅`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    ships: Mask,
    hits: Mask,
    misses: Mask,
}

impl Board {
    /// Create an all-water board.
    pub fn new() -> Self {
        let mut board = Board {
            ships: Mask::new(),
            hits: Mask::new(),
            misses: Mask::new(),
        };
        board.initialize();
        board
    }

    /// Reset every cell to water.
    pub fn initialize(&mut self) {
        self.ships.clear_all();
        self.hits.clear_all();
        self.misses.clear_all();
    }

    /// State of one cell, or `None` off the board.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if !coord.in_bounds() {
            return None;
        }
        Some(if self.hits.contains(coord) {
            Cell::Hit
        } else if self.misses.contains(coord) {
            Cell::Miss
        } else if self.ships.contains(coord) {
            Cell::Ship
        } else {
            Cell::Water
        })
    }

    /// Check a placement without touching the board.
    pub fn check_placement(&self, placement: &Placement) -> Result<(), PlacementError> {
        let mask = placement.mask()?;
        if !(mask & (self.ships | self.hits | self.misses)).is_empty() {
            return Err(PlacementError::Overlap);
        }
        Ok(())
    }

    pub fn can_place(&self, placement: &Placement) -> bool {
        self.check_placement(placement).is_ok()
    }

    /// Mark every cell of the segment as ship. Leaves the board untouched
    /// when [`Board::can_place`] would return false.
    pub fn place(&mut self, placement: &Placement) -> Result<(), BoardError> {
        self.check_placement(placement)?;
        let mask = placement.mask()?;
        self.ships = self.ships | mask;
        debug!("placed {}", placement);
        Ok(())
    }

    /// Resolve an attack at `coord`.
    pub fn attack(&mut self, coord: Coord) -> Result<AttackOutcome, BoardError> {
        let cell = self.cell(coord).ok_or(BoardError::InvalidCoordinate(coord))?;
        let outcome = match cell {
            Cell::Hit | Cell::Miss => AttackOutcome::AlreadyAttacked,
            Cell::Ship => {
                self.hits
                    .set(coord)
                    .map_err(|_| BoardError::InvalidCoordinate(coord))?;
                AttackOutcome::Hit
            }
            Cell::Water => {
                self.misses
                    .set(coord)
                    .map_err(|_| BoardError::InvalidCoordinate(coord))?;
                AttackOutcome::Miss
            }
        };
        debug!("attack at {} -> {:?}", coord, outcome);
        Ok(outcome)
    }

    /// True when no ship cell is left un-hit. An empty board counts as
    /// defeated.
    pub fn is_defeated(&self) -> bool {
        self.remaining_ship_cells() == 0
    }

    /// Cells still in the Ship state.
    pub fn remaining_ship_cells(&self) -> usize {
        (self.ships & !self.hits).count_ones()
    }

    /// Ship plus Hit cells; constant once setup is over.
    pub fn fleet_cells(&self) -> usize {
        self.ships.count_ones()
    }

    /// Snapshot for display. With `hide_ships`, un-hit ships read as water.
    pub fn render(&self, hide_ships: bool) -> Grid {
        let mut cells = [[Cell::Water; BOARD_SIZE]; BOARD_SIZE];
        for coord in Coord::all() {
            let cell = self.cell(coord).unwrap_or_default();
            cells[coord.row][coord.col] = match cell {
                Cell::Ship if hide_ships => Cell::Water,
                other => other,
            };
        }
        Grid { cells }
    }

    /// Uniformly random origin and orientation for `ship`, resampled until
    /// it fits. Unbounded; safe for the standard fleet on a 10×10 grid.
    pub fn random_placement<R: Rng + ?Sized>(&self, rng: &mut R, ship: ShipType) -> Placement {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let placement = random_candidate(rng, ship);
            if self.can_place(&placement) {
                trace!("{} fits after {} attempts", ship.name(), attempts);
                return placement;
            }
        }
    }

    /// Place the whole standard fleet at random.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for ship in FLEET {
            let placement = self.random_placement(rng, ship);
            self.place(&placement)?;
        }
        Ok(())
    }
}

/// A candidate that may or may not fit: origin anywhere on the grid.
pub fn random_candidate<R: Rng + ?Sized>(rng: &mut R, ship: ShipType) -> Placement {
    let origin = Coord::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
    let orientation = if rng.random_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    Placement::new(origin, ship.length(), orientation)
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{\n  ships: {:?},\n  hits: {:?},\n  misses: {:?}\n}}",
            self.ships, self.hits, self.misses
        )
    }
}

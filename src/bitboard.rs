//! Fixed-size occupancy masks packed into a single unsigned integer.
//!
//! An `N×N` grid is stored row-major in `T`, so a 10×10 board fits in a
//! `u128`. Out-of-range coordinates are reported instead of wrapping.

use core::ops::{BitAnd, BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::coord::Coord;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// Coordinate lies outside `[0, N)` on either axis.
    OutOfBounds(Coord),
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::OutOfBounds(c) => {
                write!(f, "coordinate (row={}, col={}) is off the board", c.row, c.col)
            }
        }
    }
}

impl core::error::Error for BitBoardError {}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    // Rejects at compile time any `N` that does not fit in `T`.
    const FITS: () = assert!(N * N <= mem::size_of::<T>() * 8);

    #[inline]
    fn board_mask() -> T {
        if Self::CELLS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    /// An empty mask.
    #[inline]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        BitBoard { bits: T::zero() }
    }

    /// Whether `coord` falls inside the `N×N` grid.
    #[inline]
    pub fn in_bounds(coord: Coord) -> bool {
        coord.row < N && coord.col < N
    }

    #[inline]
    fn index(coord: Coord) -> Result<usize, BitBoardError> {
        if Self::in_bounds(coord) {
            Ok(coord.row * N + coord.col)
        } else {
            Err(BitBoardError::OutOfBounds(coord))
        }
    }

    pub fn get(&self, coord: Coord) -> Result<bool, BitBoardError> {
        let idx = Self::index(coord)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Reads a cell, treating off-board coordinates as clear.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.get(coord).unwrap_or(false)
    }

    pub fn set(&mut self, coord: Coord) -> Result<(), BitBoardError> {
        let idx = Self::index(coord)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Builds a mask from a sequence of coordinates, failing on the first
    /// off-board one.
    pub fn from_coords<I>(coords: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for c in coords {
            board.set(c)?;
        }
        Ok(board)
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", N, N)?;
        for r in 0..N {
            for c in 0..N {
                let ch = if self.contains(Coord::new(r, c)) { '■' } else { '□' };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits & rhs.bits }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits | rhs.bits }
    }
}

/// Inverts within the board area; bits past `N*N` stay clear.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn not(self) -> Self {
        BitBoard { bits: !self.bits & Self::board_mask() }
    }
}

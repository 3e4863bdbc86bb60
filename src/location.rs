use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A board dimension. Boards are never empty along either axis.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. Coordinates are 1-indexed; the top left corner is `Location(1, 1)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row, counted from 1 at the top.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, counted from 1 at the left.
    pub fn col(&self) -> Coord {
        self.1
    }

    /// Whether this location lies on a board of `dims`, given in `(width, height)` order.
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        (1..=dims.1.get()).contains(&self.0) && (1..=dims.0.get()).contains(&self.1)
    }

    // zero-based (row, col) into the cell array; only meaningful for in-bounds locations
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0 - 1, self.1 - 1)
    }

    // dense row-major index, used to key per-cell bookkeeping such as the disjoint set
    pub(crate) fn flat_index(&self, width: Dimension) -> usize {
        (self.0 - 1) * width.get() + (self.1 - 1)
    }

    // wraps at 0 so that stepping off the top or left edge lands out of bounds rather than panicking
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0 + 1, value.1 + 1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

use strum::{Display, EnumString, VariantArray};

use crate::location::Location;

/// One of the four sides of a square cell.
///
/// Connector flags are indexed by direction, and the power station moves one step in a direction.
/// Directions parse case-insensitively from either the screen names (`"up"`, `"right"`, ...)
/// or the compass names (`"north"`, `"east"`, ...).
#[derive(Copy, Clone, VariantArray, EnumString, Display, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// North; toward row 1.
    #[strum(to_string = "up", serialize = "north")]
    Up,
    /// East; toward higher columns.
    #[strum(to_string = "right", serialize = "east")]
    Right,
    /// South; toward higher rows.
    #[strum(to_string = "down", serialize = "south")]
    Down,
    /// West; toward column 1.
    #[strum(to_string = "left", serialize = "west")]
    Left,
}

impl Direction {
    /// Directions which, stepping from a location, lead to a cell that comes later in column-major order.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Down, Self::Right];

    /// Attempt the step from `location` in this direction and return the resultant [`Location`].
    ///
    /// The result is not bounds-checked and may lie off the board.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The direction a quarter turn clockwise from this one.
    pub fn clockwise(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not 4-neighbors.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|dir| dir.attempt_from(a) == b)
    }
}

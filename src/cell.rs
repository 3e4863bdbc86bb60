use crate::shape::Direction;

/// The four wire stubs of a piece; a flag is set when a wire leaves the piece on that side.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Connectors {
    /// Stub toward the piece above.
    pub up: bool,
    /// Stub toward the piece to the right.
    pub right: bool,
    /// Stub toward the piece below.
    pub down: bool,
    /// Stub toward the piece to the left.
    pub left: bool,
}

impl Connectors {
    /// Connectors open toward each of `directions`.
    pub fn toward(directions: &[Direction]) -> Self {
        let mut connectors = Self::default();
        directions.iter().for_each(|dir| connectors.set(*dir, true));
        connectors
    }

    /// Whether a wire stub points toward `direction`.
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    pub(crate) fn set(&mut self, direction: Direction, open: bool) {
        match direction {
            Direction::Up => self.up = open,
            Direction::Right => self.right = open,
            Direction::Down => self.down = open,
            Direction::Left => self.left = open,
        }
    }

    /// These connectors turned a quarter turn clockwise: whatever pointed left now points up, and so on.
    pub fn rotated(self) -> Self {
        Self {
            up: self.left,
            right: self.up,
            down: self.right,
            left: self.down,
        }
    }

    /// Number of open stubs.
    pub fn count(&self) -> usize {
        [self.up, self.right, self.down, self.left].into_iter().filter(|open| *open).count()
    }
}

/// A single tile of the board.
///
/// Only the connectors and the station flag are authoritative; `powered` is derived and gets
/// overwritten by every propagation pass.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Piece {
    pub(crate) connectors: Connectors,
    pub(crate) powered: bool,
    pub(crate) power_station: bool,
}

impl Piece {
    pub(crate) fn with_connectors(connectors: Connectors) -> Self {
        Self { connectors, ..Default::default() }
    }

    /// The current (possibly rotated) connectors.
    pub fn connectors(&self) -> Connectors {
        self.connectors
    }

    /// Shorthand for [`Connectors::is_open`] on this piece.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.connectors.is_open(direction)
    }

    /// Whether power reached this piece in the last propagation.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Whether this piece holds the power station.
    pub fn is_power_station(&self) -> bool {
        self.power_station
    }

    /// Turn this piece a quarter turn clockwise. Four turns restore the original connectors.
    pub fn rotate_clockwise(&mut self) {
        self.connectors = self.connectors.rotated();
    }

    /// Turn this piece `times` quarter turns clockwise; only `times % 4` is observable.
    pub fn rotate_times(&mut self, times: u32) {
        (0..times % 4).for_each(|_| self.rotate_clockwise());
    }
}

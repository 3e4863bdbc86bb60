use std::collections::{HashSet, VecDeque};
use std::fmt::{Display, Formatter};

use log::trace;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;

use crate::cell::{Connectors, Piece};
use crate::location::{Dimension, Location};
use crate::shape::Direction;

/// A player action.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Move {
    /// Turn the piece at this location a quarter turn clockwise.
    Rotate(Location),
    /// Step the power station one cell along a matched connection.
    MoveStation(Direction),
}

/// What a [`Move`] did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outcome {
    /// The board changed, and power was recomputed before returning.
    pub changed: bool,
    /// Every piece is powered after the move.
    pub won: bool,
}

/// A rectangular board of [`Piece`]s with exactly one power station.
///
/// Boards are made with a [`PuzzleBuilder`](crate::PuzzleBuilder) or [`Board::new_puzzle`].
/// Dimensions never change after construction; only rotations and station moves mutate the board,
/// and powered flags are recomputed from scratch after each of them.
#[derive(Clone, Debug)]
pub struct Board {
    // indexed (row - 1, col - 1)
    pub(crate) pieces: Array2<Piece>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) station: Location,
}

impl Board {
    /// A board laid out with `connectors`, the station at `Location(1, 1)`, and power not yet propagated.
    ///
    /// `connectors` must be shaped `(height, width)` to match `dims`.
    pub(crate) fn laid_out(dims: (Dimension, Dimension), connectors: Array2<Connectors>) -> Self {
        debug_assert_eq!(connectors.dim(), (dims.1.get(), dims.0.get()));
        let mut pieces = connectors.map(|c| Piece::with_connectors(*c));
        let station = Location(1, 1);
        pieces[station.as_index()].power_station = true;

        Self { pieces, dims, station }
    }

    /// Like [`Self::laid_out`], taking the dimensions from the shape of `connectors`.
    ///
    /// Returns [`None`] if `connectors` is empty along either axis.
    #[cfg(test)]
    pub(crate) fn from_connectors(connectors: Array2<Connectors>) -> Option<Self> {
        use std::num::NonZero;

        let dims = (NonZero::new(connectors.ncols())?, NonZero::new(connectors.nrows())?);
        Some(Self::laid_out(dims, connectors))
    }

    /// Dimensions in `(width, height)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The piece at `location`, or [`None`] off the board.
    pub fn cell_at(&self, location: Location) -> Option<&Piece> {
        if location.within(self.dims) {
            self.pieces.get(location.as_index())
        } else {
            None
        }
    }

    pub(crate) fn cell_at_mut(&mut self, location: Location) -> Option<&mut Piece> {
        if location.within(self.dims) {
            self.pieces.get_mut(location.as_index())
        } else {
            None
        }
    }

    /// The location one step from `location` toward `direction`, or [`None`] past the edge of the board.
    pub fn neighbor(&self, location: Location, direction: Direction) -> Option<Location> {
        if !location.within(self.dims) {
            return None;
        }
        Some(direction.attempt_from(location)).filter(|next| next.within(self.dims))
    }

    /// Whether the piece at `location` and its neighbor toward `direction` have wires meeting across their shared side.
    ///
    /// Reads the current connectors, so the answer changes as pieces are rotated.
    pub fn connected(&self, location: Location, direction: Direction) -> bool {
        let Some(next) = self.neighbor(location, direction) else {
            return false;
        };

        match (self.cell_at(location), self.cell_at(next)) {
            (Some(here), Some(there)) => here.is_open(direction) && there.is_open(direction.invert()),
            _ => false,
        }
    }

    /// Where the power station currently sits.
    pub fn station(&self) -> Location {
        self.station
    }

    /// All pieces with their locations, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Location, &Piece)> + '_ {
        self.pieces.indexed_iter().map(|(index, piece)| (Location::from(index), piece))
    }

    /// Number of pieces powered by the last propagation.
    pub fn powered_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.powered).count()
    }

    /// Whether every piece is powered.
    pub fn is_won(&self) -> bool {
        self.pieces.iter().all(|piece| piece.powered)
    }

    /// Recompute every powered flag by a breadth-first flood from the station, returning how many pieces are powered.
    pub fn propagate(&mut self) -> usize {
        let mut visited: HashSet<Location> = HashSet::with_capacity(self.pieces.len());
        let mut queue = VecDeque::from([self.station]);

        while let Some(location) = queue.pop_front() {
            // a piece can be queued by two neighbors before it is visited
            if !visited.insert(location) {
                continue;
            }
            if let Some(piece) = self.cell_at_mut(location) {
                piece.powered = true;
            }

            for direction in Direction::VARIANTS {
                if let Some(next) = self.neighbor(location, *direction) {
                    if !visited.contains(&next) && self.connected(location, *direction) {
                        queue.push_back(next);
                    }
                }
            }
        }

        for (index, piece) in self.pieces.indexed_iter_mut() {
            if !visited.contains(&Location::from(index)) {
                piece.powered = false;
            }
        }

        trace!("propagated power from {} to {} of {} pieces", self.station, visited.len(), self.pieces.len());
        visited.len()
    }

    /// Move the station one step toward `direction` if the station's piece is connected that way.
    ///
    /// Returns whether the station moved. This does not recompute power; see [`Self::play`].
    pub fn move_station(&mut self, direction: Direction) -> bool {
        if !self.connected(self.station, direction) {
            return false;
        }
        let Some(next) = self.neighbor(self.station, direction) else {
            return false;
        };

        let from = self.station;
        self.pieces[from.as_index()].power_station = false;
        self.pieces[next.as_index()].power_station = true;
        self.station = next;

        trace!("moved the station {} from {} to {}", direction, from, next);
        true
    }

    /// Rotate the piece at `location` clockwise and recompute power. Returns whether `location` was on the board.
    pub fn rotate(&mut self, location: Location) -> bool {
        let Some(piece) = self.cell_at_mut(location) else {
            return false;
        };
        piece.rotate_clockwise();

        trace!("rotated {}", location);
        self.propagate();
        true
    }

    /// Apply a player action, recomputing power whenever the board changed.
    pub fn play(&mut self, action: Move) -> Outcome {
        let changed = match action {
            Move::Rotate(location) => self.rotate(location),
            Move::MoveStation(direction) => {
                let moved = self.move_station(direction);
                if moved {
                    self.propagate();
                }
                moved
            }
        };

        Outcome { changed, won: self.is_won() }
    }

    /// Move the station by a direction name such as `"up"` or `"west"`. Unrecognized names do nothing.
    pub fn press(&mut self, key: &str) -> Outcome {
        match key.parse::<Direction>() {
            Ok(direction) => self.play(Move::MoveStation(direction)),
            Err(_) => {
                trace!("ignored unrecognized key {:?}", key);
                Outcome { changed: false, won: self.is_won() }
            }
        }
    }

    /// The currently matched connections as an undirected graph over every cell, edges labelled with their forward direction.
    pub fn wiring(&self) -> UnGraphMap<Location, Direction> {
        let mut graph = UnGraphMap::with_capacity(self.pieces.len(), self.pieces.len() * 2);
        for (location, _) in self.pieces() {
            graph.add_node(location);
            for direction in Direction::FORWARD_VARIANTS {
                if self.connected(location, *direction) {
                    graph.add_edge(location, direction.attempt_from(location), *direction);
                }
            }
        }
        graph
    }
}

// glyphs indexed by open sides: up = 1, right = 2, down = 4, left = 8
const LIGHT_GLYPHS: [char; 16] = ['·', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼'];
const HEAVY_GLYPHS: [char; 16] = ['·', '╹', '╺', '┗', '╻', '┃', '┏', '┣', '╸', '┛', '━', '┻', '┓', '┫', '┳', '╋'];

fn glyph(piece: &Piece) -> char {
    if piece.power_station {
        return '*';
    }

    let c = piece.connectors;
    let mask = c.up as usize | (c.right as usize) << 1 | (c.down as usize) << 2 | (c.left as usize) << 3;
    if piece.powered { HEAVY_GLYPHS[mask] } else { LIGHT_GLYPHS[mask] }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let glyphs = self.pieces.map(glyph);
        let mut out = String::with_capacity(glyphs.len() * 3 + glyphs.nrows());

        for row in glyphs.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}

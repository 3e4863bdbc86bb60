#![warn(missing_docs)]

//! # `lightwire`
//!
//! An engine for the wire-rotation puzzle in which a rectangular grid of pieces must be turned until every piece
//! is powered by a single power station.
//! Begin by building a board with a [`PuzzleBuilder`] (or the [`Board::new_puzzle`] shorthand).
//! Then feed player actions to [`Board::play`], which reports whether the board changed and whether every piece is now powered.
//!
//! # Internals
//! A board of `width * height` pieces is viewed as a 4-neighbor lattice graph.
//! Generation enumerates every adjacent pair of cells once, gives each pair a random weight from a single seeded
//! ChaCha8 stream, and runs Kruskal's algorithm over a [`DisjointSet`](union_find::DisjointSet).
//! The result is a random spanning tree, so there is exactly one wire path between any two pieces and none is redundant.
//! Each tree edge opens the facing connectors of its two pieces, and every piece is then turned a random number of quarter turns.
//!
//! Two neighboring pieces conduct only if each has a wire stub pointing at the other.
//! After every rotation or station move, power is recomputed from scratch by a breadth-first flood out of the station,
//! following only conducting pairs.

pub use board::{Board, Move, Outcome};
pub use builder::{BuilderInvalidReason, InvalidConfiguration, PuzzleBuilder};
pub use cell::{Connectors, Piece};
pub use location::{Dimension, Location};
pub use shape::Direction;

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod cell;
pub(crate) mod shape;
pub mod builder;
pub mod generator;
pub mod union_find;

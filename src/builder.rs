//! Puzzle construction and configuration.

use std::num::NonZero;

use itertools::Itertools;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::board::Board;
use crate::generator::{self, Weight, DEFAULT_WEIGHT_BOUND};
use crate::location::Dimension;

/// Default quarter-turn budget per piece when scrambling; each piece gets `0..=DEFAULT_MAX_ROTATIONS` turns.
pub const DEFAULT_MAX_ROTATIONS: u32 = 24;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// Boards need at least one row and one column.
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Edge weights were set to be drawn from an empty range.
    #[error("edge weights must be drawn from a non-empty range")]
    EmptyWeightRange,
}

/// Returned by [`PuzzleBuilder::build`] when the configuration is unusable.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid puzzle configuration: {}", .reasons.iter().join("; "))]
pub struct InvalidConfiguration {
    /// Every problem found, in the order the offending settings were made.
    pub reasons: Vec<BuilderInvalidReason>,
}

/// Builds a solvable, scrambled puzzle.
///
/// Generation draws from one ChaCha8 stream: first a weight for every candidate edge, then a rotation
/// count for every piece, both in column-major order. A fixed [`seed`](Self::seed) therefore always
/// reproduces the same board; without one the stream is seeded from OS entropy.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    // width, height
    dims: Option<(Dimension, Dimension)>,
    seed: Option<u64>,
    weight_bound: Weight,
    scramble: bool,
    max_rotations: u32,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(width, height)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims: Some(dims),
            seed: None,
            weight_bound: DEFAULT_WEIGHT_BOUND,
            scramble: true,
            max_rotations: DEFAULT_MAX_ROTATIONS,
            invalid_reasons: Default::default(),
        }
    }

    /// Like [`Self::with_dims`], but from plain integers.
    ///
    /// A zero dimension puts the builder in a [`NonPositiveDimension`](BuilderInvalidReason::NonPositiveDimension) invalid state.
    pub fn new(width: usize, height: usize) -> Self {
        match (NonZero::new(width), NonZero::new(height)) {
            (Some(w), Some(h)) => Self::with_dims((w, h)),
            _ => {
                let mut builder = Self::default();
                builder.dims = None;
                builder.invalid_reasons.push(BuilderInvalidReason::NonPositiveDimension { width, height });
                builder
            }
        }
    }

    /// Seed the random stream, making the generated board reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Draw edge weights from `0..bound`.
    ///
    /// May cause the builder to enter an [`EmptyWeightRange`](BuilderInvalidReason::EmptyWeightRange) invalid state if `bound` is 0.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn weight_bound(&mut self, bound: Weight) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if bound == 0 {
            self.invalid_reasons.push(BuilderInvalidReason::EmptyWeightRange);
            return self;
        }

        self.weight_bound = bound;
        self
    }

    /// Whether to rotate every piece a random number of times after laying out the wiring.
    /// An unscrambled board is already solved.
    pub fn scramble(&mut self, scramble: bool) -> &mut Self {
        self.scramble = scramble;
        self
    }

    /// Give each piece between 0 and `max` quarter turns (inclusive) when scrambling.
    pub fn max_rotations(&mut self, max: u32) -> &mut Self {
        self.max_rotations = max;
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Generate a board: lay out a random spanning tree of wires, scramble it if enabled, and propagate power.
    pub fn build(&self) -> Result<Board, InvalidConfiguration> {
        let dims = match self.dims {
            Some(dims) if self.invalid_reasons.is_empty() => dims,
            _ => {
                debug!("refusing to build: {:?}", self.invalid_reasons);
                return Err(InvalidConfiguration { reasons: self.invalid_reasons.clone() });
            }
        };

        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        debug!("generating a {}x{} board with seed {:?}", dims.0, dims.1, self.seed);

        let tree = generator::generate(dims, self.weight_bound, &mut rng);
        let mut board = Board::laid_out(dims, tree.connectors());

        if self.scramble {
            // column-major, matching the edge enumeration
            let mut column_major = board.pieces.view_mut().reversed_axes();
            for piece in column_major.iter_mut() {
                piece.rotate_times(rng.gen_range(0..=self.max_rotations));
            }
        }

        board.propagate();
        Ok(board)
    }
}

impl Board {
    /// A scrambled puzzle of the given size with default settings, reproducible if `seed` is given.
    ///
    /// Fails with [`NonPositiveDimension`](BuilderInvalidReason::NonPositiveDimension) if either dimension is 0.
    pub fn new_puzzle(width: usize, height: usize, seed: Option<u64>) -> Result<Board, InvalidConfiguration> {
        let mut builder = PuzzleBuilder::new(width, height);
        if let Some(seed) = seed {
            builder.seed(seed);
        }
        builder.build()
    }
}

//! Random spanning-tree generation: candidate edges, random weights, and Kruskal's algorithm.

use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graphmap::UnGraphMap;
use rand::Rng;
use unordered_pair::UnorderedPair;

use crate::cell::Connectors;
use crate::location::{Dimension, Location};
use crate::shape::Direction;
use crate::union_find::DisjointSet;

/// Random ordering key of a candidate edge. It carries no meaning once the tree is built.
pub type Weight = u32;

/// Weights are drawn from `0..DEFAULT_WEIGHT_BOUND` unless configured otherwise.
pub const DEFAULT_WEIGHT_BOUND: Weight = 25;

/// A candidate connection between two 4-adjacent cells.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Edge {
    /// Endpoints, in enumeration order.
    pub nodes: UnorderedPair<Location>,
    /// Direction from `nodes.0` to `nodes.1`; always one of [`Direction::FORWARD_VARIANTS`].
    pub direction: Direction,
    /// Ordering key; lighter edges are considered first.
    pub weight: Weight,
}

impl Edge {
    /// The unweighted edge from `location` one step toward `direction`.
    pub fn new(location: Location, direction: Direction) -> Self {
        Self {
            nodes: UnorderedPair(location, direction.attempt_from(location)),
            direction,
            weight: 0,
        }
    }

    /// The same edge with `weight`.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Whether both endpoints lie on a board of `dims` and `direction` actually leads from one to the other.
    pub fn fits(&self, dims: (Dimension, Dimension)) -> bool {
        let UnorderedPair(from, to) = self.nodes;
        from.within(dims) && to.within(dims) && self.direction.attempt_from(from) == to
    }
}

/// Every 4-adjacent pair of cells on a board of `dims`, each unordered pair exactly once.
///
/// Cells are visited column-major (column 1 top to bottom, then column 2, ...);
/// each contributes its edge downward, then its edge to the right, where those exist.
pub fn candidate_edges(dims: (Dimension, Dimension)) -> Vec<Edge> {
    let (width, height) = (dims.0.get(), dims.1.get());
    let mut edges = Vec::with_capacity((width - 1) * height + (height - 1) * width);

    for col in 1..=width {
        for row in 1..=height {
            let location = Location(row, col);
            for direction in Direction::FORWARD_VARIANTS {
                if direction.attempt_from(location).within(dims) {
                    edges.push(Edge::new(location, *direction));
                }
            }
        }
    }

    edges
}

/// Give every edge a weight drawn uniformly from `0..bound`, in slice order, all from the single source `rng`.
pub fn weigh_edges<R: Rng + ?Sized>(edges: &mut [Edge], bound: Weight, rng: &mut R) {
    debug_assert!(bound > 0);
    for edge in edges.iter_mut() {
        edge.weight = rng.gen_range(0..bound);
    }
}

/// The accepted edges of a generated wiring layout.
#[derive(Clone, Debug)]
pub struct SpanningTree {
    dims: (Dimension, Dimension),
    edges: Vec<Edge>,
}

/// Randomized Kruskal: accept edges in ascending weight order, skipping any that would close a cycle.
///
/// Ties keep the order of `edges`, so a fixed edge list always yields the same tree.
/// Edges that do not [fit](Edge::fits) the board are skipped. Given less than every candidate edge,
/// the result may be a forest; check it with [`SpanningTree::is_spanning`].
pub fn kruskal(dims: (Dimension, Dimension), edges: Vec<Edge>) -> SpanningTree {
    let width = dims.0;
    let cell_count = dims.0.get() * dims.1.get();
    let mut components = DisjointSet::new(cell_count);
    let mut accepted = Vec::with_capacity(cell_count - 1);

    for edge in edges.into_iter().filter(|edge| edge.fits(dims)).sorted_by_key(|edge| edge.weight) {
        let UnorderedPair(a, b) = edge.nodes;
        let root_a = components.find(a.flat_index(width));
        let root_b = components.find(b.flat_index(width));

        // equal roots means the endpoints are already joined; this edge would close a cycle
        if root_a != root_b {
            accepted.push(edge);
            components.union(root_a, root_b);
        }
    }

    debug!("accepted {} edges for a {}x{} board", accepted.len(), dims.0, dims.1);

    SpanningTree { dims, edges: accepted }
}

/// Enumerate, weigh and reduce the candidate edges of a board of `dims` to a random spanning tree.
pub fn generate<R: Rng + ?Sized>(dims: (Dimension, Dimension), bound: Weight, rng: &mut R) -> SpanningTree {
    let mut edges = candidate_edges(dims);
    weigh_edges(&mut edges, bound, rng);
    kruskal(dims, edges)
}

impl SpanningTree {
    /// Accepted edges, in the order they were accepted.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of accepted edges; `width * height - 1` for any generated tree.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edges were accepted, which only happens on a 1x1 board.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The tree as an undirected graph over every cell of the board, edges labelled with their forward direction.
    pub fn graph(&self) -> UnGraphMap<Location, Direction> {
        let mut graph = UnGraphMap::with_capacity(self.dims.0.get() * self.dims.1.get(), self.edges.len());
        for col in 1..=self.dims.0.get() {
            for row in 1..=self.dims.1.get() {
                graph.add_node(Location(row, col));
            }
        }
        for edge in &self.edges {
            graph.add_edge(edge.nodes.0, edge.nodes.1, edge.direction);
        }
        graph
    }

    /// Whether the edges reach every cell and contain no cycle.
    pub fn is_spanning(&self) -> bool {
        let graph = self.graph();
        connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
    }

    /// Connector flags laid out by this tree: both endpoints of every edge open toward each other.
    ///
    /// Indexed `(row - 1, col - 1)`.
    pub fn connectors(&self) -> Array2<Connectors> {
        let mut connectors = Array2::from_shape_simple_fn((self.dims.1.get(), self.dims.0.get()), Connectors::default);
        for edge in &self.edges {
            let UnorderedPair(from, to) = edge.nodes;
            connectors[from.as_index()].set(edge.direction, true);
            connectors[to.as_index()].set(edge.direction.invert(), true);
        }
        connectors
    }
}

//! A minimal disjoint-set forest used while generating puzzles.

/// Disjoint-set forest over the cells of a board, keyed by dense cell index.
///
/// Only used while generating a puzzle. `union` always hangs its first root under its second
/// and there is no rank or size balancing, so the representatives it produces are fully
/// determined by the order of calls.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    representatives: Vec<usize>,
}

impl DisjointSet {
    /// A forest of `len` singleton sets, each element its own representative.
    pub fn new(len: usize) -> Self {
        Self { representatives: (0..len).collect() }
    }

    /// Number of elements in the forest.
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    /// Whether the forest has no elements.
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Walk the representative chain from `x` until reaching an element that represents itself.
    ///
    /// Panics if `x` is not below [`Self::len`], like indexing a slice.
    pub fn find(&self, x: usize) -> usize {
        let mut root = x;
        while self.representatives[root] != root {
            root = self.representatives[root];
        }
        root
    }

    /// Attach the set rooted at `root_a` under `root_b`.
    ///
    /// Both arguments must already be representatives (resolve them with [`Self::find`] first) and must differ.
    pub fn union(&mut self, root_a: usize, root_b: usize) {
        debug_assert_eq!(self.find(root_a), root_a);
        debug_assert_eq!(self.find(root_b), root_b);
        debug_assert_ne!(root_a, root_b);
        self.representatives[root_a] = root_b;
    }

    /// Whether `a` and `b` are in the same set.
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

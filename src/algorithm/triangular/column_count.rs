//! # Column counts
//!
//! Number of values in each column of the Cholesky factor `L` of `A` (or of `A^T A`), computed
//! from the elimination tree and its post-ordering without forming `L`.
//!
//! Every row `i` of `L` is the union of paths in the elimination tree. Walking the columns in
//! post-order, a value `A[i, j]` only starts a new path when `j` is a leaf of the row subtree of
//! `i`. Each new path adds one to the count of `j`, and the least common ancestor with the
//! previous leaf of that row gets one subtracted, because the paths merge there. Summing these
//! differences up the tree gives the counts.
use std::mem;

use cumsum::cumsum_owned;
use tracing::{debug, trace};

use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::NONE;
use crate::error::MatrixError;

/// How a column relates to the row subtree of a row.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) enum Leaf {
    /// The column is not a leaf, the value doesn't start a new path.
    NotLeaf,
    /// The first leaf found for this row.
    First,
    /// A later leaf; the new path merges with the previous one at `ancestor`.
    Subsequent {
        /// Least common ancestor of this leaf and the previous leaf of the row.
        ancestor: usize,
    },
}

/// Computes column counts, reusing its memory across calls.
///
/// When `ata` is false, the matrix must be square and only its upper triangle is used. When it is
/// true, the counts are those of the factor of `A^T A`, for any `m x n` matrix `A`.
#[derive(Clone, Debug)]
pub struct ColumnCounts {
    ata: bool,
    nr_rows: usize,
    nr_columns: usize,

    /// Pattern of `A^T`, one column per row of `A`.
    transpose_pointers: Vec<usize>,
    transpose_rows: Vec<usize>,

    /// Union-find structure over the nodes that were processed.
    ancestor: Vec<usize>,
    /// Largest `first[j]` seen so far for a value `A[i, j]`, by row `i`. `NONE` is below all.
    max_first: Vec<usize>,
    /// Most recently found leaf of the row subtree, by row.
    previous_leaf: Vec<usize>,
    /// Post-order index of the first descendant, by node.
    first: Vec<usize>,

    /// Rows of `A` grouped by the smallest post-order index of their columns, only for ata.
    head: Vec<usize>,
    next: Vec<usize>,

    delta: Vec<isize>,
}

impl ColumnCounts {
    /// Create an instance that has not allocated yet.
    ///
    /// # Arguments
    ///
    /// * `ata`: Whether to compute the counts for `A^T A` instead of `A`.
    pub fn new(ata: bool) -> Self {
        Self {
            ata,
            nr_rows: 0,
            nr_columns: 0,
            transpose_pointers: Vec::new(),
            transpose_rows: Vec::new(),
            ancestor: Vec::new(),
            max_first: Vec::new(),
            previous_leaf: Vec::new(),
            first: Vec::new(),
            head: Vec::new(),
            next: Vec::new(),
            delta: Vec::new(),
        }
    }

    /// Compute the column counts.
    ///
    /// # Arguments
    ///
    /// * `a`: Matrix with the pattern to analyze.
    /// * `parent`: Elimination tree, as computed with the same `ata` setting.
    /// * `post`: Post-ordering of the elimination tree.
    /// * `counts`: Output, the number of values in each column of the factor, diagonal included.
    /// Only the first `n` values are written.
    ///
    /// # Errors
    ///
    /// When one of the slices is shorter than the number of columns of `A`, or when `A` is not
    /// square while its own pattern is analyzed.
    pub fn process<F: Field>(
        &mut self,
        a: &CscMatrix<F>,
        parent: &[Option<usize>],
        post: &[usize],
        counts: &mut [usize],
    ) -> Result<(), MatrixError> {
        let n = a.nr_columns;
        for (name, len) in [("parent", parent.len()), ("post", post.len()), ("counts", counts.len())] {
            if len < n {
                return Err(MatrixError::argument(format!(
                    "{} has length {} but there are {} columns", name, len, n,
                )));
            }
        }

        if !self.ata && a.nr_rows != n {
            return Err(MatrixError::dimensions("column_counts", format!(
                "the pattern of A needs a square matrix, got {} x {}", a.nr_rows, n,
            )));
        }

        self.initialize(a);
        self.find_first_descendant(parent, post);
        if self.ata {
            self.init_ata(post);
        }
        for (i, ancestor) in self.ancestor.iter_mut().enumerate() {
            *ancestor = i;
        }

        for k in 0..n {
            let j = post[k];
            if let Some(p) = parent[j] {
                // j is not a root
                self.delta[p] -= 1;
            }

            let mut current = if self.ata { self.head[k] } else { j };
            while current != NONE {
                for index in self.transpose_pointers[current]..self.transpose_pointers[current + 1] {
                    let i = self.transpose_rows[index];
                    match self.is_leaf(i, j) {
                        Leaf::NotLeaf => {},
                        Leaf::First => self.delta[j] += 1,
                        Leaf::Subsequent { ancestor } => {
                            self.delta[j] += 1;
                            self.delta[ancestor] -= 1;
                        },
                    }
                }
                current = if self.ata { self.next[current] } else { NONE };
            }

            if let Some(p) = parent[j] {
                self.ancestor[j] = p;
            }
            trace!(node = j, delta = self.delta[j], "column count delta");
        }

        // Parents come after their children
        for j in 0..n {
            if let Some(p) = parent[j] {
                self.delta[p] += self.delta[j];
            }
        }
        for (count, &total) in counts.iter_mut().zip(&self.delta) {
            // Non-negative for a valid elimination tree
            *count = usize::try_from(total).unwrap_or_default();
        }

        debug!(nr_rows = self.nr_rows, nr_columns = n, ata = self.ata, nz_length = counts[..n].iter().sum::<usize>(), "column counts");

        Ok(())
    }

    /// Size the workspace for `A` and compute the pattern of its transpose.
    pub(crate) fn initialize<F: Field>(&mut self, a: &CscMatrix<F>) {
        let (m, n) = (a.nr_rows, a.nr_columns);
        self.nr_rows = m;
        self.nr_columns = n;

        // Counting sort on the row indices
        self.transpose_pointers.clear();
        self.transpose_pointers.resize(m + 1, 0);
        for &row in a.row_indices() {
            self.transpose_pointers[row + 1] += 1;
        }
        self.transpose_pointers = cumsum_owned(mem::take(&mut self.transpose_pointers));
        self.transpose_rows.clear();
        self.transpose_rows.resize(a.nz_length, 0);
        let mut position = self.transpose_pointers[..m].to_vec();
        for column in 0..n {
            for &row in &a.row_indices[a.column_range(column)] {
                self.transpose_rows[position[row]] = column;
                position[row] += 1;
            }
        }

        for (array, len) in [
            (&mut self.ancestor, n),
            (&mut self.max_first, n),
            (&mut self.previous_leaf, n),
            (&mut self.first, n),
        ] {
            array.clear();
            array.resize(len, NONE);
        }
        if self.ata {
            self.head.clear();
            self.head.resize(n + 1, NONE);
            self.next.clear();
            self.next.resize(m, NONE);
        }
        self.delta.clear();
        self.delta.resize(n, 0);
    }

    /// Find the first descendant of every node in post-order, and start the differences at one
    /// for the leaves of the tree.
    pub(crate) fn find_first_descendant(&mut self, parent: &[Option<usize>], post: &[usize]) {
        for (k, &node) in post[..self.nr_columns].iter().enumerate() {
            self.delta[node] = if self.first[node] == NONE { 1 } else { 0 };

            // Nodes on the path to the root that were not seen yet have this as first descendant
            let mut current = Some(node);
            while let Some(j) = current && self.first[j] == NONE {
                self.first[j] = k;
                current = parent[j];
            }
        }
    }

    /// Group the rows of `A` by the first column, in post-order, in which they have a value.
    fn init_ata(&mut self, post: &[usize]) {
        let n = self.nr_columns;

        // The ancestor array holds the inverse post-ordering until the main loop starts
        for (k, &j) in post[..n].iter().enumerate() {
            self.ancestor[j] = k;
        }

        for i in 0..self.nr_rows {
            let range = self.transpose_pointers[i]..self.transpose_pointers[i + 1];
            let k = self.transpose_rows[range].iter()
                .map(|&column| self.ancestor[column])
                .min()
                .unwrap_or(n);
            self.next[i] = self.head[k];
            self.head[k] = i;
        }
    }

    /// Determine whether `j` is a leaf of the row subtree of `i`, and update the bookkeeping.
    pub(crate) fn is_leaf(&mut self, i: usize, j: usize) -> Leaf {
        if i <= j || (self.max_first[i] != NONE && self.first[j] <= self.max_first[i]) {
            return Leaf::NotLeaf;
        }

        self.max_first[i] = self.first[j];
        let previous = self.previous_leaf[i];
        self.previous_leaf[i] = j;
        if previous == NONE {
            return Leaf::First;
        }

        // Root of the set containing the previous leaf
        let mut root = previous;
        while root != self.ancestor[root] {
            root = self.ancestor[root];
        }
        // Path compression
        let mut node = previous;
        while node != root {
            let next = self.ancestor[node];
            self.ancestor[node] = root;
            node = next;
        }

        Leaf::Subsequent { ancestor: root }
    }
}

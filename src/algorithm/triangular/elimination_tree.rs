//! # Elimination tree
//!
//! The parent of node `i` in the elimination tree of a symmetric matrix `A = L L^T` is the row
//! index of the first off-diagonal value in column `i` of `L`. The tree is computed from the
//! pattern of `A` directly, or from the pattern of a rectangular `A` for the product `A^T A`
//! without forming that product.
use tracing::{debug, trace};

use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::{GrowArray, NONE};
use crate::error::MatrixError;

/// Compute the elimination tree.
///
/// Ancestors are tracked with path compression, such that the total work is nearly linear in the
/// number of values of `A`.
///
/// # Arguments
///
/// * `a`: When `ata` is false, a square matrix of which only the upper triangle is read (values
/// below the diagonal are ignored). When `ata` is true, any `m x n` matrix.
/// * `ata`: Whether to compute the tree of `A^T A` instead of the tree of `A`.
/// * `parent`: Output, the parent of each of the `n` nodes, `None` for roots. Only the first `n`
/// values are written.
/// * `work`: Workspace of length `n`, or `n + m` when `ata` is true.
///
/// # Errors
///
/// When `parent` is shorter than the number of columns of `A`.
pub fn elimination_tree<F: Field>(
    a: &CscMatrix<F>,
    ata: bool,
    parent: &mut [Option<usize>],
    work: &mut GrowArray<usize>,
) -> Result<(), MatrixError> {
    let (m, n) = (a.nr_rows, a.nr_columns);
    if parent.len() < n {
        return Err(MatrixError::argument(format!(
            "parent has length {} but there are {} columns", parent.len(), n,
        )));
    }

    let w = work.reshape_filled(if ata { n + m } else { n }, NONE);
    // Most recent column in which each row was seen, only for ata
    let (ancestor, previous) = w.split_at_mut(n);

    for k in 0..n {
        parent[k] = None;
        ancestor[k] = NONE;

        for &row in &a.row_indices[a.column_range(k)] {
            let mut i = if ata { previous[row] } else { row };
            // Walk up from i to the root of its current subtree, pointing every visited node at k
            while i != NONE && i < k {
                let next = ancestor[i];
                ancestor[i] = k;
                if next == NONE {
                    parent[i] = Some(k);
                    break;
                }
                i = next;
            }

            if ata {
                previous[row] = k;
            }
        }

        trace!(column = k, "elimination tree column");
    }

    debug!(nr_rows = m, nr_columns = n, ata, nr_roots = parent[..n].iter().filter(|p| p.is_none()).count(), "elimination tree");

    Ok(())
}

/// Order the nodes of a forest such that every node comes after all of its descendants.
///
/// Children of a node are visited in increasing index order, and so are the roots. The depth
/// first search uses an explicit stack.
///
/// # Arguments
///
/// * `parent`: Parent of each node, `None` for roots. Must describe a forest.
/// * `post`: Output, `post[k] = i` means node `i` is the `k`'th node in post-order. Only the first
/// `parent.len()` values are written.
/// * `work`: Workspace of length `3 * parent.len()`.
///
/// # Errors
///
/// When `post` is shorter than `parent`.
pub fn postorder(
    parent: &[Option<usize>],
    post: &mut [usize],
    work: &mut GrowArray<usize>,
) -> Result<(), MatrixError> {
    let n = parent.len();
    if post.len() < n {
        return Err(MatrixError::argument(format!(
            "post has length {} but there are {} nodes", post.len(), n,
        )));
    }

    let w = work.reshape_filled(3 * n, NONE);
    // Linked lists of children: the first child of each node, the next sibling of each node
    let (head, rest) = w.split_at_mut(n);
    let (next, stack) = rest.split_at_mut(n);

    // Reverse order, such that the lists end up in increasing order
    for j in (0..n).rev() {
        if let Some(p) = parent[j] {
            next[j] = head[p];
            head[p] = j;
        }
    }

    let mut k = 0;
    for root in (0..n).filter(|&j| parent[j].is_none()) {
        k = postorder_dfs(root, k, head, next, stack, post);
    }
    debug_assert_eq!(k, n, "the parent array contains a cycle");

    Ok(())
}

/// Depth first search from a single root, consuming the child lists.
///
/// # Return value
///
/// The number of nodes in post-order after this subtree.
fn postorder_dfs(
    root: usize,
    mut k: usize,
    head: &mut [usize],
    next: &[usize],
    stack: &mut [usize],
    post: &mut [usize],
) -> usize {
    stack[0] = root;
    let mut len = 1;

    while len > 0 {
        let p = stack[len - 1];
        let child = head[p];
        if child == NONE {
            // All children are done
            len -= 1;
            post[k] = p;
            k += 1;
        } else {
            head[p] = next[child];
            stack[len] = child;
            len += 1;
        }
    }

    k
}

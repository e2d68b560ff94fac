//! # Reachability
//!
//! Which values of the solution `x` of a sparse triangular system `G x = b` can be non-zero,
//! determined from the patterns of `G` and `b` only. The values of `x` that are non-zero are
//! exactly the nodes reachable from the non-zeros of `b` in the graph with an edge `j -> i` for
//! every value `G[i, j]`. The nodes are produced in topological order, which is the order in which
//! a substitution can compute them.
use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::GrowArray;
use crate::error::MatrixError;

/// Find the rows of `x` that can be non-zero when solving `G x = B[:, column_b]`.
///
/// Only the leading square block of `G` is considered: rows of `G` and of `B` with an index of at
/// least the number of columns of `G` are ignored.
///
/// # Arguments
///
/// * `g`: Triangular matrix with `m >= n` rows and `n` columns.
/// * `b`: Right-hand sides.
/// * `column_b`: Column of `B` to solve for.
/// * `pinv`: Column pivots, node `j` of the graph is column `pinv[j]` of `G`. `None` when there
/// are no pivots.
/// * `xi`: Output, the rows are in `xi[top..n]` in topological order. The front of the slice is
/// used as the search stack.
/// * `work`: Workspace of length `2 * n`: visited markers followed by the next child to visit for
/// each level of the stack. The markers are cleared before returning.
///
/// # Return value
///
/// The index `top` of the first row in `xi`.
///
/// # Errors
///
/// When `xi` or `pinv` is shorter than the number of columns of `G`.
pub fn search_nz_rows_in_x<F: Field>(
    g: &CscMatrix<F>,
    b: &CscMatrix<F>,
    column_b: usize,
    pinv: Option<&[usize]>,
    xi: &mut [usize],
    work: &mut GrowArray<usize>,
) -> Result<usize, MatrixError> {
    let n = g.nr_columns;
    if xi.len() < n {
        return Err(MatrixError::argument(format!(
            "xi has length {} but there are {} columns", xi.len(), n,
        )));
    }
    if let Some(pinv) = pinv && pinv.len() < n {
        return Err(MatrixError::argument(format!(
            "pinv has length {} but there are {} columns", pinv.len(), n,
        )));
    }

    let w = work.reshape_filled(2 * n, 0);

    let mut top = n;
    for &row in &b.row_indices[b.column_range(column_b)] {
        if row < n && w[row] == 0 {
            top = search_depth_first(row, g, top, pinv, xi, w);
        }
    }

    for &row in &xi[top..n] {
        w[row] = 0;
    }

    Ok(top)
}

/// Visit everything reachable from `start` that was not visited before.
///
/// Finished nodes are put in front of the output at `xi[top..]`.
///
/// # Return value
///
/// The new value of `top`.
fn search_depth_first<F: Field>(
    start: usize,
    g: &CscMatrix<F>,
    mut top: usize,
    pinv: Option<&[usize]>,
    xi: &mut [usize],
    w: &mut [usize],
) -> usize {
    let n = g.nr_columns;
    let (marked, child) = w.split_at_mut(n);

    xi[0] = start;
    let mut len = 1;
    while len > 0 {
        let head = len - 1;
        let node = xi[head];
        let column = pinv.map_or(node, |pinv| pinv[node]);
        if marked[node] == 0 {
            marked[node] = 1;
            child[head] = g.column_pointers[column];
        }

        let end = g.column_pointers[column + 1];
        let unvisited = (child[head]..end)
            .find(|&index| {
                let row = g.row_indices[index];
                row < n && marked[row] == 0
            });
        match unvisited {
            Some(index) => {
                // Continue here when returning to this level
                child[head] = index + 1;
                xi[len] = g.row_indices[index];
                len += 1;
            },
            None => {
                len -= 1;
                top -= 1;
                xi[top] = node;
            },
        }
    }

    top
}

/// Find the pattern of row `k` of the Cholesky factor `L` of a symmetric matrix.
///
/// Walks up the elimination tree from every value in the upper triangle of column `k` until a
/// visited node is found. Node `k` itself starts as visited.
///
/// # Arguments
///
/// * `a`: Symmetric matrix, only the upper triangle is read.
/// * `k`: Row of `L` to find the pattern of.
/// * `parent`: Elimination tree of `A`.
/// * `s`: Output, the pattern is in `s[top..n]`. Needs length `n`.
/// * `marked`: Visited markers of length `n`. All false on input, and on output.
///
/// # Return value
///
/// The index `top` of the first column in `s`.
pub fn search_nz_rows_elim<F: Field>(
    a: &CscMatrix<F>,
    k: usize,
    parent: &[Option<usize>],
    s: &mut [usize],
    marked: &mut [bool],
) -> usize {
    let n = a.nr_columns;
    debug_assert!(s.len() >= n && marked.len() >= n && parent.len() >= n);
    debug_assert!(marked[..n].iter().all(|&m| !m));

    let mut top = n;
    marked[k] = true;
    for &row in &a.row_indices[a.column_range(k)] {
        if row > k {
            continue;
        }

        // Path from row to the first visited node, stored at the front of s
        let mut len = 0;
        let mut node = Some(row);
        while let Some(i) = node && !marked[i] {
            s[len] = i;
            len += 1;
            marked[i] = true;
            node = parent[i];
        }

        // Reversed, so the nodes closest to the root come last
        while len > 0 {
            len -= 1;
            top -= 1;
            s[top] = s[len];
        }
    }

    for &i in &s[top..n] {
        marked[i] = false;
    }
    marked[k] = false;

    top
}

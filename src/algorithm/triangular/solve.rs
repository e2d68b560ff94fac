//! # Triangular solves
//!
//! Forward and backward substitution with a sparse triangular matrix.
//!
//! The diagonal value of each column must be stored, and it has to be the first value of the
//! column for lower triangular matrices and the last value for upper triangular matrices. Sorted
//! matrices satisfy this.
use tracing::{debug, trace};

use crate::algorithm::triangular::reach::search_nz_rows_in_x;
use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::GrowArray;
use crate::error::MatrixError;

fn check_square_dense<F: Field>(
    operation: &'static str,
    g: &CscMatrix<F>,
    x: &[F],
) -> Result<(), MatrixError> {
    if g.nr_rows == g.nr_columns && x.len() == g.nr_columns {
        Ok(())
    } else {
        Err(MatrixError::dimensions(operation, format!(
            "a {} x {} matrix and a vector of length {}", g.nr_rows, g.nr_columns, x.len(),
        )))
    }
}

/// Solve `L x = b` in place.
///
/// # Arguments
///
/// * `l`: Square lower triangular matrix.
/// * `x`: Contains `b` on input and `x` on output.
///
/// # Errors
///
/// When `L` is not square or the length of `x` doesn't match.
pub fn solve_l<F: Field>(l: &CscMatrix<F>, x: &mut [F]) -> Result<(), MatrixError> {
    check_square_dense("solve_l", l, x)?;

    for column in 0..l.nr_columns {
        let range = l.column_range(column);
        debug_assert!(!range.is_empty(), "missing diagonal");

        x[column] /= l.values[range.start];
        let x_j = x[column];
        for index in range.start + 1..range.end {
            x[l.row_indices[index]] -= l.values[index] * x_j;
        }
    }

    Ok(())
}

/// Solve `L^T x = b` in place.
///
/// # Arguments
///
/// * `l`: Square lower triangular matrix.
/// * `x`: Contains `b` on input and `x` on output.
///
/// # Errors
///
/// When `L` is not square or the length of `x` doesn't match.
pub fn solve_tran_l<F: Field>(l: &CscMatrix<F>, x: &mut [F]) -> Result<(), MatrixError> {
    check_square_dense("solve_tran_l", l, x)?;

    for j in (0..l.nr_columns).rev() {
        let range = l.column_range(j);
        debug_assert!(!range.is_empty(), "missing diagonal");

        let sum = l.column(j).skip(1).fold(F::zero(), |sum, (row, value)| sum + value * x[row]);
        x[j] = (x[j] - sum) / l.values[range.start];
    }

    Ok(())
}

/// Solve `U x = b` in place.
///
/// # Arguments
///
/// * `u`: Square upper triangular matrix.
/// * `x`: Contains `b` on input and `x` on output.
///
/// # Errors
///
/// When `U` is not square or the length of `x` doesn't match.
pub fn solve_u<F: Field>(u: &CscMatrix<F>, x: &mut [F]) -> Result<(), MatrixError> {
    check_square_dense("solve_u", u, x)?;

    for column in (0..u.nr_columns).rev() {
        let range = u.column_range(column);
        debug_assert!(!range.is_empty(), "missing diagonal");

        x[column] /= u.values[range.end - 1];
        let x_j = x[column];
        for index in range.start..range.end - 1 {
            x[u.row_indices[index]] -= u.values[index] * x_j;
        }
    }

    Ok(())
}

/// Solve `U^T x = b` in place.
///
/// # Errors
///
/// When `U` is not square or the length of `x` doesn't match.
pub fn solve_tran_u<F: Field>(u: &CscMatrix<F>, x: &mut [F]) -> Result<(), MatrixError> {
    check_square_dense("solve_tran_u", u, x)?;

    for j in 0..u.nr_columns {
        let range = u.column_range(j);
        debug_assert!(!range.is_empty(), "missing diagonal");

        let last = range.end - 1;
        let sum = u.column(j).take(last - range.start).fold(F::zero(), |sum, (row, value)| sum + value * x[row]);
        x[j] = (x[j] - sum) / u.values[last];
    }

    Ok(())
}

/// Check the arguments shared by the sparse solves.
fn check_sparse<F: Field>(
    operation: &'static str,
    g: &CscMatrix<F>,
    b: &CscMatrix<F>,
    pinv: Option<&[usize]>,
) -> Result<(), MatrixError> {
    if g.nr_rows < g.nr_columns || b.nr_rows != g.nr_rows {
        return Err(MatrixError::dimensions(operation, format!(
            "a {} x {} matrix needs at least as many rows as columns and as many rows as B ({} x {})",
            g.nr_rows, g.nr_columns, b.nr_rows, b.nr_columns,
        )));
    }
    if let Some(pinv) = pinv && pinv.len() != g.nr_columns {
        return Err(MatrixError::argument(format!(
            "pinv has length {} but there are {} columns", pinv.len(), g.nr_columns,
        )));
    }

    Ok(())
}

/// Solve `G x = B[:, column_b]` for a single column of a sparse `B`.
///
/// Only the values of `x` that can be non-zero are computed, in the order found by
/// `search_nz_rows_in_x`. For a tall `G`, only the leading square block is used: the rows of `G`
/// and `B` below it don't affect `x`.
///
/// # Arguments
///
/// * `g`: Lower or upper triangular matrix with `m >= n` rows and `n` columns.
/// * `lower`: Whether `G` is lower triangular.
/// * `b`: Right-hand sides with `m` rows.
/// * `column_b`: Column of `B` to solve for.
/// * `x`: Output of length `n`. Only the rows in `xi[top..n]` are written.
/// * `pinv`: Column pivots: row `j` of `x` is computed with column `pinv[j]` of `G`. `None` when
/// there are no pivots.
/// * `xi`: Output, see `search_nz_rows_in_x`.
/// * `work`: Workspace for `search_nz_rows_in_x`.
///
/// # Return value
///
/// The index `top` of the first row in `xi`. There are `n - top` rows that can be non-zero.
///
/// # Errors
///
/// On inconsistent shapes, or when `x` or `pinv` is too short.
#[allow(clippy::too_many_arguments)]
pub fn solve_column<F: Field>(
    g: &CscMatrix<F>,
    lower: bool,
    b: &CscMatrix<F>,
    column_b: usize,
    x: &mut [F],
    pinv: Option<&[usize]>,
    xi: &mut GrowArray<usize>,
    work: &mut GrowArray<usize>,
) -> Result<usize, MatrixError> {
    check_sparse("solve_column", g, b, pinv)?;
    let n = g.nr_columns;
    if x.len() < n {
        return Err(MatrixError::argument(format!("x has length {} but there are {} columns", x.len(), n)));
    }

    let xi = xi.reshape(n);
    let top = search_nz_rows_in_x(g, b, column_b, pinv, xi, work)?;

    for &row in &xi[top..] {
        x[row] = F::zero();
    }
    for (row, value) in b.column(column_b) {
        if row < n {
            x[row] = value;
        }
    }

    for &j in &xi[top..] {
        let column = pinv.map_or(j, |pinv| pinv[j]);
        let range = g.column_range(column);
        debug_assert!(!range.is_empty(), "missing diagonal");

        let diagonal = if lower {
            range.start
        } else {
            // Values of the rows below the square block come after the diagonal
            (range.start..range.end).rev()
                .find(|&index| g.row_indices[index] < n)
                .unwrap_or(range.start)
        };

        x[j] /= g.values[diagonal];
        let x_j = x[j];
        for index in range {
            let row = g.row_indices[index];
            if index != diagonal && row < n {
                x[row] -= g.values[index] * x_j;
            }
        }
    }

    Ok(top)
}

/// Solve `G X = B` for a sparse `B`.
///
/// # Arguments
///
/// * `g`: Lower or upper triangular matrix with `m >= n` rows and `n` columns, see `solve_column`.
/// * `lower`: Whether `G` is lower triangular.
/// * `b`: Right-hand sides with `m` rows.
/// * `x`: Output, reshaped to `n` rows and as many columns as `B`. The row indices are not sorted.
/// * `pinv`: Column pivots, see `solve_column`.
/// * `dense`: Workspace for a single dense column of `X`.
/// * `xi`: Workspace for the pattern of a single column of `X`.
/// * `work`: Workspace for the search.
///
/// # Errors
///
/// On inconsistent shapes or when `pinv` has the wrong length. Nothing is written in that case.
#[allow(clippy::too_many_arguments)]
pub fn solve<F: Field>(
    g: &CscMatrix<F>,
    lower: bool,
    b: &CscMatrix<F>,
    x: &mut CscMatrix<F>,
    pinv: Option<&[usize]>,
    dense: &mut GrowArray<F>,
    xi: &mut GrowArray<usize>,
    work: &mut GrowArray<usize>,
) -> Result<(), MatrixError> {
    check_sparse("solve", g, b, pinv)?;
    let n = g.nr_columns;

    x.reshape(n, b.nr_columns, x.row_indices.len())?;
    x.indices_sorted = false;
    let values = dense.reshape(n);

    for column in 0..b.nr_columns {
        let top = solve_column(g, lower, b, column, values, pinv, xi, work)?;

        let count = n - top;
        x.grow_non_zeros(count);
        for &row in &xi[top..] {
            x.row_indices[x.nz_length] = row;
            x.values[x.nz_length] = values[row];
            x.nz_length += 1;
        }
        x.column_pointers[column + 1] = x.nz_length;

        trace!(column, nz_length = count, "solved column");
    }

    debug!(nr_rows = n, nr_columns = b.nr_columns, nz_length = x.nz_length, lower, pivots = pinv.is_some(), "sparse triangular solve");

    Ok(())
}

/// Solve `G^T X = B` for a sparse `B`.
///
/// Transposes `G` first, so the work is that of `solve` plus a transpose.
///
/// # Arguments
///
/// * `g`: Square lower or upper triangular matrix.
/// * `lower`: Whether `G` (not its transpose) is lower triangular.
///
/// See `solve` for the other arguments.
///
/// # Errors
///
/// When `G` is not square or has a different number of rows than `B`.
pub fn solve_tran<F: Field>(
    g: &CscMatrix<F>,
    lower: bool,
    b: &CscMatrix<F>,
    x: &mut CscMatrix<F>,
    dense: &mut GrowArray<F>,
    xi: &mut GrowArray<usize>,
    work: &mut GrowArray<usize>,
) -> Result<(), MatrixError> {
    if g.nr_rows != g.nr_columns {
        return Err(MatrixError::dimensions("solve_tran", format!(
            "a {} x {} matrix is not square", g.nr_rows, g.nr_columns,
        )));
    }

    // Sorted, so the diagonal is the last value of each column of an upper triangle
    let transposed = g.transpose();
    solve(&transposed, !lower, b, x, None, dense, xi, work)
}

/// Cheap indication of how well conditioned a triangular matrix is.
///
/// The product of the absolute values of the diagonal, each divided by the largest absolute value
/// on the diagonal. The result is invariant to scaling and zero when the matrix is singular.
pub fn quality_triangular<F: Field>(t: &CscMatrix<F>) -> F {
    let n = t.nr_rows.min(t.nr_columns);
    let diagonal = (0..n).map(|i| t.nz_index(i, i).map_or(F::zero(), |index| t.values[index].abs()));

    let max = diagonal.clone().fold(F::zero(), F::max);
    if max.is_zero() {
        return F::zero();
    }

    diagonal.fold(F::one(), |quality, value| quality * (value / max))
}

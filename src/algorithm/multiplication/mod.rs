//! # Multiplication
//!
//! Products of sparse matrices with sparse or dense matrices, and inner products.
//!
//! The sparse product is computed column by column: for each value `B[k, j]`, column `k` of `A`
//! is scaled and scattered into a dense accumulator, while a marker per row records which rows
//! already appeared in output column `j`. The row indices of the output end up in the order in
//! which they were first touched, so the result is not sorted.
use tracing::debug;

use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::GrowArray;
use crate::error::MatrixError;

pub mod dense;
pub mod inner_product;
#[cfg(feature = "rayon")]
pub mod parallel;

/// Verify that the inner dimensions of a product agree.
///
/// # Arguments
///
/// * `operation`: Name used in the error.
/// * `left`: Shape `(rows, columns)` of the left operand, after any transposition.
/// * `right`: Shape `(rows, columns)` of the right operand, after any transposition.
pub(crate) fn check_product(
    operation: &'static str,
    left: (usize, usize),
    right: (usize, usize),
) -> Result<(), MatrixError> {
    if left.1 == right.0 {
        Ok(())
    } else {
        Err(MatrixError::dimensions(operation, format!(
            "inconsistent matrix shapes: {} x {} times {} x {}", left.0, left.1, right.0, right.1,
        )))
    }
}

/// Compute `A * B`.
///
/// Allocates the result and the workspace; see `mult_into` to reuse them.
pub fn mult<F: Field>(a: &CscMatrix<F>, b: &CscMatrix<F>) -> Result<CscMatrix<F>, MatrixError> {
    let mut c = CscMatrix::default();
    mult_into(a, b, &mut c, &mut GrowArray::new(), &mut GrowArray::new())?;

    Ok(c)
}

/// Compute `A * B` into `C`.
///
/// # Arguments
///
/// * `a`: Left operand.
/// * `b`: Right operand.
/// * `c`: Reshaped to hold the result. Its storage grows as needed. Indices are not sorted.
/// * `work`: Marker per row of `A`.
/// * `dense`: Accumulator per row of `A`.
///
/// # Errors
///
/// When the number of columns of `A` differs from the number of rows of `B`. Nothing is written
/// in that case.
pub fn mult_into<F: Field>(
    a: &CscMatrix<F>,
    b: &CscMatrix<F>,
    c: &mut CscMatrix<F>,
    work: &mut GrowArray<usize>,
    dense: &mut GrowArray<F>,
) -> Result<(), MatrixError> {
    check_product("mult", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;

    c.reshape(a.nr_rows, b.nr_columns, a.nz_length + b.nz_length)?;
    c.indices_sorted = false;
    let x = dense.reshape(a.nr_rows);
    let w = work.reshape_filled(a.nr_rows, 0);

    // C(:, j) = sum_k A(:, k) * B(k, j)
    for column in 0..b.nr_columns {
        let start = c.nz_length;
        for (row_b, value_b) in b.column(column) {
            mult_add_column_a(a, row_b, value_b, c, column + 1, x, w);
        }

        for index in start..c.nz_length {
            c.values[index] = x[c.row_indices[index]];
        }
        c.column_pointers[column + 1] = c.nz_length;
    }

    debug!(nr_rows = c.nr_rows, nr_columns = c.nr_columns, nz_length = c.nz_length, "sparse product");

    Ok(())
}

/// Perform `x += alpha * A(:, column_a)` and append rows that were not yet seen to `C`.
///
/// A row is new when its marker is smaller than `mark`. New rows are appended to the row indices
/// of `C` after the last stored value; the caller finishes the column by setting its pointer and
/// copying the values out of `x`.
///
/// # Arguments
///
/// * `a`: Matrix to take a column from.
/// * `column_a`: Column of `A`.
/// * `alpha`: Factor to multiply the column with.
/// * `c`: Matrix that is being built, one column at a time.
/// * `mark`: Value identifying the column of `C` that is being built, at least `1`.
/// * `x`: Dense accumulator, of length `A.nr_rows`.
/// * `w`: Row markers, of length `A.nr_rows`.
pub fn mult_add_column_a<F: Field>(
    a: &CscMatrix<F>,
    column_a: usize,
    alpha: F,
    c: &mut CscMatrix<F>,
    mark: usize,
    x: &mut [F],
    w: &mut [usize],
) {
    debug_assert!(mark > 0);

    for (row, value) in a.column(column_a) {
        if w[row] < mark {
            if c.nz_length >= c.row_indices.len() {
                c.grow_max_length(c.nz_length * 2 + 1);
            }

            w[row] = mark;
            c.row_indices[c.nz_length] = row;
            c.nz_length += 1;
            x[row] = value * alpha;
        } else {
            x[row] += value * alpha;
        }
    }
}

/// Compute `A^T * B`.
///
/// Transposes `A` first, so this is only efficient when that is cheap compared to the product.
pub fn mult_trans_a<F: Field>(a: &CscMatrix<F>, b: &CscMatrix<F>) -> Result<CscMatrix<F>, MatrixError> {
    check_product("mult_trans_a", (a.nr_columns, a.nr_rows), (b.nr_rows, b.nr_columns))?;

    mult(&a.transpose(), b)
}

/// Compute `A * B^T`.
pub fn mult_trans_b<F: Field>(a: &CscMatrix<F>, b: &CscMatrix<F>) -> Result<CscMatrix<F>, MatrixError> {
    check_product("mult_trans_b", (a.nr_rows, a.nr_columns), (b.nr_columns, b.nr_rows))?;

    mult(a, &b.transpose())
}

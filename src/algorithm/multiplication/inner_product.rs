//! # Inner products
//!
//! Products that reduce to a single value, computed without forming intermediate matrices.
use crate::algorithm::multiplication::check_product;
use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::vector::SparseVector;
use crate::data::linear_algebra::work::{GrowArray, NONE};
use crate::error::MatrixError;

/// Inner product of column `column_a` of `A` with column `column_b` of `B`.
///
/// This is the value `(A^T B)[column_a, column_b]`.
///
/// # Arguments
///
/// * `work`: Position of each row in column `column_a`, reinitialized on every call.
/// * `dense`: Values of column `column_a`, only read at the marked rows.
///
/// # Errors
///
/// When `A` and `B` have a different number of rows.
pub fn dot_inner_columns<F: Field>(
    a: &CscMatrix<F>,
    column_a: usize,
    b: &CscMatrix<F>,
    column_b: usize,
    work: &mut GrowArray<usize>,
    dense: &mut GrowArray<F>,
) -> Result<F, MatrixError> {
    check_product("dot_inner_columns", (a.nr_columns, a.nr_rows), (b.nr_rows, b.nr_columns))?;
    debug_assert!(column_a < a.nr_columns && column_b < b.nr_columns);

    let x = dense.reshape(a.nr_rows);
    let w = work.reshape_filled(a.nr_rows, NONE);

    for (row, value) in a.column(column_a) {
        w[row] = column_a;
        x[row] = value;
    }

    let total = b.column(column_b)
        .filter(|&(row, _)| w[row] != NONE)
        .fold(F::zero(), |total, (row, value)| total + x[row] * value);

    Ok(total)
}

/// Compute `x^T A y` for dense vectors `x` and `y`.
///
/// # Errors
///
/// When the length of `x` differs from the number of rows of `A`, or the length of `y` from the
/// number of columns.
pub fn inner_product<F: Field>(x: &[F], a: &CscMatrix<F>, y: &[F]) -> Result<F, MatrixError> {
    check_vectors("inner_product", x.len(), a, y.len())?;

    let total = (0..a.nr_columns)
        .filter(|&j| !y[j].is_zero())
        .map(|j| y[j] * a.column(j).fold(F::zero(), |sum, (i, value)| sum + x[i] * value))
        .fold(F::zero(), |total, column_total| total + column_total);

    Ok(total)
}

/// Compute `x^T A y` for sparse vectors `x` and `y`.
///
/// Only the columns of `A` in which `y` has a value are visited. Each of those columns is merged
/// with `x` by walking both sorted index lists once.
///
/// # Errors
///
/// When the length of `x` differs from the number of rows of `A`, or the length of `y` from the
/// number of columns.
pub fn inner_product_sparse<F: Field>(
    x: &SparseVector<F>,
    a: &CscMatrix<F>,
    y: &SparseVector<F>,
) -> Result<F, MatrixError> {
    check_vectors("inner_product_sparse", x.len(), a, y.len())?;

    let mut total = F::zero();
    if x.size() == 0 {
        return Ok(total);
    }

    let mut column = Vec::new();
    for &(j, value_y) in y.iter() {
        let column_total: F = if a.is_sorted() {
            index_utils::inner_product(x.iter().copied(), a.column(j))
        } else {
            column.clear();
            column.extend(a.column(j));
            column.sort_unstable_by_key(|&(i, _)| i);
            index_utils::inner_product(x.iter().copied(), column.iter().copied())
        };
        total += column_total * value_y;
    }

    Ok(total)
}

fn check_vectors<F: Field>(
    operation: &'static str,
    length_x: usize,
    a: &CscMatrix<F>,
    length_y: usize,
) -> Result<(), MatrixError> {
    if length_x == a.nr_rows && length_y == a.nr_columns {
        Ok(())
    } else {
        Err(MatrixError::dimensions(operation, format!(
            "vectors of length {} and {} around a {} x {} matrix", length_x, length_y, a.nr_rows, a.nr_columns,
        )))
    }
}

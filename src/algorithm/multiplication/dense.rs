//! # Sparse times dense
//!
//! Products of a sparse matrix `A` with a dense matrix `B`, written into a dense matrix `C`. Each
//! product comes in two flavors: one that overwrites `C` (reshaping it) and one that adds to the
//! current values of `C`, which must already have the right shape.
//!
//! The dense matrices are row-major, so the kernels are organized around rows of `B` and `C`
//! wherever the sparse structure allows it.
use itertools::izip;

use crate::algorithm::multiplication::check_product;
use crate::data::linear_algebra::matrix::{CscMatrix, DenseMatrix};
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

/// Verify that `C` has the shape of the product.
fn check_output<F: Field>(
    operation: &'static str,
    c: &DenseMatrix<F>,
    nr_rows: usize,
    nr_columns: usize,
) -> Result<(), MatrixError> {
    if c.nr_rows == nr_rows && c.nr_columns == nr_columns {
        Ok(())
    } else {
        Err(MatrixError::dimensions(operation, format!(
            "output is {} x {}, product is {} x {}", c.nr_rows, c.nr_columns, nr_rows, nr_columns,
        )))
    }
}

/// `y += alpha * x`
fn axpy<F: Field>(alpha: F, x: &[F], y: &mut [F]) {
    debug_assert_eq!(x.len(), y.len());

    for (y, &x) in izip!(y, x) {
        *y += alpha * x;
    }
}

/// Compute `C = A * B`.
///
/// # Errors
///
/// When the number of columns of `A` differs from the number of rows of `B`.
pub fn mult<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;

    c.reshape(a.nr_rows, b.nr_columns)?;
    add_product(a, b, c);

    Ok(())
}

/// Compute `C = C + A * B`.
///
/// # Errors
///
/// When the inner dimensions differ, or when `C` doesn't have the shape of the product.
pub fn mult_add<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_add", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;
    check_output("mult_add", c, a.nr_rows, b.nr_columns)?;

    add_product(a, b, c);

    Ok(())
}

/// Row `i` of `C` gathers row `k` of `B` for every value `A[i, k]`.
fn add_product<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) {
    let width = b.nr_columns;
    for k in 0..a.nr_columns {
        let row_b = &b.data[k * width..(k + 1) * width];
        for (i, value) in a.column(k) {
            axpy(value, row_b, &mut c.data[i * width..(i + 1) * width]);
        }
    }
}

/// Compute `C = A^T * B`.
pub fn mult_trans_a<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_trans_a", (a.nr_columns, a.nr_rows), (b.nr_rows, b.nr_columns))?;

    c.reshape(a.nr_columns, b.nr_columns)?;
    add_product_trans_a(a, b, c);

    Ok(())
}

/// Compute `C = C + A^T * B`.
pub fn mult_add_trans_a<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_add_trans_a", (a.nr_columns, a.nr_rows), (b.nr_rows, b.nr_columns))?;
    check_output("mult_add_trans_a", c, a.nr_columns, b.nr_columns)?;

    add_product_trans_a(a, b, c);

    Ok(())
}

/// Column `i` of `A` is row `i` of `A^T`, so row `i` of `C` only depends on that column.
fn add_product_trans_a<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) {
    let width = b.nr_columns;
    for i in 0..a.nr_columns {
        let row_c = &mut c.data[i * width..(i + 1) * width];
        for (k, value) in a.column(i) {
            axpy(value, &b.data[k * width..(k + 1) * width], row_c);
        }
    }
}

/// Compute `C = A * B^T`.
pub fn mult_trans_b<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_trans_b", (a.nr_rows, a.nr_columns), (b.nr_columns, b.nr_rows))?;

    c.reshape(a.nr_rows, b.nr_rows)?;
    add_product_trans_b(a, b, c);

    Ok(())
}

/// Compute `C = C + A * B^T`.
pub fn mult_add_trans_b<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_add_trans_b", (a.nr_rows, a.nr_columns), (b.nr_columns, b.nr_rows))?;
    check_output("mult_add_trans_b", c, a.nr_rows, b.nr_rows)?;

    add_product_trans_b(a, b, c);

    Ok(())
}

/// `C[i, j] += A[i, k] * B[j, k]`, walking `B` down column `k`.
fn add_product_trans_b<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) {
    let width_b = b.nr_columns;
    let width_c = b.nr_rows;
    for k in 0..a.nr_columns {
        for (i, value) in a.column(k) {
            let row_c = &mut c.data[i * width_c..(i + 1) * width_c];
            for (j, target) in row_c.iter_mut().enumerate() {
                *target += value * b.data[j * width_b + k];
            }
        }
    }
}

/// Compute `C = A^T * B^T`.
pub fn mult_trans_ab<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_trans_ab", (a.nr_columns, a.nr_rows), (b.nr_columns, b.nr_rows))?;

    c.reshape(a.nr_columns, b.nr_rows)?;
    add_product_trans_ab(a, b, c);

    Ok(())
}

/// Compute `C = C + A^T * B^T`.
pub fn mult_add_trans_ab<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
    check_product("mult_add_trans_ab", (a.nr_columns, a.nr_rows), (b.nr_columns, b.nr_rows))?;
    check_output("mult_add_trans_ab", c, a.nr_columns, b.nr_rows)?;

    add_product_trans_ab(a, b, c);

    Ok(())
}

/// `C[i, j] += A[k, i] * B[j, k]`: every entry is the product of a sparse column with a dense row.
fn add_product_trans_ab<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) {
    let width_b = b.nr_columns;
    let width_c = b.nr_rows;
    for i in 0..a.nr_columns {
        for j in 0..b.nr_rows {
            let row_b = &b.data[j * width_b..(j + 1) * width_b];
            let sum = a.column(i).fold(F::zero(), |total, (k, value)| total + value * row_b[k]);
            c.data[i * width_c + j] += sum;
        }
    }
}

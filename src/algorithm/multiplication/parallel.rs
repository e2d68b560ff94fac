//! # Parallel multiplication
//!
//! Columns of a product only depend on the corresponding column of the right operand, so the
//! output columns are split in contiguous blocks that are computed independently. Each worker owns
//! its workspace; the blocks are written into the output afterwards, in order.
//!
//! The results are identical to those of the sequential kernels, including the order of the row
//! indices within each column.
use rayon::prelude::*;
use tracing::debug;

use crate::algorithm::multiplication::{check_product, mult_add_column_a};
use crate::data::linear_algebra::matrix::{CscMatrix, DenseMatrix};
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::GrowArray;
use crate::error::MatrixError;

/// Number of blocks per thread, to even out blocks of different cost.
const BLOCKS_PER_THREAD: usize = 4;

/// Split `nr_columns` columns in contiguous blocks.
///
/// # Return value
///
/// Column ranges `(start, end)`, covering all columns in order.
fn blocks(nr_columns: usize) -> Vec<(usize, usize)> {
    if nr_columns == 0 {
        return Vec::new();
    }

    let nr_blocks = nr_columns.min(rayon::current_num_threads() * BLOCKS_PER_THREAD);
    let size = nr_columns.div_ceil(nr_blocks);

    (0..nr_columns).step_by(size)
        .map(|start| (start, (start + size).min(nr_columns)))
        .collect()
}

/// Compute `A * B` using all threads of the current rayon pool.
///
/// # Errors
///
/// When the number of columns of `A` differs from the number of rows of `B`.
pub fn mult_parallel<F: Field>(a: &CscMatrix<F>, b: &CscMatrix<F>) -> Result<CscMatrix<F>, MatrixError> {
    check_product("mult_parallel", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;

    let blocks = blocks(b.nr_columns);
    debug!(nr_rows = a.nr_rows, nr_columns = b.nr_columns, nr_blocks = blocks.len(), "parallel sparse product");

    let parts = blocks.par_iter()
        .map_init(
            || (GrowArray::new(), GrowArray::new()),
            |(work, dense), &(start, end)| mult_block(a, b, start, end, work, dense),
        )
        .collect::<Result<Vec<_>, _>>()?;

    let nz_length = parts.iter().map(CscMatrix::nz_length).sum();
    let mut c = CscMatrix::new(a.nr_rows, b.nr_columns, nz_length)?;
    let mut column = 0;
    for part in &parts {
        let offset = c.nz_length;
        let range = offset..offset + part.nz_length;
        c.row_indices[range.clone()].copy_from_slice(part.row_indices());
        c.values[range].copy_from_slice(part.values());
        for &pointer in &part.column_pointers()[1..] {
            column += 1;
            c.column_pointers[column] = offset + pointer;
        }
        c.nz_length += part.nz_length;
    }
    c.indices_sorted = false;

    debug!(nz_length = c.nz_length, "parallel sparse product done");

    Ok(c)
}

/// Columns `start..end` of `A * B`, as a matrix with `end - start` columns.
fn mult_block<F: Field>(
    a: &CscMatrix<F>,
    b: &CscMatrix<F>,
    start: usize,
    end: usize,
    work: &mut GrowArray<usize>,
    dense: &mut GrowArray<F>,
) -> Result<CscMatrix<F>, MatrixError> {
    let nz_b = b.column_pointers[end] - b.column_pointers[start];
    let mut c = CscMatrix::new(a.nr_rows, end - start, nz_b)?;
    c.indices_sorted = false;
    let x = dense.reshape(a.nr_rows);
    let w = work.reshape_filled(a.nr_rows, 0);

    for (local, column) in (start..end).enumerate() {
        let first = c.nz_length;
        for (row_b, value_b) in b.column(column) {
            mult_add_column_a(a, row_b, value_b, &mut c, local + 1, x, w);
        }

        for index in first..c.nz_length {
            c.values[index] = x[c.row_indices[index]];
        }
        c.column_pointers[local + 1] = c.nz_length;
    }

    Ok(c)
}

/// Compute `C = A * B` for a dense `B` using all threads of the current rayon pool.
///
/// # Errors
///
/// When the number of columns of `A` differs from the number of rows of `B`.
pub fn mult_dense_parallel<F: Field>(
    a: &CscMatrix<F>,
    b: &DenseMatrix<F>,
    c: &mut DenseMatrix<F>,
) -> Result<(), MatrixError> {
    check_product("mult_dense_parallel", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;

    c.reshape(a.nr_rows, b.nr_columns)?;
    add_dense_blocks(a, b, c);

    Ok(())
}

/// Compute `C = C + A * B` for a dense `B` using all threads of the current rayon pool.
///
/// # Errors
///
/// When the inner dimensions differ, or when `C` doesn't have the shape of the product.
pub fn mult_add_dense_parallel<F: Field>(
    a: &CscMatrix<F>,
    b: &DenseMatrix<F>,
    c: &mut DenseMatrix<F>,
) -> Result<(), MatrixError> {
    check_product("mult_add_dense_parallel", (a.nr_rows, a.nr_columns), (b.nr_rows, b.nr_columns))?;
    if c.nr_rows != a.nr_rows || c.nr_columns != b.nr_columns {
        return Err(MatrixError::dimensions("mult_add_dense_parallel", format!(
            "output is {} x {}, product is {} x {}", c.nr_rows, c.nr_columns, a.nr_rows, b.nr_columns,
        )));
    }

    add_dense_blocks(a, b, c);

    Ok(())
}

fn add_dense_blocks<F: Field>(a: &CscMatrix<F>, b: &DenseMatrix<F>, c: &mut DenseMatrix<F>) {
    let blocks = blocks(b.nr_columns);
    debug!(nr_rows = a.nr_rows, nr_columns = b.nr_columns, nr_blocks = blocks.len(), "parallel dense product");

    // Row-major within each block
    let parts = blocks.par_iter()
        .map(|&(start, end)| {
            let width = end - start;
            let mut local = vec![F::zero(); a.nr_rows * width];
            for k in 0..a.nr_columns {
                let row_b = &b.data[k * b.nr_columns + start..k * b.nr_columns + end];
                for (i, value) in a.column(k) {
                    for (target, &factor) in local[i * width..(i + 1) * width].iter_mut().zip(row_b) {
                        *target += value * factor;
                    }
                }
            }
            local
        })
        .collect::<Vec<_>>();

    for (&(start, end), local) in blocks.iter().zip(parts) {
        let width = end - start;
        for i in 0..a.nr_rows {
            let row_c = &mut c.data[i * c.nr_columns + start..i * c.nr_columns + end];
            for (target, &value) in row_c.iter_mut().zip(&local[i * width..(i + 1) * width]) {
                *target += value;
            }
        }
    }
}

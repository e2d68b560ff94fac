//! # Matrix implementations
//!
//! The `Matrix` trait defines a set of operations available for all matrix types defined in this
//! module: the sparse `CscMatrix` that the algorithms operate on, and the row-major `DenseMatrix`
//! used for dense right-hand sides and results.
use std::fmt;

pub use csc::CscMatrix;
pub use dense::DenseMatrix;

use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

mod csc;
mod dense;
mod ops;
mod structure;

/// Defines basic ways to create or change a matrix, regardless of back-end.
pub trait Matrix<F: Field>: Sized {
    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// When the rows are not all of equal length.
    fn from_data(data: Vec<Vec<F>>) -> Result<Self, MatrixError>;
    /// Create a square identity matrix.
    fn identity(size: usize) -> Result<Self, MatrixError>;
    /// Create a matrix of zeros.
    ///
    /// # Errors
    ///
    /// When the number of elements can't be indexed.
    fn zeros(nr_rows: usize, nr_columns: usize) -> Result<Self, MatrixError>;
    /// Get the value at coordinate (`row`, `column`).
    ///
    /// Panics when the coordinate is out of bounds.
    fn get_value(&self, row: usize, column: usize) -> F;
    /// Set the value at coordinate (`row`, `column`).
    ///
    /// Panics when the coordinate is out of bounds.
    fn set_value(&mut self, row: usize, column: usize, value: F);
    /// Number of rows.
    fn nr_rows(&self) -> usize;
    /// Number of columns.
    fn nr_columns(&self) -> usize;
    /// Number of values stored.
    fn size(&self) -> usize;

    /// Whether two matrices have the same shape and all values are within `tolerance`.
    ///
    /// Stored zeros and absent values compare equal. Comparisons involving NaN fail.
    fn approx_eq<M: Matrix<F>>(&self, other: &M, tolerance: F) -> bool {
        if self.nr_rows() != other.nr_rows() || self.nr_columns() != other.nr_columns() {
            return false;
        }

        (0..self.nr_rows()).all(|i| {
            (0..self.nr_columns()).all(|j| {
                (self.get_value(i, j) - other.get_value(i, j)).abs() <= tolerance
            })
        })
    }
}

/// Dimensions of a list of rows.
///
/// # Errors
///
/// When the rows are not all of equal length.
fn get_data_dimensions<F>(data: &[Vec<F>]) -> Result<(usize, usize), MatrixError> {
    let nr_rows = data.len();
    let nr_columns = data.first().map_or(0, Vec::len);

    if let Some(i) = data.iter().position(|row| row.len() != nr_columns) {
        return Err(MatrixError::argument(format!(
            "row {} has length {} while row 0 has length {}", i, data[i].len(), nr_columns,
        )));
    }

    Ok((nr_rows, nr_columns))
}

/// Write any matrix as a block of rows with aligned columns.
fn fmt_dense<F: Field, M: Matrix<F>>(matrix: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let precision = f.precision().unwrap_or(4);
    let width = precision + 7;

    writeln!(f, "{} x {}", matrix.nr_rows(), matrix.nr_columns())?;
    for i in 0..matrix.nr_rows() {
        for j in 0..matrix.nr_columns() {
            write!(f, "{:>width$.precision$}", matrix.get_value(i, j), width = width, precision = precision)?;
        }
        writeln!(f)?;
    }

    Ok(())
}

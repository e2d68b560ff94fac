//! # Dense matrix
//!
//! Row-major storage in a single flat buffer. Used for dense right-hand sides and results of the
//! sparse kernels.
use std::fmt;

use crate::data::linear_algebra::matrix::{fmt_dense, get_data_dimensions, Matrix};
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

/// Dense matrix with values stored row after row.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct DenseMatrix<F> {
    pub(crate) data: Vec<F>,
    pub(crate) nr_rows: usize,
    pub(crate) nr_columns: usize,
}

fn checked_size(nr_rows: usize, nr_columns: usize) -> Result<usize, MatrixError> {
    nr_rows.checked_mul(nr_columns).ok_or(MatrixError::SizeLimit { nr_rows, nr_columns })
}

impl<F: Field> DenseMatrix<F> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// When the buffer length doesn't match the shape.
    pub fn from_row_major(nr_rows: usize, nr_columns: usize, data: Vec<F>) -> Result<Self, MatrixError> {
        let size = checked_size(nr_rows, nr_columns)?;
        if data.len() != size {
            return Err(MatrixError::argument(format!(
                "a {} x {} matrix needs {} values, {} were provided", nr_rows, nr_columns, size, data.len(),
            )));
        }

        Ok(Self { data, nr_rows, nr_columns })
    }

    /// Create a matrix with a single column.
    pub fn column_vector(data: Vec<F>) -> Self {
        Self { nr_rows: data.len(), nr_columns: 1, data }
    }

    /// Change the shape, setting all values to zero.
    ///
    /// The buffer is only reallocated when it needs to grow.
    pub fn reshape(&mut self, nr_rows: usize, nr_columns: usize) -> Result<(), MatrixError> {
        let size = checked_size(nr_rows, nr_columns)?;
        self.data.clear();
        self.data.resize(size, F::zero());
        self.nr_rows = nr_rows;
        self.nr_columns = nr_columns;

        Ok(())
    }

    /// Set all values.
    pub fn fill(&mut self, value: F) {
        self.data.fill(value);
    }

    /// The row-major buffer.
    pub fn data(&self) -> &[F] {
        &self.data
    }

    /// The row-major buffer, mutably.
    pub fn data_mut(&mut self) -> &mut [F] {
        &mut self.data
    }

    /// All values in row `i`.
    pub fn row(&self, i: usize) -> &[F] {
        debug_assert!(i < self.nr_rows);

        &self.data[i * self.nr_columns..(i + 1) * self.nr_columns]
    }

    /// Copy of all values in column `j`.
    pub fn column(&self, j: usize) -> Vec<F> {
        debug_assert!(j < self.nr_columns);

        self.data.iter().skip(j).step_by(self.nr_columns).copied().collect()
    }

    /// Overwrite column `j`.
    pub fn set_column(&mut self, j: usize, values: &[F]) {
        debug_assert!(j < self.nr_columns);
        debug_assert_eq!(values.len(), self.nr_rows);

        for (i, &value) in values.iter().enumerate() {
            self.data[i * self.nr_columns + j] = value;
        }
    }
}

impl<F: Field> Matrix<F> for DenseMatrix<F> {
    fn from_data(data: Vec<Vec<F>>) -> Result<Self, MatrixError> {
        let (nr_rows, nr_columns) = get_data_dimensions(&data)?;

        Ok(Self { data: data.into_iter().flatten().collect(), nr_rows, nr_columns })
    }

    fn identity(size: usize) -> Result<Self, MatrixError> {
        let mut matrix = Self::zeros(size, size)?;
        for i in 0..size {
            matrix.data[i * size + i] = F::one();
        }

        Ok(matrix)
    }

    fn zeros(nr_rows: usize, nr_columns: usize) -> Result<Self, MatrixError> {
        let size = checked_size(nr_rows, nr_columns)?;

        Ok(Self { data: vec![F::zero(); size], nr_rows, nr_columns })
    }

    fn get_value(&self, row: usize, column: usize) -> F {
        assert!(row < self.nr_rows && column < self.nr_columns);

        self.data[row * self.nr_columns + column]
    }

    fn set_value(&mut self, row: usize, column: usize, value: F) {
        assert!(row < self.nr_rows && column < self.nr_columns);

        self.data[row * self.nr_columns + column] = value;
    }

    fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn size(&self) -> usize {
        self.data.len()
    }
}

impl<F: Field> fmt::Display for DenseMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dense(self, f)
    }
}

//! # Common operations on sparse matrices
//!
//! Structural operations that produce a new matrix: transposing, permuting, concatenating and
//! extracting parts, plus a few element-wise operations.
use std::iter;

use cumsum::cumsum_owned;

use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::matrix::csc::max_length;
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

impl<F: Field> CscMatrix<F> {
    /// Transpose the matrix.
    ///
    /// Uses a counting sort over the rows, so the result always has sorted indices, regardless of
    /// whether this matrix has them.
    pub fn transpose(&self) -> Self {
        let nz_length = self.nz_length;
        let mut counts = vec![0; self.nr_rows + 1];
        for &row in self.row_indices() {
            counts[row + 1] += 1;
        }
        let column_pointers = cumsum_owned(counts);

        let mut next = column_pointers[..self.nr_rows].to_vec();
        let mut row_indices = vec![0; nz_length];
        let mut values = vec![F::zero(); nz_length];
        for column in 0..self.nr_columns {
            for (row, value) in self.column(column) {
                let index = next[row];
                next[row] += 1;

                row_indices[index] = column;
                values[index] = value;
            }
        }

        Self {
            nr_rows: self.nr_columns,
            nr_columns: self.nr_rows,
            column_pointers,
            row_indices,
            values,
            nz_length,
            indices_sorted: true,
        }
    }

    /// Permute rows and columns.
    ///
    /// The value at `(i, column[j])` ends up at `(row_inverse[i], j)`.
    ///
    /// # Arguments
    ///
    /// * `row_inverse`: Inverse row permutation, of length `nr_rows`. `None` for the identity.
    /// * `column`: Column permutation, of length `nr_columns`. `None` for the identity.
    ///
    /// # Errors
    ///
    /// When a permutation has the wrong length.
    pub fn permute(&self, row_inverse: Option<&[usize]>, column: Option<&[usize]>) -> Result<Self, MatrixError> {
        if let Some(row_inverse) = row_inverse && row_inverse.len() != self.nr_rows {
            return Err(MatrixError::argument(format!(
                "row permutation has length {} for {} rows", row_inverse.len(), self.nr_rows,
            )));
        }
        if let Some(column) = column && column.len() != self.nr_columns {
            return Err(MatrixError::argument(format!(
                "column permutation has length {} for {} columns", column.len(), self.nr_columns,
            )));
        }

        let mut permuted = Self::new(self.nr_rows, self.nr_columns, self.nz_length)?;
        for j in 0..self.nr_columns {
            let source = column.map_or(j, |column| column[j]);
            for (row, value) in self.column(source) {
                let index = permuted.nz_length;
                permuted.row_indices[index] = row_inverse.map_or(row, |row_inverse| row_inverse[row]);
                permuted.values[index] = value;
                permuted.nz_length += 1;
            }
            permuted.column_pointers[j + 1] = permuted.nz_length;
        }
        permuted.indices_sorted = row_inverse.is_none() && self.indices_sorted;

        Ok(permuted)
    }

    /// Permute only the rows: the value at `(i, j)` ends up at `(row_inverse[i], j)`.
    pub fn permute_row_inv(&self, row_inverse: &[usize]) -> Result<Self, MatrixError> {
        self.permute(Some(row_inverse), None)
    }

    /// Stack `bottom` below this matrix.
    ///
    /// # Errors
    ///
    /// When the number of columns differs.
    pub fn concat_rows(&self, bottom: &Self) -> Result<Self, MatrixError> {
        if self.nr_columns != bottom.nr_columns {
            return Err(MatrixError::dimensions("concat_rows", format!(
                "{} columns on top and {} below", self.nr_columns, bottom.nr_columns,
            )));
        }
        let nr_rows = self.nr_rows.checked_add(bottom.nr_rows)
            .ok_or(MatrixError::SizeLimit { nr_rows: usize::MAX, nr_columns: self.nr_columns })?;
        max_length(nr_rows, self.nr_columns)?;

        let counts = iter::once(0)
            .chain((0..self.nr_columns).map(|j| self.column_range(j).len() + bottom.column_range(j).len()))
            .collect();
        let column_pointers = cumsum_owned(counts);
        let nz_length = column_pointers[self.nr_columns];

        let mut row_indices = Vec::with_capacity(nz_length);
        let mut values = Vec::with_capacity(nz_length);
        for j in 0..self.nr_columns {
            let top = self.column(j);
            let below = bottom.column(j).map(|(i, value)| (self.nr_rows + i, value));
            for (i, value) in top.chain(below) {
                row_indices.push(i);
                values.push(value);
            }
        }
        debug_assert_eq!(row_indices.len(), nz_length);

        Ok(Self {
            nr_rows,
            nr_columns: self.nr_columns,
            column_pointers,
            row_indices,
            values,
            nz_length,
            indices_sorted: self.indices_sorted && bottom.indices_sorted,
        })
    }

    /// Place `right` to the right of this matrix.
    ///
    /// # Errors
    ///
    /// When the number of rows differs.
    pub fn concat_columns(&self, right: &Self) -> Result<Self, MatrixError> {
        if self.nr_rows != right.nr_rows {
            return Err(MatrixError::dimensions("concat_columns", format!(
                "{} rows on the left and {} on the right", self.nr_rows, right.nr_rows,
            )));
        }
        let nr_columns = self.nr_columns.checked_add(right.nr_columns)
            .ok_or(MatrixError::SizeLimit { nr_rows: self.nr_rows, nr_columns: usize::MAX })?;

        let mut result = Self::new(self.nr_rows, nr_columns, self.nz_length + right.nz_length)?;
        let (left_length, right_length) = (self.nz_length, right.nz_length);
        result.row_indices[..left_length].copy_from_slice(self.row_indices());
        result.row_indices[left_length..left_length + right_length].copy_from_slice(right.row_indices());
        result.values[..left_length].copy_from_slice(self.values());
        result.values[left_length..left_length + right_length].copy_from_slice(right.values());
        result.column_pointers[..=self.nr_columns].copy_from_slice(self.column_pointers());
        for (j, &pointer) in right.column_pointers().iter().enumerate().skip(1) {
            result.column_pointers[self.nr_columns + j] = left_length + pointer;
        }
        result.nz_length = left_length + right_length;
        result.indices_sorted = self.indices_sorted && right.indices_sorted;

        Ok(result)
    }

    /// Copy a single column into a new matrix with one column.
    pub fn extract_column(&self, column: usize) -> Self {
        assert!(column < self.nr_columns);

        let range = self.column_range(column);
        let mut column_pointers = vec![0; 2];
        column_pointers[1] = range.len();

        Self {
            nr_rows: self.nr_rows,
            nr_columns: 1,
            column_pointers,
            row_indices: self.row_indices[range.clone()].to_vec(),
            values: self.values[range].to_vec(),
            nz_length: self.column_range(column).len(),
            indices_sorted: self.indices_sorted,
        }
    }

    /// Copy the rows `start..end` into a new matrix.
    pub fn extract_rows(&self, start: usize, end: usize) -> Self {
        assert!(start <= end && end <= self.nr_rows);

        let mut result = Self {
            nr_rows: end - start,
            nr_columns: self.nr_columns,
            column_pointers: Vec::with_capacity(self.nr_columns + 1),
            row_indices: Vec::new(),
            values: Vec::new(),
            nz_length: 0,
            indices_sorted: self.indices_sorted,
        };
        result.column_pointers.push(0);
        for j in 0..self.nr_columns {
            for (i, value) in self.column(j).filter(|&(i, _)| (start..end).contains(&i)) {
                result.row_indices.push(i - start);
                result.values.push(value);
            }
            result.column_pointers.push(result.row_indices.len());
        }
        result.nz_length = result.row_indices.len();

        result
    }

    /// Multiply every value by `alpha`, in place.
    pub fn scale(&mut self, alpha: F) {
        for value in self.values_mut() {
            *value *= alpha;
        }
    }

    /// Compute `alpha * self + beta * other`.
    ///
    /// The result is not sorted. Values that cancel are stored as explicit zeros.
    ///
    /// # Errors
    ///
    /// When the shapes differ.
    pub fn add(&self, alpha: F, other: &Self, beta: F) -> Result<Self, MatrixError> {
        if self.nr_rows != other.nr_rows || self.nr_columns != other.nr_columns {
            return Err(MatrixError::dimensions("add", format!(
                "{} x {} plus {} x {}", self.nr_rows, self.nr_columns, other.nr_rows, other.nr_columns,
            )));
        }

        let mut result = Self::new(self.nr_rows, self.nr_columns, self.nz_length + other.nz_length)?;
        // Column (plus one) in which a row was last written, and its running sum
        let mut mark = vec![0; self.nr_rows];
        let mut dense = vec![F::zero(); self.nr_rows];
        for j in 0..self.nr_columns {
            let start = result.nz_length;
            for (matrix, factor) in [(self, alpha), (other, beta)] {
                for (i, value) in matrix.column(j) {
                    if mark[i] == j + 1 {
                        dense[i] += factor * value;
                    } else {
                        mark[i] = j + 1;
                        dense[i] = factor * value;
                        result.row_indices[result.nz_length] = i;
                        result.nz_length += 1;
                    }
                }
            }
            for index in start..result.nz_length {
                result.values[index] = dense[result.row_indices[index]];
            }
            result.column_pointers[j + 1] = result.nz_length;
        }
        result.indices_sorted = false;

        Ok(result)
    }
}

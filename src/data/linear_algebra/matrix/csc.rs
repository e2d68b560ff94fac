//! # Compressed sparse column matrix
//!
//! Values are stored column after column. For column `j`, the values are in
//! `values[column_pointers[j]..column_pointers[j + 1]]` and their row indices at the same positions
//! in `row_indices`.
//!
//! The value and row index arrays can be longer than the number of values stored, so that values
//! can be appended without reallocating every time. Row indices within a column are only sorted
//! when the `indices_sorted` flag says so; kernels that produce unsorted output clear the flag and
//! sorting is an explicit operation.
use std::ops::Range;
use std::{fmt, iter};

use cumsum::cumsum_owned;

use crate::data::linear_algebra::matrix::{fmt_dense, get_data_dimensions, DenseMatrix, Matrix};
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::utilities::index_map_without;
use crate::error::MatrixError;

/// Sparse matrix in compressed sparse column format.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct CscMatrix<F> {
    pub(crate) nr_rows: usize,
    pub(crate) nr_columns: usize,
    /// Length `nr_columns + 1`, starts at `0` and ends at `nz_length`.
    pub(crate) column_pointers: Vec<usize>,
    /// Only the first `nz_length` values are meaningful.
    pub(crate) row_indices: Vec<usize>,
    /// Only the first `nz_length` values are meaningful.
    pub(crate) values: Vec<F>,
    pub(crate) nz_length: usize,
    pub(crate) indices_sorted: bool,
}

impl<F> Default for CscMatrix<F> {
    fn default() -> Self {
        Self {
            nr_rows: 0,
            nr_columns: 0,
            column_pointers: vec![0],
            row_indices: Vec::new(),
            values: Vec::new(),
            nz_length: 0,
            indices_sorted: true,
        }
    }
}

/// Largest number of values a matrix of this shape can store.
///
/// # Errors
///
/// When that number can't be represented, in which case the matrix can't be indexed.
pub(crate) fn max_length(nr_rows: usize, nr_columns: usize) -> Result<usize, MatrixError> {
    nr_columns.checked_add(1)
        .and_then(|_| nr_rows.checked_mul(nr_columns))
        .ok_or(MatrixError::SizeLimit { nr_rows, nr_columns })
}

impl<F: Field> CscMatrix<F> {
    /// Create an empty matrix.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of rows.
    /// * `nr_columns`: Number of columns.
    /// * `capacity`: Number of values to allocate space for. Limited to `nr_rows * nr_columns`.
    ///
    /// # Errors
    ///
    /// When `nr_rows * nr_columns` overflows.
    pub fn new(nr_rows: usize, nr_columns: usize, capacity: usize) -> Result<Self, MatrixError> {
        let capacity = capacity.min(max_length(nr_rows, nr_columns)?);

        Ok(Self {
            nr_rows,
            nr_columns,
            column_pointers: vec![0; nr_columns + 1],
            row_indices: vec![0; capacity],
            values: vec![F::zero(); capacity],
            nz_length: 0,
            indices_sorted: true,
        })
    }

    /// Create a square matrix with the given values on the diagonal.
    pub fn diag(values: &[F]) -> Result<Self, MatrixError> {
        let n = values.len();
        let mut matrix = Self::new(n, n, n)?;
        matrix.row_indices[..n].iter_mut().enumerate().for_each(|(i, row)| *row = i);
        matrix.values[..n].copy_from_slice(values);
        matrix.column_pointers.iter_mut().enumerate().for_each(|(j, pointer)| *pointer = j);
        matrix.nz_length = n;

        Ok(matrix)
    }

    /// Create an empty matrix of the same shape and capacity.
    pub fn create_like(&self) -> Self {
        Self {
            nr_rows: self.nr_rows,
            nr_columns: self.nr_columns,
            column_pointers: vec![0; self.nr_columns + 1],
            row_indices: vec![0; self.row_indices.len()],
            values: vec![F::zero(); self.values.len()],
            nz_length: 0,
            indices_sorted: true,
        }
    }

    /// Make this matrix have the same shape and non-zero pattern as `other`.
    ///
    /// The values are not copied and are zero afterwards.
    pub fn copy_structure(&mut self, other: &Self) {
        self.nr_rows = other.nr_rows;
        self.nr_columns = other.nr_columns;
        self.nz_length = other.nz_length;
        self.indices_sorted = other.indices_sorted;
        self.column_pointers.clear();
        self.column_pointers.extend_from_slice(other.column_pointers());
        self.row_indices.clear();
        self.row_indices.extend_from_slice(other.row_indices());
        self.values.clear();
        self.values.resize(other.nz_length, F::zero());
    }

    /// Convert a dense matrix, skipping values with a magnitude not larger than `tolerance`.
    pub fn from_dense(dense: &DenseMatrix<F>, tolerance: F) -> Self {
        let mut matrix = Self {
            nr_rows: dense.nr_rows,
            nr_columns: dense.nr_columns,
            column_pointers: Vec::with_capacity(dense.nr_columns + 1),
            row_indices: Vec::new(),
            values: Vec::new(),
            nz_length: 0,
            indices_sorted: true,
        };

        matrix.column_pointers.push(0);
        for j in 0..dense.nr_columns {
            for i in 0..dense.nr_rows {
                let value = dense.data[i * dense.nr_columns + j];
                if value.abs() > tolerance {
                    matrix.row_indices.push(i);
                    matrix.values.push(value);
                }
            }
            matrix.column_pointers.push(matrix.row_indices.len());
        }
        matrix.nz_length = matrix.row_indices.len();

        matrix
    }

    /// Convert to a dense matrix.
    ///
    /// Duplicate entries are summed.
    pub fn to_dense(&self) -> DenseMatrix<F> {
        let mut data = vec![F::zero(); self.nr_rows * self.nr_columns];
        for j in 0..self.nr_columns {
            for (i, value) in self.column(j) {
                data[i * self.nr_columns + j] += value;
            }
        }

        DenseMatrix { data, nr_rows: self.nr_rows, nr_columns: self.nr_columns }
    }

    /// Number of values that are stored, including explicit zeros.
    pub fn nz_length(&self) -> usize {
        self.nz_length
    }

    /// Whether the row indices within each column are known to be in increasing order.
    pub fn is_sorted(&self) -> bool {
        self.indices_sorted
    }

    /// Start of each column in the value array, followed by the number of values stored.
    pub fn column_pointers(&self) -> &[usize] {
        &self.column_pointers[..=self.nr_columns]
    }

    /// Row index of each value stored.
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices[..self.nz_length]
    }

    /// Values stored.
    pub fn values(&self) -> &[F] {
        &self.values[..self.nz_length]
    }

    /// Values stored, mutably. The structure can't be changed this way.
    pub fn values_mut(&mut self) -> &mut [F] {
        &mut self.values[..self.nz_length]
    }

    /// Positions in the value array of the values of column `j`.
    pub fn column_range(&self, j: usize) -> Range<usize> {
        debug_assert!(j < self.nr_columns);

        self.column_pointers[j]..self.column_pointers[j + 1]
    }

    /// Iterate over the `(row, value)` pairs stored in column `j`, in storage order.
    pub fn column(&self, j: usize) -> impl Iterator<Item = (usize, F)> + '_ {
        let range = self.column_range(j);
        self.row_indices[range.clone()].iter().copied().zip(self.values[range].iter().copied())
    }

    /// Locate a value.
    ///
    /// Uses a binary search when the indices are sorted and a linear scan otherwise.
    ///
    /// # Return value
    ///
    /// `Ok` with the position of the value, or `Err` with the position at which it should be
    /// inserted to keep the column in the current order.
    fn locate(&self, row: usize, column: usize) -> Result<usize, usize> {
        let range = self.column_range(column);
        let rows = &self.row_indices[range.clone()];

        if self.indices_sorted {
            rows.binary_search(&row)
                .map(|i| range.start + i)
                .map_err(|i| range.start + i)
        } else {
            rows.iter().position(|&i| i == row)
                .map(|i| range.start + i)
                .ok_or(range.end)
        }
    }

    /// Position of a value in the value array, if it is stored.
    pub fn nz_index(&self, row: usize, column: usize) -> Option<usize> {
        assert!(row < self.nr_rows && column < self.nr_columns);

        self.locate(row, column).ok()
    }

    /// Whether a value is stored at this coordinate. The stored value might be zero.
    pub fn is_assigned(&self, row: usize, column: usize) -> bool {
        self.nz_index(row, column).is_some()
    }

    /// Remove the value at a coordinate, if it is stored.
    pub fn remove(&mut self, row: usize, column: usize) {
        if let Some(index) = self.nz_index(row, column) {
            self.row_indices.copy_within(index + 1..self.nz_length, index);
            self.values.copy_within(index + 1..self.nz_length, index);
            self.nz_length -= 1;
            for pointer in &mut self.column_pointers[column + 1..=self.nr_columns] {
                *pointer -= 1;
            }
        }
    }

    /// Remove all values, keeping the shape and the allocated space.
    pub fn zero(&mut self) {
        self.column_pointers.fill(0);
        self.nz_length = 0;
        self.indices_sorted = true;
    }

    /// Change the shape and remove all values.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: New number of rows.
    /// * `nr_columns`: New number of columns.
    /// * `capacity`: Minimum number of values to have space for afterwards.
    ///
    /// # Errors
    ///
    /// When `nr_rows * nr_columns` overflows. The matrix is unchanged in that case.
    pub fn reshape(&mut self, nr_rows: usize, nr_columns: usize, capacity: usize) -> Result<(), MatrixError> {
        max_length(nr_rows, nr_columns)?;

        self.nr_rows = nr_rows;
        self.nr_columns = nr_columns;
        self.grow_max_length(capacity);
        self.grow_max_columns(nr_columns);
        self.zero();

        Ok(())
    }

    /// Make sure there is space for at least `length` values, but never more than the number of
    /// elements in the matrix. Stored values are preserved.
    pub fn grow_max_length(&mut self, length: usize) {
        // The product was validated when the shape was set
        let length = length.min(self.nr_rows * self.nr_columns);
        if length > self.row_indices.len() {
            self.row_indices.resize(length, 0);
            self.values.resize(length, F::zero());
        }
    }

    /// Make sure there is space to append `extra` values.
    ///
    /// Grows at least geometrically, such that appending values one by one is amortized constant
    /// time.
    pub fn grow_non_zeros(&mut self, extra: usize) {
        let needed = self.nz_length + extra;
        if needed > self.row_indices.len() {
            self.grow_max_length(needed.max(2 * self.row_indices.len()));
        }
    }

    /// Make sure there is space for the column pointers of `nr_columns` columns.
    ///
    /// The number of columns of the matrix does not change.
    pub fn grow_max_columns(&mut self, nr_columns: usize) {
        if self.column_pointers.len() < nr_columns + 1 {
            self.column_pointers.resize(nr_columns + 1, self.nz_length);
        }
    }

    /// Release space that is not used by the stored values.
    pub fn shrink_arrays(&mut self) {
        self.row_indices.truncate(self.nz_length);
        self.row_indices.shrink_to_fit();
        self.values.truncate(self.nz_length);
        self.values.shrink_to_fit();
        self.column_pointers.truncate(self.nr_columns + 1);
        self.column_pointers.shrink_to_fit();
    }

    /// Sort the row indices within each column.
    pub fn sort_indices(&mut self) {
        if self.indices_sorted {
            return;
        }

        let mut column = Vec::new();
        for j in 0..self.nr_columns {
            let range = self.column_range(j);
            column.clear();
            column.extend(self.column(j));
            column.sort_unstable_by_key(|&(i, _)| i);

            for (index, (i, value)) in range.zip(column.iter().copied()) {
                self.row_indices[index] = i;
                self.values[index] = value;
            }
        }

        self.indices_sorted = true;
    }

    /// Set the column pointers from the number of values per column.
    ///
    /// # Arguments
    ///
    /// * `counts`: Number of values in each column, of length `nr_columns`.
    pub fn colsum(&mut self, counts: &[usize]) {
        debug_assert_eq!(counts.len(), self.nr_columns);

        let pointers = cumsum_owned(iter::once(0).chain(counts.iter().copied()).collect());
        self.column_pointers[..=self.nr_columns].copy_from_slice(&pointers);
        self.nz_length = self.column_pointers[self.nr_columns];
        self.grow_max_length(self.nz_length);
    }

    /// Remove all stored values with a magnitude not larger than `tolerance`.
    ///
    /// The relative order of the remaining values is preserved.
    pub fn remove_zeros(&mut self, tolerance: F) {
        self.retain(|_, value| value.abs() > tolerance);
    }

    /// Remove rows from the matrix.
    ///
    /// # Arguments
    ///
    /// * `rows`: Sorted, unique indices of the rows to remove.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(rows.iter().all(|&i| i < self.nr_rows));

        if rows.is_empty() {
            return;
        }

        let map = index_map_without(rows, self.nr_rows);
        self.retain(|row, _| map[row].is_some());
        for row in &mut self.row_indices[..self.nz_length] {
            if let Some(new_row) = map[*row] {
                *row = new_row;
            }
        }
        self.nr_rows -= rows.len();
    }

    /// Keep only the values for which the predicate holds, compacting storage in place.
    fn retain(&mut self, mut keep: impl FnMut(usize, F) -> bool) {
        let mut write = 0;
        let mut start = 0;
        for j in 0..self.nr_columns {
            let end = self.column_pointers[j + 1];
            for read in start..end {
                if keep(self.row_indices[read], self.values[read]) {
                    self.row_indices[write] = self.row_indices[read];
                    self.values[write] = self.values[read];
                    write += 1;
                }
            }
            start = end;
            self.column_pointers[j + 1] = write;
        }
        self.nz_length = write;
    }
}

impl<F: Field> Matrix<F> for CscMatrix<F> {
    fn from_data(data: Vec<Vec<F>>) -> Result<Self, MatrixError> {
        let (nr_rows, nr_columns) = get_data_dimensions(&data)?;
        let dense = DenseMatrix {
            data: data.into_iter().flatten().collect(),
            nr_rows,
            nr_columns,
        };

        Ok(Self::from_dense(&dense, F::zero()))
    }

    fn identity(size: usize) -> Result<Self, MatrixError> {
        Self::diag(&vec![F::one(); size])
    }

    fn zeros(nr_rows: usize, nr_columns: usize) -> Result<Self, MatrixError> {
        Self::new(nr_rows, nr_columns, 0)
    }

    /// Returns zero for values that are not stored.
    fn get_value(&self, row: usize, column: usize) -> F {
        self.nz_index(row, column).map_or(F::zero(), |index| self.values[index])
    }

    /// Insert or overwrite a value.
    ///
    /// Zero values are stored explicitly; use `remove` to delete a value. Inserting into a column
    /// that is not the last one shifts all values after it, so matrices should be built column by
    /// column when possible.
    fn set_value(&mut self, row: usize, column: usize, value: F) {
        assert!(row < self.nr_rows && column < self.nr_columns);

        match self.locate(row, column) {
            Ok(index) => self.values[index] = value,
            Err(index) => {
                if self.nz_length >= self.row_indices.len() {
                    self.grow_max_length(self.nz_length * 2 + 1);
                }

                self.row_indices.copy_within(index..self.nz_length, index + 1);
                self.values.copy_within(index..self.nz_length, index + 1);
                self.row_indices[index] = row;
                self.values[index] = value;
                self.nz_length += 1;
                for pointer in &mut self.column_pointers[column + 1..=self.nr_columns] {
                    *pointer += 1;
                }
            },
        }
    }

    fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn size(&self) -> usize {
        self.nz_length
    }
}

impl<F: Field> fmt::Display for CscMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dense(self, f)
    }
}

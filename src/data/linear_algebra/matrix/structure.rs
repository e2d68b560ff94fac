//! # Structure validation
//!
//! The kernels assume, but do not check, that the matrices they get are well formed. These checks
//! are explicit and meant to be used after constructing or mutating a matrix, mostly in tests.
use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::traits::Field;
use crate::error::StructureError;

impl<F: Field> CscMatrix<F> {
    /// Validate the internal structure.
    ///
    /// Checks the column pointers, that all row indices are in bounds, that columns which are
    /// flagged as sorted really are sorted and that no row appears twice within a column.
    ///
    /// # Return value
    ///
    /// The first problem found, if any.
    pub fn check_structure(&self) -> Result<(), StructureError> {
        if self.column_pointers.len() < self.nr_columns + 1 {
            return Err(StructureError::ColumnPointerLength { found: self.column_pointers.len() });
        }
        if self.column_pointers[0] != 0 {
            return Err(StructureError::ColumnPointerStart);
        }
        let end = self.column_pointers[self.nr_columns];
        if end != self.nz_length || self.nz_length > self.row_indices.len() || self.nz_length > self.values.len() {
            return Err(StructureError::ColumnPointerEnd { found: end, nz_length: self.nz_length });
        }

        for column in 0..self.nr_columns {
            let (start, end) = (self.column_pointers[column], self.column_pointers[column + 1]);
            if end < start {
                return Err(StructureError::DecreasingColumnPointer { column });
            }
            if end - start > self.nr_rows {
                return Err(StructureError::ColumnTooLong { column });
            }

            let rows = &self.row_indices[start..end];
            if let Some(&row) = rows.iter().find(|&&row| row >= self.nr_rows) {
                return Err(StructureError::RowOutOfBounds { column, row });
            }
            if self.indices_sorted {
                for pair in rows.windows(2) {
                    if pair[0] == pair[1] {
                        return Err(StructureError::DuplicateEntry { column, row: pair[0] });
                    }
                    if pair[0] > pair[1] {
                        return Err(StructureError::UnsortedIndices { column });
                    }
                }
            }
        }

        if self.indices_sorted {
            Ok(())
        } else {
            self.check_duplicates()
        }
    }

    /// Whether the row indices in every column are strictly increasing, regardless of the flag.
    pub fn check_indices_sorted(&self) -> bool {
        (0..self.nr_columns).all(|j| {
            self.row_indices[self.column_range(j)].windows(2).all(|pair| pair[0] < pair[1])
        })
    }

    /// Check that no row index appears more than once in a column.
    ///
    /// Works for unsorted columns. Assumes the column pointers and row indices are in bounds.
    pub fn check_duplicates(&self) -> Result<(), StructureError> {
        // Last column (plus one) in which a row was seen
        let mut seen = vec![0; self.nr_rows];
        for column in 0..self.nr_columns {
            for &row in &self.row_indices[self.column_range(column)] {
                if seen[row] == column + 1 {
                    return Err(StructureError::DuplicateEntry { column, row });
                }
                seen[row] = column + 1;
            }
        }

        Ok(())
    }
}

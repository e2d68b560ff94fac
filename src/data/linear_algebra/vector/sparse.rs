//! # Sparse vector
//!
//! Wrapping a `Vec<(usize, _)>`, fixed size.
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;
use std::slice::Iter;

use crate::data::linear_algebra::matrix::CscMatrix;
use crate::data::linear_algebra::SparseTuple;
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

/// A sparse vector using a `Vec` with (row, value) combinations as back-end. Indices start at
/// `0`.
#[derive(PartialEq, Clone, Debug)]
pub struct Sparse<F> {
    data: Vec<SparseTuple<F>>,
    len: usize,
}

impl<F> Sparse<F> {
    fn get_data_index(&self, i: usize) -> Result<usize, usize> {
        self.data.binary_search_by_key(&i, |&(index, _)| index)
    }

    /// Iterate over the stored `(index, value)` tuples in increasing index order.
    pub fn iter(&self) -> Iter<'_, SparseTuple<F>> {
        self.data.iter()
    }

    /// The length of this vector.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this vector has zero size.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of values stored.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl<F> Deref for Sparse<F> {
    type Target = [SparseTuple<F>];

    fn deref(&self) -> &Self::Target {
        self.data.deref()
    }
}

impl<F: Field> Sparse<F> {
    /// Create a vector of length `len` from `data`.
    ///
    /// Requires that the indices are sorted, unique and smaller than `len`.
    pub fn new(data: Vec<SparseTuple<F>>, len: usize) -> Self {
        debug_assert!(data.iter().all(|&(i, _)| i < len));
        debug_assert!(data.windows(2).all(|w| w[0].0 < w[1].0));

        Self { data, len }
    }

    /// Copy column `j` of a matrix.
    pub fn from_column(matrix: &CscMatrix<F>, j: usize) -> Self {
        let mut data = matrix.column(j).collect::<Vec<_>>();
        if !matrix.is_sorted() {
            data.sort_unstable_by_key(|&(i, _)| i);
        }

        Self::new(data, matrix.nr_rows)
    }

    /// Convert into a matrix with a single column.
    pub fn to_column_matrix(&self) -> Result<CscMatrix<F>, MatrixError> {
        let mut matrix = CscMatrix::new(self.len, 1, self.data.len())?;
        for (index, &(i, value)) in self.data.iter().enumerate() {
            matrix.row_indices[index] = i;
            matrix.values[index] = value;
        }
        matrix.nz_length = self.data.len();
        matrix.column_pointers[1] = self.data.len();

        Ok(matrix)
    }

    /// Retrieve the value at an index, zero if it is not stored.
    pub fn get(&self, i: usize) -> F {
        debug_assert!(i < self.len);

        self.get_data_index(i).map_or(F::zero(), |index| self.data[index].1)
    }
}

impl<F: Field> FromIterator<F> for Sparse<F> {
    /// Collect a dense sequence, skipping the zero values.
    fn from_iter<I: IntoIterator<Item=F>>(iter: I) -> Self {
        let mut data = Vec::new();
        let mut counter = 0;

        for item in iter {
            if !item.is_zero() {
                data.push((counter, item));
            }
            counter += 1;
        }

        Self::new(data, counter)
    }
}

impl<F: Field> fmt::Display for Sparse<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (k, (index, value)) in self.data.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({} {})", index, value)?;
        }
        write!(f, "]")
    }
}

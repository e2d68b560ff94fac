//! # Triangular solver
//!
//! Solving with a coefficient matrix that is already triangular, such as the factors of a
//! decomposition.
use tracing::debug;

use crate::algorithm::solver::LinearSolver;
use crate::algorithm::triangular::solve::{quality_triangular, solve, solve_l, solve_u};
use crate::data::linear_algebra::matrix::{CscMatrix, DenseMatrix, Matrix};
use crate::data::linear_algebra::traits::Field;
use crate::data::linear_algebra::work::GrowArray;
use crate::error::MatrixError;

/// Solves `A X = B` for a square lower or upper triangular `A` by substitution.
///
/// The indices of `A` are sorted in place by `set_a`, after which a copy is kept.
#[derive(Debug, Clone)]
pub struct TriangularLinearSolver<F> {
    lower: bool,
    a: CscMatrix<F>,
    column: Vec<F>,
    dense: GrowArray<F>,
    xi: GrowArray<usize>,
    work: GrowArray<usize>,
}

impl<F: Field> TriangularLinearSolver<F> {
    /// Create a solver for lower (`lower` is true) or upper triangular matrices.
    pub fn new(lower: bool) -> Self {
        Self {
            lower,
            a: CscMatrix::default(),
            column: Vec::new(),
            dense: GrowArray::new(),
            xi: GrowArray::new(),
            work: GrowArray::new(),
        }
    }

    /// Whether this solver expects lower triangular matrices.
    pub fn is_lower(&self) -> bool {
        self.lower
    }
}

impl<F: Field> LinearSolver<F> for TriangularLinearSolver<F> {
    fn set_a(&mut self, a: &mut CscMatrix<F>) -> Result<(), MatrixError> {
        if a.nr_rows != a.nr_columns {
            return Err(MatrixError::dimensions("set_a", format!(
                "a triangular solver needs a square matrix, got {} x {}", a.nr_rows, a.nr_columns,
            )));
        }

        // Substitution finds the diagonal at the start or end of each column
        a.sort_indices();
        self.a = a.clone();

        debug!(size = a.nr_columns, nz_length = a.nz_length, lower = self.lower, "triangular solver matrix set");

        Ok(())
    }

    fn solve_dense(&mut self, b: &mut DenseMatrix<F>, x: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
        let n = self.a.nr_columns;
        if b.nr_rows != n {
            return Err(MatrixError::dimensions("solve_dense", format!(
                "A is {} x {} while B has {} rows", n, n, b.nr_rows,
            )));
        }

        x.reshape(n, b.nr_columns)?;
        for j in 0..b.nr_columns {
            self.column.clear();
            self.column.extend((0..n).map(|i| b.get_value(i, j)));
            if self.lower {
                solve_l(&self.a, &mut self.column)?;
            } else {
                solve_u(&self.a, &mut self.column)?;
            }
            x.set_column(j, &self.column);
        }

        Ok(())
    }

    fn solve_sparse(&mut self, b: &mut CscMatrix<F>, x: &mut CscMatrix<F>) -> Result<(), MatrixError> {
        solve(&self.a, self.lower, b, x, None, &mut self.dense, &mut self.xi, &mut self.work)
    }

    fn quality(&self) -> F {
        quality_triangular(&self.a)
    }

    fn modifies_a(&self) -> bool {
        true
    }

    fn modifies_b(&self) -> bool {
        false
    }
}

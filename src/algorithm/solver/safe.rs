//! # Non-destructive solving
//!
//! Wraps any solver such that the matrices passed in are never changed.
use crate::algorithm::solver::LinearSolver;
use crate::data::linear_algebra::matrix::{CscMatrix, DenseMatrix};
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

/// Copies the inputs before handing them to the inner solver, but only those that the inner solver
/// would modify.
///
/// The copies are kept between calls, so their memory is reused.
#[derive(Debug, Clone)]
pub struct SafeLinearSolver<F, S> {
    solver: S,
    a: CscMatrix<F>,
    dense_b: DenseMatrix<F>,
    sparse_b: CscMatrix<F>,
}

impl<F: Field, S: LinearSolver<F>> SafeLinearSolver<F, S> {
    /// Wrap a solver.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            a: CscMatrix::default(),
            dense_b: DenseMatrix::default(),
            sparse_b: CscMatrix::default(),
        }
    }

    /// The wrapped solver.
    pub fn inner(&self) -> &S {
        &self.solver
    }

    /// Unwrap the solver.
    pub fn into_inner(self) -> S {
        self.solver
    }
}

impl<F: Field, S: LinearSolver<F>> LinearSolver<F> for SafeLinearSolver<F, S> {
    fn set_a(&mut self, a: &mut CscMatrix<F>) -> Result<(), MatrixError> {
        if self.solver.modifies_a() {
            self.a.clone_from(a);
            self.solver.set_a(&mut self.a)
        } else {
            self.solver.set_a(a)
        }
    }

    fn solve_dense(&mut self, b: &mut DenseMatrix<F>, x: &mut DenseMatrix<F>) -> Result<(), MatrixError> {
        if self.solver.modifies_b() {
            self.dense_b.clone_from(b);
            self.solver.solve_dense(&mut self.dense_b, x)
        } else {
            self.solver.solve_dense(b, x)
        }
    }

    fn solve_sparse(&mut self, b: &mut CscMatrix<F>, x: &mut CscMatrix<F>) -> Result<(), MatrixError> {
        if self.solver.modifies_b() {
            self.sparse_b.clone_from(b);
            self.solver.solve_sparse(&mut self.sparse_b, x)
        } else {
            self.solver.solve_sparse(b, x)
        }
    }

    fn quality(&self) -> F {
        self.solver.quality()
    }

    fn modifies_a(&self) -> bool {
        false
    }

    fn modifies_b(&self) -> bool {
        false
    }
}

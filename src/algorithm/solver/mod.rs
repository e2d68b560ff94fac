//! # Linear solvers
//!
//! A common interface for solving `A X = B` once `A` is known, such that callers can swap one
//! solver for another. Solvers are allowed to use the memory of `A` and `B` for their own purposes
//! to avoid copies; they report whether they do so through `modifies_a` and `modifies_b`. Wrap a
//! solver in a `SafeLinearSolver` when the inputs need to stay untouched.
use crate::data::linear_algebra::matrix::{CscMatrix, DenseMatrix};
use crate::data::linear_algebra::traits::Field;
use crate::error::MatrixError;

pub use safe::SafeLinearSolver;
pub use triangular::TriangularLinearSolver;

mod safe;
mod triangular;

/// Solve linear systems with a fixed coefficient matrix.
///
/// A solver is created once and can be given a new coefficient matrix many times. Workspace is
/// kept between calls.
pub trait LinearSolver<F: Field> {
    /// Specify the coefficient matrix `A`.
    ///
    /// Any analysis that only depends on `A` is done here, so that the following solves are
    /// cheap.
    ///
    /// # Arguments
    ///
    /// * `a`: Coefficient matrix. Might be modified when `modifies_a` returns true.
    ///
    /// # Errors
    ///
    /// When `A` can't be used by this solver, for example because its shape is wrong.
    fn set_a(&mut self, a: &mut CscMatrix<F>) -> Result<(), MatrixError>;

    /// Solve `A X = B` for a dense `B`.
    ///
    /// # Arguments
    ///
    /// * `b`: Right-hand sides. Might be modified when `modifies_b` returns true.
    /// * `x`: Output, reshaped to the shape of the solution.
    fn solve_dense(&mut self, b: &mut DenseMatrix<F>, x: &mut DenseMatrix<F>) -> Result<(), MatrixError>;

    /// Solve `A X = B` for a sparse `B`.
    ///
    /// # Arguments
    ///
    /// * `b`: Right-hand sides. Might be modified when `modifies_b` returns true.
    /// * `x`: Output, reshaped to the shape of the solution.
    fn solve_sparse(&mut self, b: &mut CscMatrix<F>, x: &mut CscMatrix<F>) -> Result<(), MatrixError>;

    /// A cheap, scale invariant indication of how well conditioned `A` is.
    ///
    /// Zero means singular, larger is better. Only meaningful for comparing systems solved with
    /// the same kind of solver.
    fn quality(&self) -> F;

    /// Whether `set_a` changes the matrix that is passed to it.
    fn modifies_a(&self) -> bool;

    /// Whether the solve methods change the right-hand side that is passed to them.
    fn modifies_b(&self) -> bool;
}

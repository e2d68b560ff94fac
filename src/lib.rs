//! # Sparse triangular solves on compressed column matrices
//!
//! Storage, symbolic analysis and numeric kernels for sparse matrices in Compressed Sparse Column
//! (CSC) format. The symbolic part computes elimination trees, post-orderings and the column counts
//! of a Cholesky-like factor without forming it. The numeric part solves lower and upper triangular
//! systems with dense or sparse right-hand sides, optionally with a column pivot permutation, and
//! multiplies sparse matrices with sparse or dense operands.
//!
//! The kernels are single-threaded and take caller-owned workspace arrays so that repeated calls
//! with the same structure don't allocate. Multiplication additionally has data-parallel variants
//! behind the `rayon` feature.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod error;

//! # Sparse triangular systems
//!
//! Symbolic analysis and numeric solves for sparse triangular matrices in compressed column
//! format.
//!
//! The symbolic part works on the non-zero pattern only. The elimination tree describes which
//! columns of a Cholesky-like factor depend on which, a post-ordering of that tree numbers every
//! subtree contiguously and the column counts give the number of values in each factor column
//! without computing the factor. Reachability determines which values of a solution can be
//! non-zero before any arithmetic is done.
//!
//! The numeric part solves `G x = b` and `G^T x = b` for a triangular `G`, with a dense or a sparse
//! right-hand side, optionally with column pivots.
//!
//! Missing or zero diagonal values are not detected; they result in infinite or NaN values.
pub mod column_count;
pub mod elimination_tree;
pub mod reach;
pub mod solve;

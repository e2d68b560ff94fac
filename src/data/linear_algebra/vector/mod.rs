//! # Vector types
//!
//! A sparse vector of sorted `(index, value)` tuples. Dense vectors are plain slices.
pub use sparse::Sparse as SparseVector;

mod sparse;

//! # Linear algebra primitives
//!
//! Linear algebra primitives used to represent data in either a dense or a sparse format.

pub mod matrix;
pub mod permutation;
pub mod traits;
pub mod vector;
pub mod work;
pub(crate) mod utilities;

/// A single stored value of a sparse structure, together with its index.
pub type SparseTuple<F> = (usize, F);

/// Conventional absolute tolerance for comparing `f64` results.
pub const TEST_F64: f64 = 1e-8;
/// Conventional absolute tolerance for comparing `f32` results.
pub const TEST_F32: f32 = 5e-4;

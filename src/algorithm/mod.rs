//! # Algorithms
//!
//! Multiplication kernels, the symbolic analysis and numeric substitution of sparse triangular
//! systems, and a solver interface on top of those.
pub mod multiplication;
pub mod solver;
pub mod triangular;

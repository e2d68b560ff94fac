//! # Storing of sparse and dense matrices in memory
//!
//! This module provides the data structures operated on by the algorithms, together with the
//! bookkeeping they need: growable workspace arrays and permutations. Algorithms may introduce
//! their specific data structures in `algorithm::my_algorithm`.

pub mod linear_algebra;

//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
//!
//! The tests are randomized with a fixed seed. Random matrix generation lives here rather than in
//! the library, as nothing but the tests needs it.

mod random;

mod multiplication;
mod solve;
mod symbolic;

//! # Random matrices
//!
//! Generators for the randomized tests. Patterns are drawn uniformly without replacement, values
//! uniformly from a range.
use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index::sample;

use csc_solve::data::linear_algebra::matrix::{CscMatrix, DenseMatrix, Matrix};

/// Seed shared by all randomized tests, so failures reproduce.
pub const SEED: u64 = 0x00c5_c501;

/// A matrix with `nz` values at random positions (fewer if the matrix is too small).
pub fn rectangle<R: Rng>(
    nr_rows: usize,
    nr_columns: usize,
    nz: usize,
    min: f64,
    max: f64,
    rng: &mut R,
) -> CscMatrix<f64> {
    let total = nr_rows * nr_columns;
    let nz = nz.min(total);

    // Column major positions, so the matrix is built column after column
    let mut selected = sample(rng, total, nz).into_vec();
    selected.sort_unstable();

    let mut matrix = CscMatrix::new(nr_rows, nr_columns, nz).unwrap();
    for position in selected {
        matrix.set_value(position % nr_rows, position / nr_rows, rng.gen_range(min..max));
    }

    matrix
}

/// A square lower triangular matrix with all diagonal values present.
///
/// Diagonal values have a magnitude between one and two, other values are between `-1` and `1`.
/// The total number of values is at least `n` and at most `n (n + 1) / 2`.
pub fn triangle_lower<R: Rng>(n: usize, nz: usize, rng: &mut R) -> CscMatrix<f64> {
    let below = (0..n)
        .flat_map(|j| (j + 1..n).map(move |i| (i, j)))
        .collect::<Vec<_>>();
    let nr_off_diagonal = nz.saturating_sub(n).min(below.len());

    let mut positions = below.choose_multiple(rng, nr_off_diagonal).copied().collect::<Vec<_>>();
    positions.extend((0..n).map(|i| (i, i)));
    positions.sort_unstable_by_key(|&(i, j)| (j, i));

    let mut matrix = CscMatrix::new(n, n, positions.len()).unwrap();
    for (i, j) in positions {
        let value = if i == j {
            let magnitude = rng.gen_range(1_f64..2_f64);
            if rng.gen_bool(0.5) { magnitude } else { -magnitude }
        } else {
            rng.gen_range(-1_f64..1_f64)
        };
        matrix.set_value(i, j, value);
    }

    matrix
}

/// The transpose of a random lower triangular matrix.
pub fn triangle_upper<R: Rng>(n: usize, nz: usize, rng: &mut R) -> CscMatrix<f64> {
    triangle_lower(n, nz, rng).transpose()
}

/// A symmetric matrix with a full diagonal and `nz` values at random positions above it, mirrored.
pub fn symmetric<R: Rng>(n: usize, nz: usize, rng: &mut R) -> CscMatrix<f64> {
    let mut dense = DenseMatrix::zeros(n, n).unwrap();
    for i in 0..n {
        dense.set_value(i, i, rng.gen_range(1_f64..2_f64));
    }

    let above = (0..n)
        .flat_map(|j| (0..j).map(move |i| (i, j)))
        .collect::<Vec<_>>();
    for &(i, j) in above.choose_multiple(rng, nz.min(above.len())) {
        let value = rng.gen_range(1_f64..2_f64);
        dense.set_value(i, j, value);
        dense.set_value(j, i, value);
    }

    CscMatrix::from_dense(&dense, 0_f64)
}

/// A dense matrix with values between `-1` and `1`.
pub fn dense<R: Rng>(nr_rows: usize, nr_columns: usize, rng: &mut R) -> DenseMatrix<f64> {
    let data = (0..nr_rows * nr_columns).map(|_| rng.gen_range(-1_f64..1_f64)).collect();
    DenseMatrix::from_row_major(nr_rows, nr_columns, data).unwrap()
}

/// The numbers `0..n` in random order.
pub fn shuffled<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut values = (0..n).collect::<Vec<_>>();
    values.shuffle(rng);
    values
}

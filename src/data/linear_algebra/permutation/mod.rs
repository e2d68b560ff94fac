//! # Permutations
//!
//! Row and column reorderings are plain index arrays. The triangular solves take the pivots as an
//! inverse permutation `pinv`, with `pinv[i]` the new position of row `i`.

/// Compute the inverse of a permutation array.
///
/// # Arguments
///
/// * `permutation`: A permutation of `0..permutation.len()`; `permutation[i] = j` means that `i`
/// maps to `j`.
///
/// # Return value
///
/// The array `inverse` with `inverse[j] = i`.
pub fn permutation_inverse(permutation: &[usize]) -> Vec<usize> {
    debug_assert!(permutation.iter().all(|&j| j < permutation.len()));

    let mut inverse = vec![0; permutation.len()];
    for (i, &j) in permutation.iter().enumerate() {
        inverse[j] = i;
    }

    inverse
}

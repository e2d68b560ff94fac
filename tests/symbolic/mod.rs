//! # Symbolic analysis
//!
//! Elimination trees, post-orderings and column counts of random patterns, checked against each
//! other and against a brute force symbolic factorization.
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use csc_solve::algorithm::multiplication::mult_trans_a;
use csc_solve::algorithm::triangular::column_count::ColumnCounts;
use csc_solve::algorithm::triangular::elimination_tree::{elimination_tree, postorder};
use csc_solve::algorithm::triangular::reach::search_nz_rows_elim;
use csc_solve::data::linear_algebra::matrix::{CscMatrix, Matrix};
use csc_solve::data::linear_algebra::permutation::permutation_inverse;
use csc_solve::data::linear_algebra::work::GrowArray;

use crate::random::{rectangle, symmetric, SEED};

struct Analysis {
    parent: Vec<Option<usize>>,
    post: Vec<usize>,
    counts: Vec<usize>,
}

fn analyze(a: &CscMatrix<f64>, ata: bool) -> Analysis {
    let n = a.nr_columns();
    let mut work = GrowArray::new();

    let mut parent = vec![None; n];
    elimination_tree(a, ata, &mut parent, &mut work).unwrap();
    let mut post = vec![0; n];
    postorder(&parent, &mut post, &mut work).unwrap();
    let mut counts = vec![0; n];
    ColumnCounts::new(ata).process(a, &parent, &post, &mut counts).unwrap();

    Analysis { parent, post, counts }
}

/// Pattern of the Cholesky factor of a symmetric matrix, by eliminating the dense pattern.
///
/// Entry `[i][j]` is true when `L[i, j]` is structurally non-zero.
fn brute_force_factor(a: &CscMatrix<f64>) -> Vec<Vec<bool>> {
    let n = a.nr_columns();
    let mut pattern = vec![vec![false; n]; n];
    for j in 0..n {
        pattern[j][j] = true;
        for (i, _) in a.column(j).filter(|&(i, _)| i > j) {
            pattern[i][j] = true;
        }
    }

    for k in 0..n {
        let below = (k + 1..n).filter(|&i| pattern[i][k]).collect::<Vec<_>>();
        for &j in &below {
            for &i in &below {
                if i >= j {
                    pattern[i][j] = true;
                }
            }
        }
    }

    pattern
}

#[test]
fn implicit_and_explicit_ata_agree() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..200 {
        let nr_rows = rng.gen_range(1..=16);
        let nr_columns = rng.gen_range(1..=16);
        let nz = rng.gen_range(0..=nr_rows * nr_columns);
        let a = rectangle(nr_rows, nr_columns, nz, -1_f64, 1_f64, &mut rng);
        let ata = mult_trans_a(&a, &a).unwrap();

        let implicit = analyze(&a, true);
        let explicit = analyze(&ata, false);
        assert_eq!(implicit.parent, explicit.parent);
        assert_eq!(implicit.post, explicit.post);
        assert_eq!(implicit.counts, explicit.counts);
    }
}

#[test]
fn counts_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..100 {
        let n = rng.gen_range(1..=16);
        let nz = rng.gen_range(0..=n * n / 2);
        let a = symmetric(n, nz, &mut rng);
        let pattern = brute_force_factor(&a);
        let result = analyze(&a, false);

        for j in 0..n {
            let expected_parent = (j + 1..n).find(|&i| pattern[i][j]);
            assert_eq!(result.parent[j], expected_parent);
            let expected_count = (j..n).filter(|&i| pattern[i][j]).count();
            assert_eq!(result.counts[j], expected_count);
        }
    }
}

#[test]
fn upper_values_lie_on_tree_paths() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..100 {
        let n = rng.gen_range(1..=16);
        let nz = rng.gen_range(0..=n * n);
        let a = rectangle(n, n, nz, -1_f64, 1_f64, &mut rng);
        let Analysis { parent, post, .. } = analyze(&a, false);

        // Column j is an ancestor of every row i < j in its upper triangle
        for j in 0..n {
            for (i, _) in a.column(j).filter(|&(i, _)| i < j) {
                let mut node = Some(i);
                while let Some(current) = node && current < j {
                    node = parent[current];
                }
                assert_eq!(node, Some(j));
            }
        }

        // Descendants come first
        let position = permutation_inverse(&post);
        for (i, p) in parent.iter().enumerate() {
            if let &Some(p) = p {
                assert!(position[i] < position[p]);
            }
        }
    }
}

#[test]
fn row_patterns_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut s = vec![0; 16];
    let mut marked = vec![false; 16];
    for _ in 0..100 {
        let n = rng.gen_range(1..=16);
        let nz = rng.gen_range(0..=n * n / 2);
        let a = symmetric(n, nz, &mut rng);
        let pattern = brute_force_factor(&a);
        let Analysis { parent, .. } = analyze(&a, false);

        for k in 0..n {
            let top = search_nz_rows_elim(&a, k, &parent, &mut s[..n], &mut marked[..n]);
            let mut found = s[top..n].to_vec();
            found.sort_unstable();
            let expected = (0..k).filter(|&j| pattern[k][j]).collect::<Vec<_>>();
            assert_eq!(found, expected);
        }
    }
}

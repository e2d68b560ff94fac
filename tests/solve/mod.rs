//! # Triangular solves
//!
//! Random triangular systems with a known solution.
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use csc_solve::algorithm::multiplication::{dense as dense_mult, mult};
use csc_solve::algorithm::solver::{LinearSolver, SafeLinearSolver, TriangularLinearSolver};
use csc_solve::algorithm::triangular::reach::search_nz_rows_in_x;
use csc_solve::algorithm::triangular::solve::{
    quality_triangular, solve, solve_l, solve_tran, solve_tran_l, solve_tran_u, solve_u,
};
use csc_solve::data::linear_algebra::matrix::{CscMatrix, DenseMatrix, Matrix};
use csc_solve::data::linear_algebra::permutation::permutation_inverse;
use csc_solve::data::linear_algebra::work::GrowArray;
use csc_solve::data::linear_algebra::TEST_F64;

use crate::random::{dense, rectangle, shuffled, triangle_lower, triangle_upper, SEED};

fn triangle(lower: bool, n: usize, nz: usize, rng: &mut StdRng) -> CscMatrix<f64> {
    if lower { triangle_lower(n, nz, rng) } else { triangle_upper(n, nz, rng) }
}

/// Solve a sparse system with fresh workspaces.
fn solve_sparse(g: &CscMatrix<f64>, lower: bool, b: &CscMatrix<f64>, pinv: Option<&[usize]>) -> CscMatrix<f64> {
    let mut x = CscMatrix::default();
    solve(g, lower, b, &mut x, pinv, &mut GrowArray::new(), &mut GrowArray::new(), &mut GrowArray::new()).unwrap();
    assert!(x.check_structure().is_ok());
    x
}

#[test]
fn dense_round_trip() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..10 {
        for nz in [5, 8, 10, 20] {
            let truth = dense(5, 1, &mut rng);
            let l = triangle_lower(5, nz, &mut rng);
            let u = triangle_upper(5, nz, &mut rng);

            let mut b = DenseMatrix::default();
            for (g, is_lower) in [(&l, true), (&u, false)] {
                dense_mult::mult(g, &truth, &mut b).unwrap();
                let mut x = b.data().to_vec();
                let result = if is_lower { solve_l(g, &mut x) } else { solve_u(g, &mut x) };
                result.unwrap();
                assert!(DenseMatrix::column_vector(x).approx_eq(&truth, TEST_F64));

                dense_mult::mult_trans_a(g, &truth, &mut b).unwrap();
                let mut x = b.data().to_vec();
                let result = if is_lower { solve_tran_l(g, &mut x) } else { solve_tran_u(g, &mut x) };
                result.unwrap();
                assert!(DenseMatrix::column_vector(x).approx_eq(&truth, TEST_F64));
            }
        }
    }
}

#[test]
fn sparse_round_trip() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..10 {
        for nz in [5, 8, 10, 20] {
            for lower in [true, false] {
                let g = triangle(lower, 5, nz, &mut rng);
                let b = rectangle(5, 3, nz, -1_f64, 1_f64, &mut rng);

                let x = solve_sparse(&g, lower, &b, None);
                assert!(mult(&g, &x).unwrap().approx_eq(&b, TEST_F64));

                let mut x_tran = CscMatrix::default();
                solve_tran(&g, lower, &b, &mut x_tran, &mut GrowArray::new(), &mut GrowArray::new(), &mut GrowArray::new()).unwrap();
                assert!(mult(&g.transpose(), &x_tran).unwrap().approx_eq(&b, TEST_F64));
            }
        }
    }
}

#[test]
fn pivots() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..10 {
        for nz in [5, 8, 10, 20] {
            for lower in [true, false] {
                let g = triangle(lower, 5, nz, &mut rng);
                let b = rectangle(5, 2, nz, -1_f64, 1_f64, &mut rng);
                let p = shuffled(5, &mut rng);
                let pinv = permutation_inverse(&p);
                let permuted = g.permute(None, Some(&p[..])).unwrap();

                let expected = solve_sparse(&g, lower, &b, None);
                let found = solve_sparse(&permuted, lower, &b, Some(&pinv[..]));
                assert!(found.approx_eq(&expected, TEST_F64));
            }
        }
    }
}

/// Only the leading square block of a tall matrix is used, the remaining rows are consistent with
/// the solution by construction.
#[test]
fn tall() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..40 {
        for (lower, n, extra, nr_columns_b) in [
            (true, 3, 1, 2), (true, 1, 3, 3), (true, 6, 4, 2), (true, 20, 30, 1),
            (false, 3, 1, 2), (false, 1, 3, 3), (false, 6, 1, 2), (false, 6, 4, 2), (false, 20, 30, 1),
        ] {
            let square = triangle(lower, n, 2 * n, &mut rng);
            let bottom = rectangle(extra, n, 3, -1_f64, 1_f64, &mut rng);
            let g = square.concat_rows(&bottom).unwrap();
            let truth = rectangle(n, nr_columns_b, (n * nr_columns_b / 2 + 1).max(nr_columns_b), -1_f64, 1_f64, &mut rng);
            let b = mult(&g, &truth).unwrap();

            let x = solve_sparse(&g, lower, &b, None);
            assert_eq!((x.nr_rows(), x.nr_columns()), (n, nr_columns_b));
            assert!(x.approx_eq(&truth, TEST_F64));
            assert!(mult(&g, &x).unwrap().approx_eq(&b, TEST_F64));

            if !lower {
                let p = shuffled(n, &mut rng);
                let pinv = permutation_inverse(&p);
                let permuted = g.permute(None, Some(&p[..])).unwrap();
                let x = solve_sparse(&permuted, lower, &b, Some(&pinv[..]));
                assert!(mult(&g, &x).unwrap().approx_eq(&b, TEST_F64));
            }
        }
    }
}

#[test]
fn reach_ignores_rows_below_square_block() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut xi = vec![0; 10];
    let mut xi_square = vec![0; 10];
    let mut work = GrowArray::new();
    for _ in 0..50 {
        let n = rng.gen_range(1..=10);
        let square = triangle_lower(n, 2 * n, &mut rng);
        let bottom = rectangle(rng.gen_range(1..=5), n, n, -1_f64, 1_f64, &mut rng);
        let g = square.concat_rows(&bottom).unwrap();
        let b = rectangle(g.nr_rows(), 1, n, -1_f64, 1_f64, &mut rng);

        let top = search_nz_rows_in_x(&g, &b, 0, None, &mut xi, &mut work).unwrap();
        let top_square = search_nz_rows_in_x(&square, &b, 0, None, &mut xi_square, &mut work).unwrap();
        assert_eq!(top, top_square);
        assert_eq!(xi[top..n], xi_square[top..n]);
        assert!(xi[top..n].iter().all(|&row| row < n));
    }
}

#[test]
fn quality_scale_invariant() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..20 {
        let mut t = triangle_upper(6, 12, &mut rng);
        let quality = quality_triangular(&t);
        assert!(quality > 0_f64);

        let mut scaled = t.clone();
        scaled.scale(2_f64);
        assert!((quality_triangular(&scaled) - quality).abs() < TEST_F64);

        let degraded = t.get_value(3, 3) * 1e-8;
        t.set_value(3, 3, degraded);
        assert!(quality_triangular(&t) < quality * 1e-8_f64.sqrt());
    }
}

#[test]
fn safe_solver_matches_kernels() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut solver = SafeLinearSolver::new(TriangularLinearSolver::new(false));
    for _ in 0..10 {
        let mut a = triangle_upper(8, 20, &mut rng);
        let original = a.clone();
        solver.set_a(&mut a).unwrap();
        assert_eq!(a, original);

        let mut b = dense(8, 3, &mut rng);
        let mut x = DenseMatrix::default();
        solver.solve_dense(&mut b, &mut x).unwrap();
        let mut product = DenseMatrix::default();
        dense_mult::mult(&a, &x, &mut product).unwrap();
        assert!(product.approx_eq(&b, TEST_F64));

        let mut b = rectangle(8, 2, 5, -1_f64, 1_f64, &mut rng);
        let mut x = CscMatrix::default();
        solver.solve_sparse(&mut b, &mut x).unwrap();
        assert!(x.approx_eq(&solve_sparse(&a, false, &b, None), TEST_F64));
        assert_eq!(solver.quality(), quality_triangular(&a));
    }
}

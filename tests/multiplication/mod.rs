//! # Multiplication
//!
//! Sparse kernels compared with a plain dense product of the same values.
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use csc_solve::algorithm::multiplication::{dense as dense_mult, mult, mult_trans_a, mult_trans_b};
use csc_solve::algorithm::multiplication::inner_product::{dot_inner_columns, inner_product, inner_product_sparse};
#[cfg(feature = "rayon")]
use csc_solve::algorithm::multiplication::parallel::{mult_add_dense_parallel, mult_dense_parallel, mult_parallel};
use csc_solve::data::linear_algebra::matrix::{CscMatrix, DenseMatrix, Matrix};
use csc_solve::data::linear_algebra::vector::SparseVector;
use csc_solve::data::linear_algebra::work::GrowArray;
use csc_solve::data::linear_algebra::TEST_F64;
use csc_solve::error::MatrixError;

use crate::random::{dense, rectangle, SEED};

fn reference(a: &DenseMatrix<f64>, b: &DenseMatrix<f64>) -> DenseMatrix<f64> {
    let mut c = DenseMatrix::zeros(a.nr_rows(), b.nr_columns()).unwrap();
    for i in 0..a.nr_rows() {
        for j in 0..b.nr_columns() {
            let value = (0..a.nr_columns()).map(|k| a.get_value(i, k) * b.get_value(k, j)).sum();
            c.set_value(i, j, value);
        }
    }
    c
}

fn transpose(a: &DenseMatrix<f64>) -> DenseMatrix<f64> {
    let mut t = DenseMatrix::zeros(a.nr_columns(), a.nr_rows()).unwrap();
    for i in 0..a.nr_rows() {
        for j in 0..a.nr_columns() {
            t.set_value(j, i, a.get_value(i, j));
        }
    }
    t
}

fn random_shape(rng: &mut StdRng) -> (usize, usize, usize) {
    (rng.gen_range(1..=12), rng.gen_range(1..=12), rng.gen_range(1..=12))
}

#[test]
fn sparse_sparse() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..100 {
        let (m, k, n) = random_shape(&mut rng);
        let a = rectangle(m, k, rng.gen_range(0..=m * k), -1_f64, 1_f64, &mut rng);
        let b = rectangle(k, n, rng.gen_range(0..=k * n), -1_f64, 1_f64, &mut rng);
        let expected = reference(&a.to_dense(), &b.to_dense());

        let c = mult(&a, &b).unwrap();
        assert!(c.check_structure().is_ok());
        assert!(c.approx_eq(&expected, TEST_F64));

        let c = mult_trans_a(&a.transpose(), &b).unwrap();
        assert!(c.approx_eq(&expected, TEST_F64));
        let c = mult_trans_b(&a, &b.transpose()).unwrap();
        assert!(c.approx_eq(&expected, TEST_F64));
    }
}

type Kernel = fn(&CscMatrix<f64>, &DenseMatrix<f64>, &mut DenseMatrix<f64>) -> Result<(), MatrixError>;

/// Sparse times dense, in all combinations of transposes, with and without accumulation.
#[test]
fn sparse_dense() {
    // (kernel, transpose A, transpose B, accumulate)
    let kernels = [
        (dense_mult::mult as Kernel, false, false, false),
        (dense_mult::mult_add as Kernel, false, false, true),
        (dense_mult::mult_trans_a as Kernel, true, false, false),
        (dense_mult::mult_add_trans_a as Kernel, true, false, true),
        (dense_mult::mult_trans_b as Kernel, false, true, false),
        (dense_mult::mult_add_trans_b as Kernel, false, true, true),
        (dense_mult::mult_trans_ab as Kernel, true, true, false),
        (dense_mult::mult_add_trans_ab as Kernel, true, true, true),
    ];

    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..30 {
        let (m, k, n) = random_shape(&mut rng);
        let a = rectangle(m, k, rng.gen_range(0..=m * k), -1_f64, 1_f64, &mut rng);
        let b = dense(k, n, &mut rng);
        let initial = dense(m, n, &mut rng);
        let product = reference(&a.to_dense(), &b);

        for &(kernel, trans_a, trans_b, accumulate) in &kernels {
            let a_in = if trans_a { a.transpose() } else { a.clone() };
            let b_in = if trans_b { transpose(&b) } else { b.clone() };
            let mut c = initial.clone();
            kernel(&a_in, &b_in, &mut c).unwrap();

            let mut expected = product.clone();
            if accumulate {
                for (value, &extra) in expected.data_mut().iter_mut().zip(initial.data()) {
                    *value += extra;
                }
            }
            assert!(c.approx_eq(&expected, TEST_F64));
        }
    }
}

#[test]
fn inner_products() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut work = GrowArray::new();
    let mut values = GrowArray::new();
    for _ in 0..50 {
        let (m, k, n) = random_shape(&mut rng);
        let a = rectangle(m, k, rng.gen_range(0..=m * k), -1_f64, 1_f64, &mut rng);
        let b = rectangle(m, n, rng.gen_range(0..=m * n), -1_f64, 1_f64, &mut rng);
        let expected = reference(&transpose(&a.to_dense()), &b.to_dense());
        for i in 0..k {
            for j in 0..n {
                let found = dot_inner_columns(&a, i, &b, j, &mut work, &mut values).unwrap();
                assert!((found - expected.get_value(i, j)).abs() < TEST_F64);
            }
        }

        let x = dense(m, 1, &mut rng);
        let y = dense(k, 1, &mut rng);
        let ay = reference(&a.to_dense(), &y);
        let expected = (0..m).map(|i| x.get_value(i, 0) * ay.get_value(i, 0)).sum::<f64>();
        assert!((inner_product(x.data(), &a, y.data()).unwrap() - expected).abs() < TEST_F64);

        let sparse_x = x.data().iter().enumerate()
            .map(|(i, &value)| if i % 2 == 0 { value } else { 0_f64 })
            .collect::<SparseVector<_>>();
        let sparse_y = y.data().iter().copied().collect::<SparseVector<_>>();
        let expected = (0..m).map(|i| sparse_x.get(i) * ay.get_value(i, 0)).sum::<f64>();
        assert!((inner_product_sparse(&sparse_x, &a, &sparse_y).unwrap() - expected).abs() < TEST_F64);

        let c = rectangle(m, 1, rng.gen_range(0..=m), -1_f64, 1_f64, &mut rng);
        let column_x = SparseVector::from_column(&c, 0);
        let expected = inner_product(c.to_dense().data(), &a, y.data()).unwrap();
        assert!((inner_product_sparse(&column_x, &a, &sparse_y).unwrap() - expected).abs() < TEST_F64);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..20 {
        let m = rng.gen_range(1..=40);
        let k = rng.gen_range(1..=40);
        let n = rng.gen_range(1..=200);
        let a = rectangle(m, k, m * k / 4, -1_f64, 1_f64, &mut rng);
        let b = rectangle(k, n, k * n / 4, -1_f64, 1_f64, &mut rng);

        let mut sequential = mult(&a, &b).unwrap();
        let mut parallel = mult_parallel(&a, &b).unwrap();
        assert!(parallel.check_structure().is_ok());
        sequential.sort_indices();
        parallel.sort_indices();
        assert_eq!(parallel.column_pointers(), sequential.column_pointers());
        assert_eq!(parallel.row_indices(), sequential.row_indices());
        assert_eq!(parallel.values(), sequential.values());

        let b = dense(k, n, &mut rng);
        let mut expected = DenseMatrix::default();
        dense_mult::mult(&a, &b, &mut expected).unwrap();
        let mut found = DenseMatrix::default();
        mult_dense_parallel(&a, &b, &mut found).unwrap();
        assert!(found.approx_eq(&expected, TEST_F64));

        dense_mult::mult_add(&a, &b, &mut expected).unwrap();
        mult_add_dense_parallel(&a, &b, &mut found).unwrap();
        assert!(found.approx_eq(&expected, TEST_F64));
    }
}

use matrixx::{MatrixXd, Order, SvdMode, VectorXd};
use proptest::prelude::*;

fn matrix_of(elem: BoxedStrategy<f64>) -> impl Strategy<Value = MatrixXd> {
    (1usize..7, 1usize..7).prop_flat_map(move |(r, c)| {
        prop::collection::vec(elem.clone(), r * c)
            .prop_map(move |data| MatrixXd::from_slice_ordered(&data, r, c, Order::RowMajor).unwrap())
    })
}

fn matrix() -> impl Strategy<Value = MatrixXd> {
    matrix_of((-100.0f64..100.0).boxed())
}

fn reconstruct(m: &MatrixXd, mode: SvdMode) -> MatrixXd {
    let svd = m.svd(mode).unwrap();
    let u = svd.u().unwrap();
    let v = svd.v().unwrap();
    MatrixXd::from_fn(m.nrows(), m.ncols(), |i, j| {
        svd.singular_values()
            .iter()
            .enumerate()
            .map(|(k, &s)| u[(i, k)] * s * v[(j, k)])
            .sum()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn export_import_is_exact(m in matrix()) {
        for order in [Order::RowMajor, Order::ColMajor] {
            let flat = m.to_vec_ordered(order);
            let back = MatrixXd::from_slice_ordered(&flat, m.nrows(), m.ncols(), order).unwrap();
            prop_assert_eq!(&back, &m);
        }
    }

    #[test]
    fn column_major_export_is_transposed_row_major(m in matrix()) {
        prop_assert_eq!(m.to_vec_ordered(Order::ColMajor), m.transpose().to_vec());
    }

    #[test]
    fn set_row_then_row(m in matrix(), seed in -50.0f64..50.0) {
        let mut m = m;
        let i = m.nrows() - 1;
        let v: VectorXd = (0..m.ncols()).map(|j| seed + j as f64).collect();
        m.set_row(i, &v).unwrap();
        prop_assert_eq!(m.row(i).unwrap(), v);
    }

    #[test]
    fn svd_reconstructs(m in matrix()) {
        let scale = 1.0 + m.max_abs();
        for mode in [
            SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V,
            SvdMode::COMPUTE_FULL_U | SvdMode::COMPUTE_FULL_V,
        ] {
            let r = reconstruct(&m, mode);
            let err = (&r - &m).max_abs();
            prop_assert!(err <= 1e-10 * scale, "{:?}: reconstruction error {}", mode, err);
        }
    }

    #[test]
    fn singular_values_sorted_and_energy_preserving(m in matrix()) {
        let sv = m.singular_values_only().unwrap();
        prop_assert_eq!(sv.len(), m.nrows().min(m.ncols()));
        for w in sv.windows(2) {
            prop_assert!(w[0] >= w[1]);
        }
        prop_assert!(sv.iter().all(|&s| s >= 0.0));

        let energy: f64 = sv.iter().map(|s| s * s).sum();
        let fro = m.frobenius_norm();
        prop_assert!((energy - fro * fro).abs() <= 1e-10 * (1.0 + fro * fro));
    }

    #[test]
    fn solve_well_conditioned(n in 1usize..7, data in prop::collection::vec(-100.0f64..100.0, 36), rhs in prop::collection::vec(-10.0f64..10.0, 6)) {
        // Strict diagonal dominance keeps the condition number small
        let mut a = MatrixXd::from_fn(n, n, |i, j| data[i * 6 + j]);
        for i in 0..n {
            a[(i, i)] += 1000.0;
        }
        let b = VectorXd::from_slice(&rhs[..n]);
        let x = a.svd(SvdMode::default()).unwrap().solve(&b).unwrap();
        let ax = a.dot_v(&x).unwrap();
        prop_assert!(ax.approx_eq(&b, 1e-9), "A·x = {} vs b = {}", ax, b);
    }
}

#[cfg(feature = "serde")]
mod binary_round_trip {
    use super::*;

    // Finite values only, weighted towards the ends of the range
    fn extreme() -> BoxedStrategy<f64> {
        prop_oneof![
            -100.0f64..100.0,
            prop::num::f64::NORMAL
                | prop::num::f64::SUBNORMAL
                | prop::num::f64::ZERO
                | prop::num::f64::POSITIVE
                | prop::num::f64::NEGATIVE,
            Just(1e300),
            Just(-1e300),
            Just(f64::MIN_POSITIVE / 4.0),
            Just(-0.0),
        ]
        .boxed()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn matrix_bytes_bit_exact(m in matrix_of(extreme())) {
            let back = MatrixXd::from_bytes(&m.to_bytes().unwrap()).unwrap();
            prop_assert_eq!((back.nrows(), back.ncols()), (m.nrows(), m.ncols()));
            let bits = |x: &MatrixXd| x.to_vec().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
            prop_assert_eq!(bits(&back), bits(&m));
        }

        #[test]
        fn vector_bytes_bit_exact(data in prop::collection::vec(extreme(), 0..12)) {
            let v = VectorXd::from_slice(&data);
            let back = VectorXd::from_bytes(&v.to_bytes().unwrap()).unwrap();
            prop_assert_eq!(back.len(), v.len());
            for (a, b) in back.iter().zip(v.iter()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}

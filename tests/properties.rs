//! Property-based checks of the algebraic invariants the containers and the
//! expression engine promise for arbitrary inputs.

use proptest::prelude::*;

use numcore::expr::{dot, sin};
use numcore::{BandedMatrix, DenseMatrix, Dual, Scalar, Vector, VectorExpression};

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * (1.0 + a.abs().max(b.abs()))
}

fn arb_vec(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3_f64, len)
}

fn arb_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..40).prop_flat_map(|n| (arb_vec(n), arb_vec(n)))
}

fn arb_triple() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..40).prop_flat_map(|n| (arb_vec(n), arb_vec(n), arb_vec(n)))
}

// ── Dot product and scaling ──────────────────────────────────────────

proptest! {
    #[test]
    fn dot_is_symmetric_for_reals((a, b) in arb_pair()) {
        let (a, b) = (Vector::from_vec(a), Vector::from_vec(b));
        prop_assert_eq!(a.dot(&b).unwrap(), b.dot(&a).unwrap());
    }

    #[test]
    fn dot_is_linear_in_its_first_argument((a, b, c) in arb_triple(), s in -10.0..10.0_f64) {
        let (a, b, c) = (Vector::from_vec(a), Vector::from_vec(b), Vector::from_vec(c));
        let lhs = dot(&a * s + &b, &c).unwrap();
        let rhs = s * a.dot(&c).unwrap() + b.dot(&c).unwrap();
        let scale = (s.abs() * a.norm_l2() + b.norm_l2()) * c.norm_l2();
        prop_assert!((lhs - rhs).abs() <= 1e-12 * (1.0 + scale));
    }

    #[test]
    fn scaling_scales_every_norm(v in (1usize..40).prop_flat_map(arb_vec), s in -50.0..50.0_f64) {
        let v = Vector::from_vec(v);
        let scaled = &v * s;
        prop_assert!(close(scaled.norm_l1().unwrap(), s.abs() * v.norm_l1(), 1e-13));
        prop_assert!(close(scaled.norm_l2().unwrap(), s.abs() * v.norm_l2(), 1e-13));
        prop_assert!(close(scaled.norm_linf().unwrap(), s.abs() * v.norm_linf(), 1e-13));
    }

    #[test]
    fn scaled_sum_dotted_with_scaled_vector(
        (a, b, c) in arb_triple(),
        k1 in -10.0..10.0_f64,
        k2 in 0.5..20.0_f64,
    ) {
        let (a, b, c) = (Vector::from_vec(a), Vector::from_vec(b), Vector::from_vec(c));
        let lhs = dot(&a + &b * k1, &c / k2).unwrap();
        let rhs = (a.dot(&c).unwrap() + k1 * b.dot(&c).unwrap()) / k2;
        let scale = (a.norm_l2() + k1.abs() * b.norm_l2()) * c.norm_l2() / k2;
        prop_assert!((lhs - rhs).abs() <= 1e-12 * (1.0 + scale));
    }

    #[test]
    fn divide_then_multiply_restores(
        v in (1usize..40).prop_flat_map(arb_vec),
        s in 0.5..100.0_f64,
    ) {
        let v = Vector::from_vec(v);
        let back = (&v / s * s).evaluate().unwrap();
        for (x, y) in back.iter().zip(v.iter()) {
            prop_assert!(close(*x, *y, 4.0 * f64::EPSILON));
        }
    }
}

// ── Matrix norms ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn squared_column_norm_is_sum_of_squares(
        (rows, cols, data) in (1usize..8, 1usize..8)
            .prop_flat_map(|(r, c)| (Just(r), Just(c), arb_vec(r * c)))
    ) {
        let m = DenseMatrix::from_underlying(rows, cols, Vector::from_vec(data)).unwrap();
        for j in 0..cols {
            let sum: f64 = (0..rows).map(|i| m[(i, j)] * m[(i, j)]).sum();
            let n = m.column_norm_l2(j).unwrap();
            prop_assert!(close(n * n, sum, 1e-12));
        }
    }
}

// ── Band structure ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn reads_outside_the_band_are_zero(
        n in 1usize..12,
        k in 0usize..4,
        fill in -5.0..5.0_f64,
    ) {
        let mut band = BandedMatrix::<f64>::new(n, k);
        for j in 0..n {
            for i in 0..n {
                band.set(i, j, fill);
            }
        }
        for j in 0..n {
            for i in 0..n {
                let expected = if band.in_band(i, j) { fill } else { 0.0 };
                prop_assert_eq!(band.at(i, j).unwrap(), expected);
            }
        }
    }

    #[test]
    fn nonzero_writes_outside_the_band_are_refused(
        n in 3usize..12,
        k in 0usize..2,
        value in prop::num::f64::NORMAL,
    ) {
        let mut band = BandedMatrix::<f64>::new(n, k);
        let (i, j) = (0, n - 1);
        prop_assume!(!band.in_band(i, j));
        prop_assert!(!band.set(i, j, value));
        prop_assert!(band.set(i, j, 0.0));
        prop_assert!(band.as_slice().iter().all(|x| *x == 0.0));
    }
}

// ── Dual numbers ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dual_derivative_matches_closed_form(x in -3.0..3.0_f64) {
        // f(x) = x³·sin(x), f'(x) = 3x²·sin(x) + x³·cos(x)
        let d = Dual::<1, f64>::variable(x, 0);
        let f = d * d * d * d.sin();
        let expected = 3.0 * x * x * x.sin() + x * x * x * x.cos();
        prop_assert!(close(f.value, x.powi(3) * x.sin(), 1e-14));
        prop_assert!(close(f.dual[0], expected, 1e-13));
    }

    #[test]
    fn dual_derivative_through_expressions(v in (1usize..20).prop_flat_map(arb_vec)) {
        let duals = Vector::from_fn(v.len(), |i| Dual::<1, f64>::variable(v[i] / 1.0e3, 0));
        let y = sin(&duals * Dual::<1, f64>::constant(2.0)).evaluate().unwrap();
        for (yi, x) in y.iter().zip(&v) {
            let x = x / 1.0e3;
            prop_assert!(close(yi.value, (2.0 * x).sin(), 1e-15));
            prop_assert!(close(yi.dual[0], 2.0 * (2.0 * x).cos(), 1e-15));
        }
    }
}

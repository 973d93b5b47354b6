use numcore::expr::{cos, pow, sin};
use numcore::{DenseMatrix, Dual, Error, Scalar, Vector, VectorExpression};

const EPS: f64 = f64::EPSILON;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() <= tol * (1.0 + b.abs()),
        "{}: {} vs {}",
        msg,
        a,
        b
    );
}

// ── Dual numbers ─────────────────────────────────────────────────────

#[test]
fn dual_chain_rule() {
    // f(x) = sin(x² + 1) at x = 0.5
    let x = Dual::<1, f64>::variable(0.5, 0);
    let f = (x * x + Dual::constant(1.0)).sin();
    assert_eq!(f.value, 1.25_f64.sin());
    assert_near(f.dual[0], 1.25_f64.cos(), EPS, "df/dx");
}

#[test]
fn dual_chain_rule_through_expressions() {
    let v = Vector::from([
        Dual::<1, f64>::variable(0.5, 0),
        Dual::<1, f64>::variable(-1.5, 0),
    ]);
    let one = Dual::<1, f64>::constant(1.0);
    let y = sin(pow(&v, 2.0) + one).evaluate().unwrap();
    for (i, x) in [0.5_f64, -1.5].into_iter().enumerate() {
        let u = x * x + 1.0;
        assert_near(y[i].value, u.sin(), EPS, "value");
        assert_near(y[i].dual[0], 2.0 * x * u.cos(), 4.0 * EPS, "derivative");
    }
}

#[test]
fn dual_gradient_of_two_variables() {
    // f(x, y) = x·y + exp(x)
    let [x, y] = Dual::<2, f64>::seed([1.0, 3.0]);
    let f = x * y + x.exp();
    assert_near(f.value, 3.0 + 1.0_f64.exp(), EPS, "value");
    assert_near(f.partial(0), 3.0 + 1.0_f64.exp(), EPS, "df/dx");
    assert_near(f.partial(1), 1.0, EPS, "df/dy");
}

// ── Dense products and norms ─────────────────────────────────────────

#[test]
fn dense_product_5x7_by_7x2() {
    let a = DenseMatrix::from_fn(5, 7, |i, j| 0.5 * i as f64 - 0.25 * j as f64 + 1.0);
    let b = DenseMatrix::from_fn(7, 2, |j, k| (j as f64).cos() + k as f64);
    let ab = (&a * &b).unwrap();
    assert_eq!(ab.shape(), (5, 2));
    for i in 0..5 {
        for k in 0..2 {
            let expected: f64 = (0..7).map(|j| a[(i, j)] * b[(j, k)]).sum();
            assert_near(ab[(i, k)], expected, 1e-6, &format!("AB[{}, {}]", i, k));
        }
    }
}

#[test]
fn column_l2_norm_closed_form() {
    let (r, c) = (5, 7);
    let m = DenseMatrix::from_fn(r, c, |row, col| ((col + 1) * (row + 1)) as f64);
    let rf = r as f64;
    for j in 0..c {
        let expected = (j + 1) as f64 * (rf * (rf + 1.0) * (2.0 * rf + 1.0) / 6.0).sqrt();
        assert_near(m.column_norm_l2(j).unwrap(), expected, c as f64 * EPS, "column norm");
    }
}

// ── Errors ───────────────────────────────────────────────────────────

#[test]
fn out_of_range_carries_index_and_size() {
    let v = Vector::new(10, 0.0_f64);
    assert_eq!(v.at(10), Err(Error::OutOfRange1D { index: 10, size: 10 }));
    let err = v.at(10).unwrap_err();
    assert_eq!(err.kind(), "OutOfRange1D");
    assert_eq!(
        err.fields(),
        vec![("index", "10".to_string()), ("size", "10".to_string())]
    );
}

#[test]
#[should_panic(expected = "index 10 out of range for length 10")]
fn out_of_range_index_panics() {
    let v = Vector::new(10, 0.0_f64);
    let _ = v[10];
}

// ── Expression reuse ─────────────────────────────────────────────────

#[test]
fn expression_reuse_vanishes() {
    let n = 64;
    let a = Vector::from_fn(n, |i| (i as f64 * 0.37).sin());
    let b = Vector::from_fn(n, |i| (i as f64 * 1.3).cos() * 4.0);
    let c = Vector::from_fn(n, |i| 1.0 + i as f64 / 8.0);
    let e = (&a + &b) * &c - &a * &c - &b * &c;
    let mut out = Vector::empty();
    out.assign(e).unwrap();
    assert_eq!(out.len(), n);
    let scale = (&a + &b).norm_linf().unwrap() * c.norm_linf();
    assert!(out.norm_linf() <= n as f64 * EPS * scale);
}

#[test]
fn pythagorean_identity() {
    let a = Vector::from_fn(32, |i| i as f64 - 16.0);
    let one = (sin(&a) * sin(&a) + cos(&a) * cos(&a)).evaluate().unwrap();
    for x in one.iter() {
        assert_near(*x, 1.0, 2.0 * EPS, "sin² + cos²");
    }
}

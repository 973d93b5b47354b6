use numcore::{
    BandedLinearSystem, BandedMatrix, Complex64, DenseLinearSystem, DenseMatrix, Eigendatum,
    Error, GeneralisedEigenvalueSystem, Vector,
};
#[cfg(feature = "lapack")]
use numcore::VectorExpression;

type C = Complex64;

#[cfg(feature = "lapack")]
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 10×10 with half-bandwidth 3, strictly diagonally dominant.
#[cfg(feature = "lapack")]
fn banded_system() -> BandedMatrix<f64> {
    let (n, k) = (10, 3);
    let mut a = BandedMatrix::new(n, k);
    for j in 0..n {
        for i in j.saturating_sub(k)..(j + k + 1).min(n) {
            let value = if i == j {
                10.0 + i as f64
            } else {
                1.0 / (1.0 + i.abs_diff(j) as f64) * if i < j { 1.0 } else { -0.5 }
            };
            assert!(a.set(i, j, value));
        }
    }
    a
}

#[cfg(feature = "lapack")]
fn complex_pencil(n: usize) -> (DenseMatrix<C>, DenseMatrix<C>) {
    let a = DenseMatrix::from_fn(n, n, |i, j| {
        let t = (3 * i + 7 * j + 1) as f64;
        C::new(t.sin(), (0.5 * t).cos())
    });
    let b = DenseMatrix::from_fn(n, n, |i, j| {
        let off = 0.1 * ((i * n + j) as f64).cos();
        C::new(if i == j { 2.0 } else { off }, off * 0.5)
    });
    (a, b)
}

// ── Shape checks (backend independent) ───────────────────────────────

#[test]
fn dense_rejects_non_square() {
    let mut a = DenseMatrix::<f64>::new(3, 2);
    let mut b = Vector::zeros(3);
    assert!(matches!(
        DenseLinearSystem::new(&mut a, &mut b),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn operands_are_reachable_through_the_adapter() {
    let mut a = DenseMatrix::<f64>::identity(2);
    let mut b = Vector::from([1.0, 2.0]);
    let mut system = DenseLinearSystem::new(&mut a, &mut b).unwrap();
    system.matrix_mut()[(1, 1)] = 4.0;
    system.rhs_mut()[1] = 8.0;
    drop(system);
    assert_eq!(a[(1, 1)], 4.0);
    assert_eq!(b[1], 8.0);
}

#[test]
fn resized_rhs_is_caught_at_solve() {
    let mut a = BandedMatrix::<f64>::identity(4, 1);
    let mut b = Vector::zeros(4);
    let mut system = BandedLinearSystem::new(&mut a, &mut b).unwrap();
    system.rhs_mut().resize(6, 0.0);
    assert!(matches!(system.solve(), Err(Error::Mismatch2D { op: "solve", .. })));
}

// ── Without a backend ────────────────────────────────────────────────

#[cfg(not(feature = "lapack"))]
#[test]
fn every_solver_reports_unsupported() {
    let mut a = DenseMatrix::<C>::identity(2);
    let mut b = Vector::from([C::new(1.0, 0.0), C::new(0.0, 1.0)]);
    assert_eq!(
        DenseLinearSystem::new(&mut a, &mut b).unwrap().solve(),
        Err(Error::Unsupported { operation: "zgesv" })
    );

    let mut band = BandedMatrix::<C>::identity(2, 1);
    assert_eq!(
        BandedLinearSystem::new(&mut band, &mut b).unwrap().solve(),
        Err(Error::Unsupported { operation: "zgbsv" })
    );

    let mut a = DenseMatrix::<C>::identity(2);
    let mut m = DenseMatrix::<C>::identity(2);
    let mut out: Vec<Eigendatum<C>> = Vec::new();
    assert_eq!(
        GeneralisedEigenvalueSystem::new(&mut a, &mut m, &mut out)
            .unwrap()
            .solve(),
        Err(Error::Unsupported { operation: "zggev" })
    );
}

// ── Linear systems ───────────────────────────────────────────────────

#[cfg(feature = "lapack")]
#[test]
fn banded_solve_residual() {
    init_logging();
    let mut a = banded_system();
    let original = a.clone();
    let rhs = Vector::from_fn(10, |i| (i + 1) as f64);
    let mut x = rhs.clone();
    BandedLinearSystem::new(&mut a, &mut x).unwrap().solve().unwrap();

    let back = original.matvec(&x).unwrap();
    let residual = (&back - &rhs).evaluate().unwrap();
    assert!(residual.norm_linf() < 1e-12 * rhs.norm_linf());

    // same answer through the dense path
    let mut dense = original.to_dense();
    let mut y = rhs.clone();
    DenseLinearSystem::new(&mut dense, &mut y).unwrap().solve().unwrap();
    for i in 0..10 {
        assert!((x[i] - y[i]).abs() < 1e-12);
    }
}

#[cfg(feature = "lapack")]
#[test]
fn complex_dense_solve() {
    init_logging();
    let (mut a, _) = complex_pencil(5);
    for i in 0..5 {
        a[(i, i)] += C::new(6.0, 0.0);
    }
    let original = a.clone();
    let rhs = Vector::from_fn(5, |i| C::new(1.0, i as f64));
    let mut x = rhs.clone();
    DenseLinearSystem::new(&mut a, &mut x).unwrap().solve().unwrap();

    let back = (&original * &x).unwrap();
    for i in 0..5 {
        assert!((back[i] - rhs[i]).norm() < 1e-12);
    }
}

#[cfg(feature = "lapack")]
#[test]
fn singular_matrix_is_a_backend_error() {
    init_logging();
    let mut a = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]).unwrap();
    let mut b = Vector::from([1.0, 1.0]);
    assert_eq!(
        DenseLinearSystem::new(&mut a, &mut b).unwrap().solve(),
        Err(Error::Backend {
            routine: "dgesv",
            code: 2
        })
    );
}

// ── Generalised eigenproblem ─────────────────────────────────────────

#[cfg(feature = "lapack")]
#[test]
fn eigenpairs_satisfy_the_pencil() {
    init_logging();
    let n = 6;
    let (a, b) = complex_pencil(n);
    let (mut qa, mut qb) = (a.clone(), b.clone());
    let mut out = Vec::new();
    GeneralisedEigenvalueSystem::new(&mut qa, &mut qb, &mut out)
        .unwrap()
        .solve()
        .unwrap();
    assert_eq!(out.len(), n);

    for datum in &out {
        assert!((datum.vector.norm_l2() - 1.0).abs() < 1e-12);
        let av = (&a * &datum.vector).unwrap();
        let bv = (&b * &datum.vector).unwrap();
        let residual = (&av - &bv * datum.value).norm_l2().unwrap();
        assert!(
            residual < 1e-10 * (1.0 + datum.value.norm()),
            "residual {} for eigenvalue {}",
            residual,
            datum.value
        );
    }
}

#[cfg(feature = "lapack")]
#[test]
fn infinite_eigenvalues_are_discarded() {
    init_logging();
    let n = 4;
    let (full, _) = complex_pencil(n);
    let mut a = DenseMatrix::from_fn(n, n, |i, j| {
        if i < j {
            full[(i, j)]
        } else if i == j {
            C::new(1.0 + i as f64, 0.5)
        } else {
            C::new(0.0, 0.0)
        }
    });
    // rank-2 B leaves two eigenvalues at infinity
    let mut b = DenseMatrix::<C>::new(n, n);
    b[(0, 0)] = C::new(1.0, 0.0);
    b[(1, 1)] = C::new(1.0, 0.0);
    let mut out = vec![Eigendatum {
        value: C::new(99.0, 0.0),
        vector: Vector::zeros(1),
    }];
    GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out)
        .unwrap()
        .solve()
        .unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|d| d.vector.len() == n));
    for expected in [C::new(1.0, 0.5), C::new(2.0, 0.5)] {
        assert!(out.iter().any(|d| (d.value - expected).norm() < 1e-10));
    }
}

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;
use crate::vector::Vector;

use super::backend::EigenScalar;

/// One eigenvalue with its unit-norm right eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigendatum<T> {
    pub value: T,
    pub vector: Vector<T>,
}

/// `A·v = λ·B·v` for square `A` and `B` of the same order, solved by QZ.
///
/// Only finite eigenvalues are reported; `α/β` pairs with `β = 0` (infinite
/// eigenvalues) or non-finite ratios are dropped. Both matrices are
/// overwritten by [`solve`](GeneralisedEigenvalueSystem::solve).
///
/// ```
/// use numcore::{Complex64, DenseMatrix, Eigendatum, GeneralisedEigenvalueSystem};
///
/// let c = |re: f64| Complex64::new(re, 0.0);
/// let mut a = DenseMatrix::from_rows(2, 2, &[c(2.0), c(0.0), c(0.0), c(3.0)]).unwrap();
/// let mut b = DenseMatrix::identity(2);
/// let mut out: Vec<Eigendatum<Complex64>> = Vec::new();
/// let system = GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out).unwrap();
/// # #[cfg(feature = "lapack")]
/// # {
/// system.solve().unwrap();
/// assert_eq!(out.len(), 2);
/// # }
/// ```
#[derive(Debug)]
pub struct GeneralisedEigenvalueSystem<'a, T> {
    a: &'a mut DenseMatrix<T>,
    b: &'a mut DenseMatrix<T>,
    out: &'a mut Vec<Eigendatum<T>>,
}

impl<'a, T: EigenScalar> GeneralisedEigenvalueSystem<'a, T> {
    /// Bind `A`, `B` and the output list. Fails with
    /// [`Error::InvalidArgument`] if `A` is not square and
    /// [`Error::Mismatch2D`] if `B` has a different shape.
    pub fn new(
        a: &'a mut DenseMatrix<T>,
        b: &'a mut DenseMatrix<T>,
        out: &'a mut Vec<Eigendatum<T>>,
    ) -> Result<Self> {
        check_pencil(a, b)?;
        Ok(Self { a, b, out })
    }

    pub fn matrices_mut(&mut self) -> (&mut DenseMatrix<T>, &mut DenseMatrix<T>) {
        (&mut *self.a, &mut *self.b)
    }

    /// Clear the output list, then push one datum per finite eigenvalue in
    /// the order the backend returns them.
    pub fn solve(self) -> Result<()> {
        check_pencil(self.a, self.b)?;
        let n = self.a.rows();
        debug!("generalised eigenproblem: n = {}", n);
        self.out.clear();

        let qz = T::ggev(n, self.a.as_mut_slice(), self.b.as_mut_slice())?;
        for (j, (&alpha, &beta)) in qz.alpha.iter().zip(&qz.beta).enumerate() {
            let value = alpha / beta;
            if !value.is_finite() {
                trace!("dropping eigenvalue {}: alpha = {}, beta = {}", j, alpha, beta);
                continue;
            }
            let mut vector = Vector::from_slice(&qz.vectors[j * n..(j + 1) * n]);
            if vector.normalize().is_err() {
                trace!("dropping eigenvalue {}: zero eigenvector", j);
                continue;
            }
            self.out.push(Eigendatum { value, vector });
        }
        Ok(())
    }
}

fn check_pencil<T>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<()> {
    if !a.is_square() {
        return Err(Error::invalid(
            "matrix",
            format!("{}x{}", a.rows(), a.cols()),
            "a square matrix",
        ));
    }
    if a.shape() != b.shape() {
        return Err(Error::Mismatch2D {
            op: "eigen",
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex64;

    #[test]
    fn rejects_mismatched_pencil() {
        let mut a = DenseMatrix::<Complex64>::identity(3);
        let mut b = DenseMatrix::<Complex64>::identity(2);
        let mut out = Vec::new();
        assert!(matches!(
            GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out),
            Err(Error::Mismatch2D { op: "eigen", .. })
        ));
    }

    #[test]
    fn rejects_rectangular() {
        let mut a = DenseMatrix::<Complex64>::new(2, 3);
        let mut b = DenseMatrix::<Complex64>::new(2, 3);
        let mut out = Vec::new();
        assert!(matches!(
            GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[cfg(not(feature = "lapack"))]
    #[test]
    fn unsupported_without_backend() {
        let mut a = DenseMatrix::<Complex64>::identity(2);
        let mut b = DenseMatrix::<Complex64>::identity(2);
        let mut out = vec![Eigendatum {
            value: Complex64::new(1.0, 0.0),
            vector: Vector::zeros(2),
        }];
        let system = GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out).unwrap();
        assert_eq!(system.solve(), Err(Error::Unsupported { operation: "zggev" }));
        // the output list is cleared before the backend runs
        assert!(out.is_empty());
    }

    #[cfg(feature = "lapack")]
    #[test]
    fn diagonal_pencil() {
        let c = |re: f64| Complex64::new(re, 0.0);
        let mut a = DenseMatrix::from_rows(2, 2, &[c(6.0), c(0.0), c(0.0), c(3.0)]).unwrap();
        let mut b = DenseMatrix::from_rows(2, 2, &[c(2.0), c(0.0), c(0.0), c(1.0)]).unwrap();
        let mut out = Vec::new();
        GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out)
            .unwrap()
            .solve()
            .unwrap();
        assert_eq!(out.len(), 2);
        for datum in &out {
            assert!((datum.value - c(3.0)).norm() < 1e-12);
            assert!((datum.vector.norm_l2() - 1.0).abs() < 1e-12);
        }
    }

    #[cfg(feature = "lapack")]
    #[test]
    fn infinite_eigenvalue_dropped() {
        let c = |re: f64| Complex64::new(re, 0.0);
        let mut a = DenseMatrix::<Complex64>::identity(2);
        // singular B gives one infinite eigenvalue
        let mut b = DenseMatrix::from_rows(2, 2, &[c(1.0), c(0.0), c(0.0), c(0.0)]).unwrap();
        let mut out = Vec::new();
        GeneralisedEigenvalueSystem::new(&mut a, &mut b, &mut out)
            .unwrap()
            .solve()
            .unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].value - c(1.0)).norm() < 1e-12);
    }
}

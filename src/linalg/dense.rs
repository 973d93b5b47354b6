use log::debug;

use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;
use crate::vector::Vector;

use super::backend::LapackScalar;

/// `A·x = b` for a square dense `A`, solved by LU with partial pivoting.
///
/// The adapter borrows both operands until [`solve`](DenseLinearSystem::solve),
/// which consumes it: on success `b` holds `x` and `A` holds its LU factors.
///
/// ```
/// use numcore::{DenseLinearSystem, DenseMatrix, Vector};
///
/// let mut a = DenseMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]).unwrap();
/// let mut b = Vector::from([3.0, 5.0]);
/// let system = DenseLinearSystem::new(&mut a, &mut b).unwrap();
/// # #[cfg(feature = "lapack")]
/// # {
/// system.solve().unwrap();
/// assert!((b[0] - 0.8).abs() < 1e-12);
/// assert!((b[1] - 1.4).abs() < 1e-12);
/// # }
/// ```
#[derive(Debug)]
pub struct DenseLinearSystem<'a, T> {
    a: &'a mut DenseMatrix<T>,
    b: &'a mut Vector<T>,
}

impl<'a, T: LapackScalar> DenseLinearSystem<'a, T> {
    /// Bind `A` and `b`. Fails with [`Error::InvalidArgument`] if `A` is not
    /// square and [`Error::Mismatch2D`] if `b` has the wrong length.
    pub fn new(a: &'a mut DenseMatrix<T>, b: &'a mut Vector<T>) -> Result<Self> {
        check_dense(a, b)?;
        Ok(Self { a, b })
    }

    pub fn matrix_mut(&mut self) -> &mut DenseMatrix<T> {
        self.a
    }

    pub fn rhs_mut(&mut self) -> &mut Vector<T> {
        self.b
    }

    /// Solve in place, overwriting `b` with `x`.
    ///
    /// Shapes are checked again since the operands can be changed through
    /// the adapter. A singular `A` fails with [`Error::Backend`].
    pub fn solve(self) -> Result<()> {
        check_dense(self.a, self.b)?;
        let n = self.a.rows();
        debug!("dense solve: n = {}", n);
        T::gesv(n, self.a.as_mut_slice(), self.b.as_mut_slice(), 1)
    }
}

pub(super) fn check_dense<T>(a: &DenseMatrix<T>, b: &Vector<T>) -> Result<()> {
    if !a.is_square() {
        return Err(Error::invalid(
            "matrix",
            format!("{}x{}", a.rows(), a.cols()),
            "a square matrix",
        ));
    }
    if b.len() != a.rows() {
        return Err(Error::Mismatch2D {
            op: "solve",
            lhs: a.shape(),
            rhs: (b.len(), 1),
        });
    }
    Ok(())
}

use core::ops::Mul;

use crate::error::{Error, Result};
use crate::traits::Scalar;
use crate::vector::Vector;

use super::DenseMatrix;

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Matrix product `self · rhs` by the naive triple loop.
    ///
    /// Each entry sums `k` in increasing order, so results are reproducible
    /// across platforms. Fails with [`Error::Mismatch2D`] unless
    /// `self.cols() == rhs.rows()`.
    ///
    /// ```
    /// use numcore::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]).unwrap();
    /// let b = DenseMatrix::from_rows(2, 1, &[5.0_f64, 6.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[17.0, 39.0]);
    /// ```
    pub fn matmul(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.cols() != rhs.rows() {
            return Err(Error::Mismatch2D {
                op: "matmul",
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let (m, n, p) = (self.rows(), self.cols(), rhs.cols());
        let a = self.as_slice();
        let b = rhs.as_slice();
        let mut out = DenseMatrix::new(m, p);
        let c = out.as_mut_slice();
        for j in 0..p {
            for i in 0..m {
                let mut sum = T::zero();
                for k in 0..n {
                    sum += a[k * m + i] * b[j * n + k];
                }
                c[j * m + i] = sum;
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self · v`.
    ///
    /// Fails with [`Error::Mismatch2D`] unless `self.cols() == v.len()`.
    pub fn matvec(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if self.cols() != v.len() {
            return Err(Error::Mismatch2D {
                op: "matvec",
                lhs: self.shape(),
                rhs: (v.len(), 1),
            });
        }
        let m = self.rows();
        let a = self.as_slice();
        let mut out = Vector::zeros(m);
        // column sweep keeps the inner loop contiguous
        for (j, &x) in v.iter().enumerate() {
            let col = &a[j * m..(j + 1) * m];
            for (y, &aij) in out.iter_mut().zip(col) {
                *y += aij * x;
            }
        }
        Ok(out)
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b DenseMatrix<T>> for &'a DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn mul(self, rhs: &'b DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.matmul(rhs)
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b Vector<T>> for &'a DenseMatrix<T> {
    type Output = Result<Vector<T>>;

    fn mul(self, rhs: &'b Vector<T>) -> Result<Vector<T>> {
        self.matvec(rhs)
    }
}

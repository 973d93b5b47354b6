use crate::error::Result;
use crate::traits::Scalar;

use super::DenseMatrix;

// ── Column norms ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// `Σᵢ |A[i, j]|` over column `j`.
    pub fn column_norm_l1(&self, j: usize) -> Result<f64> {
        Ok(self.column(j)?.iter().map(|x| x.modulus()).sum())
    }

    /// `√Σᵢ |A[i, j]|²` over column `j`.
    ///
    /// ```
    /// use numcore::DenseMatrix;
    /// let m = DenseMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 4.0, 1.0]).unwrap();
    /// assert!((m.column_norm_l2(0).unwrap() - 5.0).abs() < 1e-12);
    /// assert!(m.column_norm_l2(2).is_err());
    /// ```
    pub fn column_norm_l2(&self, j: usize) -> Result<f64> {
        let sum: f64 = self
            .column(j)?
            .iter()
            .map(|x| {
                let m = x.modulus();
                m * m
            })
            .sum();
        Ok(sum.sqrt())
    }

    /// `maxᵢ |A[i, j]|` over column `j` (0 for an empty column).
    pub fn column_norm_linf(&self, j: usize) -> Result<f64> {
        Ok(self
            .column(j)?
            .iter()
            .map(|x| x.modulus())
            .fold(0.0, f64::max))
    }

    /// Frobenius norm of the whole matrix.
    pub fn norm_frobenius(&self) -> f64 {
        self.underlying().norm_l2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::Complex64;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + b.abs())
    }

    #[test]
    fn column_norms_closed_form() {
        let (r, c) = (5, 7);
        let m = DenseMatrix::from_fn(r, c, |i, j| ((i + 1) * (j + 1)) as f64);
        let rf = r as f64;
        let base = (rf * (rf + 1.0) * (2.0 * rf + 1.0) / 6.0).sqrt();
        for j in 0..c {
            let jf = (j + 1) as f64;
            assert!(close(m.column_norm_l2(j).unwrap(), jf * base, 1e-14));
            assert_eq!(m.column_norm_l1(j).unwrap(), jf * 15.0);
            assert_eq!(m.column_norm_linf(j).unwrap(), jf * 5.0);
        }
    }

    #[test]
    fn complex_column_norm() {
        let m = DenseMatrix::from_underlying(
            2,
            1,
            vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, 0.0)].into(),
        )
        .unwrap();
        assert!(close(m.column_norm_l2(0).unwrap(), 5.0, 1e-15));
        assert!(close(m.norm_frobenius(), 5.0, 1e-15));
    }

    #[test]
    fn bad_column() {
        let m = DenseMatrix::<f64>::new(2, 2);
        assert!(matches!(
            m.column_norm_l1(5),
            Err(Error::OutOfRange2D { col: 5, .. })
        ));
    }
}

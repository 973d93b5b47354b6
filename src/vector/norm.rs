use crate::error::{Error, Result};
use crate::traits::Scalar;

use super::Vector;

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// L1 norm, `Σ|xᵢ|`.
    ///
    /// ```
    /// use numcore::Vector;
    /// let v = Vector::from([1.0_f64, -2.0, 3.0]);
    /// assert_eq!(v.norm_l1(), 6.0);
    /// ```
    pub fn norm_l1(&self) -> f64 {
        self.iter().map(|x| x.modulus()).sum()
    }

    /// L2 norm, `√Σ|xᵢ|²`.
    ///
    /// ```
    /// use numcore::Vector;
    /// let v = Vector::from([3.0_f64, 4.0]);
    /// assert!((v.norm_l2() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm_l2(&self) -> f64 {
        self.iter()
            .map(|x| {
                let m = x.modulus();
                m * m
            })
            .sum::<f64>()
            .sqrt()
    }

    /// L∞ norm, `maxᵢ|xᵢ|` (0 for an empty vector).
    pub fn norm_linf(&self) -> f64 {
        self.iter().map(|x| x.modulus()).fold(0.0, f64::max)
    }

    /// Scale to unit L2 norm in place.
    ///
    /// Fails with [`Error::DivisionByZero`] for the zero vector.
    pub fn normalize(&mut self) -> Result<()> {
        let n = self.norm_l2();
        if n == 0.0 {
            return Err(Error::DivisionByZero);
        }
        let inv = T::from_real(1.0 / n);
        for x in self.iter_mut() {
            *x *= inv;
        }
        Ok(())
    }

    /// Inner product `Σ self[i]·rhs[i]`.
    ///
    /// Neither argument is conjugated, also for complex elements; this is a
    /// bilinear form rather than a Hermitian inner product.
    ///
    /// ```
    /// use numcore::{Complex64, Vector};
    ///
    /// let a = Vector::from([1.0_f64, 2.0, 3.0]);
    /// let b = Vector::from([4.0_f64, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap(), 32.0);
    ///
    /// let i = Vector::from([Complex64::new(0.0, 1.0)]);
    /// assert_eq!(i.dot(&i).unwrap(), Complex64::new(-1.0, 0.0));
    /// ```
    pub fn dot(&self, rhs: &Vector<T>) -> Result<T> {
        if self.len() != rhs.len() {
            return Err(Error::Mismatch1D {
                op: "dot",
                lhs: self.len(),
                rhs: rhs.len(),
            });
        }
        let mut sum = T::zero();
        for (&a, &b) in self.iter().zip(rhs.iter()) {
            sum += a * b;
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn real_norms() {
        let v = Vector::from([3.0_f64, -4.0, 0.0]);
        assert_eq!(v.norm_l1(), 7.0);
        assert!((v.norm_l2() - 5.0).abs() < 1e-15);
        assert_eq!(v.norm_linf(), 4.0);
    }

    #[test]
    fn complex_norms() {
        let v = Vector::from([Complex64::new(3.0, 4.0), Complex64::new(0.0, -1.0)]);
        assert!((v.norm_l1() - 6.0).abs() < 1e-15);
        assert!((v.norm_l2() - 26.0_f64.sqrt()).abs() < 1e-14);
        assert_eq!(v.norm_linf(), 5.0);
    }

    #[test]
    fn empty_norms() {
        let v: Vector<f64> = Vector::empty();
        assert_eq!(v.norm_l1(), 0.0);
        assert_eq!(v.norm_l2(), 0.0);
        assert_eq!(v.norm_linf(), 0.0);
    }

    #[test]
    fn normalize() {
        let mut v = Vector::from([0.0_f64, 3.0, 4.0]);
        v.normalize().unwrap();
        assert!((v.norm_l2() - 1.0).abs() < 1e-15);
        let mut z = Vector::<f64>::zeros(2);
        assert_eq!(z.normalize(), Err(Error::DivisionByZero));
    }

    #[test]
    fn dot_mismatch() {
        let a = Vector::from([1.0_f64, 2.0]);
        let b = Vector::from([1.0_f64]);
        assert_eq!(
            a.dot(&b),
            Err(Error::Mismatch1D {
                op: "dot",
                lhs: 2,
                rhs: 1
            })
        );
    }
}

use core::ops::MulAssign;

use crate::error::{Error, Result};
use crate::expr::{Band, MatrixExpression, VectorExpression};
use crate::matrix::DenseMatrix;
use crate::traits::Scalar;
use crate::vector::Vector;

/// Square matrix with nonzeros only in `|i - j| <= k`, stored in LAPACK
/// general-band layout.
///
/// The buffer has `3k + 1` rows per column, column-major. Element `(i, j)`
/// of the band sits at storage row `2k + i - j` of column `j`; rows
/// `0..k` of every column are scratch that a pivoted band LU fills in, so
/// the same buffer can be handed to `?gbsv` with `kl = ku = k` and
/// `ldab = 3k + 1`.
///
/// ```
/// use numcore::BandedMatrix;
///
/// let mut a = BandedMatrix::<f64>::new(4, 1);
/// assert!(a.set(1, 2, 5.0));
/// assert_eq!(a.get(1, 2), 5.0);
/// assert_eq!(a.get(0, 3), 0.0);      // outside the band
/// assert!(!a.set(0, 3, 1.0));        // refused
/// assert!(a.set(0, 3, 0.0));         // zero outside the band is a no-op
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix<T> {
    order: usize,
    half_bandwidth: usize,
    underlying: Vector<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> BandedMatrix<T> {
    /// The zero matrix of order `n` with half-bandwidth `k`.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            order: n,
            half_bandwidth: k,
            underlying: Vector::zeros(n * (3 * k + 1)),
        }
    }

    pub fn identity(n: usize, k: usize) -> Self {
        let mut m = Self::new(n, k);
        for i in 0..n {
            *m.band_mut(i, i) = T::one();
        }
        m
    }

    /// Copy the band of a square dense matrix.
    ///
    /// Fails with [`Error::InvalidArgument`] if `dense` is not square or has
    /// a nonzero entry outside the band.
    pub fn from_dense(k: usize, dense: &DenseMatrix<T>) -> Result<Self> {
        if !dense.is_square() {
            return Err(Error::invalid(
                "shape",
                format!("{}x{}", dense.rows(), dense.cols()),
                "a square matrix",
            ));
        }
        let n = dense.rows();
        let mut m = Self::new(n, k);
        for j in 0..n {
            for i in 0..n {
                let x = dense[(i, j)];
                if !m.set(i, j, x) {
                    return Err(Error::invalid(
                        "element outside band",
                        format!("({}, {}) = {}", i, j, x),
                        format!("zero for half-bandwidth {}", k),
                    ));
                }
            }
        }
        Ok(m)
    }

    /// Expand into a dense `n × n` matrix.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        DenseMatrix::from_fn(self.order, self.order, |i, j| self.get(i, j))
    }
}

impl<T> BandedMatrix<T> {
    /// Callers guarantee `underlying.len() == n * (3k + 1)`.
    pub(crate) fn from_parts(n: usize, k: usize, underlying: Vector<T>) -> Self {
        debug_assert_eq!(underlying.len(), n * (3 * k + 1));
        Self {
            order: n,
            half_bandwidth: k,
            underlying,
        }
    }
}

// ── Shape and storage ───────────────────────────────────────────────

impl<T> BandedMatrix<T> {
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn half_bandwidth(&self) -> usize {
        self.half_bandwidth
    }

    /// Rows per storage column, `3k + 1` (LAPACK's `ldab`).
    #[inline]
    pub fn leading_dimension(&self) -> usize {
        3 * self.half_bandwidth + 1
    }

    /// `(n, n)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.order, self.order)
    }

    #[inline]
    pub fn in_band(&self, i: usize, j: usize) -> bool {
        i.abs_diff(j) <= self.half_bandwidth
    }

    /// Storage offset of `(i, j)`, or `None` outside the physical window
    /// (band plus scratch rows).
    #[inline]
    fn storage_index(&self, i: usize, j: usize) -> Option<usize> {
        let k = self.half_bandwidth;
        // row 2k + i - j must lie in 0..=3k
        if i >= self.order || j >= self.order || i + 2 * k < j || i > j + k {
            return None;
        }
        Some(j * self.leading_dimension() + 2 * k + i - j)
    }

    /// The band-storage buffer as a vector.
    #[inline]
    pub fn underlying(&self) -> &Vector<T> {
        &self.underlying
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.underlying.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.underlying.as_mut_slice()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.underlying.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.underlying.as_mut_ptr()
    }

    /// Mutable reference into storage for `(i, j)`.
    ///
    /// Positions in the scratch rows above the band (`j - 2k <= i < j - k`)
    /// are addressable; writing a nonzero there breaks the zero-outside-band
    /// invariant until the next factorisation overwrites it.
    ///
    /// # Panics
    ///
    /// If `(i, j)` is out of range or outside the physical storage window.
    pub fn band_mut(&mut self, i: usize, j: usize) -> &mut T {
        match self.storage_index(i, j) {
            Some(s) => &mut self.as_mut_slice()[s],
            None => panic!(
                "({}, {}) is outside the band storage of an order-{} matrix with half-bandwidth {}",
                i, j, self.order, self.half_bandwidth
            ),
        }
    }
}

// ── Element access ──────────────────────────────────────────────────

impl<T: Scalar> BandedMatrix<T> {
    /// Element `(i, j)`; zero outside the band.
    ///
    /// # Panics
    ///
    /// If `i` or `j` is not below the order.
    pub fn get(&self, i: usize, j: usize) -> T {
        match self.at(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checked read; zero outside the band, [`Error::OutOfRange2D`] outside
    /// the matrix.
    pub fn at(&self, i: usize, j: usize) -> Result<T> {
        if i >= self.order || j >= self.order {
            return Err(Error::OutOfRange2D {
                row: i,
                col: j,
                rows: self.order,
                cols: self.order,
            });
        }
        if !self.in_band(i, j) {
            return Ok(T::zero());
        }
        Ok(self
            .storage_index(i, j)
            .map_or_else(T::zero, |s| self.as_slice()[s]))
    }

    /// Write `(i, j)`.
    ///
    /// Returns `false` (leaving `self` unchanged) when `(i, j)` is out of
    /// range, or outside the band with a nonzero `value`. A zero written
    /// outside the band is dropped and reported as success.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> bool {
        if i >= self.order || j >= self.order {
            return false;
        }
        if !self.in_band(i, j) {
            return value.is_zero();
        }
        match self.storage_index(i, j) {
            Some(s) => {
                self.as_mut_slice()[s] = value;
                true
            }
            None => false,
        }
    }

    pub fn zero(&mut self) {
        self.underlying.zero();
    }

    /// Evaluate a banded matrix expression into `self`, taking its shape.
    ///
    /// On error `self` is left untouched.
    pub fn assign_expr<M>(&mut self, expr: M) -> Result<()>
    where
        M: MatrixExpression<Shape = Band>,
        M::Inner: VectorExpression<Value = T>,
    {
        *self = expr.evaluate()?;
        Ok(())
    }

    /// `self · v`, summing only the band of each row.
    ///
    /// ```
    /// use numcore::{BandedMatrix, Vector};
    ///
    /// let a = BandedMatrix::<f64>::identity(3, 1);
    /// let v = Vector::from([1.0, 2.0, 3.0]);
    /// assert_eq!(a.matvec(&v).unwrap(), v);
    /// ```
    pub fn matvec(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if v.len() != self.order {
            return Err(Error::Mismatch2D {
                op: "matvec",
                lhs: self.shape(),
                rhs: (v.len(), 1),
            });
        }
        let n = self.order;
        let k = self.half_bandwidth;
        let ld = self.leading_dimension();
        let a = self.as_slice();
        let x = v.as_slice();
        let out = (0..n)
            .map(|i| {
                let lo = i.saturating_sub(k);
                let hi = (i + k + 1).min(n);
                let mut sum = T::zero();
                for j in lo..hi {
                    sum += a[j * ld + 2 * k + i - j] * x[j];
                }
                sum
            })
            .collect();
        Ok(out)
    }
}

/// In-place scaling.
impl<T: Scalar> MulAssign<T> for BandedMatrix<T> {
    fn mul_assign(&mut self, k: T) {
        self.underlying *= k;
    }
}

impl<'a, 'b, T: Scalar> core::ops::Mul<&'b Vector<T>> for &'a BandedMatrix<T> {
    type Output = Result<Vector<T>>;

    fn mul(self, rhs: &'b Vector<T>) -> Result<Vector<T>> {
        self.matvec(rhs)
    }
}

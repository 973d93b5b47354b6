mod io;
mod norm;
mod ops;

use core::ops::{Index, IndexMut, MulAssign};

use crate::error::{Error, Result};
use crate::expr::{Dense, MatrixExpression, VectorExpression};
use crate::traits::Scalar;
use crate::vector::Vector;

/// Heap-allocated matrix with runtime dimensions.
///
/// Storage is a [`Vector`] in column-major order: element `(i, j)` lives at
/// offset `j * rows + i` of [`underlying`](DenseMatrix::underlying), which is
/// the layout LAPACK expects.
///
/// ```
/// use numcore::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(a.shape(), (2, 3));
/// assert_eq!(a[(1, 0)], 4.0);
/// // column-major buffer
/// assert_eq!(a.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    underlying: Vector<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// An `rows × cols` zero matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// An `n × n` zero matrix.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            underlying: Vector::new(rows * cols, value),
        }
    }

    /// Wrap a column-major buffer.
    ///
    /// Fails with [`Error::InvalidArgument`] unless `underlying.len() == rows * cols`.
    ///
    /// ```
    /// use numcore::{DenseMatrix, Error, Vector};
    ///
    /// let m = DenseMatrix::from_underlying(2, 2, Vector::from([1.0_f64, 3.0, 2.0, 4.0])).unwrap();
    /// assert_eq!(m[(0, 1)], 2.0);
    ///
    /// let bad = DenseMatrix::from_underlying(2, 2, Vector::from([1.0_f64]));
    /// assert!(matches!(bad, Err(Error::InvalidArgument { .. })));
    /// ```
    pub fn from_underlying(rows: usize, cols: usize, underlying: Vector<T>) -> Result<Self> {
        check_length(rows, cols, underlying.len())?;
        Ok(Self::from_parts(rows, cols, underlying))
    }

    /// Build element `(i, j)` as `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let underlying = Vector::from_fn(rows * cols, |k| f(k % rows, k / rows));
        Self::from_parts(rows, cols, underlying)
    }

    /// Build from a row-major slice, transposing into column-major storage.
    pub fn from_rows(rows: usize, cols: usize, row_major: &[T]) -> Result<Self> {
        check_length(rows, cols, row_major.len())?;
        Ok(Self::from_fn(rows, cols, |i, j| row_major[i * cols + j]))
    }

    /// The `n × n` identity.
    ///
    /// ```
    /// use numcore::DenseMatrix;
    /// let id = DenseMatrix::<f64>::identity(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(1, 2)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> DenseMatrix<T> {
    /// Callers guarantee `underlying.len() == rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, underlying: Vector<T>) -> Self {
        debug_assert_eq!(underlying.len(), rows * cols);
        Self {
            rows,
            cols,
            underlying,
        }
    }
}

fn check_length(rows: usize, cols: usize, len: usize) -> Result<()> {
    if len != rows * cols {
        return Err(Error::invalid(
            "underlying length",
            len,
            format!("{} ({}x{})", rows * cols, rows, cols),
        ));
    }
    Ok(())
}

// ── Shape and storage ───────────────────────────────────────────────

impl<T> DenseMatrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The column-major buffer as a vector.
    #[inline]
    pub fn underlying(&self) -> &Vector<T> {
        &self.underlying
    }

    /// Take the column-major buffer.
    pub fn into_underlying(self) -> Vector<T> {
        self.underlying
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.underlying.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.underlying.as_mut_slice()
    }

    /// Pointer to the column-major buffer, for backend calls.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.underlying.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.underlying.as_mut_ptr()
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows || j >= self.cols {
            return Err(Error::OutOfRange2D {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(j * self.rows + i)
    }

    /// Checked element access.
    ///
    /// ```
    /// use numcore::{DenseMatrix, Error};
    /// let m = DenseMatrix::<f64>::new(2, 3);
    /// assert_eq!(m.at(1, 2), Ok(&0.0));
    /// assert_eq!(
    ///     m.at(2, 0),
    ///     Err(Error::OutOfRange2D { row: 2, col: 0, rows: 2, cols: 3 })
    /// );
    /// ```
    pub fn at(&self, i: usize, j: usize) -> Result<&T> {
        let k = self.offset(i, j)?;
        Ok(&self.as_slice()[k])
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let k = self.offset(i, j)?;
        Ok(&mut self.as_mut_slice()[k])
    }

    /// Element `(i, j)` without bounds checks.
    ///
    /// # Safety
    ///
    /// `i < rows()` and `j < cols()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> &T {
        self.underlying.get_unchecked(j * self.rows + i)
    }

    /// # Safety
    ///
    /// `i < rows()` and `j < cols()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize) -> &mut T {
        let k = j * self.rows + i;
        self.underlying.get_unchecked_mut(k)
    }

    /// Column `j` as a contiguous slice.
    pub fn column(&self, j: usize) -> Result<&[T]> {
        if j >= self.cols {
            return Err(Error::OutOfRange2D {
                row: 0,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.as_slice()[j * self.rows..(j + 1) * self.rows])
    }

    pub fn column_mut(&mut self, j: usize) -> Result<&mut [T]> {
        if j >= self.cols {
            return Err(Error::OutOfRange2D {
                row: 0,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let rows = self.rows;
        Ok(&mut self.as_mut_slice()[j * rows..(j + 1) * rows])
    }
}

// ── Mutation ────────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    pub fn fill(&mut self, value: T) {
        self.underlying.fill(value);
    }

    pub fn zero(&mut self) {
        self.underlying.zero();
    }

    /// Reshape to `rows × cols` and take `underlying` as the new buffer.
    ///
    /// Fails with [`Error::InvalidArgument`], leaving `self` unchanged,
    /// unless `underlying.len() == rows * cols`.
    pub fn assign(&mut self, rows: usize, cols: usize, underlying: Vector<T>) -> Result<()> {
        check_length(rows, cols, underlying.len())?;
        *self = Self::from_parts(rows, cols, underlying);
        Ok(())
    }

    /// Evaluate a dense matrix expression into `self`, taking its shape.
    ///
    /// On error `self` is left untouched.
    ///
    /// ```
    /// use numcore::DenseMatrix;
    ///
    /// let a = DenseMatrix::<f64>::identity(2);
    /// let mut out = DenseMatrix::new(0, 0);
    /// out.assign_expr(&a * 3.0 - &a).unwrap();
    /// assert_eq!(out[(1, 1)], 2.0);
    /// ```
    pub fn assign_expr<M>(&mut self, expr: M) -> Result<()>
    where
        M: MatrixExpression<Shape = Dense>,
        M::Inner: VectorExpression<Value = T>,
    {
        *self = expr.evaluate()?;
        Ok(())
    }

    /// The `cols × rows` transpose.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)])
    }
}

/// In-place scaling.
impl<T: Scalar> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, k: T) {
        self.underlying *= k;
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.at(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        match self.at_mut(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

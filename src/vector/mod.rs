mod io;
mod norm;

use core::ops::{Index, IndexMut, MulAssign};

use crate::error::{Error, Result};
use crate::expr::VectorExpression;
use crate::traits::Scalar;

/// Dense, heap-allocated vector with contiguous storage.
///
/// The only valid indices are `0..len()`. Checked access goes through
/// [`at`](Vector::at) / [`at_mut`](Vector::at_mut); `v[i]` panics with the
/// same [`Error::OutOfRange1D`] message.
///
/// Borrowed vectors (`&Vector<T>`) are the leaves of the expression engine:
///
/// ```
/// use numcore::{Vector, VectorExpression};
///
/// let a = Vector::from([1.0_f64, 2.0, 3.0]);
/// let b = Vector::from([4.0_f64, 5.0, 6.0]);
/// let c = (&a + &b * 2.0).evaluate().unwrap();
/// assert_eq!(c.as_slice(), &[9.0, 12.0, 15.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector<T> {
    data: Vec<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// A vector of length `n` with every element set to `fill`.
    ///
    /// ```
    /// use numcore::Vector;
    /// let v = Vector::new(3, 7.0_f64);
    /// assert_eq!(v.as_slice(), &[7.0, 7.0, 7.0]);
    /// ```
    pub fn new(n: usize, fill: T) -> Self {
        Self {
            data: vec![fill; n],
        }
    }

    pub fn zeros(n: usize) -> Self {
        Self::new(n, T::zero())
    }

    /// Build element `i` as `f(i)`.
    pub fn from_fn(n: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..n).map(f).collect(),
        }
    }

    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<T> Vector<T> {
    /// The length-0 vector.
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked read.
    #[inline]
    pub fn at(&self, i: usize) -> Result<&T> {
        let size = self.data.len();
        self.data
            .get(i)
            .ok_or(Error::OutOfRange1D { index: i, size })
    }

    /// Checked write access.
    #[inline]
    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        let size = self.data.len();
        self.data
            .get_mut(i)
            .ok_or(Error::OutOfRange1D { index: i, size })
    }

    /// Unchecked read.
    ///
    /// # Safety
    ///
    /// `i` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> &T {
        self.data.get_unchecked(i)
    }

    /// Unchecked write access.
    ///
    /// # Safety
    ///
    /// `i` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T {
        self.data.get_unchecked_mut(i)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Pointer to the first element, for backend interop.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ── Assignment ──────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    pub fn zero(&mut self) {
        self.fill(T::zero());
    }

    /// Resize to `n` and set every element to `value`.
    pub fn assign_fill(&mut self, n: usize, value: T) {
        self.data.clear();
        self.data.resize(n, value);
    }

    /// Replace the contents with the items of `iter`.
    pub fn assign_iter(&mut self, iter: impl IntoIterator<Item = T>) {
        self.data.clear();
        self.data.extend(iter);
    }

    pub fn assign_slice(&mut self, values: &[T]) {
        self.data.clear();
        self.data.extend_from_slice(values);
    }

    /// Change the length, filling new slots with `value`.
    pub fn resize(&mut self, n: usize, value: T) {
        self.data.resize(n, value);
    }

    /// Evaluate `expr` into `self`, resizing as needed.
    ///
    /// The expression is materialised in one increasing sweep before `self`
    /// is touched, so a failing element leaves `self` unchanged.
    ///
    /// ```
    /// use numcore::{Error, Vector};
    ///
    /// let a = Vector::from([1.0_f64, 2.0]);
    /// let z = Vector::from([1.0_f64, 0.0]);
    /// let mut out = Vector::from([9.0_f64]);
    /// assert_eq!(out.assign(&a / &z), Err(Error::DivisionByZero));
    /// assert_eq!(out.as_slice(), &[9.0]);
    ///
    /// out.assign(&a + &a).unwrap();
    /// assert_eq!(out.as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn assign<E>(&mut self, expr: E) -> Result<()>
    where
        E: VectorExpression<Value = T>,
    {
        self.data = expr.collect_values()?;
        Ok(())
    }

    /// `self += expr`, leaving `self` untouched on error.
    pub fn try_add_assign<E>(&mut self, expr: E) -> Result<()>
    where
        E: VectorExpression<Value = T>,
    {
        let rhs = self.checked_operand("add_assign", expr)?;
        for (a, b) in self.data.iter_mut().zip(rhs) {
            *a += b;
        }
        Ok(())
    }

    /// `self -= expr`, leaving `self` untouched on error.
    pub fn try_sub_assign<E>(&mut self, expr: E) -> Result<()>
    where
        E: VectorExpression<Value = T>,
    {
        let rhs = self.checked_operand("sub_assign", expr)?;
        for (a, b) in self.data.iter_mut().zip(rhs) {
            *a -= b;
        }
        Ok(())
    }

    /// In-place division by a scalar.
    pub fn try_div_assign_scalar(&mut self, k: T) -> Result<()> {
        if k.is_zero_divisor() {
            return Err(Error::DivisionByZero);
        }
        for x in self.data.iter_mut() {
            *x /= k;
        }
        Ok(())
    }

    fn checked_operand<E>(&self, op: &'static str, expr: E) -> Result<Vec<T>>
    where
        E: VectorExpression<Value = T>,
    {
        if expr.size() != self.len() {
            return Err(Error::Mismatch1D {
                op,
                lhs: self.len(),
                rhs: expr.size(),
            });
        }
        expr.collect_values()
    }
}

/// In-place scaling; used for `temporary *= k`.
impl<T: Scalar> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, k: T) {
        for x in self.data.iter_mut() {
            *x *= k;
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        match self.at(i) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match self.at_mut(i) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T, const M: usize> From<[T; M]> for Vector<T> {
    fn from(values: [T; M]) -> Self {
        Self {
            data: values.into(),
        }
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(v: Vector<T>) -> Self {
        v.data
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

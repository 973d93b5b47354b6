use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Trait for types that can be stored in containers and flow through expressions.
///
/// Implemented for `f64` (Real), [`Complex64`] (Complex) and
/// [`Dual<N, T>`](crate::Dual) for any `T: Scalar`. The elementwise functions
/// are the ones the expression engine exposes as functors.
///
/// `/` keeps IEEE semantics; [`checked_div`](Scalar::checked_div) is the
/// entry point that reports [`Error::DivisionByZero`].
pub trait Scalar:
    Copy
    + PartialEq
    + Debug
    + Display
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Absolute value / modulus of the leading value, as a Real.
    fn modulus(self) -> f64;

    /// Promote a Real into `Self`.
    fn from_real(r: f64) -> Self;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Whether every component is finite.
    fn is_finite(self) -> bool;

    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    /// `self^r` for a Real exponent.
    fn powf(self, r: f64) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;

    /// Elementwise absolute value. Complex values map to `(|z|, 0)`.
    fn abs(self) -> Self;

    /// Sign: `-1`, `0` or `1` for reals, `z / |z|` (or `0`) for complex.
    fn sgn(self) -> Self;

    /// Parse one whitespace-free token. `None` stops a scalar stream.
    fn parse_token(token: &str) -> Option<Self>;

    /// Whether `self` is an exact-zero divisor.
    #[inline]
    fn is_zero_divisor(self) -> bool {
        self.is_zero()
    }

    /// Division that fails with [`Error::DivisionByZero`] on an exact-zero divisor.
    ///
    /// ```
    /// use numcore::{Error, Scalar};
    /// assert_eq!(6.0_f64.checked_div(3.0), Ok(2.0));
    /// assert_eq!(1.0_f64.checked_div(0.0), Err(Error::DivisionByZero));
    /// ```
    #[inline]
    fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero_divisor() {
            Err(Error::DivisionByZero)
        } else {
            Ok(self / rhs)
        }
    }
}

impl Scalar for f64 {
    #[inline]
    fn modulus(self) -> f64 {
        f64::abs(self)
    }
    #[inline]
    fn from_real(r: f64) -> f64 {
        r
    }
    #[inline]
    fn conj(self) -> f64 {
        self
    }
    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    #[inline]
    fn sqrt(self) -> f64 {
        f64::sqrt(self)
    }
    #[inline]
    fn exp(self) -> f64 {
        f64::exp(self)
    }
    #[inline]
    fn ln(self) -> f64 {
        f64::ln(self)
    }
    #[inline]
    fn powf(self, r: f64) -> f64 {
        f64::powf(self, r)
    }
    #[inline]
    fn sin(self) -> f64 {
        f64::sin(self)
    }
    #[inline]
    fn cos(self) -> f64 {
        f64::cos(self)
    }
    #[inline]
    fn tan(self) -> f64 {
        f64::tan(self)
    }
    #[inline]
    fn asin(self) -> f64 {
        f64::asin(self)
    }
    #[inline]
    fn acos(self) -> f64 {
        f64::acos(self)
    }
    #[inline]
    fn atan(self) -> f64 {
        f64::atan(self)
    }
    #[inline]
    fn sinh(self) -> f64 {
        f64::sinh(self)
    }
    #[inline]
    fn cosh(self) -> f64 {
        f64::cosh(self)
    }
    #[inline]
    fn tanh(self) -> f64 {
        f64::tanh(self)
    }
    #[inline]
    fn asinh(self) -> f64 {
        f64::asinh(self)
    }
    #[inline]
    fn acosh(self) -> f64 {
        f64::acosh(self)
    }
    #[inline]
    fn atanh(self) -> f64 {
        f64::atanh(self)
    }
    #[inline]
    fn abs(self) -> f64 {
        f64::abs(self)
    }
    #[inline]
    fn sgn(self) -> f64 {
        if self > 0.0 {
            1.0
        } else if self < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
    fn parse_token(token: &str) -> Option<f64> {
        token.parse().ok()
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }
    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }
    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }
    #[inline]
    fn is_finite(self) -> bool {
        Complex64::is_finite(self)
    }
    #[inline]
    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }
    #[inline]
    fn exp(self) -> Self {
        Complex64::exp(self)
    }
    #[inline]
    fn ln(self) -> Self {
        Complex64::ln(self)
    }
    #[inline]
    fn powf(self, r: f64) -> Self {
        Complex64::powf(self, r)
    }
    #[inline]
    fn sin(self) -> Self {
        Complex64::sin(self)
    }
    #[inline]
    fn cos(self) -> Self {
        Complex64::cos(self)
    }
    #[inline]
    fn tan(self) -> Self {
        Complex64::tan(self)
    }
    #[inline]
    fn asin(self) -> Self {
        Complex64::asin(self)
    }
    #[inline]
    fn acos(self) -> Self {
        Complex64::acos(self)
    }
    #[inline]
    fn atan(self) -> Self {
        Complex64::atan(self)
    }
    #[inline]
    fn sinh(self) -> Self {
        Complex64::sinh(self)
    }
    #[inline]
    fn cosh(self) -> Self {
        Complex64::cosh(self)
    }
    #[inline]
    fn tanh(self) -> Self {
        Complex64::tanh(self)
    }
    #[inline]
    fn asinh(self) -> Self {
        Complex64::asinh(self)
    }
    #[inline]
    fn acosh(self) -> Self {
        Complex64::acosh(self)
    }
    #[inline]
    fn atanh(self) -> Self {
        Complex64::atanh(self)
    }
    #[inline]
    fn abs(self) -> Self {
        Complex64::new(self.norm(), 0.0)
    }
    #[inline]
    fn sgn(self) -> Self {
        let r = self.norm();
        if r == 0.0 {
            Complex64::new(0.0, 0.0)
        } else {
            self / r
        }
    }

    /// Accepts `(re,im)` pairs as well as the num-complex form `re+imi`.
    fn parse_token(token: &str) -> Option<Self> {
        if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            let (re, im) = inner.split_once(',')?;
            return Some(Complex64::new(re.trim().parse().ok()?, im.trim().parse().ok()?));
        }
        token.parse().ok()
    }
}

/// Total, elementwise coercion into a wider element type.
///
/// Covers `T → T`, Real → Complex, `T → Dual<N, T>` and
/// `Dual<N, Real> → Dual<N, Complex>`.
///
/// ```
/// use numcore::{Complex64, Promote};
/// let z: Complex64 = 2.5_f64.promote();
/// assert_eq!(z, Complex64::new(2.5, 0.0));
/// ```
pub trait Promote<U: Scalar>: Scalar {
    fn promote(self) -> U;
}

impl<T: Scalar> Promote<T> for T {
    #[inline]
    fn promote(self) -> T {
        self
    }
}

impl Promote<Complex64> for f64 {
    #[inline]
    fn promote(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

//! Forward-mode automatic differentiation with multivariate dual numbers.
//!
//! A [`Dual<N, T>`] is `x + Σ pᵢ·εᵢ` with `N` independent nilpotent
//! infinitesimals (`εᵢ·εⱼ = 0`). Seeding slot `k` with `1` and evaluating any
//! expression built from the arithmetic operators and the [`Scalar`]
//! functions yields `∂f/∂xₖ` in `dual[k]`.
//!
//! ```
//! use numcore::{Dual, Scalar};
//!
//! // f(x) = sin(x² + 1) at x = 0.5
//! let x = Dual::<1, f64>::variable(0.5, 0);
//! let f = (x * x + 1.0).sin();
//! assert!((f.value - 1.25_f64.sin()).abs() < 1e-15);
//! assert!((f.dual[0] - 1.25_f64.cos()).abs() < 1e-15);
//! ```
//!
//! `T` may be `f64`, [`Complex64`] or another `Dual`, so duals nest.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::traits::{Promote, Scalar};

/// A value together with `N` directional derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<const N: usize, T> {
    /// Leading (primal) value.
    pub value: T,
    /// Derivative components, one per infinitesimal.
    pub dual: [T; N],
}

// ── Constructors ────────────────────────────────────────────────────

impl<const N: usize, T: Scalar> Dual<N, T> {
    pub fn new(value: T, dual: [T; N]) -> Self {
        Self { value, dual }
    }

    /// A value with all derivative components zero.
    pub fn constant(value: T) -> Self {
        Self {
            value,
            dual: [T::zero(); N],
        }
    }

    /// The `k`-th independent variable: `dual[k] = 1`, all others `0`.
    ///
    /// Panics if `k >= N`.
    ///
    /// ```
    /// use numcore::Dual;
    /// let y = Dual::<2, f64>::variable(4.0, 1);
    /// assert_eq!(y.dual, [0.0, 1.0]);
    /// ```
    pub fn variable(value: T, k: usize) -> Self {
        assert!(k < N, "variable slot {} out of range for N = {}", k, N);
        let mut d = Self::constant(value);
        d.dual[k] = T::one();
        d
    }

    /// Seed `N` independent variables at once.
    ///
    /// ```
    /// use numcore::Dual;
    /// let [x, y] = Dual::seed([3.0_f64, 4.0]);
    /// let f = x * x + x * y;
    /// assert_eq!(f.value, 21.0);
    /// assert_eq!(f.dual, [10.0, 3.0]);
    /// ```
    pub fn seed(values: [T; N]) -> [Self; N] {
        let mut k = 0;
        values.map(|v| {
            let d = Self::variable(v, k);
            k += 1;
            d
        })
    }

    /// Partial derivative with respect to variable `k`.
    pub fn partial(&self, k: usize) -> T {
        self.dual[k]
    }

    /// Apply a smooth function given its value `f(a)` and derivative `f'(a)`.
    #[inline]
    fn chain(self, f: T, df: T) -> Self {
        Self {
            value: f,
            dual: self.dual.map(|p| p * df),
        }
    }
}

impl<const N: usize, T: Scalar> Default for Dual<N, T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize, T: Scalar> From<T> for Dual<N, T> {
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

impl<const N: usize, T: Scalar> fmt::Display for Dual<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.value)?;
        for (i, d) in self.dual.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

// ── Dual ∘ Dual ─────────────────────────────────────────────────────

impl<const N: usize, T: Scalar> Add for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self.value += rhs.value;
        for (p, q) in self.dual.iter_mut().zip(rhs.dual) {
            *p += q;
        }
        self
    }
}

impl<const N: usize, T: Scalar> Sub for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self.value -= rhs.value;
        for (p, q) in self.dual.iter_mut().zip(rhs.dual) {
            *p -= q;
        }
        self
    }
}

impl<const N: usize, T: Scalar> Mul for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.value, rhs.value);
        let mut dual = self.dual;
        for (p, q) in dual.iter_mut().zip(rhs.dual) {
            *p = b * *p + a * q;
        }
        Self { value: a * b, dual }
    }
}

impl<const N: usize, T: Scalar> Div for Dual<N, T> {
    type Output = Self;

    /// IEEE semantics; use [`Scalar::checked_div`] to detect a zero divisor.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let b = rhs.value;
        let ratio = self.value / b;
        let mut dual = self.dual;
        for (p, q) in dual.iter_mut().zip(rhs.dual) {
            *p = (*p - ratio * q) / b;
        }
        Self { value: ratio, dual }
    }
}

impl<const N: usize, T: Scalar> Neg for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            dual: self.dual.map(|p| -p),
        }
    }
}

macro_rules! impl_dual_assign {
    ($($Trait:ident $method:ident $op:tt),*) => {
        $(
            impl<const N: usize, T: Scalar> $Trait for Dual<N, T> {
                #[inline]
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl<const N: usize, T: Scalar> $Trait<T> for Dual<N, T> {
                #[inline]
                fn $method(&mut self, rhs: T) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_dual_assign!(
    AddAssign add_assign +,
    SubAssign sub_assign -,
    MulAssign mul_assign *,
    DivAssign div_assign /
);

// ── Dual ∘ T ────────────────────────────────────────────────────────

impl<const N: usize, T: Scalar> Add<T> for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: T) -> Self {
        self.value += rhs;
        self
    }
}

impl<const N: usize, T: Scalar> Sub<T> for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: T) -> Self {
        self.value -= rhs;
        self
    }
}

impl<const N: usize, T: Scalar> Mul<T> for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self {
            value: self.value * rhs,
            dual: self.dual.map(|p| p * rhs),
        }
    }
}

impl<const N: usize, T: Scalar> Div<T> for Dual<N, T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self {
            value: self.value / rhs,
            dual: self.dual.map(|p| p / rhs),
        }
    }
}

// ── T ∘ Dual for the concrete element types ─────────────────────────

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> Add<Dual<N, $t>> for $t {
                type Output = Dual<N, $t>;
                #[inline]
                fn add(self, rhs: Dual<N, $t>) -> Dual<N, $t> {
                    rhs + self
                }
            }

            impl<const N: usize> Sub<Dual<N, $t>> for $t {
                type Output = Dual<N, $t>;
                #[inline]
                fn sub(self, rhs: Dual<N, $t>) -> Dual<N, $t> {
                    -rhs + self
                }
            }

            impl<const N: usize> Mul<Dual<N, $t>> for $t {
                type Output = Dual<N, $t>;
                #[inline]
                fn mul(self, rhs: Dual<N, $t>) -> Dual<N, $t> {
                    rhs * self
                }
            }

            impl<const N: usize> Div<Dual<N, $t>> for $t {
                type Output = Dual<N, $t>;
                #[inline]
                fn div(self, rhs: Dual<N, $t>) -> Dual<N, $t> {
                    Dual::constant(self) / rhs
                }
            }
        )*
    };
}

impl_scalar_lhs!(f64, Complex64);

// ── num-traits ──────────────────────────────────────────────────────

impl<const N: usize, T: Scalar> Zero for Dual<N, T> {
    fn zero() -> Self {
        Self::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero() && self.dual.iter().all(Zero::is_zero)
    }
}

impl<const N: usize, T: Scalar> One for Dual<N, T> {
    fn one() -> Self {
        Self::constant(T::one())
    }
}

// ── Elementwise functions ───────────────────────────────────────────

impl<const N: usize, T: Scalar> Scalar for Dual<N, T> {
    #[inline]
    fn modulus(self) -> f64 {
        self.value.modulus()
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Self::constant(T::from_real(r))
    }

    fn conj(self) -> Self {
        Self {
            value: self.value.conj(),
            dual: self.dual.map(Scalar::conj),
        }
    }

    fn is_finite(self) -> bool {
        self.value.is_finite() && self.dual.iter().all(|d| d.is_finite())
    }

    fn sqrt(self) -> Self {
        let s = self.value.sqrt();
        self.chain(s, T::one() / (T::from_real(2.0) * s))
    }

    fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        let a = self.value;
        self.chain(a.ln(), T::one() / a)
    }

    fn powf(self, r: f64) -> Self {
        let a = self.value;
        self.chain(a.powf(r), T::from_real(r) * a.powf(r - 1.0))
    }

    fn sin(self) -> Self {
        let a = self.value;
        self.chain(a.sin(), a.cos())
    }

    fn cos(self) -> Self {
        let a = self.value;
        self.chain(a.cos(), -a.sin())
    }

    fn tan(self) -> Self {
        let a = self.value;
        let c = a.cos();
        self.chain(a.tan(), T::one() / (c * c))
    }

    fn asin(self) -> Self {
        let a = self.value;
        self.chain(a.asin(), T::one() / (T::one() - a * a).sqrt())
    }

    fn acos(self) -> Self {
        let a = self.value;
        self.chain(a.acos(), -T::one() / (T::one() - a * a).sqrt())
    }

    fn atan(self) -> Self {
        let a = self.value;
        self.chain(a.atan(), T::one() / (T::one() + a * a))
    }

    fn sinh(self) -> Self {
        let a = self.value;
        self.chain(a.sinh(), a.cosh())
    }

    fn cosh(self) -> Self {
        let a = self.value;
        self.chain(a.cosh(), a.sinh())
    }

    fn tanh(self) -> Self {
        let a = self.value;
        let t = a.tanh();
        self.chain(t, T::one() - t * t)
    }

    fn asinh(self) -> Self {
        let a = self.value;
        self.chain(a.asinh(), T::one() / (a * a + T::one()).sqrt())
    }

    fn acosh(self) -> Self {
        let a = self.value;
        self.chain(a.acosh(), T::one() / (a * a - T::one()).sqrt())
    }

    fn atanh(self) -> Self {
        let a = self.value;
        self.chain(a.atanh(), T::one() / (T::one() - a * a))
    }

    /// Derivative is the directional derivative of the modulus:
    /// `p·sgn(a)` for reals, `Re(p·conj(a))/|a|` for complex values.
    fn abs(self) -> Self {
        let a = self.value;
        let s = a.sgn().conj();
        Self {
            value: a.abs(),
            dual: self.dual.map(|p| real_part(p * s)),
        }
    }

    fn sgn(self) -> Self {
        Self::constant(self.value.sgn())
    }

    fn parse_token(token: &str) -> Option<Self> {
        T::parse_token(token).map(Self::constant)
    }

    #[inline]
    fn is_zero_divisor(self) -> bool {
        self.value.is_zero_divisor()
    }
}

/// `(x + conj(x)) / 2`: the real part, kept in the element type.
#[inline]
fn real_part<T: Scalar>(x: T) -> T {
    (x + x.conj()) / T::from_real(2.0)
}

// ── Promotion ───────────────────────────────────────────────────────

impl<const N: usize, T: Scalar> Promote<Dual<N, T>> for T {
    #[inline]
    fn promote(self) -> Dual<N, T> {
        Dual::constant(self)
    }
}

impl<const N: usize> Promote<Dual<N, Complex64>> for Dual<N, f64> {
    #[inline]
    fn promote(self) -> Dual<N, Complex64> {
        Dual {
            value: Promote::<Complex64>::promote(self.value),
            dual: self.dual.map(Promote::<Complex64>::promote),
        }
    }
}

//! Pointwise operations carried by [`UnaryOp`](super::UnaryOp) and
//! [`BinaryOp`](super::BinaryOp) nodes.
//!
//! Every functor is defined for any [`Scalar`], so the same node types work
//! for Real, Complex and `Dual` elements. Domain errors (e.g. `ln(-1.0)`)
//! follow floating-point semantics and yield NaN; only [`Divide`] can fail.

use crate::error::Result;
use crate::traits::Scalar;

/// A function applied to one element.
pub trait UnaryFunctor<T> {
    fn apply(&self, x: T) -> T;
}

/// A function applied to a pair of elements at the same index.
pub trait BinaryFunctor<T> {
    /// Operation name used in mismatch errors.
    const NAME: &'static str;

    fn apply(&self, lhs: T, rhs: T) -> Result<T>;
}

macro_rules! unary_functors {
    ($($(#[$meta:meta])* $name:ident => |$x:ident| $body:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl<T: Scalar> UnaryFunctor<T> for $name {
                #[inline]
                fn apply(&self, $x: T) -> T {
                    $body
                }
            }
        )*
    };
}

unary_functors! {
    Identity => |x| x;
    Negate => |x| -x;
    Exp => |x| x.exp();
    /// Natural logarithm.
    Log => |x| x.ln();
    Sqrt => |x| x.sqrt();
    Sin => |x| x.sin();
    Cos => |x| x.cos();
    Tan => |x| x.tan();
    Asin => |x| x.asin();
    Acos => |x| x.acos();
    Atan => |x| x.atan();
    Sinh => |x| x.sinh();
    Cosh => |x| x.cosh();
    Tanh => |x| x.tanh();
    Asinh => |x| x.asinh();
    Acosh => |x| x.acosh();
    Atanh => |x| x.atanh();
    Abs => |x| x.abs();
    /// Sign; see [`Scalar::sgn`].
    Sgn => |x| x.sgn();
}

/// `x^r` for a fixed Real exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pow(pub f64);

impl<T: Scalar> UnaryFunctor<T> for Pow {
    #[inline]
    fn apply(&self, x: T) -> T {
        x.powf(self.0)
    }
}

macro_rules! binary_functors {
    ($($name:ident $label:literal => |$a:ident, $b:ident| $body:expr;)*) => {
        $(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl<T: Scalar> BinaryFunctor<T> for $name {
                const NAME: &'static str = $label;

                #[inline]
                fn apply(&self, $a: T, $b: T) -> Result<T> {
                    $body
                }
            }
        )*
    };
}

binary_functors! {
    Plus "add" => |a, b| Ok(a + b);
    Minus "sub" => |a, b| Ok(a - b);
    Multiply "mul" => |a, b| Ok(a * b);
    Divide "div" => |a, b| a.checked_div(b);
}

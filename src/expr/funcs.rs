use crate::matrix::DenseMatrix;
use crate::traits::Scalar;
use crate::vector::Vector;

use super::functors::*;
use super::matrix::{Dense, MatrixExpr};
use super::{UnaryOp, VectorExpression};

/// Anything an elementwise function can be applied to lazily.
///
/// Vector expressions map to a [`UnaryOp`]; dense matrices and dense matrix
/// expressions map to a [`MatrixExpr`] over the underlying buffer. Banded
/// matrices are excluded because most functions do not fix zero.
pub trait Pointwise: Sized {
    type Value: Scalar;
    type Output<F>;

    fn map_pointwise<F: UnaryFunctor<Self::Value>>(self, f: F) -> Self::Output<F>;
}

impl<E: VectorExpression> Pointwise for E {
    type Value = E::Value;
    type Output<F> = UnaryOp<F, E>;

    #[inline]
    fn map_pointwise<F: UnaryFunctor<E::Value>>(self, f: F) -> UnaryOp<F, E> {
        UnaryOp::new(f, self)
    }
}

impl<'a, T: Scalar> Pointwise for &'a DenseMatrix<T> {
    type Value = T;
    type Output<F> = MatrixExpr<UnaryOp<F, &'a Vector<T>>, Dense>;

    fn map_pointwise<F: UnaryFunctor<T>>(self, f: F) -> Self::Output<F> {
        MatrixExpr::lift(self).map_inner(|inner| UnaryOp::new(f, inner))
    }
}

impl<E: VectorExpression> Pointwise for MatrixExpr<E, Dense> {
    type Value = E::Value;
    type Output<F> = MatrixExpr<UnaryOp<F, E>, Dense>;

    fn map_pointwise<F: UnaryFunctor<E::Value>>(self, f: F) -> Self::Output<F> {
        self.map_inner(|inner| UnaryOp::new(f, inner))
    }
}

macro_rules! pointwise_fns {
    ($($(#[$meta:meta])* $fname:ident => $F:ident;)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $fname<X: Pointwise>(x: X) -> X::Output<$F> {
                x.map_pointwise($F)
            }
        )*
    };
}

pointwise_fns! {
    identity => Identity;
    /// Elementwise `eˣ`.
    exp => Exp;
    /// Elementwise natural logarithm; non-positive reals give NaN.
    log => Log;
    sqrt => Sqrt;
    sin => Sin;
    cos => Cos;
    tan => Tan;
    asin => Asin;
    acos => Acos;
    atan => Atan;
    sinh => Sinh;
    cosh => Cosh;
    tanh => Tanh;
    asinh => Asinh;
    acosh => Acosh;
    atanh => Atanh;
    abs => Abs;
    sgn => Sgn;
}

/// Elementwise `xʳ`.
///
/// ```
/// use numcore::{Vector, VectorExpression};
/// use numcore::expr::pow;
///
/// let v = Vector::from([2.0_f64, 3.0]);
/// assert_eq!(pow(&v, 2.0).evaluate().unwrap().as_slice(), &[4.0, 9.0]);
/// ```
#[inline]
pub fn pow<X: Pointwise>(x: X, r: f64) -> X::Output<Pow> {
    x.map_pointwise(Pow(r))
}

//! Infix operators for vector expressions.
//!
//! `+ - * /` between two vector expressions are elementwise and build a
//! [`BinaryOp`]. A scalar operand on either side is lifted into a
//! [`Constant`] of matching size. Scalars must already have the element
//! type; mixed Real/Complex arithmetic goes through [`promote`](super::promote).

use core::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::dual::Dual;
use crate::vector::Vector;

use super::functors::{Divide, Minus, Multiply, Negate, Plus};
use super::{BinaryOp, Constant, Promoted, UnaryOp, VectorExpression};

macro_rules! impl_expr_binary {
    (@one [$($g:tt)*] $ty:ty; $Trait:ident $method:ident $F:ident) => {
        impl<$($g)*, Rhs> $Trait<Rhs> for $ty
        where
            $ty: VectorExpression,
            Rhs: VectorExpression<Value = <$ty as VectorExpression>::Value>,
        {
            type Output = BinaryOp<$F, $ty, Rhs>;

            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                BinaryOp::new($F, self, rhs)
            }
        }
    };
    ($g:tt $ty:ty; $($Trait:ident $method:ident $F:ident),*) => {
        $( impl_expr_binary!(@one $g $ty; $Trait $method $F); )*
    };
}

macro_rules! impl_expr_scalar {
    (@one [$($g:tt)*] $ty:ty; $s:ty; $Trait:ident $method:ident $F:ident) => {
        impl<$($g)*> $Trait<$s> for $ty
        where
            $ty: VectorExpression<Value = $s>,
        {
            type Output = BinaryOp<$F, $ty, Constant<$s>>;

            #[inline]
            fn $method(self, rhs: $s) -> Self::Output {
                let n = self.size();
                BinaryOp::new($F, self, Constant::new(rhs, n))
            }
        }

        impl<$($g)*> $Trait<$ty> for $s
        where
            $ty: VectorExpression<Value = $s>,
        {
            type Output = BinaryOp<$F, Constant<$s>, $ty>;

            #[inline]
            fn $method(self, rhs: $ty) -> Self::Output {
                let n = rhs.size();
                BinaryOp::new($F, Constant::new(self, n), rhs)
            }
        }
    };
    ($g:tt $ty:ty; $s:ty; $($Trait:ident $method:ident $F:ident),*) => {
        $( impl_expr_scalar!(@one $g $ty; $s; $Trait $method $F); )*
    };
}

macro_rules! impl_expr_ops {
    ($([$($g:tt)*] $ty:ty;)*) => {
        $(
            impl_expr_binary!([$($g)*] $ty;
                Add add Plus, Sub sub Minus, Mul mul Multiply, Div div Divide);

            impl_expr_scalar!([$($g)*] $ty; f64;
                Add add Plus, Sub sub Minus, Mul mul Multiply, Div div Divide);
            impl_expr_scalar!([$($g)*] $ty; Complex64;
                Add add Plus, Sub sub Minus, Mul mul Multiply, Div div Divide);
            impl_expr_scalar!([$($g)*, const N: usize] $ty; Dual<N, f64>;
                Add add Plus, Sub sub Minus, Mul mul Multiply, Div div Divide);
            impl_expr_scalar!([$($g)*, const N: usize] $ty; Dual<N, Complex64>;
                Add add Plus, Sub sub Minus, Mul mul Multiply, Div div Divide);

            impl<$($g)*> Neg for $ty
            where
                $ty: VectorExpression,
            {
                type Output = UnaryOp<Negate, $ty>;

                #[inline]
                fn neg(self) -> Self::Output {
                    UnaryOp::new(Negate, self)
                }
            }
        )*
    };
}

impl_expr_ops! {
    ['a, T] &'a Vector<T>;
    [F, E] UnaryOp<F, E>;
    [F, L, R] BinaryOp<F, L, R>;
    [T] Constant<T>;
    [E, U] Promoted<E, U>;
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::expr::{promote, VectorExpression};
    use crate::{Complex64, Dual, Vector};

    #[test]
    fn vector_vector_arithmetic() {
        let a = Vector::from([1.0_f64, 2.0, 3.0]);
        let b = Vector::from([4.0_f64, 5.0, 6.0]);
        assert_eq!((&a + &b).evaluate().unwrap().as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!((&b - &a).evaluate().unwrap().as_slice(), &[3.0, 3.0, 3.0]);
        assert_eq!((&a * &b).evaluate().unwrap().as_slice(), &[4.0, 10.0, 18.0]);
        assert_eq!((&b / &a).evaluate().unwrap().as_slice(), &[4.0, 2.5, 2.0]);
        assert_eq!((-&a).evaluate().unwrap().as_slice(), &[-1.0, -2.0, -3.0]);
    }

    #[test]
    fn operators_on_every_node_type() {
        let a = Vector::from([1.0_f64, 2.0]);
        let b = Vector::from([3.0_f64, 4.0]);
        // BinaryOp and UnaryOp on either side of a vector and a scalar
        let r = (-(&a + &b) * &a - 1.0 + 2.0 * -&b) / (&b - &a);
        assert_eq!(r.evaluate().unwrap().as_slice(), &[-5.5, -10.5]);

        let z = Vector::from([Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)]);
        let p = promote::<Complex64, _>(&a) * Complex64::new(2.0, 0.0) + &z;
        assert_eq!(
            p.evaluate().unwrap().as_slice(),
            &[Complex64::new(2.0, 1.0), Complex64::new(5.0, 0.0)]
        );
    }

    #[test]
    fn scalar_on_both_sides() {
        let a = Vector::from([1.0_f64, 2.0]);
        assert_eq!((2.0 * &a).evaluate().unwrap().as_slice(), &[2.0, 4.0]);
        assert_eq!((&a * 2.0).evaluate().unwrap().as_slice(), &[2.0, 4.0]);
        assert_eq!((1.0 - &a).evaluate().unwrap().as_slice(), &[0.0, -1.0]);
        assert_eq!((&a + 1.0).evaluate().unwrap().as_slice(), &[2.0, 3.0]);
        assert_eq!((4.0 / &a).evaluate().unwrap().as_slice(), &[4.0, 2.0]);
        assert_eq!((&a / 0.0).evaluate(), Err(Error::DivisionByZero));
    }

    #[test]
    fn nested_trees() {
        let a = Vector::from([1.0_f64, 2.0]);
        let b = Vector::from([3.0_f64, 4.0]);
        let e = -((&a + &b) * 2.0 - &a) / (&b + 1.0);
        let v = e.evaluate().unwrap();
        assert_eq!(v.as_slice(), &[-7.0 / 4.0, -10.0 / 5.0]);
    }

    #[test]
    fn complex_and_dual_elements() {
        let i = Complex64::new(0.0, 1.0);
        let z = Vector::from([i, Complex64::new(1.0, 0.0)]);
        let w = (&z * i).evaluate().unwrap();
        assert_eq!(w[0], Complex64::new(-1.0, 0.0));
        assert_eq!(w[1], i);

        let x = Dual::<1, f64>::variable(2.0, 0);
        let d = Vector::from([x, x]);
        let sq = (&d * &d + x).evaluate().unwrap();
        assert_eq!(sq[0].value, 6.0);
        assert_eq!(sq[0].dual[0], 5.0);
    }

    #[test]
    fn promoted_operands() {
        let re = Vector::from([1.0_f64, -1.0]);
        let z = Vector::from([Complex64::new(0.0, 2.0), Complex64::new(0.0, 0.0)]);
        let v = (&z * promote::<Complex64, _>(&re)).evaluate().unwrap();
        assert_eq!(v[0], Complex64::new(0.0, 2.0));
        assert_eq!(v[1], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn length_mismatch_in_operator_tree() {
        let a = Vector::from([1.0_f64, 2.0]);
        let b = Vector::from([1.0_f64, 2.0, 3.0]);
        let err = (&a * &b).evaluate().unwrap_err();
        assert_eq!(
            err,
            Error::Mismatch1D {
                op: "mul",
                lhs: 2,
                rhs: 3
            }
        );
    }
}

use core::marker::PhantomData;

use crate::error::{Error, Result};
use crate::traits::{Promote, Scalar};
use crate::vector::Vector;

use super::functors::{BinaryFunctor, UnaryFunctor};
use super::VectorExpression;

// ── Leaf ────────────────────────────────────────────────────────────

impl<'a, T: Scalar> VectorExpression for &'a Vector<T> {
    type Value = T;
    const IS_LEAF: bool = true;

    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn eval_at(&self, i: usize) -> Result<T> {
        self.at(i).copied()
    }
}

// ── UnaryOp ─────────────────────────────────────────────────────────

/// Applies `F` to every element of `E`.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOp<F, E> {
    functor: F,
    expr: E,
}

impl<F, E> UnaryOp<F, E> {
    pub fn new(functor: F, expr: E) -> Self {
        Self { functor, expr }
    }

    pub fn functor(&self) -> &F {
        &self.functor
    }

    pub fn operand(&self) -> &E {
        &self.expr
    }
}

impl<F, E> VectorExpression for UnaryOp<F, E>
where
    E: VectorExpression,
    F: UnaryFunctor<E::Value>,
{
    type Value = E::Value;

    #[inline]
    fn size(&self) -> usize {
        self.expr.size()
    }

    fn validate(&self) -> Result<()> {
        self.expr.validate()
    }

    #[inline]
    fn eval_at(&self, i: usize) -> Result<E::Value> {
        Ok(self.functor.apply(self.expr.eval_at(i)?))
    }
}

// ── BinaryOp ────────────────────────────────────────────────────────

/// Applies `F` to `(L[i], R[i])`. Both operands must have the same size.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOp<F, L, R> {
    functor: F,
    lhs: L,
    rhs: R,
}

impl<F, L, R> BinaryOp<F, L, R> {
    pub fn new(functor: F, lhs: L, rhs: R) -> Self {
        Self { functor, lhs, rhs }
    }

    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<F, L, R> VectorExpression for BinaryOp<F, L, R>
where
    L: VectorExpression,
    R: VectorExpression<Value = L::Value>,
    F: BinaryFunctor<L::Value>,
{
    type Value = L::Value;

    #[inline]
    fn size(&self) -> usize {
        self.lhs.size()
    }

    fn validate(&self) -> Result<()> {
        self.lhs.validate()?;
        self.rhs.validate()?;
        if self.lhs.size() != self.rhs.size() {
            return Err(Error::Mismatch1D {
                op: F::NAME,
                lhs: self.lhs.size(),
                rhs: self.rhs.size(),
            });
        }
        Ok(())
    }

    #[inline]
    fn eval_at(&self, i: usize) -> Result<L::Value> {
        self.functor
            .apply(self.lhs.eval_at(i)?, self.rhs.eval_at(i)?)
    }
}

// ── Constant ────────────────────────────────────────────────────────

/// One scalar repeated `size` times; lifts scalar operands into expressions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T> {
    value: T,
    size: usize,
}

impl<T> Constant<T> {
    pub fn new(value: T, size: usize) -> Self {
        Self { value, size }
    }
}

impl<T: Scalar> VectorExpression for Constant<T> {
    type Value = T;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn eval_at(&self, _: usize) -> Result<T> {
        Ok(self.value)
    }
}

// ── Promoted ────────────────────────────────────────────────────────

/// Coerces every element of `E` into `U`.
#[derive(Debug)]
pub struct Promoted<E, U> {
    expr: E,
    _to: PhantomData<fn() -> U>,
}

impl<E: Clone, U> Clone for Promoted<E, U> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _to: PhantomData,
        }
    }
}

impl<E: Copy, U> Copy for Promoted<E, U> {}

impl<E, U> Promoted<E, U> {
    pub fn new(expr: E) -> Self {
        Self {
            expr,
            _to: PhantomData,
        }
    }
}

impl<E, U> VectorExpression for Promoted<E, U>
where
    E: VectorExpression,
    E::Value: Promote<U>,
    U: Scalar,
{
    type Value = U;

    #[inline]
    fn size(&self) -> usize {
        self.expr.size()
    }

    fn validate(&self) -> Result<()> {
        self.expr.validate()
    }

    #[inline]
    fn eval_at(&self, i: usize) -> Result<U> {
        Ok(self.expr.eval_at(i)?.promote())
    }
}

/// Lazily coerce the elements of `expr` into `U`.
///
/// Mixed Real/Complex arithmetic goes through an explicit promotion:
///
/// ```
/// use numcore::{Complex64, Vector, VectorExpression};
/// use numcore::expr::promote;
///
/// let re = Vector::from([1.0_f64, 2.0]);
/// let z = Vector::from([Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)]);
/// let sum = (promote::<Complex64, _>(&re) + &z).evaluate().unwrap();
/// assert_eq!(sum[0], Complex64::new(1.0, 1.0));
/// assert_eq!(sum[1], Complex64::new(3.0, 0.0));
/// ```
pub fn promote<U, E>(expr: E) -> Promoted<E, U>
where
    E: VectorExpression,
    E::Value: Promote<U>,
    U: Scalar,
{
    Promoted::new(expr)
}

//! Matrix expressions: a vector expression over the column-major buffer
//! plus a shape.
//!
//! Every operator here is derived from the vector operators: `A + B` is
//! `underlying(A) + underlying(B)` tagged with the common shape. The shape
//! check happens when the node is built and is recorded, so `validate()`
//! (and therefore `evaluate()`) reports it later.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::banded::BandedMatrix;
use crate::dual::Dual;
use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;
use crate::traits::{Promote, Scalar};
use crate::vector::Vector;

use super::functors::{BinaryFunctor, Divide, Minus, Multiply, Negate, Plus};
use super::{BinaryOp, Constant, Promoted, UnaryOp, VectorExpression};

// ── Shapes ──────────────────────────────────────────────────────────

/// Logical shape of a matrix expression and the container it evaluates into.
pub trait Shape: Copy + PartialEq + Debug {
    type Container<T: Scalar>;

    /// Length of the underlying buffer.
    fn len(&self) -> usize;

    /// Compatibility check for an elementwise operation named `op`.
    fn check(&self, other: &Self, op: &'static str) -> Result<()>;

    /// Wrap an evaluated buffer of length [`len`](Shape::len).
    fn assemble<T: Scalar>(self, underlying: Vector<T>) -> Self::Container<T>;
}

/// Shapes whose every stored element is a logical element.
///
/// Only these support operations that do not map zero to zero.
pub trait FullStorage: Shape {}

/// An `rows × cols` dense matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dense {
    pub rows: usize,
    pub cols: usize,
}

impl Shape for Dense {
    type Container<T: Scalar> = DenseMatrix<T>;

    #[inline]
    fn len(&self) -> usize {
        self.rows * self.cols
    }

    fn check(&self, other: &Self, op: &'static str) -> Result<()> {
        if self != other {
            return Err(Error::Mismatch2D {
                op,
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        Ok(())
    }

    fn assemble<T: Scalar>(self, underlying: Vector<T>) -> DenseMatrix<T> {
        DenseMatrix::from_parts(self.rows, self.cols, underlying)
    }
}

impl FullStorage for Dense {}

/// A square banded matrix of the given order and half-bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub order: usize,
    pub half_bandwidth: usize,
}

impl Shape for Band {
    type Container<T: Scalar> = BandedMatrix<T>;

    #[inline]
    fn len(&self) -> usize {
        self.order * (3 * self.half_bandwidth + 1)
    }

    fn check(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.order != other.order {
            return Err(Error::Mismatch2D {
                op,
                lhs: (self.order, self.order),
                rhs: (other.order, other.order),
            });
        }
        if self.half_bandwidth != other.half_bandwidth {
            return Err(Error::invalid(
                "half_bandwidth",
                other.half_bandwidth,
                self.half_bandwidth,
            ));
        }
        Ok(())
    }

    fn assemble<T: Scalar>(self, underlying: Vector<T>) -> BandedMatrix<T> {
        BandedMatrix::from_parts(self.order, self.half_bandwidth, underlying)
    }
}

// ── MatrixExpression ────────────────────────────────────────────────

/// Element type of a matrix expression.
pub type ElementOf<M> = <<M as MatrixExpression>::Inner as VectorExpression>::Value;

/// A matrix-shaped expression backed by a vector expression over the
/// column-major underlying buffer.
///
/// Implemented by `&DenseMatrix<T>`, `&BandedMatrix<T>` (the leaves) and by
/// [`MatrixExpr`].
///
/// ```
/// use numcore::{DenseMatrix, MatrixExpression};
///
/// let a = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]).unwrap();
/// let b = DenseMatrix::identity(2);
/// let c = (&a + &b * 2.0).evaluate().unwrap();
/// assert_eq!(c[(0, 0)], 3.0);
/// assert_eq!(c[(0, 1)], 2.0);
/// ```
pub trait MatrixExpression: Sized {
    type Shape: Shape;
    type Inner: VectorExpression;

    /// Whether this expression references a container directly.
    const IS_LEAF: bool = false;

    fn shape(&self) -> Self::Shape;

    /// The shape-compatibility status recorded while building the tree.
    fn validate(&self) -> Result<()>;

    /// The vector expression over the underlying buffer.
    fn into_inner(self) -> Self::Inner;

    /// Validate, then materialise into a new container.
    fn evaluate(self) -> Result<<Self::Shape as Shape>::Container<ElementOf<Self>>> {
        self.validate()?;
        let shape = self.shape();
        let data = self.into_inner().collect_values()?;
        Ok(shape.assemble(Vector::from_vec(data)))
    }

    /// Elementwise (Hadamard) product.
    ///
    /// Only for shapes whose stored elements are all logical elements, so
    /// banded operands do not compile:
    ///
    /// ```compile_fail
    /// use numcore::{BandedMatrix, MatrixExpression};
    ///
    /// let band = BandedMatrix::<f64>::identity(3, 1);
    /// let _ = (&band).component_mul(&band);
    /// ```
    fn component_mul<R>(
        self,
        rhs: R,
    ) -> MatrixExpr<BinaryOp<Multiply, Self::Inner, R::Inner>, Self::Shape>
    where
        Self::Shape: FullStorage,
        R: MatrixExpression<Shape = Self::Shape>,
        R::Inner: VectorExpression<Value = ElementOf<Self>>,
    {
        zip_with(Multiply, self, rhs)
    }

    /// Elementwise quotient; an exact-zero divisor fails at evaluation.
    ///
    /// ```compile_fail
    /// use numcore::{BandedMatrix, MatrixExpression};
    ///
    /// let band = BandedMatrix::<f64>::identity(3, 1);
    /// let _ = (&band).component_div(&band);
    /// ```
    fn component_div<R>(
        self,
        rhs: R,
    ) -> MatrixExpr<BinaryOp<Divide, Self::Inner, R::Inner>, Self::Shape>
    where
        Self::Shape: FullStorage,
        R: MatrixExpression<Shape = Self::Shape>,
        R::Inner: VectorExpression<Value = ElementOf<Self>>,
    {
        zip_with(Divide, self, rhs)
    }

    /// Lazily coerce the element type into `U`.
    fn promote<U>(self) -> MatrixExpr<Promoted<Self::Inner, U>, Self::Shape>
    where
        U: Scalar,
        ElementOf<Self>: Promote<U>,
    {
        MatrixExpr::lift(self).map_inner(Promoted::new)
    }
}

/// Combine two matrix expressions elementwise, recording the shape check.
fn zip_with<F, L, R>(
    functor: F,
    lhs: L,
    rhs: R,
) -> MatrixExpr<BinaryOp<F, L::Inner, R::Inner>, L::Shape>
where
    F: BinaryFunctor<ElementOf<L>>,
    L: MatrixExpression,
    R: MatrixExpression<Shape = L::Shape>,
{
    let shape = lhs.shape();
    let status = lhs
        .validate()
        .and(rhs.validate())
        .and_then(|()| shape.check(&rhs.shape(), F::NAME));
    MatrixExpr {
        inner: BinaryOp::new(functor, lhs.into_inner(), rhs.into_inner()),
        shape,
        status,
    }
}

/// Combine a matrix expression with a scalar broadcast over its buffer.
fn with_scalar<F, M>(
    functor: F,
    m: M,
    k: ElementOf<M>,
) -> MatrixExpr<BinaryOp<F, M::Inner, Constant<ElementOf<M>>>, M::Shape>
where
    M: MatrixExpression,
{
    MatrixExpr::lift(m).map_inner(|inner| {
        let n = inner.size();
        BinaryOp::new(functor, inner, Constant::new(k, n))
    })
}

fn scalar_with<F, M>(
    functor: F,
    k: ElementOf<M>,
    m: M,
) -> MatrixExpr<BinaryOp<F, Constant<ElementOf<M>>, M::Inner>, M::Shape>
where
    M: MatrixExpression,
{
    MatrixExpr::lift(m).map_inner(|inner| {
        let n = inner.size();
        BinaryOp::new(functor, Constant::new(k, n), inner)
    })
}

// ── Leaves ──────────────────────────────────────────────────────────

impl<'a, T: Scalar> MatrixExpression for &'a DenseMatrix<T> {
    type Shape = Dense;
    type Inner = &'a Vector<T>;
    const IS_LEAF: bool = true;

    #[inline]
    fn shape(&self) -> Dense {
        Dense {
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    #[inline]
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn into_inner(self) -> &'a Vector<T> {
        self.underlying()
    }
}

impl<'a, T: Scalar> MatrixExpression for &'a BandedMatrix<T> {
    type Shape = Band;
    type Inner = &'a Vector<T>;
    const IS_LEAF: bool = true;

    #[inline]
    fn shape(&self) -> Band {
        Band {
            order: self.order(),
            half_bandwidth: self.half_bandwidth(),
        }
    }

    #[inline]
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn into_inner(self) -> &'a Vector<T> {
        self.underlying()
    }
}

// ── MatrixExpr ──────────────────────────────────────────────────────

/// A vector expression `E` over an underlying buffer of shape `S`.
#[derive(Debug, Clone)]
pub struct MatrixExpr<E, S> {
    inner: E,
    shape: S,
    status: Result<()>,
}

impl<E: VectorExpression, S: Shape> MatrixExpr<E, S> {
    /// Tag `inner` with `shape`. `inner.size()` must equal `shape.len()`.
    pub fn new(inner: E, shape: S) -> Self {
        let status = if inner.size() == shape.len() {
            Ok(())
        } else {
            Err(Error::invalid("underlying length", inner.size(), shape.len()))
        };
        Self {
            inner,
            shape,
            status,
        }
    }
}

impl<E, S: Shape> MatrixExpr<E, S> {
    /// Wrap any matrix expression, keeping its recorded status.
    pub fn lift<M>(m: M) -> MatrixExpr<M::Inner, M::Shape>
    where
        M: MatrixExpression<Shape = S, Inner = E>,
    {
        let shape = m.shape();
        let status = m.validate();
        MatrixExpr {
            inner: m.into_inner(),
            shape,
            status,
        }
    }

    /// Replace the inner expression, keeping shape and status.
    pub fn map_inner<G>(self, f: impl FnOnce(E) -> G) -> MatrixExpr<G, S> {
        MatrixExpr {
            inner: f(self.inner),
            shape: self.shape,
            status: self.status,
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: VectorExpression, S: Shape> MatrixExpression for MatrixExpr<E, S> {
    type Shape = S;
    type Inner = E;

    #[inline]
    fn shape(&self) -> S {
        self.shape
    }

    fn validate(&self) -> Result<()> {
        self.status.clone()?;
        self.inner.validate()
    }

    #[inline]
    fn into_inner(self) -> E {
        self.inner
    }
}

// ── Operators ───────────────────────────────────────────────────────

macro_rules! impl_matrix_scalar {
    ([$($g:tt)*] $ty:ty; $s:ty) => {
        impl<$($g)*> Mul<$s> for $ty
        where
            $ty: MatrixExpression,
            <$ty as MatrixExpression>::Inner: VectorExpression<Value = $s>,
        {
            type Output = MatrixExpr<
                BinaryOp<Multiply, <$ty as MatrixExpression>::Inner, Constant<$s>>,
                <$ty as MatrixExpression>::Shape,
            >;

            #[inline]
            fn mul(self, k: $s) -> Self::Output {
                with_scalar(Multiply, self, k)
            }
        }

        impl<$($g)*> Div<$s> for $ty
        where
            $ty: MatrixExpression,
            <$ty as MatrixExpression>::Inner: VectorExpression<Value = $s>,
        {
            type Output = MatrixExpr<
                BinaryOp<Divide, <$ty as MatrixExpression>::Inner, Constant<$s>>,
                <$ty as MatrixExpression>::Shape,
            >;

            #[inline]
            fn div(self, k: $s) -> Self::Output {
                with_scalar(Divide, self, k)
            }
        }

        impl<$($g)*> Mul<$ty> for $s
        where
            $ty: MatrixExpression,
            <$ty as MatrixExpression>::Inner: VectorExpression<Value = $s>,
        {
            type Output = MatrixExpr<
                BinaryOp<Multiply, Constant<$s>, <$ty as MatrixExpression>::Inner>,
                <$ty as MatrixExpression>::Shape,
            >;

            #[inline]
            fn mul(self, m: $ty) -> Self::Output {
                scalar_with(Multiply, self, m)
            }
        }
    };
}

macro_rules! impl_matrix_ops {
    ($([$($g:tt)*] $ty:ty;)*) => {
        $(
            impl<$($g)*, Rhs> Add<Rhs> for $ty
            where
                $ty: MatrixExpression,
                Rhs: MatrixExpression<Shape = <$ty as MatrixExpression>::Shape>,
                Rhs::Inner: VectorExpression<Value = ElementOf<$ty>>,
            {
                type Output = MatrixExpr<
                    BinaryOp<Plus, <$ty as MatrixExpression>::Inner, Rhs::Inner>,
                    <$ty as MatrixExpression>::Shape,
                >;

                #[inline]
                fn add(self, rhs: Rhs) -> Self::Output {
                    zip_with(Plus, self, rhs)
                }
            }

            impl<$($g)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: MatrixExpression,
                Rhs: MatrixExpression<Shape = <$ty as MatrixExpression>::Shape>,
                Rhs::Inner: VectorExpression<Value = ElementOf<$ty>>,
            {
                type Output = MatrixExpr<
                    BinaryOp<Minus, <$ty as MatrixExpression>::Inner, Rhs::Inner>,
                    <$ty as MatrixExpression>::Shape,
                >;

                #[inline]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    zip_with(Minus, self, rhs)
                }
            }

            impl<$($g)*> Neg for $ty
            where
                $ty: MatrixExpression,
            {
                type Output = MatrixExpr<
                    UnaryOp<Negate, <$ty as MatrixExpression>::Inner>,
                    <$ty as MatrixExpression>::Shape,
                >;

                #[inline]
                fn neg(self) -> Self::Output {
                    MatrixExpr::lift(self).map_inner(|inner| UnaryOp::new(Negate, inner))
                }
            }

            impl_matrix_scalar!([$($g)*] $ty; f64);
            impl_matrix_scalar!([$($g)*] $ty; Complex64);
            impl_matrix_scalar!([$($g)*, const N: usize] $ty; Dual<N, f64>);
            impl_matrix_scalar!([$($g)*, const N: usize] $ty; Dual<N, Complex64>);
        )*
    };
}

impl_matrix_ops! {
    ['a, T] &'a DenseMatrix<T>;
    ['a, T] &'a BandedMatrix<T>;
    [E, S] MatrixExpr<E, S>;
}

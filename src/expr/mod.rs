//! Deferred elementwise arithmetic over vectors and matrices.
//!
//! Arithmetic on borrowed containers builds a tree of nodes instead of
//! computing anything. Leaves borrow containers (`&Vector<T>`,
//! `&DenseMatrix<T>`, `&BandedMatrix<T>`); inner nodes own their children.
//! Nothing is allocated until the tree is evaluated, which happens in a
//! single increasing sweep over the underlying buffer.
//!
//! ```
//! use numcore::{Vector, VectorExpression};
//! use numcore::expr;
//!
//! let a = Vector::from([0.0_f64, 1.0, 2.0]);
//! let b = Vector::from([1.0_f64, 1.0, 1.0]);
//!
//! // exp(a) * 2 - b, evaluated once
//! let e = expr::exp(&a) * 2.0 - &b;
//! let v = e.evaluate().unwrap();
//! assert_eq!(v[0], 1.0);
//! assert!((v[2] - (2.0 * 2.0_f64.exp() - 1.0)).abs() < 1e-12);
//! ```
//!
//! Matrix arithmetic is the same machinery applied to the column-major
//! underlying buffer, wrapped in [`MatrixExpr`] to carry the shape; see
//! [`MatrixExpression`].
//!
//! Shape errors do not panic: they are reported by `validate()`, which every
//! evaluation entry point calls first.

mod funcs;
pub mod functors;
mod matrix;
mod nodes;
mod ops;

pub use funcs::{
    abs, acos, acosh, asin, asinh, atan, atanh, cos, cosh, exp, identity, log, pow, sgn, sin,
    sinh, sqrt, tan, tanh, Pointwise,
};
pub use functors::{BinaryFunctor, UnaryFunctor};
pub use matrix::{Band, Dense, ElementOf, FullStorage, MatrixExpr, MatrixExpression, Shape};
pub use nodes::{promote, BinaryOp, Constant, Promoted, UnaryOp};

use crate::error::{Error, Result};
use crate::traits::Scalar;
use crate::vector::Vector;

/// An indexable, sized sequence of elements computed on demand.
///
/// Implemented by borrowed vectors (the leaves) and by every node type.
pub trait VectorExpression {
    type Value: Scalar;

    /// Whether this node references a container directly.
    const IS_LEAF: bool = false;

    fn size(&self) -> usize;

    /// Check shape compatibility of the whole tree.
    fn validate(&self) -> Result<()>;

    /// Element `i`, for `i < size()`. Only elementwise division can fail.
    fn eval_at(&self, i: usize) -> Result<Self::Value>;

    /// Validate, then compute every element in increasing index order.
    fn collect_values(&self) -> Result<Vec<Self::Value>> {
        self.validate()?;
        (0..self.size()).map(|i| self.eval_at(i)).collect()
    }

    /// Materialise into a new [`Vector`].
    fn evaluate(&self) -> Result<Vector<Self::Value>> {
        self.collect_values().map(Vector::from_vec)
    }

    /// L1 norm of the evaluated expression, without materialising it.
    fn norm_l1(&self) -> Result<f64> {
        self.validate()?;
        let mut sum = 0.0;
        for i in 0..self.size() {
            sum += self.eval_at(i)?.modulus();
        }
        Ok(sum)
    }

    /// L2 norm of the evaluated expression, without materialising it.
    fn norm_l2(&self) -> Result<f64> {
        self.validate()?;
        let mut sum = 0.0;
        for i in 0..self.size() {
            let m = self.eval_at(i)?.modulus();
            sum += m * m;
        }
        Ok(sum.sqrt())
    }

    /// L∞ norm of the evaluated expression, without materialising it.
    fn norm_linf(&self) -> Result<f64> {
        self.validate()?;
        let mut max = 0.0_f64;
        for i in 0..self.size() {
            max = max.max(self.eval_at(i)?.modulus());
        }
        Ok(max)
    }
}

/// Inner product `Σ lhs[i]·rhs[i]` of two expressions (a reduction, not a node).
///
/// No argument is conjugated for complex elements.
///
/// ```
/// use numcore::{Error, Vector};
/// use numcore::expr::dot;
///
/// let a = Vector::from([1.0_f64, 2.0]);
/// let b = Vector::from([3.0_f64, 4.0]);
/// assert_eq!(dot(&a + &b, &b), Ok(4.0 * 3.0 + 6.0 * 4.0));
///
/// let c = Vector::from([1.0_f64]);
/// assert!(matches!(dot(&a, &c), Err(Error::Mismatch1D { .. })));
/// ```
pub fn dot<L, R>(lhs: L, rhs: R) -> Result<L::Value>
where
    L: VectorExpression,
    R: VectorExpression<Value = L::Value>,
{
    lhs.validate()?;
    rhs.validate()?;
    if lhs.size() != rhs.size() {
        return Err(Error::Mismatch1D {
            op: "dot",
            lhs: lhs.size(),
            rhs: rhs.size(),
        });
    }
    let mut sum = <L::Value as num_traits::Zero>::zero();
    for i in 0..lhs.size() {
        sum += lhs.eval_at(i)? * rhs.eval_at(i)?;
    }
    Ok(sum)
}

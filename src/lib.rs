//! # numcore
//!
//! Dense and banded linear-algebra containers with deferred elementwise
//! arithmetic, forward-mode automatic differentiation, and thin adapters to
//! LAPACK's linear and generalised eigenvalue solvers.
//!
//! ## Quick start
//!
//! ```
//! use numcore::{Dual, Vector, VectorExpression};
//! use numcore::expr::{sin, pow};
//!
//! // d/dx sin(x² + 1) at x = 0.5
//! let x = Dual::<1, f64>::variable(0.5, 0);
//! let v = Vector::from([x]);
//! let y = sin(pow(&v, 2.0) + Dual::<1, f64>::constant(1.0)).evaluate().unwrap();
//! assert!((y[0].value - 1.25_f64.sin()).abs() < 1e-15);
//! assert!((y[0].dual[0] - 1.25_f64.cos()).abs() < 1e-15);
//! ```
//!
//! ## Modules
//!
//! - [`traits`]: [`Scalar`], the element algebra shared by Real (`f64`),
//!   Complex ([`Complex64`]) and [`Dual`] numbers, and [`Promote`] for
//!   explicit Real → Complex → Dual coercions.
//!
//! - [`dual`]: `Dual<N, T>`, a value plus `N` first-order partials, with
//!   chain-rule arithmetic and every elementwise function.
//!
//! - [`vector`]: [`Vector<T>`], contiguous, range-checked storage with
//!   norms, `dot`, and whitespace-separated text I/O.
//!
//! - [`matrix`]: [`DenseMatrix<T>`], column-major storage over a `Vector`,
//!   column norms, naive-loop products, text I/O (one line per column).
//!
//! - [`banded`]: [`BandedMatrix<T>`] in LAPACK general-band layout
//!   (`3k + 1` rows per column), band-checked setters and mat-vec.
//!
//! - [`expr`]: the expression engine. `&a + &b * 2.0` builds a tree of
//!   [`VectorExpression`] nodes; matrices wrap the same tree in a
//!   [`MatrixExpression`] over their underlying buffer. Nothing is computed
//!   until `evaluate()`.
//!
//! - [`linalg`]: [`DenseLinearSystem`], [`BandedLinearSystem`] and
//!   [`GeneralisedEigenvalueSystem`] over LAPACK.
//!
//! - [`error`] / [`report`]: one [`Error`] enum with structured payloads,
//!   and a [`Report`](report::Report) that renders it with its source
//!   location.
//!
//! ## Cargo features
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `lapack` | no      | Link LAPACK (OpenBLAS) and enable the solver adapters |
//!
//! Without `lapack` everything but `solve()` works; `solve()` fails with
//! [`Error::Unsupported`].

#[cfg(feature = "lapack")]
extern crate lapack_src;

pub mod banded;
pub mod dual;
pub mod error;
pub mod expr;
pub mod linalg;
pub mod matrix;
pub mod report;
pub mod traits;
pub mod vector;

pub use banded::BandedMatrix;
pub use dual::Dual;
pub use error::{Error, Result};
pub use expr::{MatrixExpression, VectorExpression};
pub use linalg::{
    BandedLinearSystem, DenseLinearSystem, Eigendatum, GeneralisedEigenvalueSystem,
};
pub use matrix::DenseMatrix;
pub use traits::{Promote, Scalar};
pub use vector::Vector;

pub use num_complex::Complex64;

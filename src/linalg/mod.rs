//! Adapters from the containers to LAPACK's linear and generalised
//! eigenvalue solvers.
//!
//! Each adapter borrows its operands mutably, checks their shapes when it is
//! built and again when it is solved, and hands the column-major buffers to
//! the backend. `solve` consumes the adapter because the backend overwrites
//! the matrices with factorisation data.
//!
//! | Adapter | Real | Complex | Routine |
//! |---------|------|---------|---------|
//! | [`DenseLinearSystem`] | yes | yes | `?gesv` |
//! | [`BandedLinearSystem`] | yes | yes | `?gbsv` |
//! | [`GeneralisedEigenvalueSystem`] | no | yes | `zggev` |
//!
//! The backend is only linked with the `lapack` Cargo feature; otherwise
//! every `solve` fails with [`Error::Unsupported`](crate::Error::Unsupported).

mod backend;
mod banded;
mod dense;
mod eigen;

pub use backend::{EigenScalar, LapackScalar, QzOutput};
pub use banded::BandedLinearSystem;
pub use dense::DenseLinearSystem;
pub use eigen::{Eigendatum, GeneralisedEigenvalueSystem};

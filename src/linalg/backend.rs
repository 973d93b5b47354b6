//! Element-type dispatch onto LAPACK.
//!
//! Buffers are passed as column-major slices. `Complex64` is `#[repr(C)]`
//! with the real part first, which is exactly LAPACK's `c64`, so complex
//! containers go to the `z*` routines without conversion.
//!
//! Without the `lapack` feature every routine fails with
//! [`Error::Unsupported`].

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::traits::Scalar;

/// Element types with a dense and a banded LU solver.
pub trait LapackScalar: Scalar {
    /// Solve `A·X = B` in place: `a` is `n × n`, `b` holds `nrhs` columns of
    /// length `n` and is overwritten with `X`, `a` with its LU factors.
    fn gesv(n: usize, a: &mut [Self], b: &mut [Self], nrhs: usize) -> Result<()>;

    /// Banded counterpart of [`gesv`](LapackScalar::gesv) with `kl = ku = k`
    /// on a `(3k + 1) × n` band-storage buffer.
    fn gbsv(n: usize, k: usize, ab: &mut [Self], b: &mut [Self], nrhs: usize) -> Result<()>;
}

/// Raw output of the QZ generalised eigensolver.
#[derive(Debug, Clone, PartialEq)]
pub struct QzOutput<T> {
    pub alpha: Vec<T>,
    pub beta: Vec<T>,
    /// Right eigenvectors, column `j` belongs to `alpha[j] / beta[j]`.
    pub vectors: Vec<T>,
}

/// Element types with a generalised eigensolver (`A·v = λ·B·v`).
pub trait EigenScalar: LapackScalar {
    /// Both `a` and `b` are `n × n` and are overwritten.
    fn ggev(n: usize, a: &mut [Self], b: &mut [Self]) -> Result<QzOutput<Self>>;
}

#[cfg(feature = "lapack")]
fn check_info(routine: &'static str, info: i32) -> Result<()> {
    if info != 0 {
        log::warn!("{} returned info = {}", routine, info);
        return Err(Error::Backend {
            routine,
            code: info,
        });
    }
    Ok(())
}

/// A dimension as LAPACK's 32-bit integer, or [`Error::InvalidArgument`]
/// if it does not fit.
#[cfg_attr(not(feature = "lapack"), allow(dead_code))]
fn lapack_int(argument: &'static str, n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| Error::invalid(argument, n, format!("at most {}", i32::MAX)))
}

#[cfg(feature = "lapack")]
mod ffi {
    use super::*;

    /// Leading dimension; LAPACK wants at least 1 even for empty matrices.
    #[inline]
    fn ld(n: usize) -> Result<i32> {
        lapack_int("leading dimension", n.max(1))
    }

    macro_rules! impl_lapack_scalar {
        ($t:ty, $gesv:ident, $gbsv:ident) => {
            impl LapackScalar for $t {
                fn gesv(n: usize, a: &mut [Self], b: &mut [Self], nrhs: usize) -> Result<()> {
                    let order = lapack_int("order", n)?;
                    let nrhs = lapack_int("nrhs", nrhs)?;
                    let lda = ld(n)?;
                    let mut ipiv = vec![0_i32; n];
                    let mut info = 0;
                    unsafe {
                        lapack::$gesv(order, nrhs, a, lda, &mut ipiv, b, lda, &mut info);
                    }
                    check_info(stringify!($gesv), info)
                }

                fn gbsv(
                    n: usize,
                    k: usize,
                    ab: &mut [Self],
                    b: &mut [Self],
                    nrhs: usize,
                ) -> Result<()> {
                    let order = lapack_int("order", n)?;
                    let band = lapack_int("half_bandwidth", k)?;
                    let nrhs = lapack_int("nrhs", nrhs)?;
                    let ldab = lapack_int("leading dimension", 3 * k + 1)?;
                    let ldb = ld(n)?;
                    let mut ipiv = vec![0_i32; n];
                    let mut info = 0;
                    unsafe {
                        lapack::$gbsv(
                            order, band, band, nrhs, ab, ldab, &mut ipiv, b, ldb, &mut info,
                        );
                    }
                    check_info(stringify!($gbsv), info)
                }
            }
        };
    }

    impl_lapack_scalar!(f64, dgesv, dgbsv);
    impl_lapack_scalar!(Complex64, zgesv, zgbsv);

    impl EigenScalar for Complex64 {
        fn ggev(n: usize, a: &mut [Self], b: &mut [Self]) -> Result<QzOutput<Self>> {
            let order = lapack_int("order", n)?;
            let lda = ld(n)?;
            let zero = Complex64::new(0.0, 0.0);
            let mut alpha = vec![zero; n];
            let mut beta = vec![zero; n];
            let mut vl = vec![zero; 1];
            let mut vr = vec![zero; n * n];
            let mut rwork = vec![0.0; 8 * n.max(1)];
            let mut info = 0;

            // workspace query
            let mut work = vec![zero; 1];
            unsafe {
                lapack::zggev(
                    b'N',
                    b'V',
                    order,
                    a,
                    lda,
                    b,
                    lda,
                    &mut alpha,
                    &mut beta,
                    &mut vl,
                    1,
                    &mut vr,
                    lda,
                    &mut work,
                    -1,
                    &mut rwork,
                    &mut info,
                );
            }
            check_info("zggev", info)?;

            let lwork = (work[0].re as usize).max(2 * n).max(1);
            let mut work = vec![zero; lwork];
            let lwork = lapack_int("lwork", lwork)?;
            unsafe {
                lapack::zggev(
                    b'N',
                    b'V',
                    order,
                    a,
                    lda,
                    b,
                    lda,
                    &mut alpha,
                    &mut beta,
                    &mut vl,
                    1,
                    &mut vr,
                    lda,
                    &mut work,
                    lwork,
                    &mut rwork,
                    &mut info,
                );
            }
            check_info("zggev", info)?;

            Ok(QzOutput {
                alpha,
                beta,
                vectors: vr,
            })
        }
    }
}

#[cfg(not(feature = "lapack"))]
mod fallback {
    use super::*;

    macro_rules! impl_unsupported {
        ($t:ty, $gesv:literal, $gbsv:literal) => {
            impl LapackScalar for $t {
                fn gesv(_: usize, _: &mut [Self], _: &mut [Self], _: usize) -> Result<()> {
                    Err(Error::Unsupported { operation: $gesv })
                }

                fn gbsv(
                    _: usize,
                    _: usize,
                    _: &mut [Self],
                    _: &mut [Self],
                    _: usize,
                ) -> Result<()> {
                    Err(Error::Unsupported { operation: $gbsv })
                }
            }
        };
    }

    impl_unsupported!(f64, "dgesv", "dgbsv");
    impl_unsupported!(Complex64, "zgesv", "zgbsv");

    impl EigenScalar for Complex64 {
        fn ggev(_: usize, _: &mut [Self], _: &mut [Self]) -> Result<QzOutput<Self>> {
            Err(Error::Unsupported { operation: "zggev" })
        }
    }
}

use log::debug;

use crate::banded::BandedMatrix;
use crate::error::{Error, Result};
use crate::vector::Vector;

use super::backend::LapackScalar;

/// `A·x = b` for a banded `A`, solved by banded LU with `kl = ku = k`.
///
/// The band-storage buffer of `A` already has the `k` scratch rows the
/// factorisation needs, so it is handed to the backend as is. After
/// [`solve`](BandedLinearSystem::solve), `b` holds `x` and `A` holds its
/// LU factors.
#[derive(Debug)]
pub struct BandedLinearSystem<'a, T> {
    a: &'a mut BandedMatrix<T>,
    b: &'a mut Vector<T>,
}

impl<'a, T: LapackScalar> BandedLinearSystem<'a, T> {
    /// Bind `A` and `b`; fails with [`Error::Mismatch2D`] if `b` does not
    /// have `A.order()` elements.
    pub fn new(a: &'a mut BandedMatrix<T>, b: &'a mut Vector<T>) -> Result<Self> {
        check_banded(a, b)?;
        Ok(Self { a, b })
    }

    pub fn matrix_mut(&mut self) -> &mut BandedMatrix<T> {
        self.a
    }

    pub fn rhs_mut(&mut self) -> &mut Vector<T> {
        self.b
    }

    /// Solve in place, overwriting `b` with `x`.
    pub fn solve(self) -> Result<()> {
        check_banded(self.a, self.b)?;
        let n = self.a.order();
        let k = self.a.half_bandwidth();
        debug!("banded solve: n = {}, kl = ku = {}", n, k);
        T::gbsv(n, k, self.a.as_mut_slice(), self.b.as_mut_slice(), 1)
    }
}

fn check_banded<T>(a: &BandedMatrix<T>, b: &Vector<T>) -> Result<()> {
    if b.len() != a.order() {
        return Err(Error::Mismatch2D {
            op: "solve",
            lhs: a.shape(),
            rhs: (b.len(), 1),
        });
    }
    Ok(())
}

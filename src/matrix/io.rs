use core::fmt;
use std::io::Read;

use crate::error::{Error, Result};
use crate::traits::Scalar;
use crate::vector::Vector;

use super::DenseMatrix;

// ── Text streams ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Parse whitespace-separated scalars into a `rows × cols` matrix.
    ///
    /// Tokens fill the column-major buffer in order, so each run of `rows`
    /// tokens is one column: text laid out one line per row describes the
    /// transpose. Line breaks carry no meaning. Fails with
    /// [`Error::InvalidArgument`] unless exactly `rows * cols` scalars parse.
    ///
    /// ```
    /// use numcore::DenseMatrix;
    ///
    /// let m: DenseMatrix<f64> = DenseMatrix::parse(2, 2, "1 2\n3 4").unwrap();
    /// assert_eq!(m[(1, 0)], 2.0);
    /// assert_eq!(m[(0, 1)], 3.0);
    /// assert!(DenseMatrix::<f64>::parse(2, 2, "1 2 3").is_err());
    /// ```
    pub fn parse(rows: usize, cols: usize, text: &str) -> Result<Self> {
        let underlying = Vector::parse(text);
        if underlying.len() != rows * cols {
            return Err(Error::invalid(
                "scalar count",
                underlying.len(),
                format!("{} ({}x{})", rows * cols, rows, cols),
            ));
        }
        Ok(Self::from_parts(rows, cols, underlying))
    }

    /// [`parse`](DenseMatrix::parse) everything `reader` yields.
    pub fn read_from(rows: usize, cols: usize, mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(rows, cols, &text)
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// One line per column, entries separated by single spaces.
impl<T: fmt::Display> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows() == 0 {
            for _ in 0..self.cols() {
                writeln!(f)?;
            }
            return Ok(());
        }
        for column in self.as_slice().chunks(self.rows()) {
            for (i, x) in column.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex64;

    #[test]
    fn text_is_the_transpose() {
        let m: DenseMatrix<f64> = DenseMatrix::parse(2, 3, "1 2\n3 4\n5 6\n").unwrap();
        assert_eq!(m.column(0).unwrap(), &[1.0, 2.0]);
        assert_eq!(m.column(2).unwrap(), &[5.0, 6.0]);
        assert_eq!(m.to_string(), "1 2\n3 4\n5 6\n");
    }

    #[test]
    fn empty_columns_still_get_a_line() {
        assert_eq!(DenseMatrix::<f64>::new(0, 3).to_string(), "\n\n\n");
        assert_eq!(DenseMatrix::<f64>::new(2, 0).to_string(), "");
    }

    #[test]
    fn round_trip_through_display() {
        let m = DenseMatrix::from_fn(3, 2, |i, j| (i as f64) - 0.5 * (j as f64));
        let back = DenseMatrix::parse(3, 2, &m.to_string()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn wrong_count() {
        let err = DenseMatrix::<f64>::parse(2, 2, "1 2 3 4 5").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { argument: "scalar count", .. }));
    }

    #[test]
    fn complex_from_reader() {
        let text = "(1,2) 3-1i";
        let m = DenseMatrix::<Complex64>::read_from(2, 1, text.as_bytes()).unwrap();
        assert_eq!(m[(0, 0)], Complex64::new(1.0, 2.0));
        assert_eq!(m[(1, 0)], Complex64::new(3.0, -1.0));
    }
}

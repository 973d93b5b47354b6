use core::fmt;
use core::str::FromStr;
use std::io::Read;

use crate::error::{Error, Result};
use crate::traits::Scalar;

use super::Vector;

// ── Text streams ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Read whitespace-separated scalars left to right, stopping at the end
    /// of the input or at the first token that does not parse.
    ///
    /// ```
    /// use numcore::Vector;
    /// let v: Vector<f64> = Vector::parse("1 2.5\n-3 oops 4");
    /// assert_eq!(v.as_slice(), &[1.0, 2.5, -3.0]);
    /// ```
    pub fn parse(text: &str) -> Self {
        text.split_whitespace()
            .map_while(T::parse_token)
            .collect()
    }

    /// [`parse`](Vector::parse) everything `reader` yields.
    pub fn read_from(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }
}

impl<T: Scalar> FromStr for Vector<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s))
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Elements separated by single spaces, no trailing newline.
impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

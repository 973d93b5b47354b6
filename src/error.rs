use thiserror::Error;

/// Errors raised by containers, expressions and solver adapters.
///
/// Every variant carries a structured payload. Formatting of banners and
/// source locations lives in [`Report`](crate::report::Report), not here.
///
/// ```
/// use numcore::{Error, Vector};
///
/// let v = Vector::new(10, 0.0_f64);
/// assert_eq!(v.at(10).unwrap_err(), Error::OutOfRange1D { index: 10, size: 10 });
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indexed access outside a vector.
    #[error("index {index} out of range for length {size}")]
    OutOfRange1D { index: usize, size: usize },

    /// Indexed access outside a matrix.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange2D {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Binary operation between vectors of different lengths.
    #[error("{op}: length mismatch ({lhs} vs {rhs})")]
    Mismatch1D {
        op: &'static str,
        lhs: usize,
        rhs: usize,
    },

    /// Binary operation between matrices of incompatible shape.
    #[error("{op}: shape mismatch ({}x{} vs {}x{})", lhs.0, lhs.1, rhs.0, rhs.1)]
    Mismatch2D {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Structurally valid input that violates a contract.
    #[error("invalid argument `{argument}`: got {value}, expected {expected}")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        expected: String,
    },

    /// Scalar or elementwise division by an exact zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The numerical backend returned a nonzero status code.
    #[error("{routine} failed with info = {code}")]
    Backend { routine: &'static str, code: i32 },

    /// The operation needs a backend this build does not include.
    #[error("{operation} requires the `lapack` feature")]
    Unsupported { operation: &'static str },

    /// Reading a scalar stream failed.
    #[error("i/o error: {message}")]
    FileIo { message: String },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Abstract kind of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::OutOfRange1D { .. } => "OutOfRange1D",
            Error::OutOfRange2D { .. } => "OutOfRange2D",
            Error::Mismatch1D { .. } => "Mismatch1D",
            Error::Mismatch2D { .. } => "Mismatch2D",
            Error::InvalidArgument { .. } => "InvalidArgument",
            Error::DivisionByZero => "DivisionByZero",
            Error::Backend { .. } => "BackendError",
            Error::Unsupported { .. } => "Unsupported",
            Error::FileIo { .. } => "FileIO",
        }
    }

    /// Structured payload as ordered `(name, value)` pairs.
    ///
    /// ```
    /// use numcore::Error;
    ///
    /// let e = Error::Mismatch1D { op: "add", lhs: 3, rhs: 4 };
    /// assert_eq!(
    ///     e.fields(),
    ///     vec![("op", "add".to_string()), ("lhs", "3".to_string()), ("rhs", "4".to_string())]
    /// );
    /// ```
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Error::OutOfRange1D { index, size } => {
                vec![("index", index.to_string()), ("size", size.to_string())]
            }
            Error::OutOfRange2D {
                row,
                col,
                rows,
                cols,
            } => vec![
                ("row", row.to_string()),
                ("col", col.to_string()),
                ("rows", rows.to_string()),
                ("cols", cols.to_string()),
            ],
            Error::Mismatch1D { op, lhs, rhs } => vec![
                ("op", op.to_string()),
                ("lhs", lhs.to_string()),
                ("rhs", rhs.to_string()),
            ],
            Error::Mismatch2D { op, lhs, rhs } => vec![
                ("op", op.to_string()),
                ("lhs", format!("{}x{}", lhs.0, lhs.1)),
                ("rhs", format!("{}x{}", rhs.0, rhs.1)),
            ],
            Error::InvalidArgument {
                argument,
                value,
                expected,
            } => vec![
                ("argument", argument.to_string()),
                ("value", value.clone()),
                ("expected", expected.clone()),
            ],
            Error::DivisionByZero => Vec::new(),
            Error::Backend { routine, code } => {
                vec![("routine", routine.to_string()), ("code", code.to_string())]
            }
            Error::Unsupported { operation } => vec![("operation", operation.to_string())],
            Error::FileIo { message } => vec![("message", message.clone())],
        }
    }

    pub(crate) fn invalid(
        argument: &'static str,
        value: impl ToString,
        expected: impl ToString,
    ) -> Self {
        Error::InvalidArgument {
            argument,
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::FileIo {
            message: e.to_string(),
        }
    }
}

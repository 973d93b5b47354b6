//! Human- and machine-readable rendering of [`Error`]s.
//!
//! A [`Report`] pairs an error with the source location of the call that
//! produced it. Construct one at the point where an error is surfaced to the
//! user:
//!
//! ```
//! use numcore::report::Report;
//! use numcore::Vector;
//!
//! let v = Vector::new(10, 0.0_f64);
//! let err = v.at(10).unwrap_err();
//! let report = Report::new(err);
//! let banner = report.banner();
//! assert!(banner.contains("OutOfRange1D"));
//! assert!(banner.contains("index"));
//! assert!(report.machine().starts_with("kind=OutOfRange1D"));
//! ```

use core::fmt;
use std::panic::Location;

use crate::error::Error;

const RULE_WIDTH: usize = 60;

/// An error plus the location it was reported from.
#[derive(Debug, Clone)]
pub struct Report {
    error: Error,
    location: &'static Location<'static>,
}

impl Report {
    /// Wrap `error`, recording the caller's source location.
    #[track_caller]
    pub fn new(error: Error) -> Self {
        Self {
            error,
            location: Location::caller(),
        }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Multi-line banner for terminals and logs.
    pub fn banner(&self) -> String {
        let title = format!(" {} ", self.error.kind());
        let pad = RULE_WIDTH.saturating_sub(title.len());
        let left = pad / 2;
        let mut out = String::new();
        out.push_str(&"=".repeat(left));
        out.push_str(&title);
        out.push_str(&"=".repeat(pad - left));
        out.push('\n');

        let fields = self.error.fields();
        let width = fields
            .iter()
            .map(|(k, _)| k.len())
            .chain(["message".len(), "location".len()])
            .max()
            .unwrap_or(0);

        out.push_str(&format!("{:<width$} : {}\n", "message", self.error));
        out.push_str(&format!(
            "{:<width$} : {}:{}:{}\n",
            "location",
            self.location.file(),
            self.location.line(),
            self.location.column()
        ));
        for (key, value) in fields {
            out.push_str(&format!("{key:<width$} : {value}\n"));
        }
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        out
    }

    /// Single `key=value` line, stable field order.
    pub fn machine(&self) -> String {
        let mut out = format!("kind={}", self.error.kind());
        for (key, value) in self.error.fields() {
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push_str(&value);
        }
        out.push_str(&format!(
            " file={} line={}",
            self.location.file(),
            self.location.line()
        ));
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.banner())
        } else {
            write!(
                f,
                "{} at {}:{}",
                self.error,
                self.location.file(),
                self.location.line()
            )
        }
    }
}

impl std::error::Error for Report {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<Error> for Report {
    #[track_caller]
    fn from(error: Error) -> Self {
        Report::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lists_payload() {
        let report = Report::new(Error::Mismatch1D {
            op: "dot",
            lhs: 3,
            rhs: 5,
        });
        let banner = report.banner();
        assert!(banner.starts_with('='));
        assert!(banner.contains(" Mismatch1D "));
        assert!(banner.contains("dot: length mismatch (3 vs 5)"));
        assert!(banner.contains("lhs"));
        assert!(banner.contains("report.rs"));
        assert_eq!(banner.lines().count(), 7);
    }

    #[test]
    fn machine_line() {
        let report = Report::new(Error::Backend {
            routine: "zgesv",
            code: -3,
        });
        let line = report.machine();
        assert!(line.starts_with("kind=BackendError routine=zgesv code=-3 file="));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn question_mark_conversion() {
        fn inner() -> Result<(), Report> {
            Err(Error::DivisionByZero)?;
            Ok(())
        }
        let report = inner().unwrap_err();
        assert_eq!(report.error(), &Error::DivisionByZero);
        assert_eq!(report.to_string().split(" at ").next(), Some("division by zero"));
    }
}

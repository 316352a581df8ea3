#![forbid(unsafe_code)]

//! Widget, chain, and form errors.

use std::fmt;
use std::io;

/// Everything that can go wrong building or running a form.
#[derive(Debug)]
pub enum Error {
    /// Bad geometry or missing required data.
    InvalidArgument(&'static str),
    /// The form or a widget does not fit where it has to go.
    Overflow {
        needed: (i32, i32),
        available: (i32, i32),
    },
    /// A chain's links are broken, or required content is absent.
    Fault(&'static str),
    /// The object is not in the chain, or an index is past the end.
    NotFound,
    /// The object is the only element of its chain.
    OnlyElement,
    /// A cursor value outside the accepted range.
    Range,
    /// No free slot in the widget kind registry.
    RegistryFull,
    /// A kind id that was never registered.
    UnknownKind(u16),
    /// The surface failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::Overflow { needed, available } => write!(
                f,
                "form needs {}x{} but only {}x{} is available",
                needed.0, needed.1, available.0, available.1
            ),
            Self::Fault(what) => write!(f, "fault: {what}"),
            Self::NotFound => write!(f, "object not found"),
            Self::OnlyElement => write!(f, "object is the only element of its chain"),
            Self::Range => write!(f, "cursor out of range"),
            Self::RegistryFull => write!(f, "widget kind registry is full"),
            Self::UnknownKind(id) => write!(f, "unknown widget kind {id}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_reports_both_sizes() {
        let err = Error::Overflow {
            needed: (40, 10),
            available: (30, 10),
        };
        assert_eq!(err.to_string(), "form needs 40x10 but only 30x10 is available");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error as _;
        let err = Error::from(io::Error::other("gone"));
        assert!(err.source().is_some());
        assert!(Error::NotFound.source().is_none());
    }
}

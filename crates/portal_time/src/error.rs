//! Error types for time-scale conversions.

use thiserror::Error;

/// Errors from Julian Day conversion or leap-second kernel loading.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// LSK file parsing failed.
    #[error("LSK parse error: {0}")]
    LskParse(String),
    /// I/O error while reading a kernel.
    #[error("I/O error: {0}")]
    Io(String),
    /// A Julian Day could not be mapped back to a civil instant.
    #[error("Julian Day {0} is outside the representable calendar range")]
    OutOfRange(f64),
}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

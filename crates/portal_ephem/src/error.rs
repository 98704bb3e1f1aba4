//! Error types for ephemeris evaluation.

use thiserror::Error;

/// Errors from configuring or evaluating an ephemeris.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Configured ephemeris data could not be located or read. Fatal.
    #[error("ephemeris data unavailable: {0}")]
    Unavailable(String),
    /// The requested epoch is not a finite Julian Day.
    #[error("invalid epoch: JD {0}")]
    InvalidEpoch(f64),
}

//! Error types for Vedic calculations.

use portal_ephem::EphemerisError;
use thiserror::Error;

/// Errors from house, rise/set, or day/night computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Error from the ephemeris.
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Iterative algorithm did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
}

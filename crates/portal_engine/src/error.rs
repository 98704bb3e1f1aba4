//! Error types for classification and engine configuration.

use std::path::PathBuf;

use portal_ephem::EphemerisError;
use thiserror::Error;

use crate::kp::KpError;

/// Errors surfaced by [`Classifier`](crate::Classifier).
///
/// Everything else that can go wrong inside a classification degrades to a
/// logged fallback.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// Coordinates out of range or an impossible calendar date.
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
    /// Ephemeris data is unavailable. Fatal.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Errors from loading or validating [`EngineSettings`](crate::EngineSettings).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Kp(#[from] KpError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

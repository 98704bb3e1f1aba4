//! Analytic Sun, Moon, and lunar-node ephemeris.
//!
//! Low-precision series from Meeus, *Astronomical Algorithms* (2nd ed.),
//! and the IERS 2010 fundamental arguments, behind the [`Ephemeris`]
//! trait so callers can inject stubs or other backends.
//!
//! All longitudes are tropical (equinox of date) and reduced to [0, 360).

pub mod ephemeris;
pub mod error;
pub mod fundamental;
pub mod lunar;
pub mod nodes;
pub mod solar;

pub use ephemeris::{EclipticPositions, Ephemeris, EphemerisConfig, MeeusEphemeris};
pub use error::EphemerisError;
pub use fundamental::{fundamental_arguments, mean_obliquity_deg, true_obliquity_deg};
pub use lunar::moon_longitude_deg;
pub use nodes::mean_rahu_deg;
pub use solar::{sun_equatorial_deg, sun_longitude_deg};

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

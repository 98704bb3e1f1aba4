//! Lagna (Ascendant) and MC (Midheaven) from local sidereal time.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 13;
//! Montenbruck & Pfleger, "Astronomy on the Personal Computer".

use portal_ephem::normalize_360;
use portal_time::local_sidereal_time_deg;

/// Right ascension of the meridian (local sidereal time) in degrees.
pub fn ramc_deg(jd_ut: f64, longitude_deg: f64) -> f64 {
    local_sidereal_time_deg(jd_ut, longitude_deg)
}

/// Ecliptic longitude of the Lagna in degrees, [0, 360).
///
/// `Asc = atan2(cos θ, −(sin θ·cos ε + tan φ·sin ε))` with θ = RAMC (local
/// sidereal time), φ = latitude and ε = obliquity. This is the eastern
/// intersection of the ecliptic and the horizon.
pub fn lagna_deg(ramc_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let theta = ramc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(
        theta.cos(),
        -(theta.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// Ecliptic longitude of the MC in degrees, [0, 360).
///
/// `MC = atan2(sin θ, cos θ·cos ε)`.
pub fn mc_deg(ramc_deg: f64, obliquity_deg: f64) -> f64 {
    ecliptic_from_right_ascension(ramc_deg, obliquity_deg)
}

/// Ecliptic longitude of the ecliptic point with a given right ascension.
pub(crate) fn ecliptic_from_right_ascension(ra_deg: f64, obliquity_deg: f64) -> f64 {
    let alpha = ra_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_360(f64::atan2(alpha.sin(), alpha.cos() * eps.cos()).to_degrees())
}

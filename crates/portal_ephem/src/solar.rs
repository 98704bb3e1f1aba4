//! Apparent geocentric position of the Sun.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), Chapter 25 (low accuracy,
//! about 0.01°). Arguments are Julian centuries of TT since J2000.0.

use crate::fundamental::mean_obliquity_deg;
use crate::normalize_360;

/// Geometric mean longitude and the equation of centre, both in degrees.
fn true_longitude_deg(t: f64) -> f64 {
    let l0 = 280.46646 + t * (36000.76983 + t * 0.0003032);
    let m = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();
    let c = (1.914602 - t * (0.004817 + t * 0.000014)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    l0 + c
}

fn aberration_node_rad(t: f64) -> f64 {
    (125.04 - 1934.136 * t).to_radians()
}

/// Apparent ecliptic longitude of the Sun (mean equinox of date), degrees [0, 360).
pub fn sun_longitude_deg(t: f64) -> f64 {
    let omega = aberration_node_rad(t);
    normalize_360(true_longitude_deg(t) - 0.00569 - 0.00478 * omega.sin())
}

/// Apparent right ascension and declination of the Sun, degrees.
///
/// Right ascension is in [0, 360); declination in [-90, 90].
pub fn sun_equatorial_deg(t: f64) -> (f64, f64) {
    let omega = aberration_node_rad(t);
    let lambda = sun_longitude_deg(t).to_radians();
    let eps = (mean_obliquity_deg(t) + 0.00256 * omega.cos()).to_radians();

    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (eps.sin() * lambda.sin()).asin();
    (normalize_360(ra.to_degrees()), dec.to_degrees())
}

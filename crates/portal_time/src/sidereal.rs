//! Greenwich and local sidereal time.
//!
//! Inputs are UT Julian Days. UTC is used in place of UT1; the difference
//! stays below 0.9 s and is far inside the tolerance of a rise/set or
//! house-cusp computation.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15. Public domain.
//! - GMST polynomial: Capitaine et al. 2003, Table 2. Public domain.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Ratio of sidereal to solar day length, used as the Earth's rotation rate in turns per UT day.
pub const SIDEREAL_RATE: f64 = 1.002_737_811_911_354_6;

/// Earth Rotation Angle in radians, [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    (TAU * (0.779_057_273_264_0 + SIDEREAL_RATE * du)).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, [0, 2π).
///
/// GMST = ERA + 0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
/// − 0.000029956·T⁴ − 0.0000000368·T⁵ (arcseconds).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let poly_arcsec = 0.014506
        + t * (4612.156534 + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 - t * 0.0000000368))));
    (earth_rotation_angle_rad(jd_ut) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time in radians from GMST and east longitude in radians.
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// Local sidereal time in degrees for a UT Julian Day and east longitude in degrees.
pub fn local_sidereal_time_deg(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    local_sidereal_time_rad(gmst_rad(jd_ut), longitude_east_deg.to_radians()).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000() {
        let deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((deg - 280.46).abs() < 0.1, "ERA = {deg}");
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let deg = gmst_rad(2_446_895.5).to_degrees();
        assert!((deg - 197.693195).abs() < 0.001, "GMST = {deg}");
    }

    #[test]
    fn gmst_gains_about_a_degree_per_day() {
        let g1 = gmst_rad(2_451_545.0).to_degrees();
        let g2 = gmst_rad(2_451_546.0).to_degrees();
        let gain = (g2 - g1).rem_euclid(360.0);
        assert!((gain - 0.9856).abs() < 0.001, "daily gain = {gain}");
    }

    #[test]
    fn lst_adds_east_longitude() {
        let jd = 2_451_545.0;
        let gmst_deg = gmst_rad(jd).to_degrees();
        let lst = local_sidereal_time_deg(jd, 90.0);
        assert!(((lst - gmst_deg).rem_euclid(360.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn lst_west_longitude_wraps() {
        let lst = local_sidereal_time_rad(0.1, -0.5);
        assert!((0.0..TAU).contains(&lst));
        assert!((lst - (TAU - 0.4)).abs() < 1e-12);
    }
}

//! Delaunay fundamental arguments, obliquity, and low-precision nutation.
//!
//! Sources:
//! - Fundamental arguments: IERS Conventions 2010, Table 5.2e.
//! - Mean obliquity: Meeus, *Astronomical Algorithms* (2nd ed.), Eq. 22.2.
//! - Nutation in longitude: Meeus Ch. 22, 0.5″ abridged series.

use std::f64::consts::TAU;

const AS2RAD: f64 = TAU / 1_296_000.0;

/// The five Delaunay arguments `[l, l', F, D, Ω]` in radians.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l = 485868.249036 + 1717915923.2178 * t + 31.8792 * t2 + 0.051635 * t3 - 0.00024470 * t4;
    let lp = 1287104.79305 + 129596581.0481 * t - 0.5532 * t2 + 0.000136 * t3 - 0.00001149 * t4;
    let f = 335779.526232 + 1739527262.8478 * t - 12.7512 * t2 - 0.001037 * t3 + 0.00000417 * t4;
    let d = 1072260.70369 + 1602961601.2090 * t - 6.3706 * t2 + 0.006593 * t3 - 0.00003169 * t4;
    let om = 450160.398036 - 6962890.5431 * t + 7.4722 * t2 + 0.007702 * t3 - 0.00005939 * t4;

    [l, lp, f, d, om].map(|arcsec| arcsec * AS2RAD)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + arcsec / 60.0) / 60.0
}

/// Nutation in longitude Δψ in degrees.
pub fn nutation_longitude_deg(t: f64) -> f64 {
    let omega = fundamental_arguments(t)[4];
    let sun_mean = (280.4665 + 36000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481267.8813 * t).to_radians();
    let arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();
    arcsec / 3600.0
}

/// Nutation in obliquity Δε in degrees.
pub fn nutation_obliquity_deg(t: f64) -> f64 {
    let omega = fundamental_arguments(t)[4];
    let sun_mean = (280.4665 + 36000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481267.8813 * t).to_radians();
    let arcsec = 9.20 * omega.cos() + 0.57 * (2.0 * sun_mean).cos() + 0.10 * (2.0 * moon_mean).cos()
        - 0.09 * (2.0 * omega).cos();
    arcsec / 3600.0
}

/// True obliquity (mean + nutation) in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation_obliquity_deg(t)
}

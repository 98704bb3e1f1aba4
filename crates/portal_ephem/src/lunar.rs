//! Geocentric ecliptic longitude of the Moon.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), Chapter 47: the 59 periodic
//! longitude terms of Table 47.A plus the Venus, Jupiter and flattening
//! corrections. Accuracy is about 10″ in longitude, well inside a
//! nakshatra pada.

use crate::fundamental::nutation_longitude_deg;
use crate::normalize_360;

/// Table 47.A longitude terms: multiples of (D, M, M', F) and Σl coefficient in 1e-6°.
#[rustfmt::skip]
const LONGITUDE_TERMS: [(i8, i8, i8, i8, f64); 59] = [
    (0,  0,  1,  0,  6_288_774.0),
    (2,  0, -1,  0,  1_274_027.0),
    (2,  0,  0,  0,    658_314.0),
    (0,  0,  2,  0,    213_618.0),
    (0,  1,  0,  0,   -185_116.0),
    (0,  0,  0,  2,   -114_332.0),
    (2,  0, -2,  0,     58_793.0),
    (2, -1, -1,  0,     57_066.0),
    (2,  0,  1,  0,     53_322.0),
    (2, -1,  0,  0,     45_758.0),
    (0,  1, -1,  0,    -40_923.0),
    (1,  0,  0,  0,    -34_720.0),
    (0,  1,  1,  0,    -30_383.0),
    (2,  0,  0, -2,     15_327.0),
    (0,  0,  1,  2,    -12_528.0),
    (0,  0,  1, -2,     10_980.0),
    (4,  0, -1,  0,     10_675.0),
    (0,  0,  3,  0,     10_034.0),
    (4,  0, -2,  0,      8_548.0),
    (2,  1, -1,  0,     -7_888.0),
    (2,  1,  0,  0,     -6_766.0),
    (1,  0, -1,  0,     -5_163.0),
    (1,  1,  0,  0,      4_987.0),
    (2, -1,  1,  0,      4_036.0),
    (2,  0,  2,  0,      3_994.0),
    (4,  0,  0,  0,      3_861.0),
    (2,  0, -3,  0,      3_665.0),
    (0,  1, -2,  0,     -2_689.0),
    (2,  0, -1,  2,     -2_602.0),
    (2, -1, -2,  0,      2_390.0),
    (1,  0,  1,  0,     -2_348.0),
    (2, -2,  0,  0,      2_236.0),
    (0,  1,  2,  0,     -2_120.0),
    (0,  2,  0,  0,     -2_069.0),
    (2, -2, -1,  0,      2_048.0),
    (2,  0,  1, -2,     -1_773.0),
    (2,  0,  0,  2,     -1_595.0),
    (4, -1, -1,  0,      1_215.0),
    (0,  0,  2,  2,     -1_110.0),
    (3,  0, -1,  0,       -892.0),
    (2,  1,  1,  0,       -810.0),
    (4, -1, -2,  0,        759.0),
    (0,  2, -1,  0,       -713.0),
    (2,  2, -1,  0,       -700.0),
    (2,  1, -2,  0,        691.0),
    (2, -1,  0, -2,        596.0),
    (4,  0,  1,  0,        549.0),
    (0,  0,  4,  0,        537.0),
    (4, -1,  0,  0,        520.0),
    (1,  0, -2,  0,       -487.0),
    (2,  1,  0, -2,       -399.0),
    (0,  0,  2, -2,       -381.0),
    (1,  1,  1,  0,        351.0),
    (3,  0, -2,  0,       -340.0),
    (4,  0, -3,  0,        330.0),
    (2, -1,  2,  0,        327.0),
    (0,  2,  1,  0,       -323.0),
    (1,  1, -1,  0,        299.0),
    (2,  0,  3,  0,        294.0),
];

/// Mean arguments of the lunar theory, degrees: (L', D, M, M', F).
fn mean_arguments_deg(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let lp = 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0;
    let mp = 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    (lp, d, m, mp, f)
}

/// Geometric longitude of the Moon referred to the mean equinox of date, degrees [0, 360).
pub fn moon_mean_equinox_longitude_deg(t: f64) -> f64 {
    let (lp, d, m, mp, f) = mean_arguments_deg(t);
    let e = 1.0 - t * (0.002516 + t * 0.0000074);

    let mut sigma_l = 0.0;
    for &(cd, cm, cmp, cf, coeff) in &LONGITUDE_TERMS {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        let ecc = match cm.unsigned_abs() {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        sigma_l += coeff * ecc * arg.to_radians().sin();
    }

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    sigma_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).to_radians().sin() + 318.0 * a2.sin();

    normalize_360(lp + sigma_l / 1_000_000.0)
}

/// Apparent longitude of the Moon (true equinox of date), degrees [0, 360).
pub fn moon_longitude_deg(t: f64) -> f64 {
    normalize_360(moon_mean_equinox_longitude_deg(t) + nutation_longitude_deg(t))
}

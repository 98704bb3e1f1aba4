//! Bhava (house) cusps: Placidus with an equal-house fallback.
//!
//! Placidus trisects the diurnal and nocturnal semi-arcs. Each
//! intermediate cusp is the ecliptic point whose right ascension α
//! satisfies:
//!
//! - cusp 11: α = RAMC + SA(α)/3
//! - cusp 12: α = RAMC + 2·SA(α)/3
//! - cusp 2:  α = RAMC + 180 − 2·NSA(α)/3
//! - cusp 3:  α = RAMC + 180 − NSA(α)/3
//!
//! where SA = acos(−tan φ·tan δ) is the diurnal semi-arc of the point's
//! declination δ = atan(sin α·tan ε), and NSA = 180 − SA. Each equation is
//! solved by bisection over its quadrant. Cusps 4–9 are opposite 10–3.
//!
//! Sources: Meeus Ch. 13; Holden, "A History of Horoscopic Astrology".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portal_ephem::{mean_obliquity_deg, normalize_360};
use portal_time::{jd_from_datetime, julian_centuries};

use crate::error::VedicError;
use crate::lagna::{ecliptic_from_right_ascension, lagna_deg, mc_deg, ramc_deg};

/// Placidus is undefined where part of the ecliptic stays circumpolar.
pub const MAX_PLACIDUS_LATITUDE_DEG: f64 = 66.5;

const MAX_ITERATIONS: usize = 100;
const CONVERGENCE_DEG: f64 = 1e-9;

/// Which division produced a set of cusps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseSystem {
    Placidus,
    /// 12 houses of 30° from the ascendant.
    Equal,
}

/// Twelve house cusps, house 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    /// Cusp longitudes in degrees [0, 360); `cusps[0]` is house 1.
    pub cusps: [f64; 12],
    pub ascendant_deg: f64,
    pub mc_deg: f64,
}

/// Compute Placidus cusps for an observer and instant, falling back to
/// equal houses from the ascendant when Placidus cannot be computed.
///
/// The fallback is logged at warning level and never reported as an error.
pub fn houses_for(lat: f64, lon: f64, instant: &DateTime<Utc>) -> HouseCusps {
    let jd = jd_from_datetime(instant);
    let ramc = ramc_deg(jd, lon);
    let eps = mean_obliquity_deg(julian_centuries(jd));
    houses_from_ramc(ramc, lat, eps)
}

/// House cusps from RAMC, latitude, and obliquity (all degrees).
pub fn houses_from_ramc(ramc_deg: f64, lat_deg: f64, obliquity_deg: f64) -> HouseCusps {
    match placidus_cusps(ramc_deg, lat_deg, obliquity_deg) {
        Ok(cusps) => cusps,
        Err(e) => {
            log::warn!("Placidus failed at latitude {lat_deg:.4}: {e}; using equal houses");
            equal_cusps(ramc_deg, lat_deg, obliquity_deg)
        }
    }
}

/// Placidus cusps. Fails at polar latitudes and for non-finite input.
pub fn placidus_cusps(
    ramc_deg: f64,
    lat_deg: f64,
    obliquity_deg: f64,
) -> Result<HouseCusps, VedicError> {
    if !(ramc_deg.is_finite() && lat_deg.is_finite() && obliquity_deg.is_finite()) {
        return Err(VedicError::InvalidLocation("non-finite house input"));
    }
    if lat_deg.abs() > MAX_PLACIDUS_LATITUDE_DEG {
        return Err(VedicError::InvalidLocation(
            "Placidus undefined beyond 66.5 degrees latitude",
        ));
    }

    let asc = lagna_deg(ramc_deg, lat_deg, obliquity_deg);
    let mc = mc_deg(ramc_deg, obliquity_deg);

    let c11 = solve_cusp(ramc_deg, lat_deg, obliquity_deg, Quadrant::Diurnal, 1.0 / 3.0)?;
    let c12 = solve_cusp(ramc_deg, lat_deg, obliquity_deg, Quadrant::Diurnal, 2.0 / 3.0)?;
    let c2 = solve_cusp(ramc_deg, lat_deg, obliquity_deg, Quadrant::Nocturnal, 2.0 / 3.0)?;
    let c3 = solve_cusp(ramc_deg, lat_deg, obliquity_deg, Quadrant::Nocturnal, 1.0 / 3.0)?;

    let opp = |d: f64| normalize_360(d + 180.0);
    Ok(HouseCusps {
        system: HouseSystem::Placidus,
        cusps: [
            asc,
            c2,
            c3,
            opp(mc),
            opp(c11),
            opp(c12),
            opp(asc),
            opp(c2),
            opp(c3),
            mc,
            c11,
            c12,
        ],
        ascendant_deg: asc,
        mc_deg: mc,
    })
}

/// Equal houses: 30° steps from the ascendant.
pub fn equal_cusps(ramc_deg: f64, lat_deg: f64, obliquity_deg: f64) -> HouseCusps {
    let asc = lagna_deg(ramc_deg, lat_deg, obliquity_deg);
    let mut cusps = [0.0; 12];
    for (i, c) in cusps.iter_mut().enumerate() {
        *c = normalize_360(asc + 30.0 * i as f64);
    }
    HouseCusps {
        system: HouseSystem::Equal,
        cusps,
        ascendant_deg: asc,
        mc_deg: mc_deg(ramc_deg, obliquity_deg),
    }
}

#[derive(Clone, Copy)]
enum Quadrant {
    /// Between MC and ascendant: measured along the diurnal semi-arc from the MC.
    Diurnal,
    /// Between ascendant and IC: measured along the nocturnal semi-arc back from the IC.
    Nocturnal,
}

fn solve_cusp(
    ramc: f64,
    lat: f64,
    eps: f64,
    quadrant: Quadrant,
    fraction: f64,
) -> Result<f64, VedicError> {
    let tan_phi = lat.to_radians().tan();
    let tan_eps = eps.to_radians().tan();

    let target = |alpha: f64| -> Result<f64, VedicError> {
        let dec = (alpha.to_radians().sin() * tan_eps).atan();
        let x = -tan_phi * dec.tan();
        if !(-1.0..=1.0).contains(&x) {
            return Err(VedicError::InvalidLocation("cusp point is circumpolar"));
        }
        let sa = x.acos().to_degrees();
        Ok(match quadrant {
            Quadrant::Diurnal => ramc + fraction * sa,
            Quadrant::Nocturnal => ramc + 180.0 - fraction * (180.0 - sa),
        })
    };

    let residual = |alpha: f64| target(alpha).map(|t| t - alpha);

    // The residual is non-negative at the near end of the quadrant and
    // non-positive at the far end, so bisection always brackets the cusp.
    let (mut lo, mut hi) = match quadrant {
        Quadrant::Diurnal => (ramc, ramc + 180.0 * fraction),
        Quadrant::Nocturnal => (ramc + 180.0 - 180.0 * fraction, ramc + 180.0),
    };
    if residual(lo)? < 0.0 || residual(hi)? > 0.0 {
        return Err(VedicError::NoConvergence("Placidus cusp not bracketed"));
    }
    for _ in 0..MAX_ITERATIONS {
        if hi - lo < CONVERGENCE_DEG {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if residual(mid)? > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(ecliptic_from_right_ascension(0.5 * (lo + hi), eps))
}

/// House (1–12) containing `moon_deg`.
///
/// House `i` is the half-open arc `[cusp[i], cusp[i+1])`, wrapping through
/// 0° when the start cusp is larger than the end cusp. Returns `None` for
/// non-finite input.
pub fn moon_house(moon_deg: f64, cusps: &[f64; 12]) -> Option<u8> {
    if !moon_deg.is_finite() {
        return None;
    }
    let m = normalize_360(moon_deg);
    (0..12).find_map(|i| {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start <= end {
            start <= m && m < end
        } else {
            m >= start || m < end
        };
        inside.then_some(i as u8 + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.4393;

    fn arcs(c: &HouseCusps) -> Vec<f64> {
        (0..12)
            .map(|i| (c.cusps[(i + 1) % 12] - c.cusps[i]).rem_euclid(360.0))
            .collect()
    }

    #[test]
    fn placidus_arcs_close_the_circle() {
        for ramc in (0..360).step_by(20) {
            for lat in [-50.0, -25.0, 0.0, 33.39, 55.75, 64.0] {
                let c = placidus_cusps(ramc as f64, lat, EPS).unwrap();
                let a = arcs(&c);
                let sum: f64 = a.iter().sum();
                assert!((sum - 360.0).abs() < 1e-6, "ramc {ramc} lat {lat}: sum {sum}");
                assert!(a.iter().all(|&x| x > 0.0 && x < 180.0), "ramc {ramc} lat {lat}: {a:?}");
            }
        }
    }

    #[test]
    fn equator_intermediate_cusps() {
        // On the equator every semi-arc is 90°, so cusp 11 sits at RA = RAMC + 30.
        let c = placidus_cusps(0.0, 0.0, EPS).unwrap();
        let expected = ecliptic_from_right_ascension(30.0, EPS);
        assert!((c.cusps[10] - expected).abs() < 1e-6);
    }

    #[test]
    fn angles_in_place() {
        let c = placidus_cusps(123.0, 40.0, EPS).unwrap();
        assert_eq!(c.cusps[0], c.ascendant_deg);
        assert_eq!(c.cusps[9], c.mc_deg);
        assert!(((c.cusps[6] - c.cusps[0]).rem_euclid(360.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn polar_latitude_falls_back_to_equal() {
        let c = houses_from_ramc(45.0, 78.2, EPS);
        assert_eq!(c.system, HouseSystem::Equal);
        for a in arcs(&c) {
            assert!((a - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn nan_latitude_falls_back() {
        let c = houses_from_ramc(45.0, f64::NAN, EPS);
        assert_eq!(c.system, HouseSystem::Equal);
    }

    #[test]
    fn moon_house_wraparound() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = normalize_360(350.0 + 30.0 * i as f64);
        }
        assert_eq!(moon_house(355.0, &cusps), Some(1));
        assert_eq!(moon_house(5.0, &cusps), Some(1));
        assert_eq!(moon_house(20.0, &cusps), Some(2));
        assert_eq!(moon_house(349.9, &cusps), Some(12));
    }

    #[test]
    fn moon_on_cusp_belongs_to_that_house() {
        let c = equal_cusps(0.0, 0.0, EPS);
        assert_eq!(moon_house(c.cusps[4], &c.cusps), Some(5));
    }

    #[test]
    fn moon_house_nan_is_none() {
        let c = equal_cusps(0.0, 0.0, EPS);
        assert_eq!(moon_house(f64::NAN, &c.cusps), None);
    }
}

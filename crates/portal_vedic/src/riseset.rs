//! Sunrise/sunset computation with twilight variants.
//!
//! Iterative algorithm from standard spherical astronomy: find the hour
//! angle at which the Sun reaches the target altitude, place the event
//! around the local transit, then refine with the Sun's position at the
//! event time.
//!
//! Sources: Meeus Ch. 15; Montenbruck & Pfleger.

use std::f64::consts::{PI, TAU};

use portal_ephem::MeeusEphemeris;
use portal_time::{SIDEREAL_RATE, gmst_rad, local_sidereal_time_rad};

use crate::error::VedicError;
use crate::riseset_types::{GeoLocation, RiseSetConfig, RiseSetEvent, RiseSetResult};

/// Maximum iterations for the rise/set refinement loop.
const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Approximate local solar noon JD from 0h UT JD and longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

fn wrap_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Cosine of the hour angle at which the Sun's centre reaches `h0`.
fn cos_hour_angle(h0_rad: f64, phi: f64, dec: f64) -> f64 {
    (h0_rad.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

/// Compute a single rise/set event for the Sun.
///
/// `jd_utc_noon` is the approximate local noon of the wanted day; see
/// [`approximate_local_noon_jd`].
pub fn compute_rise_set(
    ephemeris: &MeeusEphemeris,
    location: &GeoLocation,
    event: RiseSetEvent,
    jd_utc_noon: f64,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, VedicError> {
    if !(location.latitude_deg.is_finite() && location.longitude_deg.is_finite()) {
        return Err(VedicError::InvalidLocation("non-finite coordinates"));
    }
    let phi = location.latitude_rad();
    let h0_rad = config.target_altitude_deg(event).to_radians();
    let rate = TAU * SIDEREAL_RATE; // rad/day

    let (ra_deg, dec_deg) = ephemeris.sun_equatorial_at_jd(jd_utc_noon)?;
    let cos_h0 = cos_hour_angle(h0_rad, phi, dec_deg.to_radians());
    if cos_h0 > 1.0 {
        return Ok(RiseSetResult::NeverRises);
    }
    if cos_h0 < -1.0 {
        return Ok(RiseSetResult::NeverSets);
    }

    let lst_noon = local_sidereal_time_rad(gmst_rad(jd_utc_noon), location.longitude_rad());
    let ha_noon = wrap_pi(lst_noon - ra_deg.to_radians());
    let jd_transit = jd_utc_noon - ha_noon / rate;

    let h0_days = cos_h0.acos() / rate;
    let mut jd_event = if event.is_rising() {
        jd_transit - h0_days
    } else {
        jd_transit + h0_days
    };

    for _ in 0..MAX_ITERATIONS {
        let (ra_i, dec_i) = ephemeris.sun_equatorial_at_jd(jd_event)?;
        let cos_h = cos_hour_angle(h0_rad, phi, dec_i.to_radians());
        if cos_h > 1.0 {
            return Ok(RiseSetResult::NeverRises);
        }
        if cos_h < -1.0 {
            return Ok(RiseSetResult::NeverSets);
        }
        let h_target = cos_h.acos();
        let ha_target = if event.is_rising() { -h_target } else { h_target };

        let lst = local_sidereal_time_rad(gmst_rad(jd_event), location.longitude_rad());
        let ha_actual = wrap_pi(lst - ra_i.to_radians());

        let correction = wrap_pi(ha_target - ha_actual) / rate;
        jd_event += correction;
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    Ok(RiseSetResult::Event {
        jd_utc: jd_event,
        event,
    })
}

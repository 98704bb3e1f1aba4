//! The ephemeris seam consumed by the classifier.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use portal_time::{TimeScale, jd_from_datetime, julian_centuries};

use crate::error::EphemerisError;
use crate::lunar::moon_longitude_deg;
use crate::nodes::mean_rahu_deg;
use crate::solar::{sun_equatorial_deg, sun_longitude_deg};

/// Geocentric ecliptic longitudes of date, degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPositions {
    pub sun_deg: f64,
    pub moon_deg: f64,
    pub node_deg: f64,
}

/// Source of Sun, Moon, and mean-node longitudes for an instant.
///
/// Implementations must be shareable across threads. The returned
/// longitudes are always reduced to [0, 360).
pub trait Ephemeris: Send + Sync {
    /// Longitudes for an observer at `lat`/`lon` (degrees) and a UTC instant.
    fn positions(
        &self,
        lat: f64,
        lon: f64,
        instant: &DateTime<Utc>,
    ) -> Result<EclipticPositions, EphemerisError>;
}

/// Ephemeris configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EphemerisConfig {
    /// Optional NAIF leap-second kernel. When set it must load.
    pub lsk_path: Option<PathBuf>,
}

/// Analytic ephemeris built on the Meeus series.
#[derive(Debug, Clone, Default)]
pub struct MeeusEphemeris {
    time_scale: TimeScale,
}

impl MeeusEphemeris {
    /// Create an ephemeris, loading the leap-second kernel if one is configured.
    ///
    /// A configured kernel that is missing or unreadable is
    /// [`EphemerisError::Unavailable`].
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        let time_scale = match &config.lsk_path {
            Some(path) => TimeScale::load_lsk(path).map_err(|e| {
                EphemerisError::Unavailable(format!("{}: {e}", path.display()))
            })?,
            None => TimeScale::model_only(),
        };
        log::debug!(
            "analytic ephemeris ready (leap-second kernel: {})",
            time_scale.has_lsk()
        );
        Ok(Self { time_scale })
    }

    /// Ephemeris with a caller-supplied time scale.
    pub fn with_time_scale(time_scale: TimeScale) -> Self {
        Self { time_scale }
    }

    /// Access the UTC → TT mapping.
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Julian centuries of TT for a UTC Julian Day.
    pub fn centuries_tt(&self, jd_utc: f64) -> Result<f64, EphemerisError> {
        if !jd_utc.is_finite() {
            return Err(EphemerisError::InvalidEpoch(jd_utc));
        }
        Ok(julian_centuries(self.time_scale.utc_to_tt(jd_utc)))
    }

    /// Longitudes at a UTC Julian Day.
    pub fn positions_at_jd(&self, jd_utc: f64) -> Result<EclipticPositions, EphemerisError> {
        let t = self.centuries_tt(jd_utc)?;
        Ok(EclipticPositions {
            sun_deg: sun_longitude_deg(t),
            moon_deg: moon_longitude_deg(t),
            node_deg: mean_rahu_deg(t),
        })
    }

    /// Apparent Sun right ascension and declination (degrees) at a UTC Julian Day.
    pub fn sun_equatorial_at_jd(&self, jd_utc: f64) -> Result<(f64, f64), EphemerisError> {
        Ok(sun_equatorial_deg(self.centuries_tt(jd_utc)?))
    }
}

impl Ephemeris for MeeusEphemeris {
    fn positions(
        &self,
        _lat: f64,
        _lon: f64,
        instant: &DateTime<Utc>,
    ) -> Result<EclipticPositions, EphemerisError> {
        self.positions_at_jd(jd_from_datetime(instant))
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MeeusEphemeris>();
};

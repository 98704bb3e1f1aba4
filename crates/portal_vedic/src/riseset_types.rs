//! Types for sunrise/sunset and twilight calculations.

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Rise/set event types, including twilight variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    /// Upper limb of the Sun on the horizon, with refraction.
    Sunrise,
    /// Upper limb disappears below the horizon.
    Sunset,
    /// Sun centre at -6 deg.
    CivilDawn,
    CivilDusk,
    /// Sun centre at -12 deg.
    NauticalDawn,
    NauticalDusk,
    /// Sun centre at -18 deg.
    AstronomicalDawn,
    AstronomicalDusk,
}

impl RiseSetEvent {
    /// Whether this is a rising (morning) event.
    pub fn is_rising(self) -> bool {
        matches!(
            self,
            Self::Sunrise | Self::CivilDawn | Self::NauticalDawn | Self::AstronomicalDawn
        )
    }

    /// Fixed twilight depression in degrees, or `None` for sunrise/sunset,
    /// whose depression comes from [`RiseSetConfig`].
    pub fn twilight_depression_deg(self) -> Option<f64> {
        match self {
            Self::Sunrise | Self::Sunset => None,
            Self::CivilDawn | Self::CivilDusk => Some(6.0),
            Self::NauticalDawn | Self::NauticalDusk => Some(12.0),
            Self::AstronomicalDawn | Self::AstronomicalDusk => Some(18.0),
        }
    }
}

/// Horizon parameters for sunrise/sunset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
        }
    }
}

impl RiseSetConfig {
    /// Geometric altitude of the Sun's centre at the event, degrees (negative below horizon).
    pub fn target_altitude_deg(&self, event: RiseSetEvent) -> f64 {
        match event.twilight_depression_deg() {
            Some(depression) => -depression,
            None => -(self.refraction_arcmin + self.semidiameter_arcmin) / 60.0,
        }
    }
}

/// Result of a rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event occurs at the given Julian Day (UTC).
    Event { jd_utc: f64, event: RiseSetEvent },
    /// Sun stays below the target altitude all day (polar night).
    NeverRises,
    /// Sun stays above the target altitude all day (midnight sun).
    NeverSets,
}

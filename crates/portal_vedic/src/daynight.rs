//! Day/night resolution for an observer and instant.
//!
//! The instant is moved into the observer's local zone to pick the civil
//! date, sunrise and sunset (or dawn and dusk) are found for that date, and
//! the instant is night when it falls outside that window. Anything that
//! cannot be resolved counts as night.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use portal_ephem::MeeusEphemeris;
use portal_time::{jd_at_midnight, jd_from_datetime};

use crate::error::VedicError;
use crate::riseset::{approximate_local_noon_jd, compute_rise_set};
use crate::riseset_types::{GeoLocation, RiseSetConfig, RiseSetEvent, RiseSetResult};

/// Resolves the UTC offset in force at a location and instant.
pub trait TimezoneLookup: Send + Sync {
    /// `None` when no zone can be determined.
    fn offset_at(&self, lat: f64, lon: f64, instant: &DateTime<Utc>) -> Option<FixedOffset>;
}

/// Nautical time zones: whole hours of `round(lon / 15)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarZoneLookup;

impl TimezoneLookup for SolarZoneLookup {
    fn offset_at(&self, lat: f64, lon: f64, _instant: &DateTime<Utc>) -> Option<FixedOffset> {
        if !(lat.is_finite() && (-180.0..=180.0).contains(&lon)) {
            return None;
        }
        let hours = (lon / 15.0).round() as i32;
        FixedOffset::east_opt(hours * 3600)
    }
}

/// One offset for every location.
#[derive(Debug, Clone, Copy)]
pub struct FixedZone(pub FixedOffset);

impl TimezoneLookup for FixedZone {
    fn offset_at(&self, _lat: f64, _lon: f64, _instant: &DateTime<Utc>) -> Option<FixedOffset> {
        Some(self.0)
    }
}

/// Which solar events bound the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightConvention {
    /// Upper limb on the refracted horizon.
    #[default]
    Sunrise,
    Civil,
    Nautical,
    Astronomical,
}

impl NightConvention {
    /// Morning and evening events for this convention.
    pub const fn events(self) -> (RiseSetEvent, RiseSetEvent) {
        match self {
            Self::Sunrise => (RiseSetEvent::Sunrise, RiseSetEvent::Sunset),
            Self::Civil => (RiseSetEvent::CivilDawn, RiseSetEvent::CivilDusk),
            Self::Nautical => (RiseSetEvent::NauticalDawn, RiseSetEvent::NauticalDusk),
            Self::Astronomical => (RiseSetEvent::AstronomicalDawn, RiseSetEvent::AstronomicalDusk),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Civil => "civil",
            Self::Nautical => "nautical",
            Self::Astronomical => "astronomical",
        }
    }
}

/// Daylight bounds for the observer's local date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaylightWindow {
    /// Morning and evening events as UTC Julian Days.
    Bounded { start_jd: f64, end_jd: f64 },
    PolarDay,
    PolarNight,
}

/// Night/day decision for an observer and instant.
pub trait DayNight: Send + Sync {
    /// True when the instant is outside local daylight, or when daylight
    /// cannot be determined.
    fn is_night(&self, lat: f64, lon: f64, instant: &DateTime<Utc>) -> bool;
}

/// Day/night from computed solar events.
pub struct SolarDayNight {
    ephemeris: MeeusEphemeris,
    zones: Box<dyn TimezoneLookup>,
    convention: NightConvention,
    horizon: RiseSetConfig,
}

impl SolarDayNight {
    /// Sunrise/sunset convention with nautical time zones.
    pub fn new(ephemeris: MeeusEphemeris) -> Self {
        Self {
            ephemeris,
            zones: Box::new(SolarZoneLookup),
            convention: NightConvention::default(),
            horizon: RiseSetConfig::default(),
        }
    }

    pub fn with_zones(mut self, zones: impl TimezoneLookup + 'static) -> Self {
        self.zones = Box::new(zones);
        self
    }

    pub fn with_convention(mut self, convention: NightConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Daylight bounds for the local calendar date containing `instant`.
    pub fn daylight_window(
        &self,
        lat: f64,
        lon: f64,
        instant: &DateTime<Utc>,
    ) -> Result<DaylightWindow, VedicError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(VedicError::InvalidLocation("coordinates out of range"));
        }
        let offset = self
            .zones
            .offset_at(lat, lon, instant)
            .ok_or(VedicError::InvalidLocation("no time zone for coordinates"))?;
        let local_date = instant.with_timezone(&offset).date_naive();
        let noon = approximate_local_noon_jd(jd_at_midnight(local_date), lon);

        let location = GeoLocation::new(lat, lon);
        let (morning, evening) = self.convention.events();
        let start = compute_rise_set(&self.ephemeris, &location, morning, noon, &self.horizon)?;
        let end = compute_rise_set(&self.ephemeris, &location, evening, noon, &self.horizon)?;

        Ok(match (start, end) {
            (
                RiseSetResult::Event { jd_utc: start_jd, .. },
                RiseSetResult::Event { jd_utc: end_jd, .. },
            ) => DaylightWindow::Bounded { start_jd, end_jd },
            (RiseSetResult::NeverSets, _) | (_, RiseSetResult::NeverSets) => {
                DaylightWindow::PolarDay
            }
            _ => DaylightWindow::PolarNight,
        })
    }
}

impl DayNight for SolarDayNight {
    fn is_night(&self, lat: f64, lon: f64, instant: &DateTime<Utc>) -> bool {
        match self.daylight_window(lat, lon, instant) {
            Ok(DaylightWindow::Bounded { start_jd, end_jd }) => {
                let jd = jd_from_datetime(instant);
                jd < start_jd || jd > end_jd
            }
            Ok(window) => {
                log::warn!("no {} events at ({lat:.4}, {lon:.4}): {window:?}; treating as night", self.convention.name());
                true
            }
            Err(e) => {
                log::warn!("day/night unresolved at ({lat:.4}, {lon:.4}): {e}; treating as night");
                true
            }
        }
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SolarDayNight>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct NoZone;

    impl TimezoneLookup for NoZone {
        fn offset_at(&self, _: f64, _: f64, _: &DateTime<Utc>) -> Option<FixedOffset> {
            None
        }
    }

    fn resolver() -> SolarDayNight {
        SolarDayNight::new(MeeusEphemeris::default())
    }

    #[test]
    fn nautical_zone_offsets() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let z = SolarZoneLookup;
        assert_eq!(z.offset_at(0.0, 0.0, &t).unwrap().local_minus_utc(), 0);
        assert_eq!(z.offset_at(33.39, -104.523, &t).unwrap().local_minus_utc(), -7 * 3600);
        assert_eq!(z.offset_at(28.6, 77.2, &t).unwrap().local_minus_utc(), 5 * 3600);
        assert_eq!(z.offset_at(0.0, 180.0, &t).unwrap().local_minus_utc(), 12 * 3600);
        assert!(z.offset_at(0.0, f64::NAN, &t).is_none());
    }

    #[test]
    fn london_midday_is_day() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(!resolver().is_night(51.5, -0.1, &t));
    }

    #[test]
    fn london_midnight_is_night() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        assert!(resolver().is_night(51.5, -0.1, &t));
    }

    #[test]
    fn missing_zone_is_night() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(resolver().with_zones(NoZone).is_night(51.5, -0.1, &t));
    }

    #[test]
    fn polar_day_is_night() {
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 11, 0, 0).unwrap();
        let dn = resolver();
        assert_eq!(
            dn.daylight_window(69.65, 18.96, &t).unwrap(),
            DaylightWindow::PolarDay
        );
        assert!(dn.is_night(69.65, 18.96, &t));
    }

    #[test]
    fn out_of_range_is_night() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(resolver().is_night(95.0, 0.0, &t));
        assert!(resolver().is_night(f64::NAN, 0.0, &t));
    }

    #[test]
    fn astronomical_night_is_shorter() {
        let dn = resolver().with_convention(NightConvention::Astronomical);
        let civil = resolver();
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let (
            DaylightWindow::Bounded { start_jd: a0, end_jd: a1 },
            DaylightWindow::Bounded { start_jd: s0, end_jd: s1 },
        ) = (
            dn.daylight_window(0.0, 0.0, &t).unwrap(),
            civil.daylight_window(0.0, 0.0, &t).unwrap(),
        )
        else {
            panic!("expected bounded windows at the equator");
        };
        assert!(a0 < s0 && a1 > s1);
    }
}

//! Validated classification input.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// An observer position and instant.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180], both degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    latitude: f64,
    longitude: f64,
    instant: DateTime<Utc>,
}

impl Observation {
    pub fn new(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> Result<Self, ClassifyError> {
        check_position(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            instant,
        })
    }

    /// Observation at a UTC calendar date and time of day.
    ///
    /// Impossible dates such as 31 April are rejected.
    pub fn from_calendar(
        latitude: f64,
        longitude: f64,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, ClassifyError> {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or_else(|| {
                ClassifyError::InvalidObservation(format!(
                    "no such UTC time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
                ))
            })?;
        Self::new(latitude, longitude, instant)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn instant(&self) -> &DateTime<Utc> {
        &self.instant
    }

    /// UTC calendar date of the instant.
    pub fn date(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

/// Reject coordinates outside [-90, 90] × [-180, 180] or non-finite.
pub fn check_position(latitude: f64, longitude: f64) -> Result<(), ClassifyError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ClassifyError::InvalidObservation(format!(
            "latitude {latitude} outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ClassifyError::InvalidObservation(format!(
            "longitude {longitude} outside [-180, 180]"
        )));
    }
    Ok(())
}

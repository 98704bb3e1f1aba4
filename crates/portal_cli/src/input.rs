//! Parsing of user-supplied dates and locations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use portal_engine::{DEFAULT_SCAN_HOUR_UTC, Geocoder, check_position};

/// Malformed command-line input. Reported with an example of valid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("cannot parse date `{0}`")]
    Date(String),
    #[error("unknown place `{0}`")]
    Place(String),
    #[error("give either --place or both --lat and --lon")]
    Location,
    #[error("coordinates out of range: {0}")]
    Coordinates(String),
    #[error("no such period: {0}")]
    Period(String),
}

impl InputError {
    /// A valid invocation for the kind of input that was rejected.
    pub fn example(&self) -> &'static str {
        match self {
            Self::Period(_) => "portal scan --place Roswell --year 1947 --month 7",
            _ => "portal classify --lat 33.3943 --lon -104.523 --date 1947-07-05",
        }
    }
}

/// Parse RFC 3339, `YYYY-MM-DDThh:mm[:ss]` (UTC), or `YYYY-MM-DD`.
///
/// A bare date is sampled at `hour` UTC.
pub fn parse_instant(text: &str, hour: u32) -> Result<DateTime<Utc>, InputError> {
    let s = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| InputError::Date(text.to_string()))
}

/// Default sampling hour for bare dates.
pub fn parse_instant_default(text: &str) -> Result<DateTime<Utc>, InputError> {
    parse_instant(text, DEFAULT_SCAN_HOUR_UTC)
}

/// Coordinates from `--lat/--lon`, or from a place name.
///
/// A place given as `"lat, lon"` is read as coordinates before any name
/// lookup.
pub fn resolve_location(
    lat: Option<f64>,
    lon: Option<f64>,
    place: Option<&str>,
    places: &dyn Geocoder,
) -> Result<(f64, f64), InputError> {
    let (lat, lon) = match (lat, lon, place) {
        (Some(lat), Some(lon), None) => (lat, lon),
        (None, None, Some(place)) => match parse_pair(place) {
            Some(pair) => pair,
            None => places
                .resolve(place)
                .ok_or_else(|| InputError::Place(place.to_string()))?,
        },
        _ => return Err(InputError::Location),
    };
    check_position(lat, lon).map_err(|e| InputError::Coordinates(e.to_string()))?;
    Ok((lat, lon))
}

fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let (a, b) = text.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

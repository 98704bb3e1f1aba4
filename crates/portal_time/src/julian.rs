//! Julian Day ↔ calendar conversions.
//!
//! Algorithms from Meeus, "Astronomical Algorithms" (2nd ed.), chapter 7.
//! Dates are proleptic Gregorian throughout.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::TimeError;

/// Julian Day of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Convert a calendar date to a Julian Day.
///
/// `day` may carry a fractional part (e.g. `15.5` is noon on the 15th).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Day back to `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries elapsed since J2000.0 for the given Julian Day.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Day (UTC) of an instant, at full sub-second precision.
pub fn jd_from_datetime(instant: &DateTime<Utc>) -> f64 {
    let secs = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// UTC instant for a Julian Day, rounded to the nearest microsecond.
pub fn datetime_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let micros = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1e6).round();
    if micros.abs() > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::from_timestamp_micros(micros as i64).ok_or(TimeError::OutOfRange(jd))
}

/// Julian Day at 00:00 UTC of a calendar date.
pub fn jd_at_midnight(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()))
}

/// Decimal year for a Julian Day, as used by ΔT polynomials.
pub fn decimal_year(jd: f64) -> f64 {
    let (year, month, _) = jd_to_calendar(jd);
    year as f64 + (month as f64 - 0.5) / 12.0
}

/// Map a three-letter English month abbreviation (any case) to 1–12.
pub fn month_from_abbrev(s: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(s))
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn j2000_calendar() {
        assert_eq!(calendar_to_jd(2000, 1, 1.5), J2000_JD);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 October 4.81 (Sputnik 1)
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6, "got {jd}");
    }

    #[test]
    fn calendar_roundtrip() {
        let jd = calendar_to_jd(1947, 7, 5.625);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (1947, 7));
        assert!((d - 5.625).abs() < 1e-9, "day = {d}");
    }

    #[test]
    fn january_and_february_shift_year() {
        let (y, m, d) = jd_to_calendar(calendar_to_jd(2024, 2, 29.0));
        assert_eq!((y, m), (2024, 2));
        assert!((d - 29.0).abs() < 1e-9);
    }

    #[test]
    fn unix_epoch_from_datetime() {
        let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(jd_from_datetime(&t), UNIX_EPOCH_JD);
    }

    #[test]
    fn datetime_keeps_time_of_day() {
        let t = Utc.with_ymd_and_hms(1947, 7, 5, 15, 0, 0).unwrap();
        let jd = jd_from_datetime(&t);
        let expected = calendar_to_jd(1947, 7, 5.0 + 15.0 / 24.0);
        assert!((jd - expected).abs() < 1e-8, "jd = {jd}, expected {expected}");
    }

    #[test]
    fn datetime_roundtrip_to_microsecond() {
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 6, 18, 42).unwrap();
        let back = datetime_from_jd(jd_from_datetime(&t)).unwrap();
        assert!((back - t).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn datetime_from_nan_fails() {
        assert!(datetime_from_jd(f64::NAN).is_err());
    }

    #[test]
    fn midnight_of_date() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(jd_at_midnight(date), J2000_JD - 0.5);
    }

    #[test]
    fn month_abbrev() {
        assert_eq!(month_from_abbrev("JAN"), Some(1));
        assert_eq!(month_from_abbrev("dec"), Some(12));
        assert_eq!(month_from_abbrev("XYZ"), None);
    }

    #[test]
    fn centuries_at_j2000() {
        assert_eq!(julian_centuries(J2000_JD), 0.0);
    }
}

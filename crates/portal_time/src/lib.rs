//! Time base for the portal classifier.
//!
//! This crate provides:
//! - Julian Day ↔ calendar and `chrono` instant conversions
//! - A ΔT polynomial model for dates before the leap-second era
//! - LSK (Leapseconds Kernel) file parsing
//! - A [`TimeScale`] that maps UTC Julian Days to Terrestrial Time
//! - Greenwich and local sidereal time

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod lsk;
pub mod sidereal;

use std::path::Path;

pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, datetime_from_jd,
    decimal_year, jd_at_midnight, jd_from_datetime, jd_to_calendar, julian_centuries,
};
pub use lsk::LskData;
pub use sidereal::{
    SIDEREAL_RATE, earth_rotation_angle_rad, gmst_rad, local_sidereal_time_deg,
    local_sidereal_time_rad,
};

/// UTC → TT mapping.
///
/// With a leap-second kernel loaded, TT − UTC is exact from 1972 on. Earlier
/// dates, and every date when no kernel is loaded, use the ΔT model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeScale {
    lsk: Option<LskData>,
}

impl TimeScale {
    /// A time scale driven only by the ΔT polynomial model.
    pub fn model_only() -> Self {
        Self { lsk: None }
    }

    /// A time scale backed by parsed leap-second data.
    pub fn with_lsk(data: LskData) -> Self {
        Self { lsk: Some(data) }
    }

    /// Load an LSK file from a path.
    pub fn load_lsk(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_lsk(&content)
    }

    /// Parse an LSK from its text content.
    pub fn parse_lsk(content: &str) -> Result<Self, TimeError> {
        let data = lsk::parse_lsk(content)?;
        log::debug!(
            "loaded leap-second kernel with {} entries",
            data.leap_seconds.len()
        );
        Ok(Self::with_lsk(data))
    }

    /// Whether leap-second data is loaded.
    pub fn has_lsk(&self) -> bool {
        self.lsk.is_some()
    }

    /// TT − UTC in seconds at a UTC Julian Day.
    pub fn tt_minus_utc(&self, jd_utc: f64) -> f64 {
        self.lsk
            .as_ref()
            .and_then(|data| data.tt_minus_utc(jd_utc))
            .unwrap_or_else(|| delta_t_seconds(decimal_year(jd_utc)))
    }

    /// Convert a UTC Julian Day to a TT Julian Day.
    pub fn utc_to_tt(&self, jd_utc: f64) -> f64 {
        jd_utc + self.tt_minus_utc(jd_utc) / SECONDS_PER_DAY
    }
}

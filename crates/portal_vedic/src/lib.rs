//! Derived Vedic quantities for the portal classifier.
//!
//! This crate provides:
//! - Nakshatra, rashi, and pada lookup from an ecliptic longitude
//! - Vimshottari mahadasha lords
//! - Lagna, MC, and Placidus house cusps with an equal-house fallback
//! - Sunrise/sunset and twilight calculations
//! - Day/night resolution with time zone lookup
//!
//! All longitudes are tropical degrees of date.

pub mod bhava;
pub mod dasha;
pub mod daynight;
pub mod error;
pub mod graha;
pub mod lagna;
pub mod nakshatra;
pub mod rashi;
pub mod riseset;
pub mod riseset_types;

pub use bhava::{
    HouseCusps, HouseSystem, MAX_PLACIDUS_LATITUDE_DEG, equal_cusps, houses_for, houses_from_ramc,
    moon_house, placidus_cusps,
};
pub use dasha::{
    DEFAULT_DASHA_LORD, DashaPeriod, VIMSHOTTARI_TOTAL_YEARS, dasha_for, dasha_for_longitude,
    dasha_for_moon, vimshottari_lord,
};
pub use daynight::{
    DayNight, DaylightWindow, FixedZone, NightConvention, SolarDayNight, SolarZoneLookup,
    TimezoneLookup,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha};
pub use lagna::{lagna_deg, mc_deg, ramc_deg};
pub use nakshatra::{
    ALL_NAKSHATRAS, NAKSHATRA_SPAN, Nakshatra, NakshatraInfo, PADA_SPAN, nakshatra_for,
    nakshatra_info,
};
pub use rashi::{ALL_RASHIS, Rashi, rashi_for};
pub use riseset::{approximate_local_noon_jd, compute_rise_set};
pub use riseset_types::{GeoLocation, RiseSetConfig, RiseSetEvent, RiseSetResult};

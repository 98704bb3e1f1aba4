//! Event classification for an observer position and instant.
//!
//! This crate provides:
//! - [`Observation`] input validation
//! - [`AstroState`] from an injected [`Ephemeris`](portal_ephem::Ephemeris)
//! - The six-condition [`ConditionSet`] and the priority [`decide`] table
//! - Kp providers with a fixed fallback, and bounded TTL caches
//! - [`Classifier`] with single and ranged classification
//! - TOML [`EngineSettings`]
//!
//! ```rust,ignore
//! let classifier = Classifier::from_settings(&EngineSettings::load(path)?)?;
//! let result = classifier.classify(33.3943, -104.523, instant)?;
//! println!("{}", result.label);
//! ```

pub mod astro;
pub mod cache;
pub mod classification;
pub mod classifier;
pub mod conditions;
pub mod config;
pub mod contacts;
pub mod decision;
pub mod error;
pub mod kp;
pub mod observation;
pub mod places;
pub mod scan;

pub use astro::AstroState;
pub use cache::{ClassificationCache, ObservationKey, TtlCache};
pub use classification::{Classification, ClassificationDetail};
pub use classifier::Classifier;
pub use conditions::{
    ConditionSet, EIGHTH_LIKE_DEG, LATITUDE_BAND_DEG, MANSION_ALLOW_LIST, NODE_ORB_DEG,
    QUIET_KP_MAX, STORM_KP_MIN, TWELFTH_LIKE_DEG, elongation_deg, node_distance_deg,
};
pub use config::{
    CacheSettings, ClassifierSettings, DayNightSettings, EngineSettings, EphemerisSettings,
    KpSettings,
};
pub use contacts::{CONTACT_TOLERANCE_DEG, ContactEvent, ContactTable};
pub use decision::{ALL_EVENT_LABELS, EventLabel, ParseLabelError, decide};
pub use error::{ClassifyError, ConfigError};
pub use kp::{FALLBACK_KP, FallbackKp, FixedKp, KP_EARLIEST_YEAR, KpError, KpProvider, KpSource, KpTable};
pub use observation::{Observation, check_position};
pub use places::{Geocoder, Place, PlaceTable};
pub use scan::{DEFAULT_SCAN_HOUR_UTC, ScanPeriod};

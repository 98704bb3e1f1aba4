//! Engine settings loaded from TOML.
//!
//! ```toml
//! [ephemeris]
//! lsk_path = "kernels/naif0012.tls"
//!
//! [kp]
//! table_path = "kp/2024.json"
//! fallback = 2.0
//!
//! [cache]
//! capacity = 365
//!
//! [classifier]
//! extended = true
//! scan_hour_utc = 15
//!
//! [day_night]
//! convention = "sunrise"
//!
//! [[contacts]]
//! name = "Roswell"
//! latitude = 33.3943
//! longitude = -104.523
//! date = "1947-07-05"
//!
//! [[places]]
//! name = "Roswell"
//! latitude = 33.3943
//! longitude = -104.523
//! ```
//!
//! Every section is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use portal_vedic::NightConvention;

use crate::contacts::{ContactEvent, ContactTable};
use crate::error::ConfigError;
use crate::kp::{
    DEFAULT_KP_CACHE_CAPACITY, DEFAULT_KP_CACHE_TTL, FALLBACK_KP, KP_EARLIEST_YEAR, KP_MAX, KP_MIN,
};
use crate::places::{Place, PlaceTable};
use crate::scan::DEFAULT_SCAN_HOUR_UTC;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EphemerisSettings {
    pub lsk_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KpSettings {
    /// Use this value for every date. Excludes `table_path`.
    pub fixed: Option<f64>,
    /// TOML or xras JSON table of daily readings.
    pub table_path: Option<PathBuf>,
    pub fallback: f64,
    pub earliest_year: i32,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

impl Default for KpSettings {
    fn default() -> Self {
        Self {
            fixed: None,
            table_path: None,
            fallback: FALLBACK_KP,
            earliest_year: KP_EARLIEST_YEAR,
            cache_ttl_secs: DEFAULT_KP_CACHE_TTL.as_secs(),
            cache_capacity: DEFAULT_KP_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    pub enabled: bool,
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 365,
            ttl_secs: 12 * 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierSettings {
    /// Also compute houses, the Moon's house, and the dasha.
    pub extended: bool,
    pub scan_hour_utc: u32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            extended: false,
            scan_hour_utc: DEFAULT_SCAN_HOUR_UTC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DayNightSettings {
    pub convention: NightConvention,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    pub ephemeris: EphemerisSettings,
    pub kp: KpSettings,
    pub cache: CacheSettings,
    pub classifier: ClassifierSettings,
    pub day_night: DayNightSettings,
    /// Replaces the built-in reference events when present.
    pub contacts: Option<Vec<ContactEvent>>,
    pub places: Vec<Place>,
}

impl EngineSettings {
    /// Read, parse, and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let kp_range = KP_MIN..=KP_MAX;
        if let Some(fixed) = self.kp.fixed {
            if !kp_range.contains(&fixed) {
                return Err(invalid(format!("kp.fixed {fixed} outside [0, 9]")));
            }
            if self.kp.table_path.is_some() {
                return Err(invalid("kp.fixed and kp.table_path are mutually exclusive"));
            }
        }
        if !kp_range.contains(&self.kp.fallback) {
            return Err(invalid(format!(
                "kp.fallback {} outside [0, 9]",
                self.kp.fallback
            )));
        }
        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(invalid("cache.capacity must be greater than zero"));
        }
        if self.classifier.scan_hour_utc > 23 {
            return Err(invalid(format!(
                "classifier.scan_hour_utc {} outside 0..=23",
                self.classifier.scan_hour_utc
            )));
        }
        for c in self.contacts.iter().flatten() {
            check_coordinates(&c.name, c.latitude, c.longitude)?;
        }
        for p in &self.places {
            if p.name.trim().is_empty() {
                return Err(invalid("place name must not be empty"));
            }
            check_coordinates(&p.name, p.latitude, p.longitude)?;
        }
        Ok(())
    }

    /// Configured reference events, or the built-in table.
    pub fn contact_table(&self) -> ContactTable {
        match &self.contacts {
            Some(events) => ContactTable::new(events.clone()),
            None => ContactTable::builtin(),
        }
    }

    pub fn place_table(&self) -> PlaceTable {
        PlaceTable::new(self.places.clone())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn check_coordinates(name: &str, lat: f64, lon: f64) -> Result<(), ConfigError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid(format!("{name}: coordinates ({lat}, {lon}) out of range")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let s = EngineSettings::from_toml_str("").unwrap();
        assert_eq!(s, EngineSettings::default());
        assert_eq!(s.kp.fallback, 2.0);
        assert_eq!(s.classifier.scan_hour_utc, 15);
        assert_eq!(s.contact_table(), ContactTable::builtin());
    }

    #[test]
    fn parses_sections() {
        let s = EngineSettings::from_toml_str(
            r#"
            [kp]
            fixed = 6.5

            [cache]
            enabled = false
            capacity = 0

            [day_night]
            convention = "civil"

            [[contacts]]
            name = "Test"
            latitude = 10.0
            longitude = 20.0
            date = "2001-02-03"
            "#,
        )
        .unwrap();
        assert_eq!(s.kp.fixed, Some(6.5));
        assert!(!s.cache.enabled);
        assert_eq!(s.day_night.convention, NightConvention::Civil);
        assert_eq!(s.contact_table().len(), 1);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = EngineSettings::from_toml_str("[kp]\nfixd = 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    }

    #[test]
    fn rejects_bad_values() {
        for text in [
            "[kp]\nfixed = 9.5\n",
            "[kp]\nfallback = -1.0\n",
            "[kp]\nfixed = 2.0\ntable_path = \"kp.toml\"\n",
            "[cache]\ncapacity = 0\n",
            "[classifier]\nscan_hour_utc = 24\n",
            "[[places]]\nname = \"x\"\nlatitude = 91.0\nlongitude = 0.0\n",
            "[[places]]\nname = \" \"\nlatitude = 0.0\nlongitude = 0.0\n",
        ] {
            let err = EngineSettings::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
        }
    }
}

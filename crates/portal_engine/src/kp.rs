//! Geomagnetic Kp index providers.
//!
//! The classifier consumes a [`KpProvider`], which always answers. Fallible
//! data sources implement [`KpSource`] and are wrapped in [`FallbackKp`],
//! which substitutes [`FALLBACK_KP`] for anything missing and caches the
//! result per date.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::cache::TtlCache;

/// Value used whenever no reading is available.
pub const FALLBACK_KP: f64 = 2.0;

/// First year with Kp data; earlier dates always get the fallback.
pub const KP_EARLIEST_YEAR: i32 = 2000;

pub const DEFAULT_KP_CACHE_TTL: Duration = Duration::from_secs(12 * 3600);
pub const DEFAULT_KP_CACHE_CAPACITY: usize = 512;

/// Kp scale limits.
pub const KP_MIN: f64 = 0.0;
pub const KP_MAX: f64 = 9.0;

/// Errors from Kp data sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KpError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed Kp data: {0}")]
    Parse(String),
    #[error("no Kp reading for {0}")]
    Missing(NaiveDate),
}

/// Daily Kp that never fails.
pub trait KpProvider: Send + Sync {
    /// Kp in [0, 9] for a UTC date.
    fn kp_for(&self, date: NaiveDate) -> f64;
}

/// A fallible daily Kp source.
pub trait KpSource: Send + Sync {
    fn fetch(&self, date: NaiveDate) -> Result<f64, KpError>;
}

impl<S: KpSource + ?Sized> KpSource for Box<S> {
    fn fetch(&self, date: NaiveDate) -> Result<f64, KpError> {
        (**self).fetch(date)
    }
}

/// The same Kp for every date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedKp(pub f64);

impl Default for FixedKp {
    fn default() -> Self {
        Self(FALLBACK_KP)
    }
}

impl KpProvider for FixedKp {
    fn kp_for(&self, _date: NaiveDate) -> f64 {
        clamp_kp(self.0).unwrap_or(FALLBACK_KP)
    }
}

fn clamp_kp(kp: f64) -> Option<f64> {
    kp.is_finite().then(|| kp.clamp(KP_MIN, KP_MAX))
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct KpTableFile {
    #[serde(default, rename = "day")]
    days: Vec<KpDay>,
}

#[derive(Deserialize)]
struct KpDay {
    date: NaiveDate,
    kp: f64,
}

/// Daily Kp readings held in memory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpTable {
    values: BTreeMap<NaiveDate, f64>,
}

impl KpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, kp: f64) {
        self.values.insert(date, kp);
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load a table, choosing the format from the extension: `.json` is an
    /// xras daily document, anything else is TOML.
    pub fn load(path: &Path) -> Result<Self, KpError> {
        let content = std::fs::read_to_string(path).map_err(|source| KpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_xras_json(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        log::debug!("loaded {} Kp readings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse `[[day]]` entries with `date = "YYYY-MM-DD"` and `kp = <f64>`.
    pub fn from_toml_str(content: &str) -> Result<Self, KpError> {
        let file: KpTableFile =
            toml::from_str(content).map_err(|e| KpError::Parse(e.to_string()))?;
        let mut table = Self::new();
        for day in file.days {
            table.insert(day.date, day.kp);
        }
        Ok(table)
    }

    /// Parse an xras daily document.
    ///
    /// Each element of `data` has a `time` date and three-hourly readings
    /// under keys `h00`..`h21`, given as numbers or strings. Readings that are
    /// `"null"`, unparsable, or outside [0, 9] are skipped; a day's Kp is the
    /// mean of the rest. Days with no usable reading are left out.
    pub fn from_xras_json(content: &str) -> Result<Self, KpError> {
        let doc: serde_json::Value =
            serde_json::from_str(content).map_err(|e| KpError::Parse(e.to_string()))?;
        let days = doc
            .get("data")
            .and_then(|d| d.as_array())
            .ok_or_else(|| KpError::Parse("missing `data` array".into()))?;

        let mut table = Self::new();
        for day in days {
            let Some(obj) = day.as_object() else { continue };
            let Some(date) = obj
                .get("time")
                .and_then(|t| t.as_str())
                .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
            else {
                continue;
            };
            let readings: Vec<f64> = obj
                .iter()
                .filter(|(k, _)| k.starts_with('h') && k.len() == 3)
                .filter_map(|(_, v)| match v {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                })
                .filter(|kp| (KP_MIN..=KP_MAX).contains(kp))
                .collect();
            if readings.is_empty() {
                continue;
            }
            table.insert(date, readings.iter().sum::<f64>() / readings.len() as f64);
        }
        Ok(table)
    }
}

impl KpSource for KpTable {
    fn fetch(&self, date: NaiveDate) -> Result<f64, KpError> {
        self.get(date).ok_or(KpError::Missing(date))
    }
}

// ---------------------------------------------------------------------------
// Fallback wrapper
// ---------------------------------------------------------------------------

/// Infallible provider over a [`KpSource`].
///
/// Dates before `earliest_year`, source errors, and non-finite readings
/// resolve to the fallback value. Readings are clamped to [0, 9]. Resolved
/// values are cached per date.
pub struct FallbackKp<S> {
    source: S,
    fallback: f64,
    earliest_year: i32,
    cache: TtlCache<NaiveDate, f64>,
}

impl<S: KpSource> FallbackKp<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fallback: FALLBACK_KP,
            earliest_year: KP_EARLIEST_YEAR,
            cache: TtlCache::new(DEFAULT_KP_CACHE_CAPACITY, DEFAULT_KP_CACHE_TTL),
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_earliest_year(mut self, year: i32) -> Self {
        self.earliest_year = year;
        self
    }

    pub fn with_cache(mut self, capacity: usize, ttl: Duration) -> Self {
        self.cache = TtlCache::new(capacity, ttl);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn resolve(&self, date: NaiveDate) -> f64 {
        match self.source.fetch(date) {
            Ok(kp) => clamp_kp(kp).unwrap_or_else(|| {
                log::warn!("non-finite Kp for {date}, using {}", self.fallback);
                self.fallback
            }),
            Err(e) => {
                log::warn!("Kp unavailable: {e}; using {}", self.fallback);
                self.fallback
            }
        }
    }
}

impl<S: KpSource> KpProvider for FallbackKp<S> {
    fn kp_for(&self, date: NaiveDate) -> f64 {
        if date.year() < self.earliest_year {
            log::debug!("no Kp data before {}, using {}", self.earliest_year, self.fallback);
            return self.fallback;
        }
        self.cache.get_or_insert_with(date, || self.resolve(date))
    }
}

impl<S> std::fmt::Debug for FallbackKp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackKp")
            .field("fallback", &self.fallback)
            .field("earliest_year", &self.earliest_year)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

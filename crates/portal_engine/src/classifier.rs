//! The classification pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use portal_ephem::{Ephemeris, EphemerisConfig, MeeusEphemeris};
use portal_vedic::{DayNight, SolarDayNight};

use crate::astro::AstroState;
use crate::cache::ClassificationCache;
use crate::classification::{Classification, ClassificationDetail};
use crate::conditions::ConditionSet;
use crate::config::EngineSettings;
use crate::contacts::ContactTable;
use crate::decision::decide;
use crate::error::{ClassifyError, ConfigError};
use crate::kp::{FallbackKp, FixedKp, KpProvider, KpTable};
use crate::observation::{Observation, check_position};
use crate::scan::{DEFAULT_SCAN_HOUR_UTC, ScanPeriod};

/// Classifies observations against the decision table.
///
/// Collaborators are shared behind `Arc`, so a classifier can be cloned
/// cheaply into worker threads. Only invalid input and a missing ephemeris
/// are reported as errors; every other failure resolves to its logged
/// fallback.
pub struct Classifier {
    ephemeris: Arc<dyn Ephemeris>,
    kp: Arc<dyn KpProvider>,
    day_night: Arc<dyn DayNight>,
    contacts: ContactTable,
    cache: Option<Arc<ClassificationCache>>,
    extended: bool,
    scan_hour_utc: u32,
}

impl Classifier {
    /// Classifier with the built-in contact table, no cache, and basic output.
    pub fn new(
        ephemeris: Arc<dyn Ephemeris>,
        kp: Arc<dyn KpProvider>,
        day_night: Arc<dyn DayNight>,
    ) -> Self {
        Self {
            ephemeris,
            kp,
            day_night,
            contacts: ContactTable::builtin(),
            cache: None,
            extended: false,
            scan_hour_utc: DEFAULT_SCAN_HOUR_UTC,
        }
    }

    /// Build the full stack described by `settings`.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let ephemeris = MeeusEphemeris::new(&EphemerisConfig {
            lsk_path: settings.ephemeris.lsk_path.clone(),
        })?;
        let day_night =
            SolarDayNight::new(ephemeris.clone()).with_convention(settings.day_night.convention);

        let kp_settings = &settings.kp;
        let kp: Arc<dyn KpProvider> = match (&kp_settings.fixed, &kp_settings.table_path) {
            (Some(fixed), _) => Arc::new(FixedKp(*fixed)),
            (None, Some(path)) => Arc::new(
                FallbackKp::new(KpTable::load(path)?)
                    .with_fallback(kp_settings.fallback)
                    .with_earliest_year(kp_settings.earliest_year)
                    .with_cache(
                        kp_settings.cache_capacity,
                        Duration::from_secs(kp_settings.cache_ttl_secs),
                    ),
            ),
            (None, None) => {
                log::info!("no Kp source configured, using {}", kp_settings.fallback);
                Arc::new(FixedKp(kp_settings.fallback))
            }
        };

        let mut classifier = Self::new(Arc::new(ephemeris), kp, Arc::new(day_night))
            .with_contacts(settings.contact_table())
            .with_extended(settings.classifier.extended)
            .with_scan_hour(settings.classifier.scan_hour_utc);
        if settings.cache.enabled {
            classifier = classifier.with_cache(Arc::new(ClassificationCache::new(
                settings.cache.capacity,
                Duration::from_secs(settings.cache.ttl_secs),
            )));
        }
        Ok(classifier)
    }

    pub fn with_contacts(mut self, contacts: ContactTable) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_cache(mut self, cache: Arc<ClassificationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Also compute houses, the Moon's house, and the dasha for each result.
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// UTC hour used by [`classify_range`](Self::classify_range). Clamped to 0..=23.
    pub fn with_scan_hour(mut self, hour: u32) -> Self {
        self.scan_hour_utc = hour.min(23);
        self
    }

    pub fn cache(&self) -> Option<&ClassificationCache> {
        self.cache.as_deref()
    }

    pub fn scan_hour_utc(&self) -> u32 {
        self.scan_hour_utc
    }

    pub fn classify(
        &self,
        latitude: f64,
        longitude: f64,
        instant: DateTime<Utc>,
    ) -> Result<Classification, ClassifyError> {
        self.classify_observation(&Observation::new(latitude, longitude, instant)?)
    }

    pub fn classify_observation(&self, obs: &Observation) -> Result<Classification, ClassifyError> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(obs)) {
            log::debug!("classification cache hit for {:?}", obs);
            return Ok(hit);
        }

        let astro = AstroState::compute(self.ephemeris.as_ref(), obs, self.extended)?;
        let night = self
            .day_night
            .is_night(obs.latitude(), obs.longitude(), obs.instant());
        let kp = self.kp.kp_for(obs.date());
        let conditions = ConditionSet::evaluate(obs.latitude(), obs.longitude(), &astro, night, kp);
        let contact = self
            .contacts
            .find(obs.latitude(), obs.longitude(), obs.date())
            .map(|e| e.name.clone());
        let label = decide(&conditions, contact.is_some());
        log::debug!(
            "({:.4}, {:.4}) at {} -> {label}",
            obs.latitude(),
            obs.longitude(),
            obs.instant()
        );

        let result = Classification {
            label,
            detail: ClassificationDetail {
                observation: *obs,
                astro,
                conditions,
                contact,
            },
        };
        if let Some(cache) = &self.cache {
            cache.insert(obs, result.clone());
        }
        Ok(result)
    }

    /// Classify each day of `period` at the scan hour, keeping matches only.
    ///
    /// Impossible calendar dates are skipped. An ephemeris failure aborts the
    /// scan.
    pub fn classify_range(
        &self,
        latitude: f64,
        longitude: f64,
        period: &ScanPeriod,
    ) -> Result<Vec<(NaiveDate, Classification)>, ClassifyError> {
        check_position(latitude, longitude)?;
        let mut out = Vec::new();
        for day in period.candidate_days() {
            let obs = match Observation::from_calendar(
                latitude,
                longitude,
                day.year(),
                day.month(),
                day.day(),
                self.scan_hour_utc,
                0,
            ) {
                Ok(obs) => obs,
                Err(e) => {
                    log::debug!("skipping {day}: {e}");
                    continue;
                }
            };
            let result = self.classify_observation(&obs)?;
            if result.is_match() {
                out.push((day, result));
            }
        }
        Ok(out)
    }
}

impl Clone for Classifier {
    fn clone(&self) -> Self {
        Self {
            ephemeris: Arc::clone(&self.ephemeris),
            kp: Arc::clone(&self.kp),
            day_night: Arc::clone(&self.day_night),
            contacts: self.contacts.clone(),
            cache: self.cache.clone(),
            extended: self.extended,
            scan_hour_utc: self.scan_hour_utc,
        }
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("contacts", &self.contacts.len())
            .field("cache", &self.cache)
            .field("extended", &self.extended)
            .field("scan_hour_utc", &self.scan_hour_utc)
            .finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Classifier>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use portal_ephem::{EclipticPositions, EphemerisError};

    struct Fixed(EclipticPositions);

    impl Ephemeris for Fixed {
        fn positions(&self, _: f64, _: f64, _: &DateTime<Utc>) -> Result<EclipticPositions, EphemerisError> {
            Ok(self.0)
        }
    }

    struct Missing;

    impl Ephemeris for Missing {
        fn positions(&self, _: f64, _: f64, _: &DateTime<Utc>) -> Result<EclipticPositions, EphemerisError> {
            Err(EphemerisError::Unavailable("no data".into()))
        }
    }

    struct Night(bool);

    impl DayNight for Night {
        fn is_night(&self, _: f64, _: f64, _: &DateTime<Utc>) -> bool {
            self.0
        }
    }

    fn classifier(eph: impl Ephemeris + 'static, night: bool) -> Classifier {
        Classifier::new(Arc::new(eph), Arc::new(FixedKp(2.0)), Arc::new(Night(night)))
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn ephemeris_failure_is_surfaced() {
        let err = classifier(Missing, true).classify(40.0, 10.0, noon()).unwrap_err();
        assert!(matches!(err, ClassifyError::Ephemeris(EphemerisError::Unavailable(_))));
    }

    #[test]
    fn invalid_input_is_rejected() {
        let c = classifier(Missing, true);
        assert!(matches!(
            c.classify(100.0, 10.0, noon()),
            Err(ClassifyError::InvalidObservation(_))
        ));
        assert!(matches!(
            c.classify_range(0.0, 200.0, &ScanPeriod::Year(2024)),
            Err(ClassifyError::InvalidObservation(_))
        ));
    }

    #[test]
    fn cache_returns_stored_result() {
        let eph = Fixed(EclipticPositions {
            sun_deg: 0.0,
            moon_deg: 100.0,
            node_deg: 10.0,
        });
        let cache = Arc::new(ClassificationCache::new(8, Duration::from_secs(60)));
        let c = classifier(eph, true).with_cache(Arc::clone(&cache));
        let first = c.classify(40.0, 10.0, noon()).unwrap();
        assert_eq!(cache.len(), 1);
        let second = c.classify(40.0, 10.0, noon()).unwrap();
        assert_eq!(first, second);
        c.classify(40.0, 10.0, noon() + chrono::Duration::hours(1)).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn scan_hour_clamps() {
        assert_eq!(classifier(Missing, true).with_scan_hour(30).scan_hour_utc(), 23);
    }
}

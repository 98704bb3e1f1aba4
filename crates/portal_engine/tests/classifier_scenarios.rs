//! End-to-end classification with pinned and real collaborators.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use portal_ephem::{EclipticPositions, Ephemeris, EphemerisError, MeeusEphemeris};
use portal_engine::{
    ALL_EVENT_LABELS, Classifier, ContactEvent, ContactTable, EngineSettings, EventLabel,
    FallbackKp, FixedKp, KpError, KpSource, ScanPeriod,
};
use portal_vedic::{DayNight, Nakshatra, SolarDayNight};
use pretty_assertions::assert_eq;

const ROSWELL: (f64, f64) = (33.3943, -104.5230);

// ---------------------------------------------------------------------------
// Collaborator stubs
// ---------------------------------------------------------------------------

struct PinnedSky {
    sun: f64,
    moon: f64,
    node: f64,
}

impl Ephemeris for PinnedSky {
    fn positions(
        &self,
        _lat: f64,
        _lon: f64,
        _instant: &DateTime<Utc>,
    ) -> Result<EclipticPositions, EphemerisError> {
        Ok(EclipticPositions {
            sun_deg: self.sun,
            moon_deg: self.moon,
            node_deg: self.node,
        })
    }
}

struct AlwaysNight(bool);

impl DayNight for AlwaysNight {
    fn is_night(&self, _lat: f64, _lon: f64, _instant: &DateTime<Utc>) -> bool {
        self.0
    }
}

struct Offline;

impl KpSource for Offline {
    fn fetch(&self, date: NaiveDate) -> Result<f64, KpError> {
        Err(KpError::Missing(date))
    }
}

fn pinned(sun: f64, moon: f64, node: f64, night: bool, kp: f64) -> Classifier {
    Classifier::new(
        Arc::new(PinnedSky { sun, moon, node }),
        Arc::new(FixedKp(kp)),
        Arc::new(AlwaysNight(night)),
    )
}

fn roswell_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1947, 7, 5, 15, 0, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn roswell_with_contact_table_is_contact() {
    // Node 0.5° from Roswell's longitude (255.477°), Moon in Vishakha,
    // elongation 97°: C1, C4, C5, C6 hold and C2, C3 do not.
    let c = pinned(102.9, 200.0, 256.0, true, 2.0).with_contacts(ContactTable::new(vec![
        ContactEvent::new(
            "Roswell",
            ROSWELL.0,
            ROSWELL.1,
            NaiveDate::from_ymd_opt(1947, 7, 5).unwrap(),
        ),
    ]));
    let r = c.classify(ROSWELL.0, ROSWELL.1, roswell_instant()).unwrap();
    assert_eq!(r.label, EventLabel::Contact);
    assert_eq!(r.detail.contact.as_deref(), Some("Roswell"));
    assert_eq!(r.detail.astro.nakshatra, Some(Nakshatra::Vishakha));
    assert!(r.detail.conditions.node_proximity);
    assert!(!r.detail.conditions.critical_angle);
}

#[test]
fn roswell_without_contact_table_is_observational() {
    let c = pinned(102.9, 200.0, 256.0, true, 2.0).with_contacts(ContactTable::default());
    let r = c.classify(ROSWELL.0, ROSWELL.1, roswell_instant()).unwrap();
    assert_eq!(r.label, EventLabel::Observational);
    assert_eq!(r.detail.contact, None);
}

#[test]
fn geoportal_wins_over_observational() {
    // Elongation 220° (8th-like), node on the observer, night, quiet.
    let c = pinned(0.0, 220.0, 11.0, true, 2.0);
    let r = c.classify(40.0, 10.0, roswell_instant()).unwrap();
    let cond = &r.detail.conditions;
    assert!(cond.night && cond.quiet_geomagnetic && cond.node_proximity);
    assert_eq!(r.label, EventLabel::Geoportal);
}

#[test]
fn low_latitude_is_never_geoportal() {
    // Moon in Mula, elongation 10°, node on the observer.
    let quiet = pinned(235.0, 245.0, 10.5, true, 2.0);
    let r = quiet.classify(10.0, 10.0, roswell_instant()).unwrap();
    assert!(!r.detail.conditions.latitude_band);
    assert_eq!(r.label, EventLabel::Observational);

    let storm = pinned(235.0, 245.0, 10.5, true, 7.0);
    let r = storm.classify(10.0, 10.0, roswell_instant()).unwrap();
    assert_eq!(r.label, EventLabel::Emergency);
}

#[test]
fn daytime_without_critical_angle_is_none() {
    let c = pinned(0.0, 100.0, 200.0, false, 2.0);
    let r = c.classify(40.0, 10.0, roswell_instant()).unwrap();
    assert_eq!(r.label, EventLabel::NoMatch);
    assert!(!r.is_match());
}

#[test]
fn offline_kp_falls_back() {
    let c = Classifier::new(
        Arc::new(PinnedSky {
            sun: 0.0,
            moon: 100.0,
            node: 10.0,
        }),
        Arc::new(FallbackKp::new(Offline)),
        Arc::new(AlwaysNight(true)),
    );
    let t = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
    let r = c.classify(40.0, 10.0, t).unwrap();
    assert_eq!(r.detail.conditions.kp, 2.0);
    assert_eq!(r.label, EventLabel::Observational);
}

// ---------------------------------------------------------------------------
// Range scans
// ---------------------------------------------------------------------------

#[test]
fn range_skips_impossible_dates() {
    let c = pinned(0.0, 100.0, 10.0, true, 2.0).with_contacts(ContactTable::default());
    let hits = c
        .classify_range(40.0, 10.0, &ScanPeriod::Month { year: 2024, month: 2 })
        .unwrap();
    assert_eq!(hits.len(), 29);
    for (day, r) in &hits {
        assert_eq!(day.month(), 2);
        assert_eq!(r.detail.observation.instant().date_naive(), *day);
        assert_eq!(r.label, EventLabel::Observational);
    }
}

#[test]
fn range_drops_non_matches() {
    let c = pinned(0.0, 100.0, 200.0, false, 2.0);
    let hits = c.classify_range(40.0, 10.0, &ScanPeriod::Year(2023)).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn range_surfaces_missing_ephemeris() {
    struct Missing;
    impl Ephemeris for Missing {
        fn positions(
            &self,
            _: f64,
            _: f64,
            _: &DateTime<Utc>,
        ) -> Result<EclipticPositions, EphemerisError> {
            Err(EphemerisError::Unavailable("gone".into()))
        }
    }
    let c = Classifier::new(
        Arc::new(Missing),
        Arc::new(FixedKp(2.0)),
        Arc::new(AlwaysNight(true)),
    );
    assert!(
        c.classify_range(40.0, 10.0, &ScanPeriod::Month { year: 2024, month: 1 })
            .is_err()
    );
}

// ---------------------------------------------------------------------------
// Real ephemeris
// ---------------------------------------------------------------------------

fn real() -> Classifier {
    let mut settings = EngineSettings::default();
    settings.cache.enabled = false;
    settings.classifier.extended = true;
    Classifier::from_settings(&settings).unwrap()
}

#[test]
fn classification_is_deterministic() {
    let t = roswell_instant();
    let a = real().classify(ROSWELL.0, ROSWELL.1, t).unwrap();
    let b = real().classify(ROSWELL.0, ROSWELL.1, t).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn roswell_real_sky_is_daytime() {
    let r = real().classify(ROSWELL.0, ROSWELL.1, roswell_instant()).unwrap();
    assert!(!r.detail.conditions.night);
    assert!((r.detail.astro.sun_deg - 102.9).abs() < 0.5, "sun {}", r.detail.astro.sun_deg);
    assert!(r.detail.astro.dasha.is_some());
}

#[test]
fn every_valid_input_classifies() {
    let c = real();
    let times = [
        Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(1947, 7, 5, 15, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 12, 21, 23, 59, 59).unwrap(),
    ];
    for lat in [-90.0, -66.6, -25.0, 0.0, 33.3943, 50.0, 78.2, 90.0] {
        for lon in [-180.0, -104.523, 0.0, 77.2, 180.0] {
            for t in times {
                let r = c.classify(lat, lon, t).unwrap();
                assert!(ALL_EVENT_LABELS.contains(&r.label));
            }
        }
    }
}

#[test]
fn shared_across_threads() {
    let c = Arc::new(
        Classifier::new(
            Arc::new(MeeusEphemeris::default()),
            Arc::new(FixedKp(2.0)),
            Arc::new(SolarDayNight::new(MeeusEphemeris::default())),
        )
        .with_cache(Arc::new(portal_engine::ClassificationCache::new(
            64,
            std::time::Duration::from_secs(60),
        ))),
    );
    let expected = c.classify(45.0, 30.0, roswell_instant()).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            let c = Arc::clone(&c);
            let expected = expected.clone();
            s.spawn(move || {
                for _ in 0..10 {
                    assert_eq!(c.classify(45.0, 30.0, roswell_instant()).unwrap(), expected);
                }
            });
        }
    });
}

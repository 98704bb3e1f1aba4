//! Settings files, Kp tables, and classifier construction from disk.

use std::io::Write;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use portal_ephem::EphemerisError;
use portal_engine::{Classifier, ConfigError, EngineSettings, Geocoder, KpProvider, KpTable};
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

fn toml_path(p: &Path) -> String {
    p.display().to_string().replace('\\', "/")
}

const XRAS: &str = r#"{"data": [
    {"time": "2024-05-10", "h00": "7.0", "h03": "8.0", "h06": "null", "h09": "9.0"},
    {"time": "2024-05-11", "h00": "1.0", "h03": "2.0"}
]}"#;

#[test]
fn load_full_settings() {
    let kp = write_temp(".json", XRAS);
    let cfg = write_temp(
        ".toml",
        &format!(
            r#"
            [kp]
            table_path = "{}"

            [classifier]
            extended = true

            [[places]]
            name = "Roswell"
            latitude = 33.3943
            longitude = -104.523
            "#,
            toml_path(kp.path())
        ),
    );
    let settings = EngineSettings::load(cfg.path()).unwrap();
    assert!(settings.classifier.extended);
    assert_eq!(
        settings.place_table().resolve("roswell"),
        Some((33.3943, -104.523))
    );

    let classifier = Classifier::from_settings(&settings).unwrap();
    let t = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
    let r = classifier.classify(33.3943, -104.523, t).unwrap();
    assert!((r.detail.conditions.kp - 8.0).abs() < 1e-12);
    assert!(!r.detail.conditions.quiet_geomagnetic);
    assert!(r.detail.astro.house_system.is_some());
    assert!(classifier.cache().is_some());

    // Missing days and pre-2000 dates use the fallback.
    let t = Utc.with_ymd_and_hms(2024, 5, 12, 15, 0, 0).unwrap();
    assert_eq!(classifier.classify(33.3943, -104.523, t).unwrap().detail.conditions.kp, 2.0);
}

#[test]
fn kp_table_formats() {
    let json = write_temp(".json", XRAS);
    let table = KpTable::load(json.path()).unwrap();
    assert_eq!(table.get(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()), Some(1.5));

    let toml = write_temp(".toml", "[[day]]\ndate = \"2010-01-01\"\nkp = 4.5\n");
    let table = KpTable::load(toml.path()).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn fixed_kp_setting() {
    let settings = EngineSettings::from_toml_str("[kp]\nfixed = 6.5\n").unwrap();
    let classifier = Classifier::from_settings(&settings).unwrap();
    let t = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(classifier.classify(40.0, 0.0, t).unwrap().detail.conditions.kp, 6.5);
}

#[test]
fn fallback_provider_directly() {
    let json = write_temp(".json", XRAS);
    let kp = portal_engine::FallbackKp::new(KpTable::load(json.path()).unwrap());
    assert_eq!(kp.kp_for(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()), 8.0);
    assert_eq!(kp.kp_for(NaiveDate::from_ymd_opt(1999, 5, 10).unwrap()), 2.0);
}

#[test]
fn missing_leap_second_kernel_is_fatal() {
    let settings =
        EngineSettings::from_toml_str("[ephemeris]\nlsk_path = \"/nonexistent/naif0012.tls\"\n")
            .unwrap();
    let err = Classifier::from_settings(&settings).unwrap_err();
    assert!(
        matches!(err, ConfigError::Ephemeris(EphemerisError::Unavailable(_))),
        "{err}"
    );
}

#[test]
fn missing_kp_table_is_an_error() {
    let settings =
        EngineSettings::from_toml_str("[kp]\ntable_path = \"/nonexistent/kp.json\"\n").unwrap();
    assert!(matches!(
        Classifier::from_settings(&settings),
        Err(ConfigError::Kp(_))
    ));
}

#[test]
fn missing_settings_file() {
    let err = EngineSettings::load(Path::new("/nonexistent/portal.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

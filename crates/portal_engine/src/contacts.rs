//! Historical reference events for the CONTACT rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum latitude and longitude difference for a match, degrees.
pub const CONTACT_TOLERANCE_DEG: f64 = 0.1;

/// One reference event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// UTC calendar date.
    pub date: NaiveDate,
}

impl ContactEvent {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            date,
        }
    }

    /// Within [`CONTACT_TOLERANCE_DEG`] on both axes and on the same date.
    pub fn matches(&self, latitude: f64, longitude: f64, date: NaiveDate) -> bool {
        self.date == date
            && (self.latitude - latitude).abs() <= CONTACT_TOLERANCE_DEG
            && (self.longitude - longitude).abs() <= CONTACT_TOLERANCE_DEG
    }
}

/// Static table of reference events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactTable {
    events: Vec<ContactEvent>,
}

// (name, lat, lon, year, month, day)
const BUILTIN: [(&str, f64, f64, i32, u32, u32); 5] = [
    ("Roswell", 33.3943, -104.5230, 1947, 7, 5),
    ("Tunguska", 60.8858, 101.8939, 1908, 6, 30),
    ("Kecksburg", 40.1840, -79.4617, 1965, 12, 9),
    ("Rendlesham Forest", 52.0866, 1.4366, 1980, 12, 26),
    ("Phoenix Lights", 33.4484, -112.0740, 1997, 3, 13),
];

impl ContactTable {
    pub fn new(events: Vec<ContactEvent>) -> Self {
        Self { events }
    }

    /// The built-in reference table.
    pub fn builtin() -> Self {
        let events = BUILTIN
            .iter()
            .filter_map(|&(name, lat, lon, y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| ContactEvent::new(name, lat, lon, date))
            })
            .collect();
        Self { events }
    }

    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First event matching the position and date.
    pub fn find(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Option<&ContactEvent> {
        self.events
            .iter()
            .find(|e| e.matches(latitude, longitude, date))
    }

    pub fn matches(&self, latitude: f64, longitude: f64, date: NaiveDate) -> bool {
        self.find(latitude, longitude, date).is_some()
    }
}

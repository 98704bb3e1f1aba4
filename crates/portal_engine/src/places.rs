//! Static place-name lookup.

use serde::{Deserialize, Serialize};

/// Resolves a place name to coordinates.
pub trait Geocoder: Send + Sync {
    /// `(latitude, longitude)` in degrees, or `None` when not found.
    fn resolve(&self, name: &str) -> Option<(f64, f64)>;
}

/// A named coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Configured places, matched by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceTable {
    places: Vec<Place>,
}

impl PlaceTable {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for PlaceTable {
    fn resolve(&self, name: &str) -> Option<(f64, f64)> {
        let wanted = name.trim().to_lowercase();
        self.places
            .iter()
            .find(|p| p.name.trim().to_lowercase() == wanted)
            .map(|p| (p.latitude, p.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PlaceTable {
        PlaceTable::new(vec![
            Place {
                name: "Roswell".into(),
                latitude: 33.3943,
                longitude: -104.523,
            },
            Place {
                name: "Москва".into(),
                latitude: 55.7558,
                longitude: 37.6173,
            },
        ])
    }

    #[test]
    fn case_insensitive_match() {
        assert_eq!(table().resolve("  roswell "), Some((33.3943, -104.523)));
        assert_eq!(table().resolve("МОСКВА"), Some((55.7558, 37.6173)));
    }

    #[test]
    fn unknown_place() {
        assert_eq!(table().resolve("Atlantis"), None);
        assert_eq!(PlaceTable::default().resolve("Roswell"), None);
    }
}

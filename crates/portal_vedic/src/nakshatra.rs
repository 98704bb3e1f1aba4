//! Nakshatra (lunar mansion) lookup.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each, starting with Ashwini at 0 deg. Each nakshatra
//! has 4 padas of 3 deg 20'.
//!
//! Boundaries are half-open: `[start, end)`.

use serde::{Deserialize, Serialize};

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Overshoot past either end of [0, 360) that still counts as a rounding
/// artefact and resolves to Revati.
const EDGE_TOLERANCE_DEG: f64 = 1e-9;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in canonical order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Display name, with spaces between compound words.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Nakshatra at a 0-based index, if in range.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 27 {
            Some(ALL_NAKSHATRAS[index as usize])
        } else {
            None
        }
    }

    /// Start longitude of this nakshatra in degrees.
    pub fn start_deg(self) -> f64 {
        f64::from(self.index()) * NAKSHATRA_SPAN
    }

    /// End longitude (exclusive) of this nakshatra in degrees.
    pub fn end_deg(self) -> f64 {
        f64::from(self.index() + 1) * NAKSHATRA_SPAN
    }

    /// All 27 nakshatras in order.
    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS
    }
}

impl std::fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Nakshatra with pada detail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Degrees traversed within the nakshatra, [0, 13.333...).
    pub degrees_in_nakshatra: f64,
}

impl NakshatraInfo {
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fn fraction_elapsed(&self) -> f64 {
        self.degrees_in_nakshatra / NAKSHATRA_SPAN
    }
}

/// Index into [`ALL_NAKSHATRAS`] for a longitude, or `None` when non-finite.
fn segment_index(deg: f64) -> Option<usize> {
    if !deg.is_finite() {
        return None;
    }
    let idx = if (0.0..360.0).contains(&deg) {
        (deg / NAKSHATRA_SPAN).floor() as usize
    } else if (deg >= 360.0 && deg - 360.0 <= EDGE_TOLERANCE_DEG)
        || (deg < 0.0 && deg >= -EDGE_TOLERANCE_DEG)
    {
        26
    } else {
        (deg.rem_euclid(360.0) / NAKSHATRA_SPAN).floor() as usize
    };
    Some(idx.min(26))
}

/// Nakshatra containing an ecliptic longitude in degrees.
///
/// Returns `None` (the unknown sentinel) for NaN or infinite input.
/// Exactly 360° and rounding overshoot resolve to Revati.
pub fn nakshatra_for(deg: f64) -> Option<Nakshatra> {
    segment_index(deg).map(|i| ALL_NAKSHATRAS[i])
}

/// Nakshatra and pada for an ecliptic longitude in degrees.
pub fn nakshatra_info(deg: f64) -> Option<NakshatraInfo> {
    let idx = segment_index(deg)?;
    let nakshatra = ALL_NAKSHATRAS[idx];
    let lon = if (0.0..360.0).contains(&deg) {
        deg
    } else {
        deg.rem_euclid(360.0)
    };
    let degrees_in_nakshatra = (lon - nakshatra.start_deg()).clamp(0.0, NAKSHATRA_SPAN);
    let pada = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3) + 1;
    Some(NakshatraInfo {
        nakshatra,
        pada,
        degrees_in_nakshatra,
    })
}

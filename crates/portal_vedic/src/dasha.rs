//! Vimshottari mahadasha lookup.
//!
//! The Moon's nakshatra selects the ruling graha of the running
//! mahadasha. Lords repeat every nine nakshatras in the fixed order
//! Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh, and the
//! nine periods sum to 120 years.
//!
//! Provenance: BPHS, Vimshottari dasha chapter.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::nakshatra::{Nakshatra, NakshatraInfo, nakshatra_info};

/// Length of the full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: u32 = 120;

/// Lord sequence with mahadasha length in years.
const VIMSHOTTARI_LORDS: [(Graha, u32); 9] = [
    (Graha::Ketu, 7),
    (Graha::Shukra, 20),
    (Graha::Surya, 6),
    (Graha::Chandra, 10),
    (Graha::Mangal, 7),
    (Graha::Rahu, 18),
    (Graha::Guru, 16),
    (Graha::Shani, 19),
    (Graha::Buddh, 17),
];

/// Lord used when the nakshatra is unknown.
pub const DEFAULT_DASHA_LORD: Graha = Graha::Ketu;

/// Running mahadasha derived from the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    /// Ruling graha.
    pub planet: Graha,
    /// Full mahadasha length in years.
    pub years: u32,
    /// Years remaining in the mahadasha, from the Moon's progress through its nakshatra.
    pub balance_years: f64,
}

/// Vimshottari lord and period length of a nakshatra.
pub const fn vimshottari_lord(nakshatra: Nakshatra) -> (Graha, u32) {
    VIMSHOTTARI_LORDS[(nakshatra.index() % 9) as usize]
}

/// Mahadasha for a nakshatra, with the full period as balance.
///
/// An unknown nakshatra maps to [`DEFAULT_DASHA_LORD`] and logs a warning.
pub fn dasha_for(nakshatra: Option<Nakshatra>) -> DashaPeriod {
    let (planet, years) = match nakshatra {
        Some(n) => vimshottari_lord(n),
        None => {
            log::warn!("unknown nakshatra, using {} as dasha lord", DEFAULT_DASHA_LORD);
            (DEFAULT_DASHA_LORD, VIMSHOTTARI_LORDS[0].1)
        }
    };
    DashaPeriod {
        planet,
        years,
        balance_years: f64::from(years),
    }
}

/// Mahadasha for a Moon position, with the balance scaled by the
/// unelapsed part of the nakshatra.
pub fn dasha_for_moon(info: Option<&NakshatraInfo>) -> DashaPeriod {
    let mut period = dasha_for(info.map(|i| i.nakshatra));
    if let Some(info) = info {
        period.balance_years = f64::from(period.years) * (1.0 - info.fraction_elapsed());
    }
    period
}

/// Mahadasha for a Moon longitude in degrees.
pub fn dasha_for_longitude(moon_deg: f64) -> DashaPeriod {
    dasha_for_moon(nakshatra_info(moon_deg).as_ref())
}

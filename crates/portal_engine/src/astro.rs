//! Astronomical state derived for one observation.

use serde::{Deserialize, Serialize};

use portal_ephem::{Ephemeris, EphemerisError, normalize_360};
use portal_vedic::{
    DashaPeriod, HouseSystem, Nakshatra, Rashi, dasha_for_moon, houses_for, moon_house,
    nakshatra_info, rashi_for,
};

use crate::observation::Observation;

/// Sun, Moon, and node longitudes with the lookups that depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AstroState {
    pub sun_deg: f64,
    pub moon_deg: f64,
    /// Mean ascending node (Rahu).
    pub node_deg: f64,
    /// `None` is the unknown-nakshatra sentinel.
    pub nakshatra: Option<Nakshatra>,
    pub pada: Option<u8>,
    pub moon_sign: Option<Rashi>,
    /// Filled in extended mode only.
    pub dasha: Option<DashaPeriod>,
    pub moon_house: Option<u8>,
    /// Cusps of houses 1 through 12, in degrees.
    pub house_cusps: Option<[f64; 12]>,
    pub house_system: Option<HouseSystem>,
}

impl AstroState {
    /// Query the ephemeris for an observation.
    ///
    /// `extended` adds houses, the Moon's house, and the running dasha. These
    /// are reported but never feed the decision table.
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        observation: &Observation,
        extended: bool,
    ) -> Result<Self, EphemerisError> {
        let positions = ephemeris.positions(
            observation.latitude(),
            observation.longitude(),
            observation.instant(),
        )?;
        let mut state = Self::from_longitudes(positions.sun_deg, positions.moon_deg, positions.node_deg);
        if extended {
            let info = nakshatra_info(state.moon_deg);
            state.dasha = Some(dasha_for_moon(info.as_ref()));
            let houses = houses_for(
                observation.latitude(),
                observation.longitude(),
                observation.instant(),
            );
            state.moon_house = moon_house(state.moon_deg, &houses.cusps);
            state.house_cusps = Some(houses.cusps);
            state.house_system = Some(houses.system);
        }
        Ok(state)
    }

    /// State from raw longitudes (degrees), without the extended fields.
    pub fn from_longitudes(sun_deg: f64, moon_deg: f64, node_deg: f64) -> Self {
        let moon_deg = normalize_360(moon_deg);
        let info = nakshatra_info(moon_deg);
        if info.is_none() {
            log::warn!("moon longitude {moon_deg} has no nakshatra");
        }
        Self {
            sun_deg: normalize_360(sun_deg),
            moon_deg,
            node_deg: normalize_360(node_deg),
            nakshatra: info.map(|i| i.nakshatra),
            pada: info.map(|i| i.pada),
            moon_sign: rashi_for(moon_deg),
            dasha: None,
            moon_house: None,
            house_cusps: None,
            house_system: None,
        }
    }
}

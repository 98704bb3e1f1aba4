//! The six boolean conditions behind the decision table.

use serde::{Deserialize, Serialize};

use portal_vedic::Nakshatra;

use crate::astro::AstroState;

/// Maximum observer-to-node angular distance for node proximity, degrees.
pub const NODE_ORB_DEG: f64 = 3.0;

/// Sun–Moon elongation band called "8th-house-like", inclusive.
pub const EIGHTH_LIKE_DEG: (f64, f64) = (210.0, 240.0);

/// Sun–Moon elongation band called "12th-house-like", inclusive.
pub const TWELFTH_LIKE_DEG: (f64, f64) = (330.0, 360.0);

/// Absolute latitude band, inclusive.
pub const LATITUDE_BAND_DEG: (f64, f64) = (25.0, 50.0);

/// Kp at or below this is quiet.
pub const QUIET_KP_MAX: f64 = 5.0;

/// Kp at or above this is storm level.
pub const STORM_KP_MIN: f64 = 6.0;

/// Mansions that satisfy mansion membership.
pub const MANSION_ALLOW_LIST: [Nakshatra; 9] = [
    Nakshatra::Ashwini,
    Nakshatra::Shatabhisha,
    Nakshatra::Mula,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
];

/// Angular distance between an observer longitude and the node, degrees.
///
/// The longitude is first mapped to [0, 360]; the result is the smallest of
/// the direct, +360 and −360 differences.
pub fn node_distance_deg(longitude: f64, node_deg: f64) -> f64 {
    let lon = if longitude < 0.0 {
        longitude + 360.0
    } else {
        longitude
    };
    let d = lon - node_deg;
    d.abs().min((d + 360.0).abs()).min((d - 360.0).abs())
}

/// Sun–Moon elongation `(moon − sun) mod 360`, degrees in [0, 360).
pub fn elongation_deg(sun_deg: f64, moon_deg: f64) -> f64 {
    (moon_deg - sun_deg).rem_euclid(360.0)
}

fn within(value: f64, (lo, hi): (f64, f64)) -> bool {
    lo <= value && value <= hi
}

/// Evaluated conditions plus the measurements they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    /// C1: observer longitude within [`NODE_ORB_DEG`] of the node.
    pub node_proximity: bool,
    /// C2: 8th-like, 12th-like, or Moon in Mula.
    pub critical_angle: bool,
    /// C3: Moon in [`MANSION_ALLOW_LIST`].
    pub mansion_member: bool,
    /// C4: |latitude| in [`LATITUDE_BAND_DEG`].
    pub latitude_band: bool,
    /// C5
    pub night: bool,
    /// C6: Kp ≤ [`QUIET_KP_MAX`].
    pub quiet_geomagnetic: bool,
    pub eighth_like: bool,
    pub twelfth_like: bool,
    pub in_mula: bool,
    pub node_distance_deg: f64,
    pub elongation_deg: f64,
    pub kp: f64,
}

impl ConditionSet {
    pub fn evaluate(latitude: f64, longitude: f64, astro: &AstroState, night: bool, kp: f64) -> Self {
        let node_distance = node_distance_deg(longitude, astro.node_deg);
        let elongation = elongation_deg(astro.sun_deg, astro.moon_deg);
        let eighth_like = within(elongation, EIGHTH_LIKE_DEG);
        let twelfth_like = within(elongation, TWELFTH_LIKE_DEG);
        let in_mula = astro.nakshatra == Some(Nakshatra::Mula);
        let mansion_member = astro
            .nakshatra
            .is_some_and(|n| MANSION_ALLOW_LIST.contains(&n));

        Self {
            node_proximity: node_distance <= NODE_ORB_DEG,
            critical_angle: eighth_like || twelfth_like || in_mula,
            mansion_member,
            latitude_band: within(latitude.abs(), LATITUDE_BAND_DEG),
            night,
            quiet_geomagnetic: kp <= QUIET_KP_MAX,
            eighth_like,
            twelfth_like,
            in_mula,
            node_distance_deg: node_distance,
            elongation_deg: elongation,
            kp,
        }
    }

    /// 8th-like or 12th-like elongation.
    pub fn house_like(&self) -> bool {
        self.eighth_like || self.twelfth_like
    }

    /// Kp at storm level.
    pub fn storm(&self) -> bool {
        self.kp >= STORM_KP_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn astro(sun: f64, moon: f64, node: f64) -> AstroState {
        AstroState::from_longitudes(sun, moon, node)
    }

    #[test]
    fn node_orb_is_inclusive() {
        assert_eq!(node_distance_deg(10.0, 7.0), 3.0);
        let c = ConditionSet::evaluate(40.0, 10.0, &astro(0.0, 100.0, 7.0), false, 2.0);
        assert!(c.node_proximity);
        let c = ConditionSet::evaluate(40.0, 10.0001, &astro(0.0, 100.0, 7.0), false, 2.0);
        assert!(!c.node_proximity, "distance {}", c.node_distance_deg);
    }

    #[test]
    fn node_distance_wraps() {
        assert!((node_distance_deg(179.0, 181.0) - 2.0).abs() < 1e-12);
        assert!((node_distance_deg(-179.0, 179.0) - 2.0).abs() < 1e-12);
        assert!((node_distance_deg(1.0, 359.0) - 2.0).abs() < 1e-12);
        assert!((node_distance_deg(-1.0, 1.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn elongation_bands_include_endpoints() {
        for (moon, eighth, twelfth) in [
            (210.0, true, false),
            (240.0, true, false),
            (240.5, false, false),
            (330.0, false, true),
            (359.999, false, true),
            (0.0, false, false),
        ] {
            let c = ConditionSet::evaluate(40.0, 0.0, &astro(0.0, moon, 90.0), false, 2.0);
            assert_eq!((c.eighth_like, c.twelfth_like), (eighth, twelfth), "moon {moon}");
        }
    }

    #[test]
    fn mula_sets_critical_angle() {
        // Moon in Mula, elongation 10°.
        let c = ConditionSet::evaluate(40.0, 0.0, &astro(235.0, 245.0, 90.0), false, 2.0);
        assert!(c.in_mula && c.mansion_member && c.critical_angle);
        assert!(!c.house_like());
    }

    #[test]
    fn unknown_mansion_is_not_a_member() {
        let c = ConditionSet::evaluate(40.0, 0.0, &astro(0.0, f64::NAN, 90.0), false, 2.0);
        assert!(!c.mansion_member && !c.in_mula);
    }

    #[test]
    fn latitude_band_uses_absolute_value() {
        let a = astro(0.0, 100.0, 90.0);
        assert!(ConditionSet::evaluate(-25.0, 0.0, &a, false, 2.0).latitude_band);
        assert!(ConditionSet::evaluate(50.0, 0.0, &a, false, 2.0).latitude_band);
        assert!(!ConditionSet::evaluate(10.0, 0.0, &a, false, 2.0).latitude_band);
        assert!(!ConditionSet::evaluate(-50.01, 0.0, &a, false, 2.0).latitude_band);
    }

    #[test]
    fn kp_thresholds() {
        let a = astro(0.0, 100.0, 90.0);
        let quiet = ConditionSet::evaluate(40.0, 0.0, &a, false, 5.0);
        assert!(quiet.quiet_geomagnetic && !quiet.storm());
        let between = ConditionSet::evaluate(40.0, 0.0, &a, false, 5.5);
        assert!(!between.quiet_geomagnetic && !between.storm());
        let storm = ConditionSet::evaluate(40.0, 0.0, &a, false, 6.0);
        assert!(storm.storm());
    }
}

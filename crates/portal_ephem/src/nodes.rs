//! Mean ascending lunar node (Rahu).
//!
//! The node longitude is the fifth Delaunay argument Ω from
//! IERS Conventions 2010, Table 5.2e.

use crate::fundamental::fundamental_arguments;
use crate::normalize_360;

/// Mean Rahu ecliptic longitude in degrees [0, 360).
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn mean_rahu_deg(t: f64) -> f64 {
    normalize_360(fundamental_arguments(t)[4].to_degrees())
}

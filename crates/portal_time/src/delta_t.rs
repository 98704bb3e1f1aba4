//! ΔT = TT − UT1 polynomial model.
//!
//! Piecewise polynomials from Espenak & Meeus, "Five Millennium Canon of
//! Solar Eclipses" (NASA/TP-2006-214141), restricted to 1800–2150 plus the
//! long-term parabola outside that window.

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    if year < 1900.0 {
        long_term(year)
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if year < 2150.0 {
        long_term(year) - 0.5628 * (2150.0 - year)
    } else {
        long_term(year)
    }
}

fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_2000_near_64s() {
        let dt = delta_t_seconds(2000.0);
        assert!((dt - 63.86).abs() < 1e-9, "ΔT(2000) = {dt}");
    }

    #[test]
    fn mid_century_1947() {
        // Observed ΔT in 1947 was about 28 s.
        let dt = delta_t_seconds(1947.5);
        assert!((dt - 28.0).abs() < 1.5, "ΔT(1947.5) = {dt}");
    }

    #[test]
    fn continuous_at_2005_boundary() {
        let before = delta_t_seconds(2004.999_999);
        let after = delta_t_seconds(2005.0);
        assert!((before - after).abs() < 0.1, "{before} vs {after}");
    }

    #[test]
    fn continuous_at_2050_boundary() {
        let before = delta_t_seconds(2049.999_999);
        let after = delta_t_seconds(2050.0);
        assert!((before - after).abs() < 1.0, "{before} vs {after}");
    }

    #[test]
    fn grows_in_far_future() {
        assert!(delta_t_seconds(2300.0) > delta_t_seconds(2200.0));
    }
}

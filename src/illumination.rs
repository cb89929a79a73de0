//! Solar position and the Earth's shadow.

use nalgebra::Vector3;

use crate::consts::{ASTRONOMICAL_UNIT_KM, DEG2RAD, EARTH_RADIUS_KM, SECS_PER_DAY, SOLAR_RADIUS_KM, TWO_PI};
use crate::math::modulus;

/// Julian date of 1900 January 0.5
const JD_1900: f64 = 2_415_020.0;

/// Whether a satellite is in the Earth's shadow, and by how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eclipse {
    /// Earth's angular semi-diameter, less the Sun's, less their separation
    /// (radians). Positive in shadow.
    pub depth: f64,
    pub eclipsed: bool,
}

fn radians(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// TT - UT, in seconds, as a rough fit for the late 20th century.
fn delta_et(year: f64) -> f64 {
    26.465 + 0.747622 * (year - 1950.0) + 1.886913 * (TWO_PI * (year - 1975.0) / 33.0).sin()
}

/// Geocentric inertial position of the Sun, in km.
pub fn sun_position(julian_utc: f64) -> Vector3<f64> {
    let mjd = julian_utc - JD_1900;
    let year = 1900.0 + mjd / 365.25;
    let t = (mjd + delta_et(year) / SECS_PER_DAY) / 36525.0;

    let m = radians(modulus(
        358.47583 + modulus(35999.04975 * t, 360.0) - (0.000150 + 0.0000033 * t) * t * t,
        360.0,
    ));
    let l = radians(modulus(
        279.69668 + modulus(36000.76892 * t, 360.0) + 0.0003025 * t * t,
        360.0,
    ));
    let e = 0.01675104 - (0.0000418 + 0.000000126 * t) * t;
    let c = radians(
        (1.919460 - (0.004789 + 0.000014 * t) * t) * m.sin()
            + (0.020094 - 0.000100 * t) * (2.0 * m).sin()
            + 0.000293 * (3.0 * m).sin(),
    );
    let o = radians(modulus(259.18 - 1934.142 * t, 360.0));
    let lsa = modulus(l + c - radians(0.00569 - 0.00479 * o.sin()), TWO_PI);
    let nu = modulus(m + c, TWO_PI);
    let mut r = 1.0000002 * (1.0 - e * e) / (1.0 + e * nu.cos());
    let eps = radians(
        23.452294 - (0.0130125 + (0.00000164 - 0.000000503 * t) * t) * t + 0.00256 * o.cos(),
    );
    r *= ASTRONOMICAL_UNIT_KM;

    Vector3::new(
        r * lsa.cos(),
        r * lsa.sin() * eps.cos(),
        r * lsa.sin() * eps.sin(),
    )
}

/// Compares the apparent sizes of the Earth and Sun, as seen from the
/// satellite, with the angle between them.
pub fn eclipse(position: &Vector3<f64>, sun: &Vector3<f64>) -> Eclipse {
    let sd_earth = (EARTH_RADIUS_KM / position.norm()).asin();
    let rho = sun - position;
    let sd_sun = (SOLAR_RADIUS_KM / rho.norm()).asin();
    let earth = -position;
    let delta = sun.angle(&earth);

    let depth = sd_earth - sd_sun - delta;
    let eclipsed = if sd_earth < sd_sun { false } else { depth >= 0.0 };

    Eclipse { depth, eclipsed }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    // 2009-06-21 12:00 UTC, close to the June solstice
    const SOLSTICE_JD: f64 = 2_455_004.0;

    #[test]
    fn test_sun_distance() {
        let sun = sun_position(SOLSTICE_JD);
        // Aphelion is in early July
        assert_relative_eq!(sun.norm() / ASTRONOMICAL_UNIT_KM, 1.0163, epsilon = 1e-3);
    }

    #[test]
    fn test_sun_declination_at_solstice() {
        let sun = sun_position(SOLSTICE_JD);
        let declination = (sun.z / sun.norm()).asin().to_degrees();
        assert_relative_eq!(declination, 23.44, epsilon = 0.05);
    }

    #[test]
    fn test_eclipse() {
        let sun = sun_position(SOLSTICE_JD);
        let altitude = EARTH_RADIUS_KM + 800.0;

        let behind = -sun.normalize() * altitude;
        let shadowed = eclipse(&behind, &sun);
        assert!(shadowed.eclipsed);
        assert!(shadowed.depth > 0.0);

        let sunward = sun.normalize() * altitude;
        let lit = eclipse(&sunward, &sun);
        assert!(!lit.eclipsed);
        assert!(lit.depth < 0.0);
    }

    #[test]
    fn test_far_satellite_never_eclipsed() {
        // Beyond the umbra the Sun looks bigger than the Earth
        let sun = sun_position(SOLSTICE_JD);
        let far = -sun.normalize() * 2.0e6;
        let result = eclipse(&far, &sun);
        assert!(!result.eclipsed);
    }
}

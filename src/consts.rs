use std::f64::consts::PI;

pub const TWO_PI: f64 = PI * 2.0;
pub const PI_OVER_TWO: f64 = PI / 2.0;
pub const DEG2RAD: f64 = 1.745329251994330E-2;
pub const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Convergence tolerance shared by the iterative solvers, in radians.
pub const EPSILON: f64 = 1.0E-12;

pub const MINS_PER_DAY: f64 = 1.44E3;
pub const SECS_PER_DAY: f64 = 8.64E4;

// WGS '72 gravity model, in Earth radii and minutes
pub const XKE: f64 = 7.43669161E-2;
pub const CK2: f64 = 5.413079E-4;
pub const CK4: f64 = 6.209887E-7;
pub const J2_HARMONIC: f64 = 1.0826158E-3;
pub const J3_HARMONIC: f64 = -2.53881E-6;
pub const J4_HARMONIC: f64 = -1.65597E-6;

// Atmospheric density parameters, adjusted for low perigees
pub const S: f64 = 1.012229;
pub const QOMS2T: f64 = 1.880279E-09;
pub const PERIGEE_156_KM: f64 = 156.0;

pub const EARTH_RADIUS_KM: f64 = 6.378137E3;
pub const FLATTENING_FACTOR: f64 = 3.35281066474748E-3;
pub const EARTH_ROTATIONS_PER_SIDEREAL_DAY: f64 = 1.00273790934;
/// Earth's rotation rate, in rad/s
pub const MFACTOR: f64 = 7.292115E-5;

pub const SOLAR_RADIUS_KM: f64 = 6.96000E5;
pub const ASTRONOMICAL_UNIT_KM: f64 = 1.49597870691E8;

/// In m/s
pub const SPEED_OF_LIGHT: f64 = 2.99792458E8;

/// Orbits with a period at or above this many days (225 minutes) are
/// propagated with the deep-space model.
pub const DEEP_SPACE_PERIOD_DAYS: f64 = 0.15625;

/// Converts an angle from radians into degrees the way published fixtures
/// do it: as a fraction of a full turn.
pub fn turns_to_degrees(radians: f64) -> f64 {
    radians / TWO_PI * 360.0
}

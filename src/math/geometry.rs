use nalgebra::Vector3;

use crate::consts::TWO_PI;
use std::f64::consts::PI;

/// Rotates an ECI vector into the south-east-zenith frame of an observer
/// at the given geodetic latitude and local sidereal time.
pub fn to_topocentric(
    v: &Vector3<f64>,
    sin_lat: f64,
    cos_lat: f64,
    sin_theta: f64,
    cos_theta: f64,
) -> Vector3<f64> {
    let south = sin_lat * cos_theta * v.x + sin_lat * sin_theta * v.y - cos_lat * v.z;
    let east = -sin_theta * v.x + cos_theta * v.y;
    let zenith = cos_lat * cos_theta * v.x + cos_lat * sin_theta * v.y + sin_lat * v.z;
    Vector3::new(south, east, zenith)
}

/// Azimuth, clockwise from north, of a south-east-zenith vector. Lands in
/// `[0, 2pi)` except for the degenerate `south == 0` case.
pub fn azimuth(sez: &Vector3<f64>) -> f64 {
    let mut azimuth = (-sez.y / sez.x).atan();

    if sez.x > 0.0 {
        azimuth += PI;
    }
    if azimuth < 0.0 {
        azimuth += TWO_PI;
    }

    azimuth
}

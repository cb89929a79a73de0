//! Looking at a satellite from the ground.
//!
//! The observer's position is rotated into the inertial frame with the
//! Greenwich sidereal time, so both vectors can be differenced directly.
//! The Earth is the WGS '72 ellipsoid.

use nalgebra::Vector3;

use crate::consts::{
    turns_to_degrees, DEG2RAD, EARTH_RADIUS_KM, EPSILON, FLATTENING_FACTOR, MFACTOR, PI_OVER_TWO,
    TWO_PI,
};
use crate::math::geometry::{azimuth, to_topocentric};
use crate::math::mod_2pi;
use crate::observer::GroundStation;
use crate::time::theta_g_jd;

const MAX_LATITUDE_ITERATIONS: usize = 10;

/// Azimuth and elevation (radians), range (km) and range rate (km/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
    pub range_rate: f64,
    pub above_horizon: bool,
}

/// Sub-satellite point. Angles in radians, altitude in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Right ascension of the position vector
    pub theta: f64,
}

/// Inertial position (km) and velocity (km/s) of a ground station, with
/// its local sidereal time.
#[derive(Debug, Clone, Copy)]
pub struct ObserverState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub theta: f64,
}

pub fn observer_state(julian_utc: f64, gs: &GroundStation) -> ObserverState {
    let lat = DEG2RAD * gs.latitude();
    let height_km = gs.height() / 1000.0;
    let theta = mod_2pi(theta_g_jd(julian_utc) + DEG2RAD * gs.longitude());

    let f = FLATTENING_FACTOR;
    let c = 1.0 / (1.0 + f * (f - 2.0) * lat.sin() * lat.sin()).sqrt();
    let sq = (1.0 - f) * (1.0 - f) * c;
    let achcp = (EARTH_RADIUS_KM * c + height_km) * lat.cos();

    let position = Vector3::new(
        achcp * theta.cos(),
        achcp * theta.sin(),
        (EARTH_RADIUS_KM * sq + height_km) * lat.sin(),
    );
    let velocity = Vector3::new(-MFACTOR * position.y, MFACTOR * position.x, 0.0);

    ObserverState {
        position,
        velocity,
        theta,
    }
}

pub fn look_angles(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    julian_utc: f64,
    gs: &GroundStation,
) -> LookAngles {
    let observer = observer_state(julian_utc, gs);
    let lat = DEG2RAD * gs.latitude();

    let range = position - observer.position;
    let range_velocity = velocity - observer.velocity;
    let range_km = range.norm();

    let (sin_theta, cos_theta) = observer.theta.sin_cos();
    let sez = to_topocentric(&range, lat.sin(), lat.cos(), sin_theta, cos_theta);

    let azimuth = azimuth(&sez);
    let elevation = (sez.z / range_km).asin();

    // Elevation above 90 degrees is folded back before checking the mask
    let mut elevation_deg = turns_to_degrees(elevation);
    if elevation_deg > 90.0 {
        elevation_deg = 180.0 - elevation_deg;
    }
    let mask = f64::from(gs.horizon_elevation(turns_to_degrees(azimuth)));

    LookAngles {
        azimuth,
        elevation,
        range: range_km,
        range_rate: range.dot(&range_velocity) / range_km,
        above_horizon: elevation_deg - mask > EPSILON,
    }
}

/// Geodetic latitude, longitude and altitude of an inertial position.
pub fn geodetic(position: &Vector3<f64>, julian_utc: f64) -> Geodetic {
    let theta = position.y.atan2(position.x);
    let longitude = mod_2pi(theta - theta_g_jd(julian_utc));
    let r = (position.x * position.x + position.y * position.y).sqrt();
    let e2 = FLATTENING_FACTOR * (2.0 - FLATTENING_FACTOR);

    let mut latitude = position.z.atan2(r);
    let mut c;
    let mut iterations = 0;
    loop {
        let phi = latitude;
        c = 1.0 / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
        latitude = (position.z + EARTH_RADIUS_KM * c * e2 * phi.sin()).atan2(r);

        iterations += 1;
        if (latitude - phi).abs() < EPSILON || iterations > MAX_LATITUDE_ITERATIONS {
            break;
        }
    }

    let altitude = r / latitude.cos() - EARTH_RADIUS_KM * c;

    if latitude > PI_OVER_TWO {
        latitude -= TWO_PI;
    }

    Geodetic {
        latitude,
        longitude,
        altitude,
        theta,
    }
}

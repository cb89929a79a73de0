//! A propagated satellite, and what a ground station sees of it.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::consts::{turns_to_degrees, DEG2RAD, EARTH_RADIUS_KM, PI_OVER_TWO, TWO_PI};
use crate::elements::{OrbitalElements, Tle};
use crate::illumination::{eclipse, sun_position, Eclipse};
use crate::observation::{geodetic, look_angles};
use crate::observer::GroundStation;
use crate::propagator::{PropagationState, Propagator};
use crate::time::julian_date;

/// Earth diameter used for the visibility footprint, km
const FOOTPRINT_DIAMETER_KM: f64 = 12756.33;
/// Earth radius used to turn the footprint into an angle, km
const FOOTPRINT_EARTH_RADIUS_KM: f64 = 6378.16;
/// Mean motions below this (rev/day) are treated as not orbiting
const MIN_MEAN_MOTION: f64 = 1e-8;

/// One observation of a satellite. Angles are in radians, distances in km
/// and the range rate in km/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SatPos {
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
    pub range_rate: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Right ascension of the position vector
    pub theta: f64,
    pub phase: f64,
    pub eclipsed: bool,
    pub eclipse_depth: f64,
    pub above_horizon: bool,
    pub time: DateTime<Utc>,
}

/// A point on the ground, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl SatPos {
    /// Radius of the circle on the ground from which the satellite is above
    /// the horizon, measured along the surface.
    pub fn range_circle_radius_km(&self) -> f64 {
        0.5 * (FOOTPRINT_DIAMETER_KM * (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + self.altitude)).acos())
    }

    /// The edge of the footprint, one point every `step_deg` degrees of
    /// azimuth starting from north. Longitudes are in `[0, 360]`.
    pub fn range_circle(&self, step_deg: usize) -> Vec<GroundPoint> {
        let beta = self.range_circle_radius_km() / FOOTPRINT_EARTH_RADIUS_KM;
        let lat = self.latitude;
        let lon = self.longitude;
        let covers_pole = beta > PI_OVER_TWO - lat;

        (0..360)
            .step_by(step_deg.max(1))
            .map(|azi: i32| {
                let azimuth = f64::from(azi) / 360.0 * TWO_PI;
                let range_lat =
                    (lat.sin() * beta.cos() + azimuth.cos() * beta.sin() * lat.cos()).asin();
                let num = beta.cos() - lat.sin() * range_lat.sin();
                let den = lat.cos() * range_lat.cos();

                let mut range_lon = if (azi == 0 || azi == 180) && covers_pole {
                    lon + std::f64::consts::PI
                } else if (num / den).abs() > 1.0 {
                    lon
                } else if 180 - azi >= 0 {
                    lon - (num / den).acos()
                } else {
                    lon + (num / den).acos()
                };

                while range_lon < 0.0 {
                    range_lon += TWO_PI;
                }
                while range_lon > TWO_PI {
                    range_lon -= TWO_PI;
                }

                GroundPoint {
                    latitude: turns_to_degrees(range_lat),
                    longitude: turns_to_degrees(range_lon),
                }
            })
            .collect()
    }
}

impl fmt::Display for SatPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} az {:5.1} el {:5.1} lat {:6.2} lon {:6.2} alt {:8.1} km range {:8.1} km{}",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            turns_to_degrees(self.azimuth),
            turns_to_degrees(self.elevation),
            turns_to_degrees(self.latitude),
            turns_to_degrees(self.longitude),
            self.altitude,
            self.range,
            if self.eclipsed { " eclipsed" } else { "" },
        )
    }
}

/// Propagated state at one instant, before any ground station is involved.
#[derive(Debug, Clone, Copy)]
pub struct SatelliteVectors {
    pub time: DateTime<Utc>,
    pub julian_utc: f64,
    pub state: PropagationState,
    pub eclipse: Eclipse,
}

impl SatelliteVectors {
    /// Sub-satellite point, altitude, phase and illumination.
    pub fn ground_track(&self) -> SatPos {
        let geo = geodetic(&self.state.position, self.julian_utc);
        SatPos {
            latitude: geo.latitude,
            longitude: geo.longitude,
            altitude: geo.altitude,
            theta: geo.theta,
            phase: self.state.phase,
            eclipsed: self.eclipse.eclipsed,
            eclipse_depth: self.eclipse.depth,
            time: self.time,
            ..Default::default()
        }
    }

    /// The ground track plus the look angles from `gs`.
    pub fn position_for_ground_station(&self, gs: &GroundStation) -> SatPos {
        let look = look_angles(
            &self.state.position,
            &self.state.velocity,
            self.julian_utc,
            gs,
        );
        SatPos {
            azimuth: look.azimuth,
            elevation: look.elevation,
            range: look.range,
            range_rate: look.range_rate,
            above_horizon: look.above_horizon,
            ..self.ground_track()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Satellite {
    elements: OrbitalElements,
    propagator: Propagator,
}

impl Satellite {
    pub fn new(elements: OrbitalElements) -> Self {
        let propagator = Propagator::new(&elements);
        Satellite {
            elements,
            propagator,
        }
    }

    pub fn from_tle(tle: Tle) -> Self {
        Self::new(OrbitalElements::new(tle))
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn is_deep_space(&self) -> bool {
        self.propagator.is_deep_space()
    }

    /// Whether the orbit ever rises high enough, far enough north or south,
    /// to clear the horizon at the station's latitude.
    pub fn will_be_seen(&self, gs: &GroundStation) -> bool {
        let tle = self.elements.tle();
        if tle.mean_motion < MIN_MEAN_MOTION {
            return false;
        }

        let mut lin = tle.inclination;
        if lin >= 90.0 {
            lin = 180.0 - lin;
        }

        let sma = 331.25 * ((1440.0 / tle.mean_motion).ln() * (2.0 / 3.0)).exp();
        let apogee = sma * (1.0 + tle.eccentricity) - EARTH_RADIUS_KM;

        (EARTH_RADIUS_KM / (apogee + EARTH_RADIUS_KM)).acos() + lin * DEG2RAD
            > (gs.latitude() * DEG2RAD).abs()
    }

    /// Propagates to `time` and works out illumination. The result can be
    /// viewed from any number of ground stations.
    pub fn calculate_vectors(&mut self, time: DateTime<Utc>) -> SatelliteVectors {
        let julian_utc = julian_date(&time);
        let tsince = self.elements.minutes_since_epoch(julian_utc);
        let state = self.propagator.propagate(tsince);
        let eclipse = eclipse(&state.position, &sun_position(julian_utc));

        SatelliteVectors {
            time,
            julian_utc,
            state,
            eclipse,
        }
    }

    pub fn position(&mut self, gs: &GroundStation, time: DateTime<Utc>) -> SatPos {
        self.calculate_vectors(time).position_for_ground_station(gs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const AO_51: [&str; 3] = [
        "AO-51 [+]",
        "1 28375U 04025K   09105.66391970  .00000003  00000-0  13761-4 0  3643",
        "2 28375 098.0551 118.9086 0084159 315.8041 043.6444 14.40638450251959",
    ];

    fn ao_51() -> Satellite {
        Satellite::new(OrbitalElements::from_lines(&AO_51).unwrap())
    }

    fn footprint(latitude: f64, longitude: f64, altitude: f64) -> SatPos {
        SatPos {
            latitude,
            longitude,
            altitude,
            ..Default::default()
        }
    }

    fn assert_point(point: &GroundPoint, latitude: f64, longitude: f64) {
        assert!(
            (point.latitude - latitude).abs() < 0.5 && (point.longitude - longitude).abs() < 0.5,
            "{:?} is not near ({}, {})",
            point,
            latitude,
            longitude
        );
    }

    #[test]
    fn test_footprint_on_equator() {
        let circle = footprint(0.0, 0.0, 1000.0).range_circle(1);
        assert_eq!(circle.len(), 360);
        assert_point(&circle[0], 30.0, 0.0);
        assert_point(&circle[89], 1.0, 330.0);
        assert_point(&circle[179], -30.0, 359.0);
        assert_point(&circle[269], -1.0, 30.0);
    }

    #[test]
    fn test_footprint_off_equator() {
        let ten = 10.0 * DEG2RAD;
        let circle = footprint(ten, ten, 1000.0).range_circle(1);
        assert_point(&circle[0], 40.0, 10.0);
        assert_point(&circle[89], 9.0, 339.0);
        assert_point(&circle[179], -20.0, 9.0);
        assert_point(&circle[269], 8.0, 41.0);
    }

    #[test]
    fn test_footprint_covering_pole() {
        // A geostationary footprint from 80 degrees north wraps over the pole
        let circle = footprint(80.0 * DEG2RAD, 0.0, 35786.0).range_circle(90);
        assert_eq!(circle.len(), 4);
        assert_relative_eq!(circle[0].longitude, 180.0, epsilon = 1e-9);
        assert_relative_eq!(circle[2].longitude, 180.0, epsilon = 1e-9);
        for point in circle {
            assert!((0.0..=360.0).contains(&point.longitude));
        }
    }

    #[test]
    fn test_footprint_radius() {
        assert_relative_eq!(footprint(0.0, 0.0, 0.0).range_circle_radius_km(), 0.0);
        // Roughly 30 degrees of arc at 1000 km
        let radius = footprint(0.0, 0.0, 1000.0).range_circle_radius_km();
        assert_relative_eq!(radius, 3358.0, epsilon = 5.0);
    }

    #[test]
    fn test_will_be_seen() {
        let sat = ao_51();
        assert!(sat.will_be_seen(&GroundStation::new("Birmingham", 52.4670, -2.022, 200.0)));
        assert!(sat.will_be_seen(&GroundStation::new("Pole", 90.0, 0.0, 0.0)));
    }

    #[test]
    fn test_equatorial_orbit_not_seen_from_pole() {
        let mut tle = Tle::parse(&AO_51).unwrap();
        tle.inclination = 0.0;
        tle.eccentricity = 0.0;
        let sat = Satellite::from_tle(tle);

        assert!(!sat.will_be_seen(&GroundStation::new("Pole", 89.0, 0.0, 0.0)));
        assert!(sat.will_be_seen(&GroundStation::new("Equator", 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_stationary_never_seen() {
        let mut tle = Tle::parse(&AO_51).unwrap();
        tle.mean_motion = 0.0;
        let sat = Satellite {
            propagator: ao_51().propagator,
            elements: OrbitalElements::new(tle),
        };
        assert!(!sat.will_be_seen(&GroundStation::new("Equator", 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_split_workflow_matches_position() {
        let gs = GroundStation::new("Birmingham", 52.4670, -2.022, 200.0);
        let time = "2009-04-17T06:57:32Z".parse().unwrap();

        let mut sat = ao_51();
        let vectors = sat.calculate_vectors(time);
        let split = vectors.position_for_ground_station(&gs);
        let track = vectors.ground_track();

        let all_in_one = ao_51().position(&gs, time);
        assert_eq!(split, all_in_one);
        assert_eq!(track.latitude, all_in_one.latitude);
        assert_eq!(track.altitude, all_in_one.altitude);
        assert_eq!(track.time, time);
        assert_eq!(track.elevation, 0.0);
    }
}

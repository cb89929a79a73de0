use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace, warn};

use super::pass::{Pass, PoleCrossing};
use crate::consts::{turns_to_degrees, MINS_PER_DAY, SPEED_OF_LIGHT};
use crate::elements::OrbitalElements;
use crate::error::PredictError;
use crate::observer::GroundStation;
use crate::satellite::{SatPos, Satellite};

const COARSE_STEP_SECS: i64 = 60;
const SET_STEP_SECS: i64 = 30;
const FINE_STEP_SECS: i64 = 5;

// A week's worth of samples at each step size
const MAX_COARSE_STEPS: usize = 7 * 24 * 60;
const MAX_SET_STEPS: usize = 7 * 24 * 120;
const MAX_FINE_STEPS: usize = 120;

/// Finds passes of one satellite over one ground station by stepping
/// through time and watching the elevation change sign.
#[derive(Debug, Clone)]
pub struct PassPredictor {
    ground_station: GroundStation,
    satellite: Satellite,
    iteration_count: usize,
}

/// Highest point seen so far during a search.
#[derive(Debug, Default)]
struct Culmination {
    elevation: f64,
    time: Option<DateTime<Utc>>,
}

impl Culmination {
    fn record(&mut self, pos: &SatPos) {
        if pos.elevation > self.elevation {
            self.elevation = pos.elevation;
            self.time = Some(pos.time);
        }
    }
}

impl PassPredictor {
    /// Fails if the satellite can never clear this station's horizon.
    pub fn new(elements: OrbitalElements, ground_station: GroundStation) -> Result<Self, PredictError> {
        let satellite = Satellite::new(elements);
        if !satellite.will_be_seen(&ground_station) {
            warn!(
                satellite = satellite.elements().name(),
                station = ground_station.name(),
                "satellite never rises above the horizon"
            );
            return Err(PredictError::SatelliteNotVisible(
                satellite.elements().name().to_string(),
            ));
        }

        Ok(PassPredictor {
            ground_station,
            satellite,
            iteration_count: 0,
        })
    }

    pub fn ground_station(&self) -> &GroundStation {
        &self.ground_station
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    /// Number of positions computed since the last pass list started.
    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    /// Doppler-corrected downlink frequency in Hz.
    pub fn downlink_freq(&mut self, freq: i64, time: DateTime<Utc>) -> i64 {
        let range_rate = self.sample(time).range_rate;
        (freq as f64 * (SPEED_OF_LIGHT - range_rate * 1000.0) / SPEED_OF_LIGHT) as i64
    }

    /// Doppler-corrected uplink frequency in Hz.
    pub fn uplink_freq(&mut self, freq: i64, time: DateTime<Utc>) -> i64 {
        let range_rate = self.sample(time).range_rate;
        (freq as f64 * (SPEED_OF_LIGHT + range_rate * 1000.0) / SPEED_OF_LIGHT) as i64
    }

    pub fn next_pass(&mut self, start: DateTime<Utc>) -> Result<Pass, PredictError> {
        self.next_pass_with_windback(start, false)
    }

    /// The first pass whose AOS comes after `start`, or the pass in progress
    /// at `start` if `wind_back` moves the search back a quarter orbit
    /// before it.
    pub fn next_pass_with_windback(
        &mut self,
        start: DateTime<Utc>,
        wind_back: bool,
    ) -> Result<Pass, PredictError> {
        let mut time = start;
        if wind_back {
            time = time + Duration::minutes((-MINS_PER_DAY / self.mean_motion() / 4.0) as i64);
        }

        let mut culmination = Culmination::default();
        let mut pole_crossing = PoleCrossing::None;

        // Already up: wait for it to set, then skip most of an orbit
        let first = self.sample(time);
        if first.elevation > 0.0 {
            self.step_while(&mut time, COARSE_STEP_SECS, MAX_COARSE_STEPS, |pos| {
                pos.elevation > 0.0
            })?;
            time = time + Duration::minutes(self.three_quarter_orbit_minutes());
        }

        // Rise, to the minute and then to five seconds
        self.step_while(&mut time, COARSE_STEP_SECS, MAX_COARSE_STEPS, |pos| {
            culmination.record(pos);
            pos.elevation < 0.0
        })?;
        time = time - Duration::seconds(COARSE_STEP_SECS);
        let aos = self.step_while(&mut time, FINE_STEP_SECS, MAX_FINE_STEPS, |pos| {
            culmination.record(pos);
            pos.elevation < 0.0
        })?;

        // Set, watching for the azimuth swinging through a pole
        let mut previous = aos;
        self.step_while(&mut time, SET_STEP_SECS, MAX_SET_STEPS, |pos| {
            let crossing = PoleCrossing::between(
                turns_to_degrees(previous.azimuth),
                turns_to_degrees(pos.azimuth),
            );
            if crossing != PoleCrossing::None {
                debug!(%crossing, time = %pos.time, "pole crossed");
                pole_crossing = crossing;
            }
            culmination.record(pos);
            previous = *pos;
            pos.elevation > 0.0
        })?;

        self.satellite = Satellite::new(self.satellite.elements().clone());

        time = time - Duration::seconds(SET_STEP_SECS);
        let los = self.step_while(&mut time, FINE_STEP_SECS, MAX_FINE_STEPS, |pos| {
            culmination.record(pos);
            pos.elevation > 0.0
        })?;

        let aos_azimuth = turns_to_degrees(aos.azimuth) as i32;
        let los_azimuth = turns_to_degrees(los.azimuth) as i32;
        let max_elevation = turns_to_degrees(culmination.elevation);

        let pass = match culmination.time {
            Some(tca) => Pass {
                start_time: aos.time,
                end_time: los.time,
                tca,
                pole_crossing,
                aos_azimuth,
                los_azimuth,
                max_elevation,
            },
            None => Pass::new_without_tca(
                aos.time,
                los.time,
                pole_crossing,
                aos_azimuth,
                los_azimuth,
                max_elevation,
            ),
        };

        debug!(
            aos = %pass.start_time,
            los = %pass.end_time,
            tca = %pass.tca,
            max_elevation = pass.max_elevation,
            "found pass"
        );
        Ok(pass)
    }

    /// Every pass from `start` until the last one to rise after
    /// `hours_ahead` hours. Only the first search winds back.
    pub fn passes(
        &mut self,
        start: DateTime<Utc>,
        hours_ahead: i64,
        wind_back: bool,
    ) -> Result<Vec<Pass>, PredictError> {
        self.iteration_count = 0;

        let end = start + Duration::hours(hours_ahead);
        let mut track_start = start;
        let mut passes: Vec<Pass> = Vec::new();

        loop {
            let pass = self.next_pass_with_windback(track_start, wind_back && passes.is_empty())?;
            let last_aos = pass.start_time;
            track_start = pass.end_time + Duration::minutes(self.three_quarter_orbit_minutes());
            passes.push(pass);

            if last_aos >= end {
                break;
            }
        }

        Ok(passes)
    }

    /// Positions every `step_secs` seconds from `minutes_before` before the
    /// reference time up to (not including) `minutes_after` after it.
    pub fn positions(
        &mut self,
        reference: DateTime<Utc>,
        step_secs: i64,
        minutes_before: i64,
        minutes_after: i64,
    ) -> Vec<SatPos> {
        let end = reference + Duration::minutes(minutes_after);
        let step = Duration::seconds(step_secs.max(1));

        let mut time = reference - Duration::minutes(minutes_before);
        let mut positions = Vec::new();
        while time < end {
            positions.push(self.sample(time));
            time = time + step;
        }
        positions
    }

    fn mean_motion(&self) -> f64 {
        self.satellite.elements().tle().mean_motion
    }

    fn three_quarter_orbit_minutes(&self) -> i64 {
        (MINS_PER_DAY / self.mean_motion() * 0.75) as i64
    }

    fn sample(&mut self, time: DateTime<Utc>) -> SatPos {
        self.iteration_count += 1;
        let pos = self.satellite.position(&self.ground_station, time);
        trace!(time = %time, elevation = pos.elevation, azimuth = pos.azimuth, "sample");
        pos
    }

    /// Steps forward while `condition` holds, returning the first position
    /// where it doesn't.
    fn step_while(
        &mut self,
        time: &mut DateTime<Utc>,
        step_secs: i64,
        max_steps: usize,
        mut condition: impl FnMut(&SatPos) -> bool,
    ) -> Result<SatPos, PredictError> {
        for _ in 0..max_steps {
            *time = *time + Duration::seconds(step_secs);
            let pos = self.sample(*time);
            if !condition(&pos) {
                return Ok(pos);
            }
        }
        Err(PredictError::NoPassFound(*time))
    }
}

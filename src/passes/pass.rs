use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Which way the antenna swings through a pole during a pass, if it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleCrossing {
    None,
    North,
    South,
}

impl PoleCrossing {
    /// Compares two consecutive azimuths, in degrees.
    pub fn between(az1: f64, az2: f64) -> Self {
        if az1 > az2 {
            // through north from 350 or more, else through south
            if az1 > 350.0 && az2 < 10.0 {
                PoleCrossing::North
            } else if az1 > 180.0 && az2 < 180.0 {
                PoleCrossing::South
            } else {
                PoleCrossing::None
            }
        } else if az1 < 10.0 && az2 > 350.0 {
            PoleCrossing::North
        } else if az1 < 180.0 && az2 > 180.0 {
            PoleCrossing::South
        } else {
            PoleCrossing::None
        }
    }
}

impl fmt::Display for PoleCrossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoleCrossing::None => "none",
            PoleCrossing::North => "north",
            PoleCrossing::South => "south",
        };
        f.write_str(name)
    }
}

/// One pass over a ground station. Azimuths and elevation are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    /// Acquisition of signal
    pub start_time: DateTime<Utc>,
    /// Loss of signal
    pub end_time: DateTime<Utc>,
    /// Time of closest approach
    pub tca: DateTime<Utc>,
    pub pole_crossing: PoleCrossing,
    pub aos_azimuth: i32,
    pub los_azimuth: i32,
    pub max_elevation: f64,
}

impl Pass {
    /// A pass with closest approach assumed halfway between AOS and LOS.
    pub fn new_without_tca(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        pole_crossing: PoleCrossing,
        aos_azimuth: i32,
        los_azimuth: i32,
        max_elevation: f64,
    ) -> Self {
        Pass {
            start_time,
            end_time,
            tca: start_time + (end_time - start_time) / 2,
            pole_crossing,
            aos_azimuth,
            los_azimuth,
            max_elevation,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.duration().num_milliseconds() as f64 / 60000.0;
        write!(
            f,
            "Date: {}\nStart Time: {}\nDuration: {:4.1} min.\nAOS Azimuth: {} deg.\nMax Elevation: {:4.1} deg.\nLOS Azimuth: {} deg.",
            self.start_time.format("%B %-d, %Y"),
            self.start_time.format("%-I:%M %p"),
            minutes,
            self.aos_azimuth,
            self.max_elevation,
            self.los_azimuth,
        )
    }
}

use crate::error::PredictError;

pub const HORIZON_SECTORS: usize = 36;

/// A fixed point on the Earth's surface that satellites are observed from.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundStation {
    name: String,
    /// Degrees, north positive
    latitude: f64,
    /// Degrees, east positive
    longitude: f64,
    /// Meters above the ellipsoid
    height: f64,
    /// Minimum elevation in degrees for each 10 degree azimuth sector,
    /// starting from north
    horizon: [i32; HORIZON_SECTORS],
}

impl GroundStation {
    pub fn new(name: &str, latitude: f64, longitude: f64, height: f64) -> Self {
        GroundStation {
            name: name.to_string(),
            latitude,
            longitude,
            height,
            horizon: [0; HORIZON_SECTORS],
        }
    }

    /// Like [`GroundStation::new`], with a horizon mask of exactly 36
    /// sectors.
    pub fn with_horizon(
        name: &str,
        latitude: f64,
        longitude: f64,
        height: f64,
        horizon: &[i32],
    ) -> Result<Self, PredictError> {
        let horizon = horizon
            .try_into()
            .map_err(|_| PredictError::InvalidHorizonMask(horizon.len()))?;

        Ok(GroundStation {
            horizon,
            ..Self::new(name, latitude, longitude, height)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn horizon(&self) -> &[i32; HORIZON_SECTORS] {
        &self.horizon
    }

    /// Mask elevation, in degrees, for an azimuth in degrees.
    pub fn horizon_elevation(&self, azimuth_deg: f64) -> i32 {
        let sector = (azimuth_deg / 10.0) as usize;
        self.horizon[sector.min(HORIZON_SECTORS - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon() {
        let gs = GroundStation::new("Home", 52.4670, -2.022, 200.0);
        assert!(gs.horizon().iter().all(|&el| el == 0));
        assert_eq!(gs.name(), "Home");
    }

    #[test]
    fn test_horizon_mask() {
        let mut mask = [0; HORIZON_SECTORS];
        mask[0] = 5;
        mask[35] = 12;
        let gs = GroundStation::with_horizon("Home", 52.4670, -2.022, 200.0, &mask).unwrap();

        assert_eq!(gs.horizon_elevation(9.9), 5);
        assert_eq!(gs.horizon_elevation(10.0), 0);
        assert_eq!(gs.horizon_elevation(355.0), 12);
        assert_eq!(gs.horizon_elevation(360.0), 12);
    }

    #[test]
    fn test_bad_horizon_mask() {
        let result = GroundStation::with_horizon("Home", 0.0, 0.0, 0.0, &[0; 35]);
        assert!(matches!(result, Err(PredictError::InvalidHorizonMask(35))));
    }
}

mod tle;

pub use tle::Tle;

use crate::consts::{
    CK2, DEEP_SPACE_PERIOD_DAYS, DEG2RAD, EARTH_RADIUS_KM, MINS_PER_DAY, PERIGEE_156_KM, QOMS2T,
    S, TWO_PI, TWO_THIRDS, XKE,
};
use crate::error::TleError;
use crate::time::julian_date_of_epoch;

/// An element set converted to the units the propagators work in (radians,
/// radians per minute, Earth radii), together with the quantities every
/// propagator derives from it first.
#[derive(Debug, Clone)]
pub struct OrbitalElements {
    tle: Tle,

    epoch: f64,
    julian_epoch: f64,

    pub(crate) xincl: f64,
    pub(crate) xnodeo: f64,
    pub(crate) eo: f64,
    pub(crate) omegao: f64,
    pub(crate) xmo: f64,
    /// Mean motion, rad/min
    pub(crate) xno: f64,
    pub(crate) xndt2o: f64,
    pub(crate) bstar: f64,

    // Recovered from the Brouwer mean motion
    pub(crate) cosio: f64,
    pub(crate) sinio: f64,
    pub(crate) theta2: f64,
    pub(crate) x3thm1: f64,
    pub(crate) eosq: f64,
    pub(crate) betao2: f64,
    pub(crate) betao: f64,
    pub(crate) xnodp: f64,
    pub(crate) aodp: f64,

    // Drag parameters, lowered for perigees under 156 km
    pub(crate) s4: f64,
    pub(crate) qoms24: f64,
    perigee_km: f64,

    deep_space: bool,
}

impl OrbitalElements {
    pub fn new(tle: Tle) -> Self {
        let minute_factor = TWO_PI / MINS_PER_DAY / MINS_PER_DAY;
        let xno = tle.mean_motion * minute_factor * MINS_PER_DAY;
        let xndt2o = tle.drag * minute_factor;

        let xincl = tle.inclination * DEG2RAD;
        let eo = tle.eccentricity;

        // Recover the original mean motion and semimajor axis
        let a1 = (XKE / xno).powf(TWO_THIRDS);
        let cosio = xincl.cos();
        let theta2 = cosio * cosio;
        let x3thm1 = 3.0 * theta2 - 1.0;
        let eosq = eo * eo;
        let betao2 = 1.0 - eosq;
        let betao = betao2.sqrt();
        let del1 = 1.5 * CK2 * x3thm1 / (a1 * a1 * betao * betao2);
        let ao = a1 * (1.0 - del1 * (0.5 * TWO_THIRDS + del1 * (1.0 + 134.0 / 81.0 * del1)));
        let delo = 1.5 * CK2 * x3thm1 / (ao * ao * betao * betao2);
        let xnodp = xno / (1.0 + delo);
        let aodp = ao / (1.0 - delo);

        let perigee_km = (aodp * (1.0 - eo) - 1.0) * EARTH_RADIUS_KM;
        let (s4, qoms24) = drag_parameters(perigee_km);

        let deep_space = TWO_PI / xnodp / MINS_PER_DAY >= DEEP_SPACE_PERIOD_DAYS;
        let epoch = tle.epoch();

        OrbitalElements {
            epoch,
            julian_epoch: julian_date_of_epoch(epoch),
            xincl,
            xnodeo: tle.raan * DEG2RAD,
            eo,
            omegao: tle.arg_perigee * DEG2RAD,
            xmo: tle.mean_anomaly * DEG2RAD,
            xno,
            xndt2o,
            bstar: tle.bstar,
            cosio,
            sinio: xincl.sin(),
            theta2,
            x3thm1,
            eosq,
            betao2,
            betao,
            xnodp,
            aodp,
            s4,
            qoms24,
            perigee_km,
            deep_space,
            tle,
        }
    }

    pub fn from_lines(lines: &[&str]) -> Result<Self, TleError> {
        Ok(Self::new(Tle::parse(lines)?))
    }

    pub fn tle(&self) -> &Tle {
        &self.tle
    }

    pub fn name(&self) -> &str {
        &self.tle.name
    }

    /// Epoch in `yyddd.dddddddd` form.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn julian_epoch(&self) -> f64 {
        self.julian_epoch
    }

    /// True when the period is 225 minutes or more.
    pub fn is_deep_space(&self) -> bool {
        self.deep_space
    }

    pub fn inclination(&self) -> f64 {
        self.xincl
    }

    pub fn raan(&self) -> f64 {
        self.xnodeo
    }

    pub fn eccentricity(&self) -> f64 {
        self.eo
    }

    pub fn arg_perigee(&self) -> f64 {
        self.omegao
    }

    pub fn mean_anomaly(&self) -> f64 {
        self.xmo
    }

    /// Mean motion as published, rad/min
    pub fn mean_motion(&self) -> f64 {
        self.xno
    }

    /// Mean motion derivative over two, rad/min^2
    pub fn mean_motion_dot(&self) -> f64 {
        self.xndt2o
    }

    pub fn bstar(&self) -> f64 {
        self.bstar
    }

    /// Recovered (Brouwer) mean motion, rad/min
    pub fn recovered_mean_motion(&self) -> f64 {
        self.xnodp
    }

    /// Recovered semimajor axis, Earth radii
    pub fn recovered_semimajor_axis(&self) -> f64 {
        self.aodp
    }

    pub fn perigee_km(&self) -> f64 {
        self.perigee_km
    }

    /// Minutes elapsed from the epoch to the given Julian date.
    pub fn minutes_since_epoch(&self, julian_date: f64) -> f64 {
        (julian_date - self.julian_epoch) * MINS_PER_DAY
    }
}

impl From<Tle> for OrbitalElements {
    fn from(tle: Tle) -> Self {
        Self::new(tle)
    }
}

fn drag_parameters(perigee_km: f64) -> (f64, f64) {
    if perigee_km >= PERIGEE_156_KM {
        return (S, QOMS2T);
    }

    let s4 = if perigee_km <= 98.0 {
        20.0
    } else {
        perigee_km - 78.0
    };
    let qoms24 = ((120.0 - s4) / EARTH_RADIUS_KM).powi(4);

    (s4 / EARTH_RADIUS_KM + 1.0, qoms24)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const AO51: [&str; 3] = [
        "AO-51 [+]",
        "1 28375U 04025K   09105.66391970  .00000003  00000-0  13761-4 0  3643",
        "2 28375 098.0551 118.9086 0084159 315.8041 043.6444 14.40638450251959",
    ];

    const AO40: [&str; 3] = [
        "AO-40",
        "1 26609U 00072B   00326.22269097 -.00000581  00000-0  00000+0 0    29",
        "2 26609   6.4279 245.5626 7344055 179.5891 182.1915  2.03421959   104",
    ];

    #[test]
    fn test_converted_elements() {
        let elements = OrbitalElements::from_lines(&AO51).unwrap();

        assert_eq!(format!("{:.7}", elements.inclination()), "1.7113843");
        assert_eq!(format!("{:.7}", elements.raan()), "2.0753466");
        assert_eq!(format!("{:.7}", elements.arg_perigee()), "5.5118213");
        assert_eq!(format!("{:.7}", elements.mean_anomaly()), "0.7617385");
        assert_eq!(format!("{:.6}", elements.mean_motion()), "0.062860");
        assert_relative_eq!(elements.epoch(), 9105.6639197, epsilon = 1e-9);
        assert!(!elements.is_deep_space());
        assert!(elements.perigee_km() > PERIGEE_156_KM);
    }

    #[test]
    fn test_deep_space_classification() {
        let elements = OrbitalElements::from_lines(&AO40).unwrap();
        assert!(elements.is_deep_space());

        // Period in minutes is just over 700
        let period = TWO_PI / elements.recovered_mean_motion();
        assert!(period > 700.0 && period < 710.0);
    }

    #[test]
    fn test_low_perigee_drag() {
        assert_eq!(drag_parameters(200.0), (S, QOMS2T));

        let (s4, qoms24) = drag_parameters(120.0);
        assert_relative_eq!(s4, 42.0 / EARTH_RADIUS_KM + 1.0);
        assert_relative_eq!(qoms24, (78.0 / EARTH_RADIUS_KM).powi(4));

        let (s4, _) = drag_parameters(90.0);
        assert_relative_eq!(s4, 20.0 / EARTH_RADIUS_KM + 1.0);
    }

    #[test]
    fn test_minutes_since_epoch() {
        let elements = OrbitalElements::from_lines(&AO51).unwrap();
        let jd = elements.julian_epoch() + 0.5;
        assert_relative_eq!(elements.minutes_since_epoch(jd), 720.0, epsilon = 1e-6);
    }
}

use super::{finish, CommonCoefficients, MeanState, PropagationState};
use crate::consts::{EARTH_RADIUS_KM, TWO_THIRDS, XKE};
use crate::elements::OrbitalElements;
use crate::error::PredictError;

/// Perigees below this altitude (220 km) get the truncated drag model.
const SIMPLE_PERIGEE_KM: f64 = 220.0;

/// Near-Earth (period under 225 minutes) propagator.
///
/// Holds no state beyond the epoch initialization, so propagation is
/// repeatable and order independent.
#[derive(Debug, Clone)]
pub struct Sgp4 {
    xmo: f64,
    omegao: f64,
    xnodeo: f64,
    xincl: f64,
    eo: f64,
    bstar: f64,
    xnodp: f64,
    aodp: f64,

    common: CommonCoefficients,

    c5: f64,
    omgcof: f64,
    xmcof: f64,
    delmo: f64,
    sinmo: f64,

    /// Higher order drag terms, absent in simple mode
    higher_order: Option<HigherOrderDrag>,
}

#[derive(Debug, Clone)]
struct HigherOrderDrag {
    d2: f64,
    d3: f64,
    d4: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
}

impl Sgp4 {
    /// Fails when the element set needs the deep-space model.
    pub fn new(elements: &OrbitalElements) -> Result<Self, PredictError> {
        if elements.is_deep_space() {
            return Err(PredictError::PropagatorMismatch { deep_space: true });
        }
        Ok(Self::init(elements))
    }

    pub(crate) fn init(el: &OrbitalElements) -> Self {
        let common = CommonCoefficients::new(el);
        let CommonCoefficients {
            eta,
            etasq,
            eeta,
            tsi,
            coef,
            coef1,
            a3ovk2,
            c1,
            ..
        } = common;

        let simple = el.aodp * (1.0 - el.eo) < SIMPLE_PERIGEE_KM / EARTH_RADIUS_KM + 1.0;

        // Both terms divide by the eccentricity and vanish with it
        let (c3, xmcof) = if el.eo > 0.0 {
            (
                coef * tsi * a3ovk2 * el.xnodp * el.sinio / el.eo,
                -TWO_THIRDS * coef * el.bstar / eeta,
            )
        } else {
            (0.0, 0.0)
        };

        let c5 = 2.0
            * coef1
            * el.aodp
            * el.betao2
            * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        let higher_order = if simple {
            None
        } else {
            let aodp = el.aodp;
            let c1sq = c1 * c1;
            let d2 = 4.0 * aodp * tsi * c1sq;
            let temp = d2 * tsi * c1 / 3.0;
            let d3 = (17.0 * aodp + el.s4) * temp;
            let d4 = 0.5 * temp * aodp * tsi * (221.0 * aodp + 31.0 * el.s4) * c1;
            Some(HigherOrderDrag {
                d2,
                d3,
                d4,
                t3cof: d2 + 2.0 * c1sq,
                t4cof: 0.25 * (3.0 * d3 + c1 * (12.0 * d2 + 10.0 * c1sq)),
                t5cof: 0.2
                    * (3.0 * d4 + 12.0 * c1 * d3 + 6.0 * d2 * d2 + 15.0 * c1sq * (2.0 * d2 + c1sq)),
            })
        };

        Sgp4 {
            xmo: el.xmo,
            omegao: el.omegao,
            xnodeo: el.xnodeo,
            xincl: el.xincl,
            eo: el.eo,
            bstar: el.bstar,
            xnodp: el.xnodp,
            aodp: el.aodp,
            c5,
            omgcof: el.bstar * c3 * el.omegao.cos(),
            xmcof,
            delmo: (1.0 + eta * el.xmo.cos()).powi(3),
            sinmo: el.xmo.sin(),
            higher_order,
            common,
        }
    }

    /// True when the perigee is low enough that the higher order drag
    /// terms are dropped.
    pub fn is_simple(&self) -> bool {
        self.higher_order.is_none()
    }

    pub fn propagate(&self, tsince: f64) -> PropagationState {
        let common = &self.common;

        // Secular gravity and atmospheric drag
        let xmdf = self.xmo + common.xmdot * tsince;
        let omgadf = self.omegao + common.omgdot * tsince;
        let xnoddf = self.xnodeo + common.xnodot * tsince;
        let mut omega = omgadf;
        let mut xmp = xmdf;
        let tsq = tsince * tsince;
        let xnode = xnoddf + common.xnodcf * tsq;
        let mut tempa = 1.0 - common.c1 * tsince;
        let mut tempe = self.bstar * common.c4 * tsince;
        let mut templ = common.t2cof * tsq;

        if let Some(drag) = &self.higher_order {
            let delomg = self.omgcof * tsince;
            let delm = self.xmcof * ((1.0 + common.eta * xmdf.cos()).powi(3) - self.delmo);
            let temp = delomg + delm;
            xmp = xmdf + temp;
            omega = omgadf - temp;
            let tcube = tsq * tsince;
            let tfour = tsince * tcube;
            tempa = tempa - drag.d2 * tsq - drag.d3 * tcube - drag.d4 * tfour;
            tempe += self.bstar * self.c5 * (xmp.sin() - self.sinmo);
            templ = templ + drag.t3cof * tcube + tfour * (drag.t4cof + tsince * drag.t5cof);
        }

        let a = self.aodp * tempa * tempa;
        let mean = MeanState {
            a,
            e: self.eo - tempe,
            xinc: self.xincl,
            xnode,
            omega,
            xl: xmp + omega + xnode + self.xnodp * templ,
            xn: XKE / a.powf(1.5),
        };

        finish(tsince, &mean, &common.short_period, omgadf)
    }
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

    const COSMOS_DEB: [&str; 3] = [
        "COSMOS 2421 DEB",
        "1 33139U 06026MX  09359.84164805  .10408321  74078-5  34039-2 0  6397",
        "2 33139 064.8768 254.5588 0010700 285.2081 074.8503 16.45000000 91112",
    ];

    const EUTELSAT: [&str; 3] = [
        "EUTELSAT 2-F1",
        "1 20777U 90079B   09356.31446792  .00000081  00000-0  10000-3 0  9721",
        "2 20777   9.6834  57.1012 0004598 207.1414 152.7950  0.99346230 50950",
    ];

    #[test]
    fn test_rejects_deep_space() {
        let elements = OrbitalElements::from_lines(&EUTELSAT).unwrap();
        assert!(matches!(
            Sgp4::new(&elements),
            Err(PredictError::PropagatorMismatch { deep_space: true })
        ));
    }

    #[test]
    fn test_simple_mode() {
        let ao51 = Sgp4::new(&OrbitalElements::from_lines(&AO51).unwrap()).unwrap();
        assert!(!ao51.is_simple());

        // Decaying debris with a perigee well under 220 km
        let debris = Sgp4::new(&OrbitalElements::from_lines(&COSMOS_DEB).unwrap()).unwrap();
        assert!(debris.is_simple());
    }

    #[test]
    fn test_repeatable() {
        let sgp4 = Sgp4::new(&OrbitalElements::from_lines(&AO51).unwrap()).unwrap();

        let first = sgp4.propagate(1000.0);
        sgp4.propagate(-50.0);
        let second = sgp4.propagate(1000.0);

        assert_eq!(first.position, second.position);
        assert_eq!(first.velocity, second.velocity);
        assert_eq!(first.phase, second.phase);
    }

    #[test]
    fn test_circular_orbit_is_finite() {
        let line2 = AO51[2].replace(" 0084159 ", " 0000000 ");
        let elements = OrbitalElements::from_lines(&[AO51[0], AO51[1], &line2]).unwrap();
        assert_eq!(elements.eccentricity(), 0.0);

        let state = Sgp4::new(&elements).unwrap().propagate(90.0);
        assert!(state.position.iter().all(|x| x.is_finite()));
        assert!(state.velocity.iter().all(|x| x.is_finite()));

        let a_km = elements.recovered_semimajor_axis() * EARTH_RADIUS_KM;
        assert_relative_eq!(state.position.norm(), a_km, max_relative = 0.01);
    }
}

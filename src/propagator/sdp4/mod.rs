mod lunar_solar;
mod resonance;

pub use resonance::Resonance;

use lunar_solar::{DeepElements, LunarSolar};
use resonance::{ResonanceIntegrator, SecularRates};

use std::f64::consts::PI;

use super::{finish, CommonCoefficients, MeanState, PropagationState};
use crate::consts::{TWO_THIRDS, XKE};
use crate::elements::OrbitalElements;
use crate::error::PredictError;
use crate::time::theta_g_epoch;

/// Deep-space (period of 225 minutes or more) propagator, adding lunar,
/// solar and resonance effects to the near-Earth secular model.
///
/// Resonant orbits keep their last integration point and all orbits cache
/// the lunar-solar periodics, so propagation mutates the propagator. Results
/// depend only weakly on call order: the cache is refreshed every 30 minutes
/// of propagation time.
#[derive(Debug, Clone)]
pub struct Sdp4 {
    xmo: f64,
    omegao: f64,
    xnodeo: f64,
    xincl: f64,
    eo: f64,
    bstar: f64,
    xnodp: f64,

    common: CommonCoefficients,
    lunar_solar: LunarSolar,
    resonance: Option<ResonanceIntegrator>,
}

impl Sdp4 {
    /// Fails when the element set needs the near-Earth model.
    pub fn new(elements: &OrbitalElements) -> Result<Self, PredictError> {
        if !elements.is_deep_space() {
            return Err(PredictError::PropagatorMismatch { deep_space: false });
        }
        Ok(Self::init(elements))
    }

    pub(crate) fn init(el: &OrbitalElements) -> Self {
        let common = CommonCoefficients::new(el);

        // Anchored on the day of year alone, which places every epoch in 2000
        let (thgr, ds50) = theta_g_epoch(el.tle().ref_epoch);

        let lunar_solar = LunarSolar::new(el, ds50);
        let rates = SecularRates {
            xmdot: common.xmdot,
            omgdot: common.omgdot,
            xnodot: common.xnodot,
            ssl: lunar_solar.ssl,
            ssg: lunar_solar.ssg,
            ssh: lunar_solar.ssh,
        };
        let resonance = ResonanceIntegrator::new(el, thgr, &rates);

        Sdp4 {
            xmo: el.xmo,
            omegao: el.omegao,
            xnodeo: el.xnodeo,
            xincl: el.xincl,
            eo: el.eo,
            bstar: el.bstar,
            xnodp: el.xnodp,
            common,
            lunar_solar,
            resonance,
        }
    }

    pub fn resonance(&self) -> Resonance {
        self.resonance
            .as_ref()
            .map_or(Resonance::None, |integrator| integrator.kind())
    }

    pub fn propagate(&mut self, tsince: f64) -> PropagationState {
        let common = &self.common;

        // Secular gravity and atmospheric drag
        let xmdf = self.xmo + common.xmdot * tsince;
        let tsq = tsince * tsince;
        let templ = common.t2cof * tsq;
        let xnoddf = self.xnodeo + common.xnodot * tsince;
        let tempa = 1.0 - common.c1 * tsince;
        let tempe = self.bstar * common.c4 * tsince;

        let mut el = DeepElements {
            xll: xmdf + self.xnodp * templ,
            omgadf: self.omegao + common.omgdot * tsince,
            xnode: xnoddf + common.xnodcf * tsq,
            em: 0.0,
            xinc: 0.0,
        };
        let xn = self.apply_secular(tsince, &mut el);

        let a = (XKE / xn).powf(TWO_THIRDS) * tempa * tempa;
        el.em -= tempe;
        self.lunar_solar.apply_periodics(tsince, &mut el);

        let mean = MeanState {
            a,
            e: el.em,
            xinc: el.xinc,
            xnode: el.xnode,
            omega: el.omgadf,
            xl: el.xll + el.omgadf + el.xnode,
            xn: XKE / a.powf(1.5),
        };

        finish(tsince, &mean, &self.common.short_period, el.omgadf)
    }

    /// Lunar-solar secular rates and resonance. Returns the mean motion.
    fn apply_secular(&mut self, t: f64, el: &mut DeepElements) -> f64 {
        let ls = &self.lunar_solar;

        el.xll += ls.ssl * t;
        el.omgadf += ls.ssg * t;
        el.xnode += ls.ssh * t;
        el.em = self.eo + ls.sse * t;
        el.xinc = self.xincl + ls.ssi * t;

        if el.xinc < 0.0 {
            el.xinc = -el.xinc;
            el.xnode += PI;
            el.omgadf -= PI;
        }

        match &mut self.resonance {
            Some(integrator) => {
                let integrated = integrator.integrate(t, el.xnode, el.omgadf);
                el.xll = integrated.xll;
                integrated.xn
            }
            None => self.xnodp,
        }
    }
}

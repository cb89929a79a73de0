//! SGP4/SDP4 orbit propagation.
//!
//! [`Propagator`] picks the near-Earth or deep-space model for an element
//! set. Both models share their drag coefficients and the final
//! short-period/orientation step, which live in this module.

mod sdp4;
mod sgp4;

pub use sdp4::{Resonance, Sdp4};
pub use sgp4::Sgp4;

use nalgebra::Vector3;
use tracing::debug;

use crate::consts::{
    CK2, CK4, EARTH_RADIUS_KM, J3_HARMONIC, MINS_PER_DAY, SECS_PER_DAY, TWO_PI, XKE,
};
use crate::elements::OrbitalElements;
use crate::math::{mod_2pi, solve_kepler};

/// Inertial position (km) and velocity (km/s) at some minutes past epoch.
#[derive(Debug, Clone, Copy)]
pub struct PropagationState {
    pub tsince: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    /// Mean anomaly plus argument of perigee, in `[0, 2pi)`
    pub phase: f64,
}

#[derive(Debug, Clone)]
pub enum Propagator {
    NearEarth(Sgp4),
    DeepSpace(Box<Sdp4>),
}

impl Propagator {
    pub fn new(elements: &OrbitalElements) -> Self {
        if elements.is_deep_space() {
            let sdp4 = Sdp4::init(elements);
            debug!(
                name = elements.name(),
                resonance = ?sdp4.resonance(),
                "deep-space propagator"
            );
            Propagator::DeepSpace(Box::new(sdp4))
        } else {
            let sgp4 = Sgp4::init(elements);
            debug!(
                name = elements.name(),
                simple = sgp4.is_simple(),
                "near-Earth propagator"
            );
            Propagator::NearEarth(sgp4)
        }
    }

    pub fn is_deep_space(&self) -> bool {
        matches!(self, Propagator::DeepSpace(_))
    }

    /// Propagates to `tsince` minutes past epoch. The deep-space model
    /// caches intermediate results, hence `&mut self`.
    pub fn propagate(&mut self, tsince: f64) -> PropagationState {
        match self {
            Propagator::NearEarth(sgp4) => sgp4.propagate(tsince),
            Propagator::DeepSpace(sdp4) => sdp4.propagate(tsince),
        }
    }
}

/// Secular drag and gravity coefficients common to both models.
#[derive(Debug, Clone)]
pub(crate) struct CommonCoefficients {
    pub eta: f64,
    pub etasq: f64,
    pub eeta: f64,
    pub tsi: f64,
    pub coef: f64,
    pub coef1: f64,
    pub a3ovk2: f64,

    pub c1: f64,
    pub c4: f64,
    pub xmdot: f64,
    pub omgdot: f64,
    pub xnodot: f64,
    pub xnodcf: f64,
    pub t2cof: f64,

    pub short_period: ShortPeriodCoefficients,
}

impl CommonCoefficients {
    pub fn new(el: &OrbitalElements) -> Self {
        let aodp = el.aodp;
        let betao2 = el.betao2;
        let x3thm1 = el.x3thm1;
        let theta2 = el.theta2;
        let cosio = el.cosio;

        let pinvsq = 1.0 / (aodp * aodp * (betao2 * betao2));
        let tsi = 1.0 / (aodp - el.s4);
        let eta = aodp * el.eo * tsi;
        let etasq = eta * eta;
        let eeta = el.eo * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = el.qoms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);

        let c2 = coef1
            * el.xnodp
            * (aodp * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.75 * CK2 * tsi / psisq * x3thm1 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let c1 = el.bstar * c2;
        let a3ovk2 = -J3_HARMONIC / CK2;
        let x1mth2 = 1.0 - theta2;
        let c4 = 2.0
            * el.xnodp
            * coef1
            * aodp
            * betao2
            * (eta * (2.0 + 0.5 * etasq) + el.eo * (0.5 + 2.0 * etasq)
                - 2.0 * CK2 * tsi / (aodp * psisq)
                    * (-3.0 * x3thm1 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * el.omegao).cos()));

        let theta4 = theta2 * theta2;
        let temp1 = 3.0 * CK2 * pinvsq * el.xnodp;
        let temp2 = temp1 * CK2 * pinvsq;
        let temp3 = 1.25 * CK4 * pinvsq * pinvsq * el.xnodp;
        let xmdot = el.xnodp
            + 0.5 * temp1 * el.betao * x3thm1
            + 0.0625 * temp2 * el.betao * (13.0 - 78.0 * theta2 + 137.0 * theta4);
        let omgdot = -0.5 * temp1 * (1.0 - 5.0 * theta2)
            + 0.0625 * temp2 * (7.0 - 114.0 * theta2 + 395.0 * theta4)
            + temp3 * (3.0 - 36.0 * theta2 + 49.0 * theta4);
        let xhdot1 = -temp1 * cosio;
        let xnodot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * theta2) + 2.0 * temp3 * (3.0 - 7.0 * theta2)) * cosio;

        let short_period = ShortPeriodCoefficients {
            cosio,
            sinio: el.sinio,
            x3thm1,
            x1mth2,
            x7thm1: 7.0 * theta2 - 1.0,
            xlcof: 0.125 * a3ovk2 * el.sinio * (3.0 + 5.0 * cosio) / (1.0 + cosio),
            aycof: 0.25 * a3ovk2 * el.sinio,
        };

        CommonCoefficients {
            eta,
            etasq,
            eeta,
            tsi,
            coef,
            coef1,
            a3ovk2,
            c1,
            c4,
            xmdot,
            omgdot,
            xnodot,
            xnodcf: 3.5 * betao2 * xhdot1 * c1,
            t2cof: 1.5 * c1,
            short_period,
        }
    }
}

/// Epoch-fixed terms used by the long- and short-period corrections.
#[derive(Debug, Clone)]
pub(crate) struct ShortPeriodCoefficients {
    pub cosio: f64,
    pub sinio: f64,
    pub x3thm1: f64,
    pub x1mth2: f64,
    pub x7thm1: f64,
    pub xlcof: f64,
    pub aycof: f64,
}

/// Mean elements at the propagation time, after secular and (for deep
/// space) resonance and lunar-solar corrections.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MeanState {
    pub a: f64,
    pub e: f64,
    pub xinc: f64,
    pub xnode: f64,
    pub omega: f64,
    /// `M + omega + node`, including the secular drag terms
    pub xl: f64,
    pub xn: f64,
}

/// Long-period periodics, Kepler's equation, short-period periodics and the
/// rotation into inertial coordinates.
pub(crate) fn finish(
    tsince: f64,
    mean: &MeanState,
    coef: &ShortPeriodCoefficients,
    phase_omega: f64,
) -> PropagationState {
    let MeanState {
        a,
        e,
        xinc,
        xnode,
        omega,
        xl,
        xn,
    } = *mean;

    // Long period periodics
    let beta = (1.0 - e * e).sqrt();
    let axn = e * omega.cos();
    let temp = 1.0 / (a * beta * beta);
    let xll = temp * coef.xlcof * axn;
    let aynl = temp * coef.aycof;
    let xlt = xl + xll;
    let ayn = e * omega.sin() + aynl;

    let capu = mod_2pi(xlt - xnode);
    let kepler = solve_kepler(capu, axn, ayn);

    // Short period preliminary quantities
    let elsq = axn * axn + ayn * ayn;
    let temp = 1.0 - elsq;
    let pl = a * temp;
    let r = a * (1.0 - kepler.e_cos_e);
    let temp1 = 1.0 / r;
    let rdot = XKE * a.sqrt() * kepler.e_sin_e * temp1;
    let rfdot = XKE * pl.sqrt() * temp1;
    let temp2 = a * temp1;
    let betal = temp.sqrt();
    let temp3 = 1.0 / (1.0 + betal);
    let cosu = temp2 * (kepler.cos_e - axn + ayn * kepler.e_sin_e * temp3);
    let sinu = temp2 * (kepler.sin_e - ayn - axn * kepler.e_sin_e * temp3);
    let u = sinu.atan2(cosu);
    let sin2u = 2.0 * sinu * cosu;
    let cos2u = 2.0 * cosu * cosu - 1.0;
    let temp = 1.0 / pl;
    let temp1 = CK2 * temp;
    let temp2 = temp1 * temp;

    // Update for short periodics
    let rk = r * (1.0 - 1.5 * temp2 * betal * coef.x3thm1)
        + 0.5 * temp1 * coef.x1mth2 * cos2u;
    let uk = u - 0.25 * temp2 * coef.x7thm1 * sin2u;
    let xnodek = xnode + 1.5 * temp2 * coef.cosio * sin2u;
    let xinck = xinc + 1.5 * temp2 * coef.cosio * coef.sinio * cos2u;
    let rdotk = rdot - xn * temp1 * coef.x1mth2 * sin2u;
    let rfdotk = rfdot + xn * temp1 * (coef.x1mth2 * cos2u + 1.5 * coef.x3thm1);

    // Orientation vectors
    let (sinuk, cosuk) = uk.sin_cos();
    let (sinik, cosik) = xinck.sin_cos();
    let (sinnok, cosnok) = xnodek.sin_cos();
    let xmx = -sinnok * cosik;
    let xmy = cosnok * cosik;
    let u = Vector3::new(
        xmx * sinuk + cosnok * cosuk,
        xmy * sinuk + sinnok * cosuk,
        sinik * sinuk,
    );
    let v = Vector3::new(
        xmx * cosuk - cosnok * sinuk,
        xmy * cosuk - sinnok * sinuk,
        sinik * cosuk,
    );

    // Earth radii and radii per minute, into km and km/s
    let position = u * rk * EARTH_RADIUS_KM;
    let velocity = (u * rdotk + v * rfdotk) * (EARTH_RADIUS_KM * MINS_PER_DAY / SECS_PER_DAY);

    PropagationState {
        tsince,
        position,
        velocity,
        phase: phase(xlt, xnode, phase_omega),
    }
}

fn phase(xlt: f64, xnode: f64, omega: f64) -> f64 {
    let mut phase = xlt - xnode - omega + TWO_PI;

    if phase < 0.0 {
        phase += TWO_PI;
    }

    mod_2pi(phase)
}

//! Geopotential resonance for orbits whose period is commensurate with the
//! sidereal day.
//!
//! The mean longitude `xli` and mean motion `xni` are integrated in fixed
//! steps from epoch towards the requested time. The last integration point
//! is kept, so consecutive calls in the same direction only integrate the
//! remaining distance.

use crate::elements::OrbitalElements;

/// Earth rotation rate, rad/min
pub(crate) const THDT: f64 = 4.3752691E-3;

const STEPP: f64 = 720.0;
const STEPN: f64 = -720.0;
const STEP2: f64 = 259200.0;

// Synchronous band, rad/min
const SYNC_MIN_MOTION: f64 = 0.0034906585;
const SYNC_MAX_MOTION: f64 = 0.0052359877;
// Half-day band, rad/min
const HALF_DAY_MIN_MOTION: f64 = 0.00826;
const HALF_DAY_MAX_MOTION: f64 = 0.00924;
const HALF_DAY_MIN_ECCENTRICITY: f64 = 0.5;

const ROOT22: f64 = 1.7891679E-6;
const ROOT32: f64 = 3.7393792E-7;
const ROOT44: f64 = 7.3636953E-9;
const ROOT52: f64 = 1.1428639E-7;
const ROOT54: f64 = 2.1765803E-9;

const Q22: f64 = 1.7891679E-6;
const Q31: f64 = 2.1460748E-6;
const Q33: f64 = 2.2123015E-7;

const G22: f64 = 5.7686396;
const G32: f64 = 9.5240898E-1;
const G44: f64 = 1.8014998;
const G52: f64 = 1.0508330;
const G54: f64 = 4.4108898;

const FASX2: f64 = 0.13130908;
const FASX4: f64 = 2.8843198;
const FASX6: f64 = 0.37448087;

/// Which resonance, if any, an orbit is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resonance {
    None,
    /// Period near one day (geostationary)
    Synchronous,
    /// Period near half a day with a high eccentricity (Molniya)
    HalfDay,
}

#[derive(Debug, Clone)]
enum Terms {
    Synchronous {
        del1: f64,
        del2: f64,
        del3: f64,
    },
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
        omegaq: f64,
        omgdot: f64,
    },
}

/// Secular rates the resonance terms are built on.
pub(crate) struct SecularRates {
    pub xmdot: f64,
    pub omgdot: f64,
    pub xnodot: f64,
    pub ssl: f64,
    pub ssg: f64,
    pub ssh: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct ResonanceIntegrator {
    terms: Terms,
    xfact: f64,
    xlamo: f64,
    xnq: f64,
    thgr: f64,

    atime: f64,
    xli: f64,
    xni: f64,
    delt: f64,
}

/// Mean motion and mean anomaly at the requested time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Integrated {
    pub xn: f64,
    pub xll: f64,
}

pub(crate) fn classify(xnq: f64, eq: f64) -> Resonance {
    if xnq > SYNC_MIN_MOTION && xnq < SYNC_MAX_MOTION {
        Resonance::Synchronous
    } else if (HALF_DAY_MIN_MOTION..=HALF_DAY_MAX_MOTION).contains(&xnq)
        && eq >= HALF_DAY_MIN_ECCENTRICITY
    {
        Resonance::HalfDay
    } else {
        Resonance::None
    }
}

impl ResonanceIntegrator {
    /// Returns `None` for orbits without resonance.
    pub fn new(el: &OrbitalElements, thgr: f64, rates: &SecularRates) -> Option<Self> {
        let xnq = el.xnodp;
        let (terms, xlamo, bfact) = match classify(xnq, el.eo) {
            Resonance::None => return None,
            Resonance::Synchronous => synchronous_terms(el, thgr, rates),
            Resonance::HalfDay => half_day_terms(el, thgr, rates),
        };

        Some(ResonanceIntegrator {
            terms,
            xfact: bfact - xnq,
            xlamo,
            xnq,
            thgr,
            atime: 0.0,
            xli: xlamo,
            xni: xnq,
            delt: STEPP,
        })
    }

    pub fn kind(&self) -> Resonance {
        match self.terms {
            Terms::Synchronous { .. } => Resonance::Synchronous,
            Terms::HalfDay { .. } => Resonance::HalfDay,
        }
    }

    /// Integrates to `t` minutes past epoch and converts the resulting mean
    /// longitude into a mean anomaly against the given node and perigee.
    pub fn integrate(&mut self, t: f64, xnode: f64, omgadf: f64) -> Integrated {
        #[allow(clippy::float_cmp)]
        let restart = self.atime == 0.0
            || (t >= 0.0 && self.atime < 0.0)
            || (t < 0.0 && self.atime >= 0.0);

        if restart {
            self.delt = if t < 0.0 { STEPN } else { STEPP };
            self.atime = 0.0;
            self.xni = self.xnq;
            self.xli = self.xlamo;
        } else if t.abs() >= self.atime.abs() {
            self.delt = if t < 0.0 { STEPN } else { STEPP };
        }

        let (ft, xndot, xnddt, xldot) = loop {
            let remaining = t - self.atime;
            let step_again = remaining.abs() >= STEPP;

            // Overshot: integrate back towards the requested time
            if t.abs() < self.atime.abs() {
                self.delt = if t >= 0.0 { STEPN } else { STEPP };
            }

            let (xndot, xnddt) = self.dot_terms();
            let xldot = self.xni + self.xfact;
            let xnddt = xnddt * xldot;

            if !step_again {
                break (remaining, xndot, xnddt, xldot);
            }

            self.xli += xldot * self.delt + xndot * STEP2;
            self.xni += xndot * self.delt + xnddt * STEP2;
            self.atime += self.delt;
        };

        let xn = self.xni + xndot * ft + xnddt * ft * ft * 0.5;
        let xl = self.xli + xldot * ft + xndot * ft * ft * 0.5;
        let temp = -xnode + self.thgr + t * THDT;

        let xll = match self.terms {
            Terms::Synchronous { .. } => xl - omgadf + temp,
            Terms::HalfDay { .. } => xl + temp + temp,
        };

        Integrated { xn, xll }
    }

    fn dot_terms(&self) -> (f64, f64) {
        let xli = self.xli;

        match self.terms {
            Terms::Synchronous { del1, del2, del3 } => {
                let xndot = del1 * (xli - FASX2).sin()
                    + del2 * (2.0 * (xli - FASX4)).sin()
                    + del3 * (3.0 * (xli - FASX6)).sin();
                let xnddt = del1 * (xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (xli - FASX6)).cos();
                (xndot, xnddt)
            }
            Terms::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
                omegaq,
                omgdot,
            } => {
                let xomi = omegaq + omgdot * self.atime;
                let x2omi = xomi + xomi;
                let x2li = xli + xli;

                let xndot = d2201 * (x2omi + xli - G22).sin()
                    + d2211 * (xli - G22).sin()
                    + d3210 * (xomi + xli - G32).sin()
                    + d3222 * (-xomi + xli - G32).sin()
                    + d4410 * (x2omi + x2li - G44).sin()
                    + d4422 * (x2li - G44).sin()
                    + d5220 * (xomi + xli - G52).sin()
                    + d5232 * (-xomi + xli - G52).sin()
                    + d5421 * (xomi + x2li - G54).sin()
                    + d5433 * (-xomi + x2li - G54).sin();
                let xnddt = d2201 * (x2omi + xli - G22).cos()
                    + d2211 * (xli - G22).cos()
                    + d3210 * (xomi + xli - G32).cos()
                    + d3222 * (-xomi + xli - G32).cos()
                    + d5220 * (xomi + xli - G52).cos()
                    + d5232 * (-xomi + xli - G52).cos()
                    + 2.0
                        * (d4410 * (x2omi + x2li - G44).cos()
                            + d4422 * (x2li - G44).cos()
                            + d5421 * (xomi + x2li - G54).cos()
                            + d5433 * (-xomi + x2li - G54).cos());
                (xndot, xnddt)
            }
        }
    }
}

fn synchronous_terms(el: &OrbitalElements, thgr: f64, rates: &SecularRates) -> (Terms, f64, f64) {
    let eosq = el.eosq;
    let cosio = el.cosio;
    let sinio = el.sinio;
    let xnq = el.xnodp;
    let aqnv = 1.0 / el.aodp;

    let g200 = 1.0 + eosq * (-2.5 + 0.8125 * eosq);
    let g310 = 1.0 + 2.0 * eosq;
    let g300 = 1.0 + eosq * (-6.0 + 6.60937 * eosq);
    let f220 = 0.75 * (1.0 + cosio) * (1.0 + cosio);
    let f311 = 0.9375 * sinio * sinio * (1.0 + 3.0 * cosio) - 0.75 * (1.0 + cosio);
    let f330 = 1.0 + cosio;
    let f330 = 1.875 * f330 * f330 * f330;

    let del1 = 3.0 * xnq * xnq * aqnv * aqnv;
    let del2 = 2.0 * del1 * f220 * g200 * Q22;
    let del3 = 3.0 * del1 * f330 * g300 * Q33 * aqnv;
    let del1 = del1 * f311 * g310 * Q31 * aqnv;

    let xlamo = el.xmo + el.xnodeo + el.omegao - thgr;
    let xpidot = rates.omgdot + rates.xnodot;
    let bfact = rates.xmdot + xpidot - THDT;
    let bfact = bfact + rates.ssl + rates.ssg + rates.ssh;

    (Terms::Synchronous { del1, del2, del3 }, xlamo, bfact)
}

fn half_day_terms(el: &OrbitalElements, thgr: f64, rates: &SecularRates) -> (Terms, f64, f64) {
    let eq = el.eo;
    let eosq = el.eosq;
    let eoc = eq * eosq;
    let cosio = el.cosio;
    let sinio = el.sinio;
    let theta2 = el.theta2;
    let xnq = el.xnodp;
    let aqnv = 1.0 / el.aodp;

    // Eccentricity functions, fitted piecewise
    let g201 = -0.306 - (eq - 0.64) * 0.440;
    let (g211, g310, g322, g410, g422, g520);
    if eq <= 0.65 {
        g211 = 3.616 - 13.247 * eq + 16.290 * eosq;
        g310 = -19.302 + 117.390 * eq - 228.419 * eosq + 156.591 * eoc;
        g322 = -18.9068 + 109.7927 * eq - 214.6334 * eosq + 146.5816 * eoc;
        g410 = -41.122 + 242.694 * eq - 471.094 * eosq + 313.953 * eoc;
        g422 = -146.407 + 841.880 * eq - 1629.014 * eosq + 1083.435 * eoc;
        g520 = -532.114 + 3017.977 * eq - 5740.0 * eosq + 3708.276 * eoc;
    } else {
        g211 = -72.099 + 331.819 * eq - 508.738 * eosq + 266.724 * eoc;
        g310 = -346.844 + 1582.851 * eq - 2415.925 * eosq + 1246.113 * eoc;
        g322 = -342.585 + 1554.908 * eq - 2366.899 * eosq + 1215.972 * eoc;
        g410 = -1052.797 + 4758.686 * eq - 7193.992 * eosq + 3651.957 * eoc;
        g422 = -3581.69 + 16178.11 * eq - 24462.77 * eosq + 12422.52 * eoc;
        g520 = if eq <= 0.715 {
            1464.74 - 4664.75 * eq + 3763.64 * eosq
        } else {
            -5149.66 + 29936.92 * eq - 54087.36 * eosq + 31324.56 * eoc
        };
    }

    let (g533, g521, g532);
    if eq < 0.7 {
        g533 = -919.2277 + 4988.61 * eq - 9064.77 * eosq + 5542.21 * eoc;
        g521 = -822.71072 + 4568.6173 * eq - 8491.4146 * eosq + 5337.524 * eoc;
        g532 = -853.666 + 4690.25 * eq - 8624.77 * eosq + 5341.4 * eoc;
    } else {
        g533 = -37995.78 + 161616.52 * eq - 229838.2 * eosq + 109377.94 * eoc;
        g521 = -51752.104 + 218913.95 * eq - 309468.16 * eosq + 146349.42 * eoc;
        g532 = -40023.88 + 170470.89 * eq - 242699.48 * eosq + 115605.82 * eoc;
    }

    // Inclination functions
    let sini2 = sinio * sinio;
    let f220 = 0.75 * (1.0 + 2.0 * cosio + theta2);
    let f221 = 1.5 * sini2;
    let f321 = 1.875 * sinio * (1.0 - 2.0 * cosio - 3.0 * theta2);
    let f322 = -1.875 * sinio * (1.0 + 2.0 * cosio - 3.0 * theta2);
    let f441 = 35.0 * sini2 * f220;
    let f442 = 39.3750 * sini2 * sini2;
    let f522 = 9.84375
        * sinio
        * (sini2 * (1.0 - 2.0 * cosio - 5.0 * theta2)
            + 0.33333333 * (-2.0 + 4.0 * cosio + 6.0 * theta2));
    let f523 = sinio
        * (4.92187512 * sini2 * (-2.0 - 4.0 * cosio + 10.0 * theta2)
            + 6.56250012 * (1.0 + 2.0 * cosio - 3.0 * theta2));
    let f542 = 29.53125
        * sinio
        * (2.0 - 8.0 * cosio + theta2 * (-12.0 + 8.0 * cosio + 10.0 * theta2));
    let f543 = 29.53125
        * sinio
        * (-2.0 - 8.0 * cosio + theta2 * (12.0 + 8.0 * cosio - 10.0 * theta2));

    let xno2 = xnq * xnq;
    let ainv2 = aqnv * aqnv;
    let mut temp1 = 3.0 * xno2 * ainv2;
    let temp = temp1 * ROOT22;
    let d2201 = temp * f220 * g201;
    let d2211 = temp * f221 * g211;
    temp1 *= aqnv;
    let temp = temp1 * ROOT32;
    let d3210 = temp * f321 * g310;
    let d3222 = temp * f322 * g322;
    temp1 *= aqnv;
    let temp = 2.0 * temp1 * ROOT44;
    let d4410 = temp * f441 * g410;
    let d4422 = temp * f442 * g422;
    temp1 *= aqnv;
    let temp = temp1 * ROOT52;
    let d5220 = temp * f522 * g520;
    let d5232 = temp * f523 * g532;
    let temp = 2.0 * temp1 * ROOT54;
    let d5421 = temp * f542 * g521;
    let d5433 = temp * f543 * g533;

    let xlamo = el.xmo + el.xnodeo + el.xnodeo - thgr - thgr;
    let bfact = rates.xmdot + rates.xnodot + rates.xnodot - THDT - THDT;
    let bfact = bfact + rates.ssl + rates.ssh + rates.ssh;

    let terms = Terms::HalfDay {
        d2201,
        d2211,
        d3210,
        d3222,
        d4410,
        d4422,
        d5220,
        d5232,
        d5421,
        d5433,
        omegaq: el.omegao,
        omgdot: rates.omgdot,
    };

    (terms, xlamo, bfact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        // Geostationary, about one revolution a day
        assert_eq!(classify(0.004375, 0.0), Resonance::Synchronous);
        // Molniya
        assert_eq!(classify(0.00876, 0.72), Resonance::HalfDay);
        // Half-day period but nearly circular (GPS-like)
        assert_eq!(classify(0.00876, 0.01), Resonance::None);
        // AO-40
        assert_eq!(classify(0.00548, 0.79), Resonance::None);

        // Band edges
        assert_eq!(classify(SYNC_MIN_MOTION, 0.0), Resonance::None);
        assert_eq!(classify(HALF_DAY_MIN_MOTION, 0.5), Resonance::HalfDay);
        assert_eq!(classify(HALF_DAY_MAX_MOTION, 0.5), Resonance::HalfDay);
    }
}

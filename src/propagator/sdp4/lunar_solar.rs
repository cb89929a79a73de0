//! Lunar and solar gravitational perturbations.
//!
//! The same third-body formula is evaluated twice at initialization, once
//! with the Sun's orbit and once with the Moon's, producing secular rates
//! and the coefficients of the long-period periodic terms.

use std::f64::consts::PI;

use crate::consts::TWO_PI;
use crate::elements::OrbitalElements;
use crate::math::mod_2pi;

// Solar orbit
const ZNS: f64 = 1.19459E-5;
const ZES: f64 = 1.675E-2;
const C1SS: f64 = 2.9864797E-6;
const ZCOSGS: f64 = 1.945905E-1;
const ZSINGS: f64 = -9.8088458E-1;
const ZCOSIS: f64 = 9.1744867E-1;
const ZSINIS: f64 = 3.9785416E-1;

// Lunar orbit
const ZNL: f64 = 1.5835218E-4;
const ZEL: f64 = 5.490E-2;
const C1L: f64 = 4.7968065E-7;

/// Below this epoch inclination (3 degrees) the node terms are dropped.
const MIN_NODE_INCLINATION: f64 = 5.2359877E-2;

/// Periodics are only re-evaluated once the time has moved this many
/// minutes from the last evaluation.
const PERIODIC_REFRESH_MINUTES: f64 = 30.0;

/// Orientation of a perturbing body's orbit relative to the satellite's
/// epoch node.
#[derive(Debug, Clone, Copy)]
struct BodyGeometry {
    zcosg: f64,
    zsing: f64,
    zcosi: f64,
    zsini: f64,
    zcosh: f64,
    zsinh: f64,
    cc: f64,
    zn: f64,
    ze: f64,
}

/// Output of one third-body pass.
#[derive(Debug, Clone, Copy, Default)]
struct ThirdBodyTerms {
    se: f64,
    si: f64,
    sl: f64,
    sgh: f64,
    sh: f64,
    periodic: PeriodicCoefficients,
}

#[derive(Debug, Clone, Copy, Default)]
struct PeriodicCoefficients {
    e2: f64,
    e3: f64,
    i2: f64,
    i3: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    gh2: f64,
    gh3: f64,
    gh4: f64,
    h2: f64,
    h3: f64,
}

/// Long-period periodic terms of a single body at some time.
#[derive(Debug, Clone, Copy, Default)]
struct Periodics {
    e: f64,
    i: f64,
    l: f64,
    gh: f64,
    h: f64,
}

#[derive(Debug, Clone)]
struct PerturbingBody {
    /// Mean anomaly of the body at epoch
    zmo: f64,
    zn: f64,
    ze: f64,
    coef: PeriodicCoefficients,
}

impl PerturbingBody {
    fn periodics(&self, t: f64) -> Periodics {
        let zm = self.zmo + self.zn * t;
        let zf = zm + 2.0 * self.ze * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        let c = &self.coef;

        Periodics {
            e: c.e2 * f2 + c.e3 * f3,
            i: c.i2 * f2 + c.i3 * f3,
            l: c.l2 * f2 + c.l3 * f3 + c.l4 * sinzf,
            gh: c.gh2 * f2 + c.gh3 * f3 + c.gh4 * sinzf,
            h: c.h2 * f2 + c.h3 * f3,
        }
    }
}

/// Lunar-solar secular rates (per minute) and long-period periodics.
#[derive(Debug, Clone)]
pub(crate) struct LunarSolar {
    pub sse: f64,
    pub ssi: f64,
    pub ssl: f64,
    pub ssg: f64,
    pub ssh: f64,

    sun: PerturbingBody,
    moon: PerturbingBody,

    cosio: f64,
    sinio: f64,
    xqncl: f64,

    cache: Option<PeriodicCache>,
}

#[derive(Debug, Clone, Copy)]
struct PeriodicCache {
    t: f64,
    solar: Periodics,
    lunar: Periodics,
}

/// Elements after the secular update, corrected in place by
/// [`LunarSolar::apply_periodics`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeepElements {
    pub xll: f64,
    pub omgadf: f64,
    pub xnode: f64,
    pub em: f64,
    pub xinc: f64,
}

impl LunarSolar {
    pub fn new(el: &OrbitalElements, ds50: f64) -> Self {
        // Lunar orbit at epoch
        let day = ds50 + 18261.5;
        let xnodce = 4.5236020 - 9.2422029E-4 * day;
        let stem = xnodce.sin();
        let ctem = xnodce.cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let c = 4.7199672 + 0.22997150 * day;
        let gam = 5.8351514 + 0.0019443680 * day;
        let zmol = mod_2pi(c - gam);
        let zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        let zx = gam + zx.atan2(zy) - xnodce;
        let zcosgl = zx.cos();
        let zsingl = zx.sin();
        let zmos = mod_2pi(6.2565837 + 0.017201977 * day);

        let sinq = el.xnodeo.sin();
        let cosq = el.xnodeo.cos();

        let solar = third_body_terms(
            el,
            &BodyGeometry {
                zcosg: ZCOSGS,
                zsing: ZSINGS,
                zcosi: ZCOSIS,
                zsini: ZSINIS,
                zcosh: cosq,
                zsinh: sinq,
                cc: C1SS,
                zn: ZNS,
                ze: ZES,
            },
        );
        let lunar = third_body_terms(
            el,
            &BodyGeometry {
                zcosg: zcosgl,
                zsing: zsingl,
                zcosi: zcosil,
                zsini: zsinil,
                zcosh: zcoshl * cosq + zsinhl * sinq,
                zsinh: sinq * zcoshl - cosq * zsinhl,
                cc: C1L,
                zn: ZNL,
                ze: ZEL,
            },
        );

        let cosio = el.cosio;
        let sinio = el.sinio;
        let solar_ssh = per_sinio(solar.sh, sinio);
        let solar_ssg = solar.sgh - cosio * solar_ssh;

        LunarSolar {
            sse: solar.se + lunar.se,
            ssi: solar.si + lunar.si,
            ssl: solar.sl + lunar.sl,
            ssg: solar_ssg + lunar.sgh - cosio * per_sinio(lunar.sh, sinio),
            ssh: solar_ssh + per_sinio(lunar.sh, sinio),
            sun: PerturbingBody {
                zmo: zmos,
                zn: ZNS,
                ze: ZES,
                coef: solar.periodic,
            },
            moon: PerturbingBody {
                zmo: zmol,
                zn: ZNL,
                ze: ZEL,
                coef: lunar.periodic,
            },
            cosio,
            sinio,
            xqncl: el.xincl,
            cache: None,
        }
    }

    /// Adds the long-period periodics at time `t` to the elements. Low
    /// inclination orbits go through the Lyddane modification.
    pub fn apply_periodics(&mut self, t: f64, el: &mut DeepElements) {
        let sinis = el.xinc.sin();
        let cosis = el.xinc.cos();

        let cache = match self.cache {
            Some(cache) if (cache.t - t).abs() < PERIODIC_REFRESH_MINUTES => cache,
            _ => {
                let cache = PeriodicCache {
                    t,
                    solar: self.sun.periodics(t),
                    lunar: self.moon.periodics(t),
                };
                self.cache = Some(cache);
                cache
            }
        };
        let (solar, lunar) = (cache.solar, cache.lunar);

        let pe = solar.e + lunar.e;
        let pinc = solar.i + lunar.i;
        let pl = solar.l + lunar.l;
        let mut pgh = solar.gh + lunar.gh;
        let mut ph = solar.h + lunar.h;

        el.xinc += pinc;
        el.em += pe;

        if self.xqncl >= 0.2 {
            ph /= self.sinio;
            pgh -= self.cosio * ph;
            el.omgadf += pgh;
            el.xnode += ph;
            el.xll += pl;
            return;
        }

        // Lyddane modification
        let (sinok, cosok) = el.xnode.sin_cos();
        let alfdp = sinis * sinok + (ph * cosok + pinc * cosis * sinok);
        let betdp = sinis * cosok + (-ph * sinok + pinc * cosis * cosok);
        let xnode = mod_2pi(el.xnode);
        let xls = el.xll + el.omgadf + cosis * xnode + (pl + pgh - pinc * xnode * sinis);
        let xnoh = xnode;
        let mut xnode = alfdp.atan2(betdp);

        // Keep the node on the same branch as before
        if (xnoh - xnode).abs() > PI {
            if xnode < xnoh {
                xnode += TWO_PI;
            } else {
                xnode -= TWO_PI;
            }
        }

        el.xnode = xnode;
        el.xll += pl;
        el.omgadf = xls - el.xll - el.xinc.cos() * xnode;
    }
}

fn per_sinio(sh: f64, sinio: f64) -> f64 {
    if sh == 0.0 {
        0.0
    } else {
        sh / sinio
    }
}

fn third_body_terms(el: &OrbitalElements, body: &BodyGeometry) -> ThirdBodyTerms {
    let BodyGeometry {
        zcosg,
        zsing,
        zcosi,
        zsini,
        zcosh,
        zsinh,
        cc,
        zn,
        ze,
    } = *body;
    let cosio = el.cosio;
    let sinio = el.sinio;
    let eosq = el.eosq;
    let sing = el.omegao.sin();
    let cosg = el.omegao.cos();

    let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
    let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
    let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
    let a8 = zsing * zsini;
    let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
    let a10 = zcosg * zsini;
    let a2 = cosio * a7 + sinio * a8;
    let a4 = cosio * a9 + sinio * a10;
    let a5 = -sinio * a7 + cosio * a8;
    let a6 = -sinio * a9 + cosio * a10;

    let x1 = a1 * cosg + a2 * sing;
    let x2 = a3 * cosg + a4 * sing;
    let x3 = -a1 * sing + a2 * cosg;
    let x4 = -a3 * sing + a4 * cosg;
    let x5 = a5 * sing;
    let x6 = a6 * sing;
    let x7 = a5 * cosg;
    let x8 = a6 * cosg;

    let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
    let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
    let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
    let z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * eosq;
    let z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * eosq;
    let z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * eosq;
    let z11 = -6.0 * a1 * a5 + eosq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
    let z12 = -6.0 * (a1 * a6 + a3 * a5)
        + eosq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
    let z13 = -6.0 * a3 * a6 + eosq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
    let z21 = 6.0 * a2 * a5 + eosq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
    let z22 = 6.0 * (a4 * a5 + a2 * a6)
        + eosq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
    let z23 = 6.0 * a4 * a6 + eosq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
    let z1 = z1 + z1 + el.betao2 * z31;
    let z2 = z2 + z2 + el.betao2 * z32;
    let z3 = z3 + z3 + el.betao2 * z33;

    let xnoi = 1.0 / el.xnodp;
    let s3 = cc * xnoi;
    let s2 = -0.5 * s3 / el.betao;
    let s4 = s3 * el.betao;
    let s1 = -15.0 * el.eo * s4;
    let s5 = x1 * x3 + x2 * x4;
    let s6 = x2 * x3 + x1 * x4;
    let s7 = x2 * x4 - x1 * x3;

    let sh = if el.xincl < MIN_NODE_INCLINATION {
        0.0
    } else {
        -zn * s2 * (z21 + z23)
    };

    ThirdBodyTerms {
        se: s1 * zn * s5,
        si: s2 * zn * (z11 + z13),
        sl: -zn * s3 * (z1 + z3 - 14.0 - 6.0 * eosq),
        sgh: s4 * zn * (z31 + z33 - 6.0),
        sh,
        periodic: PeriodicCoefficients {
            e2: 2.0 * s1 * s6,
            e3: 2.0 * s1 * s7,
            i2: 2.0 * s2 * z12,
            i3: 2.0 * s2 * (z13 - z11),
            l2: -2.0 * s3 * z2,
            l3: -2.0 * s3 * (z3 - z1),
            l4: -2.0 * s3 * (-21.0 - 9.0 * eosq) * ze,
            gh2: 2.0 * s4 * z32,
            gh3: 2.0 * s4 * (z33 - z31),
            gh4: -18.0 * s4 * ze,
            h2: -2.0 * s2 * z22,
            h3: -2.0 * s2 * (z23 - z21),
        },
    }
}

use crate::consts::EPSILON;

/// Number of corrections attempted after the first Newton step.
const MAX_CORRECTIONS: usize = 10;

/// Solution of the modified Kepler equation used by SGP4/SDP4, which is
/// phrased in terms of `E + omega` and the Lyddane eccentricity components
/// `axn = e cos(omega)` and `ayn = e sin(omega)`.
///
/// The trig values refer to the iterate the final step was evaluated at, so
/// they stay consistent with `e_cos_e` and `e_sin_e` even when the solver
/// gives up.
#[derive(Debug, Clone, Copy)]
pub struct KeplerSolution {
    pub sin_e: f64,
    pub cos_e: f64,
    /// `axn cos(E) + ayn sin(E)`
    pub e_cos_e: f64,
    /// `axn sin(E) - ayn cos(E)`
    pub e_sin_e: f64,
    pub iterations: usize,
    pub converged: bool,
}

pub fn solve_kepler(capu: f64, axn: f64, ayn: f64) -> KeplerSolution {
    let mut e = capu;
    let mut iterations = 0;

    loop {
        let sin_e = e.sin();
        let cos_e = e.cos();
        let axn_sin = axn * sin_e;
        let ayn_cos = ayn * cos_e;
        let axn_cos = axn * cos_e;
        let ayn_sin = ayn * sin_e;

        let epw = (capu - ayn_cos + axn_sin - e) / (1.0 - axn_cos - ayn_sin) + e;
        iterations += 1;

        let converged = (epw - e).abs() <= EPSILON;
        if converged || iterations > MAX_CORRECTIONS {
            return KeplerSolution {
                sin_e,
                cos_e,
                e_cos_e: axn_cos + ayn_sin,
                e_sin_e: axn_sin - ayn_cos,
                iterations,
                converged,
            };
        }

        e = epw;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_circular_is_immediate() {
        let solution = solve_kepler(1.3, 0.0, 0.0);
        assert!(solution.converged);
        assert_eq!(solution.iterations, 1);
        assert_relative_eq!(solution.sin_e, 1.3_f64.sin());
        assert_eq!(solution.e_cos_e, 0.0);
    }

    #[test]
    fn test_solves_equation() {
        // With omega = 0, this is the classical Kepler equation M = E - e sin E
        let ecc = 0.3;
        let mean = 2.0;
        let solution = solve_kepler(mean, ecc, 0.0);
        assert!(solution.converged);

        let ecc_anomaly = solution.sin_e.atan2(solution.cos_e);
        assert_relative_eq!(ecc_anomaly - ecc * ecc_anomaly.sin(), mean, epsilon = 1e-10);
        assert_relative_eq!(solution.e_cos_e, ecc * solution.cos_e);
        assert_relative_eq!(solution.e_sin_e, ecc * solution.sin_e);
    }

    #[test]
    fn test_iteration_cap() {
        // Near-parabolic with a bad initial guess; it must stop regardless
        let solution = solve_kepler(1e-3, 0.999_999, 0.0);
        assert!(solution.iterations <= MAX_CORRECTIONS + 1);
    }
}

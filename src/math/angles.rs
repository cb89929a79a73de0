use crate::consts::TWO_PI;

/// Returns `arg1 mod arg2`, flooring the quotient into an `i32`.
///
/// Only meaningful for a positive divisor; a negative one gives odd (but
/// stable) results, e.g. `modulus(23.0, -10.0) == -17.0`.
pub fn modulus(arg1: f64, arg2: f64) -> f64 {
    let i = (arg1 / arg2).floor() as i32;
    let mut value = arg1 - f64::from(i) * arg2;

    if value < 0.0 {
        value += arg2;
    }

    value
}

/// Reduces an angle into `[0, 2pi)`. The quotient is truncated towards zero
/// before being removed.
pub fn mod_2pi(angle: f64) -> f64 {
    let i = (angle / TWO_PI) as i32;
    let mut value = angle - f64::from(i) * TWO_PI;

    if value < 0.0 {
        value += TWO_PI;
    }

    value
}

/// Fractional part of the argument, always non-negative.
pub fn frac(arg: f64) -> f64 {
    arg - arg.floor()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_modulus() {
        assert_relative_eq!(modulus(370.0, 360.0), 10.0);
        assert_relative_eq!(modulus(-10.6, 10.0), 9.4, epsilon = 1e-12);
        // Negative divisors behave oddly, but consistently
        assert_relative_eq!(modulus(23.0, -10.0), -17.0);
    }

    #[test]
    fn test_mod_2pi() {
        assert_relative_eq!(mod_2pi(1.0), 1.0);
        assert_relative_eq!(mod_2pi(TWO_PI + 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(mod_2pi(-1.0), TWO_PI - 1.0);
        assert_relative_eq!(mod_2pi(-3.0 * TWO_PI - 1.0), TWO_PI - 1.0, epsilon = 1e-12);
        assert_eq!(mod_2pi(0.0), 0.0);
    }

    #[test]
    fn test_frac() {
        assert_relative_eq!(frac(2.25), 0.25);
        assert_relative_eq!(frac(-2.25), 0.75);
    }
}

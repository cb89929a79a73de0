//! Parser for NORAD three-line element sets.
//!
//! ```text
//! AO-51 [+]
//! 1 28375U 04025K   09105.66391970  .00000003  00000-0  13761-4 0  3643
//! 2 28375 098.0551 118.9086 0084159 315.8041 043.6444 14.40638450251959
//! ```
//!
//! Fields are read from fixed columns and trimmed before parsing.

use std::str::FromStr;

use crate::error::TleError;

const LINE_COUNT: usize = 3;
const MIN_LINE1_LEN: usize = 68;
const MIN_LINE2_LEN: usize = 68;

/// A parsed element set, with values in the units they are published in.
#[derive(Debug, Clone, PartialEq)]
pub struct Tle {
    pub name: String,
    pub catalog_number: u32,
    pub element_set: u32,
    /// Two-digit epoch year
    pub year: u32,
    /// Fractional day of year of the epoch
    pub ref_epoch: f64,
    /// Degrees
    pub inclination: f64,
    /// Right ascension of the ascending node, degrees
    pub raan: f64,
    pub eccentricity: f64,
    /// Degrees
    pub arg_perigee: f64,
    /// Degrees
    pub mean_anomaly: f64,
    /// Revolutions per day
    pub mean_motion: f64,
    /// First derivative of mean motion over two, rev/day^2
    pub drag: f64,
    /// Second derivative of mean motion over six, rev/day^3
    pub nddot6: f64,
    pub bstar: f64,
    pub orbit_number: u32,
}

impl Tle {
    /// Parses a name line followed by the two element lines.
    pub fn parse(lines: &[&str]) -> Result<Self, TleError> {
        if lines.len() != LINE_COUNT {
            return Err(TleError::WrongLineCount(lines.len()));
        }
        for (idx, line) in lines.iter().enumerate() {
            if line.is_empty() {
                return Err(TleError::EmptyLine(idx));
            }
        }

        let line1 = check_line(lines[1], 1, '1', MIN_LINE1_LEN)?;
        let line2 = check_line(lines[2], 2, '2', MIN_LINE2_LEN)?;

        Ok(Tle {
            name: lines[0].trim().to_string(),
            catalog_number: int_field(line1, 2..7, "catalog number")?,
            element_set: int_field(line1, 64..68, "element set")?,
            year: int_field(line1, 18..20, "epoch year")?,
            ref_epoch: float_field(line1, 20..32, "epoch day")?,
            drag: float_field(line1, 33..43, "mean motion derivative")?,
            nddot6: exponent_field(line1, 44..50, 51..52, "mean motion second derivative")?,
            bstar: exponent_field(line1, 53..59, 60..61, "bstar")?,
            inclination: float_field(line2, 8..16, "inclination")?,
            raan: float_field(line2, 17..25, "raan")?,
            eccentricity: 1.0e-07 * float_field(line2, 26..33, "eccentricity")?,
            arg_perigee: float_field(line2, 34..42, "argument of perigee")?,
            mean_anomaly: float_field(line2, 43..51, "mean anomaly")?,
            mean_motion: float_field(line2, 52..63, "mean motion")?,
            orbit_number: int_field(line2, 63..68, "orbit number")?,
        })
    }

    /// Parses every complete group of three lines. Blank lines are skipped
    /// and a trailing partial group is ignored.
    pub fn parse_many(text: &str) -> Result<Vec<Self>, TleError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .collect();

        lines.chunks_exact(LINE_COUNT).map(Tle::parse).collect()
    }

    /// Epoch in `yyddd.dddddddd` form.
    pub fn epoch(&self) -> f64 {
        1000.0 * f64::from(self.year) + self.ref_epoch
    }
}

impl FromStr for Tle {
    type Err = TleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Tle::parse(&lines)
    }
}

fn check_line<'a>(
    line: &'a str,
    number: usize,
    expected: char,
    min_len: usize,
) -> Result<&'a str, TleError> {
    // Element lines are plain ASCII, so byte ranges are character ranges
    if !line.is_ascii() || line.len() < min_len {
        return Err(TleError::LineTooShort {
            line: number,
            needed: min_len,
            got: line.chars().count(),
        });
    }
    if !line.starts_with(expected) {
        return Err(TleError::BadLineNumber {
            line: number,
            expected,
        });
    }
    Ok(line)
}

fn float_field(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<f64, TleError> {
    line[range]
        .trim()
        .parse()
        .map_err(|source| TleError::ParseField { field, source })
}

fn int_field(
    line: &str,
    range: std::ops::Range<usize>,
    field: &'static str,
) -> Result<u32, TleError> {
    line[range]
        .trim()
        .parse()
        .map_err(|source| TleError::ParseIntField { field, source })
}

/// Reads an implied-decimal mantissa and its exponent digit, e.g.
/// ` 13761-4` as `0.13761e-4`. The exponent sign column is not consulted.
fn exponent_field(
    line: &str,
    mantissa: std::ops::Range<usize>,
    exponent: std::ops::Range<usize>,
    field: &'static str,
) -> Result<f64, TleError> {
    let mantissa = 1.0e-5 * float_field(line, mantissa, field)?;
    let exponent = float_field(line, exponent, field)?;
    Ok(mantissa / 10.0_f64.powf(exponent))
}

//! Julian dates and sidereal time.

use chrono::{DateTime, TimeZone, Utc};

use crate::consts::{EARTH_ROTATIONS_PER_SIDEREAL_DAY, SECS_PER_DAY, TWO_PI};
use crate::math::{frac, mod_2pi, modulus};

/// Julian date of 1979-12-31 00:00:00 UTC, the origin of the day numbers
/// used for ephemeris timing.
const DAYNUM_ORIGIN_JD: f64 = 2_444_238.5;
const DAYNUM_ORIGIN_UNIX_MILLIS: i64 = 315_446_400_000;

/// Julian date of 1949-12-31 00:00:00 UT, the origin of `ds50`.
const DS50_ORIGIN_JD: f64 = 2_433_281.5;
const J2000_JD: f64 = 2_451_545.0;

/// Julian date of 0h UT on 31 December of the year before `year`, i.e.
/// "day zero" of `year`. Valid from 1900 through 2099.
pub fn julian_date_of_year(year: f64) -> f64 {
    let year = year - 1.0;
    let a = (year / 100.0).floor() as i64;
    let b = 2 - a + a / 4;
    let i = (365.25 * year).floor() as i64;
    let i = (i as f64 + 30.6001 * 14.0) as i64;

    i as f64 + 1_720_994.5 + b as f64
}

/// Splits a TLE-style epoch `yyddd.dddddddd` into a four digit year and a
/// (fractional) day of year. Two-digit years below 57 are in the 2000s.
pub fn split_epoch(epoch: f64) -> (f64, f64) {
    let mut year = (epoch * 1E-3).floor();
    let day = (epoch * 1E-3 - year) * 1000.0;

    if year < 57.0 {
        year += 2000.0;
    } else {
        year += 1900.0;
    }

    (year, day)
}

/// Julian date of a TLE-style epoch.
pub fn julian_date_of_epoch(epoch: f64) -> f64 {
    let (year, day) = split_epoch(epoch);
    julian_date_of_year(year) + day
}

/// Julian date of an instant, at millisecond resolution.
pub fn julian_date(time: &DateTime<Utc>) -> f64 {
    let millis = time.timestamp_millis() - DAYNUM_ORIGIN_UNIX_MILLIS;
    millis as f64 / 1000.0 / 60.0 / 60.0 / 24.0 + DAYNUM_ORIGIN_JD
}

/// Inverse of [`julian_date`], rounded to the nearest millisecond.
pub fn from_julian_date(julian_date: f64) -> Option<DateTime<Utc>> {
    let millis = ((julian_date - DAYNUM_ORIGIN_JD) * SECS_PER_DAY * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(DAYNUM_ORIGIN_UNIX_MILLIS + millis)
        .single()
}

/// Greenwich mean sidereal time at a Julian date, in radians.
pub fn theta_g_jd(jd: f64) -> f64 {
    let ut = frac(jd + 0.5);
    let tu = (jd - ut - J2000_JD) / 36525.0;
    let mut gmst = 24110.54841 + tu * (8640184.812866 + tu * (0.093104 - tu * 6.2E-6));
    gmst = modulus(gmst + SECS_PER_DAY * EARTH_ROTATIONS_PER_SIDEREAL_DAY * ut, SECS_PER_DAY);

    TWO_PI * gmst / SECS_PER_DAY
}

/// Greenwich sidereal time at a TLE epoch, in radians, together with the
/// epoch expressed in days since 1950 (`ds50`).
pub fn theta_g_epoch(epoch: f64) -> (f64, f64) {
    let (year, day) = split_epoch(epoch);
    let day_floor = day.floor();
    let day_fraction = day - day_floor;

    let jd = julian_date_of_year(year) + day_floor;
    let ds50 = jd - DS50_ORIGIN_JD + day_fraction;

    (mod_2pi(6.3003880987 * ds50 + 1.72944494), ds50)
}

mod common;

use chrono::Duration;
use common::{at, ground_station, satellite, DEEP_SPACE, DE_ORBIT, GEOSYNC, LEO, MOLNIYA, WEATHER};

fn f7(x: f64) -> String {
    format!("{:9.7}", x)
}

#[test]
fn test_leo_satellite() {
    let gs = ground_station();
    let mut sat = satellite(&LEO);
    assert!(!sat.is_deep_space());

    let pos = sat.position(&gs, at("2009-04-17T06:57:32Z"));

    assert_eq!(f7(pos.azimuth), "3.2421950");
    assert_eq!(f7(pos.elevation), "0.1511580");
    assert_eq!(f7(pos.longitude), "6.2069835");
    assert_eq!(f7(pos.latitude), "0.5648232");
    assert_eq!(format!("{:10.7}", pos.altitude), "818.1375014");
    assert_eq!(f7(pos.phase), "3.4337605");
    assert_eq!(format!("{:4.0}", pos.range), "2506");
    assert_eq!(f7(pos.range_rate), "6.4832408");
    assert_eq!(f7(pos.theta), "-0.9501914");
    assert_eq!(f7(pos.eclipse_depth), "-0.7307717");
    assert!(!pos.eclipsed);
    assert!(sat.will_be_seen(&gs));

    let circle = pos.range_circle(1);
    let fmt = |i: usize| format!("{:6.1} {:6.1}", circle[i].latitude, circle[i].longitude);
    assert_eq!(fmt(0), "  59.9  355.6");
    assert_eq!(fmt(89), "  28.8  323.7");
    assert_eq!(fmt(179), "   4.8  355.2");
    assert_eq!(fmt(269), "  27.9   27.2");
}

#[test]
fn test_weather_satellite() {
    let gs = ground_station();
    let mut sat = satellite(&WEATHER);
    assert!(!sat.is_deep_space());

    let pos = sat.position(&gs, at("2009-12-26T00:00:00Z"));

    assert_eq!(f7(pos.azimuth), "0.0602822");
    assert_eq!(f7(pos.elevation), "-0.2617647");
    assert_eq!(f7(pos.longitude), "2.8305378");
    assert_eq!(f7(pos.latitude), "1.4098576");
    assert_eq!(format!("{:10.7}", pos.altitude), "848.4319560");
    assert_eq!(f7(pos.phase), "4.5526109");
    assert_eq!(format!("{:4.0}", pos.range.floor()), "5433");
    assert_eq!(f7(pos.range_rate), "-3.0094317");
    assert_eq!(f7(pos.theta), "-1.8011516");
    assert_eq!(f7(pos.eclipse_depth), "-0.2353420");
    assert!(!pos.eclipsed);
    assert!(!pos.above_horizon);
    assert!(sat.will_be_seen(&gs));
}

#[test]
fn test_ground_track_then_station() {
    let gs = ground_station();
    let mut sat = satellite(&WEATHER);

    let vectors = sat.calculate_vectors(at("2009-12-26T00:00:00Z"));

    let track = vectors.ground_track();
    assert_eq!(f7(track.longitude), "2.8305378");
    assert_eq!(f7(track.latitude), "1.4098576");
    assert_eq!(format!("{:10.7}", track.altitude), "848.4319560");
    assert_eq!(f7(track.phase), "4.5526109");
    assert_eq!(f7(track.theta), "-1.8011516");

    let pos = vectors.position_for_ground_station(&gs);
    assert_eq!(f7(pos.azimuth), "0.0602822");
    assert_eq!(f7(pos.elevation), "-0.2617647");
    assert_eq!(format!("{:4.0}", pos.range.floor()), "5433");
    assert_eq!(f7(pos.range_rate), "-3.0094317");
    assert_eq!(f7(pos.eclipse_depth), "-0.2353420");
    assert!(!pos.eclipsed);

    // A second station sees the same ground track
    let other = satpredict::observer::GroundStation::new("Equator", 0.0, 0.0, 0.0);
    let from_other = vectors.position_for_ground_station(&other);
    assert_eq!(from_other.latitude, pos.latitude);
    assert_ne!(from_other.azimuth, pos.azimuth);
}

#[test]
fn test_decaying_satellite() {
    let mut sat = satellite(&DE_ORBIT);
    assert!(!sat.is_deep_space());

    let track = sat.calculate_vectors(at("2009-12-26T00:00:00Z")).ground_track();
    assert_eq!(format!("{:10.7}", track.altitude), "57.2854215");
}

#[test]
fn test_deep_space_satellite() {
    let gs = ground_station();
    let mut sat = satellite(&DEEP_SPACE);
    assert!(sat.is_deep_space());

    let pos = sat.position(&gs, at("2009-04-17T10:10:52Z"));

    assert_eq!(f7(pos.azimuth), "2.2579325");
    assert_eq!(f7(pos.elevation), "0.4144053");
    assert_eq!(f7(pos.longitude), "0.7091175");
    assert_eq!(f7(pos.latitude), "0.0442970");
    assert_eq!(format!("{:10.7}", pos.altitude), "58847.2042542");
    assert_eq!(f7(pos.phase), "3.2039351");
    assert_eq!(f7(pos.range), "62390.2433539");
    assert_eq!(f7(pos.range_rate), "-0.2187132");
    assert_eq!(f7(pos.theta), "0.6810134");
    assert_eq!(f7(pos.eclipse_depth), "-2.7759541");
    assert!(!pos.eclipsed);
    assert!(pos.above_horizon);
    assert!(sat.will_be_seen(&gs));
}

#[test]
fn test_geosynchronous_satellite() {
    let gs = ground_station();
    let mut sat = satellite(&GEOSYNC);
    assert!(sat.is_deep_space());

    let pos = sat.position(&gs, at("2009-12-26T00:00:00Z"));

    assert_eq!(f7(pos.azimuth), "5.7530820");
    assert_eq!(f7(pos.elevation), "-0.8368869");
    assert_eq!(f7(pos.longitude), "3.4946919");
    assert_eq!(f7(pos.latitude), "-0.1440008");
    assert_eq!(format!("{:10.7}", pos.altitude), "36031.8182912");
    assert_eq!(f7(pos.phase), "0.5377382");
    assert_eq!(f7(pos.range), "46934.3153284");
    assert_eq!(f7(pos.range_rate), "0.0271561");
    assert_eq!(f7(pos.theta), "-1.1369975");
    assert_eq!(f7(pos.eclipse_depth), "-2.5674344");
    assert!(!pos.eclipsed);
    assert!(sat.will_be_seen(&gs));
}

#[test]
fn test_molniya_satellite() {
    let gs = ground_station();
    let mut sat = satellite(&MOLNIYA);
    assert!(sat.is_deep_space());

    let pos = sat.position(&gs, at("2009-12-26T00:00:00Z"));

    assert_eq!(f7(pos.azimuth), "6.2095948");
    assert_eq!(f7(pos.elevation), "0.0572862");
    assert_eq!(f7(pos.longitude), "3.2171857");
    assert_eq!(f7(pos.latitude), "0.8635892");
    assert_eq!(format!("{:9.3}", pos.altitude), "35280.747");
    assert_eq!(f7(pos.phase), "2.0315668");
    assert_eq!(format!("{:9.3}", pos.range), "40814.880");
    assert_eq!(f7(pos.range_rate), "0.9164450");
    assert_eq!(f7(pos.theta), "-1.4145037");
    assert_eq!(f7(pos.eclipse_depth), "-1.7199331");
    assert!(!pos.eclipsed);
    assert!(sat.will_be_seen(&gs));
}

#[test]
fn test_eclipses_through_june() {
    let gs = ground_station();
    let mut sat = satellite(&LEO);
    let start = at("2009-06-01T00:00:00Z");

    for day in 0..30 {
        let pos = sat.position(&gs, start + Duration::days(day));
        let expected = matches!(day, 4 | 9 | 14 | 19 | 24 | 29);
        assert_eq!(
            pos.eclipsed, expected,
            "eclipsed should be {} on day {}",
            expected, day
        );
        if pos.eclipsed {
            assert!(pos.eclipse_depth >= 0.0);
        }
    }
}

#[test]
fn test_deep_space_track_is_repeatable() {
    // Positions along a track don't depend on which positions came before
    let gs = ground_station();
    let start = at("2009-12-26T00:00:00Z");
    let mut stepped = satellite(&MOLNIYA);
    for hour in 0..48 {
        stepped.position(&gs, start + Duration::hours(hour));
    }
    let end = start + Duration::hours(48);
    let a = stepped.position(&gs, end);
    let b = satellite(&MOLNIYA).position(&gs, end);

    assert!((a.latitude - b.latitude).abs() < 1e-6);
    assert!((a.longitude - b.longitude).abs() < 1e-6);
    assert!((a.altitude - b.altitude).abs() < 1e-3);
}

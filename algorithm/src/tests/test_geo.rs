use crate::geo::*;
use common::position::Position;

#[test]
fn distance_of_a_thousandth_degree_north() {
    let a = Position::from_lng_lat(0.0, 0.0);
    let b = Position::from_lng_lat(0.0, 0.001);
    let distance = distance_meters(&a, &b);
    assert!((distance - 111.19).abs() < 1.0, "distance was {distance}");
}

#[test]
fn distance_is_symmetric_and_zero_for_same_point() {
    let a = Position::new(37.479726, 126.506498);
    let b = Position::new(37.481, 126.51);
    assert_eq!(distance_meters(&a, &b), distance_meters(&b, &a));
    assert_eq!(distance_meters(&a, &a), 0.0);
    assert!(distance_meters(&a, &b) > 0.0);
}

#[test]
fn bearing_is_normalized() {
    assert_eq!(normalize_bearing(-90.0), 270.0);
    assert_eq!(normalize_bearing(360.0), 0.0);
    assert_eq!(normalize_bearing(725.0), 5.0);
    assert_eq!(normalize_bearing(0.0), 0.0);
    let tiny = normalize_bearing(-1e-20);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn planar_heading_points_to_compass_directions() {
    let origin = Position::from_lng_lat(0.0, 0.0);
    let north = Position::from_lng_lat(0.0, 0.001);
    let east = Position::from_lng_lat(0.001, 0.0);
    let west = Position::from_lng_lat(-0.001, 0.0);
    let heading = |to: &Position| planar_heading(&origin, to).unwrap();
    assert!(heading(&north).abs() < 1e-9);
    assert!((heading(&east) - 90.0).abs() < 1e-9);
    assert!((heading(&west) - 270.0).abs() < 1e-9);
    assert_eq!(planar_heading(&origin, &origin), None);
}

#[test]
fn durations_omit_leading_zero_units() {
    assert_eq!(format_duration(3723.0), "1h 2m 3s");
    assert_eq!(format_duration(3600.0), "1h 0m 0s");
    assert_eq!(format_duration(125.0), "2m 5s");
    assert_eq!(format_duration(59.9), "59s");
    assert_eq!(format_duration(0.0), "0s");
    assert_eq!(format_duration(-5.0), "0s");
    assert_eq!(format_duration(f64::NAN), "0s");
}

#[test]
fn distances_switch_to_kilometers() {
    assert_eq!(format_distance(350.4), "350 m");
    assert_eq!(format_distance(1000.0), "1.0 km");
    assert_eq!(format_distance(1234.0), "1.2 km");
    assert_eq!(format_distance(0.0), "0 m");
}

#[test]
fn turn_codes_map_to_labels() {
    assert_eq!(turn_kind_to_label(11), "straight");
    assert_eq!(turn_kind_to_label(16), "left");
    assert_eq!(turn_kind_to_label(19), "right");
    assert_eq!(turn_kind_to_label(14), "u-turn");
    assert_eq!(turn_kind_to_label(71), "first exit");
    assert_eq!(turn_kind_to_label(72), "second exit");
    assert_eq!(turn_kind_to_label(73), "first right street");
    assert_eq!(turn_kind_to_label(200), "origin");
    assert_eq!(turn_kind_to_label(201), "destination");
    assert_eq!(turn_kind_to_label(999), "straight");
}

#[test]
fn speed_is_shown_in_kilometers_per_hour() {
    assert_eq!(to_kmh(13.9), 50);
    assert_eq!(to_kmh(0.0), 0);
    assert_eq!(to_kmh(-3.0), 0);
}

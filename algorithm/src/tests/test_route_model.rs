use crate::geo::distance_meters;
use crate::route_model::RouteModel;
use common::error::NavigationError;
use common::position::Position;
use common::route::RouteDescription;
use common::test_helper::route::{get_kilometer_route, get_short_route, meters_to_latitude_degrees};

fn geometry_only(points: &[(f64, f64)]) -> RouteDescription {
    RouteDescription {
        geometry: points
            .iter()
            .map(|(lng, lat)| Position::from_lng_lat(*lng, *lat))
            .collect(),
        steps: vec![],
        summary: None,
    }
}

fn zigzag_route() -> RouteModel {
    RouteModel::new(geometry_only(&[
        (126.5000, 37.4000),
        (126.5010, 37.4000),
        (126.5010, 37.4000),
        (126.5010, 37.4012),
        (126.4990, 37.4020),
        (126.5030, 37.4030),
    ]))
    .unwrap()
}

#[test]
fn distance_table_is_aligned_and_non_decreasing() {
    let route = zigzag_route();
    let table = route.cumulative_distances();
    assert_eq!(table.len(), route.geometry().len());
    assert_eq!(table[0], 0.0);
    assert!(table.windows(2).all(|w| w[0] <= w[1]));
    for i in 1..table.len() {
        let segment = distance_meters(&route.geometry()[i - 1], &route.geometry()[i]);
        assert!((table[i] - table[i - 1] - segment).abs() < 1e-9);
    }
    assert_eq!(route.total_distance(), table[table.len() - 1]);
}

#[test]
fn reject_geometry_with_less_than_two_points() {
    let result = RouteModel::new(geometry_only(&[(126.5, 37.4)]));
    assert!(matches!(result, Err(NavigationError::InvalidRoute(_))));
    let result = RouteModel::new(RouteDescription::default());
    assert!(matches!(result, Err(NavigationError::InvalidRoute(_))));
}

#[test]
fn reject_geometry_with_non_finite_coordinates() {
    for points in [
        [(0.0, 0.0), (f64::NAN, 0.001), (0.0, 0.002)],
        [(0.0, 0.0), (0.0, f64::INFINITY), (0.0, 0.002)],
    ] {
        let result = RouteModel::new(geometry_only(&points));
        assert!(matches!(result, Err(NavigationError::InvalidRoute(_))));
    }

    let mut route = RouteModel::new(get_kilometer_route()).unwrap();
    let before = route.clone();
    assert!(route.load(geometry_only(&[(0.0, 0.0), (f64::NEG_INFINITY, 0.0)])).is_err());
    assert_eq!(route, before);
}

#[test]
fn failed_load_keeps_previous_route() {
    let mut route = RouteModel::new(get_kilometer_route()).unwrap();
    let before = route.clone();
    assert!(route.load(geometry_only(&[(0.0, 0.0)])).is_err());
    assert_eq!(route, before);

    route.load(get_short_route()).unwrap();
    assert_eq!(route.geometry().len(), 2);
    assert!(route.steps().is_empty());
    assert_eq!(route.summary(), None);
}

#[test]
fn point_at_distance_is_clamped_to_route_ends() {
    let route = zigzag_route();
    let first = route.geometry()[0];
    let last = *route.geometry().last().unwrap();
    assert_eq!(route.point_at_distance(0.0), first);
    assert_eq!(route.point_at_distance(-10.0), first);
    assert_eq!(route.point_at_distance(f64::NAN), first);
    assert_eq!(route.point_at_distance(route.total_distance()), last);
    assert_eq!(route.point_at_distance(route.total_distance() + 50.0), last);
}

#[test]
fn point_at_distance_interpolates_midpoint() {
    let route = RouteModel::new(get_short_route()).unwrap();
    let point = route.point_at_distance(55.5);
    let midpoint = Position::from_lng_lat(0.0, 0.0005);
    assert!(distance_meters(&point, &midpoint) < 0.5);
    assert_eq!(point.longitude, 0.0);
}

#[test]
fn point_at_distance_is_continuous_at_vertices() {
    let route = zigzag_route();
    let table = route.cumulative_distances().to_vec();
    for (i, boundary) in table.iter().enumerate().skip(1).take(table.len() - 2) {
        let vertex = route.geometry()[i];
        for epsilon in [1.0, 0.1, 0.01, 0.001] {
            let before = route.point_at_distance(boundary - epsilon);
            let after = route.point_at_distance(boundary + epsilon);
            assert!(distance_meters(&before, &vertex) <= epsilon + 1e-6);
            assert!(distance_meters(&after, &vertex) <= epsilon + 1e-6);
        }
    }
}

#[test]
fn zero_length_segment_does_not_divide_by_zero() {
    let route = RouteModel::new(geometry_only(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.001)])).unwrap();
    let point = route.point_at_distance(10.0);
    assert!(point.latitude.is_finite());
    assert!((distance_meters(&Position::from_lng_lat(0.0, 0.0), &point) - 10.0).abs() < 1e-6);

    let empty = RouteModel::new(geometry_only(&[(1.0, 1.0), (1.0, 1.0)])).unwrap();
    assert_eq!(empty.total_distance(), 0.0);
    assert_eq!(empty.point_at_distance(5.0), Position::from_lng_lat(1.0, 1.0));
}

#[test]
fn nearest_point_prefers_lowest_index_on_ties() {
    let route = RouteModel::new(geometry_only(&[(0.0, 0.0), (0.0, 0.001), (0.0, 0.001)])).unwrap();
    let nearest = route.nearest_point_index(&Position::from_lng_lat(0.0, 0.001));
    assert_eq!(nearest.index, 1);
    assert_eq!(nearest.distance_m, 0.0);

    let nearest = route.nearest_point_index(&Position::from_lng_lat(0.0001, 0.0));
    assert_eq!(nearest.index, 0);
    assert!(nearest.distance_m > 11.0 && nearest.distance_m < 11.2);
}

#[test]
fn remaining_distance_from_route_ends() {
    let route = zigzag_route();
    let first = route.geometry()[0];
    let last = *route.geometry().last().unwrap();
    assert_eq!(route.remaining_distance_from(&last), 0.0);
    assert!((route.remaining_distance_from(&first) - route.total_distance()).abs() < 1e-9);
}

#[test]
fn remaining_distance_ignores_offset_from_route() {
    let route = RouteModel::new(get_kilometer_route()).unwrap();
    let beside_halfway = Position::from_lng_lat(0.0002, meters_to_latitude_degrees(500.0));
    assert!((route.remaining_distance_from(&beside_halfway) - 500.0).abs() < 1e-6);
}

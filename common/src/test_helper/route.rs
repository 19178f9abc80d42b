// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{
    position::Position,
    route::{GuidanceStep, RouteDescription, RouteSummary},
};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude delta in degrees that spans `meters` along a meridian.
pub fn meters_to_latitude_degrees(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_M).to_degrees()
}

/// Two points roughly 111 m apart, heading north from (0, 0).
pub fn get_short_route() -> RouteDescription {
    RouteDescription {
        geometry: vec![
            Position::from_lng_lat(0.0, 0.0),
            Position::from_lng_lat(0.0, 0.001),
        ],
        steps: vec![],
        summary: None,
    }
}

/// A 1000 m route due north along the prime meridian.
///
/// The geometry has a vertex at 0 m, 250 m, 500 m and 1000 m. Guidance
/// steps mark the origin, a right turn at the 500 m vertex and the
/// destination. The summary reports 1000 m and 120 s.
pub fn get_kilometer_route() -> RouteDescription {
    let vertex = |m: f64| Position::from_lng_lat(0.0, meters_to_latitude_degrees(m));
    RouteDescription {
        geometry: vec![vertex(0.0), vertex(250.0), vertex(500.0), vertex(1000.0)],
        steps: vec![
            GuidanceStep::new(vertex(0.0), 200, Some("Start".to_string())),
            GuidanceStep::new(vertex(500.0), 13, Some("Harbour Road".to_string())),
            GuidanceStep::new(vertex(1000.0), 201, None),
        ],
        summary: Some(RouteSummary {
            total_distance_m: 1000.0,
            total_time_s: 120.0,
        }),
    }
}

/// A routing provider response with one line, three guidance points and a summary.
pub fn get_route_as_geojson<'a>() -> &'a str {
    r#"
    {
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [126.506498, 37.479726] },
                "properties": {
                    "totalDistance": 1234,
                    "totalTime": 300,
                    "turnType": 200,
                    "description": "",
                    "name": "Origin Plaza"
                }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[126.506498, 37.479726], [126.507498, 37.479726]]
                },
                "properties": { "description": "Along the coast" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [126.507498, 37.479726] },
                "properties": { "turnType": "12", "description": "Turn left onto Bay Street" }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[126.507498, 37.479726], [126.507498, 37.480726]]
                },
                "properties": { "totalDistance": 9999 }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [126.507498, 37.480726] },
                "properties": { "turnType": 201 }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [126.6, 37.5] },
                "properties": { "name": "Point of interest without turn" }
            }
        ]
    }
    "#
}

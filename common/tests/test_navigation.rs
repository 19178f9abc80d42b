// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::navigation::{GuidanceDisplay, PlaybackPhase, PlaybackStatus, SpeedMultiplier};
use common::position::Position;
use common::route::RouteDescription;

#[test]
pub fn geojson_coordinates_are_longitude_first() {
    let json = r#"
    {
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[126.506498, 37.479726], [126.507, 37.48]]
                },
                "properties": {}
            }
        ]
    }
    "#;
    let route = RouteDescription::from_geojson(json).unwrap();
    assert_eq!(route.geometry[0], Position::from_lng_lat(126.506498, 37.479726));
    assert_eq!(route.geometry[0].latitude, 37.479726);
    assert_eq!(route.geometry[0].longitude, 126.506498);
}

#[test]
pub fn speed_multiplier_cycles_through_all_factors() {
    let mut multiplier = SpeedMultiplier::default();
    let mut seen = vec![];
    for _ in 0..4 {
        seen.push(multiplier.to_string());
        multiplier = multiplier.next();
    }
    assert_eq!(seen, vec!["1x", "2x", "4x", "1x"]);
}

#[test]
pub fn speed_multiplier_from_plain_factor() {
    assert_eq!(SpeedMultiplier::from_factor(4), Some(SpeedMultiplier::X4));
    assert_eq!(SpeedMultiplier::from_factor(4).map(|m| m.factor()), Some(4.0));
    assert_eq!(SpeedMultiplier::from_factor(3), None);
    assert_eq!(SpeedMultiplier::from_factor(0), None);
}

#[test]
pub fn initial_playback_status_is_idle_at_normal_speed() {
    let status = PlaybackStatus::default();
    assert_eq!(status.phase, PlaybackPhase::Idle);
    assert_eq!(status.multiplier, SpeedMultiplier::X1);
}

#[test]
pub fn label_display_has_no_totals() {
    let display = GuidanceDisplay::label("guidance paused");
    assert_eq!(display.guidance_label.as_deref(), Some("guidance paused"));
    assert_eq!(display.remaining_distance, None);
    assert_eq!(display.remaining_time, None);
}

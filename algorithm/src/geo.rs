// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Position;
use common::route::TurnKind;

/// Mean earth radius of the spherical approximation in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance in meters between two positions.
///
/// Uses the haversine formula on a sphere with radius [`EARTH_RADIUS_M`].
/// The result is symmetric, never negative and zero for identical positions.
///
/// # Parameters
/// - `a`: Reference to the first geographic position.
/// - `b`: Reference to the second geographic position.
pub fn distance_meters(a: &Position, b: &Position) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    EARTH_RADIUS_M * c
}

/// Normalizes an angle in degrees into the range [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let normalized = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Heading from `from` to `to` in degrees, 0 is north, 90 is east.
///
/// This is a planar approximation on the raw degree deltas
/// (`atan2(Δlng, Δlat)`), not a geodesic bearing. It's good enough for the
/// few meters of look-ahead the simulator uses.
///
/// Returns `None` if both positions are identical.
pub fn planar_heading(from: &Position, to: &Position) -> Option<f64> {
    let dx = to.longitude - from.longitude;
    let dy = to.latitude - from.latitude;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize_bearing(dx.atan2(dy).to_degrees()))
}

/// Formats a duration as `"1h 2m 3s"`, `"2m 3s"` or `"3s"`.
///
/// Leading zero units are omitted, seconds are always shown. Fractions are
/// floored, negative and non-finite values are shown as `"0s"`.
pub fn format_duration(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Formats a distance, kilometers with one decimal from 1000 m on, whole meters below.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.max(0.0).round() as u64)
    }
}

/// Maps a provider turn code to its display label, unknown codes are "straight".
pub fn turn_kind_to_label(code: i64) -> &'static str {
    TurnKind::from_code(code).label()
}

/// Converts meters per second to whole kilometers per hour.
pub fn to_kmh(meters_per_second: f64) -> u32 {
    if !meters_per_second.is_finite() || meters_per_second <= 0.0 {
        return 0;
    }
    (meters_per_second * 3.6).round() as u32
}

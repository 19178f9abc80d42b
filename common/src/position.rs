// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude.
///
/// The `Position` struct is used for every point on a route and for the
/// current display position. Values are WGS84 decimal degrees. Latitude
/// ranges from -90.0 to 90.0, longitude from -180.0 to 180.0.
///
/// # Fields
///
/// - `latitude` – The latitude in decimal degrees (positive for north, negative for south).
/// - `longitude` – The longitude in decimal degrees (positive for east, negative for west).
///
/// # Example
///
/// ```rust
/// use common::position::Position;
///
/// let pos = Position::new(37.479726, 126.506498);
/// assert_eq!(pos, Position::from_lng_lat(126.506498, 37.479726));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Creates a new [`Position`] with the given latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }

    /// Creates a [`Position`] from a `[longitude, latitude]` pair as used by GeoJSON.
    pub fn from_lng_lat(longitude: f64, latitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }
}

/// Represents a live GNSS (Global Navigation Satellite System) fix.
///
/// A fix carries the position, the velocity over ground and, when the
/// receiver reports it, the heading (course over ground). The timestamp is
/// the UTC time of the fix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GnssPosition {
    latitude: f64,
    longitude: f64,
    velocity: f64,
    #[serde(default)]
    heading: Option<f64>,
    time: DateTime<Utc>,
}

impl GnssPosition {
    /// Creates a new [`GnssPosition`].
    ///
    /// # Arguments
    ///
    /// * `latitude` – Latitude in decimal degrees. Positive for northern hemisphere.
    /// * `longitude` – Longitude in decimal degrees. Positive for eastern hemisphere.
    /// * `velocity` – Speed over ground in meters per second.
    /// * `heading` – Course over ground in degrees, `None` if the receiver has none.
    /// * `time` – Timestamp of the GNSS fix in UTC.
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::position::GnssPosition;
    ///
    /// let pos = GnssPosition::new(37.47, 126.50, 13.9, Some(90.0), &chrono::Utc::now());
    /// assert_eq!(pos.heading(), Some(90.0));
    /// ```
    pub fn new(
        latitude: f64,
        longitude: f64,
        velocity: f64,
        heading: Option<f64>,
        time: &DateTime<Utc>,
    ) -> GnssPosition {
        GnssPosition {
            latitude,
            longitude,
            velocity,
            heading,
            time: *time,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns the latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the velocity in meters per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Returns the course over ground in degrees if the receiver reported one.
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Drops velocity, heading and time and returns the plain [`Position`].
    pub fn to_position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

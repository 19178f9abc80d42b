// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::error::{NavigationError, Result};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Turn category of a guidance step.
///
/// The routing provider annotates every guidance point with a numeric turn
/// code. Several codes share one category, unknown codes are treated as
/// [`TurnKind::Straight`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnKind {
    Straight,
    Left,
    Right,
    UTurn,
    FirstExit,
    SecondExit,
    FirstRightStreet,
    Origin,
    Destination,
}

impl TurnKind {
    /// Maps a provider turn code to its category.
    pub fn from_code(code: i64) -> TurnKind {
        match code {
            11 | 51 => TurnKind::Straight,
            12 | 16 | 17 => TurnKind::Left,
            13 | 18 | 19 => TurnKind::Right,
            14 => TurnKind::UTurn,
            71 => TurnKind::FirstExit,
            72 => TurnKind::SecondExit,
            73 => TurnKind::FirstRightStreet,
            200 => TurnKind::Origin,
            201 => TurnKind::Destination,
            _ => TurnKind::Straight,
        }
    }

    /// Human readable text of the category.
    pub fn label(&self) -> &'static str {
        match self {
            TurnKind::Straight => "straight",
            TurnKind::Left => "left",
            TurnKind::Right => "right",
            TurnKind::UTurn => "u-turn",
            TurnKind::FirstExit => "first exit",
            TurnKind::SecondExit => "second exit",
            TurnKind::FirstRightStreet => "first right street",
            TurnKind::Origin => "origin",
            TurnKind::Destination => "destination",
        }
    }
}

/// An annotated guidance point of a route (start, each turn, destination).
///
/// Steps are not ordered relative to the route geometry, they are only
/// located near a point of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub position: Position,
    pub turn_code: i64,
    pub label: Option<String>,
}

impl GuidanceStep {
    pub fn new(position: Position, turn_code: i64, label: Option<String>) -> Self {
        GuidanceStep {
            position,
            turn_code,
            label: label.filter(|l| !l.trim().is_empty()),
        }
    }

    pub fn kind(&self) -> TurnKind {
        TurnKind::from_code(self.turn_code)
    }

    /// The text shown for this step: its label, or the turn category when it has none.
    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.kind().label().to_string(),
        }
    }
}

/// Total distance and travel time of a route as reported by the routing provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_s: f64,
}

impl RouteSummary {
    /// A summary is degenerate when it can't be used to scale remaining time.
    pub fn is_degenerate(&self) -> bool {
        !(self.total_distance_m.is_finite()
            && self.total_time_s.is_finite()
            && self.total_distance_m > 0.0
            && self.total_time_s > 0.0)
    }
}

/// A complete route as delivered by the routing collaborator.
///
/// # Fields
///
/// - `geometry` – The path in travel order.
/// - `steps` – The guidance points along the path.
/// - `summary` – Distance and time summary, `None` if the provider sent none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDescription {
    pub geometry: Vec<Position>,
    pub steps: Vec<GuidanceStep>,
    pub summary: Option<RouteSummary>,
}

impl RouteDescription {
    /// Parses a routing provider response (GeoJSON `FeatureCollection`).
    ///
    /// - `LineString` features append their coordinates to the geometry in order.
    /// - `Point` features with a `turnType` property become guidance steps,
    ///   labelled with `description` or, if missing, `name`.
    /// - The first feature with a numeric `totalDistance` property provides the
    ///   summary, `totalTime` defaults to zero.
    ///
    /// # Returns
    ///
    /// * `Ok(RouteDescription)` – The parsed route. The geometry may still be too short to be usable.
    /// * `Err(NavigationError::UpstreamFailure)` – The response is not valid JSON.
    /// * `Err(NavigationError::InvalidRoute)` – The response has no feature list.
    pub fn from_geojson(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| NavigationError::UpstreamFailure(format!("Malformed route data: {e}")))?;
        let Some(features) = root.get("features").and_then(Value::as_array) else {
            return Err(NavigationError::InvalidRoute(
                "Route data has no features".to_string(),
            ));
        };

        let mut description = RouteDescription::default();
        let empty = Map::new();
        for feature in features {
            let properties = feature
                .get("properties")
                .and_then(Value::as_object)
                .unwrap_or(&empty);

            if description.summary.is_none()
                && let Some(total_distance_m) = properties.get("totalDistance").and_then(Value::as_f64)
            {
                description.summary = Some(RouteSummary {
                    total_distance_m,
                    total_time_s: properties
                        .get("totalTime")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0),
                });
            }

            let Some(geometry) = feature.get("geometry") else {
                continue;
            };
            let coordinates = geometry.get("coordinates");
            match geometry.get("type").and_then(Value::as_str) {
                Some("LineString") => {
                    let Some(coordinates) = coordinates.and_then(Value::as_array) else {
                        continue;
                    };
                    description
                        .geometry
                        .extend(coordinates.iter().filter_map(parse_coordinate));
                }
                Some("Point") => {
                    let Some(position) = coordinates.and_then(parse_coordinate) else {
                        continue;
                    };
                    let Some(turn_code) = properties.get("turnType").and_then(parse_turn_code)
                    else {
                        continue;
                    };
                    let label = properties
                        .get("description")
                        .and_then(Value::as_str)
                        .filter(|d| !d.is_empty())
                        .or_else(|| properties.get("name").and_then(Value::as_str))
                        .map(str::to_string);
                    description
                        .steps
                        .push(GuidanceStep::new(position, turn_code, label));
                }
                _ => (),
            }
        }
        Ok(description)
    }

    /// Reads a plain geometry from CSV rows of `longitude,latitude` with a header line.
    ///
    /// The result has no guidance steps and no summary.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut geometry = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record
                .map_err(|e| NavigationError::UpstreamFailure(format!("Malformed CSV route: {e}")))?;
            let parse = |column: usize| -> Result<f64> {
                record
                    .get(column)
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        NavigationError::InvalidRoute(format!(
                            "Row {} has no valid coordinate in column {}",
                            row + 1,
                            column
                        ))
                    })
            };
            geometry.push(Position::from_lng_lat(parse(0)?, parse(1)?));
        }
        Ok(RouteDescription {
            geometry,
            steps: Vec::new(),
            summary: None,
        })
    }
}

fn parse_coordinate(value: &Value) -> Option<Position> {
    let pair = value.as_array()?;
    let longitude = pair.first()?.as_f64()?;
    let latitude = pair.get(1)?.as_f64()?;
    Some(Position::from_lng_lat(longitude, latitude))
}

fn parse_turn_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo::distance_meters;
use common::error::{NavigationError, Result};
use common::position::Position;
use common::route::{GuidanceStep, RouteDescription, RouteSummary};
use tracing::debug;

/// The route vertex closest to a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    pub index: usize,
    pub distance_m: f64,
}

/// A loaded route indexed by traveled distance.
///
/// Besides the geometry, guidance steps and summary of the route the model
/// keeps a cumulative distance table aligned index-for-index with the
/// geometry: `table[0]` is zero and every following entry adds the length of
/// the segment ending at that vertex. The table is never decreasing and the
/// geometry always has at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteModel {
    geometry: Vec<Position>,
    cumulative_distances: Vec<f64>,
    steps: Vec<GuidanceStep>,
    summary: Option<RouteSummary>,
}

impl RouteModel {
    /// Builds a model from a route description.
    ///
    /// # Returns
    ///
    /// * `Ok(RouteModel)` – The indexed route.
    /// * `Err(NavigationError::InvalidRoute)` – The geometry has fewer than two points
    ///   or a point with a non-finite coordinate.
    pub fn new(description: RouteDescription) -> Result<Self> {
        if description.geometry.len() < 2 {
            return Err(NavigationError::InvalidRoute(format!(
                "Route geometry needs at least 2 points, got {}",
                description.geometry.len()
            )));
        }
        if let Some(index) = description
            .geometry
            .iter()
            .position(|p| !p.latitude.is_finite() || !p.longitude.is_finite())
        {
            return Err(NavigationError::InvalidRoute(format!(
                "Route point {} has no finite coordinate",
                index
            )));
        }
        let cumulative_distances = build_distance_table(&description.geometry);
        debug!(
            "Route model built with {} points, {} steps and a length of {:.1} m",
            description.geometry.len(),
            description.steps.len(),
            cumulative_distances.last().copied().unwrap_or_default()
        );
        Ok(RouteModel {
            geometry: description.geometry,
            cumulative_distances,
            steps: description.steps,
            summary: description.summary,
        })
    }

    /// Replaces the whole route state with a new description.
    ///
    /// The new model is built completely before anything is replaced, a
    /// failing load leaves the current route untouched.
    pub fn load(&mut self, description: RouteDescription) -> Result<()> {
        *self = RouteModel::new(description)?;
        Ok(())
    }

    pub fn geometry(&self) -> &[Position] {
        &self.geometry
    }

    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative_distances
    }

    pub fn steps(&self) -> &[GuidanceStep] {
        &self.steps
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        self.summary.as_ref()
    }

    /// Length of the route geometry in meters.
    pub fn total_distance(&self) -> f64 {
        self.cumulative_distances
            .last()
            .copied()
            .unwrap_or_default()
    }

    /// Returns the position after traveling `distance` meters along the route.
    ///
    /// The distance is clamped to the route, the first point is returned for
    /// zero or less, the last point for the total length or more. In between
    /// the segment is found by binary search and the position is linearly
    /// interpolated. Zero-length segments yield their start point.
    pub fn point_at_distance(&self, distance: f64) -> Position {
        let first = self.geometry[0];
        let last = self.geometry[self.geometry.len() - 1];
        if !distance.is_finite() || distance <= 0.0 {
            return first;
        }
        if distance >= self.total_distance() {
            return last;
        }

        let last_segment = self.geometry.len() - 2;
        let i = self
            .cumulative_distances
            .partition_point(|d| *d <= distance)
            .saturating_sub(1)
            .min(last_segment);

        let start = &self.geometry[i];
        let end = &self.geometry[i + 1];
        let segment_length = self.cumulative_distances[i + 1] - self.cumulative_distances[i];
        let fraction = if segment_length > 0.0 {
            (distance - self.cumulative_distances[i]) / segment_length
        } else {
            0.0
        };
        Position::new(
            start.latitude + (end.latitude - start.latitude) * fraction,
            start.longitude + (end.longitude - start.longitude) * fraction,
        )
    }

    /// Finds the route vertex closest to `position` by scanning every vertex.
    ///
    /// Ties resolve to the lowest index.
    pub fn nearest_point_index(&self, position: &Position) -> NearestPoint {
        let mut nearest = NearestPoint {
            index: 0,
            distance_m: f64::INFINITY,
        };
        for (index, point) in self.geometry.iter().enumerate() {
            let distance_m = distance_meters(position, point);
            if distance_m < nearest.distance_m {
                nearest = NearestPoint { index, distance_m };
            }
        }
        nearest
    }

    /// Distance along the route from the vertex nearest to `position` to the end.
    ///
    /// The offset between `position` and that vertex is not included.
    pub fn remaining_distance_from(&self, position: &Position) -> f64 {
        let nearest = self.nearest_point_index(position);
        self.total_distance() - self.cumulative_distances[nearest.index]
    }
}

fn build_distance_table(geometry: &[Position]) -> Vec<f64> {
    let mut table = Vec::with_capacity(geometry.len());
    let mut accumulated = 0.0;
    table.push(accumulated);
    for segment in geometry.windows(2) {
        accumulated += distance_meters(&segment[0], &segment[1]);
        table.push(accumulated);
    }
    table
}

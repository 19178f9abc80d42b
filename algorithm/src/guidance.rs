// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo::{distance_meters, format_distance, format_duration};
use crate::route_model::RouteModel;
use common::navigation::GuidanceDisplay;
use common::position::Position;
use common::route::{GuidanceStep, RouteSummary, TurnKind};
use serde::Deserialize;

/// Shown whenever the nearest guidance step is the destination.
pub const ARRIVAL_IMMINENT_LABEL: &str = "arriving at destination";

/// Shown after a route has been loaded and before the first position update.
pub const ROUTE_READY_LABEL: &str = "route guidance ready";

/// Shown when a delivered route can't be used.
pub const NO_ROUTE_DATA_LABEL: &str = "no route data";

/// Tunables of the [`GuidanceEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Below this distance in meters a turn is announced as happening now.
    pub imminent_turn_radius_m: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        GuidanceConfig {
            imminent_turn_radius_m: 15.0,
        }
    }
}

/// Guidance for one position on a loaded route.
///
/// # Fields
///
/// - `remaining_distance_m` – Distance along the route from the nearest vertex to the end.
/// - `remaining_time_s` – Share of the summary travel time, `None` without a usable summary.
/// - `active_step_label` – Prompt for the nearest guidance step, `None` if the route has no steps.
#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceOutput {
    pub remaining_distance_m: f64,
    pub remaining_time_s: Option<f64>,
    pub active_step_label: Option<String>,
}

impl GuidanceOutput {
    /// Formats the output for a renderer.
    pub fn display(&self) -> GuidanceDisplay {
        GuidanceDisplay {
            guidance_label: self.active_step_label.clone(),
            remaining_distance: Some(format_distance(self.remaining_distance_m)),
            remaining_time: self
                .remaining_time_s
                .map(|seconds| format_duration(seconds.round())),
        }
    }
}

/// Derives remaining distance, remaining time and the next turn prompt.
///
/// Guidance can be switched off, [`update`](Self::update) then reports no
/// guidance at all. The engine is inactive until it is activated, usually by
/// loading a route.
#[derive(Clone, Debug, Default)]
pub struct GuidanceEngine {
    active: bool,
    config: GuidanceConfig,
}

impl GuidanceEngine {
    pub fn new(config: GuidanceConfig) -> Self {
        GuidanceEngine {
            active: false,
            config,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Switches guidance on or off and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Computes the guidance for `position`.
    ///
    /// Returns `None` when guidance is inactive or no route is loaded, which
    /// is a normal state and not an error.
    ///
    /// Remaining time assumes a uniform average speed over the whole route:
    /// the summary time is scaled by the share of the summary distance that
    /// is still ahead.
    pub fn update(&self, position: &Position, route: Option<&RouteModel>) -> Option<GuidanceOutput> {
        if !self.active {
            return None;
        }
        let route = route?;

        let remaining_distance_m = route.remaining_distance_from(position);
        let remaining_time_s = route
            .summary()
            .filter(|summary| !summary.is_degenerate())
            .map(|summary| {
                let ratio = (remaining_distance_m / summary.total_distance_m).clamp(0.0, 1.0);
                summary.total_time_s * ratio
            });

        Some(GuidanceOutput {
            remaining_distance_m,
            remaining_time_s,
            active_step_label: self.active_step_label(position, route.steps()),
        })
    }

    fn active_step_label(&self, position: &Position, steps: &[GuidanceStep]) -> Option<String> {
        let mut nearest: Option<(&GuidanceStep, f64)> = None;
        for step in steps {
            let distance = distance_meters(position, &step.position);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((step, distance));
            }
        }
        let (step, distance) = nearest?;

        let label = if step.kind() == TurnKind::Destination {
            ARRIVAL_IMMINENT_LABEL.to_string()
        } else if distance < self.config.imminent_turn_radius_m {
            format!("now: {}", step.text())
        } else {
            format!("{}m ahead: {}", distance.round() as u64, step.text())
        };
        Some(label)
    }
}

/// Overview shown right after a route was loaded: total distance and total time.
pub fn route_overview(route: &RouteModel) -> GuidanceDisplay {
    summary_overview(ROUTE_READY_LABEL, route.summary().copied())
}

/// Shows `label` together with the totals of `summary`.
///
/// Totals that are not positive are left out.
pub fn summary_overview(label: &str, summary: Option<RouteSummary>) -> GuidanceDisplay {
    GuidanceDisplay {
        guidance_label: Some(label.to_string()),
        remaining_distance: summary
            .map(|s| s.total_distance_m)
            .filter(|d| *d > 0.0)
            .map(format_distance),
        remaining_time: summary
            .map(|s| s.total_time_s)
            .filter(|t| *t > 0.0)
            .map(format_duration),
    }
}

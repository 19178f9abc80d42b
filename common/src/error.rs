// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use thiserror::Error;

/// Errors reported by the navigation engine.
///
/// None of them is fatal. They are published on the event bus so a renderer
/// can show them, and the state that was active before the failing operation
/// stays untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// The route can't be used, e.g. the geometry has fewer than two points.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Simulation was requested without a usable route.
    #[error("No route loaded")]
    NoRouteLoaded,

    /// Fetching or reading a route from the routing collaborator failed.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),
}

pub type Result<T> = std::result::Result<T, NavigationError>;

// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Plain display data produced by the navigation engine.
//!
//! A renderer only has to draw these values, it never has to derive anything
//! from engine state itself.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Where the current display position comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSource {
    Live,
    Simulated,
}

/// Current position, heading and speed to draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationDisplay {
    pub position: Position,
    /// Heading in degrees within [0, 360).
    pub heading_deg: f64,
    pub speed_kmh: u32,
    pub source: PositionSource,
}

/// Formatted guidance texts.
///
/// `remaining_distance` and `remaining_time` are `None` when there is nothing
/// to show for them, e.g. without a route summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceDisplay {
    pub guidance_label: Option<String>,
    pub remaining_distance: Option<String>,
    pub remaining_time: Option<String>,
}

impl GuidanceDisplay {
    /// A display that only carries a guidance label.
    pub fn label(label: &str) -> Self {
        GuidanceDisplay {
            guidance_label: Some(label.to_string()),
            remaining_distance: None,
            remaining_time: None,
        }
    }
}

/// Phase of the playback simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Speed factor applied to the simulated base speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X4,
}

impl SpeedMultiplier {
    /// Returns the next multiplier in the cycle 1x → 2x → 4x → 1x.
    pub fn next(self) -> Self {
        match self {
            SpeedMultiplier::X1 => SpeedMultiplier::X2,
            SpeedMultiplier::X2 => SpeedMultiplier::X4,
            SpeedMultiplier::X4 => SpeedMultiplier::X1,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            SpeedMultiplier::X1 => 1.0,
            SpeedMultiplier::X2 => 2.0,
            SpeedMultiplier::X4 => 4.0,
        }
    }

    /// Converts a plain factor, only 1, 2 and 4 are valid.
    pub fn from_factor(factor: u8) -> Option<Self> {
        match factor {
            1 => Some(SpeedMultiplier::X1),
            2 => Some(SpeedMultiplier::X2),
            4 => Some(SpeedMultiplier::X4),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor() as u8)
    }
}

/// Run state of the simulator as shown to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub phase: PlaybackPhase,
    pub multiplier: SpeedMultiplier,
}

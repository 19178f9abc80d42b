// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo::planar_heading;
use crate::route_model::RouteModel;
use common::error::{NavigationError, Result};
use common::navigation::{PlaybackPhase, PlaybackStatus, SpeedMultiplier};
use common::position::Position;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Identifies one requested frame of a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Host primitive that calls back once per requested frame.
///
/// The simulator requests exactly one frame at a time. The host has to call
/// [`PlaybackSimulator::tick`] when a requested frame is due and must never
/// deliver a frame that was cancelled.
pub trait FrameScheduler {
    /// Requests a single future frame.
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a requested frame that has not been delivered yet.
    fn cancel_frame(&mut self, frame: FrameId);
}

/// Tunables of the [`PlaybackSimulator`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Simulated speed in meters per second before the multiplier is applied.
    pub speed_base_mps: f64,
    /// Distance ahead of the current position that is sampled for the heading.
    pub look_ahead_m: f64,
    /// Interval between two frames of the host scheduler.
    pub frame_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            // about 50 km/h
            speed_base_mps: 13.9,
            look_ahead_m: 5.0,
            frame_interval_ms: 16,
        }
    }
}

/// Result of one playback frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackUpdate {
    pub position: Position,
    pub heading_deg: f64,
    pub traveled_m: f64,
    pub speed_mps: f64,
    /// Set on the last update of a session, `position` is then the route end.
    pub finished: bool,
}

/// Frame driven playback of a route.
///
/// The simulator moves a virtual traveled distance along a [`RouteModel`]
/// with `speed_base * multiplier`, using the frame timestamps it is given.
/// The same sequence of timestamps always produces the same sequence of
/// updates.
///
/// States: `Idle` → `Running` on [`start`](Self::start), `Running` → `Idle`
/// on [`stop`](Self::stop), `Running` → `Finished` once the end of the route
/// is reached. A new start from `Finished` begins again at distance zero.
#[derive(Clone, Debug)]
pub struct PlaybackSimulator {
    config: PlaybackConfig,
    phase: PlaybackPhase,
    traveled_m: f64,
    multiplier: SpeedMultiplier,
    last_tick: Option<Duration>,
    heading_deg: f64,
    pending_frame: Option<FrameId>,
}

impl Default for PlaybackSimulator {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl PlaybackSimulator {
    pub fn new(config: PlaybackConfig) -> Self {
        PlaybackSimulator {
            config,
            phase: PlaybackPhase::Idle,
            traveled_m: 0.0,
            multiplier: SpeedMultiplier::X1,
            last_tick: None,
            heading_deg: 0.0,
            pending_frame: None,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == PlaybackPhase::Running
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            phase: self.phase,
            multiplier: self.multiplier,
        }
    }

    pub fn traveled_distance(&self) -> f64 {
        self.traveled_m
    }

    pub fn heading(&self) -> f64 {
        self.heading_deg
    }

    pub fn multiplier(&self) -> SpeedMultiplier {
        self.multiplier
    }

    /// The current simulated speed in meters per second.
    pub fn speed_mps(&self) -> f64 {
        self.config.speed_base_mps * self.multiplier.factor()
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    /// Switches to the next speed multiplier (1x → 2x → 4x → 1x).
    ///
    /// Works in every phase and takes effect with the next frame.
    pub fn cycle_speed_multiplier(&mut self) -> SpeedMultiplier {
        self.multiplier = self.multiplier.next();
        debug!("Playback speed multiplier set to {}", self.multiplier);
        self.multiplier
    }

    /// Starts a playback session from the beginning of `route`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` – The simulator is running and the first frame is requested.
    /// * `Err(NavigationError::NoRouteLoaded)` – There is no route or it has no
    ///   length. Nothing is changed.
    pub fn start<S>(&mut self, route: Option<&RouteModel>, scheduler: &mut S) -> Result<()>
    where
        S: FrameScheduler + ?Sized,
    {
        let Some(route) = route.filter(|r| r.total_distance() > 0.0) else {
            return Err(NavigationError::NoRouteLoaded);
        };
        self.cancel_pending_frame(scheduler);
        self.traveled_m = 0.0;
        self.last_tick = None;
        self.phase = PlaybackPhase::Running;
        self.pending_frame = Some(scheduler.request_frame());
        info!(
            "Playback started on a {:.1} m route with {:.1} m/s",
            route.total_distance(),
            self.speed_mps()
        );
        Ok(())
    }

    /// Stops a running session and cancels its pending frame.
    ///
    /// Returns `false` if the simulator was not running.
    pub fn stop<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler + ?Sized,
    {
        if self.phase != PlaybackPhase::Running {
            return false;
        }
        self.cancel_pending_frame(scheduler);
        self.phase = PlaybackPhase::Idle;
        self.traveled_m = 0.0;
        self.last_tick = None;
        info!("Playback stopped");
        true
    }

    /// Returns to a fresh `Idle` state, e.g. because a new route is loaded.
    ///
    /// The speed multiplier is kept.
    pub fn reset<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        self.cancel_pending_frame(scheduler);
        self.phase = PlaybackPhase::Idle;
        self.traveled_m = 0.0;
        self.last_tick = None;
        self.heading_deg = 0.0;
    }

    /// Handles a due frame.
    ///
    /// The first frame after a start only records the timestamp. Every other
    /// frame advances the traveled distance by the speed times the seconds
    /// since the previous frame, clamped to the route length. While running,
    /// the next frame is requested before returning.
    ///
    /// Returns `None` if the simulator is not running.
    pub fn tick<S>(
        &mut self,
        timestamp: Duration,
        route: &RouteModel,
        scheduler: &mut S,
    ) -> Option<PlaybackUpdate>
    where
        S: FrameScheduler + ?Sized,
    {
        if self.phase != PlaybackPhase::Running {
            return None;
        }
        self.pending_frame = None;

        let elapsed = self
            .last_tick
            .map_or(0.0, |last| timestamp.saturating_sub(last).as_secs_f64());
        self.last_tick = Some(timestamp);

        let total = route.total_distance();
        self.traveled_m = (self.traveled_m + self.speed_mps() * elapsed).clamp(0.0, total);
        let finished = self.traveled_m >= total;

        let position = route.point_at_distance(self.traveled_m);
        let look_ahead = route.point_at_distance((self.traveled_m + self.config.look_ahead_m).min(total));
        if let Some(heading) = planar_heading(&position, &look_ahead) {
            self.heading_deg = heading;
        }

        if finished {
            self.phase = PlaybackPhase::Finished;
            info!("Playback finished after {:.1} m", self.traveled_m);
        } else {
            self.pending_frame = Some(scheduler.request_frame());
        }

        Some(PlaybackUpdate {
            position,
            heading_deg: self.heading_deg,
            traveled_m: self.traveled_m,
            speed_mps: self.speed_mps(),
            finished,
        })
    }

    fn cancel_pending_frame<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if let Some(frame) = self.pending_frame.take() {
            scheduler.cancel_frame(frame);
        }
    }
}

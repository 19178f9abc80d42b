// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use algorithm::geo::{normalize_bearing, to_kmh};
use algorithm::guidance::{
    GuidanceConfig, GuidanceEngine, NO_ROUTE_DATA_LABEL, route_overview, summary_overview,
};
use algorithm::playback::{FrameScheduler, PlaybackConfig, PlaybackSimulator};
use algorithm::route_model::RouteModel;
use common::error::NavigationError;
use common::navigation::{GuidanceDisplay, NavigationDisplay, PositionSource};
use common::position::{GnssPosition, Position};
use common::route::RouteDescription;
use module_core::EventKind;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Guidance label once a simulated drive reached the end of the route.
pub const ARRIVED_LABEL: &str = "arrived";

/// Guidance label while a simulated drive is running.
pub const SIMULATION_RUNNING_LABEL: &str = "simulating";

/// Guidance label after a running simulation was stopped.
pub const SIMULATION_STOPPED_LABEL: &str = "simulation stopped";

/// Guidance label after guidance was switched off.
pub const GUIDANCE_PAUSED_LABEL: &str = "guidance paused";

/// Route, guidance and playback state of one navigation session.
///
/// Every input is handled by one `on_*` function which returns the events
/// that shall be published in order. The context never talks to the bus
/// itself.
pub struct NavigationContext {
    route: Option<RouteModel>,
    guidance: GuidanceEngine,
    playback: PlaybackSimulator,
    last_position: Option<Position>,
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new(GuidanceConfig::default(), PlaybackConfig::default())
    }
}

impl NavigationContext {
    pub fn new(guidance_config: GuidanceConfig, playback_config: PlaybackConfig) -> Self {
        NavigationContext {
            route: None,
            guidance: GuidanceEngine::new(guidance_config),
            playback: PlaybackSimulator::new(playback_config),
            last_position: None,
        }
    }

    pub fn route(&self) -> Option<&RouteModel> {
        self.route.as_ref()
    }

    pub fn guidance(&self) -> &GuidanceEngine {
        &self.guidance
    }

    pub fn playback(&self) -> &PlaybackSimulator {
        &self.playback
    }

    /// Mutable access to the simulator, e.g. to preset the speed multiplier.
    pub fn playback_mut(&mut self) -> &mut PlaybackSimulator {
        &mut self.playback
    }

    /// The last displayed position, live or simulated.
    pub fn last_position(&self) -> Option<Position> {
        self.last_position
    }

    /// Replaces the current route.
    ///
    /// A running playback is reset and guidance is switched on. An invalid
    /// description leaves route and playback untouched and produces an error
    /// event plus a "no route data" display with the totals of its summary.
    pub fn on_route_loaded<S>(&mut self, description: RouteDescription, scheduler: &mut S) -> Vec<EventKind>
    where
        S: FrameScheduler + ?Sized,
    {
        let summary = description.summary;
        let result = if let Some(route) = self.route.as_mut() {
            route.load(description)
        } else {
            RouteModel::new(description).map(|route| self.route = Some(route))
        };
        if let Err(e) = result {
            warn!("Rejected route: {}", e);
            return vec![
                error_event(e),
                EventKind::GuidanceEvent(Arc::new(summary_overview(NO_ROUTE_DATA_LABEL, summary))),
            ];
        }

        let previous_status = self.playback.status();
        self.playback.reset(scheduler);
        self.guidance.set_active(true);

        let mut events = vec![];
        if self.playback.status() != previous_status {
            events.push(EventKind::PlaybackStatusEvent(self.playback.status()));
        }
        if let Some(route) = self.route.as_ref() {
            info!(
                "Route loaded with {} points and {} steps",
                route.geometry().len(),
                route.steps().len()
            );
            events.push(EventKind::GuidanceEvent(Arc::new(route_overview(route))));
        }
        events
    }

    /// Shows a live fix and the guidance for it.
    ///
    /// Ignored while a simulation is running, the simulated position wins.
    pub fn on_live_position(&mut self, gnss: &GnssPosition) -> Vec<EventKind> {
        if self.playback.is_running() {
            debug!("Ignore live position during simulation");
            return vec![];
        }
        let position = gnss.to_position();
        let display = NavigationDisplay {
            position,
            heading_deg: gnss.heading().map_or(0.0, normalize_bearing),
            speed_kmh: to_kmh(gnss.velocity()),
            source: PositionSource::Live,
        };
        self.show_position(display)
    }

    pub fn on_start_simulation<S>(&mut self, scheduler: &mut S) -> Vec<EventKind>
    where
        S: FrameScheduler + ?Sized,
    {
        match self.playback.start(self.route.as_ref(), scheduler) {
            Ok(()) => {
                self.guidance.set_active(true);
                vec![
                    EventKind::PlaybackStatusEvent(self.playback.status()),
                    label_event(SIMULATION_RUNNING_LABEL),
                ]
            }
            Err(e) => {
                warn!("Can't start simulation: {}", e);
                vec![error_event(e)]
            }
        }
    }

    pub fn on_stop_simulation<S>(&mut self, scheduler: &mut S) -> Vec<EventKind>
    where
        S: FrameScheduler + ?Sized,
    {
        if !self.playback.stop(scheduler) {
            return vec![];
        }
        vec![
            EventKind::PlaybackStatusEvent(self.playback.status()),
            label_event(SIMULATION_STOPPED_LABEL),
        ]
    }

    pub fn on_cycle_speed(&mut self) -> Vec<EventKind> {
        self.playback.cycle_speed_multiplier();
        vec![EventKind::PlaybackStatusEvent(self.playback.status())]
    }

    /// Switches guidance on or off.
    ///
    /// Switching on refreshes the guidance for the last displayed position.
    pub fn on_toggle_guidance(&mut self) -> Vec<EventKind> {
        if !self.guidance.toggle() {
            info!("Guidance paused");
            return vec![label_event(GUIDANCE_PAUSED_LABEL)];
        }
        info!("Guidance resumed");
        self.last_position
            .and_then(|position| self.guidance.update(&position, self.route.as_ref()))
            .map(|output| EventKind::GuidanceEvent(Arc::new(output.display())))
            .into_iter()
            .collect()
    }

    /// Advances the simulation by one due frame.
    pub fn on_frame<S>(&mut self, timestamp: Duration, scheduler: &mut S) -> Vec<EventKind>
    where
        S: FrameScheduler + ?Sized,
    {
        let Some(route) = self.route.as_ref() else {
            return vec![];
        };
        let Some(update) = self.playback.tick(timestamp, route, scheduler) else {
            return vec![];
        };

        let mut events = self.show_position(NavigationDisplay {
            position: update.position,
            heading_deg: normalize_bearing(update.heading_deg),
            speed_kmh: to_kmh(update.speed_mps),
            source: PositionSource::Simulated,
        });
        if update.finished {
            events.push(label_event(ARRIVED_LABEL));
            events.push(EventKind::PlaybackStatusEvent(self.playback.status()));
        }
        events
    }

    fn show_position(&mut self, display: NavigationDisplay) -> Vec<EventKind> {
        self.last_position = Some(display.position);
        let mut events = vec![EventKind::DisplayPositionEvent(Arc::new(display))];
        if let Some(output) = self.guidance.update(&display.position, self.route.as_ref()) {
            events.push(EventKind::GuidanceEvent(Arc::new(output.display())));
        }
        events
    }
}

fn label_event(label: &str) -> EventKind {
    EventKind::GuidanceEvent(Arc::new(GuidanceDisplay::label(label)))
}

fn error_event(error: NavigationError) -> EventKind {
    EventKind::NavigationErrorEvent(Arc::new(error))
}

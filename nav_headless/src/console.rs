// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::navigation::{PlaybackPhase, PositionSource};
use module_core::{EventKind, Module, ModuleCtx};
use tracing::{error, info, warn};

/// Behaviour of the [`ConsoleRenderer`] besides printing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleOptions {
    /// Start the simulation as soon as a route is loaded.
    pub simulate_on_load: bool,
    /// Quit the application once a simulated drive arrived.
    pub quit_on_arrival: bool,
}

/// Headless stand-in for a map view, logs everything a renderer would draw.
pub struct ConsoleRenderer {
    ctx: ModuleCtx,
    options: ConsoleOptions,
}

impl ConsoleRenderer {
    pub fn new(ctx: ModuleCtx, options: ConsoleOptions) -> Self {
        ConsoleRenderer { ctx, options }
    }

    fn request(&self, kind: EventKind) {
        if self.ctx.publish_event(kind).is_err() {
            error!("Failed to publish request");
        }
    }

    fn render(&self, kind: &EventKind) {
        match kind {
            EventKind::RouteLoadedEvent(_) if self.options.simulate_on_load => {
                info!("Route loaded, starting simulation");
                self.request(EventKind::StartSimulationEvent);
            }
            EventKind::DisplayPositionEvent(shown) => {
                let source = match shown.source {
                    PositionSource::Live => "live",
                    PositionSource::Simulated => "sim",
                };
                info!(
                    "[{}] {:.6}, {:.6} heading {}° {} km/h",
                    source,
                    shown.position.latitude,
                    shown.position.longitude,
                    shown.heading_deg.round(),
                    shown.speed_kmh
                );
            }
            EventKind::GuidanceEvent(guidance) => {
                info!(
                    "{} | remaining {} | {}",
                    guidance.guidance_label.as_deref().unwrap_or("-"),
                    guidance.remaining_distance.as_deref().unwrap_or("-"),
                    guidance.remaining_time.as_deref().unwrap_or("-")
                );
            }
            EventKind::PlaybackStatusEvent(status) => {
                info!("Playback {:?} at {}", status.phase, status.multiplier);
                if status.phase == PlaybackPhase::Finished && self.options.quit_on_arrival {
                    self.request(EventKind::QuitEvent);
                }
            }
            EventKind::NavigationErrorEvent(e) => warn!("Navigation error: {}", e),
            _ => (),
        }
    }
}

#[async_trait::async_trait]
impl Module for ConsoleRenderer {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                run = false;
                            } else {
                                self.render(&event.kind);
                            }
                        }
                        Err(e) => error!("Failed to receive event. Error: {}", e),
                    }
                }
            }
        }
        Ok(())
    }
}

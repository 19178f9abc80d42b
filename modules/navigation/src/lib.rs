// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

mod context;
mod frame_timer;

pub use context::{
    ARRIVED_LABEL, GUIDANCE_PAUSED_LABEL, NavigationContext, SIMULATION_RUNNING_LABEL,
    SIMULATION_STOPPED_LABEL,
};
pub use frame_timer::FrameTimer;

use algorithm::guidance::GuidanceConfig;
use algorithm::playback::PlaybackConfig;
use async_trait::async_trait;
use common::frame_clock::{FrameClock, MonotonicFrameClock};
use module_core::{EventKind, Module, ModuleCtx};
use std::time::Duration;
use tracing::{error, info};

/// The `Navigation` module owns the [`NavigationContext`] and drives it.
///
/// Bus events are dispatched to the context one at a time. Simulation frames
/// are delivered by a [`FrameTimer`] in the same loop and stamped with the
/// module's [`FrameClock`].
pub struct Navigation<C = MonotonicFrameClock>
where
    C: FrameClock,
{
    ctx: ModuleCtx,
    context: NavigationContext,
    timer: FrameTimer,
    clock: C,
}

impl Navigation<MonotonicFrameClock> {
    pub fn new(ctx: ModuleCtx, guidance_config: GuidanceConfig, playback_config: PlaybackConfig) -> Self {
        Self::new_with_clock(MonotonicFrameClock::default(), ctx, guidance_config, playback_config)
    }
}

impl<C> Navigation<C>
where
    C: FrameClock,
{
    pub fn new_with_clock(
        clock: C,
        ctx: ModuleCtx,
        guidance_config: GuidanceConfig,
        playback_config: PlaybackConfig,
    ) -> Self {
        let interval = Duration::from_millis(playback_config.frame_interval_ms);
        Navigation {
            ctx,
            context: NavigationContext::new(guidance_config, playback_config),
            timer: FrameTimer::new(interval),
            clock,
        }
    }

    /// Mutable access to the context before the module runs.
    pub fn context_mut(&mut self) -> &mut NavigationContext {
        &mut self.context
    }

    fn publish(&self, events: Vec<EventKind>) {
        for kind in events {
            if self.ctx.publish_event(kind).is_err() {
                error!("Failed to publish navigation event, no receiver left");
            }
        }
    }

    fn on_frame(&mut self) {
        if self.timer.take_due().is_none() {
            return;
        }
        let timestamp = self.clock.timestamp();
        let events = self.context.on_frame(timestamp, &mut self.timer);
        self.publish(events);
    }

    fn on_event(&mut self, kind: EventKind) -> bool {
        let events = match kind {
            EventKind::QuitEvent => return false,
            EventKind::RouteLoadedEvent(description) => self
                .context
                .on_route_loaded((*description).clone(), &mut self.timer),
            EventKind::GnssPositionEvent(position) => self.context.on_live_position(&position),
            EventKind::StartSimulationEvent => self.context.on_start_simulation(&mut self.timer),
            EventKind::StopSimulationEvent => self.context.on_stop_simulation(&mut self.timer),
            EventKind::CycleSpeedMultiplierEvent => self.context.on_cycle_speed(),
            EventKind::ToggleGuidanceEvent => self.context.on_toggle_guidance(),
            _ => vec![],
        };
        self.publish(events);
        true
    }
}

#[async_trait]
impl<C> Module for Navigation<C>
where
    C: FrameClock + Send,
{
    /// Runs the navigation loop until a `QuitEvent` is received.
    async fn run(&mut self) -> Result<(), ()> {
        self.clock.start();
        info!("Navigation started");
        let mut run = true;
        while run {
            let deadline = self.timer.deadline();
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => run = self.on_event(event.kind),
                        Err(e) => error!("Failed to receive event. Error {}", e),
                    }
                }
                _ = frame_timer::sleep_until(deadline), if deadline.is_some() => {
                    self.on_frame();
                }
            }
        }
        info!("Navigation stopped");
        Ok(())
    }
}

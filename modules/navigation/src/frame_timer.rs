// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use algorithm::playback::{FrameId, FrameScheduler};
use std::time::Duration;
use tokio::time::Instant;

/// Deadline based [`FrameScheduler`] for the navigation loop.
///
/// At most one frame is outstanding. The loop sleeps until [`deadline`](Self::deadline)
/// and then calls [`take_due`](Self::take_due) before handing the frame to the simulator.
pub struct FrameTimer {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameId, Instant)>,
}

impl FrameTimer {
    pub fn new(interval: Duration) -> Self {
        FrameTimer {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Removes the outstanding frame once its deadline has passed.
    pub fn take_due(&mut self) -> Option<FrameId> {
        match self.pending {
            Some((frame, deadline)) if deadline <= Instant::now() => {
                self.pending = None;
                Some(frame)
            }
            _ => None,
        }
    }
}

impl FrameScheduler for FrameTimer {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let frame = FrameId(self.next_id);
        self.pending = Some((frame, Instant::now() + self.interval));
        frame
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        if self.pending.is_some_and(|(pending, _)| pending == frame) {
            self.pending = None;
        }
    }
}

/// Sleeps until `deadline`, or forever without one.
pub async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

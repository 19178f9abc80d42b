// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use std::time::{Duration, Instant};

/// A source of monotonic frame timestamps.
///
/// Every scheduled playback frame is stamped with the value of
/// [`timestamp`](Self::timestamp). Only differences between two timestamps
/// matter, so the origin set by [`start`](Self::start) is arbitrary, but the
/// values must never go backwards.
pub trait FrameClock {
    /// Sets the origin of the timestamps to the current moment.
    fn start(&mut self);

    /// Returns the time passed since the last call to [`start`](Self::start).
    fn timestamp(&self) -> Duration;
}

/// A [`FrameClock`] backed by [`Instant`], unaffected by system clock changes.
///
/// Returns [`Duration::ZERO`] until it is started.
pub struct MonotonicFrameClock {
    origin: Option<Instant>,
}

impl MonotonicFrameClock {
    pub fn new() -> Self {
        MonotonicFrameClock { origin: None }
    }
}

impl Default for MonotonicFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicFrameClock {
    fn start(&mut self) {
        self.origin = Some(Instant::now());
    }

    fn timestamp(&self) -> Duration {
        self.origin.map_or(Duration::ZERO, |origin| origin.elapsed())
    }
}

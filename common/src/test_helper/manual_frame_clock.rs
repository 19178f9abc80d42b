use crate::frame_clock::FrameClock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A [`FrameClock`] whose timestamps are set by the test.
///
/// The clock and all of its [`ManualFrameClockHandle`]s share one value, so a
/// test can move time forward while the clock is owned by a running module.
#[derive(Default)]
pub struct ManualFrameClock {
    now: Arc<Mutex<Duration>>,
}

/// Controls the timestamps of a [`ManualFrameClock`] from outside.
#[derive(Clone)]
pub struct ManualFrameClockHandle {
    now: Arc<Mutex<Duration>>,
}

impl ManualFrameClock {
    pub fn handle(&self) -> ManualFrameClockHandle {
        ManualFrameClockHandle {
            now: self.now.clone(),
        }
    }
}

impl ManualFrameClockHandle {
    /// Sets the timestamp that is reported from now on.
    pub fn set(&self, timestamp: Duration) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = timestamp;
    }

    /// Moves the reported timestamp forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += step;
    }
}

impl FrameClock for ManualFrameClock {
    /// Does nothing, test time is controlled through the handle.
    fn start(&mut self) {}

    fn timestamp(&self) -> Duration {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

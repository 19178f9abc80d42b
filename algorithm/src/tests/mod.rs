use crate::playback::{FrameId, FrameScheduler};

mod test_geo;
mod test_playback;
mod test_route_model;

/// Scheduler that only records which frames were requested and cancelled.
#[derive(Default)]
pub struct RecordingScheduler {
    next_id: u64,
    pub requested: Vec<FrameId>,
    pub cancelled: Vec<FrameId>,
}

impl FrameScheduler for RecordingScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let frame = FrameId(self.next_id);
        self.requested.push(frame);
        frame
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.cancelled.push(frame);
    }
}

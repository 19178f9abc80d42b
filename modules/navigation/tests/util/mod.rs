use algorithm::playback::{FrameId, FrameScheduler};
use common::navigation::{GuidanceDisplay, NavigationDisplay};
use module_core::{EventKind, EventKindType, payload_ref};

/// Scheduler that only records what it was asked to do.
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

pub fn event_types(events: &[EventKind]) -> Vec<EventKindType> {
    events.iter().map(EventKindType::from).collect()
}

pub fn guidance_displays(events: &[EventKind]) -> Vec<GuidanceDisplay> {
    events
        .iter()
        .filter_map(|kind| payload_ref!(kind, EventKind::GuidanceEvent))
        .map(|display| (**display).clone())
        .collect()
}

pub fn navigation_display(events: &[EventKind]) -> NavigationDisplay {
    events
        .iter()
        .find_map(|kind| payload_ref!(kind, EventKind::DisplayPositionEvent))
        .map(|display| **display)
        .expect("No display position event")
}

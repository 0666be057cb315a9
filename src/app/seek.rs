//! Seek-drag gestures coming from the progress bar.

use std::time::Instant;

use crate::access::AccessPlatform;
use crate::audio::Output;
use crate::library::MediaIndex;

use super::model::App;

impl<A: AccessPlatform, I: MediaIndex, O: Output> App<A, I, O> {
    /// The user grabbed the seek handle: stop the poller from moving it.
    pub fn begin_seek_drag(&mut self) {
        self.dragging = true;
        self.poller.disarm();
    }

    /// The handle moved. Only the slider and the elapsed label follow; the
    /// session is untouched until the drag ends.
    pub fn drag_seek_to(&mut self, position_ms: u64) {
        if !self.dragging {
            return;
        }
        let position = position_ms.min(self.screen.seek_max);
        self.screen.show_position(position);
    }

    /// The handle was released: resume sampling and apply the seek.
    pub fn end_seek_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.session.is_none() {
            return;
        }
        self.poller.arm(Instant::now());
        self.seek_to(self.screen.seek_position);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

//! Presentation state pushed to the terminal UI.

use std::collections::VecDeque;

use crate::poller::{PositionSample, format_time};

pub const PLAY_LABEL: &str = "Play";
pub const PAUSE_LABEL: &str = "Pause";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLength {
    Short,
    Long,
}

/// A transient message shown on top of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub length: NoticeLength,
}

/// Everything the screen renders that the controller owns.
#[derive(Debug, Clone)]
pub struct Screen {
    pub status: String,
    pub song_title: String,
    pub current_time: String,
    pub total_time: String,
    pub play_button: &'static str,
    pub seek_max: u64,
    pub seek_position: u64,
    notices: VecDeque<Notice>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            status: String::new(),
            song_title: "No song selected".to_string(),
            current_time: format_time(0),
            total_time: format_time(0),
            play_button: PLAY_LABEL,
            seek_max: 0,
            seek_position: 0,
            notices: VecDeque::new(),
        }
    }
}

impl Screen {
    pub fn notify(&mut self, text: impl Into<String>, length: NoticeLength) {
        self.notices.push_back(Notice {
            text: text.into(),
            length,
        });
    }

    /// Pop the oldest queued notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Reset the seek range for a newly started track.
    pub fn start_track(&mut self, duration_ms: u64) {
        self.seek_max = duration_ms;
        self.seek_position = 0;
        self.total_time = format_time(duration_ms);
        self.current_time = format_time(0);
    }

    /// Move the slider and elapsed label to `position_ms`.
    pub fn show_position(&mut self, position_ms: u64) {
        self.seek_position = position_ms;
        self.current_time = format_time(position_ms);
    }

    pub fn apply_sample(&mut self, sample: PositionSample) {
        self.show_position(sample.position_ms);
    }

    /// Fraction of the track already played, for the progress bar.
    pub fn progress_ratio(&self) -> f64 {
        if self.seek_max == 0 {
            return 0.0;
        }
        (self.seek_position.min(self.seek_max) as f64) / (self.seek_max as f64)
    }
}

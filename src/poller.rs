//! Periodic position sampling.
//!
//! The poller only decides *when* a sample is due; `sample` reads the session
//! and the screen consumes the result.

use std::time::{Duration, Instant};

use crate::audio::Session;

/// A self-rescheduling tick schedule that can be armed and disarmed.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    /// Schedule a tick for `now`. Re-arming replaces the existing schedule.
    pub fn arm(&mut self, now: Instant) {
        self.next_tick = Some(now);
    }

    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// True when a tick is due at `now`; the next one is then scheduled one
    /// interval later.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(at) if at <= now => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PositionSample {
    pub position_ms: u64,
}

pub fn sample(session: &impl Session) -> PositionSample {
    PositionSample {
        position_ms: session.position_ms(),
    }
}

/// Format milliseconds as `m:ss`, dropping sub-second precision.
pub fn format_time(millis: u64) -> String {
    let minutes = millis / 60_000;
    let seconds = millis / 1000 - minutes * 60;
    format!("{minutes}:{seconds:02}")
}

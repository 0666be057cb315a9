//! Transport controls over the single playback session.

use std::time::Instant;

use crate::access::AccessPlatform;
use crate::audio::{Output, Session};
use crate::error::AppError;
use crate::library::MediaIndex;

use super::model::{App, Selection};
use super::screen::{NoticeLength, PAUSE_LABEL, PLAY_LABEL};

impl<A: AccessPlatform, I: MediaIndex, O: Output> App<A, I, O> {
    fn track_count(&self) -> Result<usize, AppError> {
        match self.library.len() {
            0 => Err(AppError::EmptyLibrary),
            n => Ok(n),
        }
    }

    /// Start, pause or resume depending on the session state.
    pub fn toggle_play_pause(&mut self) {
        if self.current_index().is_none() {
            self.screen.notify("Scan and load the track list first.", NoticeLength::Short);
            return;
        }
        if self.session.is_none() {
            self.start_current();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.is_playing() {
            session.pause();
            self.screen.play_button = PLAY_LABEL;
            self.screen.status = "Paused...".to_string();
            self.poller.disarm();
            tracing::debug!("paused");
        } else {
            session.start();
            self.screen.play_button = PAUSE_LABEL;
            self.screen.status = "Playing...".to_string();
            self.arm_poller(Instant::now());
            tracing::debug!("resumed");
        }
    }

    /// Drop the live session, if any, and stop sampling its position.
    pub(super) fn release_session(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("session released");
        }
        self.poller.disarm();
    }

    /// Sampling stays off while the seek handle is held.
    pub(super) fn arm_poller(&mut self, now: Instant) {
        if !self.dragging {
            self.poller.arm(now);
        }
    }

    /// Play the current entry from the start, replacing any live session.
    /// An active seek drag belongs to the old session and is dropped.
    pub fn start_current(&mut self) {
        self.release_session();
        self.dragging = false;
        let Some(index) = self.current_index() else {
            return;
        };

        match self.open_session(index) {
            Ok(()) => {
                let title = self.current_title().unwrap_or_default();
                tracing::info!(index, %title, "playback started");
                self.screen.play_button = PAUSE_LABEL;
                self.screen.status = format!("Playing: {title}");
            }
            Err(err) => {
                tracing::error!(index, %err, "could not start playback");
                self.screen.start_track(0);
                self.screen.play_button = PLAY_LABEL;
                self.screen.status = "Error playing track.".to_string();
                self.screen.notify(format!("Error: {err}"), NoticeLength::Long);
            }
        }
    }

    fn open_session(&mut self, index: usize) -> Result<(), AppError> {
        let Some(entry) = self.library.get(index) else {
            return Err(AppError::EmptyLibrary);
        };
        let mut session = self.output.open(&entry.track)?;

        self.screen.start_track(session.duration_ms());
        self.arm_poller(Instant::now());
        session.start();
        self.session = Some(session);
        Ok(())
    }

    /// Advance to the following entry, wrapping to the first.
    pub fn next(&mut self) {
        let len = match self.track_count() {
            Ok(len) => len,
            Err(err) => {
                tracing::debug!(%err, "next ignored");
                self.screen.notify("No tracks in the list.", NoticeLength::Short);
                return;
            }
        };

        let index = match self.selection {
            Selection::Selected(i) => (i + 1) % len,
            Selection::NoSelection => 0,
        };
        self.change_track(index);
    }

    /// Step back to the preceding entry, wrapping to the last.
    pub fn previous(&mut self) {
        let len = match self.track_count() {
            Ok(len) => len,
            Err(err) => {
                tracing::debug!(%err, "previous ignored");
                self.screen.notify("No tracks in the list.", NoticeLength::Short);
                return;
            }
        };

        let index = match self.selection {
            Selection::Selected(0) | Selection::NoSelection => len - 1,
            Selection::Selected(i) => i - 1,
        };
        self.change_track(index);
    }

    fn change_track(&mut self, index: usize) {
        self.selection = Selection::Selected(index);
        self.refresh_song_info();
        self.start_current();
    }

    /// Move the live session to `position_ms`; a paused session resumes.
    /// A rejected seek leaves both the session and the screen as they were.
    pub fn seek_to(&mut self, position_ms: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(err) = session.seek(position_ms) {
            tracing::warn!(position_ms, %err, "seek rejected");
            return;
        }
        let resumed = !session.is_playing();
        if resumed {
            session.start();
        }

        self.screen.show_position(position_ms);
        if resumed {
            let title = self.current_title().unwrap_or_default();
            self.screen.play_button = PAUSE_LABEL;
            self.screen.status = format!("Playing: {title}");
            self.arm_poller(Instant::now());
        }
    }

    /// Release everything tied to the screen. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.release_session();
        self.dragging = false;
        if !self.torn_down {
            tracing::info!("controller torn down");
        }
        self.torn_down = true;
    }
}

//! Application model: the `App` controller and its selection type.
//!
//! `App` owns the library, the current selection, the single playback
//! session and the position poller. The UI reaches them only through the
//! operations in `gate`, `playback` and `seek`.

use std::time::{Duration, Instant};

use crate::access::{AccessPlatform, GrantRequest};
use crate::audio::{Output, Session};
use crate::library::{Library, MediaIndex};
use crate::poller::{self, Poller};

use super::screen::{Notice, Screen};

/// Which library entry is current.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Only while the library is empty.
    #[default]
    NoSelection,
    Selected(usize),
}

impl Selection {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::NoSelection => None,
            Self::Selected(i) => Some(i),
        }
    }
}

/// The main application controller.
pub struct App<A: AccessPlatform, I: MediaIndex, O: Output> {
    pub(super) access: A,
    pub(super) index: I,
    pub(super) output: O,

    pub(super) library: Library,
    pub(super) selection: Selection,
    pub(super) session: Option<O::Session>,
    pub(super) poller: Poller,

    pub(super) pending_grant: Option<GrantRequest>,
    pub(super) dragging: bool,
    pub(super) torn_down: bool,

    pub(super) screen: Screen,
}

impl<A: AccessPlatform, I: MediaIndex, O: Output> App<A, I, O> {
    /// Create an `App` with an empty library and nothing playing.
    pub fn new(access: A, index: I, output: O, poll_interval: Duration) -> Self {
        Self {
            access,
            index,
            output,
            library: Library::default(),
            selection: Selection::NoSelection,
            session: None,
            poller: Poller::new(poll_interval),
            pending_grant: None,
            dragging: false,
            torn_down: false,
            screen: Screen::default(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.screen.take_notice()
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_playing())
    }

    pub fn poller_armed(&self) -> bool {
        self.poller.is_armed()
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut A {
        &mut self.access
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The selected index, if it points into the library.
    pub(super) fn current_index(&self) -> Option<usize> {
        self.selection.index().filter(|&i| i < self.library.len())
    }

    /// Display name for the current entry, resolved through the index.
    pub(super) fn current_title(&self) -> Option<String> {
        let entry = self.library.get(self.current_index()?)?;
        Some(
            self.index
                .display_name(&entry.track)
                .unwrap_or_else(|| "Unknown title".to_string()),
        )
    }

    pub(super) fn refresh_song_info(&mut self) {
        if let Some(title) = self.current_title() {
            self.screen.song_title = title;
        }
    }

    /// Drive everything that happens without user input: permission answers,
    /// natural track completion and position ticks.
    pub fn poll_events(&mut self, now: Instant) {
        self.poll_grant();
        if self.torn_down {
            return;
        }

        // The end of a track is handled once the seek handle is released.
        let completed = !self.dragging
            && self.session.as_mut().is_some_and(|s| s.take_completion());
        if completed {
            tracing::info!(index = ?self.selection.index(), "track finished");
            self.next();
        }

        if self.poller.due(now) {
            if let Some(session) = self.session.as_ref() {
                let sample = poller::sample(session);
                self.screen.apply_sample(sample);
            }
        }
    }
}

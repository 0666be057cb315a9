//! Permission gate and library scan.

use crate::access::{AccessPlatform, GrantPoll, GrantResponse};
use crate::audio::Output;
use crate::error::AppError;
use crate::library::{self, MediaIndex};

use super::model::{App, Selection};
use super::screen::{NoticeLength, PLAY_LABEL};

/// Result of [`App::ensure_access`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Access was already granted and a scan ran.
    Granted,
    /// A request is in flight; its answer arrives through `poll_events`.
    Requested,
}

fn check_grant(response: &GrantResponse) -> Result<(), AppError> {
    if response.all_granted() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

impl<A: AccessPlatform, I: MediaIndex, O: Output> App<A, I, O> {
    /// Make sure the library may be read, scanning right away when it can.
    pub fn ensure_access(&mut self) -> AccessOutcome {
        let permissions = self.access.required_permissions();
        if permissions.iter().all(|&p| self.access.is_granted(p)) {
            self.screen.status = "Permissions granted. Scanning...".to_string();
            self.scan();
            return AccessOutcome::Granted;
        }

        self.screen.status = "Requesting permissions...".to_string();
        if self.pending_grant.is_none() {
            tracing::info!(?permissions, "requesting library access");
            self.pending_grant = Some(self.access.request(&permissions));
        }
        AccessOutcome::Requested
    }

    pub(super) fn poll_grant(&mut self) {
        let Some(request) = self.pending_grant.as_ref() else {
            return;
        };
        match request.poll() {
            GrantPoll::Pending => {}
            GrantPoll::Abandoned => {
                tracing::warn!("permission request dropped without an answer");
                self.pending_grant = None;
            }
            GrantPoll::Ready(response) => {
                self.pending_grant = None;
                self.on_grant_response(&response);
            }
        }
    }

    fn on_grant_response(&mut self, response: &GrantResponse) {
        if self.torn_down {
            tracing::debug!("ignoring permission answer after teardown");
            return;
        }
        match check_grant(response) {
            Ok(()) => {
                self.screen.status = "Permissions granted. Scanning...".to_string();
                self.scan();
            }
            Err(err) => {
                tracing::warn!(%err, "library access refused");
                self.screen.status = "Permissions denied. Cannot access music.".to_string();
                self.screen.notify(
                    "Storage permission is required to continue.",
                    NoticeLength::Long,
                );
            }
        }
    }

    /// Replace the library with a fresh scan of the media index.
    pub fn scan(&mut self) {
        self.library = library::scan(&self.index);
        let count = self.library.len();
        tracing::info!(tracks = count, "library scanned");

        if count == 0 {
            // Nothing left to control the session from.
            self.release_session();
            self.screen.start_track(0);
            self.screen.play_button = PLAY_LABEL;
            self.selection = Selection::NoSelection;
            self.screen.status = "No music files found on the device.".to_string();
            return;
        }

        self.screen.status = format!("Scan complete! {count} tracks found.");
        self.selection = Selection::Selected(0);
        self.refresh_song_info();
    }
}

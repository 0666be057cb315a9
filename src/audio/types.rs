//! Traits describing the decoding/output service.
//!
//! An `Output` binds a track to a fresh `Session`. Dropping a session
//! releases it.

use crate::error::SessionError;
use crate::library::TrackRef;

/// One live decode/output binding to a single track.
pub trait Session {
    fn start(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    /// Move playback to `position_ms` without changing play/pause state.
    fn seek(&mut self, position_ms: u64) -> Result<(), SessionError>;
    fn duration_ms(&self) -> u64;
    fn position_ms(&self) -> u64;
    /// Returns true exactly once after the track has played to its end.
    fn take_completion(&mut self) -> bool;
}

/// The service sessions are created from.
pub trait Output {
    type Session: Session;

    /// Bind `track` and prepare it for playback. The session starts paused.
    fn open(&mut self, track: &TrackRef) -> Result<Self::Session, SessionError>;
}

//! Error types surfaced by the controller and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while binding a track to the output service.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The track's locator could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was opened but could not be decoded.
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// No usable audio output device.
    #[error("audio output unavailable: {0}")]
    Device(String),

    /// The session rejected a seek request.
    #[error("seek failed: {0}")]
    Seek(String),
}

/// Conditions the controller turns into status text and notices.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("permission to read the music library was denied")]
    PermissionDenied,

    #[error("the library is empty")]
    EmptyLibrary,

    #[error(transparent)]
    SessionSetup(#[from] SessionError),
}

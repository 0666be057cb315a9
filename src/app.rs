//! Application module: the controller used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and owns the library, selection,
//! playback session and poller. Its operations are split across `gate`
//! (permissions and scanning), `playback` (transport) and `seek` (drag
//! gestures). `screen` holds what the UI renders.

mod gate;
mod model;
mod playback;
mod screen;
mod seek;

pub use gate::AccessOutcome;
pub use model::*;
pub use screen::*;

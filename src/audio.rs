//! Decoding/output service used by the playback controller.
//!
//! `types` holds the `Output`/`Session` seam; `sink` is the rodio backend.

mod sink;
mod types;

pub use sink::{RodioOutput, RodioSession};
pub use types::{Output, Session};

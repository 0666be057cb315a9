//! Library scanner and the media index it queries.
//!
//! `MediaIndex` is the seam to the content index; `DirectoryIndex` indexes a
//! directory tree. `scan` turns one music query into an ordered `Library`.

mod index;
mod model;
mod scan;

pub use index::*;
pub use model::*;
pub use scan::{DirectoryIndex, scan};

#[cfg(test)]
mod tests;

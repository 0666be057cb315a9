use std::path::PathBuf;

use super::model::TrackRef;

/// Row filter applied by the media index.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Audio items flagged as music (no ringtones, alarms, ...).
    IsMusic,
    /// Every audio item.
    AnyAudio,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Order {
    DisplayNameAsc,
    Unsorted,
}

/// A query against the audio collection. Rows always project
/// `(identifier, display name)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    pub selection: Predicate,
    pub order: Order,
}

impl MediaQuery {
    /// The library scan query: music only, display name ascending.
    pub fn music() -> Self {
        Self {
            selection: Predicate::IsMusic,
            order: Order::DisplayNameAsc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRow {
    pub id: u64,
    pub display_name: String,
    pub locator: PathBuf,
}

impl MediaRow {
    /// Rebuild the content reference this row identifies.
    pub fn track_ref(&self) -> TrackRef {
        TrackRef::new(self.id, self.locator.clone())
    }
}

/// The platform's content index for audio media.
pub trait MediaIndex {
    /// Run `query`. `None` means the query itself failed.
    fn query(&self, query: &MediaQuery) -> Option<Vec<MediaRow>>;

    /// Resolve the current display name of `track`, if it still exists.
    fn display_name(&self, track: &TrackRef) -> Option<String>;
}

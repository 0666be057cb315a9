use std::path::{Path, PathBuf};

/// Opaque, stable reference to one playable item of the media index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRef {
    id: u64,
    locator: PathBuf,
}

impl TrackRef {
    pub fn new(id: u64, locator: impl Into<PathBuf>) -> Self {
        Self {
            id,
            locator: locator.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Where the output service finds the item.
    pub fn locator(&self) -> &Path {
        &self.locator
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub track: TrackRef,
    /// Display name as reported by the index at scan time.
    pub name: String,
}

/// Ordered result of the most recent scan. Replaced wholesale, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

impl Library {
    pub fn new(entries: Vec<LibraryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LibraryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }
}

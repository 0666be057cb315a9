use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::index::{MediaIndex, MediaQuery, MediaRow, Order, Predicate};
use super::model::{Library, LibraryEntry, TrackRef};

/// Query `index` for music and build a fresh [`Library`] in the order rows
/// come back. A failed query is treated as an empty result.
pub fn scan(index: &dyn MediaIndex) -> Library {
    let Some(rows) = index.query(&MediaQuery::music()) else {
        tracing::warn!("media index query failed; treating library as empty");
        return Library::default();
    };

    let entries = rows
        .into_iter()
        .map(|row| {
            let track = row.track_ref();
            tracing::debug!(
                id = track.id(),
                name = %row.display_name,
                locator = %track.locator().display(),
                "track found"
            );
            LibraryEntry {
                track,
                name: row.display_name,
            }
        })
        .collect();

    Library::new(entries)
}

/// Media index over a directory tree.
pub struct DirectoryIndex {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    follow_links: bool,
    include_hidden: bool,
}

impl DirectoryIndex {
    pub fn new(root: impl Into<PathBuf>, settings: &LibrarySettings) -> Self {
        Self {
            root: root.into(),
            extensions: settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            exclude_dirs: settings
                .exclude_dirs
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            follow_links: settings.follow_links,
            include_hidden: settings.include_hidden,
        }
    }

    fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    /// Whether any directory between the root and `path` is excluded.
    fn in_excluded_dir(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent.components().any(|c| {
            let name = c.as_os_str().to_string_lossy().to_lowercase();
            self.exclude_dirs.iter().any(|d| d == &name)
        })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn display_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

impl MediaIndex for DirectoryIndex {
    fn query(&self, query: &MediaQuery) -> Option<Vec<MediaRow>> {
        if std::fs::read_dir(&self.root).is_err() {
            return None;
        }

        // Sorted walk keeps identifiers deterministic for an unchanged tree.
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut rows: Vec<MediaRow> = Vec::new();
        let mut next_id: u64 = 1;
        for entry in walker
            .into_iter()
            .filter_entry(|e| self.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() && !path.is_file() {
                continue;
            }
            if !self.is_audio_file(path) {
                continue;
            }

            let id = next_id;
            next_id += 1;

            if query.selection == Predicate::IsMusic && self.in_excluded_dir(path) {
                continue;
            }
            let Some(display_name) = display_name_of(path) else {
                continue;
            };

            rows.push(MediaRow {
                id,
                display_name,
                locator: path.to_path_buf(),
            });
        }

        if query.order == Order::DisplayNameAsc {
            rows.sort_by(|a, b| {
                a.display_name
                    .to_lowercase()
                    .cmp(&b.display_name.to_lowercase())
                    .then_with(|| a.display_name.cmp(&b.display_name))
            });
        }
        Some(rows)
    }

    fn display_name(&self, track: &TrackRef) -> Option<String> {
        let path = track.locator();
        if path.is_file() {
            display_name_of(path)
        } else {
            None
        }
    }
}
